use crate::app::Model;
use crate::app::model::ToastLevel;
use crate::buffer::Direction;
use crate::session::JumpStyle;

/// All possible events and actions in the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    // Navigation
    /// Move the cursor one step
    MoveCursor(Direction),
    /// Cursor one page up
    PageUp,
    /// Cursor one page down
    PageDown,
    /// Cursor half a page up
    HalfPageUp,
    /// Cursor half a page down
    HalfPageDown,
    /// Cursor to first line
    GoToTop,
    /// Cursor to last line
    GoToBottom,

    // Marks
    /// Next keystroke names a mark to set
    BeginSetMark,
    /// Set a mark at the cursor
    SetMark(char),
    /// Abandon a pending two-key sequence
    CancelPending,
    /// Open the mark preview overlay (handled as an event-loop side effect)
    OpenMarkPeek(JumpStyle),

    // Help
    /// Toggle help view
    ToggleHelp,
    /// Hide help view
    HideHelp,

    // Window
    /// Terminal resized
    Resize(u16, u16),

    // Application
    /// Quit the application
    Quit,
}

/// Pure function that updates the model based on a message.
///
/// This is the core of TEA - all state transitions happen here.
/// No side effects should occur in this function.
pub fn update(mut model: Model, msg: Message) -> Model {
    // Any action other than naming the mark abandons a pending `m`.
    if !matches!(msg, Message::SetMark(_)) {
        model.pending_set_mark = false;
    }

    match msg {
        Message::MoveCursor(direction) => {
            model.move_cursor(direction);
        }
        Message::PageUp => {
            let page = isize::try_from(model.viewport.height()).unwrap_or(isize::MAX);
            model.move_cursor_lines(-page);
        }
        Message::PageDown => {
            let page = isize::try_from(model.viewport.height()).unwrap_or(isize::MAX);
            model.move_cursor_lines(page);
        }
        Message::HalfPageUp => {
            let half = isize::try_from(model.viewport.height() / 2).unwrap_or(isize::MAX);
            model.move_cursor_lines(-half.max(1));
        }
        Message::HalfPageDown => {
            let half = isize::try_from(model.viewport.height() / 2).unwrap_or(isize::MAX);
            model.move_cursor_lines(half.max(1));
        }
        Message::GoToTop => {
            model.buffer.move_to(0, 0);
            model.scroll_cursor_into_view();
        }
        Message::GoToBottom => {
            model.buffer.move_to(model.buffer.line_count(), 0);
            model.scroll_cursor_into_view();
        }
        Message::BeginSetMark => {
            model.pending_set_mark = true;
        }
        Message::SetMark(name) => {
            if name.is_ascii_alphanumeric() {
                model.set_mark(name);
                model.show_toast(ToastLevel::Info, format!("mark '{name}' set"));
            } else {
                model.show_toast(ToastLevel::Warning, format!("invalid mark name '{name}'"));
            }
        }
        Message::CancelPending => {}
        Message::OpenMarkPeek(_) => {
            // Session side effect, handled by the event loop.
        }
        Message::ToggleHelp => {
            model.help_visible = !model.help_visible;
        }
        Message::HideHelp => {
            model.help_visible = false;
        }
        Message::Resize(width, height) => {
            model.viewport.resize(width, height.saturating_sub(1));
            model.scroll_cursor_into_view();
        }
        Message::Quit => {
            model.should_quit = true;
        }
    }

    model
}
