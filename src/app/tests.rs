use std::path::PathBuf;

use super::{Message, Model, ToastLevel, update};
use crate::buffer::Direction;
use crate::config::OverlayConfig;
use crate::host::EditorHost;
use crate::session::{JumpStyle, SessionController, SessionOutcome};

fn create_test_model() -> Model {
    Model::new(PathBuf::from("test.txt"), "alpha\nbeta\ngamma", (80, 24))
}

fn create_long_test_model() -> Model {
    let mut text = String::new();
    for i in 1..=100 {
        text.push_str(&format!("line {i}\n"));
    }
    Model::new(PathBuf::from("test.txt"), &text, (80, 24))
}

fn create_marked_model() -> Model {
    let mut model = Model::new(
        PathBuf::from("test.txt"),
        "zero\none\n  foo\nthree\nfour\nfive\nbar",
        (80, 24),
    );
    model.buffer.move_to(2, 2);
    model.set_mark('a');
    model.buffer.move_to(6, 0);
    model.set_mark('b');
    model.buffer.move_to(0, 0);
    model
}

#[test]
fn test_move_cursor_updates_cursor_and_viewport() {
    let model = create_long_test_model();
    let mut model = update(model, Message::MoveCursor(Direction::Down));
    assert_eq!(model.buffer.cursor().line, 1);

    for _ in 0..40 {
        model = update(model, Message::MoveCursor(Direction::Down));
    }
    assert_eq!(model.buffer.cursor().line, 41);
    assert!(model.viewport.visible_range().contains(&41));
}

#[test]
fn test_page_down_moves_a_full_page() {
    let model = create_long_test_model();
    let model = update(model, Message::PageDown);
    assert_eq!(model.buffer.cursor().line, 23);
}

#[test]
fn test_go_to_bottom_and_top() {
    let model = create_long_test_model();
    let model = update(model, Message::GoToBottom);
    assert_eq!(model.buffer.cursor().line, model.buffer.line_count() - 1);

    let model = update(model, Message::GoToTop);
    assert_eq!(model.buffer.cursor().line, 0);
    assert_eq!(model.viewport.offset(), 0);
}

#[test]
fn test_begin_set_mark_then_char_sets_mark() {
    let model = create_test_model();
    let model = update(model, Message::BeginSetMark);
    assert!(model.pending_set_mark);

    let model = update(model, Message::SetMark('a'));
    assert!(!model.pending_set_mark);
    assert_eq!(model.marks().len(), 1);
    assert_eq!(model.marks()[0].name, 'a');
    assert_eq!(model.marks()[0].line, 0);
}

#[test]
fn test_set_mark_again_updates_in_place() {
    let mut model = create_test_model();
    model = update(model, Message::SetMark('a'));
    model = update(model, Message::SetMark('b'));
    model.buffer.move_to(2, 0);
    model = update(model, Message::SetMark('a'));

    let names: Vec<char> = model.marks().iter().map(|m| m.name).collect();
    assert_eq!(names, vec!['a', 'b']);
    assert_eq!(model.marks()[0].line, 2);
}

#[test]
fn test_set_mark_rejects_non_alphanumeric_names() {
    let model = create_test_model();
    let model = update(model, Message::SetMark('<'));
    assert!(model.marks().is_empty());
    let (message, level) = model.active_toast().unwrap();
    assert_eq!(level, ToastLevel::Warning);
    assert!(message.contains("invalid mark name"));
}

#[test]
fn test_any_other_message_abandons_pending_mark() {
    let model = create_test_model();
    let model = update(model, Message::BeginSetMark);
    let model = update(model, Message::MoveCursor(Direction::Down));
    assert!(!model.pending_set_mark);
}

#[test]
fn test_toggle_help_changes_current_buffer() {
    let model = create_test_model();
    assert_eq!(model.current_buffer(), super::FILE_BUFFER);

    let model = update(model, Message::ToggleHelp);
    assert!(model.help_visible);
    assert_eq!(model.current_buffer(), super::HELP_BUFFER);

    let model = update(model, Message::HideHelp);
    assert!(!model.help_visible);
}

#[test]
fn test_resize_keeps_cursor_visible() {
    let mut model = create_long_test_model();
    model = update(model, Message::GoToBottom);
    model = update(model, Message::Resize(40, 10));
    assert_eq!(model.viewport.width(), 40);
    assert_eq!(model.viewport.height(), 9);
    assert!(
        model
            .viewport
            .visible_range()
            .contains(&model.buffer.cursor().line)
    );
}

#[test]
fn test_quit_sets_flag() {
    let model = update(create_test_model(), Message::Quit);
    assert!(model.should_quit);
}

#[test]
fn test_session_jump_moves_cursor_to_first_non_blank() {
    let mut model = create_marked_model();
    let mut session = SessionController::new(OverlayConfig::default());

    assert!(session.open(&mut model, JumpStyle::Line));
    assert!(model.overlay.is_some());
    assert_eq!(
        model.overlay.as_ref().unwrap().lines,
        vec!["a: foo".to_string(), "b: bar".to_string()]
    );

    session.notify_painted();
    let outcome = session.handle_key(&mut model, Some('a'));
    assert_eq!(outcome, SessionOutcome::Jumped('a'));
    assert!(model.overlay.is_none());
    // 'a' was set at column 2 of "  foo"; the line style jumps to the
    // first non-blank, which is the same column here.
    assert_eq!(model.buffer.cursor().line, 2);
    assert_eq!(model.buffer.cursor().col, 2);
}

#[test]
fn test_session_exact_jump_restores_column() {
    let mut model = create_marked_model();
    let mut session = SessionController::new(OverlayConfig::default());

    session.open(&mut model, JumpStyle::Exact);
    session.notify_painted();
    let outcome = session.handle_key(&mut model, Some('b'));
    assert_eq!(outcome, SessionOutcome::Jumped('b'));
    assert_eq!(model.buffer.cursor().line, 6);
    assert_eq!(model.buffer.cursor().col, 0);
    assert!(model.viewport.visible_range().contains(&6));
}

#[test]
fn test_session_unmatched_key_leaves_cursor_alone() {
    let mut model = create_marked_model();
    let mut session = SessionController::new(OverlayConfig::default());

    session.open(&mut model, JumpStyle::Line);
    session.notify_painted();
    let outcome = session.handle_key(&mut model, Some('z'));
    assert_eq!(outcome, SessionOutcome::Dismissed);
    assert!(model.overlay.is_none());
    assert_eq!(model.buffer.cursor().line, 0);
}

#[test]
fn test_session_declines_in_help_view() {
    let mut model = create_marked_model();
    model.help_visible = true;
    let mut session = SessionController::new(OverlayConfig::default());

    assert!(!session.open(&mut model, JumpStyle::Line));
    assert!(model.overlay.is_none());
}

#[test]
fn test_session_warns_when_cursor_scrolled_away() {
    let mut model = create_marked_model();
    // Scroll the viewport away from the cursor line.
    model.viewport.set_total_lines(model.buffer.line_count().max(60));
    model.viewport.ensure_visible(59);
    assert!(model.cursor_screen_pos().is_none());

    let mut session = SessionController::new(OverlayConfig::default());
    assert!(session.open(&mut model, JumpStyle::Line));
    let (_, level) = model.active_toast().unwrap();
    assert_eq!(level, ToastLevel::Warning);
    assert_eq!(model.overlay.as_ref().unwrap().rect.col, 1);
    assert_eq!(model.overlay.as_ref().unwrap().rect.row, 1);
}
