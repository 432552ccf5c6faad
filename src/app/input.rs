use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{Message, Model};
use crate::buffer::Direction;
use crate::session::JumpStyle;

/// Map a key event to a message, given the current mode.
pub(super) fn handle_key(key: KeyEvent, model: &Model) -> Option<Message> {
    if model.help_visible {
        return Some(Message::HideHelp);
    }

    if model.pending_set_mark {
        return match key.code {
            KeyCode::Char(c) if !has_command_modifier(key) => Some(Message::SetMark(c)),
            _ => Some(Message::CancelPending),
        };
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('d') => Some(Message::HalfPageDown),
            KeyCode::Char('u') => Some(Message::HalfPageUp),
            KeyCode::Char('c') | KeyCode::Char('q') => Some(Message::Quit),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char('j') | KeyCode::Down => Some(Message::MoveCursor(Direction::Down)),
        KeyCode::Char('k') | KeyCode::Up => Some(Message::MoveCursor(Direction::Up)),
        KeyCode::Char('h') | KeyCode::Left => Some(Message::MoveCursor(Direction::Left)),
        KeyCode::Char('l') | KeyCode::Right => Some(Message::MoveCursor(Direction::Right)),
        KeyCode::Char(' ') | KeyCode::PageDown => Some(Message::PageDown),
        KeyCode::Char('b') | KeyCode::PageUp => Some(Message::PageUp),
        KeyCode::Char('g') | KeyCode::Home => Some(Message::GoToTop),
        KeyCode::Char('G') | KeyCode::End => Some(Message::GoToBottom),
        KeyCode::Char('m') => Some(Message::BeginSetMark),
        KeyCode::Char(c) if JumpStyle::from_prefix(c).is_some() => {
            JumpStyle::from_prefix(c).map(Message::OpenMarkPeek)
        }
        KeyCode::Char('?') | KeyCode::F(1) => Some(Message::ToggleHelp),
        KeyCode::Char('q') => Some(Message::Quit),
        _ => None,
    }
}

/// Decode the keystroke captured by an overlay session.
///
/// Only a plain character counts; anything else dismisses the session.
pub(super) fn decode_capture_key(key: KeyEvent) -> Option<char> {
    match key.code {
        KeyCode::Char(c) if !has_command_modifier(key) => Some(c),
        _ => None,
    }
}

fn has_command_modifier(key: KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) || key.modifiers.contains(KeyModifiers::ALT)
}
