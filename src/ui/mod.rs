//! Terminal UI components.
//!
//! - [`viewport`]: Scroll position and visible range management
//! - [`render`]: Draw the pager, status bar, and mark overlay

pub mod viewport;

use ratatui::prelude::*;
use ratatui::widgets::{Clear, Paragraph};

use crate::app::{Model, OverlaySurface, ToastLevel};
use crate::host::EditorHost;

/// Render the whole frame: text area, status bar, toast, and the mark
/// overlay when one is open.
pub fn render(model: &Model, frame: &mut Frame) {
    let area = frame.area();
    if area.height == 0 {
        return;
    }
    let text_height = area.height.saturating_sub(1);
    let text_area = Rect::new(area.x, area.y, area.width, text_height);
    let status_area = Rect::new(area.x, area.y + text_height, area.width, 1);

    if model.help_visible {
        render_help(frame, text_area);
    } else {
        render_document(model, frame, text_area);
        if let Some(pos) = model.cursor_screen_pos() {
            frame.set_cursor_position((text_area.x + pos.col, text_area.y + pos.row));
        }
    }

    render_status_bar(model, frame, status_area);
    render_toast_bar(model, frame, status_area);

    if let Some(surface) = &model.overlay {
        render_mark_overlay(surface, frame, text_area);
    }
}

fn render_document(model: &Model, frame: &mut Frame, area: Rect) {
    let lines: Vec<Line> = model
        .viewport
        .visible_range()
        .map(|idx| Line::raw(model.buffer.line_at(idx).unwrap_or_default()))
        .collect();
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_help(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::styled(
            "markpeek help",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Line::raw(""),
        Line::raw("  j/k, arrows         Move cursor"),
        Line::raw("  h/l                 Left / right"),
        Line::raw("  Space/b             Page down / up"),
        Line::raw("  Ctrl-d / Ctrl-u     Half page"),
        Line::raw("  g / G               Top / bottom"),
        Line::raw(""),
        Line::raw("  m{char}             Set mark {char} at the cursor"),
        Line::raw("  '{char}             Jump to start of mark's line"),
        Line::raw("  `{char}             Jump to mark's exact position"),
        Line::raw(""),
        Line::raw("  ' or ` first show every mark in an overlay; the next"),
        Line::raw("  key jumps to that mark, any other key dismisses it."),
        Line::raw("  (Marks are not previewable from this help view.)"),
        Line::raw(""),
        Line::raw("  q / Ctrl-c          Quit"),
        Line::raw("  ? / F1              Toggle help"),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let filename = model.buffer_name(model.current_buffer());
    let percent = model.viewport.scroll_percent();
    let cursor = model.buffer.cursor();
    let line_info = format!("Line {}/{}", cursor.line + 1, model.buffer.line_count());
    let mark_info = match model.marks().len() {
        0 => String::new(),
        n => format!("  marks: {n}"),
    };
    let pending = if model.pending_set_mark { "  m-" } else { "" };

    let status = format!(" {filename}  [{percent}%]  {line_info}{mark_info}{pending}  ?:help");
    let status_bar =
        Paragraph::new(status).style(Style::default().bg(Color::DarkGray).fg(Color::White));
    frame.render_widget(status_bar, area);
}

fn render_toast_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let Some((message, level)) = model.active_toast() else {
        return;
    };
    let (prefix, style) = match level {
        ToastLevel::Info => (
            "[info]",
            Style::default().bg(Color::DarkGray).fg(Color::White),
        ),
        ToastLevel::Warning => (
            "[warn]",
            Style::default().bg(Color::Yellow).fg(Color::Black),
        ),
        ToastLevel::Error => ("[error]", Style::default().bg(Color::Red).fg(Color::White)),
    };
    let toast = Paragraph::new(format!("{prefix} {message}")).style(style);
    frame.render_widget(toast, area);
}

fn render_mark_overlay(surface: &OverlaySurface, frame: &mut Frame, area: Rect) {
    let rect = surface.rect;
    let popup = Rect::new(
        area.x + rect.col.min(area.width),
        area.y + rect.row.min(area.height),
        rect.width.min(area.width.saturating_sub(rect.col)),
        rect.height.min(area.height.saturating_sub(rect.row)),
    );
    if popup.width == 0 || popup.height == 0 {
        return;
    }

    let lines: Vec<Line> = surface.lines.iter().map(|l| Line::raw(l.as_str())).collect();
    let content = Paragraph::new(lines).style(Style::default().bg(Color::Black).fg(Color::White));
    frame.render_widget(Clear, popup);
    frame.render_widget(content, popup);
}
