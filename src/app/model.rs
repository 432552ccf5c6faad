use std::path::PathBuf;
use std::time::{Duration, Instant};

use unicode_width::UnicodeWidthStr;

use crate::buffer::{Direction, TextBuffer};
use crate::host::{
    BufferId, BufferKind, EditorHost, HostError, OverlayId, RawMark, ScreenPos, ViewportSize,
};
use crate::overlay::OverlayRect;
use crate::session::JumpStyle;
use crate::ui::viewport::Viewport;

/// Buffer handle for the viewed file.
pub const FILE_BUFFER: BufferId = BufferId(1);
/// Buffer handle for the help view.
pub const HELP_BUFFER: BufferId = BufferId(2);

const TOAST_DURATION: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// A mark set by the user, in buffer coordinates (zero-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkEntry {
    pub name: char,
    pub line: usize,
    pub col: usize,
}

/// The overlay surface currently on screen, as the host paints it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlaySurface {
    pub id: OverlayId,
    pub rect: OverlayRect,
    pub lines: Vec<String>,
}

/// The complete application state.
///
/// All state lives here - no global or scattered state.
pub struct Model {
    /// Path to the viewed file
    pub file_path: PathBuf,
    /// The viewed text
    pub buffer: TextBuffer,
    /// Viewport managing scroll position
    pub viewport: Viewport,
    /// Marks in insertion order; this order is what the overlay shows
    marks: Vec<MarkEntry>,
    /// Overlay surface being painted, if one is open
    pub overlay: Option<OverlaySurface>,
    next_overlay_id: u32,
    /// Whether the help view is active (a special buffer)
    pub help_visible: bool,
    /// Next `m{char}` keystroke names a mark
    pub pending_set_mark: bool,
    toast: Option<Toast>,
    /// Whether the app should quit
    pub should_quit: bool,
}

impl Model {
    /// Create a model for the given file content and terminal size.
    pub fn new(file_path: PathBuf, text: &str, size: (u16, u16)) -> Self {
        let buffer = TextBuffer::from_text(text);
        let viewport = Viewport::new(size.0, size.1.saturating_sub(1), buffer.line_count());
        Self {
            file_path,
            buffer,
            viewport,
            marks: Vec::new(),
            overlay: None,
            next_overlay_id: 0,
            help_visible: false,
            pending_set_mark: false,
            toast: None,
            should_quit: false,
        }
    }

    /// Marks in the order the overlay will show them.
    pub fn marks(&self) -> &[MarkEntry] {
        &self.marks
    }

    /// Set or move a mark at the cursor.
    ///
    /// Re-setting an existing name updates it in place so the enumeration
    /// order stays stable.
    pub fn set_mark(&mut self, name: char) {
        let cursor = self.buffer.cursor();
        let entry = MarkEntry {
            name,
            line: cursor.line,
            col: cursor.col,
        };
        if let Some(existing) = self.marks.iter_mut().find(|m| m.name == name) {
            *existing = entry;
        } else {
            self.marks.push(entry);
        }
    }

    pub fn move_cursor(&mut self, direction: Direction) {
        self.buffer.move_cursor(direction);
        self.scroll_cursor_into_view();
    }

    pub fn move_cursor_lines(&mut self, delta: isize) {
        self.buffer.move_cursor_lines(delta);
        self.scroll_cursor_into_view();
    }

    pub fn scroll_cursor_into_view(&mut self) {
        self.viewport.ensure_visible(self.buffer.cursor().line);
    }

    pub fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + TOAST_DURATION,
        });
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast.as_ref().map(|t| (t.message.as_str(), t.level))
    }

    /// Drop an expired toast. Returns true when one was cleared.
    pub fn expire_toast(&mut self, now: Instant) -> bool {
        if self.toast.as_ref().is_some_and(|t| now >= t.expires_at) {
            self.toast = None;
            return true;
        }
        false
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new(PathBuf::new(), "", (80, 24))
    }
}

impl EditorHost for Model {
    fn current_buffer(&self) -> BufferId {
        if self.help_visible {
            HELP_BUFFER
        } else {
            FILE_BUFFER
        }
    }

    fn buffer_kind(&self, buffer: BufferId) -> BufferKind {
        match buffer {
            FILE_BUFFER => BufferKind::Normal,
            HELP_BUFFER => BufferKind::Help,
            _ => BufferKind::Scratch,
        }
    }

    fn buffer_valid(&self, buffer: BufferId) -> bool {
        buffer == FILE_BUFFER || buffer == HELP_BUFFER
    }

    fn buffer_name(&self, buffer: BufferId) -> String {
        match buffer {
            FILE_BUFFER => self
                .file_path
                .file_name()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_else(|| "untitled".to_string()),
            HELP_BUFFER => "[help]".to_string(),
            _ => String::new(),
        }
    }

    fn line(&self, buffer: BufferId, line: usize) -> Option<String> {
        if buffer != FILE_BUFFER {
            return None;
        }
        self.buffer.line_at(line.checked_sub(1)?)
    }

    fn local_marks(&self, buffer: BufferId) -> Vec<RawMark> {
        if buffer != FILE_BUFFER {
            return Vec::new();
        }
        self.marks
            .iter()
            .map(|m| RawMark {
                name: m.name.to_string(),
                buffer: FILE_BUFFER,
                line: m.line + 1,
                column: m.col + 1,
            })
            .collect()
    }

    fn cursor_screen_pos(&self) -> Option<ScreenPos> {
        let cursor = self.buffer.cursor();
        if !self.viewport.visible_range().contains(&cursor.line) {
            return None;
        }
        let row = u16::try_from(cursor.line - self.viewport.offset()).ok()?;
        let line = self.buffer.line_at(cursor.line).unwrap_or_default();
        let prefix = line.get(..cursor.col).unwrap_or(&line);
        let col = u16::try_from(prefix.width()).unwrap_or(u16::MAX);
        Some(ScreenPos { row, col })
    }

    fn viewport(&self) -> ViewportSize {
        ViewportSize {
            width: self.viewport.width(),
            height: self.viewport.height(),
        }
    }

    fn create_overlay(&mut self, rect: OverlayRect) -> Result<OverlayId, HostError> {
        if rect.width == 0 || rect.height == 0 {
            return Err(HostError::OverlaySurface);
        }
        self.next_overlay_id += 1;
        let id = OverlayId(self.next_overlay_id);
        self.overlay = Some(OverlaySurface {
            id,
            rect,
            lines: Vec::new(),
        });
        Ok(id)
    }

    fn replace_overlay_lines(&mut self, overlay: OverlayId, lines: Vec<String>) {
        if let Some(surface) = self.overlay.as_mut().filter(|s| s.id == overlay) {
            surface.lines = lines;
        }
    }

    fn destroy_overlay(&mut self, overlay: OverlayId) {
        // Stale handles are tolerated: only the matching surface is torn down.
        if self.overlay.as_ref().is_some_and(|s| s.id == overlay) {
            self.overlay = None;
        }
    }

    fn warn(&mut self, message: &str) {
        tracing::warn!(message, "host warning");
        self.show_toast(ToastLevel::Warning, message);
    }

    fn jump_to_mark(&mut self, style: JumpStyle, name: char) -> Result<(), HostError> {
        let mark = self
            .marks
            .iter()
            .find(|m| m.name == name)
            .copied()
            .ok_or(HostError::NoSuchMark(name))?;
        let col = match style {
            JumpStyle::Exact => mark.col,
            JumpStyle::Line => self.buffer.first_non_blank(mark.line),
        };
        self.buffer.move_to(mark.line, col);
        self.scroll_cursor_into_view();
        Ok(())
    }
}
