//! Editor capability interface.
//!
//! The overlay core never touches buffers, windows, or the terminal
//! directly; everything it needs from the surrounding editor goes through
//! [`EditorHost`]. The pager's [`Model`](crate::app::Model) implements the
//! trait for the real TUI, and [`fixture::FixtureHost`] implements it as a
//! scripted in-memory double for tests.

pub mod fixture;

use thiserror::Error;

use crate::overlay::OverlayRect;
use crate::session::JumpStyle;

/// Opaque handle for a buffer known to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferId(pub u32);

/// What kind of buffer a handle refers to.
///
/// Only `Normal` buffers carry marks the overlay cares about; the session
/// declines to open on anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferKind {
    /// An ordinary editable file buffer.
    Normal,
    /// The built-in help view.
    Help,
    /// A scratch or other special-purpose buffer.
    Scratch,
}

impl BufferKind {
    pub const fn is_normal(self) -> bool {
        matches!(self, Self::Normal)
    }
}

/// A mark entry exactly as the host reports it.
///
/// Loosely shaped on purpose: the name may be any string and the owning
/// buffer may be gone. [`crate::marks::collect`] turns these into
/// strongly-typed [`crate::marks::MarkRecord`]s and rejects malformed
/// entries at that boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMark {
    /// Mark name as reported (expected to be one alphanumeric character).
    pub name: String,
    /// Buffer owning the mark.
    pub buffer: BufferId,
    /// 1-based line number.
    pub line: usize,
    /// 1-based column number.
    pub column: usize,
}

/// A position in screen cells, relative to the viewport origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenPos {
    pub row: u16,
    pub col: u16,
}

/// Viewport dimensions in screen cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportSize {
    pub width: u16,
    pub height: u16,
}

/// Opaque handle for an overlay surface created by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OverlayId(pub u32);

/// Failures the host can report back to the core.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("no mark named '{0}' in the current buffer")]
    NoSuchMark(char),
    #[error("overlay surface could not be created")]
    OverlaySurface,
}

/// Capabilities the overlay core consumes from the surrounding editor.
///
/// Query methods are infallible; the host answers with `Option`/empty
/// values for anything it cannot resolve. Only overlay creation and jump
/// dispatch can fail outright.
pub trait EditorHost {
    /// Handle of the buffer currently shown to the user.
    fn current_buffer(&self) -> BufferId;

    /// Kind of the given buffer.
    fn buffer_kind(&self, buffer: BufferId) -> BufferKind;

    /// Whether the buffer handle still refers to a live buffer.
    fn buffer_valid(&self, buffer: BufferId) -> bool;

    /// User-facing display name of the buffer.
    fn buffer_name(&self, buffer: BufferId) -> String;

    /// Read a single line (1-based) from the buffer, without its newline.
    ///
    /// `None` when the buffer has no content at that position.
    fn line(&self, buffer: BufferId, line: usize) -> Option<String>;

    /// Marks local to the given buffer, in the host's native enumeration
    /// order.
    fn local_marks(&self, buffer: BufferId) -> Vec<RawMark>;

    /// Screen-cell projection of the text cursor.
    ///
    /// `None` when the cursor is scrolled out of view.
    fn cursor_screen_pos(&self) -> Option<ScreenPos>;

    /// Current viewport dimensions.
    fn viewport(&self) -> ViewportSize;

    /// Create an overlay surface at the given geometry.
    fn create_overlay(&mut self, rect: OverlayRect) -> Result<OverlayId, HostError>;

    /// Replace the overlay's content. The surface stays non-modifiable to
    /// the user outside this call.
    fn replace_overlay_lines(&mut self, overlay: OverlayId, lines: Vec<String>);

    /// Destroy an overlay surface. Tolerates stale handles silently.
    fn destroy_overlay(&mut self, overlay: OverlayId);

    /// Surface a non-fatal warning to the user.
    fn warn(&mut self, message: &str);

    /// Move the cursor to the named mark using the prefix's jump semantics.
    fn jump_to_mark(&mut self, style: JumpStyle, name: char) -> Result<(), HostError>;
}
