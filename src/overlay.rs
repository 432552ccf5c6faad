//! Overlay placement and rendering.
//!
//! Geometry is computed by pure functions so it can be unit tested without
//! a terminal; the [`OverlayView`] owns the surface lifecycle and is the
//! only thing that talks to the host about overlays.

use crate::config::{OverlayConfig, Position};
use crate::host::{EditorHost, OverlayId, ScreenPos, ViewportSize};
use crate::marks::{self, MarkRecord};

/// Literal content shown when the buffer has no marks.
pub const NO_MARKS: &str = "no marks";

/// Overlay geometry in screen cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayRect {
    pub col: u16,
    pub row: u16,
    pub width: u16,
    pub height: u16,
}

/// The result of a placement computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub rect: OverlayRect,
    /// True when the cursor could not be resolved and the overlay fell back
    /// to the viewport origin.
    pub degraded: bool,
}

/// Rows the overlay needs for `count` marks.
///
/// Always at least 1 so the "no marks" message has space.
pub fn overlay_height(max_height: u16, count: usize) -> u16 {
    let wanted = u16::try_from(count.max(1)).unwrap_or(u16::MAX);
    wanted.min(max_height)
}

/// Compute where the overlay goes.
///
/// Cursor-anchored placement starts at cursor + offset, then applies a
/// two-pass clamp: past the right edge the overlay flips to the cursor's
/// left, past the bottom it shifts up. The clamp is a heuristic, not an
/// exact non-overlap guarantee; a final bound keeps the rect inside the
/// viewport even in degenerate viewports, where it may overlap the cursor
/// line.
pub fn place(
    config: &OverlayConfig,
    cursor: Option<ScreenPos>,
    viewport: ViewportSize,
    height: u16,
) -> Placement {
    let width = config.width.min(viewport.width);
    let height = height.min(viewport.height);

    if config.position != Position::Cursor {
        return Placement {
            rect: anchored_rect(config.position, viewport, width, height),
            degraded: false,
        };
    }

    let (base, degraded) = match cursor {
        Some(pos) => (pos, false),
        None => (ScreenPos { row: 0, col: 0 }, true),
    };

    let mut col = base.col.saturating_add(config.offset_x);
    let mut row = base.row.saturating_add(config.offset_y);

    if col.saturating_add(width) > viewport.width {
        col = col.saturating_sub(width.saturating_add(config.offset_x.saturating_mul(2)));
    }
    if row.saturating_add(height) > viewport.height {
        row = row.saturating_sub(height.saturating_add(config.offset_y));
    }

    col = col.min(viewport.width.saturating_sub(width));
    row = row.min(viewport.height.saturating_sub(height));

    Placement {
        rect: OverlayRect {
            col,
            row,
            width,
            height,
        },
        degraded,
    }
}

fn anchored_rect(position: Position, viewport: ViewportSize, width: u16, height: u16) -> OverlayRect {
    let right = viewport.width.saturating_sub(width);
    let bottom = viewport.height.saturating_sub(height);
    let (col, row) = match position {
        Position::TopLeft | Position::Cursor => (0, 0),
        Position::TopRight => (right, 0),
        Position::BottomLeft => (0, bottom),
        Position::BottomRight => (right, bottom),
    };
    OverlayRect {
        col,
        row,
        width,
        height,
    }
}

/// Format the overlay's content lines, in collector order.
pub fn render_lines(records: &[MarkRecord]) -> Vec<String> {
    if records.is_empty() {
        return vec![NO_MARKS.to_string()];
    }
    records
        .iter()
        .map(|record| format!("{}: {}", record.name, record.content))
        .collect()
}

/// One overlay surface and the mark snapshot it was rendered from.
///
/// At most one surface is alive per view; `open` force-closes any prior
/// surface, and `close` is safe to call at any time.
pub struct OverlayView {
    id: Option<OverlayId>,
    cache: Vec<MarkRecord>,
}

impl OverlayView {
    pub const fn new() -> Self {
        Self {
            id: None,
            cache: Vec::new(),
        }
    }

    pub const fn is_open(&self) -> bool {
        self.id.is_some()
    }

    /// The mark snapshot taken when the overlay was opened.
    pub fn cache(&self) -> &[MarkRecord] {
        &self.cache
    }

    /// Collect marks, place the overlay, and show it.
    ///
    /// Returns `false` without creating anything when the collector
    /// declines (special buffer) or the host cannot create a surface.
    pub fn open<H: EditorHost + ?Sized>(&mut self, host: &mut H, config: &OverlayConfig) -> bool {
        self.close(host);

        let Some(records) = marks::collect(host) else {
            tracing::debug!("mark overlay not opened: collector declined");
            return false;
        };

        let height = overlay_height(config.max_height, records.len());
        let cursor = if config.position == Position::Cursor {
            host.cursor_screen_pos()
        } else {
            None
        };
        let placement = place(config, cursor, host.viewport(), height);
        if placement.degraded {
            tracing::warn!("cursor off-screen, anchoring mark overlay to viewport origin");
            host.warn("mark overlay: cursor not visible, showing at top-left");
        }

        let id = match host.create_overlay(placement.rect) {
            Ok(id) => id,
            Err(err) => {
                tracing::warn!(%err, "mark overlay surface creation failed");
                host.warn(&format!("mark overlay unavailable: {err}"));
                return false;
            }
        };
        self.id = Some(id);
        self.update(host, records);
        true
    }

    /// Replace the overlay's content and cached snapshot.
    pub fn update<H: EditorHost + ?Sized>(&mut self, host: &mut H, records: Vec<MarkRecord>) {
        let Some(id) = self.id else {
            return;
        };
        host.replace_overlay_lines(id, render_lines(&records));
        self.cache = records;
    }

    /// Destroy the surface and clear the snapshot. No-op when nothing is
    /// open.
    pub fn close<H: EditorHost + ?Sized>(&mut self, host: &mut H) {
        if let Some(id) = self.id.take() {
            host.destroy_overlay(id);
        }
        self.cache.clear();
    }
}

impl Default for OverlayView {
    fn default() -> Self {
        Self::new()
    }
}
