//! Scripted in-memory host used by unit tests, integration tests, and
//! benches.
//!
//! [`FixtureHost`] answers every capability query from plain data and keeps
//! a ledger of overlay create/destroy calls, warnings, and jump dispatches
//! so tests can assert teardown behavior on every exit path.

use std::collections::HashMap;

use super::{
    BufferId, BufferKind, EditorHost, HostError, OverlayId, RawMark, ScreenPos, ViewportSize,
};
use crate::overlay::OverlayRect;
use crate::session::JumpStyle;

struct FixtureBuffer {
    name: String,
    kind: BufferKind,
    lines: Vec<String>,
}

/// A fully scripted [`EditorHost`].
pub struct FixtureHost {
    buffers: HashMap<BufferId, FixtureBuffer>,
    current: BufferId,
    marks: Vec<RawMark>,
    cursor: Option<ScreenPos>,
    viewport: ViewportSize,
    fail_overlay_create: bool,
    next_overlay: u32,
    open_overlays: Vec<OverlayId>,
    overlay_lines: HashMap<OverlayId, Vec<String>>,
    created: usize,
    destroyed: usize,
    warnings: Vec<String>,
    jumps: Vec<(JumpStyle, char)>,
}

impl FixtureHost {
    /// A host with one normal buffer, no marks, and the cursor at the
    /// top-left of an 80x24 viewport.
    pub fn new() -> Self {
        let mut host = Self {
            buffers: HashMap::new(),
            current: BufferId(1),
            marks: Vec::new(),
            cursor: Some(ScreenPos { row: 0, col: 0 }),
            viewport: ViewportSize {
                width: 80,
                height: 24,
            },
            fail_overlay_create: false,
            next_overlay: 0,
            open_overlays: Vec::new(),
            overlay_lines: HashMap::new(),
            created: 0,
            destroyed: 0,
            warnings: Vec::new(),
            jumps: Vec::new(),
        };
        host.add_buffer(BufferId(1), "main.txt", BufferKind::Normal, &[]);
        host
    }

    pub fn add_buffer(&mut self, id: BufferId, name: &str, kind: BufferKind, lines: &[&str]) {
        self.buffers.insert(
            id,
            FixtureBuffer {
                name: name.to_string(),
                kind,
                lines: lines.iter().map(ToString::to_string).collect(),
            },
        );
    }

    pub fn remove_buffer(&mut self, id: BufferId) {
        self.buffers.remove(&id);
    }

    pub fn set_current(&mut self, id: BufferId) {
        self.current = id;
    }

    pub fn add_mark(&mut self, name: &str, buffer: BufferId, line: usize, column: usize) {
        self.marks.push(RawMark {
            name: name.to_string(),
            buffer,
            line,
            column,
        });
    }

    pub fn clear_marks(&mut self) {
        self.marks.clear();
    }

    pub fn set_cursor(&mut self, cursor: Option<ScreenPos>) {
        self.cursor = cursor;
    }

    pub fn set_viewport(&mut self, width: u16, height: u16) {
        self.viewport = ViewportSize { width, height };
    }

    /// Make the next `create_overlay` calls fail.
    pub fn fail_overlay_create(&mut self) {
        self.fail_overlay_create = true;
    }

    /// Overlays currently alive.
    pub fn open_overlay_count(&self) -> usize {
        self.open_overlays.len()
    }

    /// Total surfaces ever created.
    pub fn created_count(&self) -> usize {
        self.created
    }

    /// Total surfaces ever destroyed.
    pub fn destroyed_count(&self) -> usize {
        self.destroyed
    }

    /// Content last written to the given overlay.
    pub fn lines_for(&self, overlay: OverlayId) -> Option<&[String]> {
        self.overlay_lines.get(&overlay).map(Vec::as_slice)
    }

    /// Content of the single open overlay, if exactly one is open.
    pub fn visible_lines(&self) -> Option<&[String]> {
        match self.open_overlays.as_slice() {
            [only] => self.lines_for(*only),
            _ => None,
        }
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn jumps(&self) -> &[(JumpStyle, char)] {
        &self.jumps
    }
}

impl Default for FixtureHost {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorHost for FixtureHost {
    fn current_buffer(&self) -> BufferId {
        self.current
    }

    fn buffer_kind(&self, buffer: BufferId) -> BufferKind {
        self.buffers
            .get(&buffer)
            .map_or(BufferKind::Scratch, |b| b.kind)
    }

    fn buffer_valid(&self, buffer: BufferId) -> bool {
        self.buffers.contains_key(&buffer)
    }

    fn buffer_name(&self, buffer: BufferId) -> String {
        self.buffers
            .get(&buffer)
            .map(|b| b.name.clone())
            .unwrap_or_default()
    }

    fn line(&self, buffer: BufferId, line: usize) -> Option<String> {
        let buffer = self.buffers.get(&buffer)?;
        buffer.lines.get(line.checked_sub(1)?).cloned()
    }

    fn local_marks(&self, buffer: BufferId) -> Vec<RawMark> {
        // Marks whose owning buffer was removed are still enumerated, with
        // their stale handle intact, so callers can exercise the drop path.
        self.marks
            .iter()
            .filter(|m| m.buffer == buffer || !self.buffer_valid(m.buffer))
            .cloned()
            .collect()
    }

    fn cursor_screen_pos(&self) -> Option<ScreenPos> {
        self.cursor
    }

    fn viewport(&self) -> ViewportSize {
        self.viewport
    }

    fn create_overlay(&mut self, _rect: OverlayRect) -> Result<OverlayId, HostError> {
        if self.fail_overlay_create {
            return Err(HostError::OverlaySurface);
        }
        self.next_overlay += 1;
        let id = OverlayId(self.next_overlay);
        self.open_overlays.push(id);
        self.created += 1;
        Ok(id)
    }

    fn replace_overlay_lines(&mut self, overlay: OverlayId, lines: Vec<String>) {
        if self.open_overlays.contains(&overlay) {
            self.overlay_lines.insert(overlay, lines);
        }
    }

    fn destroy_overlay(&mut self, overlay: OverlayId) {
        // Stale handles are silently tolerated.
        if let Some(idx) = self.open_overlays.iter().position(|id| *id == overlay) {
            self.open_overlays.remove(idx);
            self.destroyed += 1;
        }
    }

    fn warn(&mut self, message: &str) {
        self.warnings.push(message.to_string());
    }

    fn jump_to_mark(&mut self, style: JumpStyle, name: char) -> Result<(), HostError> {
        let needle = name.to_string();
        let owned = self
            .marks
            .iter()
            .any(|m| m.buffer == self.current && m.name == needle);
        if !owned {
            return Err(HostError::NoSuchMark(name));
        }
        self.jumps.push((style, name));
        Ok(())
    }
}
