//! Rope-backed text buffer for the pager.
//!
//! Read-only: the pager never edits text, it only moves a cursor over it.

use ropey::Rope;

/// Cursor position in the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    /// Zero-based line index.
    pub line: usize,
    /// Zero-based column (byte offset within the line).
    pub col: usize,
    /// Remembered column for vertical movement (sticky column).
    col_memory: usize,
}

impl Cursor {
    pub const fn new() -> Self {
        Self {
            line: 0,
            col: 0,
            col_memory: 0,
        }
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::new()
    }
}

/// Direction for cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// A text buffer backed by a rope data structure.
///
/// Provides line-based reads and normal-mode style cursor movement: the
/// cursor always sits on a character of its line (or column 0 of an empty
/// line) and vertical movement remembers the widest column it has seen.
#[derive(Debug, Clone)]
pub struct TextBuffer {
    rope: Rope,
    cursor: Cursor,
}

impl TextBuffer {
    /// Create a new buffer from a string.
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            cursor: Cursor::new(),
        }
    }

    /// Create an empty buffer.
    pub fn empty() -> Self {
        Self::from_text("")
    }

    /// The current cursor position.
    pub const fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Total number of lines in the buffer.
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Get the content of a line (without trailing newline).
    pub fn line_at(&self, line_idx: usize) -> Option<String> {
        if line_idx >= self.rope.len_lines() {
            return None;
        }
        let line = self.rope.line(line_idx);
        let s = line.to_string();
        Some(s.trim_end_matches('\n').trim_end_matches('\r').to_string())
    }

    /// Length of a line in bytes (without trailing newline).
    pub fn line_len(&self, line_idx: usize) -> usize {
        self.line_at(line_idx).map_or(0, |s| s.len())
    }

    /// Byte column of the first non-whitespace character on a line.
    ///
    /// 0 for empty or all-whitespace lines.
    pub fn first_non_blank(&self, line_idx: usize) -> usize {
        self.line_at(line_idx).map_or(0, |s| {
            s.find(|c: char| !c.is_whitespace()).unwrap_or(0)
        })
    }

    /// Snap a column to the start of the character containing it, clamped
    /// to the line. Keeps the cursor on a character boundary no matter
    /// where the sticky column lands.
    fn snap_col(&self, line_idx: usize, col: usize) -> usize {
        self.line_at(line_idx).map_or(0, |line| {
            let target = col.min(line.char_indices().next_back().map_or(0, |(i, _)| i));
            line.char_indices()
                .map(|(i, _)| i)
                .take_while(|i| *i <= target)
                .last()
                .unwrap_or(0)
        })
    }

    /// Move the cursor one step, clamped to the buffer.
    pub fn move_cursor(&mut self, direction: Direction) {
        match direction {
            Direction::Up => {
                self.cursor.line = self.cursor.line.saturating_sub(1);
                self.cursor.col = self.snap_col(self.cursor.line, self.cursor.col_memory);
            }
            Direction::Down => {
                let last = self.line_count().saturating_sub(1);
                self.cursor.line = (self.cursor.line + 1).min(last);
                self.cursor.col = self.snap_col(self.cursor.line, self.cursor.col_memory);
            }
            Direction::Left => {
                let line = self.line_at(self.cursor.line).unwrap_or_default();
                self.cursor.col = line
                    .char_indices()
                    .map(|(i, _)| i)
                    .take_while(|i| *i < self.cursor.col)
                    .last()
                    .unwrap_or(0);
                self.cursor.col_memory = self.cursor.col;
            }
            Direction::Right => {
                let line = self.line_at(self.cursor.line).unwrap_or_default();
                if let Some(next) = line
                    .char_indices()
                    .map(|(i, _)| i)
                    .find(|i| *i > self.cursor.col)
                {
                    self.cursor.col = next;
                }
                self.cursor.col_memory = self.cursor.col;
            }
        }
    }

    /// Move the cursor by whole lines (paging), keeping the sticky column.
    pub fn move_cursor_lines(&mut self, delta: isize) {
        let last = self.line_count().saturating_sub(1);
        let line = if delta < 0 {
            self.cursor.line.saturating_sub(delta.unsigned_abs())
        } else {
            self.cursor
                .line
                .saturating_add(delta.unsigned_abs())
                .min(last)
        };
        self.cursor.line = line;
        self.cursor.col = self.snap_col(line, self.cursor.col_memory);
    }

    /// Place the cursor at an absolute position, clamped to the buffer.
    pub fn move_to(&mut self, line: usize, col: usize) {
        let last = self.line_count().saturating_sub(1);
        self.cursor.line = line.min(last);
        self.cursor.col = self.snap_col(self.cursor.line, col);
        self.cursor.col_memory = self.cursor.col;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer() -> TextBuffer {
        TextBuffer::from_text("alpha\n  beta line\nx\n\nlast")
    }

    #[test]
    fn test_line_at_strips_newline() {
        let buf = buffer();
        assert_eq!(buf.line_at(0).unwrap(), "alpha");
        assert_eq!(buf.line_at(1).unwrap(), "  beta line");
        assert_eq!(buf.line_at(3).unwrap(), "");
        assert_eq!(buf.line_at(99), None);
    }

    #[test]
    fn test_first_non_blank() {
        let buf = buffer();
        assert_eq!(buf.first_non_blank(0), 0);
        assert_eq!(buf.first_non_blank(1), 2);
        assert_eq!(buf.first_non_blank(3), 0);
    }

    #[test]
    fn test_move_right_clamps_to_last_character() {
        let mut buf = TextBuffer::from_text("ab");
        buf.move_cursor(Direction::Right);
        buf.move_cursor(Direction::Right);
        buf.move_cursor(Direction::Right);
        assert_eq!(buf.cursor().col, 1);
    }

    #[test]
    fn test_vertical_movement_remembers_column() {
        let mut buf = TextBuffer::from_text("long line here\nx\nanother long line");
        buf.move_to(0, 8);
        buf.move_cursor(Direction::Down);
        assert_eq!(buf.cursor().col, 0);
        buf.move_cursor(Direction::Down);
        assert_eq!(buf.cursor().col, 8);
    }

    #[test]
    fn test_move_down_clamps_to_last_line() {
        let mut buf = TextBuffer::from_text("one\ntwo");
        buf.move_cursor_lines(50);
        assert_eq!(buf.cursor().line, buf.line_count() - 1);
        buf.move_cursor(Direction::Down);
        assert_eq!(buf.cursor().line, buf.line_count() - 1);
    }

    #[test]
    fn test_move_to_clamps_both_axes() {
        let mut buf = buffer();
        buf.move_to(100, 100);
        assert_eq!(buf.cursor().line, buf.line_count() - 1);
        assert_eq!(buf.cursor().col, "last".len() - 1);
    }

    #[test]
    fn test_movement_stays_on_character_boundaries() {
        let mut buf = TextBuffer::from_text("aéb\nxy");
        buf.move_cursor(Direction::Right);
        assert_eq!(buf.cursor().col, 1);
        buf.move_cursor(Direction::Right);
        // 'é' is two bytes; the cursor lands on 'b', not mid-character.
        assert_eq!(buf.cursor().col, 3);
        buf.move_cursor(Direction::Down);
        assert_eq!(buf.cursor().col, 1);
        buf.move_cursor(Direction::Left);
        assert_eq!(buf.cursor().col, 0);
    }

    #[test]
    fn test_empty_buffer_stays_at_origin() {
        let mut buf = TextBuffer::empty();
        buf.move_cursor(Direction::Down);
        buf.move_cursor(Direction::Right);
        assert_eq!(buf.cursor(), Cursor::new());
    }
}
