//! Mark collection.
//!
//! Turns the host's loosely-shaped mark list into display-ready
//! [`MarkRecord`]s, rejecting malformed entries at this boundary so nothing
//! downstream has to re-validate.

use crate::host::{BufferId, EditorHost, RawMark};

/// One user-visible bookmark, ready for rendering.
///
/// Immutable once constructed. Invalid marks are never represented; they
/// are dropped during collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkRecord {
    /// Single-character name, always in `[a-zA-Z0-9]`.
    pub name: char,
    /// Display name of the owning buffer.
    pub file: String,
    /// 1-based line number.
    pub line: usize,
    /// 1-based column number.
    pub column: usize,
    /// The owning line's text with leading whitespace stripped.
    pub content: String,
}

/// Collect the current buffer's marks.
///
/// Returns `None` when the current buffer is not an ordinary editable
/// buffer: the caller must abort the session entirely rather than show an
/// empty overlay. Otherwise returns the normalized records in the host's
/// native enumeration order.
///
/// Pure query: no host state is modified.
pub fn collect<H: EditorHost + ?Sized>(host: &H) -> Option<Vec<MarkRecord>> {
    let current = host.current_buffer();
    let kind = host.buffer_kind(current);
    if !kind.is_normal() {
        tracing::debug!(?kind, "declining mark collection in special buffer");
        return None;
    }

    let records = host
        .local_marks(current)
        .into_iter()
        .filter_map(|raw| normalize(host, raw))
        .collect();
    Some(records)
}

/// Convert one raw mark, or drop it.
///
/// Dropped when the name is not exactly one ASCII alphanumeric character
/// (which excludes global and special marks by construction) or when the
/// owning buffer is gone.
fn normalize<H: EditorHost + ?Sized>(host: &H, raw: RawMark) -> Option<MarkRecord> {
    let name = single_alphanumeric(&raw.name)?;
    if !host.buffer_valid(raw.buffer) {
        return None;
    }
    let content = line_content(host, raw.buffer, raw.line);
    Some(MarkRecord {
        name,
        file: host.buffer_name(raw.buffer),
        line: raw.line,
        column: raw.column,
        content,
    })
}

fn single_alphanumeric(name: &str) -> Option<char> {
    let mut chars = name.chars();
    let first = chars.next()?;
    if chars.next().is_some() || !first.is_ascii_alphanumeric() {
        return None;
    }
    Some(first)
}

/// Line text with leading whitespace stripped; "" when the buffer has no
/// content at that position.
fn line_content<H: EditorHost + ?Sized>(host: &H, buffer: BufferId, line: usize) -> String {
    host.line(buffer, line)
        .map(|text| text.trim_start().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::fixture::FixtureHost;
    use crate::host::BufferKind;

    const MAIN: BufferId = BufferId(1);

    fn host_with_lines(lines: &[&str]) -> FixtureHost {
        let mut host = FixtureHost::new();
        host.add_buffer(MAIN, "main.txt", BufferKind::Normal, lines);
        host
    }

    #[test]
    fn test_collect_normalizes_marks_in_host_order() {
        let mut host = host_with_lines(&["one", "  two", "three"]);
        host.add_mark("b", MAIN, 2, 3);
        host.add_mark("a", MAIN, 1, 1);

        let records = collect(&host).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, 'b');
        assert_eq!(records[0].file, "main.txt");
        assert_eq!(records[0].line, 2);
        assert_eq!(records[0].column, 3);
        assert_eq!(records[0].content, "two");
        assert_eq!(records[1].name, 'a');
    }

    #[test]
    fn test_collect_strips_leading_whitespace_only() {
        let mut host = host_with_lines(&["\t  indented text  "]);
        host.add_mark("x", MAIN, 1, 1);

        let records = collect(&host).unwrap();
        assert_eq!(records[0].content, "indented text  ");
    }

    #[test]
    fn test_collect_drops_non_alphanumeric_names() {
        let mut host = host_with_lines(&["line"]);
        host.add_mark("<", MAIN, 1, 1);
        host.add_mark("'", MAIN, 1, 1);
        host.add_mark("ab", MAIN, 1, 1);
        host.add_mark("", MAIN, 1, 1);
        host.add_mark("A", MAIN, 1, 1);
        host.add_mark("7", MAIN, 1, 1);

        let names: Vec<char> = collect(&host).unwrap().iter().map(|m| m.name).collect();
        assert_eq!(names, vec!['A', '7']);
    }

    #[test]
    fn test_collect_drops_marks_with_dead_buffers() {
        let gone = BufferId(9);
        let mut host = host_with_lines(&["line"]);
        host.add_buffer(gone, "old.txt", BufferKind::Normal, &["stale"]);
        host.add_mark("a", MAIN, 1, 1);
        host.add_mark("z", gone, 1, 1);
        host.remove_buffer(gone);

        let names: Vec<char> = collect(&host).unwrap().iter().map(|m| m.name).collect();
        assert_eq!(names, vec!['a']);
    }

    #[test]
    fn test_collect_defaults_content_past_end_of_buffer() {
        let mut host = host_with_lines(&["only line"]);
        host.add_mark("q", MAIN, 40, 1);

        let records = collect(&host).unwrap();
        assert_eq!(records[0].content, "");
    }

    #[test]
    fn test_collect_declines_special_buffers() {
        let help = BufferId(2);
        let mut host = host_with_lines(&["line"]);
        host.add_buffer(help, "[help]", BufferKind::Help, &["help text"]);
        host.set_current(help);
        host.add_mark("a", MAIN, 1, 1);

        assert!(collect(&host).is_none());
    }

    #[test]
    fn test_collect_with_no_marks_is_empty_not_none() {
        let host = host_with_lines(&["line"]);
        assert_eq!(collect(&host).unwrap(), Vec::new());
    }
}
