//! Fixed-width text table for terminal output.

use crate::export::{ExportResult, column_headers, row_cells};
use crate::profile::Report;

/// Default maximum column width before cells wrap
pub const DEFAULT_MAX_WIDTH: usize = 60;

/// Exporter for bordered, left-aligned text tables.
#[derive(Debug, Clone)]
pub struct TableExporter {
    max_width: usize,
}

impl Default for TableExporter {
    fn default() -> Self {
        Self {
            max_width: DEFAULT_MAX_WIDTH,
        }
    }
}

impl TableExporter {
    /// Create an exporter wrapping cells wider than `max_width` characters
    pub fn new(max_width: usize) -> Self {
        Self {
            max_width: max_width.max(1),
        }
    }

    /// Export a report as a text table
    pub fn export(&self, report: &Report) -> ExportResult {
        ExportResult {
            content: self.render(report),
            format: "table".to_string(),
        }
    }

    /// Render the table
    pub fn render(&self, report: &Report) -> String {
        let header: Vec<Vec<String>> = column_headers(report)
            .iter()
            .map(|cell| wrap(cell, self.max_width))
            .collect();
        let rows: Vec<Vec<Vec<String>>> = report
            .rows
            .iter()
            .map(|row| {
                row_cells(row)
                    .iter()
                    .map(|cell| wrap(cell, self.max_width))
                    .collect()
            })
            .collect();

        let mut widths = vec![1usize; header.len()];
        for cells in std::iter::once(&header).chain(rows.iter()) {
            for (idx, lines) in cells.iter().enumerate() {
                for line in lines {
                    widths[idx] = widths[idx].max(line.chars().count());
                }
            }
        }

        let mut output = String::new();
        output.push_str(&border(&widths, '-'));
        push_row(&mut output, &header, &widths);
        output.push_str(&border(&widths, '='));
        for cells in &rows {
            push_row(&mut output, cells, &widths);
            output.push_str(&border(&widths, '-'));
        }
        output
    }
}

fn border(widths: &[usize], fill: char) -> String {
    let mut line = String::from("+");
    for width in widths {
        line.extend(std::iter::repeat_n(fill, width + 2));
        line.push('+');
    }
    line.push('\n');
    line
}

fn push_row(output: &mut String, cells: &[Vec<String>], widths: &[usize]) {
    let height = cells.iter().map(Vec::len).max().unwrap_or(1);
    for line_idx in 0..height {
        output.push('|');
        for (cell, width) in cells.iter().zip(widths) {
            let text = cell.get(line_idx).map(String::as_str).unwrap_or("");
            let pad = width - text.chars().count();
            output.push(' ');
            output.push_str(text);
            output.extend(std::iter::repeat_n(' ', pad + 1));
            output.push('|');
        }
        output.push('\n');
    }
}

/// Wrap a cell: embedded line breaks start new lines, then each line is
/// word-wrapped
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines: Vec<String> = text
        .lines()
        .flat_map(|line| wrap_line(line, width))
        .collect();
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Greedy word wrap; words longer than `width` are split
fn wrap_line(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split(' ') {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > width {
            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let rest = word.split_off(width);
            lines.push(word.into_iter().collect());
            word = rest;
        }

        let needed = if current_len == 0 {
            word.len()
        } else {
            current_len + 1 + word.len()
        };
        if needed > width && current_len > 0 {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current.extend(word.iter());
        current_len += word.len();
    }

    if current_len > 0 || lines.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::SchemaProfiler;
    use bson::doc;

    #[test]
    fn test_wrap() {
        assert_eq!(wrap("short", 10), vec!["short"]);
        assert_eq!(wrap("a(1), b(2), c(3)", 10), vec!["a(1),", "b(2), c(3)"]);
        assert_eq!(wrap("abcdefgh", 3), vec!["abc", "def", "gh"]);
        assert_eq!(wrap("", 5), vec![""]);
    }

    #[test]
    fn test_wrap_splits_line_breaks() {
        assert_eq!(wrap("first\nsecond", 20), vec!["first", "second"]);
        assert_eq!(wrap("a\r\nb c", 3), vec!["a", "b c"]);
        assert_eq!(wrap("line one\nx", 4), vec!["line", "one", "x"]);
    }

    #[test]
    fn test_multiline_values_keep_borders() {
        let mut profiler = SchemaProfiler::new();
        profiler
            .add_document(&doc! { "note": "first line\nsecond line" })
            .unwrap();
        let report = profiler.finalize().unwrap();

        let table = TableExporter::default().render(&report);
        let width = table.lines().next().unwrap().chars().count();
        for line in table.lines() {
            assert_eq!(line.chars().count(), width);
            assert!(line.starts_with('|') || line.starts_with('+'));
        }
        assert!(table.contains("| first line"));
        assert!(table.contains("| second line(1)"));
    }

    #[test]
    fn test_render_table() {
        let mut profiler = SchemaProfiler::new();
        profiler
            .add_documents(&[doc! { "a": 1 }, doc! { "a": 2 }, doc! { "a": 1 }])
            .unwrap();
        let report = profiler.finalize().unwrap();

        let table = TableExporter::default().render(&report);
        let lines: Vec<_> = table.lines().collect();
        assert_eq!(
            lines[1],
            "| Field | Data Type | Occurrence | Top 10 Values | Field Count |"
        );
        assert!(lines[2].starts_with("+====="));
        assert_eq!(
            lines[3],
            "| a     | int32     | 100.0 %    | 1(2), 2(1)    | 3           |"
        );
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn test_long_cells_wrap() {
        let mut profiler = SchemaProfiler::new();
        let long = "x".repeat(25);
        profiler.add_document(&doc! { "s": long }).unwrap();
        let report = profiler.finalize().unwrap();

        let table = TableExporter::new(10).render(&report);
        for line in table.lines() {
            assert_eq!(line.chars().count(), table.lines().next().unwrap().chars().count());
        }
        assert!(table.lines().count() > 5);
    }
}
