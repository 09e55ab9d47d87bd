//! Column width computation for the plain-text renderer.

use unicode_width::UnicodeWidthStr;

/// Display width of `text` in terminal columns.
pub fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

/// Replace control characters so a cell stays on one line.
pub fn sanitize(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}

/// Pad `text` with spaces up to `width` display columns.
pub fn pad(text: &str, width: usize) -> String {
    let used = display_width(text);
    let mut out = String::with_capacity(text.len() + width.saturating_sub(used));
    out.push_str(text);
    out.extend(std::iter::repeat(' ').take(width.saturating_sub(used)));
    out
}

/// Widest cell per column across all lines.
///
/// Lines shorter than the header contribute nothing to the missing columns.
pub fn column_widths(lines: &[Vec<String>]) -> Vec<usize> {
    let columns = lines.iter().map(Vec::len).max().unwrap_or(0);
    let mut widths = vec![0; columns];
    for line in lines {
        for (width, cell) in widths.iter_mut().zip(line) {
            *width = (*width).max(display_width(cell));
        }
    }
    widths
}

/// Join cells with `" | "`, padding each to its column width.
///
/// Trailing whitespace is trimmed.
pub fn format_line(cells: &[String], widths: &[usize]) -> String {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| pad(cell, width))
        .collect::<Vec<_>>()
        .join(" | ");
    line.trim_end().to_string()
}

/// Horizontal rule matching [`format_line`] output.
pub fn rule(widths: &[usize]) -> String {
    widths
        .iter()
        .map(|&w| "-".repeat(w))
        .collect::<Vec<_>>()
        .join("-+-")
}
