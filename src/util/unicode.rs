use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Cells a tab occupies
const TAB_WIDTH: usize = 4;

/// Display width in terminal cells
pub fn display_width(s: &str) -> usize {
    s.graphemes(true).map(grapheme_width).sum()
}

/// Cut `s` to at most `max_cells` cells, ending in `…` when anything was dropped.
/// Never splits a grapheme cluster.
pub fn truncate_to_width(s: &str, max_cells: usize) -> String {
    if display_width(s) <= max_cells {
        return s.to_string();
    }
    let Some(budget) = max_cells.checked_sub(1) else {
        return String::new();
    };

    let mut width = 0;
    let mut out = String::new();
    for g in s.graphemes(true) {
        let w = grapheme_width(g);
        if width + w > budget {
            break;
        }
        width += w;
        out.push_str(g);
    }
    out.push('\u{2026}');
    out
}

/// Byte offset of the grapheme after the one at `byte_offset`; None at the end
pub fn next_grapheme_boundary(s: &str, byte_offset: usize) -> Option<usize> {
    if byte_offset >= s.len() {
        return None;
    }
    let next = s[byte_offset..]
        .grapheme_indices(true)
        .nth(1)
        .map_or(s.len(), |(i, _)| byte_offset + i);
    Some(next)
}

/// Byte offset of the grapheme before `byte_offset`; None at the start
pub fn prev_grapheme_boundary(s: &str, byte_offset: usize) -> Option<usize> {
    if byte_offset == 0 {
        return None;
    }
    s[..byte_offset]
        .grapheme_indices(true)
        .next_back()
        .map(|(i, _)| i)
}

/// Start of the word left of `byte_offset`, skipping whitespace first
pub fn word_boundary_left(s: &str, byte_offset: usize) -> usize {
    let graphemes: Vec<(usize, &str)> = s[..byte_offset].grapheme_indices(true).collect();
    let mut idx = graphemes.len();
    while idx > 0 && is_space(graphemes[idx - 1].1) {
        idx -= 1;
    }
    while idx > 0 && !is_space(graphemes[idx - 1].1) {
        idx -= 1;
    }
    graphemes.get(idx).map_or(0, |(i, _)| *i)
}

/// Start of the next word right of `byte_offset`, or the end of `s`
pub fn word_boundary_right(s: &str, byte_offset: usize) -> usize {
    if byte_offset >= s.len() {
        return s.len();
    }
    let mut graphemes = s[byte_offset..].grapheme_indices(true).peekable();
    while graphemes.next_if(|(_, g)| !is_space(g)).is_some() {}
    while graphemes.next_if(|(_, g)| is_space(g)).is_some() {}
    graphemes.peek().map_or(s.len(), |(i, _)| byte_offset + i)
}

fn is_space(g: &str) -> bool {
    g.chars().all(char::is_whitespace)
}

fn grapheme_width(g: &str) -> usize {
    if g == "\t" {
        TAB_WIDTH
    } else {
        UnicodeWidthStr::width(g)
    }
}
