//! Match highlighting for stash.
//!
//! Pure functions that turn a record's text value plus a set of search
//! terms into a display-ready excerpt: matching lines with a bounded
//! highlight window, optional trailing context lines, and a gutter
//! aligned with the record's displayed identifier. Nothing here touches
//! the terminal; callers supply the marker style.

use regex::Regex;

/// Marker appended/prepended where text was truncated.
pub const ELLIPSIS: &str = "…";

/// Title truncation threshold, in characters.
const TITLE_MAX: usize = 80;

/// Window radius around the first match in a line, in bytes.
const WINDOW_RADIUS: usize = 40;

/// Maximum highlight window span, in bytes.
const WINDOW_SPAN: usize = 80;

/// Open/close marker pair wrapped around every match occurrence.
#[derive(Debug, Clone)]
pub struct HighlightStyle {
    pub open: String,
    pub close: String,
}

impl Default for HighlightStyle {
    /// Bold black on green, the traditional match color.
    fn default() -> Self {
        Self {
            open: "\x1b[1;30;42m".to_string(),
            close: "\x1b[0m".to_string(),
        }
    }
}

impl HighlightStyle {
    /// A marker pair with no terminal escapes, for piped output and tests.
    pub fn plain(open: impl Into<String>, close: impl Into<String>) -> Self {
        Self {
            open: open.into(),
            close: close.into(),
        }
    }
}

/// Options controlling excerpt generation.
#[derive(Debug, Clone, Default)]
pub struct HighlightOptions {
    /// Lines included after a matching line even when they do not match
    pub context_after: usize,
    /// Stop scanning after this many matching lines; None disables the cutoff
    pub max_matches: Option<usize>,
    /// Match marker pair
    pub style: HighlightStyle,
}

/// Derive a record's title from its text value: the text up to the
/// first line break, or, for longer single-line text, the first 80
/// characters plus an ellipsis.
pub fn title(text: &str) -> String {
    let text = text.trim();
    match text.find('\n') {
        Some(i) => text[..i].to_string(),
        None => {
            if text.chars().count() > TITLE_MAX {
                let cut = text
                    .char_indices()
                    .nth(TITLE_MAX)
                    .map(|(i, _)| i)
                    .unwrap_or(text.len());
                format!("{}{}", &text[..cut], ELLIPSIS)
            } else {
                text.to_string()
            }
        }
    }
}

/// Build one case-insensitive alternation over all terms, each matched
/// literally. None when no usable term remains.
fn build_pattern(terms: &[String]) -> Option<Regex> {
    let escaped: Vec<String> = terms
        .iter()
        .filter(|t| !t.is_empty())
        .map(|t| regex::escape(t))
        .collect();
    if escaped.is_empty() {
        return None;
    }
    Regex::new(&format!("(?i)({})", escaped.join("|"))).ok()
}

/// Largest char boundary at or below `index`.
fn floor_char_boundary(s: &str, mut index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    while index > 0 && !s.is_char_boundary(index) {
        index -= 1;
    }
    index
}

/// Highlight a single line, or None when no term occurs in it.
///
/// The output is a window of at most 80 bytes around the first match
/// (40 before its start, 40 after), clipped to the line, snapped to
/// UTF-8 boundaries, with an ellipsis on each truncated side. Every
/// term occurrence inside the window is wrapped in the style markers.
pub fn highlight_line(line: &str, re: &Regex, style: &HighlightStyle) -> Option<String> {
    let first = re.find(line)?.start();

    let mut begin = first.saturating_sub(WINDOW_RADIUS);
    let mut end = first + WINDOW_RADIUS;
    if end > begin + WINDOW_SPAN {
        end = begin + WINDOW_SPAN;
    }
    if end > line.len() {
        end = line.len();
    }
    begin = floor_char_boundary(line, begin);
    end = floor_char_boundary(line, end);

    let prefix = if begin != 0 { ELLIPSIS } else { "" };
    let suffix = if end != line.len() { ELLIPSIS } else { "" };

    let window = &line[begin..end];
    let marked = re.replace_all(window, |caps: &regex::Captures| {
        format!("{}{}{}", style.open, &caps[0], style.close)
    });

    Some(format!("{}{}{}", prefix, marked, suffix))
}

/// Produce the display excerpt for a record's text value.
///
/// With no search terms this is the record's title. With terms, every
/// matching line is highlighted and followed by up to `context_after`
/// trailing lines, each line prefixed with a blank gutter sized to the
/// displayed identifier. The result always ends with a newline.
pub fn matches_excerpt(
    text: &str,
    identifier: &str,
    terms: &[String],
    opts: &HighlightOptions,
) -> String {
    let re = match build_pattern(terms) {
        Some(re) => re,
        None => return format!("{}\n", title(text)),
    };

    let gutter = " ".repeat(identifier.len() + 3);
    let mut included = Vec::new();
    let mut last_matching_line: Option<usize> = None;
    let mut match_counter = 0usize;

    for (line_number, raw) in text.trim().lines().enumerate() {
        let line = raw.trim();
        let covered = last_matching_line
            .is_some_and(|last| line_number <= last + opts.context_after);

        let highlighted = highlight_line(line, &re, &opts.style);
        if highlighted.is_some() {
            last_matching_line = Some(line_number);
            match_counter += 1;
        }

        if highlighted.is_some() || covered {
            let rendered = highlighted.unwrap_or_else(|| line.to_string());
            included.push(format!("{}{}", gutter, rendered));
            if opts.max_matches.is_some_and(|max| match_counter >= max) {
                break;
            }
        }
    }

    included.join("\n") + "\n"
}
