//! Highlight-marker scanning shared by the screen view and the export.
//!
//! The model wraps inserted passages in `<span style="color: blue;">…</span>`.
//! Everything here works on single lines except `to_display_markup`.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::analysis::prompts::{HIGHLIGHT_CLOSE, HIGHLIGHT_OPEN};

/// A marker opening tag through its closing tag, non-greedy.
static HIGHLIGHT_SPAN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<span[^>]*>.*?</span>").expect("valid highlight regex"));

/// Any single marker tag, opening or closing.
static MARKER_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<span[^>]*>|</span>").expect("valid marker tag regex"));

static ANY_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid tag regex"));

/// A slice of one line, still carrying its markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightedSegment<'a> {
    Plain(&'a str),
    Highlighted(&'a str),
}

impl<'a> HighlightedSegment<'a> {
    pub fn raw(&self) -> &'a str {
        match self {
            HighlightedSegment::Plain(s) | HighlightedSegment::Highlighted(s) => *s,
        }
    }

    pub fn is_highlighted(&self) -> bool {
        matches!(self, HighlightedSegment::Highlighted(_))
    }
}

/// Splits a line into alternating plain and highlighted segments.
/// Empty plain gaps between adjacent markers are dropped.
pub fn split_segments(line: &str) -> Vec<HighlightedSegment<'_>> {
    let mut segments = Vec::new();
    let mut cursor = 0;
    for m in HIGHLIGHT_SPAN.find_iter(line) {
        if m.start() > cursor {
            segments.push(HighlightedSegment::Plain(&line[cursor..m.start()]));
        }
        segments.push(HighlightedSegment::Highlighted(m.as_str()));
        cursor = m.end();
    }
    if cursor < line.len() {
        segments.push(HighlightedSegment::Plain(&line[cursor..]));
    }
    segments
}

/// Removes every `<...>` tag, then any stray angle bracket left over.
pub fn strip_markup(text: &str) -> String {
    ANY_TAG
        .replace_all(text, "")
        .chars()
        .filter(|c| *c != '<' && *c != '>')
        .collect()
}

/// Screen view of the integrated lesson.
///
/// Newlines become `<br/>`. Marker tags are emitted in their canonical form;
/// any other angle bracket is escaped, so model output cannot inject markup.
pub fn to_display_markup(content: &str) -> String {
    let mut out = String::with_capacity(content.len() + content.len() / 8);
    let mut cursor = 0;
    for m in MARKER_TAG.find_iter(content) {
        push_escaped(&content[cursor..m.start()], &mut out);
        if m.as_str() == HIGHLIGHT_CLOSE {
            out.push_str(HIGHLIGHT_CLOSE);
        } else {
            out.push_str(HIGHLIGHT_OPEN);
        }
        cursor = m.end();
    }
    push_escaped(&content[cursor..], &mut out);
    out
}

fn push_escaped(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '\n' => out.push_str("<br/>"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MARKED: &str = r#"<span style="color: blue;">"#;

    #[test]
    fn test_split_alternates_plain_and_highlighted() {
        let line = format!("GV chia nhóm. {MARKED}HS dùng Padlet.</span> Kết thúc.");
        let segments = split_segments(&line);
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0], HighlightedSegment::Plain("GV chia nhóm. "));
        assert!(segments[1].is_highlighted());
        assert_eq!(segments[2], HighlightedSegment::Plain(" Kết thúc."));
    }

    #[test]
    fn test_split_is_non_greedy() {
        let line = format!("{MARKED}a</span> và {MARKED}b</span>");
        let highlighted: Vec<_> = split_segments(&line)
            .into_iter()
            .filter(|s| s.is_highlighted())
            .map(|s| strip_markup(s.raw()))
            .collect();
        assert_eq!(highlighted, vec!["a", "b"]);
    }

    #[test]
    fn test_split_plain_line_is_single_segment() {
        assert_eq!(
            split_segments("I. Mục tiêu"),
            vec![HighlightedSegment::Plain("I. Mục tiêu")]
        );
        assert!(split_segments("").is_empty());
    }

    #[test]
    fn test_unclosed_marker_stays_plain() {
        let line = format!("{MARKED}chưa đóng");
        let segments = split_segments(&line);
        assert_eq!(segments.len(), 1);
        assert!(!segments[0].is_highlighted());
        assert_eq!(strip_markup(segments[0].raw()), "chưa đóng");
    }

    #[test]
    fn test_strip_markup_never_leaves_angle_brackets() {
        let inputs = [
            "a < b",
            "x > y",
            "<b>bold</b> <i>it",
            "<<span>>",
            "trailing <",
            "<span style=\"color: blue;\">ok</span>>",
            "><><",
        ];
        for input in inputs {
            let stripped = strip_markup(input);
            assert!(
                !stripped.contains('<') && !stripped.contains('>'),
                "{input:?} -> {stripped:?}"
            );
        }
    }

    #[test]
    fn test_display_well_formed_content_is_verbatim_with_breaks() {
        let content = format!("I. Mục tiêu\n{MARKED}Năng lực số: HS dùng máy tính.</span>\nII. Tiến trình");
        assert_eq!(to_display_markup(&content), content.replace('\n', "<br/>"));
    }

    #[test]
    fn test_display_stripped_text_matches_content() {
        let content = format!("A {MARKED}B</span>\nC & D");
        let shown = to_display_markup(&content);
        let without_tags = shown.replace(MARKED, "").replace("</span>", "");
        assert_eq!(without_tags, "A B<br/>C & D");
    }

    #[test]
    fn test_display_escapes_foreign_markup() {
        let shown = to_display_markup("<script>alert(1)</script>\n<img src=x>");
        assert!(!shown.contains("<script>"));
        assert!(!shown.contains("<img"));
        assert!(shown.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_display_canonicalizes_marker_attributes() {
        let shown = to_display_markup(r#"<span onmouseover="x()">hi</span>"#);
        assert_eq!(shown, format!("{MARKED}hi</span>"));
    }
}
