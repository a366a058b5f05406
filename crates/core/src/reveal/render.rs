//! Markdown-lite rendering of a revealed prefix.
//!
//! Recognizes inline code, bold, `[text](url)` links and bare URLs within a
//! line. Matches never nest: when two candidates overlap, the one with the
//! higher precedence (code, bold, link, bare URL) wins and the loser's
//! characters stay plain text. Rendering is pure, so calling it on every
//! tick with a growing prefix is safe.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::theme::Theme;

// An empty pair of backticks reveals as one token but renders as plain text.
static CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`([^`]+)`").expect("valid code regex"));
static BOLD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").expect("valid bold regex"));
static LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\((https?://[^\s)]+)\)").expect("valid link regex"));
static BARE_URL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"https?://[^\s)\]]+").expect("valid url regex"));

/// Sentence punctuation that ends a bare URL rather than belonging to it.
const URL_TRAILERS: &[char] = &['.', ',', ';', ':', '!', '?', '\'', '"'];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Segment {
    Text { text: String },
    Bold { text: String },
    Code { text: String },
    Link { text: String, href: String },
    Url { href: String },
}

impl Segment {
    pub fn text(text: impl Into<String>) -> Self {
        Segment::Text { text: text.into() }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Segment::Bold { text: text.into() }
    }

    pub fn code(text: impl Into<String>) -> Self {
        Segment::Code { text: text.into() }
    }

    /// The characters a reader sees for this segment.
    pub fn visible(&self) -> &str {
        match self {
            Segment::Text { text } | Segment::Bold { text } | Segment::Code { text } | Segment::Link { text, .. } => {
                text
            }
            Segment::Url { href } => href,
        }
    }
}

/// A segment with the colour it should be drawn in, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct Styled {
    #[serde(flatten)]
    pub segment: Segment,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct Line {
    pub segments: Vec<Styled>,
}

/// Split one line into segments, in source order.
pub fn parse_line(line: &str) -> Vec<Segment> {
    let mut taken: Vec<(Range<usize>, Segment)> = Vec::new();

    let mut claim = |range: Range<usize>, segment: Segment| {
        if !taken.iter().any(|(other, _)| range.start < other.end && other.start < range.end) {
            taken.push((range, segment));
        }
    };

    for caps in CODE.captures_iter(line) {
        if let (Some(all), Some(inner)) = (caps.get(0), caps.get(1)) {
            claim(all.range(), Segment::code(inner.as_str()));
        }
    }
    for caps in BOLD.captures_iter(line) {
        if let (Some(all), Some(inner)) = (caps.get(0), caps.get(1)) {
            claim(all.range(), Segment::bold(inner.as_str()));
        }
    }
    for caps in LINK.captures_iter(line) {
        if let (Some(all), Some(text), Some(href)) = (caps.get(0), caps.get(1), caps.get(2)) {
            claim(all.range(), Segment::Link { text: text.as_str().to_string(), href: href.as_str().to_string() });
        }
    }
    for found in BARE_URL.find_iter(line) {
        let href = found.as_str().trim_end_matches(URL_TRAILERS);
        let scheme_len = if href.starts_with("https://") { "https://".len() } else { "http://".len() };
        if href.len() > scheme_len {
            claim(found.start()..found.start() + href.len(), Segment::Url { href: href.to_string() });
        }
    }

    taken.sort_by_key(|(range, _)| range.start);

    let mut segments = Vec::with_capacity(taken.len() * 2 + 1);
    let mut pos = 0;
    for (range, segment) in taken {
        if range.start > pos {
            segments.push(Segment::text(&line[pos..range.start]));
        }
        pos = range.end;
        segments.push(segment);
    }
    if pos < line.len() {
        segments.push(Segment::text(&line[pos..]));
    }

    segments
}

/// Render a revealed prefix line by line, colouring recognized spans with
/// the theme's span colour.
pub fn render(prefix: &str, theme: Theme) -> Vec<Line> {
    let color = theme.span_color();
    prefix
        .split('\n')
        .map(|line| Line {
            segments: parse_line(line.strip_suffix('\r').unwrap_or(line))
                .into_iter()
                .map(|segment| {
                    let color = match segment {
                        Segment::Text { .. } => None,
                        _ => Some(color.to_string()),
                    };
                    Styled { segment, color }
                })
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(text: &str, href: &str) -> Segment {
        Segment::Link { text: text.to_string(), href: href.to_string() }
    }

    fn url(href: &str) -> Segment {
        Segment::Url { href: href.to_string() }
    }

    #[test]
    fn test_empty_code_span_stays_plain() {
        assert_eq!(parse_line("a `` b"), vec![Segment::text("a `` b")]);
    }

    #[test]
    fn test_bold_and_code_in_order() {
        assert_eq!(
            parse_line("I have **3 years** at `AWS`."),
            vec![
                Segment::text("I have "),
                Segment::bold("3 years"),
                Segment::text(" at "),
                Segment::code("AWS"),
                Segment::text("."),
            ]
        );
    }

    #[test]
    fn test_plain_line() {
        assert_eq!(parse_line("just text"), vec![Segment::text("just text")]);
        assert!(parse_line("").is_empty());
    }

    #[test]
    fn test_code_beats_bold() {
        assert_eq!(
            parse_line("**use `x`**"),
            vec![Segment::text("**use "), Segment::code("x"), Segment::text("**")]
        );
        assert_eq!(parse_line("`**not bold**`"), vec![Segment::code("**not bold**")]);
    }

    #[test]
    fn test_links_and_bare_urls() {
        assert_eq!(
            parse_line("See [my site](https://example.com/a) or https://example.org."),
            vec![
                Segment::text("See "),
                link("my site", "https://example.com/a"),
                Segment::text(" or "),
                url("https://example.org"),
                Segment::text("."),
            ]
        );
    }

    #[test]
    fn test_code_beats_urls() {
        assert_eq!(parse_line("`curl https://example.com`"), vec![Segment::code("curl https://example.com")]);
    }

    #[test]
    fn test_unfinished_markup_stays_text() {
        assert_eq!(parse_line("I have **3 ye"), vec![Segment::text("I have **3 ye")]);
        assert_eq!(parse_line("at `AW"), vec![Segment::text("at `AW")]);
        assert_eq!(parse_line("https://"), vec![Segment::text("https://")]);
    }

    #[test]
    fn test_segments_keep_every_visible_char() {
        let line = "a **b** c `d` e https://f.io g";
        let visible: String = parse_line(line).iter().map(Segment::visible).collect();
        assert_eq!(visible, "a b c d e https://f.io g");
    }

    #[test]
    fn test_render_splits_lines_and_colours_spans() {
        let lines = render("**Projects:** YOLOv3\r\nplain", Theme::Emerald);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].segments[0].segment, Segment::bold("Projects:"));
        assert_eq!(lines[0].segments[0].color.as_deref(), Some("#10b981"));
        assert_eq!(lines[0].segments[1].color, None);
        assert_eq!(lines[1].segments, vec![Styled { segment: Segment::text("plain"), color: None }]);
    }

    #[test]
    fn test_render_is_idempotent() {
        let prefix = "Ask me about `Kafka` and **K8s**\nhttps://example.com";
        assert_eq!(render(prefix, Theme::Nebula), render(prefix, Theme::Nebula));
    }

    #[test]
    fn test_theme_only_changes_colour() {
        let prefix = "**a** `b`";
        let vulcan = render(prefix, Theme::Vulcan);
        let midnight = render(prefix, Theme::Midnight);
        let segments = |lines: &[Line]| lines[0].segments.iter().map(|s| s.segment.clone()).collect::<Vec<_>>();
        assert_eq!(segments(&vulcan), segments(&midnight));
        assert_ne!(vulcan, midnight);
    }
}
