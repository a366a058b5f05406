//! ANSI styling for rendered lines.

use folio_core::reveal::{Line, Segment, Styled};

const RESET: &str = "\x1b[0m";

/// Truecolor foreground escape for a `#rrggbb` colour.
fn fg(hex: &str) -> Option<String> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    Some(format!("\x1b[38;2;{};{};{}m", channel(0)?, channel(2)?, channel(4)?))
}

fn styled(styled: &Styled) -> String {
    let color = styled.color.as_deref().and_then(fg).unwrap_or_default();
    match &styled.segment {
        Segment::Text { text } => text.clone(),
        Segment::Bold { text } => format!("\x1b[1m{color}{text}{RESET}"),
        Segment::Code { text } => format!("{color}{text}{RESET}"),
        Segment::Link { text, href } => format!("\x1b[4m{color}{text}{RESET} ({href})"),
        Segment::Url { href } => format!("\x1b[4m{color}{href}{RESET}"),
    }
}

pub fn paint(lines: &[Line]) -> String {
    lines
        .iter()
        .map(|line| line.segments.iter().map(styled).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::Theme;
    use folio_core::reveal::render;

    #[test]
    fn test_fg_parses_hex() {
        assert_eq!(fg("#f43f5e").as_deref(), Some("\x1b[38;2;244;63;94m"));
        assert_eq!(fg("f43f5e"), None);
        assert_eq!(fg("#fff"), None);
    }

    #[test]
    fn test_plain_text_is_unstyled() {
        assert_eq!(paint(&render("just words\nsecond", Theme::Vulcan)), "just words\nsecond");
    }

    #[test]
    fn test_greeting_paints_as_plain_text() {
        let greeting = folio_client::assistant::GREETING;
        assert_eq!(paint(&render(greeting, Theme::Emerald)), greeting);
    }

    #[test]
    fn test_spans_are_coloured() {
        let painted = paint(&render("I know **Rust** and `tokio`", Theme::Vulcan));
        assert_eq!(
            painted,
            "I know \x1b[1m\x1b[38;2;244;63;94mRust\x1b[0m and \x1b[38;2;244;63;94mtokio\x1b[0m"
        );
    }

    #[test]
    fn test_link_keeps_href() {
        let painted = paint(&render("[site](https://folio.dev)", Theme::Midnight));
        assert!(painted.ends_with("site\x1b[0m (https://folio.dev)"));
        assert!(painted.starts_with("\x1b[4m\x1b[38;2;59;130;246m"));
    }
}
