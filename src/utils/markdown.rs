use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};
use regex::Regex;

lazy_static::lazy_static! {
    static ref NUMBERED: Regex = Regex::new(r"^(\d+)[.)]\s+(.*)$").expect("valid regex");
    static ref INLINE: Regex =
        Regex::new(r"\*\*(?P<bold>.+?)\*\*|\*(?P<italic>[^*]+?)\*|`(?P<code>[^`]+)`").expect("valid regex");
}

enum Block<'a> {
    Blank,
    Heading(&'a str),
    Bullet(&'a str),
    Numbered(&'a str, &'a str),
    Quote(&'a str),
    Paragraph(&'a str),
}

fn classify(line: &str) -> Block<'_> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Block::Blank;
    }
    if trimmed.starts_with('#') {
        let heading = trimmed.trim_start_matches('#');
        if heading.starts_with(' ') {
            return Block::Heading(heading.trim());
        }
    }
    if let Some(item) = trimmed
        .strip_prefix("- ")
        .or_else(|| trimmed.strip_prefix("* "))
        .or_else(|| trimmed.strip_prefix("• "))
    {
        return Block::Bullet(item);
    }
    if let Some(quote) = trimmed.strip_prefix("> ") {
        return Block::Quote(quote);
    }
    if let Some(caps) = NUMBERED.captures(trimmed)
        && let (Some(num), Some(item)) = (caps.get(1), caps.get(2))
    {
        return Block::Numbered(num.as_str(), item.as_str());
    }
    Block::Paragraph(trimmed)
}

/// Render the small markdown subset models use in explanations:
/// headings, bullet and numbered lists, quotes, **bold**, *italic*, `code`.
pub fn render_markdown(content: &str) -> Vec<Line<'static>> {
    content
        .lines()
        .map(|line| match classify(line) {
            Block::Blank => Line::from(""),
            Block::Heading(text) => Line::from(Span::styled(
                text.to_string(),
                Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            )),
            Block::Bullet(item) => prefixed("  • ".to_string(), item),
            Block::Numbered(num, item) => prefixed(format!("  {}. ", num), item),
            Block::Quote(text) => {
                let mut spans = vec![Span::from("  │ ")];
                spans.extend(
                    inline_spans(text)
                        .into_iter()
                        .map(|s| s.patch_style(Style::default().add_modifier(Modifier::ITALIC))),
                );
                Line::from(spans)
            }
            Block::Paragraph(text) => Line::from(inline_spans(text)),
        })
        .collect()
}

fn prefixed(prefix: String, item: &str) -> Line<'static> {
    let mut spans = vec![Span::from(prefix)];
    spans.extend(inline_spans(item));
    Line::from(spans)
}

fn inline_spans(text: &str) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    let mut last = 0;

    for caps in INLINE.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        if whole.start() > last {
            spans.push(Span::from(text[last..whole.start()].to_string()));
        }
        let (content, modifier) = if let Some(m) = caps.name("bold") {
            (m.as_str(), Modifier::BOLD)
        } else if let Some(m) = caps.name("italic") {
            (m.as_str(), Modifier::ITALIC)
        } else if let Some(m) = caps.name("code") {
            (m.as_str(), Modifier::DIM)
        } else {
            (whole.as_str(), Modifier::empty())
        };
        spans.push(Span::styled(
            content.to_string(),
            Style::default().add_modifier(modifier),
        ));
        last = whole.end();
    }

    if last < text.len() || spans.is_empty() {
        spans.push(Span::from(text[last..].to_string()));
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_plain_text() {
        let result = render_markdown("The answer is (B).");
        assert_eq!(result.len(), 1);
        assert_eq!(plain(&result[0]), "The answer is (B).");
    }

    #[test]
    fn test_blank_lines_preserved() {
        let result = render_markdown("Line 1\n\nLine 2");
        assert_eq!(result.len(), 3);
        assert_eq!(plain(&result[1]), "");
    }

    #[test]
    fn test_bold_and_italic() {
        let result = render_markdown("Option **B** is *subjunctive* here");
        let line = &result[0];
        assert_eq!(line.spans[0].content, "Option ");
        assert_eq!(line.spans[1].content, "B");
        assert!(line.spans[1].style.add_modifier.contains(Modifier::BOLD));
        assert_eq!(line.spans[3].content, "subjunctive");
        assert!(line.spans[3].style.add_modifier.contains(Modifier::ITALIC));
        assert_eq!(line.spans[4].content, " here");
    }

    #[test]
    fn test_code_span() {
        let result = render_markdown("`insist that S + V`");
        assert_eq!(result[0].spans.len(), 1);
        assert_eq!(result[0].spans[0].content, "insist that S + V");
    }

    #[test]
    fn test_lists() {
        let result = render_markdown("- (A) wrong tense\n* (B) correct\n1. First\n2) Second");
        assert_eq!(result.len(), 4);
        assert!(plain(&result[0]).starts_with("  • "));
        assert!(plain(&result[1]).contains("(B) correct"));
        assert_eq!(plain(&result[2]), "  1. First");
        assert_eq!(plain(&result[3]), "  2. Second");
    }

    #[test]
    fn test_heading() {
        let result = render_markdown("### Why (C) is correct");
        assert_eq!(result[0].spans[0].content, "Why (C) is correct");
        assert!(result[0].spans[0].style.add_modifier.contains(Modifier::BOLD));

        let not_heading = render_markdown("#hashtag");
        assert_eq!(plain(&not_heading[0]), "#hashtag");
    }

    #[test]
    fn test_quote() {
        let result = render_markdown("> the author argues");
        assert!(plain(&result[0]).contains("the author argues"));
        assert!(result[0].spans[1].style.add_modifier.contains(Modifier::ITALIC));
    }
}
