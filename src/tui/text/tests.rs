//! Tests for text wrapping and highlight rendering.

use ratatui::style::{Color, Style};

use crate::core::search::{HighlightColor, Palette};

use super::{highlight_bg, highlighted_spans, truncate_with_ellipsis, wrap_message};

#[test]
fn wrap_message_keeps_blank_lines() {
    assert_eq!(wrap_message("a\n\nb", 10), vec!["a", "", "b"]);
}

#[test]
fn wrap_message_wraps_long_lines() {
    let lines = wrap_message("one two three four", 9);
    assert_eq!(lines, vec!["one two", "three", "four"]);
}

#[test]
fn wrap_message_zero_width_passthrough() {
    assert_eq!(wrap_message("hello world", 0), vec!["hello world"]);
}

#[test]
fn truncate_adds_ellipsis() {
    assert_eq!(truncate_with_ellipsis("short", 10), "short");
    assert_eq!(truncate_with_ellipsis("abcdefghij", 5), "abcd…");
}

#[test]
fn highlighted_spans_color_terms() {
    let spans = highlighted_spans("GPT-4o Mini", "mini", &Palette::default(), Style::default());
    let text: String = spans.iter().map(|s| s.content.as_ref()).collect();
    assert_eq!(text, "GPT-4o Mini");
    let last = spans.last().unwrap();
    assert_eq!(last.content, "Mini");
    assert_eq!(last.style.bg, Some(highlight_bg(HighlightColor::Yellow)));
    assert_eq!(last.style.fg, Some(Color::Black));
    assert_eq!(spans[0].style.bg, None);
}

#[test]
fn highlighted_spans_without_query_use_base_style() {
    let base = Style::default().fg(Color::DarkGray);
    let spans = highlighted_spans("gpt-4o", "", &Palette::default(), base);
    assert_eq!(spans.len(), 1);
    assert_eq!(spans[0].style, base);
}
