//! Query-term highlighting as ratatui spans.

use ratatui::style::{Color, Style};
use ratatui::text::Span;

use crate::core::search::{self, HighlightColor, Palette};

/// Background for a highlight color (Tailwind 300 tints).
pub(crate) fn highlight_bg(c: HighlightColor) -> Color {
    match c {
        HighlightColor::Yellow => Color::Rgb(253, 224, 71),
        HighlightColor::Green => Color::Rgb(134, 239, 172),
        HighlightColor::Blue => Color::Rgb(147, 197, 253),
        HighlightColor::Pink => Color::Rgb(249, 168, 212),
    }
}

/// Spans for `text` with query terms on a colored background; the rest uses `base`.
pub(crate) fn highlighted_spans(
    text: &str,
    query: &str,
    palette: &Palette,
    base: Style,
) -> Vec<Span<'static>> {
    search::highlight(Some(text), query, palette)
        .into_iter()
        .map(|span| match span.color {
            Some(c) => Span::styled(
                span.text.to_string(),
                base.fg(Color::Black).bg(highlight_bg(c)),
            ),
            None => Span::styled(span.text.to_string(), base),
        })
        .collect()
}
