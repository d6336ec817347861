//! Text utilities: line wrapping and highlighted spans for the chat display.

mod highlight;
mod wrap;

pub(crate) use highlight::{highlight_bg, highlighted_spans};
pub(crate) use wrap::wrap_message;

/// Truncate to `max_width` characters, ending with "…" when cut.
pub(crate) fn truncate_with_ellipsis(s: &str, max_width: usize) -> String {
    if s.chars().count() <= max_width {
        s.to_string()
    } else {
        format!(
            "{}…",
            s.chars()
                .take(max_width.saturating_sub(1))
                .collect::<String>()
        )
    }
}

#[cfg(test)]
mod tests;
