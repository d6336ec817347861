//! Split display text into spans marking the query terms it contains.
//!
//! Highlighting works on the raw query terms (not normalized tokens), so it is
//! independent of ranking: a model may rank on its description while its
//! name shows no highlight.

use regex::{Regex, RegexBuilder};

/// Highlight colors, in default palette order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HighlightColor {
    Yellow,
    Green,
    Blue,
    Pink,
}

/// Non-empty ordered list of highlight colors, assigned to query terms by position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette(Vec<HighlightColor>);

impl Palette {
    /// Returns `None` for an empty color list.
    #[cfg(test)]
    pub fn new(colors: Vec<HighlightColor>) -> Option<Self> {
        if colors.is_empty() {
            None
        } else {
            Some(Palette(colors))
        }
    }

    /// Color of the term at `term_index` (cycles through the palette).
    pub fn color_for(&self, term_index: usize) -> HighlightColor {
        self.0[term_index % self.0.len()]
    }

    #[cfg(test)]
    pub fn colors(&self) -> &[HighlightColor] {
        &self.0
    }
}

impl Default for Palette {
    fn default() -> Self {
        Palette(vec![
            HighlightColor::Yellow,
            HighlightColor::Green,
            HighlightColor::Blue,
            HighlightColor::Pink,
        ])
    }
}

/// A run of text, colored when it equals a query term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightSpan<'t> {
    pub text: &'t str,
    pub color: Option<HighlightColor>,
}

impl<'t> HighlightSpan<'t> {
    fn plain(text: &'t str) -> Self {
        Self {
            text,
            color: None,
        }
    }

    #[cfg(test)]
    pub fn is_match(&self) -> bool {
        self.color.is_some()
    }
}

struct TermMatchers {
    split: Regex,
    /// One anchored matcher per term, in query order.
    exact: Vec<Regex>,
}

fn build_matchers(terms: &[&str]) -> Result<TermMatchers, regex::Error> {
    let escaped: Vec<String> = terms.iter().map(|t| regex::escape(t)).collect();
    let split = RegexBuilder::new(&escaped.join("|"))
        .case_insensitive(true)
        .build()?;
    let exact = escaped
        .iter()
        .map(|e| {
            RegexBuilder::new(&format!("^(?:{})$", e))
                .case_insensitive(true)
                .build()
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(TermMatchers { split, exact })
}

/// Split `text` into spans, coloring fragments that case-insensitively equal a query term.
///
/// Terms are the whitespace-separated pieces of `query`, taken literally.
/// Concatenating the returned span texts always yields `text`. A missing
/// `text` is treated as empty; an empty query yields one unmatched span.
pub fn highlight<'t>(
    text: Option<&'t str>,
    query: &str,
    palette: &Palette,
) -> Vec<HighlightSpan<'t>> {
    let text = text.unwrap_or("");
    let terms: Vec<&str> = query.split_whitespace().collect();
    if terms.is_empty() {
        return vec![HighlightSpan::plain(text)];
    }

    let matchers = match build_matchers(&terms) {
        Ok(m) => m,
        Err(e) => {
            log::warn!("highlight: cannot compile pattern for {:?}: {}", query, e);
            return vec![HighlightSpan::plain(text)];
        }
    };

    let mut fragments: Vec<&'t str> = Vec::new();
    let mut last = 0;
    for m in matchers.split.find_iter(text) {
        fragments.push(&text[last..m.start()]);
        fragments.push(m.as_str());
        last = m.end();
    }
    fragments.push(&text[last..]);

    let spans: Vec<HighlightSpan<'t>> = fragments
        .into_iter()
        .filter(|f| !f.is_empty())
        .map(|fragment| {
            match matchers.exact.iter().position(|re| re.is_match(fragment)) {
                Some(i) => HighlightSpan {
                    text: fragment,
                    color: Some(palette.color_for(i)),
                },
                None => HighlightSpan::plain(fragment),
            }
        })
        .collect();

    if spans.is_empty() {
        vec![HighlightSpan::plain(text)]
    } else {
        spans
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn joined(spans: &[HighlightSpan<'_>]) -> String {
        spans.iter().map(|s| s.text).collect()
    }

    #[test]
    fn empty_query_is_single_plain_span() {
        let spans = highlight(Some("GPT-4o Mini"), "", &Palette::default());
        assert_eq!(spans, vec![HighlightSpan::plain("GPT-4o Mini")]);
    }

    #[test]
    fn missing_text_is_empty() {
        let spans = highlight(None, "gpt", &Palette::default());
        assert_eq!(joined(&spans), "");
        assert!(spans.iter().all(|s| !s.is_match()));
    }

    #[test]
    fn marks_terms_case_insensitively() {
        let spans = highlight(Some("GPT-4o Mini"), "gpt mini", &Palette::default());
        let marked: Vec<(&str, Option<HighlightColor>)> =
            spans.iter().map(|s| (s.text, s.color)).collect();
        assert_eq!(
            marked,
            vec![
                ("GPT", Some(HighlightColor::Yellow)),
                ("-4o ", None),
                ("Mini", Some(HighlightColor::Green)),
            ]
        );
        assert_eq!(joined(&spans), "GPT-4o Mini");
    }

    #[test]
    fn repeated_occurrences_share_a_color() {
        let spans = highlight(Some("llama meets Llama"), "llama", &Palette::default());
        let colored: Vec<_> = spans.iter().filter(|s| s.is_match()).collect();
        assert_eq!(colored.len(), 2);
        assert!(colored.iter().all(|s| s.color == Some(HighlightColor::Yellow)));
    }

    #[test]
    fn colors_cycle_through_palette() {
        let palette = Palette::new(vec![HighlightColor::Blue, HighlightColor::Pink]).unwrap();
        let spans = highlight(Some("a b c"), "a b c", &palette);
        let colors: Vec<_> = spans.iter().filter_map(|s| s.color).collect();
        assert_eq!(
            colors,
            vec![
                HighlightColor::Blue,
                HighlightColor::Pink,
                HighlightColor::Blue
            ]
        );
    }

    #[test]
    fn regex_metacharacters_are_literal() {
        let spans = highlight(Some("C++ (beta) v1.5"), "c++ (beta) 1.5", &Palette::default());
        assert_eq!(joined(&spans), "C++ (beta) v1.5");
        let matched: Vec<&str> = spans.iter().filter(|s| s.is_match()).map(|s| s.text).collect();
        assert_eq!(matched, vec!["C++", "(beta)", "1.5"]);
    }

    #[test]
    fn dot_does_not_match_any_char() {
        let spans = highlight(Some("1x5"), "1.5", &Palette::default());
        assert!(spans.iter().all(|s| !s.is_match()));
    }

    #[test]
    fn whitespace_only_query_is_passthrough() {
        let spans = highlight(Some("text"), "   ", &Palette::default());
        assert_eq!(spans, vec![HighlightSpan::plain("text")]);
    }

    #[test]
    fn empty_palette_is_rejected() {
        assert!(Palette::new(vec![]).is_none());
        assert_eq!(Palette::default().colors().len(), 4);
    }
}
