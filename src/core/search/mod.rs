//! Catalog search: normalization, relevance ranking, and match highlighting.
//!
//! All functions here are pure and synchronous; callers re-run them on every
//! query change and drop stale results themselves.

mod highlight;
mod normalize;
mod rank;

pub use highlight::{HighlightColor, HighlightSpan, Palette, highlight};
pub use normalize::{normalize, tokenize};
pub use rank::{Field, FieldMatches, Priority, ScoredModel, rank, score};

#[cfg(test)]
mod tests;
