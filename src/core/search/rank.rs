//! Relevance ranking of catalog entries against a free-text query.
//!
//! Every query token is tested (substring containment on normalized text)
//! against eleven descriptor fields, each with a fixed weight. The first token
//! matching a field earns the full weight; further tokens matching the same
//! field earn half of it, so queries that touch many distinct fields rank
//! above queries that hit one field repeatedly.

use std::cmp::Ordering;
use std::fmt;

use crate::core::catalog::ModelDescriptor;

use super::normalize::{normalize, tokenize};

const FIELD_COUNT: usize = 11;

/// A scored descriptor field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    ModelName,
    ModelStringForApi,
    Organization,
    Specialty,
    Description,
    UseSuggestion,
    KnownFor,
    ModelType,
    ResponseTime,
    Cost,
    ContextLength,
}

impl Field {
    /// All fields in weight-table order.
    pub const ALL: [Field; FIELD_COUNT] = [
        Field::ModelName,
        Field::ModelStringForApi,
        Field::Organization,
        Field::Specialty,
        Field::Description,
        Field::UseSuggestion,
        Field::KnownFor,
        Field::ModelType,
        Field::ResponseTime,
        Field::Cost,
        Field::ContextLength,
    ];

    /// Points awarded for the first token that matches this field.
    pub fn weight(self) -> u32 {
        match self {
            Field::ModelName | Field::ModelStringForApi => 50,
            Field::Organization => 40,
            Field::Specialty | Field::Description => 30,
            Field::UseSuggestion => 25,
            Field::KnownFor => 20,
            Field::ModelType => 15,
            Field::ResponseTime | Field::Cost => 10,
            Field::ContextLength => 5,
        }
    }

    /// Catalog key of the field.
    pub fn name(self) -> &'static str {
        match self {
            Field::ModelName => "model_name",
            Field::ModelStringForApi => "model_string_for_api",
            Field::Organization => "organization",
            Field::Specialty => "specialty",
            Field::Description => "description",
            Field::UseSuggestion => "use_suggestion",
            Field::KnownFor => "known_for",
            Field::ModelType => "modeltype",
            Field::ResponseTime => "response_time",
            Field::Cost => "cost",
            Field::ContextLength => "context_length",
        }
    }

    fn index(self) -> usize {
        self as usize
    }

    /// Raw text of this field; absent optional fields read as empty.
    fn raw_text(self, model: &ModelDescriptor) -> String {
        let opt = |o: &Option<String>| o.clone().unwrap_or_default();
        match self {
            Field::ModelName => model.model_name.clone(),
            Field::ModelStringForApi => model.model_string_for_api.clone(),
            Field::Organization => model.organization.clone(),
            Field::Specialty => opt(&model.specialty),
            Field::Description => opt(&model.description),
            Field::UseSuggestion => opt(&model.use_suggestion),
            Field::KnownFor => opt(&model.known_for),
            Field::ModelType => opt(&model.modeltype),
            Field::ResponseTime => opt(&model.response_time),
            Field::Cost => opt(&model.cost),
            Field::ContextLength => model.context_length.to_string(),
        }
    }
}

/// Relevance score. Stored in half points so halved odd weights stay exact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Priority(u32);

impl Priority {
    pub const ZERO: Priority = Priority(0);

    #[cfg(test)]
    pub fn from_half_points(half_points: u32) -> Self {
        Priority(half_points)
    }

    pub fn half_points(self) -> u32 {
        self.0
    }

    pub fn points(self) -> f64 {
        f64::from(self.half_points()) / 2.0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let half = self.half_points();
        if half % 2 == 0 {
            write!(f, "{}", half / 2)
        } else {
            write!(f, "{}.5", half / 2)
        }
    }
}

/// How many query tokens matched each field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldMatches([u32; FIELD_COUNT]);

impl FieldMatches {
    pub fn count(&self, field: Field) -> u32 {
        self.0[field.index()]
    }

    /// Fields with at least one match, in weight-table order.
    pub fn matched_fields(&self) -> impl Iterator<Item = Field> + '_ {
        Field::ALL.into_iter().filter(|f| self.count(*f) > 0)
    }

    fn record(&mut self, field: Field) -> u32 {
        let slot = &mut self.0[field.index()];
        *slot = slot.saturating_add(1);
        *slot
    }
}

/// A catalog entry annotated with its relevance for one query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredModel<'a> {
    pub model: &'a ModelDescriptor,
    pub priority: Priority,
    pub matches: FieldMatches,
}

/// Score one descriptor against already-normalized tokens.
///
/// Empty tokens never match.
pub fn score(model: &ModelDescriptor, tokens: &[String]) -> (Priority, FieldMatches) {
    let normalized: Vec<(Field, String)> = Field::ALL
        .into_iter()
        .map(|f| (f, normalize(&f.raw_text(model))))
        .collect();

    let mut half_points = 0u32;
    let mut matches = FieldMatches::default();
    for token in tokens.iter().filter(|t| !t.is_empty()) {
        for (field, text) in &normalized {
            if !text.contains(token.as_str()) {
                continue;
            }
            half_points = accumulate(half_points, *field, matches.record(*field));
        }
    }
    (Priority(half_points), matches)
}

/// Add the half points earned by the `occurrence`-th match on `field`, saturating.
///
/// Weights are whole points: the first match earns `2 * w` half points, repeats earn `w`.
fn accumulate(half_points: u32, field: Field, occurrence: u32) -> u32 {
    let gained = if occurrence == 1 {
        field.weight() * 2
    } else {
        field.weight()
    };
    half_points.saturating_add(gained)
}

/// Rank `catalog` against `query`.
///
/// Entries scoring zero are dropped; the rest are sorted by priority
/// descending, then by `model_string_for_api` ascending. A query with no
/// usable tokens does not filter: the whole catalog comes back in catalog
/// order with zero priority.
pub fn rank<'a>(catalog: &'a [ModelDescriptor], query: &str) -> Vec<ScoredModel<'a>> {
    let tokens = tokenize(query);
    if tokens.is_empty() {
        return catalog
            .iter()
            .map(|model| ScoredModel {
                model,
                priority: Priority::ZERO,
                matches: FieldMatches::default(),
            })
            .collect();
    }

    let mut scored: Vec<ScoredModel<'a>> = catalog
        .iter()
        .filter_map(|model| {
            let (priority, matches) = score(model, &tokens);
            (!priority.is_zero()).then_some(ScoredModel {
                model,
                priority,
                matches,
            })
        })
        .collect();
    scored.sort_by(compare);
    log::debug!(
        "rank: {} token(s), {} of {} model(s) matched",
        tokens.len(),
        scored.len(),
        catalog.len()
    );
    scored
}

fn compare(a: &ScoredModel<'_>, b: &ScoredModel<'_>) -> Ordering {
    b.priority.cmp(&a.priority).then_with(|| {
        a.model
            .model_string_for_api
            .cmp(&b.model.model_string_for_api)
    })
}
