//! Model descriptor type and validation of raw catalog records.

use std::collections::HashSet;

use serde::{Deserialize, Deserializer, Serialize};

/// One entry of the model catalog.
///
/// `model_string_for_api` is the identity of the entry: it is unique across a
/// catalog and never empty once a record has passed [`validate`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelDescriptor {
    pub model_name: String,
    pub organization: String,
    pub model_string_for_api: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specialty: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_suggestion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub known_for: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modeltype: Option<String>,
    #[serde(default)]
    pub context_length: u64,
}

impl ModelDescriptor {
    /// Minimal descriptor; optional fields empty.
    pub fn new(
        model_name: impl Into<String>,
        organization: impl Into<String>,
        model_string_for_api: impl Into<String>,
        context_length: u64,
    ) -> Self {
        Self {
            model_name: model_name.into(),
            organization: organization.into(),
            model_string_for_api: model_string_for_api.into(),
            specialty: None,
            description: None,
            use_suggestion: None,
            known_for: None,
            response_time: None,
            cost: None,
            modeltype: None,
            context_length,
        }
    }
}

/// Errors when ingesting a catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("catalog entry #{index} has no model_string_for_api")]
    MissingIdentifier { index: usize },
    #[error("duplicate model_string_for_api in catalog: {0}")]
    DuplicateIdentifier(String),
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Catalog record as found on disk: every field optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct RawDescriptor {
    model_name: Option<String>,
    organization: Option<String>,
    model_string_for_api: Option<String>,
    specialty: Option<String>,
    description: Option<String>,
    use_suggestion: Option<String>,
    known_for: Option<String>,
    response_time: Option<String>,
    cost: Option<String>,
    modeltype: Option<String>,
    #[serde(deserialize_with = "context_length_lenient")]
    context_length: Option<u64>,
}

/// Accept `128000`, `"128000"`, or null for the context length.
fn context_length_lenient<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
        Some(serde_json::Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

fn non_blank(s: Option<String>) -> Option<String> {
    s.filter(|v| !v.trim().is_empty())
}

/// Validate raw records into descriptors, enforcing identifier presence and uniqueness.
pub(super) fn validate(raw: Vec<RawDescriptor>) -> Result<Vec<ModelDescriptor>, CatalogError> {
    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(raw.len());
    for (index, r) in raw.into_iter().enumerate() {
        let id = non_blank(r.model_string_for_api)
            .map(|s| s.trim().to_string())
            .ok_or(CatalogError::MissingIdentifier { index })?;
        if !seen.insert(id.clone()) {
            return Err(CatalogError::DuplicateIdentifier(id));
        }
        out.push(ModelDescriptor {
            model_name: r.model_name.unwrap_or_default(),
            organization: r.organization.unwrap_or_default(),
            model_string_for_api: id,
            specialty: non_blank(r.specialty),
            description: non_blank(r.description),
            use_suggestion: non_blank(r.use_suggestion),
            known_for: non_blank(r.known_for),
            response_time: non_blank(r.response_time),
            cost: non_blank(r.cost),
            modeltype: non_blank(r.modeltype),
            context_length: r.context_length.unwrap_or(0),
        });
    }
    Ok(out)
}

/// Parse and validate a catalog from JSON text.
pub fn parse_catalog(json: &str) -> Result<Vec<ModelDescriptor>, CatalogError> {
    let raw: Vec<RawDescriptor> = serde_json::from_str(json)?;
    validate(raw)
}
