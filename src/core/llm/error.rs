//! Completion API error types.

/// Errors from a completion request.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("{0}")]
    ApiAuth(String),
    #[error("API error: {0}")]
    ApiMessage(String),
    /// The response had no `choices[0].message.content`.
    #[error("The API returned no completion")]
    EmptyResponse,
    /// The request was cancelled by the user.
    #[error("Request cancelled")]
    Cancelled,
    #[error(transparent)]
    Other(Box<dyn std::error::Error + Send + Sync + 'static>),
}

/// Map async-openai or API errors into ChatError.
///
/// Rejected credentials become [`ChatError::ApiAuth`]; an error body carrying
/// a JSON `message` becomes [`ChatError::ApiMessage`].
pub fn map_api_error<E>(e: E) -> ChatError
where
    E: std::fmt::Display + Into<Box<dyn std::error::Error + Send + Sync + 'static>>,
{
    let s = e.to_string();
    if s.contains("401") || s.to_lowercase().contains("unauthorized") {
        return ChatError::ApiAuth(
            "API error (401): the API key was rejected. Check AIML_API_KEY in .env or run `aiml-chat config set-api-key`.".to_string(),
        );
    }
    match body_message(&s) {
        Some(msg) => ChatError::ApiMessage(msg),
        None => ChatError::Other(e.into()),
    }
}

/// `error.message` (or a top-level `message`) of a JSON body embedded in `s`.
fn body_message(s: &str) -> Option<String> {
    let body: serde_json::Value = serde_json::from_str(&s[s.find('{')?..]).ok()?;
    body.pointer("/error/message")
        .or_else(|| body.get("message"))
        .and_then(|m| m.as_str())
        .map(str::to_string)
}
