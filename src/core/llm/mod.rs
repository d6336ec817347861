//! Completion call against the OpenAI-compatible AI/ML API endpoint.

pub(crate) mod context;
mod error;

use async_openai::Client;
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;

use crate::core::config::{Config, SamplingParams};
use crate::core::message::ChatMessage;

pub use context::limit_context;
pub use error::{ChatError, map_api_error};

/// One non-streaming completion request.
pub struct CompletionRequest<'a> {
    pub config: &'a Config,
    pub model: &'a str,
    /// Full conversation; trimmed to the configured word budget before sending.
    pub messages: &'a [ChatMessage],
}

fn request_body(model: &str, messages: &[ChatMessage], sampling: &SamplingParams) -> Value {
    json!({
        "model": model,
        "messages": messages,
        "max_tokens": sampling.max_tokens,
        "temperature": sampling.temperature,
        "top_p": sampling.top_p,
        "top_k": sampling.top_k,
        "repetition_penalty": sampling.repetition_penalty,
    })
}

/// `choices[0].message.content` of a completion response.
fn extract_content(response: &Value) -> Result<String, ChatError> {
    if let Some(err) = response.get("error") {
        let msg = err
            .get("message")
            .and_then(|v| v.as_str())
            .unwrap_or("Unknown error");
        return Err(ChatError::ApiMessage(msg.to_string()));
    }
    response
        .pointer("/choices/0/message/content")
        .and_then(|c| c.as_str())
        .map(str::to_string)
        .ok_or(ChatError::EmptyResponse)
}

/// Send the conversation and return the assistant's reply.
///
/// Races the request against `cancel` when given.
pub async fn complete(
    req: CompletionRequest<'_>,
    cancel: Option<&CancellationToken>,
) -> Result<String, ChatError> {
    if cancel.is_some_and(|t| t.is_cancelled()) {
        return Err(ChatError::Cancelled);
    }

    let settings = &req.config.settings;
    let messages = limit_context(req.messages, settings.context_word_limit);
    if messages.is_empty() {
        log::warn!(
            "Latest message exceeds the context limit of {} words; sending it anyway",
            settings.context_word_limit
        );
    }
    let messages = if messages.is_empty() {
        req.messages.last().cloned().into_iter().collect()
    } else {
        messages
    };

    let body = request_body(req.model, &messages, &settings.sampling);
    log::debug!("Completion request: {}", body);

    let client = Client::with_config(req.config.openai_config.clone());
    let chat_api = client.chat();
    let future = chat_api.create_byot::<_, Value>(body);

    let result = if let Some(token) = cancel {
        tokio::select! {
            biased;
            _ = token.cancelled() => {
                return Err(ChatError::Cancelled);
            }
            result = future => result,
        }
    } else {
        future.await
    };

    let response = result.map_err(map_api_error)?;
    log::debug!("Completion response: {}", response);
    extract_content(&response)
}
