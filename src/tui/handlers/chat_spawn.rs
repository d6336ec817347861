//! Spawns chat requests in a background thread with a result channel.

use std::sync::Arc;
use std::sync::mpsc;
use tokio::runtime::Runtime;
use tokio_util::sync::CancellationToken;

use crate::core::config::Config;
use crate::core::llm::{self, CompletionRequest};
use crate::core::message::ChatMessage;

use super::PendingChat;

/// Spawn a completion request for `messages`. Returns PendingChat with the result channel.
pub fn spawn_chat(
    rt: &Arc<Runtime>,
    config: Arc<Config>,
    model_id: String,
    messages: Vec<ChatMessage>,
) -> PendingChat {
    let (result_tx, result_rx) = mpsc::channel();
    let cancel_token = CancellationToken::new();
    let cancel_token_clone = cancel_token.clone();
    let rt_clone = Arc::clone(rt);

    std::thread::spawn(move || {
        let request = CompletionRequest {
            config: config.as_ref(),
            model: &model_id,
            messages: &messages,
        };
        let result = rt_clone.block_on(llm::complete(request, Some(&cancel_token_clone)));
        // Receiver is gone when the chat was reset meanwhile.
        let _ = result_tx.send(result);
    });

    PendingChat {
        result_rx,
        cancel_token,
    }
}
