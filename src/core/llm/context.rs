//! Context window management by word budget.

use crate::core::message::ChatMessage;

/// Keep the newest messages whose combined word estimate fits in `word_limit`.
///
/// Walks from the newest message backwards and stops before the running total
/// would exceed the limit. The kept messages are returned in original order.
/// A single message larger than the budget yields an empty context.
pub fn limit_context(messages: &[ChatMessage], word_limit: usize) -> Vec<ChatMessage> {
    let mut total = 0;
    let mut start = messages.len();
    for (i, m) in messages.iter().enumerate().rev() {
        total += m.word_count();
        if total > word_limit {
            break;
        }
        start = i;
    }
    if start > 0 {
        log::debug!(
            "Context limited to {} of {} messages",
            messages.len() - start,
            messages.len()
        );
    }
    messages[start..].to_vec()
}
