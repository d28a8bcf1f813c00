//! Summarization boundary for history compaction.

use std::sync::Arc;

use async_trait::async_trait;
use sous_core::ChatMessage;
use sous_runtime::{CompletionClient, CompletionRequest};

use crate::error::ContextResult;

/// Render messages as `role: text` transcript lines for the summarizer.
/// Messages with no text content are skipped.
pub fn transcript_lines(messages: &[ChatMessage]) -> Vec<String> {
    messages
        .iter()
        .filter_map(|msg| {
            let text = msg.text();
            if text.is_empty() {
                None
            } else {
                Some(format!("{}: {}", msg.role, text))
            }
        })
        .collect()
}

/// Synthesizes a prose summary of older conversation turns. Treated as an
/// opaque, retry-safe collaborator: a failed call simply leaves history
/// over threshold until the next turn re-triggers compaction.
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, lines: &[String]) -> ContextResult<String>;
}

/// Summarizer backed by a cheap completion-model call.
pub struct ModelSummarizer {
    client: Arc<dyn CompletionClient>,
    max_tokens: u32,
}

impl ModelSummarizer {
    pub fn new(client: Arc<dyn CompletionClient>, max_tokens: u32) -> Self {
        Self { client, max_tokens }
    }

    fn prompt(conversation: &str) -> String {
        format!(
            "Summarize this cooking conversation into a compact paragraph. \
             Preserve key facts: what's being cooked, current step, decisions made, \
             user preferences mentioned, any issues encountered. Be concise.\n\n{conversation}"
        )
    }
}

#[async_trait]
impl Summarizer for ModelSummarizer {
    async fn summarize(&self, lines: &[String]) -> ContextResult<String> {
        if lines.is_empty() {
            return Ok(String::new());
        }

        let request = CompletionRequest::new(Self::prompt(&lines.join("\n")))
            .with_max_tokens(self.max_tokens);
        let response = self.client.complete(request).await?;
        Ok(response.content)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use sous_core::{ChatMessage, ContentPart, Role};
    use sous_runtime::{ClientError, MockClient};

    use super::{transcript_lines, ModelSummarizer, Summarizer};

    #[test]
    fn transcript_lines_render_role_and_text() {
        let messages = vec![
            ChatMessage::user("let's make risotto"),
            ChatMessage::assistant("Great choice, start by warming the stock."),
        ];
        let lines = transcript_lines(&messages);
        assert_eq!(lines[0], "user: let's make risotto");
        assert_eq!(
            lines[1],
            "assistant: Great choice, start by warming the stock."
        );
    }

    #[test]
    fn transcript_lines_skip_image_only_messages() {
        let messages = vec![
            ChatMessage::new(Role::User, vec![ContentPart::image("data:img")]),
            ChatMessage::user("that was the pan"),
        ];
        let lines = transcript_lines(&messages);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0], "user: that was the pan");
    }

    #[tokio::test]
    async fn model_summarizer_returns_client_content() {
        let client = Arc::new(MockClient::new());
        client.enqueue_content("Cooking risotto, currently toasting the rice.");

        let summarizer = ModelSummarizer::new(client, 300);
        let summary = summarizer
            .summarize(&["user: let's make risotto".to_string()])
            .await
            .unwrap();

        assert_eq!(summary, "Cooking risotto, currently toasting the rice.");
    }

    #[tokio::test]
    async fn model_summarizer_short_circuits_empty_input() {
        let client = Arc::new(MockClient::new());
        // No queued response: a call would fail, so it must not happen.
        let summarizer = ModelSummarizer::new(client, 300);
        let summary = summarizer.summarize(&[]).await.unwrap();
        assert!(summary.is_empty());
    }

    #[tokio::test]
    async fn model_summarizer_propagates_client_errors() {
        let client = Arc::new(MockClient::new());
        client.enqueue(Err(ClientError::Transport("timeout".to_string())));

        let summarizer = ModelSummarizer::new(client, 300);
        let err = summarizer
            .summarize(&["user: hello".to_string()])
            .await
            .unwrap_err();
        assert!(err.to_string().contains("timeout"));
    }
}
