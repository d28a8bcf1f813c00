//! Model-client abstractions for background completions.
//!
//! The conversation core calls a secondary, cheap model to compact old
//! history. This crate defines that boundary ([`CompletionClient`]), an
//! Anthropic-backed implementation, and a queued mock for tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod anthropic;

pub use anthropic::AnthropicClient;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub prompt: String,
    pub model: Option<String>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

impl CompletionRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            model: None,
            max_tokens: None,
            temperature: None,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionResponse {
    pub content: String,
    pub model: Option<String>,
    pub stop_reason: Option<String>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClientError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("http status {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("decode error: {0}")]
    Decode(String),

    #[error("mock client has no queued response")]
    MockQueueEmpty,
}

#[async_trait]
pub trait CompletionClient: Send + Sync {
    fn name(&self) -> &'static str;

    async fn complete(&self, req: CompletionRequest) -> Result<CompletionResponse, ClientError>;
}

/// Mock client with queued responses, for exercising callers without a
/// network.
#[derive(Debug, Default)]
pub struct MockClient {
    queue: Mutex<VecDeque<Result<CompletionResponse, ClientError>>>,
}

impl MockClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&self, result: Result<CompletionResponse, ClientError>) {
        self.queue
            .lock()
            .expect("mock completion queue poisoned")
            .push_back(result);
    }

    pub fn enqueue_content(&self, content: impl Into<String>) {
        self.enqueue(Ok(CompletionResponse {
            content: content.into(),
            model: Some("mock-1".to_string()),
            stop_reason: Some("end_turn".to_string()),
        }));
    }
}

#[async_trait]
impl CompletionClient for MockClient {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn complete(&self, _req: CompletionRequest) -> Result<CompletionResponse, ClientError> {
        self.queue
            .lock()
            .expect("mock completion queue poisoned")
            .pop_front()
            .unwrap_or(Err(ClientError::MockQueueEmpty))
    }
}
