//! Shared conversation history and per-session compaction state.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use sous_core::ChatMessage;
use tokio::sync::{Mutex as AsyncMutex, MutexGuard as AsyncMutexGuard};

/// Ordered, mutable message history shared between the foreground turn path
/// (appends, strip/inject) and the background compaction task (bulk splice).
///
/// The inner mutex serializes every access; it is held only for short
/// synchronous sections, never across an await.
#[derive(Debug, Default)]
pub struct ConversationHistory {
    messages: Mutex<Vec<ChatMessage>>,
}

impl ConversationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&self, message: ChatMessage) {
        self.lock().push(message);
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Clone of the full message sequence.
    pub fn snapshot(&self) -> Vec<ChatMessage> {
        self.lock().clone()
    }

    /// Run a closure against the locked message vec. The closure must not
    /// block; all awaiting happens outside the lock.
    pub fn with_messages<R>(&self, f: impl FnOnce(&mut Vec<ChatMessage>) -> R) -> R {
        f(&mut self.lock())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<ChatMessage>> {
        self.messages.lock().expect("history lock poisoned")
    }
}

/// Per-session compaction coordination: a fast-path flag that avoids
/// scheduling redundant tasks, and the mutual-exclusion gate that is the
/// actual correctness boundary for history mutation.
///
/// One instance per conversation session; concurrent sessions never share
/// a gate.
#[derive(Debug, Default)]
pub struct CompactionState {
    in_flight: AtomicBool,
    gate: AsyncMutex<()>,
}

impl CompactionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the in-flight slot. Returns false when a compaction task is
    /// already scheduled or running.
    pub fn try_begin(&self) -> bool {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Release the in-flight slot. Called on every task exit path.
    pub fn end(&self) {
        self.in_flight.store(false, Ordering::Release);
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Acquire the mutual-exclusion gate. At most one holder may mutate
    /// history in bulk.
    pub async fn gate(&self) -> AsyncMutexGuard<'_, ()> {
        self.gate.lock().await
    }
}
