//! Asynchronous history compaction.
//!
//! `maybe_trigger` runs on the turn-completion path and must never delay
//! it: the length check and flag claim are synchronous, the actual work is
//! a spawned task. The task re-validates everything after acquiring the
//! gate; the flag is only an optimization against redundant scheduling.

use std::sync::Arc;

use sous_core::{ChatMessage, ContentPart, Role};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::history::{CompactionState, ConversationHistory};
use crate::policy::ContextPolicy;
use crate::summarizer::{transcript_lines, Summarizer};

pub struct HistoryCompactor {
    history: Arc<ConversationHistory>,
    state: Arc<CompactionState>,
    summarizer: Arc<dyn Summarizer>,
    policy: ContextPolicy,
    cancel: CancellationToken,
}

impl HistoryCompactor {
    pub fn new(
        history: Arc<ConversationHistory>,
        state: Arc<CompactionState>,
        summarizer: Arc<dyn Summarizer>,
        policy: ContextPolicy,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            history,
            state,
            summarizer,
            policy,
            cancel,
        }
    }

    /// Fire-and-forget trigger. Spawns at most one compaction task; returns
    /// immediately whether or not one was scheduled.
    pub fn maybe_trigger(&self) {
        if self.history.len() <= self.policy.summarize_threshold {
            return;
        }
        if !self.state.try_begin() {
            return;
        }

        let history = Arc::clone(&self.history);
        let state = Arc::clone(&self.state);
        let summarizer = Arc::clone(&self.summarizer);
        let policy = self.policy;
        let cancel = self.cancel.clone();

        tokio::spawn(async move {
            tokio::select! {
                () = cancel.cancelled() => {
                    debug!("compaction cancelled by session teardown");
                }
                () = compact(&history, &state, summarizer.as_ref(), policy) => {}
            }
            state.end();
        });
    }
}

/// One compaction attempt. Never mutates history unless a summary was
/// produced; every early return leaves history exactly as found.
async fn compact(
    history: &ConversationHistory,
    state: &CompactionState,
    summarizer: &dyn Summarizer,
    policy: ContextPolicy,
) {
    let _gate = state.gate().await;

    // Re-validate under the data lock: length and split may have moved
    // since the trigger.
    let older = history.with_messages(|msgs| {
        if msgs.len() <= policy.summarize_threshold {
            return None;
        }
        let split = msgs.len() - policy.keep_recent_items;
        Some(msgs[..split].to_vec())
    });
    let Some(older) = older else {
        debug!("history shrank below threshold before compaction ran");
        return;
    };

    let lines = transcript_lines(&older);
    let summary = match summarizer.summarize(&lines).await {
        Ok(summary) if !summary.is_empty() => summary,
        Ok(_) => {
            debug!(older = older.len(), "summarizer produced no output, leaving history unchanged");
            return;
        }
        Err(err) => {
            warn!(
                error = %err,
                older = older.len(),
                "history compaction failed, will retry on a later turn"
            );
            return;
        }
    };

    let summary_message = ChatMessage::new(
        Role::Assistant,
        vec![ContentPart::text(format!("[Conversation so far: {summary}]"))],
    );

    // Splice out exactly the prefix that was summarized. Turns appended
    // while the summarizer ran sit at the tail and survive untouched.
    let (removed, remaining) = history.with_messages(|msgs| {
        msgs.drain(..older.len());
        msgs.insert(0, summary_message);
        (older.len(), msgs.len())
    });
    info!(removed, remaining, "compacted older turns into summary");
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use sous_core::ChatMessage;
    use sous_runtime::{ClientError, CompletionClient, MockClient};
    use tokio::sync::Semaphore;
    use tokio_util::sync::CancellationToken;

    use super::HistoryCompactor;
    use crate::error::ContextResult;
    use crate::history::{CompactionState, ConversationHistory};
    use crate::policy::ContextPolicy;
    use crate::summarizer::{ModelSummarizer, Summarizer};

    fn policy() -> ContextPolicy {
        ContextPolicy {
            summarize_threshold: 24,
            keep_recent_items: 8,
            ..ContextPolicy::default()
        }
    }

    fn history_of(n: usize) -> Arc<ConversationHistory> {
        let history = Arc::new(ConversationHistory::new());
        for i in 0..n {
            if i % 2 == 0 {
                history.append(ChatMessage::user(format!("turn {i}")));
            } else {
                history.append(ChatMessage::assistant(format!("turn {i}")));
            }
        }
        history
    }

    async fn wait_until_idle(state: &CompactionState) {
        tokio::time::timeout(Duration::from_secs(5), async {
            while state.is_in_flight() {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("compaction did not settle");
    }

    /// Summarizer that blocks until the test releases a permit, counting
    /// invocations.
    struct GatedSummarizer {
        calls: AtomicUsize,
        permits: Arc<Semaphore>,
    }

    #[async_trait]
    impl Summarizer for GatedSummarizer {
        async fn summarize(&self, _lines: &[String]) -> ContextResult<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let _permit = self.permits.acquire().await.expect("semaphore closed");
            Ok("the cook is braising short ribs, on step 4".to_string())
        }
    }

    #[tokio::test]
    async fn compaction_replaces_older_segment_with_summary() {
        let history = history_of(25);
        let recent_before: Vec<String> = history.snapshot()[25 - 8..]
            .iter()
            .map(|m| m.text())
            .collect();

        let client = Arc::new(MockClient::new());
        client.enqueue_content("braising short ribs, step 4 of 7");
        let state = Arc::new(CompactionState::new());
        let compactor = HistoryCompactor::new(
            Arc::clone(&history),
            Arc::clone(&state),
            Arc::new(ModelSummarizer::new(client, 300)),
            policy(),
            CancellationToken::new(),
        );

        compactor.maybe_trigger();
        wait_until_idle(&state).await;

        let snap = history.snapshot();
        assert_eq!(snap.len(), 1 + 8);
        assert_eq!(
            snap[0].text(),
            "[Conversation so far: braising short ribs, step 4 of 7]"
        );
        let recent_after: Vec<String> = snap[1..].iter().map(|m| m.text()).collect();
        assert_eq!(recent_after, recent_before);
    }

    #[tokio::test]
    async fn trigger_below_threshold_does_nothing() {
        let history = history_of(24);
        let client = Arc::new(MockClient::new());
        let state = Arc::new(CompactionState::new());
        let compactor = HistoryCompactor::new(
            Arc::clone(&history),
            Arc::clone(&state),
            Arc::new(ModelSummarizer::new(client, 300)),
            policy(),
            CancellationToken::new(),
        );

        compactor.maybe_trigger();
        assert!(!state.is_in_flight());
        assert_eq!(history.len(), 24);
    }

    #[tokio::test]
    async fn double_trigger_runs_exactly_one_task() {
        let history = history_of(30);
        let permits = Arc::new(Semaphore::new(0));
        let summarizer = Arc::new(GatedSummarizer {
            calls: AtomicUsize::new(0),
            permits: Arc::clone(&permits),
        });
        let state = Arc::new(CompactionState::new());
        let compactor = HistoryCompactor::new(
            Arc::clone(&history),
            Arc::clone(&state),
            Arc::clone(&summarizer) as Arc<dyn Summarizer>,
            policy(),
            CancellationToken::new(),
        );

        compactor.maybe_trigger();
        compactor.maybe_trigger();

        // Let the single task reach the summarizer, then release it.
        tokio::time::timeout(Duration::from_secs(5), async {
            while summarizer.calls.load(Ordering::SeqCst) == 0 {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("compaction task never started");
        permits.add_permits(1);
        wait_until_idle(&state).await;

        assert_eq!(summarizer.calls.load(Ordering::SeqCst), 1);
        assert_eq!(history.len(), 1 + 8);
    }

    #[tokio::test]
    async fn summarizer_failure_leaves_history_unchanged_and_retriggerable() {
        let history = history_of(25);
        let before = history.snapshot();

        let client = Arc::new(MockClient::new());
        client.enqueue(Err(ClientError::Transport("connection reset".to_string())));
        let state = Arc::new(CompactionState::new());
        let compactor = HistoryCompactor::new(
            Arc::clone(&history),
            Arc::clone(&state),
            Arc::new(ModelSummarizer::new(Arc::clone(&client) as Arc<dyn CompletionClient>, 300)),
            policy(),
            CancellationToken::new(),
        );

        compactor.maybe_trigger();
        wait_until_idle(&state).await;

        assert_eq!(history.snapshot(), before);
        assert!(!state.is_in_flight());

        // Next qualifying turn can re-trigger and succeed.
        client.enqueue_content("second attempt summary");
        compactor.maybe_trigger();
        wait_until_idle(&state).await;
        assert_eq!(history.len(), 1 + 8);
    }

    #[tokio::test]
    async fn appends_during_summarization_survive_at_tail() {
        let history = history_of(25);
        let permits = Arc::new(Semaphore::new(0));
        let summarizer = Arc::new(GatedSummarizer {
            calls: AtomicUsize::new(0),
            permits: Arc::clone(&permits),
        });
        let state = Arc::new(CompactionState::new());
        let compactor = HistoryCompactor::new(
            Arc::clone(&history),
            Arc::clone(&state),
            Arc::clone(&summarizer) as Arc<dyn Summarizer>,
            policy(),
            CancellationToken::new(),
        );

        compactor.maybe_trigger();
        tokio::time::timeout(Duration::from_secs(5), async {
            while summarizer.calls.load(Ordering::SeqCst) == 0 {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("compaction task never started");

        // Foreground keeps talking while the summary is in flight.
        history.append(ChatMessage::user("wait, the sauce is splitting"));
        permits.add_permits(1);
        wait_until_idle(&state).await;

        let snap = history.snapshot();
        assert_eq!(snap.len(), 1 + 8 + 1);
        assert_eq!(snap.last().unwrap().text(), "wait, the sauce is splitting");
    }

    #[tokio::test]
    async fn cancellation_aborts_in_flight_compaction() {
        let history = history_of(25);
        let before = history.snapshot();
        let permits = Arc::new(Semaphore::new(0));
        let summarizer = Arc::new(GatedSummarizer {
            calls: AtomicUsize::new(0),
            permits: Arc::clone(&permits),
        });
        let state = Arc::new(CompactionState::new());
        let cancel = CancellationToken::new();
        let compactor = HistoryCompactor::new(
            Arc::clone(&history),
            Arc::clone(&state),
            Arc::clone(&summarizer) as Arc<dyn Summarizer>,
            policy(),
            cancel.clone(),
        );

        compactor.maybe_trigger();
        tokio::time::timeout(Duration::from_secs(5), async {
            while summarizer.calls.load(Ordering::SeqCst) == 0 {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("compaction task never started");

        cancel.cancel();
        wait_until_idle(&state).await;

        assert_eq!(history.snapshot(), before);
    }
}
