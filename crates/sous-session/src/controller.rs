//! Session controller: owns the shared conversation state and drives the
//! context pipeline at every turn boundary.

use std::sync::Arc;

use chrono::NaiveDate;
use sous_context::{
    inject_frames, strip_stale_images, CompactionState, ContextPolicy, ConversationHistory,
    HistoryCompactor, Summarizer,
};
use sous_core::{ChatMessage, Profile, RecipeContext};
use sous_vision::{FrameEncoder, SharedFrameBuffer};
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::error::{SessionError, SessionResult};
use crate::mode::{ConversationMode, Directive};

/// One conversation session. History, frame buffer, and compaction state
/// are created here, live for the whole session, and survive every mode
/// transition.
pub struct SessionController {
    mode: ConversationMode,
    profile: Option<Profile>,
    history: Arc<ConversationHistory>,
    frames: SharedFrameBuffer,
    encoder: Arc<dyn FrameEncoder>,
    compactor: HistoryCompactor,
    policy: ContextPolicy,
    cancel: CancellationToken,
}

impl SessionController {
    /// A returning cook (profile on file) starts in Chef mode; a new one
    /// starts in Onboarding.
    pub fn new(
        profile: Option<Profile>,
        frames: SharedFrameBuffer,
        encoder: Arc<dyn FrameEncoder>,
        summarizer: Arc<dyn Summarizer>,
        policy: ContextPolicy,
    ) -> Self {
        let history = Arc::new(ConversationHistory::new());
        let state = Arc::new(CompactionState::new());
        let cancel = CancellationToken::new();
        let compactor = HistoryCompactor::new(
            Arc::clone(&history),
            state,
            summarizer,
            policy,
            cancel.clone(),
        );

        let mode = if profile.is_some() {
            ConversationMode::Chef
        } else {
            ConversationMode::Onboarding
        };

        Self {
            mode,
            profile,
            history,
            frames,
            encoder,
            compactor,
            policy,
            cancel,
        }
    }

    pub fn mode(&self) -> &ConversationMode {
        &self.mode
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    pub fn history(&self) -> &Arc<ConversationHistory> {
        &self.history
    }

    pub fn frames(&self) -> &SharedFrameBuffer {
        &self.frames
    }

    /// Token shared with the frame sampler and the compaction tasks, so
    /// session teardown stops all background work.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Turn-completion hook, called synchronously at every turn boundary
    /// regardless of mode: append the turn, strip stale images, inject the
    /// current frame window, then (non-blocking) trigger compaction.
    pub fn on_user_turn_completed(&self, message: ChatMessage) {
        self.history.append(message);

        let frames = self.frames.snapshot();
        self.history.with_messages(|msgs| {
            strip_stale_images(msgs, self.policy.keep_images_in_last);
            if let Some(newest) = msgs.last_mut() {
                inject_frames(
                    newest,
                    &frames,
                    self.encoder.as_ref(),
                    self.policy.max_frames_per_turn,
                );
            }
        });

        self.compactor.maybe_trigger();
    }

    /// Onboarding -> Chef once the profile is captured.
    pub fn complete_onboarding(&mut self, profile: Profile) -> SessionResult<Vec<Directive>> {
        match self.mode {
            ConversationMode::Onboarding => {
                info!(cook = %profile.first_name, "onboarding complete, entering chef mode");
                self.profile = Some(profile.clone());
                self.mode = ConversationMode::Chef;
                Ok(vec![Directive::SaveProfile(profile)])
            }
            _ => Err(SessionError::InvalidTransition {
                from: self.mode.name(),
                attempted: "complete_onboarding",
            }),
        }
    }

    /// Chef -> Recipe once a recipe is chosen.
    pub fn start_recipe(&mut self, recipe: RecipeContext) -> SessionResult<Vec<Directive>> {
        match self.mode {
            ConversationMode::Chef => {
                info!(recipe = %recipe.title, "starting recipe walkthrough");
                self.mode = ConversationMode::Recipe {
                    recipe: recipe.clone(),
                };
                Ok(vec![Directive::PublishRecipeStart(recipe)])
            }
            _ => Err(SessionError::InvalidTransition {
                from: self.mode.name(),
                attempted: "start_recipe",
            }),
        }
    }

    /// Recipe -> Chef on completion or cancellation. Records the dish in
    /// the in-memory profile and instructs the caller to persist it.
    pub fn finish_recipe(&mut self, finished_on: NaiveDate) -> SessionResult<Vec<Directive>> {
        match &self.mode {
            ConversationMode::Recipe { recipe } => {
                let title = recipe.title.clone();
                info!(recipe = %title, "recipe finished, back to chef mode");
                if let Some(profile) = self.profile.as_mut() {
                    profile.record_dish(title.clone(), finished_on);
                }
                self.mode = ConversationMode::Chef;
                Ok(vec![
                    Directive::PublishRecipeEnd,
                    Directive::RecordDish { title },
                ])
            }
            _ => Err(SessionError::InvalidTransition {
                from: self.mode.name(),
                attempted: "finish_recipe",
            }),
        }
    }

    /// End the session: cancels the sampler loop and any in-flight
    /// compaction.
    pub fn shutdown(&self) {
        info!("session shutting down");
        self.cancel.cancel();
    }
}
