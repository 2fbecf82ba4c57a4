//! ResumeBuilder -- one guided editing session.
//!
//! Owns the `BuilderProgress` (pure, synchronous transitions) and the
//! `DraftSynchronizer` (all I/O). Every user-triggered save and every
//! autosave tick goes through the same async mutex around the synchronizer,
//! so at most one write is in flight per session. Autosave uses `try_lock`
//! and skips the tick when a save is already running.
//!
//! The autosave task is scoped to the builder: `start_autosave` spawns it and
//! `stop_autosave` (or dropping the builder) cancels it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use redraft_types::builder::BuilderProgress;
use redraft_types::document::ResumeDocument;
use redraft_types::draft::{Step, SyncMode, WorkingState};
use redraft_types::error::{AssistError, DraftStoreError};

use super::state::{BuilderProgressExt, new_builder_progress};
use crate::assist::service::ResumeAssistant;
use crate::draft::cache::DraftCache;
use crate::draft::identity::IdentityProbe;
use crate::draft::store::DurableDraftStore;
use crate::draft::sync::{DraftSynchronizer, SaveOutcome};

/// Reference autosave period.
pub const DEFAULT_AUTOSAVE_INTERVAL: Duration = Duration::from_secs(30);

struct Shared<S, C, I> {
    progress: Mutex<BuilderProgress>,
    sync: tokio::sync::Mutex<DraftSynchronizer<S, C, I>>,
    mode: SyncMode,
    saving: watch::Sender<bool>,
    banner_dismissed: AtomicBool,
}

impl<S, C, I> Shared<S, C, I>
where
    S: DurableDraftStore,
    C: DraftCache,
    I: IdentityProbe,
{
    fn progress(&self) -> MutexGuard<'_, BuilderProgress> {
        self.progress.lock().expect("builder progress lock poisoned")
    }

    /// Save the latest snapshot while holding the synchronizer.
    ///
    /// The snapshot is taken after the lock is acquired, so the write always
    /// carries the most recent document.
    async fn persist(&self, sync: &mut DraftSynchronizer<S, C, I>) -> SaveOutcome {
        let WorkingState {
            document,
            last_completed_step,
        } = self.progress().working_state();

        self.saving.send_replace(true);
        let outcome = sync.save(document, last_completed_step).await;
        self.saving.send_replace(false);
        outcome
    }

    async fn autosave_tick(&self) -> Option<SaveOutcome> {
        let Ok(mut sync) = self.sync.try_lock() else {
            tracing::debug!("save in flight, skipping autosave tick");
            return None;
        };
        if self.progress().document.is_empty() {
            return None;
        }
        Some(self.persist(&mut sync).await)
    }
}

pub struct ResumeBuilder<S, C, I> {
    shared: Arc<Shared<S, C, I>>,
    autosave: Option<CancellationToken>,
}

impl<S, C, I> ResumeBuilder<S, C, I>
where
    S: DurableDraftStore + 'static,
    C: DraftCache + 'static,
    I: IdentityProbe + 'static,
{
    /// Initialize the synchronizer and resume from whatever draft it found.
    pub async fn open(mut sync: DraftSynchronizer<S, C, I>) -> Self {
        let working = sync.initialize().await;
        let mode = sync.mode();
        let progress = new_builder_progress(working);
        tracing::info!(
            mode = %mode,
            step = %progress.current_step,
            "builder session opened"
        );

        let (saving, _) = watch::channel(false);
        Self {
            shared: Arc::new(Shared {
                progress: Mutex::new(progress),
                sync: tokio::sync::Mutex::new(sync),
                mode,
                saving,
                banner_dismissed: AtomicBool::new(false),
            }),
            autosave: None,
        }
    }

    pub fn mode(&self) -> SyncMode {
        self.shared.mode
    }

    pub fn current_step(&self) -> Step {
        self.shared.progress().current_step
    }

    /// Snapshot of the in-memory session. Never waits on I/O.
    pub fn progress(&self) -> BuilderProgress {
        self.shared.progress().clone()
    }

    pub fn working_state(&self) -> WorkingState {
        self.shared.progress().working_state()
    }

    /// Merge the step's data, advance, and persist.
    ///
    /// The in-memory transition happens before the save, so the edit is kept
    /// whatever the persistence outcome.
    pub async fn complete_current_step(&self, data: ResumeDocument) -> SaveOutcome {
        let step = {
            let mut progress = self.shared.progress();
            let completed = progress.current_step;
            progress.complete_current_step(data);
            completed
        };
        tracing::debug!(step = %step, "step completed");

        let mut sync = self.shared.sync.lock().await;
        self.shared.persist(&mut sync).await
    }

    /// Navigate back one step. Not persisted.
    pub fn go_back(&self) -> Option<Step> {
        self.shared.progress().go_back()
    }

    /// Navigate to any step from review. Not persisted.
    pub fn jump_to(&self, step: Step) {
        self.shared.progress().jump_to(step);
    }

    /// Merge an externally produced partial document and persist.
    pub async fn import_external(&self, partial: ResumeDocument) -> SaveOutcome {
        self.shared.progress().document.merge(partial);
        let mut sync = self.shared.sync.lock().await;
        self.shared.persist(&mut sync).await
    }

    /// Parse pasted profile text and import the result.
    ///
    /// Assistant failures propagate and nothing is merged.
    pub async fn import_profile(
        &self,
        assistant: &ResumeAssistant,
        profile_text: &str,
    ) -> Result<SaveOutcome, AssistError> {
        let partial = assistant.parse_profile(profile_text).await?;
        Ok(self.import_external(partial).await)
    }

    /// Delete the draft from both stores and restart at the first step.
    pub async fn discard(&self) -> Result<(), DraftStoreError> {
        let mut sync = self.shared.sync.lock().await;
        sync.discard().await?;
        *self.shared.progress() = BuilderProgress::default();
        Ok(())
    }

    /// Whether a save is currently in flight.
    pub fn is_saving(&self) -> bool {
        *self.shared.saving.borrow()
    }

    pub fn subscribe_saving(&self) -> watch::Receiver<bool> {
        self.shared.saving.subscribe()
    }

    /// Guest sessions show a sign-in banner until dismissed.
    pub fn show_sign_in_banner(&self) -> bool {
        self.shared.mode == SyncMode::Guest && !self.shared.banner_dismissed.load(Ordering::Relaxed)
    }

    pub fn dismiss_banner(&self) {
        self.shared.banner_dismissed.store(true, Ordering::Relaxed);
    }

    /// Run one autosave pass now. Returns `None` when skipped.
    pub async fn autosave_now(&self) -> Option<SaveOutcome> {
        self.shared.autosave_tick().await
    }

    /// Spawn the periodic autosave task, replacing any running one.
    ///
    /// The first save happens one full `period` after the call.
    pub fn start_autosave(&mut self, period: Duration) {
        self.stop_autosave();

        let token = CancellationToken::new();
        let cancelled = token.clone();
        let shared = Arc::clone(&self.shared);

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = cancelled.cancelled() => break,
                    _ = ticker.tick() => {
                        if let Some(outcome) = shared.autosave_tick().await {
                            tracing::debug!(?outcome, "autosave complete");
                        }
                    }
                }
            }
            tracing::debug!("autosave task stopped");
        });

        self.autosave = Some(token);
    }

    pub fn stop_autosave(&mut self) {
        if let Some(token) = self.autosave.take() {
            token.cancel();
        }
    }
}

impl<S, C, I> Drop for ResumeBuilder<S, C, I> {
    fn drop(&mut self) {
        if let Some(token) = self.autosave.take() {
            token.cancel();
        }
    }
}
