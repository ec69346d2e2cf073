//! Debounced autosave of the working form.
//!
//! # Responsibility
//! - Track store revisions and save the form once edits have been quiet for
//!   the configured delay.
//! - Restore the saved form into a store at session start.
//!
//! # Invariants
//! - Time is supplied by the caller; no timer thread exists.
//! - Each newly observed revision restarts the delay.
//! - A revision that is already saved is never saved again.
//! - A failed save keeps the previous stored copy, stays dirty and retries
//!   after another full delay.

use crate::repo::form_repo::{FormRepository, RepoError, RepoResult};
use crate::store::PlaygroundStore;
use log::{debug, error, info};
use std::time::{Duration, Instant};

/// Quiet period between the last edit and the save.
pub const DEFAULT_AUTOSAVE_DELAY: Duration = Duration::from_millis(1000);

/// What one `tick` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoSaveOutcome {
    /// Nothing unsaved.
    Idle,
    /// Unsaved edits; the save fires after `remaining`.
    Pending { remaining: Duration },
    Saved { revision: u64 },
}

/// Debounce bookkeeping, independent of any repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoSaveState {
    delay: Duration,
    observed_revision: Option<u64>,
    saved_revision: Option<u64>,
    deadline: Option<Instant>,
}

impl Default for AutoSaveState {
    fn default() -> Self {
        Self::new(DEFAULT_AUTOSAVE_DELAY)
    }
}

impl AutoSaveState {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            observed_revision: None,
            saved_revision: None,
            deadline: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Records that the store reached `revision` at `now`.
    ///
    /// A revision different from the last observed one restarts the delay.
    pub fn note_revision(&mut self, revision: u64, now: Instant) {
        if self.observed_revision == Some(revision) {
            return;
        }
        self.observed_revision = Some(revision);
        if self.saved_revision == Some(revision) {
            self.deadline = None;
        } else {
            self.deadline = Some(now + self.delay);
        }
    }

    /// Marks `revision` as matching storage (after a save or a restore).
    pub fn mark_saved(&mut self, revision: u64) {
        self.observed_revision = Some(revision);
        self.saved_revision = Some(revision);
        self.deadline = None;
    }

    pub fn is_dirty(&self) -> bool {
        self.observed_revision.is_some() && self.observed_revision != self.saved_revision
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }
}

/// Autosave use-case service over a form repository.
pub struct AutoSaveService<R: FormRepository> {
    repo: R,
    state: AutoSaveState,
}

impl<R: FormRepository> AutoSaveService<R> {
    pub fn new(repo: R, delay: Duration) -> Self {
        Self::resume(repo, AutoSaveState::new(delay))
    }

    /// Rebuilds a service around previously kept debounce state.
    pub fn resume(repo: R, state: AutoSaveState) -> Self {
        Self { repo, state }
    }

    /// Releases the repository and returns the debounce state.
    pub fn into_state(self) -> AutoSaveState {
        self.state
    }

    pub fn state(&self) -> &AutoSaveState {
        &self.state
    }

    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Advances the debounce clock to `now` and saves when it has expired.
    ///
    /// # Errors
    /// - Returns the repository error of a failed save; the delay restarts.
    pub fn tick(&mut self, store: &PlaygroundStore, now: Instant) -> RepoResult<AutoSaveOutcome> {
        self.state.note_revision(store.revision(), now);

        let Some(deadline) = self.state.deadline else {
            return Ok(AutoSaveOutcome::Idle);
        };
        if now < deadline {
            return Ok(AutoSaveOutcome::Pending {
                remaining: deadline - now,
            });
        }

        match self.save(store) {
            Ok(revision) => Ok(AutoSaveOutcome::Saved { revision }),
            Err(err) => {
                self.state.deadline = Some(now + self.state.delay);
                Err(err)
            }
        }
    }

    /// Saves immediately, regardless of the debounce clock.
    pub fn flush(&mut self, store: &PlaygroundStore) -> RepoResult<u64> {
        self.save(store)
    }

    /// Loads the stored form into `store`.
    ///
    /// Returns `false` when nothing is stored. The restored revision counts
    /// as saved.
    ///
    /// # Errors
    /// - `InvalidData` when the stored form is rejected by the store.
    pub fn restore(&mut self, store: &mut PlaygroundStore) -> RepoResult<bool> {
        let started_at = Instant::now();
        let Some(form) = self.repo.load_form()? else {
            info!("event=autosave_restore module=autosave status=skipped reason=empty");
            return Ok(false);
        };
        let stored_counter = self.repo.load_next_field_id()?;

        store
            .load_form(form, stored_counter)
            .map_err(|err| RepoError::InvalidData(format!("stored form rejected: {err}")))?;
        self.state.mark_saved(store.revision());

        info!(
            "event=autosave_restore module=autosave status=ok fields={} duration_ms={}",
            store.fields().len(),
            started_at.elapsed().as_millis()
        );
        Ok(true)
    }

    fn save(&mut self, store: &PlaygroundStore) -> RepoResult<u64> {
        let started_at = Instant::now();
        let revision = store.revision();

        match self.repo.save_state(store.form(), store.next_field_id()) {
            Ok(()) => {
                self.state.mark_saved(revision);
                debug!(
                    "event=autosave_save module=autosave status=ok revision={} fields={} duration_ms={}",
                    revision,
                    store.fields().len(),
                    started_at.elapsed().as_millis()
                );
                Ok(revision)
            }
            Err(err) => {
                error!(
                    "event=autosave_save module=autosave status=error revision={} duration_ms={} error={}",
                    revision,
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }
}
