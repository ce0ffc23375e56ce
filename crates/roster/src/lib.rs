//! Roster controller: mediates discrete UI actions against the record
//! backend and reconciles transient view state after each operation.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{info, warn};

use shared::{
    domain::{HeroDraft, HeroId, HeroRecord},
    error::RosterError,
};
use store::RecordBackend;

/// List-view phase. Ready covers both the empty and non-empty roster; the
/// distinction is a presentation decoration, not a phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListPhase {
    Loading,
    Ready,
    Error,
}

/// Whether the draft targets a new hero or an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Editing(HeroId),
}

/// Cloned view of the controller state handed to the presentation layer.
#[derive(Debug, Clone)]
pub struct RosterSnapshot {
    pub phase: ListPhase,
    pub records: Vec<HeroRecord>,
    pub draft: HeroDraft,
    pub form_mode: FormMode,
    pub submitting: bool,
    pub pending_delete: Option<HeroRecord>,
    pub error: Option<RosterError>,
}

impl RosterSnapshot {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

struct ViewState {
    phase: ListPhase,
    records: Vec<HeroRecord>,
    draft: HeroDraft,
    form_mode: FormMode,
    submitting: bool,
    pending_delete: Option<HeroRecord>,
    error: Option<RosterError>,
}

/// Owns the view state exclusively; the backend is injected so every
/// controller instance is isolated for tests.
pub struct RosterController {
    backend: Arc<dyn RecordBackend>,
    inner: Mutex<ViewState>,
}

impl RosterController {
    pub fn new(backend: Arc<dyn RecordBackend>) -> Self {
        Self {
            backend,
            inner: Mutex::new(ViewState {
                phase: ListPhase::Loading,
                records: Vec::new(),
                draft: HeroDraft::default(),
                form_mode: FormMode::Create,
                submitting: false,
                pending_delete: None,
                error: None,
            }),
        }
    }

    pub async fn snapshot(&self) -> RosterSnapshot {
        let state = self.inner.lock().await;
        RosterSnapshot {
            phase: state.phase,
            records: state.records.clone(),
            draft: state.draft.clone(),
            form_mode: state.form_mode,
            submitting: state.submitting,
            pending_delete: state.pending_delete.clone(),
            error: state.error,
        }
    }

    /// Fetches the roster. There is no automatic retry; the caller
    /// re-triggers this action to recover from a failure.
    pub async fn load(&self) -> Result<(), RosterError> {
        {
            let mut state = self.inner.lock().await;
            state.phase = ListPhase::Loading;
            state.error = None;
        }

        match self.backend.list().await {
            Ok(records) => {
                info!(count = records.len(), "roster: loaded");
                let mut state = self.inner.lock().await;
                state.records = records;
                state.phase = ListPhase::Ready;
                Ok(())
            }
            Err(err) => {
                warn!("roster: load failed: {err}");
                let mut state = self.inner.lock().await;
                state.phase = ListPhase::Error;
                state.error = Some(RosterError::LoadFailed);
                Err(RosterError::LoadFailed)
            }
        }
    }

    pub async fn set_name(&self, value: impl Into<String>) {
        self.inner.lock().await.draft.name = value.into();
    }

    pub async fn set_power(&self, value: impl Into<String>) {
        self.inner.lock().await.draft.power = value.into();
    }

    /// Populates the draft from the chosen record and switches the form to
    /// edit mode. The list state is untouched; an unknown id is ignored.
    pub async fn begin_edit(&self, id: HeroId) {
        let mut state = self.inner.lock().await;
        let Some(record) = state.records.iter().find(|r| r.id == id).cloned() else {
            warn!(id = id.0, "roster: begin_edit for unknown id ignored");
            return;
        };
        state.form_mode = FormMode::Editing(id);
        state.draft = HeroDraft::from_record(&record);
    }

    pub async fn cancel_edit(&self) {
        let mut state = self.inner.lock().await;
        state.form_mode = FormMode::Create;
        state.draft = HeroDraft::default();
    }

    /// Saves the draft: update when editing, create otherwise. An incomplete
    /// draft is rejected locally without a backend call. A second submit
    /// while one is in flight is dropped.
    pub async fn submit(&self) -> Result<(), RosterError> {
        let (mode, draft) = {
            let mut state = self.inner.lock().await;
            if state.submitting {
                info!("roster: submit ignored while another is in flight");
                return Ok(());
            }
            if !state.draft.is_complete() {
                state.error = Some(RosterError::EmptyField);
                return Err(RosterError::EmptyField);
            }
            state.submitting = true;
            state.error = None;
            (state.form_mode, state.draft.clone())
        };

        let outcome = match mode {
            FormMode::Editing(id) => {
                // Draft merged onto the record identity: id preserved,
                // fields replaced.
                self.backend
                    .update(HeroRecord {
                        id,
                        name: draft.name,
                        power: draft.power,
                    })
                    .await
            }
            FormMode::Create => self.backend.create(draft).await,
        };

        let mut state = self.inner.lock().await;
        state.submitting = false;
        match outcome {
            Ok(saved) => {
                match mode {
                    FormMode::Editing(_) => {
                        info!(id = saved.id.0, "roster: hero updated");
                        if let Some(stored) =
                            state.records.iter_mut().find(|r| r.id == saved.id)
                        {
                            *stored = saved;
                        }
                    }
                    FormMode::Create => {
                        info!(id = saved.id.0, "roster: hero registered");
                        state.records.push(saved);
                    }
                }
                state.form_mode = FormMode::Create;
                state.draft = HeroDraft::default();
                Ok(())
            }
            Err(err) => {
                // Draft and mode stay put so the user can retry the save.
                warn!("roster: save failed: {err}");
                state.error = Some(RosterError::SaveFailed);
                Err(RosterError::SaveFailed)
            }
        }
    }

    /// Arms the confirmation gate for the chosen record. No backend call is
    /// made until the deletion is confirmed.
    pub async fn request_delete(&self, id: HeroId) {
        let mut state = self.inner.lock().await;
        let Some(record) = state.records.iter().find(|r| r.id == id).cloned() else {
            warn!(id = id.0, "roster: request_delete for unknown id ignored");
            return;
        };
        state.pending_delete = Some(record);
    }

    pub async fn cancel_delete(&self) {
        self.inner.lock().await.pending_delete = None;
    }

    /// Deletes the pending record. On failure the list and the gate are left
    /// untouched; no error text is surfaced for deletions, the user retries
    /// through the still-armed confirmation.
    pub async fn confirm_delete(&self) {
        let pending = { self.inner.lock().await.pending_delete.clone() };
        let Some(pending) = pending else {
            return;
        };

        match self.backend.delete(pending.id).await {
            Ok(receipt) => {
                info!(id = receipt.id.0, "roster: hero removed");
                let mut state = self.inner.lock().await;
                state.records.retain(|r| r.id != receipt.id);
                state.pending_delete = None;
            }
            Err(err) => warn!("roster: delete failed: {err}"),
        }
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
