//! Patient records screen: list snapshot, form draft, and the operations
//! behind the table and form.
//!
//! SYSTEM CONTEXT
//! ==============
//! The page keeps a `PatientsState` in a signal. Synchronous transitions
//! (`begin_edit`, `begin_submit`, `finish_submit`, ...) run inside signal
//! updates; the async store calls (`fetch_records`, `submit`,
//! `delete_record`) run between them. No borrow of the state is ever held
//! across a store call.
//!
//! ERROR HANDLING
//! ==============
//! Every store failure is logged once here and leaves the state as it was
//! before the attempt. There is no user-facing error surface and no retry.

#[cfg(test)]
#[path = "screen_test.rs"]
mod screen_test;

use crate::error::StoreError;
use crate::patient::{FormDraft, Patient, PatientField, PatientFields, PatientId};
use crate::store::PatientStore;

/// A validated form submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Submission {
    Create(PatientFields),
    Update { id: PatientId, fields: PatientFields },
}

/// Why a form submission was not started.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SubmitRejected {
    #[error("a submission is already in progress")]
    InFlight,
    #[error("required field {0} is empty")]
    MissingField(PatientField),
}

/// State owned by the patient records screen.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PatientsState {
    /// Snapshot from the last successful list, newest first.
    pub records: Vec<Patient>,
    pub draft: FormDraft,
    pub is_submitting: bool,
}

impl PatientsState {
    /// Replace the snapshot with a list result. Returns whether it changed.
    pub fn apply_list(&mut self, result: Result<Vec<Patient>, StoreError>) -> bool {
        match result {
            Ok(records) => {
                self.records = records;
                true
            }
            Err(e) => {
                log::error!("error fetching patients: {e}");
                false
            }
        }
    }

    pub fn set_field(&mut self, field: PatientField, value: String) {
        self.draft.fields.set(field, value);
    }

    /// Enter edit mode for a row of the current snapshot. The row is not
    /// refetched, so the draft may reflect data the store has since changed.
    pub fn begin_edit(&mut self, patient: &Patient) {
        self.draft.load(patient);
    }

    /// Leave edit mode, discarding unsaved changes.
    pub fn cancel_edit(&mut self) {
        self.draft.clear();
    }

    /// Validate the draft and mark a submission in flight.
    ///
    /// # Errors
    ///
    /// [`SubmitRejected::InFlight`] while a previous submission is pending;
    /// [`SubmitRejected::MissingField`] when a field is blank.
    pub fn begin_submit(&mut self) -> Result<Submission, SubmitRejected> {
        if self.is_submitting {
            return Err(SubmitRejected::InFlight);
        }
        if let Some(field) = self.draft.fields.first_missing() {
            return Err(SubmitRejected::MissingField(field));
        }
        self.is_submitting = true;
        let fields = self.draft.fields.clone();
        Ok(match &self.draft.editing_id {
            Some(id) => Submission::Update { id: id.clone(), fields },
            None => Submission::Create(fields),
        })
    }

    /// Settle a submission. Success clears the draft (and edit mode); failure
    /// keeps everything the user typed.
    pub fn finish_submit(&mut self, submission: &Submission, outcome: &Result<Patient, StoreError>) {
        self.is_submitting = false;
        match outcome {
            Ok(saved) => {
                log::info!("saved patient {}", saved.id);
                self.draft.clear();
            }
            Err(e) => match submission {
                Submission::Create(_) => log::error!("error creating patient: {e}"),
                Submission::Update { id, .. } => log::error!("error updating patient {id}: {e}"),
            },
        }
    }
}

/// Fetch the full snapshot, newest first.
///
/// # Errors
///
/// Returns the store failure unchanged.
pub async fn fetch_records<S: PatientStore + ?Sized>(store: &S) -> Result<Vec<Patient>, StoreError> {
    store.list().await
}

/// Send a submission to the store.
///
/// # Errors
///
/// Returns the store failure unchanged.
pub async fn submit<S: PatientStore + ?Sized>(store: &S, submission: &Submission) -> Result<Patient, StoreError> {
    match submission {
        Submission::Create(fields) => store.insert(fields).await,
        Submission::Update { id, fields } => store.update(id, fields).await,
    }
}

/// Delete a row. Returns whether the list should be refetched; a failure is
/// logged and the row stays.
pub async fn delete_record<S: PatientStore + ?Sized>(store: &S, id: &PatientId) -> bool {
    match store.delete(id).await {
        Ok(()) => true,
        Err(e) => {
            log::error!("error deleting patient {id}: {e}");
            false
        }
    }
}
