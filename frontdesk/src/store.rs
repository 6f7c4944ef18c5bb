//! Remote patient store seam.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::patient::{Patient, PatientFields, PatientId};

/// The hosted data collaborator, reduced to the four calls the screen makes.
///
/// Futures are not `Send`: the browser transport runs on the single WASM
/// thread.
#[async_trait(?Send)]
pub trait PatientStore {
    /// All records, newest `created_at` first.
    async fn list(&self) -> Result<Vec<Patient>, StoreError>;

    /// Create a record; the store assigns `id` and `created_at`.
    async fn insert(&self, fields: &PatientFields) -> Result<Patient, StoreError>;

    /// Replace the editable fields of `id`.
    async fn update(&self, id: &PatientId, fields: &PatientFields) -> Result<Patient, StoreError>;

    /// Delete `id`. Deleting an id that does not exist succeeds.
    async fn delete(&self, id: &PatientId) -> Result<(), StoreError>;
}

/// A store that may not be connected yet. `None` answers every call with
/// [`StoreError::Unavailable`], so callers report it like any other failure.
#[async_trait(?Send)]
impl<S: PatientStore> PatientStore for Option<S> {
    async fn list(&self) -> Result<Vec<Patient>, StoreError> {
        match self {
            Some(store) => store.list().await,
            None => Err(StoreError::Unavailable),
        }
    }

    async fn insert(&self, fields: &PatientFields) -> Result<Patient, StoreError> {
        match self {
            Some(store) => store.insert(fields).await,
            None => Err(StoreError::Unavailable),
        }
    }

    async fn update(&self, id: &PatientId, fields: &PatientFields) -> Result<Patient, StoreError> {
        match self {
            Some(store) => store.update(id, fields).await,
            None => Err(StoreError::Unavailable),
        }
    }

    async fn delete(&self, id: &PatientId) -> Result<(), StoreError> {
        match self {
            Some(store) => store.delete(id).await,
            None => Err(StoreError::Unavailable),
        }
    }
}
