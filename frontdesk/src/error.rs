//! Errors produced by the auth and data collaborators.
//!
//! ERROR HANDLING
//! ==============
//! None of these are fatal. The UI reduces every one of them to a log entry
//! (or the inline login message) and keeps its previous state.

use crate::patient::PatientId;

/// Failure of a patient store operation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The request never produced a response.
    #[error("store request failed: {0}")]
    Transport(String),

    /// The store answered with a non-success status.
    #[error("store rejected request: status {status}: {message}")]
    Rejected { status: u16, message: String },

    /// The response body did not match the expected row shape.
    #[error("store response parse failed: {0}")]
    Parse(String),

    /// An update targeted a record the store does not have.
    #[error("patient {0} not found")]
    NotFound(PatientId),

    /// No transport is available (server-side rendering).
    #[error("store not available outside the browser")]
    Unavailable,
}

/// Failure of an auth service operation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// The request never produced a response.
    #[error("auth request failed: {0}")]
    Transport(String),

    /// The auth service refused the request (bad credentials, revoked token).
    #[error("auth rejected request: status {status}: {message}")]
    Rejected { status: u16, message: String },

    /// The token response could not be decoded.
    #[error("auth response parse failed: {0}")]
    Parse(String),

    /// The operation needs a session and none is stored.
    #[error("no active session")]
    NoSession,

    /// No transport or backend config is available.
    #[error("auth not available")]
    Unavailable,
}

impl AuthError {
    /// Whether the auth service definitively refused the request, as opposed
    /// to the request failing on the way.
    #[must_use]
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }
}
