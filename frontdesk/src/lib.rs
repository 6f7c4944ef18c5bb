//! Front-desk core: patient records and session flow for the clinic app.
//!
//! This crate owns everything the UI needs that is not rendering: the patient
//! data model, the session manager wrapping the hosted auth service, the view
//! router state machine, the patient screen state transitions, and the wire
//! mapping for the hosted backend. It compiles both natively (server, tests)
//! and to WASM (browser client).
//!
//! Transport lives elsewhere. The collaborator traits [`AuthService`],
//! [`SessionStorage`] and [`PatientStore`] are implemented by the browser
//! client and, behind the `testing` feature, by the in-memory backends in
//! [`memory`].

pub mod error;
#[cfg(any(test, feature = "testing"))]
pub mod memory;
pub mod patient;
pub mod router;
pub mod screen;
pub mod session;
pub mod store;
pub mod wire;

pub use error::{AuthError, StoreError};
pub use patient::{FormDraft, Patient, PatientField, PatientFields, PatientId};
pub use router::{Screen, ViewRouter};
pub use screen::{PatientsState, SubmitRejected, Submission};
pub use session::{AuthService, Session, SessionEvent, SessionManager, SessionStorage, SessionUser, Subscription};
pub use store::PatientStore;
pub use wire::BackendConfig;
