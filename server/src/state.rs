//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. The
//! server holds no patient or session data; it only knows which backend the
//! browser should talk to.

use std::sync::Arc;

use frontdesk::BackendConfig;

#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<BackendConfig>,
}

impl AppState {
    #[must_use]
    pub fn new(backend: BackendConfig) -> Self {
        Self { backend: Arc::new(backend) }
    }
}
