//! Connected backend handle shared through context.
//!
//! SYSTEM CONTEXT
//! ==============
//! Built once by the session gate after `/api/config` answers. Pages reach
//! the session manager and build a patient store from it; nothing is
//! constructed before the config is known.

use std::sync::Arc;

use frontdesk::{BackendConfig, Session, SessionManager, SessionStorage};

use crate::net::auth::RestAuth;
use crate::net::rest::RestPatientStore;
use crate::util::clock::now_unix;
use crate::util::local_storage;

/// Session persistence in `localStorage`, one key per backend project.
#[derive(Clone, Debug)]
pub struct BrowserSessionStorage {
    key: String,
}

impl BrowserSessionStorage {
    #[must_use]
    pub fn new(key: String) -> Self {
        Self { key }
    }
}

impl SessionStorage for BrowserSessionStorage {
    fn load(&self) -> Option<Session> {
        local_storage::load_json(&self.key)
    }

    fn save(&self, session: &Session) {
        local_storage::save_json(&self.key, session);
    }

    fn clear(&self) {
        local_storage::remove(&self.key);
    }
}

/// Backend config plus the session manager bound to it.
#[derive(Clone)]
pub struct Backend {
    pub config: BackendConfig,
    pub sessions: SessionManager<RestAuth>,
}

impl Backend {
    #[must_use]
    pub fn connect(config: BackendConfig) -> Self {
        let storage = Arc::new(BrowserSessionStorage::new(config.storage_key()));
        let sessions = SessionManager::new(RestAuth::new(config.clone()), storage, now_unix);
        Self { config, sessions }
    }

    /// Data access on behalf of `session`.
    #[must_use]
    pub fn patient_store(&self, session: &Session) -> RestPatientStore {
        RestPatientStore::new(self.config.clone(), session.access_token.clone())
    }
}
