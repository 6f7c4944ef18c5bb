//! Session-driven choice between the loading placeholder, the login surface,
//! and the patient records screen.
//!
//! DESIGN
//! ======
//! `loading` ends exactly once, when the startup session lookup resolves.
//! After that the screen follows session change events only. Change events
//! that arrive before resolution are recorded but the lookup result wins,
//! since it is what the first screen is rendered from.

#[cfg(test)]
#[path = "router_test.rs"]
mod router_test;

use crate::error::AuthError;
use crate::session::{Session, SessionEvent};

/// The screen to render.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Loading,
    Login,
    Patients,
}

/// Top-level view state: whether startup resolved, and the current session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ViewRouter {
    resolved: bool,
    session: Option<Session>,
}

impl ViewRouter {
    /// Apply the startup session lookup. Only the first call has an effect.
    /// A failed lookup is logged and treated as signed out.
    pub fn resolve(&mut self, lookup: Result<Option<Session>, AuthError>) {
        if self.resolved {
            return;
        }
        self.session = lookup.unwrap_or_else(|e| {
            log::warn!("session lookup failed, continuing signed out: {e}");
            None
        });
        self.resolved = true;
    }

    /// Apply a session change event.
    pub fn apply_change(&mut self, event: SessionEvent, session: Option<Session>) {
        log::debug!("view router: {event:?}, session present: {}", session.is_some());
        self.session = session;
    }

    #[must_use]
    pub fn screen(&self) -> Screen {
        match (self.resolved, &self.session) {
            (false, _) => Screen::Loading,
            (true, None) => Screen::Login,
            (true, Some(_)) => Screen::Patients,
        }
    }

    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }
}
