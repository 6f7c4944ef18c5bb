//! Session manager wrapping the hosted auth service.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session gate owns one `SessionManager` and exactly one change
//! subscription for its lifetime. Login, logout and token refresh all flow
//! through here and are announced to subscribers as `SessionEvent`s; nothing
//! else in the app holds session state of its own.
//!
//! DESIGN
//! ======
//! The listener registry is `Arc<Mutex<_>>` so the manager and its
//! subscriptions are `Send + Sync` and can sit in UI contexts and cleanup
//! closures. Handlers are cloned out of the registry before being invoked, so
//! a handler may subscribe or unsubscribe without deadlocking.
//!
//! Sign-in and sign-out bump an epoch. A refresh whose response arrives after
//! a bump, or after the stored refresh token changed, is dropped without
//! saving or emitting, so a late refresh can never resurrect a signed-out
//! session.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::AuthError;

/// Seconds before expiry at which a session is refreshed.
pub const REFRESH_MARGIN_SECS: i64 = 60;

// =============================================================================
// SESSION
// =============================================================================

/// Identity attached to a session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    pub email: Option<String>,
}

/// An authenticated session issued by the auth service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    /// Expiry in Unix seconds.
    pub expires_at: i64,
    pub user: SessionUser,
}

impl Session {
    /// Whether the access token is expired or about to be.
    #[must_use]
    pub fn needs_refresh(&self, now: i64) -> bool {
        now + REFRESH_MARGIN_SECS >= self.expires_at
    }
}

/// What caused a session change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    SignedIn,
    SignedOut,
    TokenRefreshed,
}

// =============================================================================
// COLLABORATORS
// =============================================================================

/// Persistence for the current session across page reloads.
pub trait SessionStorage: Send + Sync {
    fn load(&self) -> Option<Session>;
    fn save(&self, session: &Session);
    fn clear(&self);
}

/// The hosted auth service.
#[async_trait(?Send)]
pub trait AuthService {
    /// Exchange email + password for a session.
    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session, AuthError>;

    /// Exchange a refresh token for a new session.
    async fn refresh(&self, refresh_token: &str) -> Result<Session, AuthError>;

    /// Revoke the session server-side.
    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError>;
}

#[async_trait(?Send)]
impl<T: AuthService + ?Sized> AuthService for Arc<T> {
    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        (**self).sign_in_with_password(email, password).await
    }

    async fn refresh(&self, refresh_token: &str) -> Result<Session, AuthError> {
        (**self).refresh(refresh_token).await
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError> {
        (**self).sign_out(access_token).await
    }
}

// =============================================================================
// LISTENERS
// =============================================================================

type Handler = Arc<dyn Fn(SessionEvent, Option<&Session>) + Send + Sync>;

#[derive(Default)]
struct Listeners {
    next_id: u64,
    handlers: Vec<(u64, Handler)>,
}

fn lock(listeners: &Mutex<Listeners>) -> MutexGuard<'_, Listeners> {
    listeners.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Handle for one registered change handler.
///
/// `unsubscribe` consumes the handle, so a subscription is released at most
/// once. Dropping the handle without unsubscribing leaves the handler
/// registered for as long as the manager lives.
#[must_use = "keep the subscription and call `unsubscribe` on teardown"]
pub struct Subscription {
    id: u64,
    listeners: Weak<Mutex<Listeners>>,
}

impl Subscription {
    pub fn unsubscribe(self) {
        if let Some(listeners) = self.listeners.upgrade() {
            lock(&listeners).handlers.retain(|(id, _)| *id != self.id);
        }
    }
}

// =============================================================================
// MANAGER
// =============================================================================

/// Current-session access, change notification, and sign-in/out.
#[derive(Clone)]
pub struct SessionManager<A> {
    auth: A,
    storage: Arc<dyn SessionStorage>,
    listeners: Arc<Mutex<Listeners>>,
    epoch: Arc<AtomicU64>,
    clock: fn() -> i64,
}

impl<A: AuthService> SessionManager<A> {
    /// `clock` returns the current Unix time in seconds.
    pub fn new(auth: A, storage: Arc<dyn SessionStorage>, clock: fn() -> i64) -> Self {
        Self { auth, storage, listeners: Arc::default(), epoch: Arc::default(), clock }
    }

    /// Resolve the session persisted from a previous page load.
    ///
    /// A stale session is refreshed first. A refresh the auth service rejects
    /// drops the stored session; a refresh that fails in transit keeps it for
    /// the next attempt.
    ///
    /// # Errors
    ///
    /// Returns the refresh failure when the stored session is stale and
    /// cannot be renewed.
    pub async fn get_current_session(&self) -> Result<Option<Session>, AuthError> {
        let Some(stored) = self.storage.load() else {
            return Ok(None);
        };
        if !stored.needs_refresh((self.clock)()) {
            return Ok(Some(stored));
        }
        let epoch = self.epoch.load(Ordering::SeqCst);
        let result = self.auth.refresh(&stored.refresh_token).await;
        if self.superseded(epoch, &stored.refresh_token) {
            return Ok(self.storage.load());
        }
        match result {
            Ok(fresh) => {
                self.storage.save(&fresh);
                self.emit(SessionEvent::TokenRefreshed, Some(&fresh));
                Ok(Some(fresh))
            }
            Err(e) => {
                if e.is_rejection() {
                    self.storage.clear();
                }
                Err(e)
            }
        }
    }

    /// Register `handler` for every subsequent session change.
    pub fn on_session_change<F>(&self, handler: F) -> Subscription
    where
        F: Fn(SessionEvent, Option<&Session>) + Send + Sync + 'static,
    {
        let mut listeners = lock(&self.listeners);
        let id = listeners.next_id;
        listeners.next_id += 1;
        listeners.handlers.push((id, Arc::new(handler)));
        Subscription { id, listeners: Arc::downgrade(&self.listeners) }
    }

    /// Number of registered change handlers.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        lock(&self.listeners).handlers.len()
    }

    /// # Errors
    ///
    /// Returns the auth service failure; no event is emitted in that case.
    pub async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let session = self.auth.sign_in_with_password(email, password).await?;
        self.epoch.fetch_add(1, Ordering::SeqCst);
        self.storage.save(&session);
        log::info!("signed in as {}", session.user.id);
        self.emit(SessionEvent::SignedIn, Some(&session));
        Ok(session)
    }

    /// Renew the stored session with its refresh token.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::NoSession`] when nothing is stored, or the auth
    /// service failure. A rejected refresh also signs the user out. When a
    /// sign-in or sign-out lands while the refresh is in flight, its outcome
    /// is dropped and the session stored by then is returned instead.
    pub async fn refresh_session(&self) -> Result<Session, AuthError> {
        let stored = self.storage.load().ok_or(AuthError::NoSession)?;
        let epoch = self.epoch.load(Ordering::SeqCst);
        let result = self.auth.refresh(&stored.refresh_token).await;
        if self.superseded(epoch, &stored.refresh_token) {
            return self.storage.load().ok_or(AuthError::NoSession);
        }
        match result {
            Ok(fresh) => {
                self.storage.save(&fresh);
                self.emit(SessionEvent::TokenRefreshed, Some(&fresh));
                Ok(fresh)
            }
            Err(e) => {
                if e.is_rejection() {
                    self.storage.clear();
                    self.emit(SessionEvent::SignedOut, None);
                }
                Err(e)
            }
        }
    }

    /// Refresh only when the stored session is close to expiry.
    ///
    /// # Errors
    ///
    /// Same as [`Self::refresh_session`].
    pub async fn refresh_if_due(&self) -> Result<Option<Session>, AuthError> {
        match self.storage.load() {
            Some(stored) if stored.needs_refresh((self.clock)()) => self.refresh_session().await.map(Some),
            _ => Ok(None),
        }
    }

    /// End the current session. The local session is always dropped and
    /// `SignedOut` always emitted, even if the server call fails.
    pub async fn sign_out(&self) {
        self.epoch.fetch_add(1, Ordering::SeqCst);
        if let Some(stored) = self.storage.load() {
            if let Err(e) = self.auth.sign_out(&stored.access_token).await {
                log::warn!("sign-out request failed: {e}");
            }
        }
        self.storage.clear();
        self.emit(SessionEvent::SignedOut, None);
    }

    /// Whether a sign-in/out or another refresh replaced the session a
    /// refresh started from.
    fn superseded(&self, epoch: u64, refresh_token: &str) -> bool {
        let stale = self.epoch.load(Ordering::SeqCst) != epoch
            || self.storage.load().is_none_or(|current| current.refresh_token != refresh_token);
        if stale {
            log::debug!("dropping refresh superseded by a newer session change");
        }
        stale
    }

    fn emit(&self, event: SessionEvent, session: Option<&Session>) {
        let handlers: Vec<Handler> = lock(&self.listeners)
            .handlers
            .iter()
            .map(|(_, handler)| Arc::clone(handler))
            .collect();
        log::debug!("session event {event:?} -> {} listener(s)", handlers.len());
        for handler in handlers {
            handler(event, session);
        }
    }
}
