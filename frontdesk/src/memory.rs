//! In-memory collaborators for tests.
//!
//! Each backend can be told to fail its next call, which is how the
//! failure-tolerance paths of the screen and session manager are exercised.

use std::future::Future;
use std::pin::Pin;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::task::{Context, Poll};

use async_trait::async_trait;

use crate::error::{AuthError, StoreError};
use crate::patient::{Patient, PatientFields, PatientId};
use crate::session::{AuthService, Session, SessionStorage, SessionUser};
use crate::store::PatientStore;

fn guard<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// =============================================================================
// PATIENT STORE
// =============================================================================

#[derive(Default)]
struct StoreInner {
    rows: Vec<(u64, Patient)>,
    next_seq: u64,
    fail_next: Option<StoreError>,
}

/// Patient table kept in a `Vec`, ordered by insertion sequence.
#[derive(Default)]
pub struct MemoryPatientStore {
    inner: Mutex<StoreInner>,
}

impl MemoryPatientStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next call (of any kind) fail with `error`.
    pub fn fail_next(&self, error: StoreError) {
        guard(&self.inner).fail_next = Some(error);
    }

    /// Overwrite a row behind the screen's back, as another desk would.
    pub fn overwrite(&self, id: &PatientId, fields: PatientFields) {
        if let Some((_, row)) = guard(&self.inner).rows.iter_mut().find(|(_, row)| &row.id == id) {
            row.fields = fields;
        }
    }

    fn take_failure(inner: &mut StoreInner) -> Result<(), StoreError> {
        inner.fail_next.take().map_or(Ok(()), Err)
    }
}

#[async_trait(?Send)]
impl PatientStore for MemoryPatientStore {
    async fn list(&self) -> Result<Vec<Patient>, StoreError> {
        let mut inner = guard(&self.inner);
        Self::take_failure(&mut inner)?;
        let mut rows = inner.rows.clone();
        rows.sort_by(|(a, _), (b, _)| b.cmp(a));
        Ok(rows.into_iter().map(|(_, row)| row).collect())
    }

    async fn insert(&self, fields: &PatientFields) -> Result<Patient, StoreError> {
        let mut inner = guard(&self.inner);
        Self::take_failure(&mut inner)?;
        inner.next_seq += 1;
        let seq = inner.next_seq;
        let patient = Patient {
            id: PatientId::new(seq.to_string()),
            fields: fields.clone(),
            created_at: format!("2025-01-01T00:00:00.{seq:06}+00:00"),
        };
        inner.rows.push((seq, patient.clone()));
        Ok(patient)
    }

    async fn update(&self, id: &PatientId, fields: &PatientFields) -> Result<Patient, StoreError> {
        let mut inner = guard(&self.inner);
        Self::take_failure(&mut inner)?;
        let (_, row) = inner
            .rows
            .iter_mut()
            .find(|(_, row)| &row.id == id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        row.fields = fields.clone();
        Ok(row.clone())
    }

    async fn delete(&self, id: &PatientId) -> Result<(), StoreError> {
        let mut inner = guard(&self.inner);
        Self::take_failure(&mut inner)?;
        inner.rows.retain(|(_, row)| &row.id != id);
        Ok(())
    }
}

// =============================================================================
// AUTH
// =============================================================================

#[derive(Default)]
struct AuthInner {
    issued: u64,
    fail_next: Option<AuthError>,
    pause_next_refresh: bool,
    sign_outs: Vec<String>,
}

/// Pending once, then ready: lets a concurrent task run mid-call.
struct YieldOnce(bool);

impl Future for YieldOnce {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.0 {
            return Poll::Ready(());
        }
        self.0 = true;
        cx.waker().wake_by_ref();
        Poll::Pending
    }
}

/// Auth service with one fixed account. Issued sessions expire `ttl` seconds
/// after `now`.
pub struct MemoryAuth {
    email: String,
    password: String,
    now: i64,
    ttl: i64,
    inner: Mutex<AuthInner>,
}

impl MemoryAuth {
    #[must_use]
    pub fn new(email: &str, password: &str, now: i64, ttl: i64) -> Self {
        Self { email: email.to_owned(), password: password.to_owned(), now, ttl, inner: Mutex::default() }
    }

    pub fn fail_next(&self, error: AuthError) {
        guard(&self.inner).fail_next = Some(error);
    }

    /// Make the next `refresh` suspend once before answering.
    pub fn pause_next_refresh(&self) {
        guard(&self.inner).pause_next_refresh = true;
    }

    /// Access tokens passed to `sign_out`, in call order.
    #[must_use]
    pub fn sign_outs(&self) -> Vec<String> {
        guard(&self.inner).sign_outs.clone()
    }

    /// A session as this service would issue it, for seeding storage.
    #[must_use]
    pub fn issue(&self) -> Session {
        let mut inner = guard(&self.inner);
        inner.issued += 1;
        Session {
            access_token: format!("access-{}", inner.issued),
            refresh_token: format!("refresh-{}", inner.issued),
            expires_at: self.now + self.ttl,
            user: SessionUser { id: "user-1".to_owned(), email: Some(self.email.clone()) },
        }
    }

    fn take_failure(&self) -> Result<(), AuthError> {
        guard(&self.inner).fail_next.take().map_or(Ok(()), Err)
    }
}

#[async_trait(?Send)]
impl AuthService for MemoryAuth {
    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        self.take_failure()?;
        if email != self.email || password != self.password {
            return Err(AuthError::Rejected { status: 400, message: "Invalid login credentials".to_owned() });
        }
        Ok(self.issue())
    }

    async fn refresh(&self, refresh_token: &str) -> Result<Session, AuthError> {
        let pause = std::mem::take(&mut guard(&self.inner).pause_next_refresh);
        if pause {
            YieldOnce(false).await;
        }
        self.take_failure()?;
        if !refresh_token.starts_with("refresh-") {
            return Err(AuthError::Rejected { status: 400, message: "Invalid Refresh Token".to_owned() });
        }
        Ok(self.issue())
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError> {
        self.take_failure()?;
        guard(&self.inner).sign_outs.push(access_token.to_owned());
        Ok(())
    }
}

// =============================================================================
// SESSION STORAGE
// =============================================================================

/// Single-slot session storage.
#[derive(Default)]
pub struct MemorySessionStorage {
    slot: Mutex<Option<Session>>,
}

impl MemorySessionStorage {
    #[must_use]
    pub fn with_session(session: Session) -> Self {
        Self { slot: Mutex::new(Some(session)) }
    }
}

impl SessionStorage for MemorySessionStorage {
    fn load(&self) -> Option<Session> {
        guard(&self.slot).clone()
    }

    fn save(&self, session: &Session) {
        *guard(&self.slot) = Some(session.clone());
    }

    fn clear(&self) {
        *guard(&self.slot) = None;
    }
}
