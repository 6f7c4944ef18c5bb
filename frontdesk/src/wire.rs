//! Wire mapping for the hosted backend (GoTrue-style auth under `/auth/v1`,
//! PostgREST-style data under `/rest/v1`).
//!
//! DESIGN
//! ======
//! Transports only move bytes. URL building, headers, request bodies, and
//! response decoding all live here so they can be tested without a browser.
//! Raw row and token shapes stay private to this module; callers get
//! [`Patient`] and [`Session`].

#[cfg(test)]
#[path = "wire_test.rs"]
mod wire_test;

use serde::{Deserialize, Serialize};

use crate::error::{AuthError, StoreError};
use crate::patient::{Patient, PatientFields, PatientId};
use crate::session::{Session, SessionUser};

/// Table holding patient rows.
pub const PATIENTS_TABLE: &str = "patients";

/// `Prefer` header value asking the data API to echo written rows.
pub const PREFER_REPRESENTATION: &str = "return=representation";

// =============================================================================
// CONFIG + ENDPOINTS
// =============================================================================

/// Where the hosted backend lives and the public key every request carries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendConfig {
    pub url: String,
    pub anon_key: String,
}

/// Token endpoint grant types.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Grant {
    Password,
    RefreshToken,
}

impl BackendConfig {
    #[must_use]
    pub fn new(url: &str, anon_key: &str) -> Self {
        Self { url: url.trim().trim_end_matches('/').to_owned(), anon_key: anon_key.trim().to_owned() }
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{PATIENTS_TABLE}", self.url)
    }

    /// All rows, newest first.
    #[must_use]
    pub fn list_url(&self) -> String {
        format!("{}?select=*&order=created_at.desc", self.table_url())
    }

    #[must_use]
    pub fn insert_url(&self) -> String {
        self.table_url()
    }

    /// Filter addressing exactly one row, used by update and delete.
    #[must_use]
    pub fn row_url(&self, id: &PatientId) -> String {
        format!("{}?id=eq.{}", self.table_url(), urlencoding::encode(id.as_str()))
    }

    #[must_use]
    pub fn token_url(&self, grant: Grant) -> String {
        let grant = match grant {
            Grant::Password => "password",
            Grant::RefreshToken => "refresh_token",
        };
        format!("{}/auth/v1/token?grant_type={grant}", self.url)
    }

    #[must_use]
    pub fn logout_url(&self) -> String {
        format!("{}/auth/v1/logout", self.url)
    }

    /// `localStorage` key for the persisted session: `sb-<project-ref>-auth-token`,
    /// where the project ref is the first label of the backend host.
    #[must_use]
    pub fn storage_key(&self) -> String {
        let without_scheme = self.url.split_once("://").map_or(self.url.as_str(), |(_, rest)| rest);
        let host = without_scheme.split(['/', ':']).next().unwrap_or_default();
        let project = host.split('.').next().unwrap_or_default();
        format!("sb-{project}-auth-token")
    }
}

/// `Authorization` header value for an access token.
#[must_use]
pub fn bearer(access_token: &str) -> String {
    format!("Bearer {access_token}")
}

// =============================================================================
// REQUEST BODIES
// =============================================================================

/// JSON body for the password grant.
#[must_use]
pub fn password_grant_body(email: &str, password: &str) -> String {
    serde_json::json!({ "email": email, "password": password }).to_string()
}

/// JSON body for the refresh-token grant.
#[must_use]
pub fn refresh_grant_body(refresh_token: &str) -> String {
    serde_json::json!({ "refresh_token": refresh_token }).to_string()
}

/// Insert body: a one-element array of rows.
#[must_use]
pub fn insert_body(fields: &PatientFields) -> String {
    serde_json::json!([fields]).to_string()
}

/// Update body: the full set of editable columns.
#[must_use]
pub fn update_body(fields: &PatientFields) -> String {
    serde_json::json!(fields).to_string()
}

// =============================================================================
// ROWS
// =============================================================================

#[derive(Deserialize)]
struct PatientRow {
    id: PatientId,
    name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    procedure: Option<String>,
    created_at: Option<String>,
}

impl From<PatientRow> for Patient {
    fn from(row: PatientRow) -> Self {
        Self {
            id: row.id,
            fields: PatientFields {
                name: row.name.unwrap_or_default(),
                email: row.email.unwrap_or_default(),
                phone: row.phone.unwrap_or_default(),
                procedure: row.procedure.unwrap_or_default(),
            },
            created_at: row.created_at.unwrap_or_default(),
        }
    }
}

/// Decode a list response.
///
/// # Errors
///
/// [`StoreError::Parse`] when the body is not an array of rows.
pub fn parse_rows(body: &str) -> Result<Vec<Patient>, StoreError> {
    let rows: Vec<PatientRow> = serde_json::from_str(body).map_err(|e| StoreError::Parse(e.to_string()))?;
    Ok(rows.into_iter().map(Patient::from).collect())
}

/// Decode the single row echoed by an insert.
///
/// # Errors
///
/// [`StoreError::Parse`] when the body is malformed or empty.
pub fn parse_inserted(body: &str) -> Result<Patient, StoreError> {
    parse_rows(body)?
        .into_iter()
        .next()
        .ok_or_else(|| StoreError::Parse("insert returned no rows".to_owned()))
}

/// Decode the row echoed by an update of `id`.
///
/// # Errors
///
/// [`StoreError::NotFound`] when the filter matched nothing;
/// [`StoreError::Parse`] when the body is malformed.
pub fn parse_updated(body: &str, id: &PatientId) -> Result<Patient, StoreError> {
    parse_rows(body)?.into_iter().next().ok_or_else(|| StoreError::NotFound(id.clone()))
}

// =============================================================================
// TOKENS
// =============================================================================

#[derive(Deserialize)]
struct TokenUser {
    id: String,
    email: Option<String>,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
    expires_in: i64,
    expires_at: Option<i64>,
    user: TokenUser,
}

/// Decode a token grant response into a [`Session`]. `now` (Unix seconds)
/// anchors `expires_in` when the service omits `expires_at`.
///
/// # Errors
///
/// [`AuthError::Parse`] when the body is not a token response.
pub fn parse_session(body: &str, now: i64) -> Result<Session, AuthError> {
    let token: TokenResponse = serde_json::from_str(body).map_err(|e| AuthError::Parse(e.to_string()))?;
    Ok(Session {
        access_token: token.access_token,
        refresh_token: token.refresh_token,
        expires_at: token.expires_at.unwrap_or(now + token.expires_in),
        user: SessionUser { id: token.user.id, email: token.user.email },
    })
}

// =============================================================================
// ERRORS
// =============================================================================

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    msg: Option<String>,
    error_description: Option<String>,
    error: Option<String>,
}

/// Human-readable message from an error response body.
#[must_use]
pub fn rejection_message(status: u16, body: &str) -> String {
    let parsed = serde_json::from_str::<ErrorBody>(body).ok();
    let message = parsed.and_then(|b| b.message.or(b.msg).or(b.error_description).or(b.error));
    match message {
        Some(message) => message,
        None if body.trim().is_empty() => format!("HTTP {status}"),
        None => body.trim().to_owned(),
    }
}

#[must_use]
pub fn store_rejection(status: u16, body: &str) -> StoreError {
    StoreError::Rejected { status, message: rejection_message(status, body) }
}

#[must_use]
pub fn auth_rejection(status: u16, body: &str) -> AuthError {
    AuthError::Rejected { status, message: rejection_message(status, body) }
}
