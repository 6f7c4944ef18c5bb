//! Patient record model and the edit form draft.
//!
//! DESIGN
//! ======
//! `PatientFields` is the one payload shape for the form, for inserts, and for
//! updates. Store-assigned attributes (`id`, `created_at`) live only on
//! `Patient`, so a draft can never carry them to the store.

#[cfg(test)]
#[path = "patient_test.rs"]
mod patient_test;

use std::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

// =============================================================================
// IDENTIFIER
// =============================================================================

/// Store-assigned patient identifier.
///
/// Hosted tables use either integer identity columns or UUIDs, so both JSON
/// numbers and strings are accepted and held as text.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PatientId(String);

impl PatientId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PatientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for PatientId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::String(text) if !text.is_empty() => Ok(Self(text)),
            serde_json::Value::Number(number) if number.is_i64() || number.is_u64() => Ok(Self(number.to_string())),
            other => Err(D::Error::custom(format!("expected string or integer id, got {other}"))),
        }
    }
}

// =============================================================================
// FIELDS
// =============================================================================

/// One of the four editable patient fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PatientField {
    Name,
    Email,
    Phone,
    Procedure,
}

impl PatientField {
    /// Form order.
    pub const ALL: [Self; 4] = [Self::Name, Self::Email, Self::Phone, Self::Procedure];

    /// Placeholder / column label shown to front desk staff.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Nome",
            Self::Email => "Email",
            Self::Phone => "Telefone",
            Self::Procedure => "Procedimento",
        }
    }

    /// HTML input type; email gets the browser's native format check.
    #[must_use]
    pub fn input_type(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Name | Self::Phone | Self::Procedure => "text",
        }
    }
}

impl fmt::Display for PatientField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Procedure => "procedure",
        };
        f.write_str(name)
    }
}

/// The editable part of a patient record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PatientFields {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub procedure: String,
}

impl PatientFields {
    #[must_use]
    pub fn get(&self, field: PatientField) -> &str {
        match field {
            PatientField::Name => &self.name,
            PatientField::Email => &self.email,
            PatientField::Phone => &self.phone,
            PatientField::Procedure => &self.procedure,
        }
    }

    pub fn set(&mut self, field: PatientField, value: String) {
        let slot = match field {
            PatientField::Name => &mut self.name,
            PatientField::Email => &mut self.email,
            PatientField::Phone => &mut self.phone,
            PatientField::Procedure => &mut self.procedure,
        };
        *slot = value;
    }

    /// First field, in form order, that is empty or whitespace only.
    #[must_use]
    pub fn first_missing(&self) -> Option<PatientField> {
        PatientField::ALL.into_iter().find(|field| self.get(*field).trim().is_empty())
    }
}

// =============================================================================
// RECORD
// =============================================================================

/// A patient record as last listed from the store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Patient {
    pub id: PatientId,
    pub fields: PatientFields,
    /// Store-assigned creation timestamp; only meaningful for ordering.
    pub created_at: String,
}

// =============================================================================
// DRAFT
// =============================================================================

/// In-progress form contents plus the record being edited, if any.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormDraft {
    pub fields: PatientFields,
    pub editing_id: Option<PatientId>,
}

impl FormDraft {
    #[must_use]
    pub fn is_editing(&self) -> bool {
        self.editing_id.is_some()
    }

    /// Replace the draft wholesale with a record's editable fields.
    pub fn load(&mut self, patient: &Patient) {
        self.fields = patient.fields.clone();
        self.editing_id = Some(patient.id.clone());
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
