//! Member domain model.
//!
//! # Responsibility
//! - Define the canonical person record of the family tree.
//! - Provide presence validation for user-entered names.
//!
//! # Invariants
//! - `id` is stable and never reused for another member.
//! - Members are never mutated in place once registered.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a member record.
///
/// Generated ids are UUID v4 strings, but imported snapshots may carry any
/// non-empty string.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(String);

impl MemberId {
    /// Generates a fresh unique identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for MemberId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MemberId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for MemberId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Validation errors for member records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberValidationError {
    EmptyId,
    EmptyFirstName,
    EmptyLastName,
}

impl Display for MemberValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "member id must not be empty"),
            Self::EmptyFirstName => write!(f, "first name must not be blank"),
            Self::EmptyLastName => write!(f, "last name must not be blank"),
        }
    }
}

impl Error for MemberValidationError {}

/// One person in the family tree.
///
/// Field names are serialized in camelCase to stay compatible with snapshots
/// written by the browser front end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: MemberId,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
}

impl Member {
    /// Creates a member with a freshly generated id.
    ///
    /// Names are trimmed. Call [`Member::validate`] before registering.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        birth_date: Option<NaiveDate>,
    ) -> Self {
        Self::with_id(MemberId::generate(), first_name, last_name, birth_date)
    }

    /// Creates a member with a caller-provided id.
    ///
    /// Used by import paths where identity already exists externally.
    pub fn with_id(
        id: MemberId,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        birth_date: Option<NaiveDate>,
    ) -> Self {
        Self {
            id,
            first_name: first_name.into().trim().to_string(),
            last_name: last_name.into().trim().to_string(),
            birth_date,
        }
    }

    /// Returns `"first last"`, the string used for display and search.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Checks basic presence of identity and names.
    pub fn validate(&self) -> Result<(), MemberValidationError> {
        if self.id.as_str().trim().is_empty() {
            return Err(MemberValidationError::EmptyId);
        }
        if self.first_name.trim().is_empty() {
            return Err(MemberValidationError::EmptyFirstName);
        }
        if self.last_name.trim().is_empty() {
            return Err(MemberValidationError::EmptyLastName);
        }
        Ok(())
    }
}
