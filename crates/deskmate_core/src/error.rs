//! Core error taxonomy.
//!
//! # Responsibility
//! - Classify every expected failure of core operations.
//! - Render each failure as a one-line user-facing message.
//!
//! # Invariants
//! - Valid-shaped input never produces an error outside this taxonomy.

use crate::model::field::FieldError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type CoreResult<T> = Result<T, CoreError>;

/// Entity kind referenced by lookup and uniqueness failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Contact,
    Phone,
    Note,
}

impl Entity {
    fn label(self) -> &'static str {
        match self {
            Self::Contact => "Contact",
            Self::Phone => "Phone number",
            Self::Note => "Note",
        }
    }
}

/// Error returned by core collections and services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Malformed field value.
    Validation(FieldError),
    /// Contact, phone or note is absent.
    NotFound { entity: Entity, key: String },
    /// Phone already on record, contact name taken or note title collision.
    Duplicate { entity: Entity, key: String },
    /// Wrong arity or shape of positional arguments.
    Argument(String),
    /// Invalid search field or empty query.
    Query(String),
}

impl CoreError {
    pub fn not_found(entity: Entity, key: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            key: key.into(),
        }
    }

    pub fn duplicate(entity: Entity, key: impl Into<String>) -> Self {
        Self::Duplicate {
            entity,
            key: key.into(),
        }
    }

    /// Stable short code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::NotFound { .. } => "not_found",
            Self::Duplicate { .. } => "duplicate",
            Self::Argument(_) => "argument",
            Self::Query(_) => "query",
        }
    }
}

impl Display for CoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound { entity, key } => write!(f, "{} {key} not found.", entity.label()),
            Self::Duplicate { entity, key } => {
                write!(f, "{} {key} already exists.", entity.label())
            }
            Self::Argument(message) => write!(f, "{message}"),
            Self::Query(message) => write!(f, "{message}"),
        }
    }
}

impl Error for CoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<FieldError> for CoreError {
    fn from(value: FieldError) -> Self {
        Self::Validation(value)
    }
}
