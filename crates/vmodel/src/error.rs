use serde::Serialize;
use std::fmt;
use thiserror::Error;

use crate::value::Value;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Model does not have the property {key}")]
    UnknownField { key: String },

    #[error("No test registered for rule \"{rule}\" on field {field}")]
    UnknownRule { field: String, rule: String },

    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("Config error: {0}")]
    Config(String),
}

impl ModelError {
    pub fn unknown_field(key: impl Into<String>) -> Self {
        ModelError::UnknownField { key: key.into() }
    }
}

pub type Result<T> = std::result::Result<T, ModelError>;

/// What a failed rule reports: which field, which rule, what was attempted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleFailure {
    /// Field key; empty until the owning property stamps it.
    pub field: String,
    pub rule: String,
    pub value: Value,
    pub message: String,
}

impl fmt::Display for RuleFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.field.is_empty() {
            f.write_str(&self.message)
        } else {
            write!(f, "{}: {}", self.field, self.message)
        }
    }
}

/// A rejected write.
///
/// `Length` is split out so callers can special-case min/max-length
/// violations (e.g. to offer truncation) without matching on messages.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ValidationError {
    #[error("{0}")]
    Rule(RuleFailure),

    #[error("{0}")]
    Length(RuleFailure),
}

impl ValidationError {
    pub fn failure(&self) -> &RuleFailure {
        match self {
            ValidationError::Rule(f) | ValidationError::Length(f) => f,
        }
    }

    pub fn field(&self) -> &str {
        &self.failure().field
    }

    pub fn rule(&self) -> &str {
        &self.failure().rule
    }

    pub fn value(&self) -> &Value {
        &self.failure().value
    }

    pub fn message(&self) -> &str {
        &self.failure().message
    }

    pub fn is_length(&self) -> bool {
        matches!(self, ValidationError::Length(_))
    }

    /// Stamp the field key onto the payload.
    pub fn for_field(mut self, key: &str) -> Self {
        match &mut self {
            ValidationError::Rule(f) | ValidationError::Length(f) => f.field = key.to_string(),
        }
        self
    }
}

/// Failure reported by a [`crate::persist::SaveTransport`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Save failed: {message}")]
pub struct TransportError {
    pub status: Option<u16>,
    pub message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }
}
