//! Comment types and submission validation

use std::fmt;

use serde::{Deserialize, Serialize};

/// A comment as returned by the remote service.
///
/// Only `name` and `message` are interpreted; anything else the service sends
/// back (ids, timestamps) rides along in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub name: String,
    pub message: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Comment {
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
            extra: serde_json::Map::new(),
        }
    }
}

/// A validated submission: both fields trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewComment {
    name: String,
    message: String,
}

impl NewComment {
    /// Trim and check both fields, collecting every failure.
    pub fn validate(name: &str, message: &str) -> Result<Self, ValidationErrors> {
        let name = name.trim();
        let message = message.trim();

        let mut errors = Vec::new();
        if name.is_empty() {
            errors.push(FieldError::Empty { field: "Name" });
        }
        if message.is_empty() {
            errors.push(FieldError::Empty { field: "Message" });
        }

        if !errors.is_empty() {
            return Err(ValidationErrors(errors));
        }

        Ok(Self {
            name: name.to_string(),
            message: message.to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// A single field failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// Field is empty (or only whitespace)
    Empty { field: &'static str },
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{} is required.", field),
        }
    }
}

/// Every failure from one validation pass; displays as a single line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }
}

impl From<Vec<FieldError>> for ValidationErrors {
    fn from(errors: Vec<FieldError>) -> Self {
        Self(errors)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .0
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ");
        f.write_str(&joined)
    }
}

impl std::error::Error for ValidationErrors {}
