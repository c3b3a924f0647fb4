//! Validated scalar field types for task records.

use super::validation::{validate_description, validate_title};
use super::ValidationError;
use serde::Serialize;
use std::fmt;

/// Trimmed, non-empty task title of at most 255 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TaskTitle(String);

impl TaskTitle {
    /// Validates and trims a raw title.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] on field `title` when the trimmed value
    /// is empty or too long.
    pub fn new(value: impl AsRef<str>) -> Result<Self, ValidationError> {
        let raw = value.as_ref();
        validate_title(raw)?;
        Ok(Self(raw.trim().to_owned()))
    }

    /// Returns the title as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TaskTitle {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Trimmed task description of at most 1000 characters. May be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TaskDescription(String);

impl TaskDescription {
    /// Validates and trims a raw description.
    ///
    /// The length limit applies to the value as supplied, before trimming.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] on field `description` when the value is
    /// too long.
    pub fn new(value: impl AsRef<str>) -> Result<Self, ValidationError> {
        let raw = value.as_ref();
        validate_description(raw)?;
        Ok(Self(raw.trim().to_owned()))
    }

    /// Returns the description as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TaskDescription {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
