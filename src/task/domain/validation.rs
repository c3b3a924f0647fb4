//! Field and query-parameter validation rules.
//!
//! Every function here is pure: failures are reported as
//! [`ValidationError`] values and list parameters are normalized rather than
//! rejected.

use super::{SortField, SortOrder, TaskField, TaskStatus, ValidationError};

/// Longest permitted title, counted in characters after trimming.
pub const MAX_TITLE_CHARS: usize = 255;

/// Longest permitted description, counted in characters before trimming.
pub const MAX_DESCRIPTION_CHARS: usize = 1000;

/// Largest page size a list query may request.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Page size used when the requested one is out of range.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Checks that a title is non-blank and at most [`MAX_TITLE_CHARS`] long
/// once surrounding whitespace is removed.
///
/// # Errors
///
/// Returns a [`ValidationError`] on field `title`.
pub fn validate_title(title: &str) -> Result<(), ValidationError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new(TaskField::Title, "title is required"));
    }
    if trimmed.chars().count() > MAX_TITLE_CHARS {
        return Err(ValidationError::new(
            TaskField::Title,
            "title must be less than 255 characters",
        ));
    }
    Ok(())
}

/// Checks that a description is at most [`MAX_DESCRIPTION_CHARS`] long.
///
/// # Errors
///
/// Returns a [`ValidationError`] on field `description`.
pub fn validate_description(description: &str) -> Result<(), ValidationError> {
    if description.chars().count() > MAX_DESCRIPTION_CHARS {
        return Err(ValidationError::new(
            TaskField::Description,
            "description must be less than 1000 characters",
        ));
    }
    Ok(())
}

/// Parses an optional status value.
///
/// An empty string yields `None` so the caller can apply its own default.
///
/// # Errors
///
/// Returns a [`ValidationError`] on field `status` for any non-empty value
/// outside the status enumeration.
pub fn validate_status(status: &str) -> Result<Option<TaskStatus>, ValidationError> {
    if status.is_empty() {
        return Ok(None);
    }
    TaskStatus::try_from(status).map(Some).map_err(|_| {
        ValidationError::new(
            TaskField::Status,
            "status must be one of: pending, in_progress, completed, closed",
        )
    })
}

/// Parses an optional sort column.
///
/// An empty string yields `None`, meaning the default column.
///
/// # Errors
///
/// Returns a [`ValidationError`] on field `sort_by` for unknown columns.
pub fn validate_sort_field(name: &str) -> Result<Option<SortField>, ValidationError> {
    if name.is_empty() {
        return Ok(None);
    }
    SortField::try_from(name)
        .map(Some)
        .map_err(|_| ValidationError::new(TaskField::SortBy, "invalid sort field"))
}

/// Coerces page numbers below 1 to 1.
#[must_use]
pub fn normalize_page(page: i64) -> u64 {
    u64::try_from(page).ok().filter(|&value| value >= 1).unwrap_or(1)
}

/// Coerces page sizes outside `1..=MAX_PAGE_SIZE` to [`DEFAULT_PAGE_SIZE`].
#[must_use]
pub fn normalize_limit(limit: i64) -> u32 {
    u32::try_from(limit)
        .ok()
        .filter(|value| (1..=MAX_PAGE_SIZE).contains(value))
        .unwrap_or(DEFAULT_PAGE_SIZE)
}

/// Coerces unset or unrecognised sort directions to descending.
#[must_use]
pub fn normalize_sort_order(order: &str) -> SortOrder {
    SortOrder::try_from(order).unwrap_or_default()
}
