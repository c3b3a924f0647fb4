//! List query model: sorting, page windows, and pagination metadata.

use super::validation::{normalize_limit, normalize_page};
use super::{Task, TaskStatus};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error returned when a sort column or direction is not recognised.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown sort key: {0}")]
pub struct ParseSortKeyError(pub String);

/// Column a task list can be ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    /// Store-assigned identifier.
    Id,
    /// Task title.
    Title,
    /// Task status.
    Status,
    /// Creation timestamp.
    #[default]
    CreatedAt,
    /// Last-modified timestamp.
    UpdatedAt,
}

impl SortField {
    /// Every sortable column.
    pub const ALL: [Self; 5] = [
        Self::Id,
        Self::Title,
        Self::Status,
        Self::CreatedAt,
        Self::UpdatedAt,
    ];

    /// Returns the column name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Title => "title",
            Self::Status => "status",
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
        }
    }
}

impl TryFrom<&str> for SortField {
    type Error = ParseSortKeyError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == value)
            .ok_or_else(|| ParseSortKeyError(value.to_owned()))
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Smallest first.
    Asc,
    /// Largest first.
    #[default]
    Desc,
}

impl SortOrder {
    /// Returns the SQL keyword for this direction.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl TryFrom<&str> for SortOrder {
    type Error = ParseSortKeyError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(ParseSortKeyError(value.to_owned())),
        }
    }
}

/// Ordering applied to a task list. Ties are broken by id in the same
/// direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskSort {
    /// Primary sort column.
    pub field: SortField,
    /// Sort direction.
    pub order: SortOrder,
}

impl TaskSort {
    /// Creates a sort specification.
    #[must_use]
    pub const fn new(field: SortField, order: SortOrder) -> Self {
        Self { field, order }
    }
}

/// A normalized page window.
///
/// `page` is at least 1 and `limit` lies in `1..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u64,
    limit: u32,
}

impl PageRequest {
    /// Builds a page window, coercing out-of-range values to defaults.
    #[must_use]
    pub fn new(page: i64, limit: i64) -> Self {
        Self {
            page: normalize_page(page),
            limit: normalize_limit(limit),
        }
    }

    /// Returns the 1-based page number.
    #[must_use]
    pub const fn page(self) -> u64 {
        self.page
    }

    /// Returns the page size.
    #[must_use]
    pub const fn limit(self) -> u32 {
        self.limit
    }

    /// Returns the number of rows preceding this page, `(page - 1) * limit`.
    #[must_use]
    pub fn offset(self) -> u64 {
        self.page
            .saturating_sub(1)
            .saturating_mul(u64::from(self.limit))
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, 0)
    }
}

/// Fully normalized and validated list query handed to the repository.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskListQuery {
    /// Page window.
    pub page: PageRequest,
    /// Status filter; `None` lists every status.
    pub status: Option<TaskStatus>,
    /// Ordering.
    pub sort: TaskSort,
}

/// One page of tasks plus the size of the whole filtered set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPage {
    /// Tasks inside the requested window. Empty past the last page.
    pub tasks: Vec<Task>,
    /// Number of tasks matching the filter, independent of the window.
    pub total: u64,
}

/// Pagination descriptor returned alongside list results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationMeta {
    /// Requested page number.
    pub page: u64,
    /// Requested page size.
    pub limit: u32,
    /// Matching rows under the active filter.
    pub total: u64,
    /// Page count, never less than 1.
    pub pages: u64,
    /// Whether a later page exists.
    pub has_next: bool,
    /// Whether an earlier page exists.
    pub has_prev: bool,
}

impl PaginationMeta {
    /// Derives pagination metadata for `request` over `total` matching rows.
    #[must_use]
    pub fn compute(request: PageRequest, total: u64) -> Self {
        let pages = total.div_ceil(u64::from(request.limit())).max(1);
        Self {
            page: request.page(),
            limit: request.limit(),
            total,
            pages,
            has_next: request.page() < pages,
            has_prev: request.page() > 1,
        }
    }
}
