use std::str::FromStr;

use cohortrole_core::AppError;
use cohortrole_domain::{Cohort, CohortRoleRule, Role};
use serde::{Deserialize, Serialize};

/// Default number of rows per listing page.
pub const DEFAULT_PAGE_SIZE: usize = 30;

/// Upper bound on the listing page size.
pub const MAX_PAGE_SIZE: usize = 500;

/// Sortable listing columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleSortField {
    /// Cohort name.
    Cohort,
    /// Role short name.
    Role,
    /// Rule creation time.
    TimeCreated,
}

impl RuleSortField {
    /// Returns the stable transport value of this column.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cohort => "cohort",
            Self::Role => "role",
            Self::TimeCreated => "timecreated",
        }
    }
}

impl FromStr for RuleSortField {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "cohort" => Ok(Self::Cohort),
            "role" => Ok(Self::Role),
            "timecreated" => Ok(Self::TimeCreated),
            _ => Err(AppError::Validation(format!(
                "column '{value}' is not sortable"
            ))),
        }
    }
}

/// Listing sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    /// Smallest first.
    Ascending,
    /// Largest first.
    Descending,
}

impl SortDirection {
    /// Returns the stable transport value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }
}

impl FromStr for SortDirection {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Ascending),
            "desc" => Ok(Self::Descending),
            _ => Err(AppError::Validation(format!(
                "unknown sort direction '{value}'"
            ))),
        }
    }
}

/// Sorting and offset pagination for the rule listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleListQuery {
    /// Column to sort by.
    pub sort: RuleSortField,
    /// Sort direction.
    pub direction: SortDirection,
    /// Zero-based page number.
    pub page: usize,
    /// Rows per page.
    pub per_page: usize,
}

impl RuleListQuery {
    /// Number of rows skipped before this page.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.page.saturating_mul(self.per_page)
    }

    /// Returns a copy with the page size clamped to `1..=MAX_PAGE_SIZE`.
    #[must_use]
    pub fn clamped(self) -> Self {
        Self {
            per_page: self.per_page.clamp(1, MAX_PAGE_SIZE),
            ..self
        }
    }
}

impl Default for RuleListQuery {
    fn default() -> Self {
        Self {
            sort: RuleSortField::TimeCreated,
            direction: SortDirection::Descending,
            page: 0,
            per_page: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Rule joined with the cohort and role it references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleListRow {
    /// Stored rule.
    pub rule: CohortRoleRule,
    /// Referenced cohort.
    pub cohort: Cohort,
    /// Referenced role.
    pub role: Role,
}

/// One page of the rule listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleListPage {
    /// Rows on this page.
    pub rows: Vec<RuleListRow>,
    /// Total number of listable rules.
    pub total: u64,
    /// Query the page was produced for.
    pub query: RuleListQuery,
}
