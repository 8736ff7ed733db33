use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Locale, Utc};

use cohortrole_domain::CohortRoleRule;

use crate::rule_store_ports::{RuleListQuery, RuleSortField};

use super::options::{OptionGroup, SelectOption};

/// Static description of a select field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectField {
    /// Submitted field name.
    pub name: &'static str,
    /// Field label.
    pub label: String,
    /// Help text shown next to the field.
    pub help: String,
    /// Whether a value must be selected.
    pub required: bool,
}

/// Data needed to render the add-rule form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddRuleForm {
    /// Page heading.
    pub heading: String,
    /// Cohort field description.
    pub cohort_field: SelectField,
    /// Cohort options grouped by context.
    pub cohort_groups: Vec<OptionGroup>,
    /// Role field description.
    pub role_field: SelectField,
    /// Role options.
    pub role_options: Vec<SelectOption>,
}

/// Values submitted from the add-rule form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AddRuleSubmission {
    /// Selected cohort, if any.
    pub cohort_id: Option<i64>,
    /// Selected role, if any.
    pub role_id: Option<i64>,
}

/// Error attached to a single form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Field name.
    pub field: &'static str,
    /// Localized message.
    pub message: String,
}

/// Result of submitting the add-rule form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddRuleOutcome {
    /// The rule was stored.
    Created {
        /// Stored rule.
        rule: CohortRoleRule,
        /// Localized confirmation.
        notification: String,
    },
    /// The submission was rejected with field errors.
    Rejected {
        /// Errors by field.
        errors: Vec<FieldError>,
    },
}

/// Listing column header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingColumn {
    /// Stable column key.
    pub key: &'static str,
    /// Localized header.
    pub label: String,
    /// Whether the listing can be sorted by this column.
    pub sortable: bool,
}

/// Display row of the rule listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleListingRow {
    /// Rule identifier.
    pub rule_id: i64,
    /// Cohort identifier.
    pub cohort_id: i64,
    /// Formatted cohort name.
    pub cohort_name: String,
    /// Label of the context the cohort lives in.
    pub cohort_context: String,
    /// Role identifier.
    pub role_id: i64,
    /// Role name resolved at System context.
    pub role_name: String,
    /// Creation time.
    pub time_created: DateTime<Utc>,
    /// Creation time formatted for display.
    pub time_created_label: String,
    /// Path of the delete action for this rule.
    pub delete_path: String,
}

/// Rendered rule listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleListing {
    /// Page heading.
    pub heading: String,
    /// Column headers in display order.
    pub columns: Vec<ListingColumn>,
    /// Rows on this page.
    pub rows: Vec<RuleListingRow>,
    /// Total number of rules.
    pub total: u64,
    /// Query the listing was produced for.
    pub query: RuleListQuery,
}

/// Data needed to confirm a deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteConfirmation {
    /// Page heading.
    pub heading: String,
    /// Confirmation prompt.
    pub prompt: String,
    /// Rule about to be deleted.
    pub row: RuleListingRow,
}

/// Returns the delete action path of a rule.
#[must_use]
pub fn delete_path(rule_id: i64) -> String {
    format!("/api/cohort-roles/{rule_id}")
}

/// Returns whether the listing can be sorted by a column key.
#[must_use]
pub fn is_sortable_column(key: &str) -> bool {
    key.parse::<RuleSortField>().is_ok()
}

/// Formats a timestamp with a `strftime` pattern in the given locale,
/// falling back to RFC 3339 when the pattern is malformed.
///
/// Unknown locale names format with the POSIX locale.
#[must_use]
pub fn format_timestamp(time: DateTime<Utc>, pattern: &str, locale: &str) -> String {
    let malformed = pattern.is_empty()
        || StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error));
    if malformed {
        return time.to_rfc3339();
    }

    let locale = Locale::try_from(locale.trim()).unwrap_or(Locale::POSIX);
    time.format_localized(pattern, locale).to_string()
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::{format_timestamp, is_sortable_column};

    #[test]
    fn timestamp_uses_pattern() {
        let Some(time) = Utc.with_ymd_and_hms(2025, 3, 1, 9, 5, 0).single() else {
            panic!("valid timestamp");
        };

        assert_eq!(
            format_timestamp(time, "%d %B %Y, %H:%M", "en_US"),
            "01 March 2025, 09:05"
        );
    }

    #[test]
    fn month_names_follow_locale() {
        let Some(time) = Utc.with_ymd_and_hms(2025, 3, 1, 9, 5, 0).single() else {
            panic!("valid timestamp");
        };

        assert_eq!(
            format_timestamp(time, "%d. %B %Y, %H:%M", "de_DE"),
            "01. März 2025, 09:05"
        );
        assert_eq!(
            format_timestamp(time, "%d %B %Y", "[[datelocale]]"),
            "01 March 2025"
        );
    }

    #[test]
    fn malformed_pattern_falls_back_to_rfc3339() {
        let Some(time) = Utc.with_ymd_and_hms(2025, 3, 1, 9, 5, 0).single() else {
            panic!("valid timestamp");
        };

        assert_eq!(format_timestamp(time, "%Q", "en_US"), "2025-03-01T09:05:00+00:00");
    }

    #[test]
    fn context_and_edit_columns_are_not_sortable() {
        assert!(is_sortable_column("timecreated"));
        assert!(!is_sortable_column("cohortcontext"));
        assert!(!is_sortable_column("edit"));
    }
}
