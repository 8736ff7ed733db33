use std::str::FromStr;

use chrono::SecondsFormat;
use cohortrole_application::{
    AddRuleForm, DeleteConfirmation, FieldError, ListingColumn, OptionGroup, RuleListQuery,
    RuleListing, RuleListingRow, RuleSortField, SelectField, SelectOption, SortDirection,
};
use cohortrole_core::AppError;
use cohortrole_domain::CohortRoleRule;

use super::types::{
    AddRuleFormResponse, CohortRoleRuleResponse, DeleteConfirmationResponse, FieldErrorResponse,
    ListCohortRolesQuery, ListingColumnResponse, OptionGroupResponse, RuleListingResponse,
    RuleListingRowResponse, SelectFieldResponse, SelectOptionResponse,
};

impl TryFrom<ListCohortRolesQuery> for RuleListQuery {
    type Error = AppError;

    fn try_from(value: ListCohortRolesQuery) -> Result<Self, Self::Error> {
        let defaults = Self::default();

        Ok(Self {
            sort: value
                .sort
                .as_deref()
                .map(RuleSortField::from_str)
                .transpose()?
                .unwrap_or(defaults.sort),
            direction: value
                .direction
                .as_deref()
                .map(SortDirection::from_str)
                .transpose()?
                .unwrap_or(defaults.direction),
            page: value.page.unwrap_or(defaults.page),
            per_page: value.per_page.unwrap_or(defaults.per_page),
        })
    }
}

impl From<CohortRoleRule> for CohortRoleRuleResponse {
    fn from(rule: CohortRoleRule) -> Self {
        Self {
            id: rule.id,
            cohort_id: rule.cohort_id,
            role_id: rule.role_id,
            time_created: rule.time_created.to_rfc3339_opts(SecondsFormat::Secs, true),
            time_modified: rule.time_modified.to_rfc3339_opts(SecondsFormat::Secs, true),
            user_modified: rule.user_modified,
        }
    }
}

impl From<FieldError> for FieldErrorResponse {
    fn from(error: FieldError) -> Self {
        Self {
            field: error.field.to_owned(),
            message: error.message,
        }
    }
}

impl From<SelectOption> for SelectOptionResponse {
    fn from(option: SelectOption) -> Self {
        Self {
            value: option.value,
            label: option.label,
        }
    }
}

impl From<OptionGroup> for OptionGroupResponse {
    fn from(group: OptionGroup) -> Self {
        Self {
            label: group.label,
            options: group.options.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<SelectField> for SelectFieldResponse {
    fn from(field: SelectField) -> Self {
        Self {
            name: field.name.to_owned(),
            label: field.label,
            help: field.help,
            required: field.required,
        }
    }
}

impl From<AddRuleForm> for AddRuleFormResponse {
    fn from(form: AddRuleForm) -> Self {
        Self {
            heading: form.heading,
            cohort_field: form.cohort_field.into(),
            cohort_groups: form.cohort_groups.into_iter().map(Into::into).collect(),
            role_field: form.role_field.into(),
            role_options: form.role_options.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<ListingColumn> for ListingColumnResponse {
    fn from(column: ListingColumn) -> Self {
        Self {
            key: column.key.to_owned(),
            label: column.label,
            sortable: column.sortable,
        }
    }
}

impl From<RuleListingRow> for RuleListingRowResponse {
    fn from(row: RuleListingRow) -> Self {
        Self {
            rule_id: row.rule_id,
            cohort_id: row.cohort_id,
            cohort_name: row.cohort_name,
            cohort_context: row.cohort_context,
            role_id: row.role_id,
            role_name: row.role_name,
            time_created: row.time_created.to_rfc3339_opts(SecondsFormat::Secs, true),
            time_created_label: row.time_created_label,
            delete_path: row.delete_path,
        }
    }
}

impl From<RuleListing> for RuleListingResponse {
    fn from(listing: RuleListing) -> Self {
        Self {
            heading: listing.heading,
            columns: listing.columns.into_iter().map(Into::into).collect(),
            rows: listing.rows.into_iter().map(Into::into).collect(),
            total: listing.total,
            sort: listing.query.sort.as_str().to_owned(),
            direction: listing.query.direction.as_str().to_owned(),
            page: listing.query.page,
            per_page: listing.query.per_page,
        }
    }
}

impl From<DeleteConfirmation> for DeleteConfirmationResponse {
    fn from(confirmation: DeleteConfirmation) -> Self {
        Self {
            heading: confirmation.heading,
            prompt: confirmation.prompt,
            row: confirmation.row.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use cohortrole_application::{RuleListQuery, RuleSortField, SortDirection};
    use cohortrole_core::AppError;

    use super::ListCohortRolesQuery;

    #[test]
    fn empty_query_uses_listing_defaults() {
        let query = RuleListQuery::try_from(ListCohortRolesQuery::default());

        assert!(matches!(query, Ok(query) if query == RuleListQuery::default()));
    }

    #[test]
    fn query_values_are_parsed() {
        let query = RuleListQuery::try_from(ListCohortRolesQuery {
            sort: Some("role".to_owned()),
            direction: Some("asc".to_owned()),
            page: Some(2),
            per_page: Some(10),
        });

        assert!(matches!(
            query,
            Ok(RuleListQuery {
                sort: RuleSortField::Role,
                direction: SortDirection::Ascending,
                page: 2,
                per_page: 10,
            })
        ));
    }

    #[test]
    fn unknown_sort_column_is_rejected() {
        let query = RuleListQuery::try_from(ListCohortRolesQuery {
            sort: Some("edit".to_owned()),
            ..ListCohortRolesQuery::default()
        });

        assert!(matches!(query, Err(AppError::Validation(_))));
    }
}
