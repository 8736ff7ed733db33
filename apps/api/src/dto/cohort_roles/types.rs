use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Query string of the rule listing.
#[derive(Debug, Default, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/list-cohort-roles-query.ts"
)]
pub struct ListCohortRolesQuery {
    /// One of `cohort`, `role` or `timecreated`.
    pub sort: Option<String>,
    /// `asc` or `desc`.
    pub direction: Option<String>,
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

/// Incoming payload of the add-rule form.
#[derive(Debug, Default, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/create-cohort-role-request.ts"
)]
pub struct CreateCohortRoleRequest {
    #[serde(rename = "cohortid")]
    pub cohort_id: Option<i64>,
    #[serde(rename = "roleid")]
    pub role_id: Option<i64>,
}

/// API representation of a stored rule.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/cohort-role-rule-response.ts"
)]
pub struct CohortRoleRuleResponse {
    pub id: i64,
    pub cohort_id: i64,
    pub role_id: i64,
    pub time_created: String,
    pub time_modified: String,
    pub user_modified: i64,
}

/// Response after a rule was created.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/create-cohort-role-response.ts"
)]
pub struct CreateCohortRoleResponse {
    pub rule: CohortRoleRuleResponse,
    pub notification: String,
}

/// Error attached to one form field.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/field-error-response.ts"
)]
pub struct FieldErrorResponse {
    pub field: String,
    pub message: String,
}

/// Response for a rejected add-rule submission.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/validation-errors-response.ts"
)]
pub struct ValidationErrorsResponse {
    pub errors: Vec<FieldErrorResponse>,
}

/// One selectable option.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/select-option-response.ts"
)]
pub struct SelectOptionResponse {
    pub value: i64,
    pub label: String,
}

/// Options sharing a group heading.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/option-group-response.ts"
)]
pub struct OptionGroupResponse {
    pub label: String,
    pub options: Vec<SelectOptionResponse>,
}

/// Description of a select field.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/select-field-response.ts"
)]
pub struct SelectFieldResponse {
    pub name: String,
    pub label: String,
    pub help: String,
    pub required: bool,
}

/// Options and labels of the add-rule form.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/add-rule-form-response.ts"
)]
pub struct AddRuleFormResponse {
    pub heading: String,
    pub cohort_field: SelectFieldResponse,
    pub cohort_groups: Vec<OptionGroupResponse>,
    pub role_field: SelectFieldResponse,
    pub role_options: Vec<SelectOptionResponse>,
}

/// Listing column header.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/listing-column-response.ts"
)]
pub struct ListingColumnResponse {
    pub key: String,
    pub label: String,
    pub sortable: bool,
}

/// One rendered listing row.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/rule-listing-row-response.ts"
)]
pub struct RuleListingRowResponse {
    pub rule_id: i64,
    pub cohort_id: i64,
    pub cohort_name: String,
    pub cohort_context: String,
    pub role_id: i64,
    pub role_name: String,
    pub time_created: String,
    pub time_created_label: String,
    pub delete_path: String,
}

/// One page of the rule listing.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/rule-listing-response.ts"
)]
pub struct RuleListingResponse {
    pub heading: String,
    pub columns: Vec<ListingColumnResponse>,
    pub rows: Vec<RuleListingRowResponse>,
    pub total: u64,
    pub sort: String,
    pub direction: String,
    pub page: usize,
    pub per_page: usize,
}

/// Delete confirmation page.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/delete-confirmation-response.ts"
)]
pub struct DeleteConfirmationResponse {
    pub heading: String,
    pub prompt: String,
    pub row: RuleListingRowResponse,
}
