mod conversions;
mod types;

pub use types::{
    AddRuleFormResponse, CreateCohortRoleRequest, CreateCohortRoleResponse,
    DeleteConfirmationResponse, ListCohortRolesQuery, RuleListingResponse,
    ValidationErrorsResponse,
};
