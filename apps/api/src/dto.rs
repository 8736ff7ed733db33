mod cohort_roles;
mod common;

pub use cohort_roles::{
    AddRuleFormResponse, CreateCohortRoleRequest, CreateCohortRoleResponse,
    DeleteConfirmationResponse, ListCohortRolesQuery, RuleListingResponse,
    ValidationErrorsResponse,
};
pub use common::{GenericMessageResponse, HealthDependencyStatus, HealthResponse};
