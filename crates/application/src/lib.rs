//! Application services and ports.

#![forbid(unsafe_code)]

mod cohort_path_resolver;
mod directory_ports;
mod rule_admin_service;
mod rule_store_ports;
mod rule_store_service;

#[cfg(test)]
mod test_support;

pub use cohort_path_resolver::CohortPathResolver;
pub use directory_ports::{
    COHORTS_PER_CONTEXT_LIMIT, CategoryRepository, Collator, PlatformDirectory,
    PresentationPorts, StringCatalog, TextFormatter,
};
pub use rule_admin_service::{
    AddRuleForm, AddRuleOutcome, AddRuleSubmission, ContextGroupSource, DeleteConfirmation,
    FieldError, ListingColumn, OptionGroup, RuleAdminService, RuleListing, RuleListingRow,
    SelectField, SelectOption, build_cohort_option_groups, delete_path, format_timestamp,
    is_sortable_column, merge_role_options,
};
pub use rule_store_ports::{
    CohortRoleRepository, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, NewCohortRoleRule, RuleEventSink,
    RuleListPage, RuleListQuery, RuleListRow, RuleSortField, SortDirection,
};
pub use rule_store_service::{CreateRuleInput, RuleStoreService};
