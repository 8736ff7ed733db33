mod listing;
mod repository;

pub use listing::{
    DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, RuleListPage, RuleListQuery, RuleListRow, RuleSortField,
    SortDirection,
};
pub use repository::{CohortRoleRepository, NewCohortRoleRule, RuleEventSink};
