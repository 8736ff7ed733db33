use async_trait::async_trait;

use cohortrole_core::AppResult;
use cohortrole_domain::{CohortRoleRule, RuleEvent};

use super::listing::{RuleListQuery, RuleListRow};

/// Validated values for a rule about to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCohortRoleRule {
    /// Cohort whose members receive the role.
    pub cohort_id: i64,
    /// Role granted at System context.
    pub role_id: i64,
    /// User creating the rule.
    pub user_modified: i64,
}

/// Repository port for persisted cohort role rules.
#[async_trait]
pub trait CohortRoleRepository: Send + Sync {
    /// Inserts a rule, assigning its id and timestamps.
    ///
    /// Must fail with `AppError::DuplicateRule` when the cohort/role pair is
    /// already stored, atomically with the insert.
    async fn insert_rule(&self, rule: NewCohortRoleRule) -> AppResult<CohortRoleRule>;

    /// Removes a rule and returns it as it was before removal.
    async fn delete_rule(&self, rule_id: i64) -> AppResult<Option<CohortRoleRule>>;

    /// Finds a rule by id.
    async fn find_rule(&self, rule_id: i64) -> AppResult<Option<CohortRoleRule>>;

    /// Returns whether a rule binds the cohort to the role.
    async fn rule_exists(&self, cohort_id: i64, role_id: i64) -> AppResult<bool>;

    /// Lists one page of rules joined with their cohort and role.
    async fn list_rules(&self, query: &RuleListQuery) -> AppResult<Vec<RuleListRow>>;

    /// Counts all listable rules.
    async fn count_rules(&self) -> AppResult<u64>;
}

/// Port receiving rule lifecycle notifications for external consumers.
#[async_trait]
pub trait RuleEventSink: Send + Sync {
    /// Publishes a single event.
    async fn publish(&self, event: RuleEvent) -> AppResult<()>;
}
