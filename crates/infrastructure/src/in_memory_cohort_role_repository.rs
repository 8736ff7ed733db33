use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use cohortrole_application::{
    CohortRoleRepository, NewCohortRoleRule, PlatformDirectory, RuleListQuery, RuleListRow,
    RuleSortField, SortDirection,
};
use cohortrole_core::{AppError, AppResult};
use cohortrole_domain::CohortRoleRule;

#[derive(Debug, Default)]
struct RuleTable {
    rows: BTreeMap<i64, CohortRoleRule>,
    next_id: i64,
}

/// In-memory cohort role rule repository.
///
/// Writes are serialized by a single lock, which makes the duplicate check
/// and the insert one step.
pub struct InMemoryCohortRoleRepository {
    directory: Arc<dyn PlatformDirectory>,
    table: RwLock<RuleTable>,
}

impl InMemoryCohortRoleRepository {
    /// Creates an empty repository joining against the given directory.
    #[must_use]
    pub fn new(directory: Arc<dyn PlatformDirectory>) -> Self {
        Self {
            directory,
            table: RwLock::new(RuleTable::default()),
        }
    }

    async fn joined_rows(&self) -> AppResult<Vec<RuleListRow>> {
        let rules: Vec<CohortRoleRule> = self.table.read().await.rows.values().cloned().collect();

        let mut rows = Vec::with_capacity(rules.len());
        for rule in rules {
            let Some(cohort) = self.directory.find_cohort(rule.cohort_id).await? else {
                continue;
            };
            let Some(role) = self.directory.find_role(rule.role_id).await? else {
                continue;
            };
            rows.push(RuleListRow { rule, cohort, role });
        }

        Ok(rows)
    }
}

#[async_trait]
impl CohortRoleRepository for InMemoryCohortRoleRepository {
    async fn insert_rule(&self, rule: NewCohortRoleRule) -> AppResult<CohortRoleRule> {
        let mut table = self.table.write().await;

        if table
            .rows
            .values()
            .any(|stored| stored.cohort_id == rule.cohort_id && stored.role_id == rule.role_id)
        {
            return Err(AppError::DuplicateRule(format!(
                "cohort '{}' is already synchronized to role '{}'",
                rule.cohort_id, rule.role_id
            )));
        }

        table.next_id += 1;
        let now = Utc::now();
        let stored = CohortRoleRule {
            id: table.next_id,
            cohort_id: rule.cohort_id,
            role_id: rule.role_id,
            time_created: now,
            time_modified: now,
            user_modified: rule.user_modified,
        };
        table.rows.insert(stored.id, stored.clone());

        Ok(stored)
    }

    async fn delete_rule(&self, rule_id: i64) -> AppResult<Option<CohortRoleRule>> {
        Ok(self.table.write().await.rows.remove(&rule_id))
    }

    async fn find_rule(&self, rule_id: i64) -> AppResult<Option<CohortRoleRule>> {
        Ok(self.table.read().await.rows.get(&rule_id).cloned())
    }

    async fn rule_exists(&self, cohort_id: i64, role_id: i64) -> AppResult<bool> {
        Ok(self
            .table
            .read()
            .await
            .rows
            .values()
            .any(|rule| rule.cohort_id == cohort_id && rule.role_id == role_id))
    }

    async fn list_rules(&self, query: &RuleListQuery) -> AppResult<Vec<RuleListRow>> {
        let mut rows = self.joined_rows().await?;

        rows.sort_by(|left, right| {
            let ordering = match query.sort {
                RuleSortField::Cohort => left.cohort.name.cmp(&right.cohort.name),
                RuleSortField::Role => left.role.shortname.cmp(&right.role.shortname),
                RuleSortField::TimeCreated => left.rule.time_created.cmp(&right.rule.time_created),
            }
            .then(left.rule.id.cmp(&right.rule.id));

            match query.direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });

        Ok(rows
            .into_iter()
            .skip(query.offset())
            .take(query.per_page)
            .collect())
    }

    async fn count_rules(&self) -> AppResult<u64> {
        let count = self.joined_rows().await?.len();
        u64::try_from(count)
            .map_err(|error| AppError::Internal(format!("rule count overflow: {error}")))
    }
}
