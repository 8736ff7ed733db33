use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use cohortrole_application::{
    CohortRoleRepository, NewCohortRoleRule, RuleListQuery, RuleListRow, RuleSortField,
    SortDirection,
};
use cohortrole_core::{AppError, AppResult};
use cohortrole_domain::{Cohort, CohortRoleRule, Role};

/// PostgreSQL-backed repository for cohort role rules.
#[derive(Clone)]
pub struct PostgresCohortRoleRepository {
    pool: PgPool,
}

impl PostgresCohortRoleRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct RuleRow {
    id: i64,
    cohortid: i64,
    roleid: i64,
    usermodified: i64,
    timecreated: DateTime<Utc>,
    timemodified: DateTime<Utc>,
}

impl From<RuleRow> for CohortRoleRule {
    fn from(row: RuleRow) -> Self {
        Self {
            id: row.id,
            cohort_id: row.cohortid,
            role_id: row.roleid,
            time_created: row.timecreated,
            time_modified: row.timemodified,
            user_modified: row.usermodified,
        }
    }
}

#[derive(Debug, FromRow)]
struct RuleListingRow {
    id: i64,
    cohortid: i64,
    roleid: i64,
    usermodified: i64,
    timecreated: DateTime<Utc>,
    timemodified: DateTime<Utc>,
    cohort_name: String,
    cohort_contextid: i64,
    role_shortname: String,
    role_name: String,
    role_sortorder: i64,
}

impl From<RuleListingRow> for RuleListRow {
    fn from(row: RuleListingRow) -> Self {
        Self {
            rule: CohortRoleRule {
                id: row.id,
                cohort_id: row.cohortid,
                role_id: row.roleid,
                time_created: row.timecreated,
                time_modified: row.timemodified,
                user_modified: row.usermodified,
            },
            cohort: Cohort {
                id: row.cohortid,
                name: row.cohort_name,
                context_id: row.cohort_contextid,
            },
            role: Role {
                id: row.roleid,
                shortname: row.role_shortname,
                name: row.role_name,
                sortorder: row.role_sortorder,
            },
        }
    }
}

fn order_by_clause(query: &RuleListQuery) -> &'static str {
    match (query.sort, query.direction) {
        (RuleSortField::Cohort, SortDirection::Ascending) => "c.name ASC, r.id ASC",
        (RuleSortField::Cohort, SortDirection::Descending) => "c.name DESC, r.id DESC",
        (RuleSortField::Role, SortDirection::Ascending) => "ro.shortname ASC, r.id ASC",
        (RuleSortField::Role, SortDirection::Descending) => "ro.shortname DESC, r.id DESC",
        (RuleSortField::TimeCreated, SortDirection::Ascending) => "r.timecreated ASC, r.id ASC",
        (RuleSortField::TimeCreated, SortDirection::Descending) => {
            "r.timecreated DESC, r.id DESC"
        }
    }
}

fn page_bound(value: usize, label: &str) -> AppResult<i64> {
    i64::try_from(value)
        .map_err(|error| AppError::Validation(format!("listing {label} out of range: {error}")))
}

#[async_trait]
impl CohortRoleRepository for PostgresCohortRoleRepository {
    async fn insert_rule(&self, rule: NewCohortRoleRule) -> AppResult<CohortRoleRule> {
        let result = sqlx::query_as::<_, RuleRow>(
            r#"
            INSERT INTO local_cohortrole (cohortid, roleid, usermodified)
            VALUES ($1, $2, $3)
            RETURNING id, cohortid, roleid, usermodified, timecreated, timemodified
            "#,
        )
        .bind(rule.cohort_id)
        .bind(rule.role_id)
        .bind(rule.user_modified)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(row) => Ok(row.into()),
            Err(error) => {
                if let sqlx::Error::Database(database_error) = &error
                    && database_error.code().as_deref() == Some("23505")
                {
                    return Err(AppError::DuplicateRule(format!(
                        "cohort '{}' is already synchronized to role '{}'",
                        rule.cohort_id, rule.role_id
                    )));
                }

                Err(AppError::Internal(format!(
                    "failed to insert cohort role rule: {error}"
                )))
            }
        }
    }

    async fn delete_rule(&self, rule_id: i64) -> AppResult<Option<CohortRoleRule>> {
        let row = sqlx::query_as::<_, RuleRow>(
            r#"
            DELETE FROM local_cohortrole
            WHERE id = $1
            RETURNING id, cohortid, roleid, usermodified, timecreated, timemodified
            "#,
        )
        .bind(rule_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to delete cohort role rule '{rule_id}': {error}"
            ))
        })?;

        Ok(row.map(CohortRoleRule::from))
    }

    async fn find_rule(&self, rule_id: i64) -> AppResult<Option<CohortRoleRule>> {
        let row = sqlx::query_as::<_, RuleRow>(
            r#"
            SELECT id, cohortid, roleid, usermodified, timecreated, timemodified
            FROM local_cohortrole
            WHERE id = $1
            "#,
        )
        .bind(rule_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to find cohort role rule '{rule_id}': {error}"
            ))
        })?;

        Ok(row.map(CohortRoleRule::from))
    }

    async fn rule_exists(&self, cohort_id: i64, role_id: i64) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1
                FROM local_cohortrole
                WHERE cohortid = $1 AND roleid = $2
            )
            "#,
        )
        .bind(cohort_id)
        .bind(role_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to check cohort role rule: {error}"))
        })
    }

    async fn list_rules(&self, query: &RuleListQuery) -> AppResult<Vec<RuleListRow>> {
        let limit = page_bound(query.per_page, "page size")?;
        let offset = page_bound(query.offset(), "offset")?;
        let statement = format!(
            r#"
            SELECT
                r.id,
                r.cohortid,
                r.roleid,
                r.usermodified,
                r.timecreated,
                r.timemodified,
                c.name AS cohort_name,
                c.contextid AS cohort_contextid,
                ro.shortname AS role_shortname,
                ro.name AS role_name,
                ro.sortorder AS role_sortorder
            FROM local_cohortrole r
            JOIN cohort c ON c.id = r.cohortid
            JOIN role ro ON ro.id = r.roleid
            ORDER BY {}
            LIMIT $1
            OFFSET $2
            "#,
            order_by_clause(query)
        );

        let rows = sqlx::query_as::<_, RuleListingRow>(&statement)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(|error| {
                AppError::Internal(format!("failed to list cohort role rules: {error}"))
            })?;

        Ok(rows.into_iter().map(RuleListRow::from).collect())
    }

    async fn count_rules(&self) -> AppResult<u64> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM local_cohortrole r
            JOIN cohort c ON c.id = r.cohortid
            JOIN role ro ON ro.id = r.roleid
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to count cohort role rules: {error}"))
        })?;

        u64::try_from(count)
            .map_err(|error| AppError::Internal(format!("invalid cohort role rule count: {error}")))
    }
}

#[cfg(test)]
mod tests;
