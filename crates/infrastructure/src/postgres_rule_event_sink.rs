use async_trait::async_trait;
use sqlx::PgPool;

use cohortrole_application::RuleEventSink;
use cohortrole_core::{AppError, AppResult};
use cohortrole_domain::RuleEvent;

/// PostgreSQL-backed append-only log of rule lifecycle events.
#[derive(Clone)]
pub struct PostgresRuleEventSink {
    pool: PgPool,
}

impl PostgresRuleEventSink {
    /// Creates a sink with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RuleEventSink for PostgresRuleEventSink {
    async fn publish(&self, event: RuleEvent) -> AppResult<()> {
        let description = event.description();

        sqlx::query(
            r#"
            INSERT INTO local_cohortrole_events (
                id,
                kind,
                ruleid,
                cohortid,
                roleid,
                actorid,
                description,
                occurred_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(event.event_id)
        .bind(event.kind.as_str())
        .bind(event.rule.id)
        .bind(event.rule.cohort_id)
        .bind(event.rule.role_id)
        .bind(event.actor_id)
        .bind(description)
        .bind(event.occurred_at)
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to append rule event: {error}")))?;

        Ok(())
    }
}
