use std::sync::Arc;

use tracing::{info, warn};

use cohortrole_core::{ActorIdentity, AppError, AppResult};
use cohortrole_domain::{CohortRoleRule, RuleEvent};

use crate::directory_ports::PlatformDirectory;
use crate::rule_store_ports::{
    CohortRoleRepository, NewCohortRoleRule, RuleEventSink, RuleListPage, RuleListQuery,
};


/// Input payload for creating a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreateRuleInput {
    /// Cohort whose members receive the role.
    pub cohort_id: i64,
    /// Role to grant.
    pub role_id: i64,
}

/// Application service owning cohort role rules and their validation.
#[derive(Clone)]
pub struct RuleStoreService {
    repository: Arc<dyn CohortRoleRepository>,
    directory: Arc<dyn PlatformDirectory>,
    event_sink: Arc<dyn RuleEventSink>,
}

impl RuleStoreService {
    /// Creates a new service from required dependencies.
    #[must_use]
    pub fn new(
        repository: Arc<dyn CohortRoleRepository>,
        directory: Arc<dyn PlatformDirectory>,
        event_sink: Arc<dyn RuleEventSink>,
    ) -> Self {
        Self {
            repository,
            directory,
            event_sink,
        }
    }

    /// Validates and persists a rule, then emits a creation event.
    pub async fn create(
        &self,
        actor: &ActorIdentity,
        input: CreateRuleInput,
    ) -> AppResult<CohortRoleRule> {
        self.validate_cohort(input.cohort_id).await?;
        self.validate_role(input.role_id).await?;

        if self.exists(input.cohort_id, input.role_id).await? {
            return Err(duplicate_rule(input));
        }

        // The repository re-checks the pair atomically with the insert.
        let rule = self
            .repository
            .insert_rule(NewCohortRoleRule {
                cohort_id: input.cohort_id,
                role_id: input.role_id,
                user_modified: actor.user_id(),
            })
            .await?;

        info!(
            rule_id = rule.id,
            cohort_id = rule.cohort_id,
            role_id = rule.role_id,
            actor = actor.user_id(),
            "cohort role rule created"
        );

        self.publish(RuleEvent::created(rule.clone(), actor.user_id()))
            .await;

        Ok(rule)
    }

    /// Deletes a rule and emits a deletion event carrying its prior state.
    pub async fn delete(&self, actor: &ActorIdentity, rule_id: i64) -> AppResult<()> {
        let removed = self
            .repository
            .delete_rule(rule_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("rule '{rule_id}' was not found")))?;

        info!(
            rule_id = removed.id,
            cohort_id = removed.cohort_id,
            role_id = removed.role_id,
            actor = actor.user_id(),
            "cohort role rule deleted"
        );

        self.publish(RuleEvent::deleted(removed, actor.user_id()))
            .await;

        Ok(())
    }

    /// Returns whether a rule already binds the cohort to the role.
    pub async fn exists(&self, cohort_id: i64, role_id: i64) -> AppResult<bool> {
        self.repository.rule_exists(cohort_id, role_id).await
    }

    /// Finds a single rule.
    pub async fn find(&self, rule_id: i64) -> AppResult<Option<CohortRoleRule>> {
        self.repository.find_rule(rule_id).await
    }

    /// Returns one page of rules joined with their cohort and role.
    pub async fn list(&self, query: RuleListQuery) -> AppResult<RuleListPage> {
        let query = query.clamped();
        let rows = self.repository.list_rules(&query).await?;
        let total = self.repository.count_rules().await?;

        Ok(RuleListPage { rows, total, query })
    }

    async fn validate_cohort(&self, cohort_id: i64) -> AppResult<()> {
        let cohort = self
            .directory
            .find_cohort(cohort_id)
            .await?
            .ok_or_else(|| AppError::InvalidCohort(format!("cohort '{cohort_id}' does not exist")))?;

        // Unknown level codes surface as validation errors from the directory.
        let context = match self.directory.find_context(cohort.context_id).await {
            Ok(context) => context,
            Err(AppError::Validation(reason)) => {
                return Err(AppError::InvalidCohort(format!(
                    "context '{}' of cohort '{cohort_id}' is not usable: {reason}",
                    cohort.context_id
                )));
            }
            Err(error) => return Err(error),
        };
        let context = context.ok_or_else(|| {
            AppError::InvalidCohort(format!(
                "context '{}' of cohort '{cohort_id}' does not exist",
                cohort.context_id
            ))
        })?;

        if !context.level.accepts_cohort_rules() {
            return Err(AppError::InvalidCohort(format!(
                "cohort '{cohort_id}' belongs to a {} context",
                context.level.display_name().to_lowercase()
            )));
        }

        Ok(())
    }

    async fn validate_role(&self, role_id: i64) -> AppResult<()> {
        if self.directory.find_role(role_id).await?.is_none() {
            return Err(AppError::InvalidRole(format!(
                "role '{role_id}' does not exist"
            )));
        }

        Ok(())
    }

    async fn publish(&self, event: RuleEvent) {
        let event_id = event.event_id;
        if let Err(error) = self.event_sink.publish(event).await {
            warn!(%event_id, %error, "failed to publish cohort role rule event");
        }
    }
}

fn duplicate_rule(input: CreateRuleInput) -> AppError {
    AppError::DuplicateRule(format!(
        "cohort '{}' is already synchronized to role '{}'",
        input.cohort_id, input.role_id
    ))
}
