use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::labels;

/// Persisted binding granting a role to every member of a cohort.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CohortRoleRule {
    /// Rule identifier, assigned by persistence.
    pub id: i64,
    /// Cohort whose members receive the role.
    pub cohort_id: i64,
    /// Role granted at System context.
    pub role_id: i64,
    /// Creation timestamp.
    pub time_created: DateTime<Utc>,
    /// Last bookkeeping timestamp written by persistence.
    pub time_modified: DateTime<Utc>,
    /// User that created the rule.
    pub user_modified: i64,
}

/// Kinds of rule lifecycle notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleEventKind {
    /// A rule was created.
    Created,
    /// A rule was deleted.
    Deleted,
}

impl RuleEventKind {
    /// Returns a stable storage value for this kind.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "cohortrole.definition.created",
            Self::Deleted => "cohortrole.definition.deleted",
        }
    }

    /// Returns the label key naming this event.
    #[must_use]
    pub fn name_key(&self) -> &'static str {
        match self {
            Self::Created => labels::EVENT_DEFINITION_CREATED,
            Self::Deleted => labels::EVENT_DEFINITION_DELETED,
        }
    }
}

/// Notification emitted after a committed rule write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleEvent {
    /// Unique event identifier.
    pub event_id: Uuid,
    /// What happened.
    pub kind: RuleEventKind,
    /// Rule state after creation, or immediately before deletion.
    pub rule: CohortRoleRule,
    /// User that triggered the change.
    pub actor_id: i64,
    /// When the event was raised.
    pub occurred_at: DateTime<Utc>,
}

impl RuleEvent {
    /// Builds a creation event for a freshly persisted rule.
    #[must_use]
    pub fn created(rule: CohortRoleRule, actor_id: i64) -> Self {
        Self::new(RuleEventKind::Created, rule, actor_id)
    }

    /// Builds a deletion event from the record as it was before removal.
    #[must_use]
    pub fn deleted(rule: CohortRoleRule, actor_id: i64) -> Self {
        Self::new(RuleEventKind::Deleted, rule, actor_id)
    }

    fn new(kind: RuleEventKind, rule: CohortRoleRule, actor_id: i64) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            kind,
            rule,
            actor_id,
            occurred_at: Utc::now(),
        }
    }

    /// Returns a one-line description for logs and audit trails.
    #[must_use]
    pub fn description(&self) -> String {
        let verb = match self.kind {
            RuleEventKind::Created => "created",
            RuleEventKind::Deleted => "deleted",
        };

        format!(
            "user {} {verb} cohort role rule {} (cohort {}, role {})",
            self.actor_id, self.rule.id, self.rule.cohort_id, self.rule.role_id
        )
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::{CohortRoleRule, RuleEvent, RuleEventKind};

    fn rule() -> CohortRoleRule {
        let now = Utc::now();
        CohortRoleRule {
            id: 12,
            cohort_id: 5,
            role_id: 3,
            time_created: now,
            time_modified: now,
            user_modified: 2,
        }
    }

    #[test]
    fn deleted_event_keeps_prior_rule_state() {
        let event = RuleEvent::deleted(rule(), 2);
        assert_eq!(event.kind, RuleEventKind::Deleted);
        assert_eq!(event.rule.cohort_id, 5);
        assert_eq!(event.rule.role_id, 3);
        assert_eq!(event.kind.name_key(), "eventdefinitiondeleted");
    }

    #[test]
    fn description_names_cohort_and_role() {
        let event = RuleEvent::created(rule(), 2);
        assert_eq!(
            event.description(),
            "user 2 created cohort role rule 12 (cohort 5, role 3)"
        );
    }
}
