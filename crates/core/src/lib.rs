//! Shared primitives for all Rust crates in the cohort role service.

#![forbid(unsafe_code)]

/// Actor identity shared across services.
pub mod auth;

use thiserror::Error;

pub use auth::ActorIdentity;

/// Result type used across cohort role crates.
pub type AppResult<T> = Result<T, AppError>;

/// Form field receiving the cohort selection.
pub const COHORT_FIELD: &str = "cohortid";

/// Form field receiving the role selection.
pub const ROLE_FIELD: &str = "roleid";

/// Common application error categories.
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid input or violated invariant.
    #[error("validation error: {0}")]
    Validation(String),

    /// Cohort does not exist or lives in a context that cannot carry rules.
    #[error("invalid cohort: {0}")]
    InvalidCohort(String),

    /// Role does not exist.
    #[error("invalid role: {0}")]
    InvalidRole(String),

    /// A rule already binds the same cohort to the same role.
    #[error("duplicate rule: {0}")]
    DuplicateRule(String),

    /// Requested resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Caller did not present an actor identity.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Internal unexpected error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the form field an error should be reported against, if any.
    ///
    /// Duplicate rules are reported against the cohort selection.
    #[must_use]
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::InvalidCohort(_) | Self::DuplicateRule(_) => Some(COHORT_FIELD),
            Self::InvalidRole(_) => Some(ROLE_FIELD),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ActorIdentity, AppError, COHORT_FIELD, ROLE_FIELD};

    #[test]
    fn duplicate_rule_is_reported_against_cohort_field() {
        let error = AppError::DuplicateRule("cohort 5 / role 3".to_owned());
        assert_eq!(error.field(), Some(COHORT_FIELD));
    }

    #[test]
    fn invalid_role_is_reported_against_role_field() {
        assert_eq!(
            AppError::InvalidRole("role 9".to_owned()).field(),
            Some(ROLE_FIELD)
        );
        assert_eq!(AppError::NotFound("rule 1".to_owned()).field(), None);
    }

    #[test]
    fn actor_identity_exposes_user_id() {
        let actor = ActorIdentity::new(2, "Admin User");
        assert_eq!(actor.user_id(), 2);
        assert_eq!(actor.display_name(), "Admin User");
    }
}
