use cohortrole_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Scope levels of the host platform's permission model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextLevel {
    /// Whole-site scope.
    System,
    /// A single user's scope.
    User,
    /// A course category.
    CourseCategory,
    /// A single course.
    Course,
    /// An activity module inside a course.
    Module,
    /// A block instance.
    Block,
}

impl ContextLevel {
    /// Returns the stable numeric storage value for this level.
    #[must_use]
    pub fn code(&self) -> i64 {
        match self {
            Self::System => 10,
            Self::User => 30,
            Self::CourseCategory => 40,
            Self::Course => 50,
            Self::Module => 70,
            Self::Block => 80,
        }
    }

    /// Parses a stored numeric level.
    pub fn from_code(code: i64) -> AppResult<Self> {
        match code {
            10 => Ok(Self::System),
            30 => Ok(Self::User),
            40 => Ok(Self::CourseCategory),
            50 => Ok(Self::Course),
            70 => Ok(Self::Module),
            80 => Ok(Self::Block),
            _ => Err(AppError::Validation(format!(
                "unknown context level '{code}'"
            ))),
        }
    }

    /// Returns a readable level name used when no dedicated label exists.
    #[must_use]
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::System => "System",
            Self::User => "User",
            Self::CourseCategory => "Category",
            Self::Course => "Course",
            Self::Module => "Activity module",
            Self::Block => "Block",
        }
    }

    /// Returns whether cohorts in this level may carry role rules.
    #[must_use]
    pub fn accepts_cohort_rules(&self) -> bool {
        matches!(self, Self::System | Self::CourseCategory)
    }
}

/// Context record resolved from the host platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformContext {
    /// Context identifier.
    pub id: i64,
    /// Scope level.
    pub level: ContextLevel,
    /// Identifier of the instance this context wraps (category id, course id, ...).
    pub instance_id: i64,
}

impl PlatformContext {
    /// Returns the context name used by the listing fallback.
    #[must_use]
    pub fn generic_name(&self) -> String {
        match self.level {
            ContextLevel::System => ContextLevel::System.display_name().to_owned(),
            level => format!("{}: {}", level.display_name(), self.instance_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ContextLevel, PlatformContext};

    #[test]
    fn context_level_roundtrip_storage_value() {
        let restored = ContextLevel::from_code(ContextLevel::CourseCategory.code());
        assert!(matches!(restored, Ok(ContextLevel::CourseCategory)));
    }

    #[test]
    fn unknown_context_level_is_rejected() {
        assert!(ContextLevel::from_code(20).is_err());
    }

    #[test]
    fn only_system_and_category_accept_rules() {
        let accepted: Vec<ContextLevel> = [
            ContextLevel::System,
            ContextLevel::User,
            ContextLevel::CourseCategory,
            ContextLevel::Course,
            ContextLevel::Module,
            ContextLevel::Block,
        ]
        .into_iter()
        .filter(ContextLevel::accepts_cohort_rules)
        .collect();

        assert_eq!(
            accepted,
            vec![ContextLevel::System, ContextLevel::CourseCategory]
        );
    }

    #[test]
    fn generic_name_mentions_instance_below_system() {
        let context = PlatformContext {
            id: 31,
            level: ContextLevel::Course,
            instance_id: 4,
        };
        assert_eq!(context.generic_name(), "Course: 4");
    }
}
