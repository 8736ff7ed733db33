//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod category_path;
mod context;
mod directory;
pub mod labels;
mod rule;

pub use category_path::{
    AncestorWalk, CATEGORY_PATH_SEPARATOR, MAX_CATEGORY_DEPTH, join_category_path,
};
pub use context::{ContextLevel, PlatformContext};
pub use directory::{Category, Cohort, Role};
pub use rule::{CohortRoleRule, RuleEvent, RuleEventKind};
