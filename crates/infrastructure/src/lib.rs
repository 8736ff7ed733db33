//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod in_memory_cohort_role_repository;
mod in_memory_platform_directory;
mod postgres_cohort_role_repository;
mod postgres_platform_directory;
mod postgres_rule_event_sink;
mod static_string_catalog;
mod text_presentation;
mod tracing_rule_event_sink;

pub use in_memory_cohort_role_repository::InMemoryCohortRoleRepository;
pub use in_memory_platform_directory::InMemoryPlatformDirectory;
pub use postgres_cohort_role_repository::PostgresCohortRoleRepository;
pub use postgres_platform_directory::PostgresPlatformDirectory;
pub use postgres_rule_event_sink::PostgresRuleEventSink;
pub use static_string_catalog::StaticStringCatalog;
pub use text_presentation::{FilteringTextFormatter, LocaleCollator};
pub use tracing_rule_event_sink::TracingRuleEventSink;

