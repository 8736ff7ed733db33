use cohortrole_application::RuleAdminService;
use sqlx::PgPool;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub rule_admin_service: RuleAdminService,
    pub postgres_pool: Option<PgPool>,
}
