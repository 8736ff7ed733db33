use async_trait::async_trait;

use cohortrole_core::{ActorIdentity, AppResult};
use cohortrole_domain::{Category, Cohort, ContextLevel, PlatformContext, Role};

/// Maximum number of cohorts offered per context on the add form.
pub const COHORTS_PER_CONTEXT_LIMIT: usize = 1000;

/// Read-only lookups into the host platform's cohorts, roles and contexts.
#[async_trait]
pub trait PlatformDirectory: Send + Sync {
    /// Finds a cohort by id.
    async fn find_cohort(&self, cohort_id: i64) -> AppResult<Option<Cohort>>;

    /// Finds a role by id.
    async fn find_role(&self, role_id: i64) -> AppResult<Option<Role>>;

    /// Finds a context by id.
    async fn find_context(&self, context_id: i64) -> AppResult<Option<PlatformContext>>;

    /// Returns the single System context.
    async fn system_context(&self) -> AppResult<PlatformContext>;

    /// Finds the context wrapping a course category.
    async fn find_category_context(&self, category_id: i64)
    -> AppResult<Option<PlatformContext>>;

    /// Lists cohorts defined directly in a context, up to `limit` entries.
    async fn list_cohorts_in_context(&self, context_id: i64, limit: usize)
    -> AppResult<Vec<Cohort>>;

    /// Lists roles the actor may assign in the given context.
    async fn list_assignable_roles(
        &self,
        actor: &ActorIdentity,
        context_id: i64,
    ) -> AppResult<Vec<Role>>;

    /// Lists roles configured as assignable at a context level, by sortorder.
    async fn list_roles_for_context_level(&self, level: ContextLevel) -> AppResult<Vec<Role>>;
}

/// Read-only lookups into the course category tree.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Finds a category by id.
    async fn find_category(&self, category_id: i64) -> AppResult<Option<Category>>;

    /// Lists all categories ordered by sortorder.
    async fn list_categories(&self) -> AppResult<Vec<Category>>;
}
