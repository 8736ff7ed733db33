use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use cohortrole_application::{CategoryRepository, PlatformDirectory};
use cohortrole_core::{ActorIdentity, AppError, AppResult};
use cohortrole_domain::{Category, Cohort, ContextLevel, PlatformContext, Role};

/// PostgreSQL-backed read-only view of the host platform tables.
#[derive(Clone)]
pub struct PostgresPlatformDirectory {
    pool: PgPool,
}

impl PostgresPlatformDirectory {
    /// Creates a directory with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_context(
        &self,
        statement: &str,
        first: i64,
        second: Option<i64>,
    ) -> AppResult<Option<PlatformContext>> {
        let mut query = sqlx::query_as::<_, ContextRow>(statement).bind(first);
        if let Some(second) = second {
            query = query.bind(second);
        }

        let row = query
            .fetch_optional(&self.pool)
            .await
            .map_err(|error| AppError::Internal(format!("failed to load context: {error}")))?;

        row.map(PlatformContext::try_from).transpose()
    }
}

#[derive(Debug, FromRow)]
struct ContextRow {
    id: i64,
    contextlevel: i64,
    instanceid: i64,
}

impl TryFrom<ContextRow> for PlatformContext {
    type Error = AppError;

    fn try_from(row: ContextRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            level: ContextLevel::from_code(row.contextlevel)?,
            instance_id: row.instanceid,
        })
    }
}

#[derive(Debug, FromRow)]
struct CohortRow {
    id: i64,
    name: String,
    contextid: i64,
}

impl From<CohortRow> for Cohort {
    fn from(row: CohortRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            context_id: row.contextid,
        }
    }
}

#[derive(Debug, FromRow)]
struct RoleRow {
    id: i64,
    shortname: String,
    name: String,
    sortorder: i64,
}

impl From<RoleRow> for Role {
    fn from(row: RoleRow) -> Self {
        Self {
            id: row.id,
            shortname: row.shortname,
            name: row.name,
            sortorder: row.sortorder,
        }
    }
}

#[derive(Debug, FromRow)]
struct CategoryRow {
    id: i64,
    name: String,
    parent: i64,
    sortorder: i64,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            parent: (row.parent > 0).then_some(row.parent),
            sortorder: row.sortorder,
        }
    }
}

#[async_trait]
impl PlatformDirectory for PostgresPlatformDirectory {
    async fn find_cohort(&self, cohort_id: i64) -> AppResult<Option<Cohort>> {
        let row = sqlx::query_as::<_, CohortRow>(
            r#"
            SELECT id, name, contextid
            FROM cohort
            WHERE id = $1
            "#,
        )
        .bind(cohort_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to find cohort '{cohort_id}': {error}"))
        })?;

        Ok(row.map(Cohort::from))
    }

    async fn find_role(&self, role_id: i64) -> AppResult<Option<Role>> {
        let row = sqlx::query_as::<_, RoleRow>(
            r#"
            SELECT id, shortname, name, sortorder
            FROM role
            WHERE id = $1
            "#,
        )
        .bind(role_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to find role '{role_id}': {error}"))
        })?;

        Ok(row.map(Role::from))
    }

    async fn find_context(&self, context_id: i64) -> AppResult<Option<PlatformContext>> {
        self.fetch_context(
            r#"
            SELECT id, contextlevel, instanceid
            FROM context
            WHERE id = $1
            "#,
            context_id,
            None,
        )
        .await
    }

    async fn system_context(&self) -> AppResult<PlatformContext> {
        self.fetch_context(
            r#"
            SELECT id, contextlevel, instanceid
            FROM context
            WHERE contextlevel = $1
            ORDER BY id
            LIMIT 1
            "#,
            ContextLevel::System.code(),
            None,
        )
        .await?
        .ok_or_else(|| AppError::Internal("system context is not configured".to_owned()))
    }

    async fn find_category_context(
        &self,
        category_id: i64,
    ) -> AppResult<Option<PlatformContext>> {
        self.fetch_context(
            r#"
            SELECT id, contextlevel, instanceid
            FROM context
            WHERE contextlevel = $1 AND instanceid = $2
            "#,
            ContextLevel::CourseCategory.code(),
            Some(category_id),
        )
        .await
    }

    async fn list_cohorts_in_context(
        &self,
        context_id: i64,
        limit: usize,
    ) -> AppResult<Vec<Cohort>> {
        let limit = i64::try_from(limit)
            .map_err(|error| AppError::Validation(format!("cohort limit out of range: {error}")))?;
        let rows = sqlx::query_as::<_, CohortRow>(
            r#"
            SELECT id, name, contextid
            FROM cohort
            WHERE contextid = $1
            ORDER BY name, id
            LIMIT $2
            "#,
        )
        .bind(context_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to list cohorts in context '{context_id}': {error}"
            ))
        })?;

        Ok(rows.into_iter().map(Cohort::from).collect())
    }

    async fn list_assignable_roles(
        &self,
        actor: &ActorIdentity,
        context_id: i64,
    ) -> AppResult<Vec<Role>> {
        let rows = sqlx::query_as::<_, RoleRow>(
            r#"
            SELECT ro.id, ro.shortname, ro.name, ro.sortorder
            FROM role ro
            WHERE EXISTS (SELECT 1 FROM site_admins sa WHERE sa.userid = $1)
                OR ro.id IN (
                    SELECT raa.allowassign
                    FROM role_assignments ra
                    JOIN role_allow_assign raa ON raa.roleid = ra.roleid
                    WHERE ra.userid = $1 AND ra.contextid = $2
                )
            ORDER BY ro.sortorder, ro.id
            "#,
        )
        .bind(actor.user_id())
        .bind(context_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to list roles assignable by user '{}': {error}",
                actor.user_id()
            ))
        })?;

        Ok(rows.into_iter().map(Role::from).collect())
    }

    async fn list_roles_for_context_level(&self, level: ContextLevel) -> AppResult<Vec<Role>> {
        let rows = sqlx::query_as::<_, RoleRow>(
            r#"
            SELECT ro.id, ro.shortname, ro.name, ro.sortorder
            FROM role ro
            JOIN role_context_levels rcl ON rcl.roleid = ro.id
            WHERE rcl.contextlevel = $1
            ORDER BY ro.sortorder, ro.id
            "#,
        )
        .bind(level.code())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to list roles for context level '{}': {error}",
                level.code()
            ))
        })?;

        Ok(rows.into_iter().map(Role::from).collect())
    }
}

#[async_trait]
impl CategoryRepository for PostgresPlatformDirectory {
    async fn find_category(&self, category_id: i64) -> AppResult<Option<Category>> {
        let row = sqlx::query_as::<_, CategoryRow>(
            r#"
            SELECT id, name, parent, sortorder
            FROM course_categories
            WHERE id = $1
            "#,
        )
        .bind(category_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to find category '{category_id}': {error}"))
        })?;

        Ok(row.map(Category::from))
    }

    async fn list_categories(&self) -> AppResult<Vec<Category>> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            r#"
            SELECT id, name, parent, sortorder
            FROM course_categories
            ORDER BY sortorder, id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list categories: {error}")))?;

        Ok(rows.into_iter().map(Category::from).collect())
    }
}
