use std::collections::{BTreeSet, HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::RwLock;

use cohortrole_application::{CategoryRepository, PlatformDirectory};
use cohortrole_core::{ActorIdentity, AppError, AppResult};
use cohortrole_domain::{Category, Cohort, ContextLevel, PlatformContext, Role};

#[derive(Debug, Default)]
struct DirectoryState {
    contexts: HashMap<i64, PlatformContext>,
    cohorts: HashMap<i64, Cohort>,
    roles: HashMap<i64, Role>,
    categories: HashMap<i64, Category>,
    role_context_levels: HashSet<(i64, ContextLevel)>,
    assignable_by_user: HashMap<i64, BTreeSet<i64>>,
    site_admins: HashSet<i64>,
}

/// In-memory directory of cohorts, roles, contexts and categories.
#[derive(Debug, Default)]
pub struct InMemoryPlatformDirectory {
    state: RwLock<DirectoryState>,
}

impl InMemoryPlatformDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a context.
    pub async fn insert_context(&self, context: PlatformContext) {
        self.state
            .write()
            .await
            .contexts
            .insert(context.id, context);
    }

    /// Stores a cohort.
    pub async fn insert_cohort(&self, cohort: Cohort) {
        self.state.write().await.cohorts.insert(cohort.id, cohort);
    }

    /// Stores a role.
    pub async fn insert_role(&self, role: Role) {
        self.state.write().await.roles.insert(role.id, role);
    }

    /// Stores a category.
    pub async fn insert_category(&self, category: Category) {
        self.state
            .write()
            .await
            .categories
            .insert(category.id, category);
    }

    /// Marks a role as assignable at a context level.
    pub async fn allow_role_at_level(&self, role_id: i64, level: ContextLevel) {
        self.state
            .write()
            .await
            .role_context_levels
            .insert((role_id, level));
    }

    /// Lets a user assign a role.
    pub async fn allow_user_to_assign(&self, user_id: i64, role_id: i64) {
        self.state
            .write()
            .await
            .assignable_by_user
            .entry(user_id)
            .or_default()
            .insert(role_id);
    }

    /// Grants a user site administrator rights, which can assign every role.
    pub async fn add_site_admin(&self, user_id: i64) {
        self.state.write().await.site_admins.insert(user_id);
    }
}

fn sorted_by_sortorder(mut roles: Vec<Role>) -> Vec<Role> {
    roles.sort_by_key(|role| (role.sortorder, role.id));
    roles
}

#[async_trait]
impl PlatformDirectory for InMemoryPlatformDirectory {
    async fn find_cohort(&self, cohort_id: i64) -> AppResult<Option<Cohort>> {
        Ok(self.state.read().await.cohorts.get(&cohort_id).cloned())
    }

    async fn find_role(&self, role_id: i64) -> AppResult<Option<Role>> {
        Ok(self.state.read().await.roles.get(&role_id).cloned())
    }

    async fn find_context(&self, context_id: i64) -> AppResult<Option<PlatformContext>> {
        Ok(self.state.read().await.contexts.get(&context_id).cloned())
    }

    async fn system_context(&self) -> AppResult<PlatformContext> {
        self.state
            .read()
            .await
            .contexts
            .values()
            .find(|context| context.level == ContextLevel::System)
            .cloned()
            .ok_or_else(|| AppError::Internal("system context is not configured".to_owned()))
    }

    async fn find_category_context(
        &self,
        category_id: i64,
    ) -> AppResult<Option<PlatformContext>> {
        Ok(self
            .state
            .read()
            .await
            .contexts
            .values()
            .find(|context| {
                context.level == ContextLevel::CourseCategory && context.instance_id == category_id
            })
            .cloned())
    }

    async fn list_cohorts_in_context(
        &self,
        context_id: i64,
        limit: usize,
    ) -> AppResult<Vec<Cohort>> {
        let state = self.state.read().await;
        let mut cohorts: Vec<Cohort> = state
            .cohorts
            .values()
            .filter(|cohort| cohort.context_id == context_id)
            .cloned()
            .collect();
        cohorts.sort_by(|left, right| left.name.cmp(&right.name).then(left.id.cmp(&right.id)));
        cohorts.truncate(limit);

        Ok(cohorts)
    }

    async fn list_assignable_roles(
        &self,
        actor: &ActorIdentity,
        _context_id: i64,
    ) -> AppResult<Vec<Role>> {
        let state = self.state.read().await;

        if state.site_admins.contains(&actor.user_id()) {
            return Ok(sorted_by_sortorder(state.roles.values().cloned().collect()));
        }

        let roles = state
            .assignable_by_user
            .get(&actor.user_id())
            .map(|role_ids| {
                role_ids
                    .iter()
                    .filter_map(|role_id| state.roles.get(role_id).cloned())
                    .collect()
            })
            .unwrap_or_default();

        Ok(sorted_by_sortorder(roles))
    }

    async fn list_roles_for_context_level(&self, level: ContextLevel) -> AppResult<Vec<Role>> {
        let state = self.state.read().await;
        let roles = state
            .role_context_levels
            .iter()
            .filter(|(_, stored_level)| *stored_level == level)
            .filter_map(|(role_id, _)| state.roles.get(role_id).cloned())
            .collect();

        Ok(sorted_by_sortorder(roles))
    }
}

#[async_trait]
impl CategoryRepository for InMemoryPlatformDirectory {
    async fn find_category(&self, category_id: i64) -> AppResult<Option<Category>> {
        Ok(self.state.read().await.categories.get(&category_id).cloned())
    }

    async fn list_categories(&self) -> AppResult<Vec<Category>> {
        let mut categories: Vec<Category> = self
            .state
            .read()
            .await
            .categories
            .values()
            .cloned()
            .collect();
        categories.sort_by_key(|category| (category.sortorder, category.id));

        Ok(categories)
    }
}

#[cfg(test)]
mod tests {
    use cohortrole_application::{CategoryRepository, PlatformDirectory};
    use cohortrole_core::ActorIdentity;
    use cohortrole_domain::{Category, ContextLevel, PlatformContext, Role};

    use super::InMemoryPlatformDirectory;

    fn role(id: i64, shortname: &str) -> Role {
        Role {
            id,
            shortname: shortname.to_owned(),
            name: String::new(),
            sortorder: id,
        }
    }

    #[tokio::test]
    async fn site_admin_can_assign_every_role() {
        let directory = InMemoryPlatformDirectory::new();
        directory.insert_role(role(2, "coursecreator")).await;
        directory.insert_role(role(1, "manager")).await;
        directory.add_site_admin(2).await;

        let roles = directory
            .list_assignable_roles(&ActorIdentity::new(2, "Admin"), 1)
            .await;

        let ids: Vec<i64> = roles
            .unwrap_or_default()
            .into_iter()
            .map(|role| role.id)
            .collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[tokio::test]
    async fn regular_user_only_sees_allowed_roles() {
        let directory = InMemoryPlatformDirectory::new();
        directory.insert_role(role(1, "manager")).await;
        directory.insert_role(role(5, "student")).await;
        directory.allow_user_to_assign(7, 5).await;

        let roles = directory
            .list_assignable_roles(&ActorIdentity::new(7, "Teacher"), 1)
            .await
            .unwrap_or_default();

        assert_eq!(roles.len(), 1);
        assert_eq!(roles[0].shortname, "student");
    }

    #[tokio::test]
    async fn roles_for_level_follow_allow_list() {
        let directory = InMemoryPlatformDirectory::new();
        directory.insert_role(role(1, "manager")).await;
        directory.insert_role(role(9, "auditor")).await;
        directory.allow_role_at_level(9, ContextLevel::System).await;
        directory
            .allow_role_at_level(1, ContextLevel::CourseCategory)
            .await;

        let roles = directory
            .list_roles_for_context_level(ContextLevel::System)
            .await
            .unwrap_or_default();

        assert_eq!(roles.len(), 1);
        assert_eq!(roles[0].id, 9);
    }

    #[tokio::test]
    async fn category_context_is_found_by_instance() {
        let directory = InMemoryPlatformDirectory::new();
        directory
            .insert_context(PlatformContext {
                id: 40,
                level: ContextLevel::CourseCategory,
                instance_id: 3,
            })
            .await;

        let context = directory.find_category_context(3).await;

        assert!(matches!(context, Ok(Some(ref context)) if context.id == 40));
        assert!(matches!(directory.system_context().await, Err(_)));
    }

    #[tokio::test]
    async fn categories_are_listed_by_sortorder() {
        let directory = InMemoryPlatformDirectory::new();
        for (id, sortorder) in [(1, 30), (2, 10), (3, 20)] {
            directory
                .insert_category(Category {
                    id,
                    name: format!("Category {id}"),
                    parent: None,
                    sortorder,
                })
                .await;
        }

        let ids: Vec<i64> = directory
            .list_categories()
            .await
            .unwrap_or_default()
            .into_iter()
            .map(|category| category.id)
            .collect();

        assert_eq!(ids, vec![2, 3, 1]);
    }
}
