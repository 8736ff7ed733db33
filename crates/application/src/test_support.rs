use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use tokio::sync::Mutex;

use cohortrole_core::{ActorIdentity, AppError, AppResult};
use cohortrole_domain::{
    Category, Cohort, CohortRoleRule, ContextLevel, PlatformContext, Role, RuleEvent,
};

use crate::directory_ports::{
    CategoryRepository, Collator, PlatformDirectory, PresentationPorts, StringCatalog,
    TextFormatter,
};
use crate::rule_store_ports::{
    CohortRoleRepository, NewCohortRoleRule, RuleEventSink, RuleListQuery, RuleListRow,
    RuleSortField, SortDirection,
};

pub const SYSTEM_CONTEXT_ID: i64 = 1;

pub fn actor() -> ActorIdentity {
    ActorIdentity::new(2, "Admin User")
}

pub fn role(id: i64, shortname: &str, name: &str) -> Role {
    Role {
        id,
        shortname: shortname.to_owned(),
        name: name.to_owned(),
        sortorder: id,
    }
}

pub fn cohort(id: i64, name: &str, context_id: i64) -> Cohort {
    Cohort {
        id,
        name: name.to_owned(),
        context_id,
    }
}

pub fn category(id: i64, name: &str, parent: Option<i64>) -> Category {
    Category {
        id,
        name: name.to_owned(),
        parent,
        sortorder: id * 10_000,
    }
}

#[derive(Default)]
pub struct FakeDirectory {
    pub cohorts: HashMap<i64, Cohort>,
    pub roles: HashMap<i64, Role>,
    pub contexts: HashMap<i64, PlatformContext>,
    pub assignable_roles: Vec<Role>,
    pub system_level_roles: Vec<Role>,
    pub unknown_level_contexts: Vec<i64>,
}

impl FakeDirectory {
    /// Directory with a System context (id 1), a category context for
    /// category 10 (id 40), a course context (id 50) and three roles.
    pub fn seeded() -> Self {
        let mut directory = Self::default();
        directory.add_context(SYSTEM_CONTEXT_ID, ContextLevel::System, 0);
        directory.add_context(40, ContextLevel::CourseCategory, 10);
        directory.add_context(50, ContextLevel::Course, 7);
        directory.add_role(role(1, "manager", ""));
        directory.add_role(role(3, "editingteacher", ""));
        directory.add_role(role(5, "student", ""));
        directory
    }

    pub fn add_context(&mut self, id: i64, level: ContextLevel, instance_id: i64) {
        self.contexts.insert(
            id,
            PlatformContext {
                id,
                level,
                instance_id,
            },
        );
    }

    pub fn add_cohort(&mut self, cohort: Cohort) {
        self.cohorts.insert(cohort.id, cohort);
    }

    pub fn add_role(&mut self, role: Role) {
        self.roles.insert(role.id, role);
    }
}

#[async_trait]
impl PlatformDirectory for FakeDirectory {
    async fn find_cohort(&self, cohort_id: i64) -> AppResult<Option<Cohort>> {
        Ok(self.cohorts.get(&cohort_id).cloned())
    }

    async fn find_role(&self, role_id: i64) -> AppResult<Option<Role>> {
        Ok(self.roles.get(&role_id).cloned())
    }

    async fn find_context(&self, context_id: i64) -> AppResult<Option<PlatformContext>> {
        if self.unknown_level_contexts.contains(&context_id) {
            return Err(AppError::Validation("unknown context level '60'".to_owned()));
        }

        Ok(self.contexts.get(&context_id).cloned())
    }

    async fn system_context(&self) -> AppResult<PlatformContext> {
        self.contexts
            .values()
            .find(|context| context.level == ContextLevel::System)
            .cloned()
            .ok_or_else(|| AppError::Internal("system context missing".to_owned()))
    }

    async fn find_category_context(
        &self,
        category_id: i64,
    ) -> AppResult<Option<PlatformContext>> {
        Ok(self
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
        let mut cohorts: Vec<Cohort> = self
            .cohorts
            .values()
            .filter(|cohort| cohort.context_id == context_id)
            .cloned()
            .collect();
        cohorts.sort_by_key(|cohort| cohort.id);
        cohorts.truncate(limit);
        Ok(cohorts)
    }

    async fn list_assignable_roles(
        &self,
        _actor: &ActorIdentity,
        _context_id: i64,
    ) -> AppResult<Vec<Role>> {
        Ok(self.assignable_roles.clone())
    }

    async fn list_roles_for_context_level(&self, level: ContextLevel) -> AppResult<Vec<Role>> {
        if level == ContextLevel::System {
            return Ok(self.system_level_roles.clone());
        }

        Ok(Vec::new())
    }
}

#[derive(Default)]
pub struct FakeCategories {
    pub categories: HashMap<i64, Category>,
    pub failing_ids: Vec<i64>,
}

impl FakeCategories {
    pub fn with(categories: Vec<Category>) -> Self {
        Self {
            categories: categories
                .into_iter()
                .map(|category| (category.id, category))
                .collect(),
            failing_ids: Vec::new(),
        }
    }
}

#[async_trait]
impl CategoryRepository for FakeCategories {
    async fn find_category(&self, category_id: i64) -> AppResult<Option<Category>> {
        if self.failing_ids.contains(&category_id) {
            return Err(AppError::Internal(format!(
                "category lookup '{category_id}' failed"
            )));
        }

        Ok(self.categories.get(&category_id).cloned())
    }

    async fn list_categories(&self) -> AppResult<Vec<Category>> {
        let mut categories: Vec<Category> = self.categories.values().cloned().collect();
        categories.sort_by_key(|category| category.sortorder);
        Ok(categories)
    }
}

pub struct FakeRuleRepository {
    directory: Arc<FakeDirectory>,
    rules: Mutex<Vec<CohortRoleRule>>,
    next_id: Mutex<i64>,
}

impl FakeRuleRepository {
    pub fn new(directory: Arc<FakeDirectory>) -> Self {
        Self {
            directory,
            rules: Mutex::new(Vec::new()),
            next_id: Mutex::new(1),
        }
    }

    pub async fn stored(&self) -> Vec<CohortRoleRule> {
        self.rules.lock().await.clone()
    }
}

#[async_trait]
impl CohortRoleRepository for FakeRuleRepository {
    async fn insert_rule(&self, rule: NewCohortRoleRule) -> AppResult<CohortRoleRule> {
        let mut rules = self.rules.lock().await;
        if rules
            .iter()
            .any(|stored| stored.cohort_id == rule.cohort_id && stored.role_id == rule.role_id)
        {
            return Err(AppError::DuplicateRule(format!(
                "cohort '{}' / role '{}'",
                rule.cohort_id, rule.role_id
            )));
        }

        let mut next_id = self.next_id.lock().await;
        let id = *next_id;
        *next_id += 1;

        // Spread creation times so ordering by time is deterministic.
        let created = Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).single().unwrap_or_default()
            + Duration::minutes(id);
        let stored = CohortRoleRule {
            id,
            cohort_id: rule.cohort_id,
            role_id: rule.role_id,
            time_created: created,
            time_modified: created,
            user_modified: rule.user_modified,
        };
        rules.push(stored.clone());
        Ok(stored)
    }

    async fn delete_rule(&self, rule_id: i64) -> AppResult<Option<CohortRoleRule>> {
        let mut rules = self.rules.lock().await;
        let position = rules.iter().position(|rule| rule.id == rule_id);
        Ok(position.map(|index| rules.remove(index)))
    }

    async fn find_rule(&self, rule_id: i64) -> AppResult<Option<CohortRoleRule>> {
        Ok(self
            .rules
            .lock()
            .await
            .iter()
            .find(|rule| rule.id == rule_id)
            .cloned())
    }

    async fn rule_exists(&self, cohort_id: i64, role_id: i64) -> AppResult<bool> {
        Ok(self
            .rules
            .lock()
            .await
            .iter()
            .any(|rule| rule.cohort_id == cohort_id && rule.role_id == role_id))
    }

    async fn list_rules(&self, query: &RuleListQuery) -> AppResult<Vec<RuleListRow>> {
        let mut rows: Vec<RuleListRow> = self
            .rules
            .lock()
            .await
            .iter()
            .filter_map(|rule| {
                let cohort = self.directory.cohorts.get(&rule.cohort_id)?.clone();
                let role = self.directory.roles.get(&rule.role_id)?.clone();
                Some(RuleListRow {
                    rule: rule.clone(),
                    cohort,
                    role,
                })
            })
            .collect();

        rows.sort_by(|left, right| {
            let ordering = match query.sort {
                RuleSortField::Cohort => left.cohort.name.cmp(&right.cohort.name),
                RuleSortField::Role => left.role.shortname.cmp(&right.role.shortname),
                RuleSortField::TimeCreated => left.rule.time_created.cmp(&right.rule.time_created),
            };
            match query.direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });

        Ok(rows
            .into_iter()
            .skip(query.offset())
            .take(query.per_page)
            .collect())
    }

    async fn count_rules(&self) -> AppResult<u64> {
        Ok(self.rules.lock().await.len() as u64)
    }
}

#[derive(Default)]
pub struct RecordingEventSink {
    pub events: Mutex<Vec<RuleEvent>>,
    pub fail: bool,
}

#[async_trait]
impl RuleEventSink for RecordingEventSink {
    async fn publish(&self, event: RuleEvent) -> AppResult<()> {
        if self.fail {
            return Err(AppError::Internal("event sink unavailable".to_owned()));
        }

        self.events.lock().await.push(event);
        Ok(())
    }
}

pub struct EnglishStrings;

impl StringCatalog for EnglishStrings {
    fn get_string(&self, key: &str, argument: Option<&str>) -> String {
        let value = match key {
            "systemcontext" => "System",
            "categorycontext" => "Category: {$a}",
            "errorexists" => "Synchronization already defined",
            "invaliditemid" => "Incorrect item ID",
            "invalidroleid" => "Incorrect role ID",
            "required" => "Required",
            "notificationcreated" => "Created new synchronization",
            "notificationdeleted" => "Deleted synchronization",
            "deleteconfirm" => "Are you sure you want to delete this synchronization?",
            "strftimedatetime" => "%d %B %Y, %H:%M",
            "datelocale" => "en_US",
            "unknowncontext" => "Unknown context",
            "role_manager" => "Manager",
            "role_coursecreator" => "Course creator",
            "role_editingteacher" => "Teacher",
            "role_student" => "Student",
            _ => return format!("[[{key}]]"),
        };

        match argument {
            Some(argument) => value.replace("{$a}", argument),
            None => value.to_owned(),
        }
    }
}

pub struct TrimFormatter;

impl TextFormatter for TrimFormatter {
    fn format_string(&self, raw: &str) -> String {
        raw.trim().to_owned()
    }
}

pub struct CaseInsensitiveCollator;

impl Collator for CaseInsensitiveCollator {
    fn compare(&self, left: &str, right: &str) -> Ordering {
        left.to_lowercase().cmp(&right.to_lowercase())
    }
}

pub fn presentation() -> PresentationPorts {
    PresentationPorts {
        strings: Arc::new(EnglishStrings),
        formatter: Arc::new(TrimFormatter),
        collator: Arc::new(CaseInsensitiveCollator),
    }
}
