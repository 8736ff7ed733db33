use std::sync::Arc;

use tracing::debug;

use cohortrole_core::{ActorIdentity, AppError, AppResult, COHORT_FIELD, ROLE_FIELD};
use cohortrole_domain::{Cohort, CohortRoleRule, ContextLevel, Role, labels};

use crate::cohort_path_resolver::CohortPathResolver;
use crate::directory_ports::{
    COHORTS_PER_CONTEXT_LIMIT, CategoryRepository, PlatformDirectory, PresentationPorts,
};
use crate::rule_store_ports::RuleListQuery;
use crate::rule_store_service::{CreateRuleInput, RuleStoreService};

mod options;
mod views;


pub use options::{
    ContextGroupSource, OptionGroup, SelectOption, build_cohort_option_groups, merge_role_options,
};
pub use views::{
    AddRuleForm, AddRuleOutcome, AddRuleSubmission, DeleteConfirmation, FieldError,
    ListingColumn, RuleListing, RuleListingRow, SelectField, delete_path, format_timestamp,
    is_sortable_column,
};

/// Listing columns in display order.
const LISTING_COLUMNS: [(&str, &str); 5] = [
    ("cohort", labels::COHORT),
    ("cohortcontext", labels::COHORT_CONTEXT),
    ("role", labels::ROLE),
    ("timecreated", labels::MODIFIED),
    ("edit", labels::EDIT),
];

/// Application service backing the add form and rule listing.
#[derive(Clone)]
pub struct RuleAdminService {
    rule_store: RuleStoreService,
    path_resolver: CohortPathResolver,
    directory: Arc<dyn PlatformDirectory>,
    categories: Arc<dyn CategoryRepository>,
    presentation: PresentationPorts,
}

impl RuleAdminService {
    /// Creates a new service from required dependencies.
    #[must_use]
    pub fn new(
        rule_store: RuleStoreService,
        path_resolver: CohortPathResolver,
        directory: Arc<dyn PlatformDirectory>,
        categories: Arc<dyn CategoryRepository>,
        presentation: PresentationPorts,
    ) -> Self {
        Self {
            rule_store,
            path_resolver,
            directory,
            categories,
            presentation,
        }
    }

    /// Collects cohort and role options for the add form.
    pub async fn add_rule_form(&self, actor: &ActorIdentity) -> AppResult<AddRuleForm> {
        let system_context = self.directory.system_context().await?;

        let mut sources = vec![ContextGroupSource {
            context_id: system_context.id,
            label: self.presentation.label(labels::SYSTEM_CONTEXT),
        }];
        let mut cohorts = self
            .directory
            .list_cohorts_in_context(system_context.id, COHORTS_PER_CONTEXT_LIMIT)
            .await?;

        for category in self.categories.list_categories().await? {
            let Some(context) = self.directory.find_category_context(category.id).await? else {
                continue;
            };

            let category_cohorts = self
                .directory
                .list_cohorts_in_context(context.id, COHORTS_PER_CONTEXT_LIMIT)
                .await?;
            if category_cohorts.is_empty() {
                continue;
            }

            sources.push(ContextGroupSource {
                context_id: context.id,
                label: self.path_resolver.category_label(&category).await,
            });
            cohorts.extend(category_cohorts);
        }

        let assignable = self
            .directory
            .list_assignable_roles(actor, system_context.id)
            .await?;
        let allowed_at_system = self
            .directory
            .list_roles_for_context_level(ContextLevel::System)
            .await?;

        let formatter = self.presentation.formatter.as_ref();
        let collator = self.presentation.collator.as_ref();

        Ok(AddRuleForm {
            heading: self.presentation.label(labels::HEADING_ADD),
            cohort_field: SelectField {
                name: COHORT_FIELD,
                label: self.presentation.label(labels::COHORT),
                help: self.presentation.label(labels::COHORT_HELP),
                required: true,
            },
            cohort_groups: build_cohort_option_groups(&sources, &cohorts, formatter, collator),
            role_field: SelectField {
                name: ROLE_FIELD,
                label: self.presentation.label(labels::ROLE),
                help: self.presentation.label(labels::ROLE_HELP),
                required: true,
            },
            role_options: merge_role_options(&assignable, &allowed_at_system, &self.presentation),
        })
    }

    /// Validates a form submission and stores the rule.
    ///
    /// Rule validation failures become field errors; anything else propagates.
    pub async fn submit_add_rule(
        &self,
        actor: &ActorIdentity,
        submission: AddRuleSubmission,
    ) -> AppResult<AddRuleOutcome> {
        let cohort_id = submission.cohort_id.filter(|value| *value > 0);
        let role_id = submission.role_id.filter(|value| *value > 0);

        let (Some(cohort_id), Some(role_id)) = (cohort_id, role_id) else {
            let required = self.presentation.label(labels::REQUIRED);
            let errors = [(COHORT_FIELD, cohort_id), (ROLE_FIELD, role_id)]
                .into_iter()
                .filter(|(_, value)| value.is_none())
                .map(|(field, _)| FieldError {
                    field,
                    message: required.clone(),
                })
                .collect();
            return Ok(AddRuleOutcome::Rejected { errors });
        };

        match self
            .rule_store
            .create(actor, CreateRuleInput { cohort_id, role_id })
            .await
        {
            Ok(rule) => Ok(AddRuleOutcome::Created {
                rule,
                notification: self.presentation.label(labels::NOTIFICATION_CREATED),
            }),
            Err(error) => match (error.field(), field_error_key(&error)) {
                (Some(field), Some(key)) => Ok(AddRuleOutcome::Rejected {
                    errors: vec![FieldError {
                        field,
                        message: self.presentation.label(key),
                    }],
                }),
                _ => Err(error),
            },
        }
    }

    /// Renders one page of the rule listing.
    pub async fn list_rules(&self, query: RuleListQuery) -> AppResult<RuleListing> {
        let page = self.rule_store.list(query).await?;

        let mut rows = Vec::with_capacity(page.rows.len());
        for row in &page.rows {
            rows.push(self.describe_rule(&row.rule, &row.cohort, &row.role).await?);
        }

        let columns = LISTING_COLUMNS
            .iter()
            .map(|(key, label)| ListingColumn {
                key: *key,
                label: self.presentation.label(label),
                sortable: is_sortable_column(key),
            })
            .collect();

        Ok(RuleListing {
            heading: self.presentation.label(labels::HEADING_INDEX),
            columns,
            rows,
            total: page.total,
            query: page.query,
        })
    }

    /// Describes a rule before the operator confirms its deletion.
    pub async fn delete_confirmation(&self, rule_id: i64) -> AppResult<DeleteConfirmation> {
        let rule = self
            .rule_store
            .find(rule_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("rule '{rule_id}' was not found")))?;

        let cohort = self
            .directory
            .find_cohort(rule.cohort_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("cohort '{}' was not found", rule.cohort_id))
            })?;
        let role = self
            .directory
            .find_role(rule.role_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("role '{}' was not found", rule.role_id)))?;

        Ok(DeleteConfirmation {
            heading: self.presentation.label(labels::HEADING_DELETE),
            prompt: self.presentation.label(labels::DELETE_CONFIRM),
            row: self.describe_rule(&rule, &cohort, &role).await?,
        })
    }

    /// Deletes a rule and returns the localized confirmation.
    pub async fn delete_rule(&self, actor: &ActorIdentity, rule_id: i64) -> AppResult<String> {
        self.rule_store.delete(actor, rule_id).await?;
        Ok(self.presentation.label(labels::NOTIFICATION_DELETED))
    }

    async fn describe_rule(
        &self,
        rule: &CohortRoleRule,
        cohort: &Cohort,
        role: &Role,
    ) -> AppResult<RuleListingRow> {
        let formatter = &self.presentation.formatter;
        let pattern = self.presentation.label(labels::STRFTIME_DATETIME);
        let locale = self.presentation.label(labels::DATE_LOCALE);

        let cohort_context = match self.path_resolver.resolve_display_name(cohort).await {
            Ok(label) => label,
            Err(AppError::NotFound(reason) | AppError::Validation(reason)) => {
                debug!(
                    rule_id = rule.id,
                    cohort_id = cohort.id,
                    context_id = cohort.context_id,
                    reason = %reason,
                    "cohort context unresolved, showing placeholder"
                );
                self.presentation.label(labels::UNKNOWN_CONTEXT)
            }
            Err(error) => return Err(error),
        };

        Ok(RuleListingRow {
            rule_id: rule.id,
            cohort_id: cohort.id,
            cohort_name: formatter.format_string(cohort.name.as_str()),
            cohort_context,
            role_id: role.id,
            // Roles are always granted at System context.
            role_name: self.presentation.role_name(role),
            time_created: rule.time_created,
            time_created_label: format_timestamp(
                rule.time_created,
                pattern.as_str(),
                locale.as_str(),
            ),
            delete_path: delete_path(rule.id),
        })
    }
}

fn field_error_key(error: &AppError) -> Option<&'static str> {
    match error {
        AppError::DuplicateRule(_) => Some(labels::ERROR_EXISTS),
        AppError::InvalidCohort(_) => Some(labels::INVALID_ITEM_ID),
        AppError::InvalidRole(_) => Some(labels::INVALID_ROLE_ID),
        _ => None,
    }
}
