use std::sync::Arc;

use tracing::debug;

use cohortrole_core::{AppError, AppResult};
use cohortrole_domain::{AncestorWalk, Category, Cohort, ContextLevel, PlatformContext, labels};

use crate::directory_ports::{CategoryRepository, PlatformDirectory, PresentationPorts};


/// Builds human-readable labels for where a cohort lives.
#[derive(Clone)]
pub struct CohortPathResolver {
    directory: Arc<dyn PlatformDirectory>,
    categories: Arc<dyn CategoryRepository>,
    presentation: PresentationPorts,
}

impl CohortPathResolver {
    /// Creates a new resolver from required dependencies.
    #[must_use]
    pub fn new(
        directory: Arc<dyn PlatformDirectory>,
        categories: Arc<dyn CategoryRepository>,
        presentation: PresentationPorts,
    ) -> Self {
        Self {
            directory,
            categories,
            presentation,
        }
    }

    /// Returns the label of the context a cohort belongs to.
    ///
    /// System cohorts get the `systemcontext` label, category cohorts the
    /// `categorycontext` label with the full category path.
    pub async fn resolve_display_name(&self, cohort: &Cohort) -> AppResult<String> {
        let context = self
            .directory
            .find_context(cohort.context_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "context '{}' of cohort '{}' was not found",
                    cohort.context_id, cohort.id
                ))
            })?;

        self.context_label(&context).await
    }

    /// Returns the label for a context.
    pub async fn context_label(&self, context: &PlatformContext) -> AppResult<String> {
        match context.level {
            ContextLevel::System => Ok(self.presentation.label(labels::SYSTEM_CONTEXT)),
            ContextLevel::CourseCategory => {
                match self.categories.find_category(context.instance_id).await? {
                    Some(category) => Ok(self.category_label(&category).await),
                    None => Ok(context.generic_name()),
                }
            }
            _ => Ok(context.generic_name()),
        }
    }

    /// Returns the `categorycontext` label for a category.
    pub async fn category_label(&self, category: &Category) -> String {
        let path = self.category_path(category).await;
        self.presentation
            .strings
            .get_string(labels::CATEGORY_CONTEXT, Some(path.as_str()))
    }

    /// Returns `"<ancestor> / ... / <category>"`, oldest ancestor first.
    ///
    /// Never fails: unresolvable or cyclic parents end the walk early.
    pub async fn category_path(&self, category: &Category) -> String {
        let formatter = &self.presentation.formatter;
        let mut walk = AncestorWalk::starting_at(category);

        while let Some(parent_id) = walk.next_parent() {
            match self.categories.find_category(parent_id).await {
                Ok(Some(parent)) => {
                    let name = formatter.format_string(parent.name.as_str());
                    walk.visit(&parent, name);
                }
                Ok(None) => {
                    debug!(
                        category_id = category.id,
                        parent_id, "category parent does not exist, path truncated"
                    );
                    walk.stop();
                }
                Err(error) => {
                    debug!(
                        category_id = category.id,
                        parent_id,
                        %error,
                        "category parent lookup failed, path truncated"
                    );
                    walk.stop();
                }
            }
        }

        walk.into_path(formatter.format_string(category.name.as_str()).as_str())
    }
}
