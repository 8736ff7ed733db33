use std::sync::Arc;

use cohortrole_application::{
    CategoryRepository, CohortPathResolver, CohortRoleRepository, PlatformDirectory,
    PresentationPorts, RuleAdminService, RuleEventSink, RuleStoreService,
};
use cohortrole_core::AppError;
use cohortrole_infrastructure::{
    FilteringTextFormatter, InMemoryCohortRoleRepository, InMemoryPlatformDirectory,
    LocaleCollator, PostgresCohortRoleRepository, PostgresPlatformDirectory,
    PostgresRuleEventSink, StaticStringCatalog, TracingRuleEventSink,
};
use sqlx::PgPool;

use crate::api_config::{ApiConfig, StorageConfig};
use crate::dev_seed;
use crate::state::AppState;

use super::database::connect_and_migrate;

struct StoragePorts {
    repository: Arc<dyn CohortRoleRepository>,
    directory: Arc<dyn PlatformDirectory>,
    categories: Arc<dyn CategoryRepository>,
    event_sink: Arc<dyn RuleEventSink>,
}

pub async fn build_app_state(config: &ApiConfig) -> Result<AppState, AppError> {
    let presentation = build_presentation(&config.language)?;

    match &config.storage {
        StorageConfig::Memory => build_in_memory_state(presentation).await,
        StorageConfig::Postgres { database_url } => {
            let pool = connect_and_migrate(database_url).await?;
            let ports = postgres_ports(pool.clone());
            Ok(assemble(ports, presentation, Some(pool)))
        }
    }
}

pub async fn build_in_memory_state(presentation: PresentationPorts) -> Result<AppState, AppError> {
    let directory = Arc::new(InMemoryPlatformDirectory::new());
    dev_seed::seed_directory(&directory).await;

    let ports = StoragePorts {
        repository: Arc::new(InMemoryCohortRoleRepository::new(directory.clone())),
        directory: directory.clone(),
        categories: directory,
        event_sink: Arc::new(TracingRuleEventSink::new()),
    };

    Ok(assemble(ports, presentation, None))
}

pub fn build_presentation(language: &str) -> Result<PresentationPorts, AppError> {
    Ok(PresentationPorts {
        strings: Arc::new(StaticStringCatalog::for_language(language)?),
        formatter: Arc::new(FilteringTextFormatter),
        collator: Arc::new(LocaleCollator::for_language(language)?),
    })
}

fn postgres_ports(pool: PgPool) -> StoragePorts {
    let directory = Arc::new(PostgresPlatformDirectory::new(pool.clone()));

    StoragePorts {
        repository: Arc::new(PostgresCohortRoleRepository::new(pool.clone())),
        directory: directory.clone(),
        categories: directory,
        event_sink: Arc::new(PostgresRuleEventSink::new(pool)),
    }
}

fn assemble(
    ports: StoragePorts,
    presentation: PresentationPorts,
    postgres_pool: Option<PgPool>,
) -> AppState {
    let rule_store = RuleStoreService::new(
        ports.repository,
        ports.directory.clone(),
        ports.event_sink,
    );
    let path_resolver = CohortPathResolver::new(
        ports.directory.clone(),
        ports.categories.clone(),
        presentation.clone(),
    );

    AppState {
        rule_admin_service: RuleAdminService::new(
            rule_store,
            path_resolver,
            ports.directory,
            ports.categories,
            presentation,
        ),
        postgres_pool,
    }
}
