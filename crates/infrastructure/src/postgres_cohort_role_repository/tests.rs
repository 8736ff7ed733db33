use cohortrole_application::{
    CohortRoleRepository, NewCohortRoleRule, RuleListQuery, RuleSortField, SortDirection,
};
use cohortrole_core::AppError;
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;

use super::PostgresCohortRoleRepository;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

async fn test_pool() -> Option<PgPool> {
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        return None;
    };

    let pool = match PgPoolOptions::new()
        .max_connections(4)
        .connect(database_url.as_str())
        .await
    {
        Ok(pool) => pool,
        Err(error) => panic!("failed to connect to DATABASE_URL in test: {error}"),
    };

    if let Err(error) = MIGRATOR.run(&pool).await {
        panic!("failed to run migrations for postgres cohort role tests: {error}");
    }

    Some(pool)
}

async fn insert_cohort(pool: &PgPool, name: &str) -> i64 {
    let inserted = sqlx::query_scalar::<_, i64>(
        r#"
            INSERT INTO cohort (contextid, name)
            VALUES (1, $1)
            RETURNING id
            "#,
    )
    .bind(name)
    .fetch_one(pool)
    .await;

    match inserted {
        Ok(id) => id,
        Err(error) => panic!("failed to insert cohort fixture: {error}"),
    }
}

async fn insert_role(pool: &PgPool, shortname: &str) -> i64 {
    let inserted = sqlx::query_scalar::<_, i64>(
        r#"
            INSERT INTO role (shortname, sortorder)
            VALUES ($1, (SELECT COALESCE(MAX(sortorder), 0) + 1 FROM role))
            RETURNING id
            "#,
    )
    .bind(shortname)
    .fetch_one(pool)
    .await;

    match inserted {
        Ok(id) => id,
        Err(error) => panic!("failed to insert role fixture: {error}"),
    }
}

fn unique_name(prefix: &str) -> String {
    format!("{prefix}-{}", uuid::Uuid::new_v4().simple())
}

fn new_rule(cohort_id: i64, role_id: i64) -> NewCohortRoleRule {
    NewCohortRoleRule {
        cohort_id,
        role_id,
        user_modified: 2,
    }
}

#[tokio::test]
async fn unique_index_rejects_duplicate_pair() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let repository = PostgresCohortRoleRepository::new(pool.clone());
    let cohort_id = insert_cohort(&pool, &unique_name("cohort")).await;
    let role_id = insert_role(&pool, &unique_name("role")).await;

    let first = repository.insert_rule(new_rule(cohort_id, role_id)).await;
    let second = repository.insert_rule(new_rule(cohort_id, role_id)).await;

    assert!(matches!(first, Ok(ref rule) if rule.cohort_id == cohort_id));
    assert!(matches!(second, Err(AppError::DuplicateRule(_))));
    assert!(matches!(
        repository.rule_exists(cohort_id, role_id).await,
        Ok(true)
    ));
}

#[tokio::test]
async fn concurrent_inserts_store_one_rule() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let repository = PostgresCohortRoleRepository::new(pool.clone());
    let cohort_id = insert_cohort(&pool, &unique_name("cohort")).await;
    let role_id = insert_role(&pool, &unique_name("role")).await;

    let (left, right) = tokio::join!(
        repository.insert_rule(new_rule(cohort_id, role_id)),
        repository.insert_rule(new_rule(cohort_id, role_id)),
    );

    assert_eq!(usize::from(left.is_ok()) + usize::from(right.is_ok()), 1);
}

#[tokio::test]
async fn delete_returns_prior_record_then_nothing() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let repository = PostgresCohortRoleRepository::new(pool.clone());
    let cohort_id = insert_cohort(&pool, &unique_name("cohort")).await;
    let role_id = insert_role(&pool, &unique_name("role")).await;
    let Ok(rule) = repository.insert_rule(new_rule(cohort_id, role_id)).await else {
        panic!("expected insert to succeed");
    };

    let first = repository.delete_rule(rule.id).await;
    let second = repository.delete_rule(rule.id).await;

    assert!(matches!(first, Ok(Some(ref removed)) if removed.id == rule.id));
    assert!(matches!(second, Ok(None)));
    assert!(matches!(repository.find_rule(rule.id).await, Ok(None)));
}

#[tokio::test]
async fn listing_joins_cohort_and_role() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let repository = PostgresCohortRoleRepository::new(pool.clone());
    let cohort_name = unique_name("listed");
    let cohort_id = insert_cohort(&pool, &cohort_name).await;
    let role_id = insert_role(&pool, &unique_name("role")).await;
    let Ok(rule) = repository.insert_rule(new_rule(cohort_id, role_id)).await else {
        panic!("expected insert to succeed");
    };

    let query = RuleListQuery {
        sort: RuleSortField::TimeCreated,
        direction: SortDirection::Descending,
        page: 0,
        per_page: 500,
    };
    let rows = repository.list_rules(&query).await.unwrap_or_default();
    let row = rows.iter().find(|row| row.rule.id == rule.id);

    assert!(matches!(row, Some(row) if row.cohort.name == cohort_name && row.role.id == role_id));
    assert!(matches!(repository.count_rules().await, Ok(count) if count >= 1));
}
