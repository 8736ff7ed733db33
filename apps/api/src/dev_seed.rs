use cohortrole_domain::{Category, Cohort, ContextLevel, PlatformContext, Role};
use cohortrole_infrastructure::InMemoryPlatformDirectory;
use tracing::info;

pub const DEV_SEED_ADMIN_USER_ID: i64 = 2;
pub const DEV_SEED_SYSTEM_CONTEXT_ID: i64 = 1;

const DEV_SEED_CATEGORIES: &[(i64, &str, Option<i64>, i64, i64)] = &[
    // (id, name, parent, sortorder, context id)
    (1, "Faculties", None, 10_000, 3),
    (2, "Science", Some(1), 20_000, 4),
    (3, "Arts", Some(1), 30_000, 5),
];

const DEV_SEED_COHORTS: &[(i64, &str, i64)] = &[
    (1, "All staff", DEV_SEED_SYSTEM_CONTEXT_ID),
    (2, "Faculty board", 3),
    (3, "Science students", 4),
    (4, "Course helpers", 6),
];

const DEV_SEED_ROLES: &[(i64, &str, &str)] = &[
    (1, "manager", ""),
    (2, "coursecreator", ""),
    (3, "editingteacher", ""),
    (4, "teacher", "Non-editing teacher"),
    (5, "student", ""),
    (7, "user", "Authenticated user"),
];

/// Fills an in-memory directory with a small category tree, cohorts and roles.
pub async fn seed_directory(directory: &InMemoryPlatformDirectory) {
    directory
        .insert_context(PlatformContext {
            id: DEV_SEED_SYSTEM_CONTEXT_ID,
            level: ContextLevel::System,
            instance_id: 0,
        })
        .await;

    for (id, name, parent, sortorder, context_id) in DEV_SEED_CATEGORIES {
        directory
            .insert_category(Category {
                id: *id,
                name: (*name).to_owned(),
                parent: *parent,
                sortorder: *sortorder,
            })
            .await;
        directory
            .insert_context(PlatformContext {
                id: *context_id,
                level: ContextLevel::CourseCategory,
                instance_id: *id,
            })
            .await;
    }

    directory
        .insert_context(PlatformContext {
            id: 6,
            level: ContextLevel::Course,
            instance_id: 10,
        })
        .await;

    for (id, name, context_id) in DEV_SEED_COHORTS {
        directory
            .insert_cohort(Cohort {
                id: *id,
                name: (*name).to_owned(),
                context_id: *context_id,
            })
            .await;
    }

    for (sortorder, (id, shortname, name)) in (1_i64..).zip(DEV_SEED_ROLES) {
        directory
            .insert_role(Role {
                id: *id,
                shortname: (*shortname).to_owned(),
                name: (*name).to_owned(),
                sortorder,
            })
            .await;
    }

    for role_id in [1, 2] {
        directory
            .allow_role_at_level(role_id, ContextLevel::System)
            .await;
    }
    directory.add_site_admin(DEV_SEED_ADMIN_USER_ID).await;

    info!(
        categories = DEV_SEED_CATEGORIES.len(),
        cohorts = DEV_SEED_COHORTS.len(),
        roles = DEV_SEED_ROLES.len(),
        "seeded in-memory platform directory"
    );
}
