use axum::Router;
use axum::middleware::from_fn;
use axum::routing::get;
use cohortrole_core::AppError;
use tower_http::trace::TraceLayer;

use crate::state::AppState;
use crate::{handlers, middleware};

mod cors;


pub fn build_router(app_state: AppState, frontend_url: &str) -> Result<Router, AppError> {
    let protected_routes = Router::new()
        .route(
            "/api/cohort-roles",
            get(handlers::cohort_roles::list_cohort_roles_handler)
                .post(handlers::cohort_roles::create_cohort_role_handler),
        )
        .route(
            "/api/cohort-roles/form",
            get(handlers::cohort_roles::add_rule_form_handler),
        )
        .route(
            "/api/cohort-roles/{rule_id}",
            get(handlers::cohort_roles::delete_confirmation_handler)
                .delete(handlers::cohort_roles::delete_cohort_role_handler),
        )
        .route_layer(from_fn(middleware::require_actor));

    Ok(Router::new()
        .route("/health", get(handlers::health::health_handler))
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors::build_cors_layer(frontend_url)?)
        .with_state(app_state))
}
