use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use cohortrole_application::{AddRuleOutcome, AddRuleSubmission, RuleListQuery};
use cohortrole_core::ActorIdentity;

use crate::dto::{
    AddRuleFormResponse, CreateCohortRoleRequest, CreateCohortRoleResponse,
    DeleteConfirmationResponse, GenericMessageResponse, ListCohortRolesQuery, RuleListingResponse,
    ValidationErrorsResponse,
};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_cohort_roles_handler(
    State(state): State<AppState>,
    Query(query): Query<ListCohortRolesQuery>,
) -> ApiResult<Json<RuleListingResponse>> {
    let listing = state
        .rule_admin_service
        .list_rules(RuleListQuery::try_from(query)?)
        .await?;

    Ok(Json(RuleListingResponse::from(listing)))
}

pub async fn add_rule_form_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
) -> ApiResult<Json<AddRuleFormResponse>> {
    let form = state.rule_admin_service.add_rule_form(&actor).await?;

    Ok(Json(AddRuleFormResponse::from(form)))
}

pub async fn create_cohort_role_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
    Json(payload): Json<CreateCohortRoleRequest>,
) -> ApiResult<Response> {
    let outcome = state
        .rule_admin_service
        .submit_add_rule(
            &actor,
            AddRuleSubmission {
                cohort_id: payload.cohort_id,
                role_id: payload.role_id,
            },
        )
        .await?;

    Ok(match outcome {
        AddRuleOutcome::Created { rule, notification } => (
            StatusCode::CREATED,
            Json(CreateCohortRoleResponse {
                rule: rule.into(),
                notification,
            }),
        )
            .into_response(),
        AddRuleOutcome::Rejected { errors } => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ValidationErrorsResponse {
                errors: errors.into_iter().map(Into::into).collect(),
            }),
        )
            .into_response(),
    })
}

pub async fn delete_confirmation_handler(
    State(state): State<AppState>,
    Path(rule_id): Path<i64>,
) -> ApiResult<Json<DeleteConfirmationResponse>> {
    let confirmation = state.rule_admin_service.delete_confirmation(rule_id).await?;

    Ok(Json(DeleteConfirmationResponse::from(confirmation)))
}

pub async fn delete_cohort_role_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
    Path(rule_id): Path<i64>,
) -> ApiResult<Json<GenericMessageResponse>> {
    let message = state
        .rule_admin_service
        .delete_rule(&actor, rule_id)
        .await?;

    Ok(Json(GenericMessageResponse { message }))
}
