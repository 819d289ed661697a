//! Axum route handlers for the applications dashboard.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::applications::comms::{generate_comms, CommsTemplates, Tone};
use crate::applications::follow_up::{application_follow_up_due, suggested_follow_up};
use crate::applications::store::{
    delete_application, get_application, insert_application, list_applications,
    update_application, ApplicationPatch, NewApplication,
};
use crate::errors::AppError;
use crate::models::application::ApplicationRow;
use crate::routes::UserIdQuery;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateApplicationRequest {
    pub user_id: Uuid,
    #[serde(flatten)]
    pub application: NewApplication,
}

#[derive(Debug, Deserialize)]
pub struct UpdateApplicationRequest {
    pub user_id: Uuid,
    #[serde(flatten)]
    pub patch: ApplicationPatch,
}

#[derive(Debug, Deserialize)]
pub struct CommsRequest {
    pub user_id: Uuid,
    #[serde(default)]
    pub tone: Tone,
}

#[derive(Debug, Deserialize)]
pub struct FollowUpsQuery {
    pub user_id: Uuid,
    /// Defaults to the current UTC date.
    pub today: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct FollowUpItem {
    pub suggested_follow_up: NaiveDate,
    #[serde(flatten)]
    pub application: ApplicationRow,
}

/// GET /api/v1/applications
pub async fn handle_list_applications(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<ApplicationRow>>, AppError> {
    Ok(Json(list_applications(&state.db, params.user_id).await?))
}

/// POST /api/v1/applications
pub async fn handle_create_application(
    State(state): State<AppState>,
    Json(req): Json<CreateApplicationRequest>,
) -> Result<(StatusCode, Json<ApplicationRow>), AppError> {
    require_text("company", Some(&req.application.company))?;
    require_text("role", Some(&req.application.role))?;
    let row = insert_application(&state.db, req.user_id, &req.application).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// PATCH /api/v1/applications/:id
pub async fn handle_update_application(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateApplicationRequest>,
) -> Result<Json<ApplicationRow>, AppError> {
    require_text("company", req.patch.company.as_ref())?;
    require_text("role", req.patch.role.as_ref())?;
    let row = update_application(&state.db, req.user_id, id, &req.patch)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Application {id} not found")))?;
    Ok(Json(row))
}

/// DELETE /api/v1/applications/:id
pub async fn handle_delete_application(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<StatusCode, AppError> {
    if !delete_application(&state.db, params.user_id, id).await? {
        return Err(AppError::NotFound(format!("Application {id} not found")));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/applications/:id/comms
pub async fn handle_generate_comms(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<CommsRequest>,
) -> Result<Json<CommsTemplates>, AppError> {
    let app = get_application(&state.db, req.user_id, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Application {id} not found")))?;
    Ok(Json(generate_comms(&app, req.tone)))
}

/// GET /api/v1/applications/follow-ups
pub async fn handle_follow_ups(
    State(state): State<AppState>,
    Query(params): Query<FollowUpsQuery>,
) -> Result<Json<Vec<FollowUpItem>>, AppError> {
    let today = params.today.unwrap_or_else(|| Utc::now().date_naive());
    let apps = list_applications(&state.db, params.user_id).await?;
    Ok(Json(due_follow_ups(apps, today)))
}

/// Due applications, oldest suggested date first.
fn due_follow_ups(apps: Vec<ApplicationRow>, today: NaiveDate) -> Vec<FollowUpItem> {
    let mut due: Vec<FollowUpItem> = apps
        .into_iter()
        .filter(|app| application_follow_up_due(app, today))
        .map(|application| FollowUpItem {
            suggested_follow_up: suggested_follow_up(application.applied_on),
            application,
        })
        .collect();
    due.sort_by_key(|item| item.suggested_follow_up);
    due
}

/// `None` means the field was not supplied; a supplied value must not be blank.
fn require_text(field: &str, value: Option<&String>) -> Result<(), AppError> {
    match value {
        Some(v) if v.trim().is_empty() => {
            Err(AppError::Validation(format!("{field} cannot be empty")))
        }
        _ => Ok(()),
    }
}
