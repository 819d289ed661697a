//! Axum route handlers for CV bullets and CV versions.

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cv::bullets::{generate_cv_bullets, CvBulletsPayload, MAX_TOTAL_BULLETS, MOST_RELEVANT_LIMIT};
use crate::cv::normalize_role_key;
use crate::cv::plain_text::{build_cv_plain_text, CvDraft};
use crate::cv::store::{
    delete_cv_version, get_cv_bullets, get_cv_version, insert_cv_version, list_cv_versions,
    save_cv_bullets, update_cv_version, CvVersionPatch, NewCvVersion,
};
use crate::errors::AppError;
use crate::inventory::skills::derive_transferable_skills;
use crate::inventory::store::get_entries;
use crate::models::cv::{CvBulletsRow, CvVersionRow};
use crate::routes::UserIdQuery;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GenerateBulletsRequest {
    pub user_id: Uuid,
    pub role_title: String,
    pub role_key: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BulletsQuery {
    pub user_id: Uuid,
    pub role_key: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SaveBulletsRequest {
    pub user_id: Uuid,
    pub role_key: Option<String>,
    #[serde(default)]
    pub role_title: String,
    pub payload: CvBulletsPayload,
}

#[derive(Debug, Serialize)]
pub struct BulletsResponse {
    pub role_key: String,
    pub role_title: String,
    pub payload: CvBulletsPayload,
}

impl From<CvBulletsRow> for BulletsResponse {
    fn from(row: CvBulletsRow) -> Self {
        BulletsResponse {
            role_key: row.role_key,
            role_title: row.role_title,
            payload: row.payload.0,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct VersionsQuery {
    pub user_id: Uuid,
    pub role_key: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateVersionRequest {
    pub user_id: Uuid,
    #[serde(flatten)]
    pub version: NewCvVersion,
}

#[derive(Debug, Deserialize)]
pub struct UpdateVersionRequest {
    pub user_id: Uuid,
    #[serde(flatten)]
    pub patch: CvVersionPatch,
}

// ────────────────────────────────────────────────────────────────────────────
// Bullets
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/cv/bullets/generate
///
/// Derives skills from the current inventory, ranks entries against the role,
/// and stores the result under the role key.
pub async fn handle_generate_bullets(
    State(state): State<AppState>,
    Json(req): Json<GenerateBulletsRequest>,
) -> Result<Json<BulletsResponse>, AppError> {
    let role_title = req.role_title.trim();
    if role_title.is_empty() {
        return Err(AppError::Validation("role_title cannot be empty".to_string()));
    }
    let role_key = normalize_role_key(req.role_key.as_deref());

    let entries = get_entries(&state.db, req.user_id).await?;
    let skills = derive_transferable_skills(&entries).transferable_skills;
    let payload = generate_cv_bullets(role_title, &entries, &skills);

    let row = save_cv_bullets(&state.db, req.user_id, &role_key, role_title, &payload).await?;
    Ok(Json(row.into()))
}

/// GET /api/v1/cv/bullets
pub async fn handle_get_bullets(
    State(state): State<AppState>,
    Query(params): Query<BulletsQuery>,
) -> Result<Json<BulletsResponse>, AppError> {
    let role_key = normalize_role_key(params.role_key.as_deref());
    let row = get_cv_bullets(&state.db, params.user_id, &role_key)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No CV bullets saved for role '{role_key}'")))?;
    Ok(Json(row.into()))
}

/// PUT /api/v1/cv/bullets
///
/// Stores a hand-edited payload. The generator's limits still apply.
pub async fn handle_save_bullets(
    State(state): State<AppState>,
    Json(req): Json<SaveBulletsRequest>,
) -> Result<Json<BulletsResponse>, AppError> {
    validate_payload(&req.payload)?;
    let role_key = normalize_role_key(req.role_key.as_deref());
    let row = save_cv_bullets(
        &state.db,
        req.user_id,
        &role_key,
        req.role_title.trim(),
        &req.payload,
    )
    .await?;
    Ok(Json(row.into()))
}

fn validate_payload(payload: &CvBulletsPayload) -> Result<(), AppError> {
    if payload.most_relevant.len() > MOST_RELEVANT_LIMIT {
        return Err(AppError::Validation(format!(
            "most_relevant holds at most {MOST_RELEVANT_LIMIT} bullets"
        )));
    }
    if payload.total() > MAX_TOTAL_BULLETS {
        return Err(AppError::Validation(format!(
            "at most {MAX_TOTAL_BULLETS} bullets in total"
        )));
    }
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Versions
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/cv/versions
pub async fn handle_list_versions(
    State(state): State<AppState>,
    Query(params): Query<VersionsQuery>,
) -> Result<Json<Vec<CvVersionRow>>, AppError> {
    let role_key = params.role_key.as_deref().map(|k| normalize_role_key(Some(k)));
    let rows = list_cv_versions(&state.db, params.user_id, role_key.as_deref()).await?;
    Ok(Json(rows))
}

/// POST /api/v1/cv/versions
pub async fn handle_create_version(
    State(state): State<AppState>,
    Json(req): Json<CreateVersionRequest>,
) -> Result<(StatusCode, Json<CvVersionRow>), AppError> {
    if req.version.label.trim().is_empty() {
        return Err(AppError::Validation("label cannot be empty".to_string()));
    }
    let role_key = normalize_role_key(req.version.role_key.as_deref());
    let row = insert_cv_version(&state.db, req.user_id, &role_key, &req.version).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// GET /api/v1/cv/versions/:id
pub async fn handle_get_version(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<CvVersionRow>, AppError> {
    let row = fetch_version(&state, params.user_id, id).await?;
    Ok(Json(row))
}

/// PATCH /api/v1/cv/versions/:id
pub async fn handle_update_version(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateVersionRequest>,
) -> Result<Json<CvVersionRow>, AppError> {
    if matches!(req.patch.label.as_deref(), Some(l) if l.trim().is_empty()) {
        return Err(AppError::Validation("label cannot be empty".to_string()));
    }
    let row = update_cv_version(&state.db, req.user_id, id, &req.patch)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("CV version {id} not found")))?;
    Ok(Json(row))
}

/// DELETE /api/v1/cv/versions/:id
pub async fn handle_delete_version(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<StatusCode, AppError> {
    if !delete_cv_version(&state.db, params.user_id, id).await? {
        return Err(AppError::NotFound(format!("CV version {id} not found")));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/cv/versions/:id/plain-text
pub async fn handle_version_plain_text(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<impl IntoResponse, AppError> {
    let row = fetch_version(&state, params.user_id, id).await?;
    let text = build_cv_plain_text(&CvDraft::from(&row));
    Ok(([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], text))
}

async fn fetch_version(state: &AppState, user_id: Uuid, id: Uuid) -> Result<CvVersionRow, AppError> {
    get_cv_version(&state.db, user_id, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("CV version {id} not found")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_payload_limits() {
        let ok = CvBulletsPayload {
            most_relevant: vec!["a".into(); 6],
            supporting: vec!["b".into(); 6],
        };
        assert!(validate_payload(&ok).is_ok());

        let too_many_relevant = CvBulletsPayload {
            most_relevant: vec!["a".into(); 7],
            supporting: vec![],
        };
        assert!(validate_payload(&too_many_relevant).is_err());

        let too_many_total = CvBulletsPayload {
            most_relevant: vec!["a".into(); 6],
            supporting: vec!["b".into(); 7],
        };
        assert!(validate_payload(&too_many_total).is_err());
    }

    #[test]
    fn test_create_version_request_flattens() {
        let req: CreateVersionRequest = serde_json::from_str(&format!(
            r#"{{"user_id": "{}", "label": "PM v1", "top_skills": ["Strategy"]}}"#,
            Uuid::nil()
        ))
        .unwrap();
        assert_eq!(req.version.label, "PM v1");
        assert_eq!(req.version.top_skills, vec!["Strategy".to_string()]);
        assert!(req.version.role_key.is_none());
    }
}
