use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::contacts::store::{
    delete_contact, insert_contact, list_contacts, update_contact, ContactPatch, NewContact,
};
use crate::errors::AppError;
use crate::models::contact::ContactRow;
use crate::routes::UserIdQuery;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateContactRequest {
    pub user_id: Uuid,
    #[serde(flatten)]
    pub contact: NewContact,
}

#[derive(Debug, Deserialize)]
pub struct UpdateContactRequest {
    pub user_id: Uuid,
    #[serde(flatten)]
    pub patch: ContactPatch,
}

/// GET /api/v1/contacts
pub async fn handle_list_contacts(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<ContactRow>>, AppError> {
    Ok(Json(list_contacts(&state.db, params.user_id).await?))
}

/// POST /api/v1/contacts
pub async fn handle_create_contact(
    State(state): State<AppState>,
    Json(req): Json<CreateContactRequest>,
) -> Result<(StatusCode, Json<ContactRow>), AppError> {
    if req.contact.name.trim().is_empty() {
        return Err(AppError::Validation("name cannot be empty".to_string()));
    }
    let row = insert_contact(&state.db, req.user_id, &req.contact).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// PATCH /api/v1/contacts/:id
pub async fn handle_update_contact(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateContactRequest>,
) -> Result<Json<ContactRow>, AppError> {
    if matches!(req.patch.name.as_deref(), Some(n) if n.trim().is_empty()) {
        return Err(AppError::Validation("name cannot be empty".to_string()));
    }
    let row = update_contact(&state.db, req.user_id, id, &req.patch)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Contact {id} not found")))?;
    Ok(Json(row))
}

/// DELETE /api/v1/contacts/:id
pub async fn handle_delete_contact(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<StatusCode, AppError> {
    if !delete_contact(&state.db, params.user_id, id).await? {
        return Err(AppError::NotFound(format!("Contact {id} not found")));
    }
    Ok(StatusCode::NO_CONTENT)
}
