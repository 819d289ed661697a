use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::radar::RadarItemRow;
use crate::radar::store::{
    delete_radar_item, insert_radar_item, list_radar_items, update_radar_item, NewRadarItem,
    RadarItemPatch,
};
use crate::routes::UserIdQuery;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateRadarItemRequest {
    pub user_id: Uuid,
    #[serde(flatten)]
    pub item: NewRadarItem,
}

#[derive(Debug, Deserialize)]
pub struct UpdateRadarItemRequest {
    pub user_id: Uuid,
    #[serde(flatten)]
    pub patch: RadarItemPatch,
}

/// GET /api/v1/radar
pub async fn handle_list_radar(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<RadarItemRow>>, AppError> {
    Ok(Json(list_radar_items(&state.db, params.user_id).await?))
}

/// POST /api/v1/radar
pub async fn handle_create_radar_item(
    State(state): State<AppState>,
    Json(req): Json<CreateRadarItemRequest>,
) -> Result<(StatusCode, Json<RadarItemRow>), AppError> {
    if req.item.name.trim().is_empty() {
        return Err(AppError::Validation("name cannot be empty".to_string()));
    }
    let row = insert_radar_item(&state.db, req.user_id, &req.item).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// PATCH /api/v1/radar/:id
pub async fn handle_update_radar_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateRadarItemRequest>,
) -> Result<Json<RadarItemRow>, AppError> {
    if matches!(req.patch.name.as_deref(), Some(n) if n.trim().is_empty()) {
        return Err(AppError::Validation("name cannot be empty".to_string()));
    }
    let row = update_radar_item(&state.db, req.user_id, id, &req.patch)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Radar item {id} not found")))?;
    Ok(Json(row))
}

/// DELETE /api/v1/radar/:id
pub async fn handle_delete_radar_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<StatusCode, AppError> {
    if !delete_radar_item(&state.db, params.user_id, id).await? {
        return Err(AppError::NotFound(format!("Radar item {id} not found")));
    }
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::radar::{RadarKind, RadarPriority};

    #[test]
    fn test_create_request_parses_enums() {
        let req: CreateRadarItemRequest = serde_json::from_str(&format!(
            r#"{{"user_id": "{}", "name": "Globex", "kind": "company", "priority": "high"}}"#,
            Uuid::nil()
        ))
        .unwrap();
        assert_eq!(req.item.kind, RadarKind::Company);
        assert_eq!(req.item.priority, Some(RadarPriority::High));
        assert!(req.item.status.is_none());
    }

    #[test]
    fn test_create_request_rejects_unknown_kind() {
        let parsed: Result<CreateRadarItemRequest, _> = serde_json::from_str(&format!(
            r#"{{"user_id": "{}", "name": "Globex", "kind": "agency"}}"#,
            Uuid::nil()
        ));
        assert!(parsed.is_err());
    }
}
