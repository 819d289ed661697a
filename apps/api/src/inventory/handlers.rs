use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::inventory::models::{reconcile_draft, ImpactInventoryEntry, InventoryDraft, SyncOutcome};
use crate::inventory::skills::{derive_transferable_skills, DerivedSkills};
use crate::inventory::store::{get_entries, get_inventory, save_inventory};
use crate::models::inventory::ImpactInventoryRow;
use crate::routes::UserIdQuery;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct InventoryResponse {
    pub entries: Vec<ImpactInventoryEntry>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl From<Option<ImpactInventoryRow>> for InventoryResponse {
    fn from(row: Option<ImpactInventoryRow>) -> Self {
        match row {
            Some(row) => InventoryResponse {
                entries: row.entries.0,
                updated_at: Some(row.updated_at),
            },
            None => InventoryResponse {
                entries: Vec::new(),
                updated_at: None,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SaveInventoryRequest {
    pub user_id: Uuid,
    pub entries: Vec<ImpactInventoryEntry>,
}

#[derive(Debug, Deserialize)]
pub struct SyncInventoryRequest {
    pub user_id: Uuid,
    pub draft: InventoryDraft,
}

#[derive(Debug, Serialize)]
pub struct SyncInventoryResponse {
    pub outcome: SyncOutcome,
    pub inventory: InventoryResponse,
}

/// GET /api/v1/inventory
pub async fn handle_get_inventory(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<InventoryResponse>, AppError> {
    let row = get_inventory(&state.db, params.user_id).await?;
    Ok(Json(row.into()))
}

/// PUT /api/v1/inventory
pub async fn handle_save_inventory(
    State(state): State<AppState>,
    Json(req): Json<SaveInventoryRequest>,
) -> Result<Json<InventoryResponse>, AppError> {
    validate_entry_ids(&req.entries)?;
    let row = save_inventory(&state.db, req.user_id, &req.entries).await?;
    Ok(Json(Some(row).into()))
}

/// POST /api/v1/inventory/sync
///
/// Reconciles a client draft with the stored copy by `updated_at`; the newer wins.
pub async fn handle_sync_inventory(
    State(state): State<AppState>,
    Json(req): Json<SyncInventoryRequest>,
) -> Result<Json<SyncInventoryResponse>, AppError> {
    validate_entry_ids(&req.draft.entries)?;
    let remote = get_inventory(&state.db, req.user_id).await?;

    let outcome = reconcile_draft(req.draft.updated_at, remote.as_ref().map(|r| r.updated_at));
    let inventory = match outcome {
        SyncOutcome::DraftSaved => {
            Some(save_inventory(&state.db, req.user_id, &req.draft.entries).await?)
        }
        SyncOutcome::RemoteKept => remote,
    };

    Ok(Json(SyncInventoryResponse {
        outcome,
        inventory: inventory.into(),
    }))
}

/// GET /api/v1/inventory/skills
pub async fn handle_derive_skills(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<DerivedSkills>, AppError> {
    let entries = get_entries(&state.db, params.user_id).await?;
    Ok(Json(derive_transferable_skills(&entries)))
}

/// Entries are addressed by their client id, so it must be present.
fn validate_entry_ids(entries: &[ImpactInventoryEntry]) -> Result<(), AppError> {
    match entries.iter().position(|e| e.id.trim().is_empty()) {
        Some(index) => Err(AppError::Validation(format!(
            "entries[{index}].id cannot be empty"
        ))),
        None => Ok(()),
    }
}
