use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::applications::store::list_applications;
use crate::contacts::store::list_contacts;
use crate::errors::AppError;
use crate::inventory::store::get_entries;
use crate::plan::store::get_action_plan;
use crate::progress::{compute_progress_metrics, ProgressInputs, ProgressMetrics};
use crate::radar::store::list_radar_items;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ProgressQuery {
    pub user_id: Uuid,
    pub today: Option<NaiveDate>,
}

/// GET /api/v1/progress
pub async fn handle_progress(
    State(state): State<AppState>,
    Query(params): Query<ProgressQuery>,
) -> Result<Json<ProgressMetrics>, AppError> {
    let user_id = params.user_id;
    let (applications, contacts, radar_items, entries, plan) = tokio::try_join!(
        list_applications(&state.db, user_id),
        list_contacts(&state.db, user_id),
        list_radar_items(&state.db, user_id),
        get_entries(&state.db, user_id),
        get_action_plan(&state.db, user_id),
    )?;

    let today = params.today.unwrap_or_else(|| Utc::now().date_naive());
    let inputs = ProgressInputs {
        applications: &applications,
        contacts: &contacts,
        radar_items: &radar_items,
        inventory_entries: entries.len(),
        plan: plan.as_ref().map(|row| &row.plan.0),
    };
    Ok(Json(compute_progress_metrics(&inputs, today)))
}
