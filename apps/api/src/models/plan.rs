use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::plan::models::ActionPlan;

/// One plan per user; regenerating upserts on `user_id`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ActionPlanRow {
    pub user_id: Uuid,
    pub report_id: Option<Uuid>,
    pub plan: Json<ActionPlan>,
    pub updated_at: DateTime<Utc>,
}
