use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::inventory::models::ImpactInventoryEntry;

/// One row per user. `entries` is overwritten wholesale on every save.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ImpactInventoryRow {
    pub user_id: Uuid,
    pub entries: Json<Vec<ImpactInventoryEntry>>,
    pub updated_at: DateTime<Utc>,
}
