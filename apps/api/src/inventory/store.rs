use anyhow::Result;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::inventory::models::ImpactInventoryEntry;
use crate::models::inventory::ImpactInventoryRow;

/// Returns the user's inventory record, if one has ever been saved.
pub async fn get_inventory(pool: &PgPool, user_id: Uuid) -> Result<Option<ImpactInventoryRow>> {
    Ok(sqlx::query_as::<_, ImpactInventoryRow>(
        "SELECT user_id, entries, updated_at FROM impact_inventories WHERE user_id = $1",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?)
}

/// Entries for the user, empty when nothing has been saved yet.
pub async fn get_entries(pool: &PgPool, user_id: Uuid) -> Result<Vec<ImpactInventoryEntry>> {
    Ok(get_inventory(pool, user_id)
        .await?
        .map(|row| row.entries.0)
        .unwrap_or_default())
}

/// Overwrites the whole entry array. Last write wins; there is no version check.
pub async fn save_inventory(
    pool: &PgPool,
    user_id: Uuid,
    entries: &[ImpactInventoryEntry],
) -> Result<ImpactInventoryRow> {
    let row = sqlx::query_as::<_, ImpactInventoryRow>(
        r#"
        INSERT INTO impact_inventories (user_id, entries, updated_at)
        VALUES ($1, $2, NOW())
        ON CONFLICT (user_id)
        DO UPDATE SET entries = EXCLUDED.entries, updated_at = EXCLUDED.updated_at
        RETURNING user_id, entries, updated_at
        "#,
    )
    .bind(user_id)
    .bind(Json(entries))
    .fetch_one(pool)
    .await?;

    info!(
        "Saved impact inventory for user {user_id} ({} entries)",
        entries.len()
    );
    Ok(row)
}
