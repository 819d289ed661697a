use anyhow::Result;
use serde::Deserialize;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::radar::{RadarItemRow, RadarKind, RadarPriority, RadarStatus};

#[derive(Debug, Clone, Deserialize)]
pub struct NewRadarItem {
    pub name: String,
    pub kind: RadarKind,
    pub priority: Option<RadarPriority>,
    pub status: Option<RadarStatus>,
    pub url: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RadarItemPatch {
    pub name: Option<String>,
    pub kind: Option<RadarKind>,
    pub priority: Option<RadarPriority>,
    pub status: Option<RadarStatus>,
    pub url: Option<String>,
    pub notes: Option<String>,
}

/// High priority first, then by name. Priority is stored as text, so the
/// ordering is spelled out.
pub async fn list_radar_items(pool: &PgPool, user_id: Uuid) -> Result<Vec<RadarItemRow>> {
    Ok(sqlx::query_as::<_, RadarItemRow>(
        r#"
        SELECT * FROM radar_items
        WHERE user_id = $1
        ORDER BY CASE priority WHEN 'high' THEN 0 WHEN 'medium' THEN 1 ELSE 2 END, name
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?)
}

pub async fn insert_radar_item(
    pool: &PgPool,
    user_id: Uuid,
    item: &NewRadarItem,
) -> Result<RadarItemRow> {
    let row = sqlx::query_as::<_, RadarItemRow>(
        r#"
        INSERT INTO radar_items (id, user_id, name, kind, priority, status, url, notes)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(item.name.trim())
    .bind(item.kind)
    .bind(item.priority.unwrap_or(RadarPriority::Medium))
    .bind(item.status.unwrap_or(RadarStatus::Watching))
    .bind(item.url.as_deref())
    .bind(item.notes.as_deref())
    .fetch_one(pool)
    .await?;

    info!("Created radar item {} for user {user_id}", row.id);
    Ok(row)
}

pub async fn update_radar_item(
    pool: &PgPool,
    user_id: Uuid,
    id: Uuid,
    patch: &RadarItemPatch,
) -> Result<Option<RadarItemRow>> {
    Ok(sqlx::query_as::<_, RadarItemRow>(
        r#"
        UPDATE radar_items SET
            name = COALESCE($3, name),
            kind = COALESCE($4, kind),
            priority = COALESCE($5, priority),
            status = COALESCE($6, status),
            url = COALESCE($7, url),
            notes = COALESCE($8, notes),
            updated_at = NOW()
        WHERE id = $1 AND user_id = $2
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(patch.name.as_deref())
    .bind(patch.kind)
    .bind(patch.priority)
    .bind(patch.status)
    .bind(patch.url.as_deref())
    .bind(patch.notes.as_deref())
    .fetch_optional(pool)
    .await?)
}

pub async fn delete_radar_item(pool: &PgPool, user_id: Uuid, id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM radar_items WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
