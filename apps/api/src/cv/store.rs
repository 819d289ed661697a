use anyhow::Result;
use serde::Deserialize;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::cv::bullets::CvBulletsPayload;
use crate::models::cv::{CvBulletsRow, CvVersionRow};

// ────────────────────────────────────────────────────────────────────────────
// CV bullets: one payload per (user, role key)
// ────────────────────────────────────────────────────────────────────────────

pub async fn get_cv_bullets(
    pool: &PgPool,
    user_id: Uuid,
    role_key: &str,
) -> Result<Option<CvBulletsRow>> {
    Ok(sqlx::query_as::<_, CvBulletsRow>(
        "SELECT * FROM cv_bullets WHERE user_id = $1 AND role_key = $2",
    )
    .bind(user_id)
    .bind(role_key)
    .fetch_optional(pool)
    .await?)
}

/// Upserts the payload for `(user_id, role_key)`. Generated and hand-edited
/// payloads go through the same path; last write wins.
pub async fn save_cv_bullets(
    pool: &PgPool,
    user_id: Uuid,
    role_key: &str,
    role_title: &str,
    payload: &CvBulletsPayload,
) -> Result<CvBulletsRow> {
    let row = sqlx::query_as::<_, CvBulletsRow>(
        r#"
        INSERT INTO cv_bullets (user_id, role_key, role_title, payload, updated_at)
        VALUES ($1, $2, $3, $4, NOW())
        ON CONFLICT (user_id, role_key)
        DO UPDATE SET role_title = EXCLUDED.role_title,
                      payload = EXCLUDED.payload,
                      updated_at = EXCLUDED.updated_at
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(role_key)
    .bind(role_title)
    .bind(Json(payload))
    .fetch_one(pool)
    .await?;

    info!(
        "Saved {} CV bullets for user {user_id} role '{role_key}'",
        payload.total()
    );
    Ok(row)
}

// ────────────────────────────────────────────────────────────────────────────
// CV versions
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct NewCvVersion {
    pub role_key: Option<String>,
    pub label: String,
    #[serde(default)]
    pub headline: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub top_skills: Vec<String>,
    #[serde(default)]
    pub bullets: Vec<String>,
}

/// Partial update; `None` leaves the column untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CvVersionPatch {
    pub label: Option<String>,
    pub headline: Option<String>,
    pub summary: Option<String>,
    pub top_skills: Option<Vec<String>>,
    pub bullets: Option<Vec<String>>,
}

/// Lists versions newest first, optionally narrowed to one role key.
pub async fn list_cv_versions(
    pool: &PgPool,
    user_id: Uuid,
    role_key: Option<&str>,
) -> Result<Vec<CvVersionRow>> {
    Ok(sqlx::query_as::<_, CvVersionRow>(
        r#"
        SELECT * FROM cv_versions
        WHERE user_id = $1 AND ($2::text IS NULL OR role_key = $2)
        ORDER BY created_at DESC
        "#,
    )
    .bind(user_id)
    .bind(role_key)
    .fetch_all(pool)
    .await?)
}

pub async fn get_cv_version(
    pool: &PgPool,
    user_id: Uuid,
    id: Uuid,
) -> Result<Option<CvVersionRow>> {
    Ok(sqlx::query_as::<_, CvVersionRow>(
        "SELECT * FROM cv_versions WHERE id = $1 AND user_id = $2",
    )
    .bind(id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?)
}

pub async fn insert_cv_version(
    pool: &PgPool,
    user_id: Uuid,
    role_key: &str,
    version: &NewCvVersion,
) -> Result<CvVersionRow> {
    let row = sqlx::query_as::<_, CvVersionRow>(
        r#"
        INSERT INTO cv_versions
            (id, user_id, role_key, label, headline, summary, top_skills, bullets)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(role_key)
    .bind(version.label.trim())
    .bind(&version.headline)
    .bind(&version.summary)
    .bind(&version.top_skills)
    .bind(&version.bullets)
    .fetch_one(pool)
    .await?;

    info!("Created CV version {} for user {user_id}", row.id);
    Ok(row)
}

pub async fn update_cv_version(
    pool: &PgPool,
    user_id: Uuid,
    id: Uuid,
    patch: &CvVersionPatch,
) -> Result<Option<CvVersionRow>> {
    Ok(sqlx::query_as::<_, CvVersionRow>(
        r#"
        UPDATE cv_versions SET
            label = COALESCE($3, label),
            headline = COALESCE($4, headline),
            summary = COALESCE($5, summary),
            top_skills = COALESCE($6, top_skills),
            bullets = COALESCE($7, bullets),
            updated_at = NOW()
        WHERE id = $1 AND user_id = $2
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(patch.label.as_deref())
    .bind(patch.headline.as_deref())
    .bind(patch.summary.as_deref())
    .bind(patch.top_skills.as_deref())
    .bind(patch.bullets.as_deref())
    .fetch_optional(pool)
    .await?)
}

/// Returns `true` when a row was removed.
pub async fn delete_cv_version(pool: &PgPool, user_id: Uuid, id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM cv_versions WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
