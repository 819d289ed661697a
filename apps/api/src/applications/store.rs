use anyhow::Result;
use chrono::NaiveDate;
use serde::Deserialize;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::application::{ApplicationRow, ApplicationStatus};

#[derive(Debug, Clone, Deserialize)]
pub struct NewApplication {
    pub company: String,
    pub role: String,
    pub contact_name: Option<String>,
    pub contact_email: Option<String>,
    pub job_url: Option<String>,
    pub status: Option<ApplicationStatus>,
    pub applied_on: NaiveDate,
    pub next_step: Option<String>,
    pub next_step_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

/// Partial update; `None` leaves the column untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApplicationPatch {
    pub company: Option<String>,
    pub role: Option<String>,
    pub contact_name: Option<String>,
    pub contact_email: Option<String>,
    pub job_url: Option<String>,
    pub status: Option<ApplicationStatus>,
    pub applied_on: Option<NaiveDate>,
    pub next_step: Option<String>,
    pub next_step_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

/// Most recently applied first.
pub async fn list_applications(pool: &PgPool, user_id: Uuid) -> Result<Vec<ApplicationRow>> {
    Ok(sqlx::query_as::<_, ApplicationRow>(
        "SELECT * FROM applications WHERE user_id = $1 ORDER BY applied_on DESC, created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?)
}

pub async fn get_application(
    pool: &PgPool,
    user_id: Uuid,
    id: Uuid,
) -> Result<Option<ApplicationRow>> {
    Ok(sqlx::query_as::<_, ApplicationRow>(
        "SELECT * FROM applications WHERE id = $1 AND user_id = $2",
    )
    .bind(id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?)
}

pub async fn insert_application(
    pool: &PgPool,
    user_id: Uuid,
    app: &NewApplication,
) -> Result<ApplicationRow> {
    let row = sqlx::query_as::<_, ApplicationRow>(
        r#"
        INSERT INTO applications
            (id, user_id, company, role, contact_name, contact_email, job_url,
             status, applied_on, next_step, next_step_date, notes)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(app.company.trim())
    .bind(app.role.trim())
    .bind(app.contact_name.as_deref())
    .bind(app.contact_email.as_deref())
    .bind(app.job_url.as_deref())
    .bind(app.status.unwrap_or(ApplicationStatus::Applied))
    .bind(app.applied_on)
    .bind(app.next_step.as_deref())
    .bind(app.next_step_date)
    .bind(app.notes.as_deref())
    .fetch_one(pool)
    .await?;

    info!("Created application {} ({}) for user {user_id}", row.id, row.company);
    Ok(row)
}

pub async fn update_application(
    pool: &PgPool,
    user_id: Uuid,
    id: Uuid,
    patch: &ApplicationPatch,
) -> Result<Option<ApplicationRow>> {
    Ok(sqlx::query_as::<_, ApplicationRow>(
        r#"
        UPDATE applications SET
            company = COALESCE($3, company),
            role = COALESCE($4, role),
            contact_name = COALESCE($5, contact_name),
            contact_email = COALESCE($6, contact_email),
            job_url = COALESCE($7, job_url),
            status = COALESCE($8, status),
            applied_on = COALESCE($9, applied_on),
            next_step = COALESCE($10, next_step),
            next_step_date = COALESCE($11, next_step_date),
            notes = COALESCE($12, notes),
            updated_at = NOW()
        WHERE id = $1 AND user_id = $2
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(patch.company.as_deref())
    .bind(patch.role.as_deref())
    .bind(patch.contact_name.as_deref())
    .bind(patch.contact_email.as_deref())
    .bind(patch.job_url.as_deref())
    .bind(patch.status)
    .bind(patch.applied_on)
    .bind(patch.next_step.as_deref())
    .bind(patch.next_step_date)
    .bind(patch.notes.as_deref())
    .fetch_optional(pool)
    .await?)
}

/// Returns `true` when a row was removed.
pub async fn delete_application(pool: &PgPool, user_id: Uuid, id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM applications WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
