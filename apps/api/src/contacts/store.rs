use anyhow::Result;
use chrono::NaiveDate;
use serde::Deserialize;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::contact::ContactRow;

#[derive(Debug, Clone, Deserialize)]
pub struct NewContact {
    pub name: String,
    pub company: Option<String>,
    pub title: Option<String>,
    pub channel: Option<String>,
    pub last_contacted_on: Option<NaiveDate>,
    pub next_follow_up_on: Option<NaiveDate>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactPatch {
    pub name: Option<String>,
    pub company: Option<String>,
    pub title: Option<String>,
    pub channel: Option<String>,
    pub last_contacted_on: Option<NaiveDate>,
    pub next_follow_up_on: Option<NaiveDate>,
    pub notes: Option<String>,
}

pub async fn list_contacts(pool: &PgPool, user_id: Uuid) -> Result<Vec<ContactRow>> {
    Ok(sqlx::query_as::<_, ContactRow>(
        "SELECT * FROM networking_contacts WHERE user_id = $1 ORDER BY name",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?)
}

pub async fn insert_contact(pool: &PgPool, user_id: Uuid, contact: &NewContact) -> Result<ContactRow> {
    let row = sqlx::query_as::<_, ContactRow>(
        r#"
        INSERT INTO networking_contacts
            (id, user_id, name, company, title, channel,
             last_contacted_on, next_follow_up_on, notes)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(contact.name.trim())
    .bind(contact.company.as_deref())
    .bind(contact.title.as_deref())
    .bind(contact.channel.as_deref())
    .bind(contact.last_contacted_on)
    .bind(contact.next_follow_up_on)
    .bind(contact.notes.as_deref())
    .fetch_one(pool)
    .await?;

    info!("Created contact {} for user {user_id}", row.id);
    Ok(row)
}

pub async fn update_contact(
    pool: &PgPool,
    user_id: Uuid,
    id: Uuid,
    patch: &ContactPatch,
) -> Result<Option<ContactRow>> {
    Ok(sqlx::query_as::<_, ContactRow>(
        r#"
        UPDATE networking_contacts SET
            name = COALESCE($3, name),
            company = COALESCE($4, company),
            title = COALESCE($5, title),
            channel = COALESCE($6, channel),
            last_contacted_on = COALESCE($7, last_contacted_on),
            next_follow_up_on = COALESCE($8, next_follow_up_on),
            notes = COALESCE($9, notes),
            updated_at = NOW()
        WHERE id = $1 AND user_id = $2
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(patch.name.as_deref())
    .bind(patch.company.as_deref())
    .bind(patch.title.as_deref())
    .bind(patch.channel.as_deref())
    .bind(patch.last_contacted_on)
    .bind(patch.next_follow_up_on)
    .bind(patch.notes.as_deref())
    .fetch_optional(pool)
    .await?)
}

pub async fn delete_contact(pool: &PgPool, user_id: Uuid, id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM networking_contacts WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
