use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::cv::bullets::CvBulletsPayload;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CvBulletsRow {
    pub user_id: Uuid,
    pub role_key: String,
    pub role_title: String,
    pub payload: Json<CvBulletsPayload>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CvVersionRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub role_key: String,
    pub label: String,
    pub headline: String,
    pub summary: String,
    pub top_skills: Vec<String>,
    pub bullets: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
