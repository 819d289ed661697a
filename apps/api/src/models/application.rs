use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Freely settable; no transition rules are enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "text", rename_all = "snake_case")]
pub enum ApplicationStatus {
    Applied,
    Interviewing,
    Offer,
    Rejected,
}

impl ApplicationStatus {
    /// Still waiting on the employer, so a follow-up can make sense.
    pub fn is_open(self) -> bool {
        matches!(self, ApplicationStatus::Applied | ApplicationStatus::Interviewing)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ApplicationRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub company: String,
    pub role: String,
    pub contact_name: Option<String>,
    pub contact_email: Option<String>,
    pub job_url: Option<String>,
    pub status: ApplicationStatus,
    pub applied_on: NaiveDate,
    pub next_step: Option<String>,
    pub next_step_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
