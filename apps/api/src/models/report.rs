use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Parent row of a persisted snapshot. Child rows reference `id`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ReportRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub assessment_id: Uuid,
    pub summary: String,
    /// "llm" | "fallback"
    pub source: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct ReportRoleRow {
    pub title: String,
    pub fit_reason: String,
    pub match_score: i16,
}

#[derive(Debug, Clone, FromRow)]
pub struct ReportSkillGapRow {
    pub skill: String,
    pub priority: String,
    pub how_to_build: String,
}

#[derive(Debug, Clone, FromRow)]
pub struct ReportPlanPhaseRow {
    pub name: String,
    pub timeframe: String,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, FromRow)]
pub struct ReportResourceRow {
    pub title: String,
    pub kind: String,
    pub url: Option<String>,
}
