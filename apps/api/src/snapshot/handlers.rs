use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::report::ReportRow;
use crate::routes::UserIdQuery;
use crate::snapshot::assessment::{validate_assessment, AssessmentSubmission, FieldError};
use crate::snapshot::insights::generate_snapshot_insights;
use crate::snapshot::models::GeneratedSnapshot;
use crate::snapshot::store::{
    get_latest_report, get_report, load_snapshot, persist_generated_snapshot,
};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SubmitAssessmentRequest {
    pub user_id: Uuid,
    pub assessment: AssessmentSubmission,
}

#[derive(Debug, Serialize)]
pub struct ReportResponse {
    pub report_id: Uuid,
    pub assessment_id: Uuid,
    pub source: String,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub snapshot: GeneratedSnapshot,
}

impl ReportResponse {
    fn from_row(row: ReportRow, snapshot: GeneratedSnapshot) -> Self {
        ReportResponse {
            report_id: row.id,
            assessment_id: row.assessment_id,
            source: row.source,
            created_at: Some(row.created_at),
            snapshot,
        }
    }
}

/// POST /api/v1/assessments
///
/// Validates the submission, generates the snapshot (LLM or fallback), and
/// persists it as a new report.
pub async fn handle_submit_assessment(
    State(state): State<AppState>,
    Json(req): Json<SubmitAssessmentRequest>,
) -> Result<(StatusCode, Json<ReportResponse>), AppError> {
    let errors = validate_assessment(&req.assessment);
    if !errors.is_empty() {
        return Err(AppError::Validation(join_field_errors(&errors)));
    }

    let (snapshot, source) =
        generate_snapshot_insights(state.insights.as_deref(), &req.assessment).await;

    let persisted =
        persist_generated_snapshot(&state.db, req.user_id, &req.assessment, &snapshot, source)
            .await?;

    Ok((
        StatusCode::CREATED,
        Json(ReportResponse {
            report_id: persisted.report_id,
            assessment_id: persisted.assessment_id,
            source: source.as_str().to_string(),
            created_at: None,
            snapshot,
        }),
    ))
}

/// GET /api/v1/reports/latest
pub async fn handle_latest_report(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<ReportResponse>, AppError> {
    let row = get_latest_report(&state.db, params.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("No report yet, submit an assessment first".to_string()))?;
    let snapshot = load_snapshot(&state.db, &row).await?;
    Ok(Json(ReportResponse::from_row(row, snapshot)))
}

/// GET /api/v1/reports/:id
pub async fn handle_get_report(
    State(state): State<AppState>,
    Path(report_id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<ReportResponse>, AppError> {
    let row = get_report(&state.db, params.user_id, report_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Report {report_id} not found")))?;
    let snapshot = load_snapshot(&state.db, &row).await?;
    Ok(Json(ReportResponse::from_row(row, snapshot)))
}

fn join_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::assessment::validate_assessment;

    #[test]
    fn test_join_field_errors() {
        let errors = validate_assessment(&AssessmentSubmission::default());
        let joined = join_field_errors(&errors);
        assert!(joined.starts_with("current_role: "));
        assert_eq!(joined.matches("; ").count(), errors.len() - 1);
    }
}
