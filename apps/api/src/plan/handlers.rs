//! Axum route handlers for the 12-week action plan.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::plan::ActionPlanRow;
use crate::plan::generator::{
    generate_balanced_action_plan, regenerate_week, set_task_completion, PlanError,
};
use crate::plan::models::{ActionPlan, TaskCategory};
use crate::plan::store::{get_action_plan, save_action_plan};
use crate::routes::UserIdQuery;
use crate::snapshot::models::ReportContent;
use crate::snapshot::store::{get_latest_report, load_report_content};
use crate::state::AppState;

impl From<PlanError> for AppError {
    fn from(e: PlanError) -> Self {
        AppError::Validation(e.to_string())
    }
}

#[derive(Debug, Deserialize)]
pub struct UserIdBody {
    pub user_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct TaskCompletionRequest {
    pub user_id: Uuid,
    pub done: bool,
}

#[derive(Debug, Serialize)]
pub struct ActionPlanResponse {
    pub report_id: Option<Uuid>,
    pub current_week: Option<u8>,
    pub completed_tasks: usize,
    pub total_tasks: usize,
    pub plan: ActionPlan,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<ActionPlanRow> for ActionPlanResponse {
    fn from(row: ActionPlanRow) -> Self {
        let plan = row.plan.0;
        ActionPlanResponse {
            report_id: row.report_id,
            current_week: plan.current_week(),
            completed_tasks: plan.completed_tasks(),
            total_tasks: plan.total_tasks(),
            plan,
            updated_at: row.updated_at,
        }
    }
}

/// GET /api/v1/plan
pub async fn handle_get_plan(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<ActionPlanResponse>, AppError> {
    let row = fetch_plan(&state, params.user_id).await?;
    Ok(Json(row.into()))
}

/// POST /api/v1/plan/generate
///
/// Builds a fresh plan from the latest report. With no report yet every week
/// carries the placeholder tasks.
pub async fn handle_generate_plan(
    State(state): State<AppState>,
    Json(req): Json<UserIdBody>,
) -> Result<Json<ActionPlanResponse>, AppError> {
    let (report_id, content) = match get_latest_report(&state.db, req.user_id).await? {
        Some(report) => (
            Some(report.id),
            load_report_content(&state.db, report.id).await?,
        ),
        None => (None, ReportContent::default()),
    };

    let plan = generate_balanced_action_plan(&content);
    let row = save_action_plan(&state.db, req.user_id, report_id, &plan).await?;
    Ok(Json(row.into()))
}

/// PATCH /api/v1/plan/weeks/:week/tasks/:category
pub async fn handle_set_task_completion(
    State(state): State<AppState>,
    Path((week, category)): Path<(u8, String)>,
    Json(req): Json<TaskCompletionRequest>,
) -> Result<Json<ActionPlanResponse>, AppError> {
    let category: TaskCategory = category.parse().map_err(AppError::Validation)?;

    let row = fetch_plan(&state, req.user_id).await?;
    let report_id = row.report_id;
    let mut plan = row.plan.0;

    set_task_completion(&mut plan, week, category, req.done)?;
    debug!("Week {week} {category} task marked done={}", req.done);

    let row = save_action_plan(&state.db, req.user_id, report_id, &plan).await?;
    Ok(Json(row.into()))
}

/// POST /api/v1/plan/weeks/:week/regenerate
pub async fn handle_regenerate_week(
    State(state): State<AppState>,
    Path(week): Path<u8>,
    Json(req): Json<UserIdBody>,
) -> Result<Json<ActionPlanResponse>, AppError> {
    let row = fetch_plan(&state, req.user_id).await?;
    let report_id = row.report_id;
    let mut plan = row.plan.0;

    let content = match report_id {
        Some(id) => load_report_content(&state.db, id).await?,
        None => ReportContent::default(),
    };

    // ThreadRng is !Send; keep it out of scope across awaits.
    {
        let mut rng = rand::thread_rng();
        regenerate_week(&mut plan, &content, week, &mut rng)?;
    }

    let row = save_action_plan(&state.db, req.user_id, report_id, &plan).await?;
    Ok(Json(row.into()))
}

async fn fetch_plan(state: &AppState, user_id: Uuid) -> Result<ActionPlanRow, AppError> {
    get_action_plan(&state.db, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("No action plan yet, generate one first".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::types::Json as SqlJson;

    #[test]
    fn test_plan_error_maps_to_validation() {
        let err: AppError = PlanError::WeekOutOfRange(13).into();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(err.to_string().contains("got 13"));
    }

    #[test]
    fn test_response_reports_progress() {
        let mut plan = generate_balanced_action_plan(&ReportContent::default());
        set_task_completion(&mut plan, 1, TaskCategory::Cv, true).unwrap();

        let resp: ActionPlanResponse = ActionPlanRow {
            user_id: Uuid::nil(),
            report_id: None,
            plan: SqlJson(plan),
            updated_at: chrono::Utc::now(),
        }
        .into();
        assert_eq!(resp.total_tasks, 60);
        assert_eq!(resp.completed_tasks, 1);
        assert_eq!(resp.current_week, Some(1));
    }
}
