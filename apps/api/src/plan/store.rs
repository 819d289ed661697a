use anyhow::Result;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::plan::ActionPlanRow;
use crate::plan::models::ActionPlan;

pub async fn get_action_plan(pool: &PgPool, user_id: Uuid) -> Result<Option<ActionPlanRow>> {
    Ok(sqlx::query_as::<_, ActionPlanRow>(
        "SELECT user_id, report_id, plan, updated_at FROM action_plans WHERE user_id = $1",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?)
}

/// One plan per user. `report_id` records which snapshot the plan was built
/// from so week regeneration draws from the same pools.
pub async fn save_action_plan(
    pool: &PgPool,
    user_id: Uuid,
    report_id: Option<Uuid>,
    plan: &ActionPlan,
) -> Result<ActionPlanRow> {
    let row = sqlx::query_as::<_, ActionPlanRow>(
        r#"
        INSERT INTO action_plans (user_id, report_id, plan, updated_at)
        VALUES ($1, $2, $3, NOW())
        ON CONFLICT (user_id)
        DO UPDATE SET report_id = EXCLUDED.report_id,
                      plan = EXCLUDED.plan,
                      updated_at = EXCLUDED.updated_at
        RETURNING user_id, report_id, plan, updated_at
        "#,
    )
    .bind(user_id)
    .bind(report_id)
    .bind(Json(plan))
    .fetch_one(pool)
    .await?;

    info!(
        "Saved action plan for user {user_id} ({}/{} tasks done)",
        plan.completed_tasks(),
        plan.total_tasks()
    );
    Ok(row)
}
