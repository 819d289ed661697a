use anyhow::Result;
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::info;
use uuid::Uuid;

use crate::models::report::{
    ReportPlanPhaseRow, ReportResourceRow, ReportRoleRow, ReportRow, ReportSkillGapRow,
};
use crate::snapshot::assessment::AssessmentSubmission;
use crate::snapshot::models::{
    GeneratedSnapshot, LearningResource, PlanPhase, ReportContent, RoleRecommendation, SkillGap,
    SnapshotSource,
};

pub struct PersistedSnapshot {
    pub report_id: Uuid,
    pub assessment_id: Uuid,
}

/// Writes the assessment, the parent report row, and every child row.
///
/// All inserts share one transaction: if any child insert fails the whole
/// snapshot is rolled back and no report row remains.
pub async fn persist_generated_snapshot(
    pool: &PgPool,
    user_id: Uuid,
    assessment: &AssessmentSubmission,
    snapshot: &GeneratedSnapshot,
    source: SnapshotSource,
) -> Result<PersistedSnapshot> {
    let mut tx = pool.begin().await?;

    let assessment_id = Uuid::new_v4();
    sqlx::query("INSERT INTO assessments (id, user_id, answers) VALUES ($1, $2, $3)")
        .bind(assessment_id)
        .bind(user_id)
        .bind(Json(assessment))
        .execute(&mut *tx)
        .await?;

    let report_id = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO reports (id, user_id, assessment_id, summary, source)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(report_id)
    .bind(user_id)
    .bind(assessment_id)
    .bind(&snapshot.summary)
    .bind(source.as_str())
    .execute(&mut *tx)
    .await?;

    insert_children(&mut tx, report_id, snapshot).await?;

    tx.commit().await?;

    info!(
        "Persisted {} snapshot report {report_id} for user {user_id}",
        source.as_str()
    );
    Ok(PersistedSnapshot {
        report_id,
        assessment_id,
    })
}

async fn insert_children(
    tx: &mut Transaction<'_, Postgres>,
    report_id: Uuid,
    snapshot: &GeneratedSnapshot,
) -> Result<()> {
    for (position, role) in snapshot.recommended_roles.iter().enumerate() {
        sqlx::query(
            r#"
            INSERT INTO report_roles (report_id, position, title, fit_reason, match_score)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(report_id)
        .bind(position as i32)
        .bind(&role.title)
        .bind(&role.fit_reason)
        .bind(i16::from(role.match_score))
        .execute(&mut **tx)
        .await?;
    }

    for (position, gap) in snapshot.skill_gaps.iter().enumerate() {
        sqlx::query(
            r#"
            INSERT INTO report_skill_gaps (report_id, position, skill, priority, how_to_build)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(report_id)
        .bind(position as i32)
        .bind(&gap.skill)
        .bind(&gap.priority)
        .bind(&gap.how_to_build)
        .execute(&mut **tx)
        .await?;
    }

    for (position, phase) in snapshot.plan.iter().enumerate() {
        sqlx::query(
            r#"
            INSERT INTO report_plan_phases (report_id, position, name, timeframe, items)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(report_id)
        .bind(position as i32)
        .bind(&phase.name)
        .bind(&phase.timeframe)
        .bind(&phase.items)
        .execute(&mut **tx)
        .await?;
    }

    for (position, resource) in snapshot.resources.iter().enumerate() {
        sqlx::query(
            r#"
            INSERT INTO report_resources (report_id, position, title, kind, url)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(report_id)
        .bind(position as i32)
        .bind(&resource.title)
        .bind(&resource.kind)
        .bind(resource.url.as_deref())
        .execute(&mut **tx)
        .await?;
    }

    for (position, tip) in snapshot.interview_guidance.iter().enumerate() {
        sqlx::query(
            "INSERT INTO report_interview_tips (report_id, position, tip) VALUES ($1, $2, $3)",
        )
        .bind(report_id)
        .bind(position as i32)
        .bind(tip)
        .execute(&mut **tx)
        .await?;
    }

    Ok(())
}

pub async fn get_report(pool: &PgPool, user_id: Uuid, report_id: Uuid) -> Result<Option<ReportRow>> {
    Ok(sqlx::query_as::<_, ReportRow>(
        "SELECT * FROM reports WHERE id = $1 AND user_id = $2",
    )
    .bind(report_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?)
}

pub async fn get_latest_report(pool: &PgPool, user_id: Uuid) -> Result<Option<ReportRow>> {
    Ok(sqlx::query_as::<_, ReportRow>(
        "SELECT * FROM reports WHERE user_id = $1 ORDER BY created_at DESC LIMIT 1",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?)
}

/// Plan phases of one report, in stored order.
pub async fn load_report_content(pool: &PgPool, report_id: Uuid) -> Result<ReportContent> {
    let phases = load_phases(pool, report_id).await?;
    Ok(ReportContent {
        phases: phases.into_iter().map(PlanPhase::from).collect(),
    })
}

async fn load_phases(pool: &PgPool, report_id: Uuid) -> Result<Vec<ReportPlanPhaseRow>> {
    Ok(sqlx::query_as::<_, ReportPlanPhaseRow>(
        "SELECT name, timeframe, items FROM report_plan_phases WHERE report_id = $1 ORDER BY position",
    )
    .bind(report_id)
    .fetch_all(pool)
    .await?)
}

impl From<ReportPlanPhaseRow> for PlanPhase {
    fn from(row: ReportPlanPhaseRow) -> Self {
        PlanPhase {
            name: row.name,
            timeframe: row.timeframe,
            items: row.items,
        }
    }
}

/// Reassembles a snapshot from a report row and its children.
pub async fn load_snapshot(pool: &PgPool, report: &ReportRow) -> Result<GeneratedSnapshot> {
    let roles = sqlx::query_as::<_, ReportRoleRow>(
        "SELECT title, fit_reason, match_score FROM report_roles WHERE report_id = $1 ORDER BY position",
    )
    .bind(report.id)
    .fetch_all(pool)
    .await?;

    let gaps = sqlx::query_as::<_, ReportSkillGapRow>(
        "SELECT skill, priority, how_to_build FROM report_skill_gaps WHERE report_id = $1 ORDER BY position",
    )
    .bind(report.id)
    .fetch_all(pool)
    .await?;

    let phases = load_phases(pool, report.id).await?;

    let resources = sqlx::query_as::<_, ReportResourceRow>(
        "SELECT title, kind, url FROM report_resources WHERE report_id = $1 ORDER BY position",
    )
    .bind(report.id)
    .fetch_all(pool)
    .await?;

    let tips: Vec<String> = sqlx::query_scalar(
        "SELECT tip FROM report_interview_tips WHERE report_id = $1 ORDER BY position",
    )
    .bind(report.id)
    .fetch_all(pool)
    .await?;

    Ok(GeneratedSnapshot {
        summary: report.summary.clone(),
        recommended_roles: roles
            .into_iter()
            .map(|r| RoleRecommendation {
                title: r.title,
                fit_reason: r.fit_reason,
                match_score: r.match_score.clamp(0, 100) as u8,
            })
            .collect(),
        skill_gaps: gaps
            .into_iter()
            .map(|g| SkillGap {
                skill: g.skill,
                priority: g.priority,
                how_to_build: g.how_to_build,
            })
            .collect(),
        plan: phases.into_iter().map(PlanPhase::from).collect(),
        resources: resources
            .into_iter()
            .map(|r| LearningResource {
                title: r.title,
                kind: r.kind,
                url: r.url,
            })
            .collect(),
        interview_guidance: tips,
    })
}
