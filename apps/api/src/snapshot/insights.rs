//! Snapshot insights: LLM-generated career roadmap with a deterministic fallback.
//!
//! `generate_snapshot_insights` never fails. A missing insight source, a failed
//! call, or a response that does not pass `validate_generated_snapshot` all
//! produce `fallback_snapshot` instead; the cause is logged, never surfaced.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::llm_client::prompts::{GROUNDING_INSTRUCTION, JSON_ONLY_SYSTEM};
use crate::llm_client::LlmClient;
use crate::snapshot::assessment::AssessmentSubmission;
use crate::snapshot::models::{
    GeneratedSnapshot, LearningResource, PlanPhase, RoleRecommendation, SkillGap, SnapshotSource,
};
use crate::snapshot::prompts::{SNAPSHOT_PROMPT_TEMPLATE, SNAPSHOT_SYSTEM, SNAPSHOT_TEMPERATURE};

const MAX_ROLES: usize = 5;
const MAX_PHASES: usize = 6;
const VALID_PRIORITIES: &[&str] = &["high", "medium", "low"];

// ────────────────────────────────────────────────────────────────────────────
// Insight source trait
// ────────────────────────────────────────────────────────────────────────────

/// Backend that produces raw snapshot JSON for an assessment.
///
/// Carried in `AppState` as `Option<Arc<dyn InsightSource>>`.
#[async_trait]
pub trait InsightSource: Send + Sync {
    async fn generate(&self, assessment: &AssessmentSubmission) -> Result<Value, AppError>;
}

/// Claude-backed insight source.
pub struct LlmInsightSource(pub LlmClient);

#[async_trait]
impl InsightSource for LlmInsightSource {
    async fn generate(&self, assessment: &AssessmentSubmission) -> Result<Value, AppError> {
        let prompt = build_snapshot_prompt(assessment)?;
        let system = format!("{SNAPSHOT_SYSTEM} {GROUNDING_INSTRUCTION} {JSON_ONLY_SYSTEM}");
        self.0
            .call_json::<Value>(&prompt, &system, SNAPSHOT_TEMPERATURE)
            .await
            .map_err(|e| AppError::Llm(format!("Snapshot generation failed: {e}")))
    }
}

pub fn build_snapshot_prompt(assessment: &AssessmentSubmission) -> Result<String, AppError> {
    let assessment_json = serde_json::to_string_pretty(assessment)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize assessment: {e}")))?;
    Ok(SNAPSHOT_PROMPT_TEMPLATE.replace("{assessment_json}", &assessment_json))
}

// ────────────────────────────────────────────────────────────────────────────
// Generation with fallback
// ────────────────────────────────────────────────────────────────────────────

pub async fn generate_snapshot_insights(
    source: Option<&dyn InsightSource>,
    assessment: &AssessmentSubmission,
) -> (GeneratedSnapshot, SnapshotSource) {
    let Some(source) = source else {
        info!("No insight source configured, using fallback snapshot");
        return (fallback_snapshot(assessment), SnapshotSource::Fallback);
    };

    let raw = match source.generate(assessment).await {
        Ok(raw) => raw,
        Err(e) => {
            warn!("Snapshot insight call failed, using fallback: {e}");
            return (fallback_snapshot(assessment), SnapshotSource::Fallback);
        }
    };

    match validate_generated_snapshot(raw) {
        Ok(snapshot) => (snapshot, SnapshotSource::Llm),
        Err(e) => {
            warn!("Generated snapshot rejected, using fallback: {e}");
            (fallback_snapshot(assessment), SnapshotSource::Fallback)
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Validation
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum SnapshotValidationError {
    #[error("response does not match the snapshot schema: {0}")]
    Schema(#[from] serde_json::Error),

    #[error("{0}")]
    Constraint(String),
}

fn constraint(msg: impl Into<String>) -> SnapshotValidationError {
    SnapshotValidationError::Constraint(msg.into())
}

/// Parses raw LLM JSON into a snapshot and checks the constraints the prompt asks for.
pub fn validate_generated_snapshot(
    raw: Value,
) -> Result<GeneratedSnapshot, SnapshotValidationError> {
    let snapshot: GeneratedSnapshot = serde_json::from_value(raw)?;

    if snapshot.summary.trim().is_empty() {
        return Err(constraint("summary is empty"));
    }
    if snapshot.recommended_roles.is_empty() || snapshot.recommended_roles.len() > MAX_ROLES {
        return Err(constraint(format!(
            "expected 1 to {MAX_ROLES} recommended roles, got {}",
            snapshot.recommended_roles.len()
        )));
    }
    if let Some(role) = snapshot
        .recommended_roles
        .iter()
        .find(|r| r.title.trim().is_empty() || r.match_score > 100)
    {
        return Err(constraint(format!("invalid recommended role {:?}", role.title)));
    }
    if snapshot.skill_gaps.is_empty() {
        return Err(constraint("no skill gaps"));
    }
    if let Some(gap) = snapshot
        .skill_gaps
        .iter()
        .find(|g| !VALID_PRIORITIES.contains(&g.priority.as_str()))
    {
        return Err(constraint(format!(
            "skill gap {:?} has unknown priority {:?}",
            gap.skill, gap.priority
        )));
    }
    if snapshot.plan.is_empty() || snapshot.plan.len() > MAX_PHASES {
        return Err(constraint(format!(
            "expected 1 to {MAX_PHASES} plan phases, got {}",
            snapshot.plan.len()
        )));
    }
    if let Some(phase) = snapshot
        .plan
        .iter()
        .find(|p| p.items.iter().all(|i| i.trim().is_empty()))
    {
        return Err(constraint(format!("plan phase {:?} has no items", phase.name)));
    }
    if snapshot.interview_guidance.iter().all(|t| t.trim().is_empty()) {
        return Err(constraint("no interview guidance"));
    }

    Ok(snapshot)
}

// ────────────────────────────────────────────────────────────────────────────
// Fallback
// ────────────────────────────────────────────────────────────────────────────

/// Deterministic snapshot built only from the assessment answers.
pub fn fallback_snapshot(assessment: &AssessmentSubmission) -> GeneratedSnapshot {
    let current_role = match assessment.current_role.trim() {
        "" => "your current role",
        role => role,
    };
    let mut targets = assessment.target_roles();
    if targets.is_empty() {
        targets.push("a role that builds on your experience");
    }
    let primary_target = targets[0];

    let recommended_roles = targets
        .iter()
        .take(MAX_ROLES)
        .enumerate()
        .map(|(i, title)| RoleRecommendation {
            title: title.to_string(),
            fit_reason: format!(
                "Builds on {} years as {current_role} and matches your stated direction.",
                assessment.years_experience
            ),
            match_score: 75u8.saturating_sub(5 * i as u8),
        })
        .collect();

    let mut skill_gaps: Vec<SkillGap> = assessment
        .skills_to_develop()
        .into_iter()
        .take(5)
        .enumerate()
        .map(|(i, skill)| SkillGap {
            skill: skill.to_string(),
            priority: (if i == 0 { "high" } else { "medium" }).to_string(),
            how_to_build: format!(
                "Complete one hands-on project that uses {skill} and add it to your impact inventory."
            ),
        })
        .collect();
    if skill_gaps.is_empty() {
        skill_gaps.push(SkillGap {
            skill: format!("Core {primary_target} skills"),
            priority: "high".to_string(),
            how_to_build: format!(
                "Review three {primary_target} job postings and list the skills that repeat."
            ),
        });
    }

    let focus_skill = skill_gaps[0].skill.clone();
    let plan = vec![
        PlanPhase {
            name: "Foundation".to_string(),
            timeframe: "Weeks 1-4".to_string(),
            items: vec![
                format!("Start a short course on {focus_skill}"),
                "Log five achievements in your impact inventory".to_string(),
                format!("Rewrite your CV headline for {primary_target}"),
            ],
        },
        PlanPhase {
            name: "Momentum".to_string(),
            timeframe: "Weeks 5-8".to_string(),
            items: vec![
                format!("Reach out to three people working as {primary_target}"),
                format!("Apply to five {primary_target} roles"),
                format!("Learn by building a small {focus_skill} project"),
            ],
        },
        PlanPhase {
            name: "Launch".to_string(),
            timeframe: "Weeks 9-12".to_string(),
            items: vec![
                "Run two mock interviews using the STAR method".to_string(),
                "Ask for a referral at one of your target companies".to_string(),
                "Tailor your CV bullets for each new application".to_string(),
            ],
        },
    ];

    GeneratedSnapshot {
        summary: format!(
            "You are moving from {current_role} toward {primary_target}. Focus the next twelve weeks on closing your top skill gap, telling your story with evidence, and building relationships in your target field."
        ),
        recommended_roles,
        skill_gaps,
        plan,
        resources: vec![
            LearningResource {
                title: format!("Introductory course on {focus_skill}"),
                kind: "course".to_string(),
                url: None,
            },
            LearningResource {
                title: format!("{primary_target} community or meetup group"),
                kind: "community".to_string(),
                url: None,
            },
        ],
        interview_guidance: vec![
            "Prepare three STAR stories drawn from your impact inventory.".to_string(),
            format!("Explain in one minute why you are moving from {current_role} to {primary_target}."),
            "Bring one quantified result to every answer where you can.".to_string(),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::generator::generate_balanced_action_plan;
    use crate::snapshot::assessment::validate_assessment;
    use crate::snapshot::models::ReportContent;
    use serde_json::json;

    fn assessment() -> AssessmentSubmission {
        AssessmentSubmission {
            current_role: "School Librarian".into(),
            years_experience: 8,
            target_roles: vec!["Instructional Designer".into(), "Learning Ops Lead".into()],
            skills_to_develop: vec!["Articulate Storyline".into(), "LMS admin".into()],
            goals: "Move into corporate L&D".into(),
            ..Default::default()
        }
    }

    fn valid_json() -> Value {
        json!({
            "summary": "Strong transferable skills.",
            "recommended_roles": [
                {"title": "Instructional Designer", "fit_reason": "Curriculum work", "match_score": 88}
            ],
            "skill_gaps": [
                {"skill": "Storyline", "priority": "high", "how_to_build": "Build one module"}
            ],
            "plan": [
                {"name": "Foundation", "timeframe": "Weeks 1-4", "items": ["Finish a Storyline course"]}
            ],
            "resources": [],
            "interview_guidance": ["Show a portfolio piece"]
        })
    }

    struct StubSource(Result<Value, String>);

    #[async_trait]
    impl InsightSource for StubSource {
        async fn generate(&self, _: &AssessmentSubmission) -> Result<Value, AppError> {
            self.0.clone().map_err(AppError::Llm)
        }
    }

    #[test]
    fn test_valid_snapshot_passes() {
        let snapshot = validate_generated_snapshot(valid_json()).unwrap();
        assert_eq!(snapshot.recommended_roles[0].match_score, 88);
    }

    #[test]
    fn test_resources_are_optional() {
        let mut raw = valid_json();
        raw.as_object_mut().unwrap().remove("resources");
        assert!(validate_generated_snapshot(raw).unwrap().resources.is_empty());
    }

    #[test]
    fn test_schema_mismatch_rejected() {
        let err = validate_generated_snapshot(json!({"summary": "x"})).unwrap_err();
        assert!(matches!(err, SnapshotValidationError::Schema(_)));
    }

    #[test]
    fn test_match_score_out_of_range_rejected() {
        let mut raw = valid_json();
        raw["recommended_roles"][0]["match_score"] = json!(140);
        assert!(validate_generated_snapshot(raw).is_err());
    }

    #[test]
    fn test_unknown_priority_rejected() {
        let mut raw = valid_json();
        raw["skill_gaps"][0]["priority"] = json!("urgent");
        assert!(matches!(
            validate_generated_snapshot(raw),
            Err(SnapshotValidationError::Constraint(_))
        ));
    }

    #[test]
    fn test_empty_plan_phase_rejected() {
        let mut raw = valid_json();
        raw["plan"][0]["items"] = json!(["  "]);
        assert!(validate_generated_snapshot(raw).is_err());
    }

    #[test]
    fn test_missing_guidance_rejected() {
        let mut raw = valid_json();
        raw["interview_guidance"] = json!([]);
        assert!(validate_generated_snapshot(raw).is_err());
    }

    #[test]
    fn test_fallback_is_itself_valid() {
        let snapshot = fallback_snapshot(&assessment());
        let raw = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(validate_generated_snapshot(raw).unwrap(), snapshot);
    }

    #[test]
    fn test_fallback_is_deterministic_and_uses_answers() {
        let a = fallback_snapshot(&assessment());
        assert_eq!(a, fallback_snapshot(&assessment()));
        assert_eq!(a.recommended_roles.len(), 2);
        assert_eq!(a.recommended_roles[0].title, "Instructional Designer");
        assert_eq!(a.recommended_roles[1].match_score, 70);
        assert_eq!(a.skill_gaps[0].skill, "Articulate Storyline");
        assert_eq!(a.skill_gaps[0].priority, "high");
        assert!(a.summary.contains("School Librarian"));
    }

    #[test]
    fn test_fallback_for_empty_assessment_is_still_valid() {
        let snapshot = fallback_snapshot(&AssessmentSubmission::default());
        assert!(validate_generated_snapshot(serde_json::to_value(&snapshot).unwrap()).is_ok());
    }

    #[test]
    fn test_fallback_plan_feeds_every_category() {
        let plan = generate_balanced_action_plan(&ReportContent::from(&fallback_snapshot(
            &assessment(),
        )));
        let week = &plan.weeks[0];
        assert!(week.tasks.upskill.contains("Articulate Storyline"));
        assert!(week.tasks.cv.contains("CV headline"));
        assert!(week.tasks.application.contains("Apply"));
        assert!(week.tasks.networking.contains("Reach out"));
        assert!(week.tasks.interview_prep.contains("mock interviews"));
    }

    #[tokio::test]
    async fn test_no_source_uses_fallback() {
        let (snapshot, source) = generate_snapshot_insights(None, &assessment()).await;
        assert_eq!(source, SnapshotSource::Fallback);
        assert_eq!(snapshot, fallback_snapshot(&assessment()));
    }

    #[tokio::test]
    async fn test_failed_call_uses_fallback() {
        let stub = StubSource(Err("timeout".into()));
        let (_, source) = generate_snapshot_insights(Some(&stub), &assessment()).await;
        assert_eq!(source, SnapshotSource::Fallback);
    }

    #[tokio::test]
    async fn test_invalid_response_uses_fallback() {
        let stub = StubSource(Ok(json!({"summary": ""})));
        let (snapshot, source) = generate_snapshot_insights(Some(&stub), &assessment()).await;
        assert_eq!(source, SnapshotSource::Fallback);
        assert!(snapshot.summary.contains("Instructional Designer"));
    }

    #[tokio::test]
    async fn test_valid_response_is_used() {
        let stub = StubSource(Ok(valid_json()));
        let (snapshot, source) = generate_snapshot_insights(Some(&stub), &assessment()).await;
        assert_eq!(source, SnapshotSource::Llm);
        assert_eq!(snapshot.summary, "Strong transferable skills.");
    }

    #[test]
    fn test_prompt_embeds_assessment() {
        let prompt = build_snapshot_prompt(&assessment()).unwrap();
        assert!(prompt.contains("Instructional Designer"));
        assert!(!prompt.contains("{assessment_json}"));
    }

    #[test]
    fn test_sample_assessment_is_valid() {
        assert!(validate_assessment(&assessment()).is_empty());
    }
}
