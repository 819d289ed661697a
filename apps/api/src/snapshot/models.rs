use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleRecommendation {
    pub title: String,
    pub fit_reason: String,
    /// 0 – 100
    pub match_score: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillGap {
    pub skill: String,
    /// "high" | "medium" | "low"
    pub priority: String,
    pub how_to_build: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanPhase {
    pub name: String,
    pub timeframe: String,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningResource {
    pub title: String,
    /// "course" | "book" | "community" | "tool" | ...
    pub kind: String,
    #[serde(default)]
    pub url: Option<String>,
}

/// The career roadmap produced once per assessment, by the LLM or the fallback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedSnapshot {
    pub summary: String,
    pub recommended_roles: Vec<RoleRecommendation>,
    pub skill_gaps: Vec<SkillGap>,
    pub plan: Vec<PlanPhase>,
    #[serde(default)]
    pub resources: Vec<LearningResource>,
    pub interview_guidance: Vec<String>,
}

/// Where a snapshot came from. Stored alongside the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapshotSource {
    Llm,
    Fallback,
}

impl SnapshotSource {
    pub fn as_str(self) -> &'static str {
        match self {
            SnapshotSource::Llm => "llm",
            SnapshotSource::Fallback => "fallback",
        }
    }
}

/// The plan phases of a stored report; all the action plan generator needs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportContent {
    pub phases: Vec<PlanPhase>,
}

impl From<&GeneratedSnapshot> for ReportContent {
    fn from(snapshot: &GeneratedSnapshot) -> Self {
        ReportContent {
            phases: snapshot.plan.clone(),
        }
    }
}
