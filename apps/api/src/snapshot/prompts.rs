// Prompt constants for snapshot generation.
// Reuses cross-cutting fragments from llm_client::prompts.

/// System prompt for snapshot generation.
pub const SNAPSHOT_SYSTEM: &str = "You are an experienced career coach who writes \
    concise, practical career roadmaps for people changing or growing their careers.";

/// Sampling temperature for snapshot generation.
pub const SNAPSHOT_TEMPERATURE: f32 = 0.4;

/// Snapshot prompt. Replace `{assessment_json}` before sending.
pub const SNAPSHOT_PROMPT_TEMPLATE: &str = r#"Build a career snapshot for the person described by this assessment:

{assessment_json}

Return a JSON object with this EXACT schema (no extra fields):
{
  "summary": "2-3 sentence overview of where they are and where they can go",
  "recommended_roles": [
    {"title": "Product Operations Manager", "fit_reason": "why this fits", "match_score": 82}
  ],
  "skill_gaps": [
    {"skill": "SQL", "priority": "high", "how_to_build": "concrete way to close the gap"}
  ],
  "plan": [
    {"name": "Foundation", "timeframe": "Weeks 1-4", "items": ["short actionable task"]}
  ],
  "resources": [
    {"title": "resource name", "kind": "course", "url": null}
  ],
  "interview_guidance": ["one tip per string"]
}

Rules:
- 1 to 5 recommended_roles; match_score is an integer from 0 to 100.
- priority is one of "high", "medium", "low".
- 1 to 6 plan phases, each with at least one item. Items are short tasks such as
  "Finish an intro SQL course", "Rewrite CV headline", "Book two coffee chats".
- At least one interview_guidance tip.
"#;
