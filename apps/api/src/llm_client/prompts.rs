// Cross-cutting prompt fragments. Feature modules keep their own prompts.rs.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Keeps recommendations tied to what the user actually told us.
pub const GROUNDING_INSTRUCTION: &str = "\
    Base every recommendation on the assessment answers provided. \
    Do NOT invent employers, credentials, or experience the user did not mention. \
    Prefer concrete, actionable items over generic advice.";
