//! Assessment form: the multi-step questionnaire that seeds a snapshot.
//!
//! Validation is per step so the form can show inline messages as the user
//! moves through it; submission re-runs every step.

use serde::{Deserialize, Serialize};

const MAX_YEARS_EXPERIENCE: u8 = 60;
const MAX_TARGET_ROLES: usize = 5;
const MAX_WEEKLY_HOURS: u8 = 80;
const MAX_TIMELINE_MONTHS: u8 = 36;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AssessmentSubmission {
    pub current_role: String,
    pub years_experience: u8,
    pub industry: String,
    pub target_roles: Vec<String>,
    pub strengths: Vec<String>,
    pub skills_to_develop: Vec<String>,
    pub challenges: String,
    pub goals: String,
    pub timeline_months: Option<u8>,
    pub weekly_hours: Option<u8>,
}

impl AssessmentSubmission {
    /// Target roles with blanks removed.
    pub fn target_roles(&self) -> Vec<&str> {
        non_blank(&self.target_roles)
    }

    pub fn strengths(&self) -> Vec<&str> {
        non_blank(&self.strengths)
    }

    pub fn skills_to_develop(&self) -> Vec<&str> {
        non_blank(&self.skills_to_develop)
    }
}

fn non_blank(items: &[String]) -> Vec<&str> {
    items
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentStep {
    Background,
    Direction,
    Skills,
    Goals,
}

impl AssessmentStep {
    pub const ALL: [AssessmentStep; 4] = [
        AssessmentStep::Background,
        AssessmentStep::Direction,
        AssessmentStep::Skills,
        AssessmentStep::Goals,
    ];
}

/// Inline form message for one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        FieldError {
            field,
            message: message.into(),
        }
    }
}

pub fn validate_step(step: AssessmentStep, s: &AssessmentSubmission) -> Vec<FieldError> {
    let mut errors = Vec::new();
    match step {
        AssessmentStep::Background => {
            if s.current_role.trim().is_empty() {
                errors.push(FieldError::new("current_role", "Tell us your current or most recent role"));
            }
            if s.years_experience > MAX_YEARS_EXPERIENCE {
                errors.push(FieldError::new(
                    "years_experience",
                    format!("Years of experience must be {MAX_YEARS_EXPERIENCE} or fewer"),
                ));
            }
        }
        AssessmentStep::Direction => {
            let roles = s.target_roles();
            if roles.is_empty() {
                errors.push(FieldError::new("target_roles", "Add at least one target role"));
            } else if roles.len() > MAX_TARGET_ROLES {
                errors.push(FieldError::new(
                    "target_roles",
                    format!("Pick at most {MAX_TARGET_ROLES} target roles"),
                ));
            }
        }
        AssessmentStep::Skills => {
            if s.strengths().is_empty() && s.skills_to_develop().is_empty() {
                errors.push(FieldError::new(
                    "strengths",
                    "List at least one strength or skill you want to develop",
                ));
            }
        }
        AssessmentStep::Goals => {
            if s.goals.trim().is_empty() {
                errors.push(FieldError::new("goals", "Describe what you want to achieve"));
            }
            if matches!(s.timeline_months, Some(m) if m == 0 || m > MAX_TIMELINE_MONTHS) {
                errors.push(FieldError::new(
                    "timeline_months",
                    format!("Timeline must be between 1 and {MAX_TIMELINE_MONTHS} months"),
                ));
            }
            if matches!(s.weekly_hours, Some(h) if h == 0 || h > MAX_WEEKLY_HOURS) {
                errors.push(FieldError::new(
                    "weekly_hours",
                    format!("Weekly hours must be between 1 and {MAX_WEEKLY_HOURS}"),
                ));
            }
        }
    }
    errors
}

/// Runs every step, in form order.
pub fn validate_assessment(s: &AssessmentSubmission) -> Vec<FieldError> {
    AssessmentStep::ALL
        .into_iter()
        .flat_map(|step| validate_step(step, s))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> AssessmentSubmission {
        AssessmentSubmission {
            current_role: "Operations Analyst".into(),
            years_experience: 4,
            industry: "Logistics".into(),
            target_roles: vec!["Product Manager".into()],
            strengths: vec!["Process design".into()],
            skills_to_develop: vec!["SQL".into()],
            challenges: "No formal PM title".into(),
            goals: "Move into product within a year".into(),
            timeline_months: Some(12),
            weekly_hours: Some(6),
        }
    }

    #[test]
    fn test_valid_submission_passes() {
        assert!(validate_assessment(&valid()).is_empty());
    }

    #[test]
    fn test_background_requires_role() {
        let s = AssessmentSubmission {
            current_role: "  ".into(),
            ..valid()
        };
        let errors = validate_step(AssessmentStep::Background, &s);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "current_role");
    }

    #[test]
    fn test_direction_ignores_blank_roles() {
        let s = AssessmentSubmission {
            target_roles: vec!["".into(), " ".into()],
            ..valid()
        };
        assert_eq!(validate_step(AssessmentStep::Direction, &s)[0].field, "target_roles");
    }

    #[test]
    fn test_direction_caps_roles() {
        let s = AssessmentSubmission {
            target_roles: (0..6).map(|i| format!("Role {i}")).collect(),
            ..valid()
        };
        assert_eq!(validate_step(AssessmentStep::Direction, &s).len(), 1);
    }

    #[test]
    fn test_skills_step_accepts_either_list() {
        let s = AssessmentSubmission {
            strengths: vec![],
            ..valid()
        };
        assert!(validate_step(AssessmentStep::Skills, &s).is_empty());

        let s = AssessmentSubmission {
            strengths: vec![],
            skills_to_develop: vec![],
            ..valid()
        };
        assert_eq!(validate_step(AssessmentStep::Skills, &s).len(), 1);
    }

    #[test]
    fn test_goals_step_checks_ranges() {
        let s = AssessmentSubmission {
            goals: String::new(),
            timeline_months: Some(0),
            weekly_hours: Some(120),
            ..valid()
        };
        let fields: Vec<_> = validate_step(AssessmentStep::Goals, &s)
            .into_iter()
            .map(|e| e.field)
            .collect();
        assert_eq!(fields, vec!["goals", "timeline_months", "weekly_hours"]);
    }

    #[test]
    fn test_validate_assessment_collects_in_step_order() {
        let fields: Vec<_> = validate_assessment(&AssessmentSubmission::default())
            .into_iter()
            .map(|e| e.field)
            .collect();
        assert_eq!(fields, vec!["current_role", "target_roles", "strengths", "goals"]);
    }
}
