use serde::{Deserialize, Serialize};

use crate::models::cv::CvVersionRow;

const DEFAULT_HEADLINE: &str = "Curriculum Vitae";

/// The parts of a CV version that make it into the exported text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CvDraft {
    pub headline: String,
    pub summary: String,
    pub top_skills: Vec<String>,
    pub bullets: Vec<String>,
}

impl From<&CvVersionRow> for CvDraft {
    fn from(row: &CvVersionRow) -> Self {
        CvDraft {
            headline: row.headline.clone(),
            summary: row.summary.clone(),
            top_skills: row.top_skills.clone(),
            bullets: row.bullets.clone(),
        }
    }
}

fn non_blank(items: &[String]) -> Vec<&str> {
    items
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Renders a CV draft as copy-pasteable plain text.
///
/// Sections with no content are skipped; the headline falls back to a generic title.
pub fn build_cv_plain_text(draft: &CvDraft) -> String {
    let headline = match draft.headline.trim() {
        "" => DEFAULT_HEADLINE,
        h => h,
    };
    let mut sections = vec![format!("{headline}\n{}", "=".repeat(headline.chars().count()))];

    let summary = draft.summary.trim();
    if !summary.is_empty() {
        sections.push(summary.to_string());
    }

    let skills = non_blank(&draft.top_skills);
    if !skills.is_empty() {
        sections.push(format!("Top Skills\n{}", skills.join(" · ")));
    }

    let bullets = non_blank(&draft.bullets);
    if !bullets.is_empty() {
        let lines: Vec<String> = bullets.iter().map(|b| format!("• {b}")).collect();
        sections.push(format!("Impact Highlights\n{}", lines.join("\n")));
    }

    let mut text = sections.join("\n\n");
    text.push('\n');
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_headline_and_section_titles() {
        let text = build_cv_plain_text(&CvDraft {
            headline: "Product Lead".into(),
            summary: "Driving growth.".into(),
            top_skills: vec!["Strategy".into()],
            bullets: vec!["Delivered +20%".into()],
        });
        assert!(text.contains("Product Lead"));
        assert!(text.contains("Top Skills"));
        assert!(text.contains("Impact Highlights"));
        assert!(text.contains("• Delivered +20%"));
        assert!(text.contains("Driving growth."));
    }

    #[test]
    fn test_exact_layout() {
        let text = build_cv_plain_text(&CvDraft {
            headline: "PM".into(),
            summary: String::new(),
            top_skills: vec!["A".into(), " ".into(), "B".into()],
            bullets: vec!["One".into(), "Two".into()],
        });
        assert_eq!(
            text,
            "PM\n==\n\nTop Skills\nA · B\n\nImpact Highlights\n• One\n• Two\n"
        );
    }

    #[test]
    fn test_empty_draft_uses_default_headline_only() {
        let text = build_cv_plain_text(&CvDraft::default());
        assert!(text.starts_with("Curriculum Vitae"));
        assert!(!text.contains("Top Skills"));
        assert!(!text.contains("Impact Highlights"));
    }
}
