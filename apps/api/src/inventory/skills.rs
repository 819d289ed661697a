//! Transferable skills: keyword scan of the impact inventory against a fixed taxonomy.
//!
//! Pure and deterministic. Empty input yields empty output; nothing here fails.

use serde::{Deserialize, Serialize};

use crate::inventory::models::ImpactInventoryEntry;

/// Fixed ten-skill taxonomy. Order is significant: confidence ties keep it.
pub const SKILL_TAXONOMY: &[(&str, &[&str])] = &[
    (
        "Stakeholder management",
        &["stakeholder", "executive", "leadership team", "client", "board"],
    ),
    (
        "Cross-functional collaboration",
        &["cross-functional", "cross functional", "collaborat", "partnered with", "squad"],
    ),
    (
        "Data-driven decision making",
        &["data", "analytics", "dashboard", "a/b test", "experiment", "sql"],
    ),
    (
        "Project & program management",
        &["project", "program", "roadmap", "timeline", "delivered", "launch"],
    ),
    (
        "Process improvement",
        &["process", "streamlin", "automat", "efficien", "workflow"],
    ),
    (
        "People leadership",
        &["managed", "mentor", "coached", "hired", "team of", "direct reports"],
    ),
    (
        "Communication & storytelling",
        &["present", "communicat", "wrote", "storytelling", "workshop", "pitch"],
    ),
    (
        "Customer focus",
        &["customer", "user research", "satisfaction", "nps", "retention"],
    ),
    (
        "Strategic thinking",
        &["strategy", "strategic", "vision", "market", "competitive"],
    ),
    (
        "Problem solving",
        &["solved", "troubleshoot", "root cause", "resolved", "debug", "turnaround"],
    ),
];

const MAX_EVIDENCE_SNIPPETS: usize = 2;
const EVIDENCE_SEPARATOR: &str = "; ";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferableSkill {
    pub name: String,
    pub evidence: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DerivedSkills {
    pub transferable_skills: Vec<TransferableSkill>,
    pub impact_bullets: Vec<String>,
}

/// `min(1, 0.3 + 0.2 × matches)`
pub fn skill_confidence(match_count: usize) -> f64 {
    (0.3 + 0.2 * match_count as f64).min(1.0)
}

/// Scans every entry for every taxonomy skill and returns the skills that
/// matched at least once, sorted by descending confidence.
pub fn derive_transferable_skills(entries: &[ImpactInventoryEntry]) -> DerivedSkills {
    let haystacks: Vec<String> = entries.iter().map(|e| e.searchable_text()).collect();

    let mut skills: Vec<TransferableSkill> = SKILL_TAXONOMY
        .iter()
        .filter_map(|(name, keywords)| {
            let mut count = 0;
            let mut snippets: Vec<&str> = Vec::new();

            for (entry, text) in entries.iter().zip(&haystacks) {
                if !keywords.iter().any(|kw| text.contains(kw)) {
                    continue;
                }
                count += 1;
                if snippets.len() < MAX_EVIDENCE_SNIPPETS {
                    if let Some(snippet) = entry.evidence_snippet() {
                        snippets.push(snippet);
                    }
                }
            }

            (count > 0).then(|| TransferableSkill {
                name: name.to_string(),
                evidence: snippets.join(EVIDENCE_SEPARATOR),
                confidence: skill_confidence(count),
            })
        })
        .collect();

    // Stable: equal confidences keep taxonomy order.
    skills.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    DerivedSkills {
        transferable_skills: skills,
        impact_bullets: entries.iter().filter_map(build_impact_bullet).collect(),
    }
}

/// `"{title} — {actions}. {outcomes}. {metrics}."` over the non-empty fields.
/// Returns `None` when every field is blank.
pub fn build_impact_bullet(entry: &ImpactInventoryEntry) -> Option<String> {
    let title = entry.title.trim();
    let body = [&entry.actions, &entry.outcomes, &entry.metrics]
        .iter()
        .map(|s| s.trim().trim_end_matches('.').trim())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(". ");

    match (title.is_empty(), body.is_empty()) {
        (true, true) => None,
        (false, true) => Some(title.to_string()),
        (true, false) => Some(format!("{body}.")),
        (false, false) => Some(format!("{title} — {body}.")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(title: &str, actions: &str, outcomes: &str) -> ImpactInventoryEntry {
        ImpactInventoryEntry {
            id: title.to_lowercase(),
            title: title.into(),
            actions: actions.into(),
            outcomes: outcomes.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_onboarding_revamp_yields_cross_functional_at_half_confidence() {
        let e = ImpactInventoryEntry {
            id: "1".into(),
            title: "Launch onboarding revamp".into(),
            actions: "Led cross-functional squad to redesign the first-run flow".into(),
            skills_used: "Product strategy, experimentation".into(),
            ..Default::default()
        };
        let derived = derive_transferable_skills(&[e]);
        let skill = derived
            .transferable_skills
            .iter()
            .find(|s| s.name == "Cross-functional collaboration")
            .expect("cross-functional collaboration must be derived");
        assert!((skill.confidence - 0.5).abs() < 1e-9);
        assert_eq!(skill.evidence, "Led cross-functional squad to redesign the first-run flow");
    }

    #[test]
    fn test_sorted_by_non_increasing_confidence() {
        let entries = vec![
            entry("Ran analytics", "Built a dashboard", ""),
            entry("Data cleanup", "Automated data pipeline with SQL", ""),
            entry("Customer survey", "Analysed NPS data", "Raised retention"),
            entry("Mentoring", "Coached two analysts", ""),
        ];
        let skills = derive_transferable_skills(&entries).transferable_skills;
        assert!(!skills.is_empty());
        for pair in skills.windows(2) {
            assert!(pair[0].confidence >= pair[1].confidence);
        }
        assert_eq!(skills[0].name, "Data-driven decision making");
        assert!((skills[0].confidence - 0.9).abs() < 1e-9, "three matching entries");
    }

    #[test]
    fn test_ties_keep_taxonomy_order() {
        let entries = vec![entry("Workshop", "Presented roadmap to the client", "")];
        let names: Vec<_> = derive_transferable_skills(&entries)
            .transferable_skills
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(
            names,
            vec![
                "Stakeholder management",
                "Project & program management",
                "Communication & storytelling",
            ]
        );
    }

    #[test]
    fn test_evidence_caps_at_two_snippets() {
        let entries = vec![
            entry("A", "data work", "first"),
            entry("B", "data work", "second"),
            entry("C", "data work", "third"),
        ];
        let skills = derive_transferable_skills(&entries).transferable_skills;
        let data = skills
            .iter()
            .find(|s| s.name == "Data-driven decision making")
            .unwrap();
        assert_eq!(data.evidence, "first; second");
    }

    #[test]
    fn test_deterministic_for_identical_input() {
        let entries = vec![
            entry("Process overhaul", "Streamlined the workflow", "Saved 5h/week"),
            entry("Hiring", "Hired and mentored 4 engineers", ""),
        ];
        assert_eq!(
            derive_transferable_skills(&entries).transferable_skills,
            derive_transferable_skills(&entries).transferable_skills
        );
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        let derived = derive_transferable_skills(&[]);
        assert!(derived.transferable_skills.is_empty());
        assert!(derived.impact_bullets.is_empty());
    }

    #[test]
    fn test_impact_bullet_format() {
        let e = ImpactInventoryEntry {
            title: "Pricing relaunch".into(),
            actions: "Rebuilt tiers.".into(),
            outcomes: "Lifted ARPU".into(),
            metrics: "+12% in Q3".into(),
            ..Default::default()
        };
        assert_eq!(
            build_impact_bullet(&e).unwrap(),
            "Pricing relaunch — Rebuilt tiers. Lifted ARPU. +12% in Q3."
        );
    }

    #[test]
    fn test_impact_bullet_title_only_and_body_only() {
        assert_eq!(build_impact_bullet(&entry("Solo", "", "")).unwrap(), "Solo");
        assert_eq!(build_impact_bullet(&entry("", "Did it", "")).unwrap(), "Did it.");
    }

    #[test]
    fn test_blank_entries_dropped_from_bullets() {
        let derived = derive_transferable_skills(&[
            ImpactInventoryEntry {
                company: "Acme".into(),
                ..Default::default()
            },
            entry("Kept", "", ""),
        ]);
        assert_eq!(derived.impact_bullets, vec!["Kept".to_string()]);
    }

    #[test]
    fn test_confidence_formula_caps_at_one() {
        assert!((skill_confidence(1) - 0.5).abs() < 1e-9);
        assert!((skill_confidence(2) - 0.7).abs() < 1e-9);
        assert_eq!(skill_confidence(10), 1.0);
    }

    #[test]
    fn test_taxonomy_has_ten_skills() {
        assert_eq!(SKILL_TAXONOMY.len(), 10);
    }
}
