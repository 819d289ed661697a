//! CV Bullet Generator. Ranks inventory entries against a target role.
//!
//! Score per entry: `2 × role keyword hits + skill hits + (1 if metrics present)`.
//! The top six become `most_relevant`; the rest are `supporting`. Short lists are
//! padded with skill-based bullets, long ones trimmed from the end of `supporting`.
//! Deterministic: no randomness, no network call.

use serde::{Deserialize, Serialize};

use crate::inventory::models::ImpactInventoryEntry;
use crate::inventory::skills::{build_impact_bullet, TransferableSkill};

pub const MOST_RELEVANT_LIMIT: usize = 6;
pub const MIN_TOTAL_BULLETS: usize = 8;
pub const MAX_TOTAL_BULLETS: usize = 12;
/// Skills considered when padding a short list.
const PADDING_SKILL_LIMIT: usize = 4;
const MIN_ROLE_KEYWORD_LEN: usize = 4;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CvBulletsPayload {
    pub most_relevant: Vec<String>,
    pub supporting: Vec<String>,
}

impl CvBulletsPayload {
    pub fn total(&self) -> usize {
        self.most_relevant.len() + self.supporting.len()
    }
}

/// Words longer than three characters, lower-cased and stripped of
/// non-alphanumerics. A repeated word counts once per occurrence.
pub fn role_keywords(role_title: &str) -> Vec<String> {
    role_title
        .split_whitespace()
        .map(|word| {
            word.chars()
                .filter(|c| c.is_alphanumeric())
                .collect::<String>()
                .to_lowercase()
        })
        .filter(|cleaned| cleaned.chars().count() >= MIN_ROLE_KEYWORD_LEN)
        .collect()
}

/// A skill hits an entry only when the entry mentions the skill by name.
fn skill_hits(text: &str, skill: &TransferableSkill) -> bool {
    text.contains(&skill.name.to_lowercase())
}

fn score_entry(
    entry: &ImpactInventoryEntry,
    keywords: &[String],
    skills: &[TransferableSkill],
) -> usize {
    let text = entry.searchable_text();
    let role_hits = keywords.iter().filter(|kw| text.contains(kw.as_str())).count();
    let skill_hits = skills.iter().filter(|s| skill_hits(&text, s)).count();
    2 * role_hits + skill_hits + usize::from(entry.has_metrics())
}

fn skill_bullet(skill: &TransferableSkill) -> String {
    let evidence = skill.evidence.trim().trim_end_matches('.');
    if evidence.is_empty() {
        format!("Demonstrated {} across multiple initiatives.", skill.name.to_lowercase())
    } else {
        format!("Applied {} — {evidence}.", skill.name.to_lowercase())
    }
}

pub fn generate_cv_bullets(
    role_title: &str,
    entries: &[ImpactInventoryEntry],
    skills: &[TransferableSkill],
) -> CvBulletsPayload {
    let keywords = role_keywords(role_title);

    let mut scored: Vec<(usize, String)> = entries
        .iter()
        .filter_map(|entry| {
            build_impact_bullet(entry).map(|bullet| (score_entry(entry, &keywords, skills), bullet))
        })
        .collect();

    // Stable: equal scores keep inventory order.
    scored.sort_by(|a, b| b.0.cmp(&a.0));

    let mut ranked = scored.into_iter().map(|(_, bullet)| bullet);
    let most_relevant: Vec<String> = ranked.by_ref().take(MOST_RELEVANT_LIMIT).collect();
    let mut supporting: Vec<String> = ranked.collect();

    for skill in skills.iter().take(PADDING_SKILL_LIMIT) {
        if most_relevant.len() + supporting.len() >= MIN_TOTAL_BULLETS {
            break;
        }
        supporting.push(skill_bullet(skill));
    }

    supporting.truncate(MAX_TOTAL_BULLETS.saturating_sub(most_relevant.len()));

    CvBulletsPayload {
        most_relevant,
        supporting,
    }
}
