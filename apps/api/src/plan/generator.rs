//! Action Plan Generator. Turns a snapshot's plan phases into a 12-week plan.
//!
//! Items are bucketed into five categories by keyword; each week takes the
//! next item of every bucket round-robin. Generation is deterministic.
//! `regenerate_week` is the one random operation and takes its RNG from the caller.

use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

use crate::plan::models::{ActionPlan, ActionPlanWeek, CategoryMap, TaskCategory};
use crate::snapshot::models::ReportContent;

pub const PLAN_WEEKS: u8 = 12;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlanError {
    #[error("week must be between 1 and 12, got {0}")]
    WeekOutOfRange(u8),
}

/// Tested in `TaskCategory::ALL` order; the first list with a hit wins.
const CATEGORY_KEYWORDS: CategoryMap<&[&str]> = CategoryMap {
    upskill: &[
        "course", "certif", "learn", "study", "tutorial", "upskill", "bootcamp", "training",
    ],
    cv: &["cv", "resume", "résumé", "portfolio", "linkedin profile", "headline", "bullet"],
    application: &[
        "apply", "application", "job board", "submit", "shortlist", "target compan", "posting",
        "tailor",
    ],
    networking: &[
        "network", "coffee", "reach out", "connect", "referral", "informational", "mentor",
        "community", "meetup", "event",
    ],
    interview_prep: &[
        "interview", "mock", "star method", "case study", "behavioral", "behavioural",
        "negotiat", "salary",
    ],
};

/// Used when a category ends up with no items.
const PLACEHOLDER_TASKS: CategoryMap<&str> = CategoryMap {
    upskill: "Spend 3 focused hours building a priority skill from your roadmap.",
    cv: "Refresh one CV section with a quantified achievement.",
    application: "Apply to two roles that match your target profile.",
    networking: "Reach out to one person working in your target field.",
    interview_prep: "Practice answering two common interview questions out loud.",
};

/// Category for a single plan item. Unmatched items count as upskilling.
pub fn classify_task(title: &str) -> TaskCategory {
    let lowered = title.to_lowercase();
    TaskCategory::ALL
        .into_iter()
        .find(|&c| CATEGORY_KEYWORDS.get(c).iter().any(|kw| lowered.contains(kw)))
        .unwrap_or(TaskCategory::Upskill)
}

/// Buckets every non-blank phase item; empty buckets get their placeholder.
pub fn build_task_pools(report: &ReportContent) -> CategoryMap<Vec<String>> {
    let mut pools: CategoryMap<Vec<String>> = CategoryMap::default();

    for item in report.phases.iter().flat_map(|p| p.items.iter()) {
        let item = item.trim();
        if item.is_empty() {
            continue;
        }
        pools.get_mut(classify_task(item)).push(item.to_string());
    }

    for category in TaskCategory::ALL {
        let pool = pools.get_mut(category);
        if pool.is_empty() {
            pool.push(PLACEHOLDER_TASKS.get(category).to_string());
        }
    }
    pools
}

/// Always returns exactly [`PLAN_WEEKS`] weeks, whatever the report holds.
pub fn generate_balanced_action_plan(report: &ReportContent) -> ActionPlan {
    let pools = build_task_pools(report);

    let weeks = (0..PLAN_WEEKS)
        .map(|index| {
            let index = usize::from(index);
            ActionPlanWeek {
                week: index as u8 + 1,
                tasks: CategoryMap::from_fn(|c| {
                    let pool = pools.get(c);
                    pool[index % pool.len()].clone()
                }),
                completed: CategoryMap::default(),
            }
        })
        .collect();

    ActionPlan { weeks }
}

fn check_week(week: u8) -> Result<(), PlanError> {
    if (1..=PLAN_WEEKS).contains(&week) {
        Ok(())
    } else {
        Err(PlanError::WeekOutOfRange(week))
    }
}

/// Replaces one week's tasks with a uniform random pick from each pool and
/// clears that week's completion flags. Non-deterministic unless `rng` is seeded.
pub fn regenerate_week<R: Rng + ?Sized>(
    plan: &mut ActionPlan,
    report: &ReportContent,
    week: u8,
    rng: &mut R,
) -> Result<(), PlanError> {
    check_week(week)?;
    let pools = build_task_pools(report);
    let target = plan.week_mut(week).ok_or(PlanError::WeekOutOfRange(week))?;

    target.tasks = CategoryMap::from_fn(|c| {
        let pool = pools.get(c);
        pool.choose(&mut *rng)
            .cloned()
            .unwrap_or_else(|| PLACEHOLDER_TASKS.get(c).to_string())
    });
    target.completed = CategoryMap::default();
    Ok(())
}

/// Marks one task done or not done.
pub fn set_task_completion(
    plan: &mut ActionPlan,
    week: u8,
    category: TaskCategory,
    done: bool,
) -> Result<(), PlanError> {
    check_week(week)?;
    let target = plan.week_mut(week).ok_or(PlanError::WeekOutOfRange(week))?;
    *target.completed.get_mut(category) = done;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::models::PlanPhase;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn report(items: &[&str]) -> ReportContent {
        ReportContent {
            phases: vec![PlanPhase {
                name: "Foundation".into(),
                timeframe: "Weeks 1-4".into(),
                items: items.iter().map(|s| s.to_string()).collect(),
            }],
        }
    }

    #[test]
    fn test_classify_task_by_keyword() {
        assert_eq!(classify_task("Finish a SQL course"), TaskCategory::Upskill);
        assert_eq!(classify_task("Rewrite CV summary"), TaskCategory::Cv);
        assert_eq!(classify_task("Apply to 5 fintech roles"), TaskCategory::Application);
        assert_eq!(classify_task("Book two coffee chats"), TaskCategory::Networking);
        assert_eq!(classify_task("Run a mock interview"), TaskCategory::InterviewPrep);
    }

    #[test]
    fn test_unmatched_items_default_to_upskill() {
        assert_eq!(classify_task("Reflect on priorities"), TaskCategory::Upskill);
    }

    #[test]
    fn test_first_matching_category_wins() {
        // "portfolio" (cv) is checked before "apply" (application)
        assert_eq!(classify_task("Apply portfolio polish"), TaskCategory::Cv);
    }

    #[test]
    fn test_twelve_weeks_with_zero_items_uses_placeholders() {
        let plan = generate_balanced_action_plan(&ReportContent::default());
        assert_eq!(plan.weeks.len(), 12);
        for week in &plan.weeks {
            assert_eq!(week.tasks.cv, PLACEHOLDER_TASKS.cv);
            assert_eq!(week.tasks.interview_prep, PLACEHOLDER_TASKS.interview_prep);
            assert_eq!(week.completed_count(), 0);
        }
        assert_eq!(plan.weeks[0].week, 1);
        assert_eq!(plan.weeks[11].week, 12);
    }

    #[test]
    fn test_twelve_weeks_with_many_items() {
        let items: Vec<String> = (0..40).map(|i| format!("Apply to role {i}")).collect();
        let refs: Vec<&str> = items.iter().map(String::as_str).collect();
        let plan = generate_balanced_action_plan(&report(&refs));
        assert_eq!(plan.weeks.len(), 12);
        assert_eq!(plan.weeks[11].tasks.application, "Apply to role 11");
    }

    #[test]
    fn test_round_robin_repeats_short_pool() {
        let plan = generate_balanced_action_plan(&report(&[
            "Update resume headline",
            "Add metrics to CV bullets",
        ]));
        let cv: Vec<&str> = plan.weeks.iter().map(|w| w.tasks.cv.as_str()).collect();
        assert_eq!(cv[0], "Update resume headline");
        assert_eq!(cv[1], "Add metrics to CV bullets");
        assert_eq!(cv[2], "Update resume headline");
        assert_eq!(cv[11], "Add metrics to CV bullets");
    }

    #[test]
    fn test_items_across_phases_are_pooled() {
        let mut content = report(&["Join a design meetup"]);
        content.phases.push(PlanPhase {
            name: "Momentum".into(),
            timeframe: "Weeks 5-8".into(),
            items: vec!["Ask for a referral at Acme".into(), "  ".into()],
        });
        let pools = build_task_pools(&content);
        assert_eq!(
            pools.networking,
            vec!["Join a design meetup", "Ask for a referral at Acme"]
        );
        assert_eq!(pools.upskill, vec![PLACEHOLDER_TASKS.upskill]);
    }

    #[test]
    fn test_generation_is_deterministic() {
        let content = report(&["Take a course", "Tailor CV", "Mock interview"]);
        assert_eq!(
            generate_balanced_action_plan(&content),
            generate_balanced_action_plan(&content)
        );
    }

    #[test]
    fn test_regenerate_week_picks_from_pools_and_resets_completion() {
        let content = report(&["Update resume", "Refresh portfolio", "Apply to Acme"]);
        let mut plan = generate_balanced_action_plan(&content);
        set_task_completion(&mut plan, 3, TaskCategory::Cv, true).unwrap();
        let before_other = plan.weeks[4].clone();

        let mut rng = StdRng::seed_from_u64(7);
        regenerate_week(&mut plan, &content, 3, &mut rng).unwrap();

        let week = &plan.weeks[2];
        assert!(["Update resume", "Refresh portfolio"].contains(&week.tasks.cv.as_str()));
        assert_eq!(week.tasks.application, "Apply to Acme");
        assert_eq!(week.tasks.upskill, PLACEHOLDER_TASKS.upskill);
        assert_eq!(week.completed_count(), 0);
        assert_eq!(plan.weeks[4], before_other, "other weeks untouched");
    }

    #[test]
    fn test_regenerate_week_is_reproducible_with_same_seed() {
        let items: Vec<String> = (0..10).map(|i| format!("Update resume v{i}")).collect();
        let refs: Vec<&str> = items.iter().map(String::as_str).collect();
        let content = report(&refs);

        let mut a = generate_balanced_action_plan(&content);
        let mut b = a.clone();
        regenerate_week(&mut a, &content, 5, &mut StdRng::seed_from_u64(42)).unwrap();
        regenerate_week(&mut b, &content, 5, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_out_of_range_week_rejected() {
        let content = ReportContent::default();
        let mut plan = generate_balanced_action_plan(&content);
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            regenerate_week(&mut plan, &content, 0, &mut rng),
            Err(PlanError::WeekOutOfRange(0))
        );
        assert_eq!(
            set_task_completion(&mut plan, 13, TaskCategory::Cv, true),
            Err(PlanError::WeekOutOfRange(13))
        );
    }

    #[test]
    fn test_set_task_completion_toggles_one_flag() {
        let mut plan = generate_balanced_action_plan(&ReportContent::default());
        set_task_completion(&mut plan, 1, TaskCategory::Networking, true).unwrap();
        assert!(plan.weeks[0].completed.networking);
        assert_eq!(plan.completed_tasks(), 1);
        set_task_completion(&mut plan, 1, TaskCategory::Networking, false).unwrap();
        assert_eq!(plan.completed_tasks(), 0);
    }
}
