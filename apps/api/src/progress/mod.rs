//! Progress dashboard: a summary computed from every other dashboard's rows.

pub mod handlers;

use chrono::NaiveDate;
use serde::Serialize;

use crate::applications::follow_up::application_follow_up_due;
use crate::contacts::contact_follow_up_due;
use crate::models::application::{ApplicationRow, ApplicationStatus};
use crate::models::contact::ContactRow;
use crate::models::radar::{RadarItemRow, RadarPriority};
use crate::plan::models::ActionPlan;

/// Everything the metrics are computed from, already loaded for one user.
pub struct ProgressInputs<'a> {
    pub applications: &'a [ApplicationRow],
    pub contacts: &'a [ContactRow],
    pub radar_items: &'a [RadarItemRow],
    pub inventory_entries: usize,
    pub plan: Option<&'a ActionPlan>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ApplicationCounts {
    pub total: usize,
    pub applied: usize,
    pub interviewing: usize,
    pub offer: usize,
    pub rejected: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressMetrics {
    pub applications: ApplicationCounts,
    /// (interviewing + offer) / total, 0 with no applications.
    pub response_rate: f64,
    pub follow_ups_due: usize,
    pub contacts: usize,
    pub contacts_due: usize,
    pub radar_high_priority: usize,
    pub inventory_entries: usize,
    /// Completed / total plan tasks, 0 without a plan.
    pub plan_completion: f64,
    pub current_week: Option<u8>,
}

pub fn compute_progress_metrics(inputs: &ProgressInputs<'_>, today: NaiveDate) -> ProgressMetrics {
    let mut counts = ApplicationCounts {
        total: inputs.applications.len(),
        ..Default::default()
    };
    for app in inputs.applications {
        match app.status {
            ApplicationStatus::Applied => counts.applied += 1,
            ApplicationStatus::Interviewing => counts.interviewing += 1,
            ApplicationStatus::Offer => counts.offer += 1,
            ApplicationStatus::Rejected => counts.rejected += 1,
        }
    }

    let response_rate = ratio(counts.interviewing + counts.offer, counts.total);

    let follow_ups_due = inputs
        .applications
        .iter()
        .filter(|app| application_follow_up_due(app, today))
        .count();

    let contacts_due = inputs
        .contacts
        .iter()
        .filter(|c| contact_follow_up_due(c, today))
        .count();

    let radar_high_priority = inputs
        .radar_items
        .iter()
        .filter(|item| item.priority == RadarPriority::High)
        .count();

    let (plan_completion, current_week) = match inputs.plan {
        Some(plan) => (
            ratio(plan.completed_tasks(), plan.total_tasks()),
            plan.current_week(),
        ),
        None => (0.0, None),
    };

    ProgressMetrics {
        applications: counts,
        response_rate,
        follow_ups_due,
        contacts: inputs.contacts.len(),
        contacts_due,
        radar_high_priority,
        inventory_entries: inputs.inventory_entries,
        plan_completion,
        current_week,
    }
}

fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::radar::{RadarKind, RadarStatus};
    use crate::plan::generator::{generate_balanced_action_plan, set_task_completion};
    use crate::plan::models::TaskCategory;
    use crate::snapshot::models::ReportContent;
    use chrono::Utc;
    use uuid::Uuid;

    fn d(m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, day).unwrap()
    }

    fn app(status: ApplicationStatus, applied_on: NaiveDate) -> ApplicationRow {
        ApplicationRow {
            id: Uuid::new_v4(),
            user_id: Uuid::nil(),
            company: "Acme".into(),
            role: "Analyst".into(),
            contact_name: None,
            contact_email: None,
            job_url: None,
            status,
            applied_on,
            next_step: None,
            next_step_date: None,
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn contact(next: Option<NaiveDate>) -> ContactRow {
        ContactRow {
            id: Uuid::new_v4(),
            user_id: Uuid::nil(),
            name: "Sam".into(),
            company: None,
            title: None,
            channel: None,
            last_contacted_on: None,
            next_follow_up_on: next,
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn radar(priority: RadarPriority) -> RadarItemRow {
        RadarItemRow {
            id: Uuid::new_v4(),
            user_id: Uuid::nil(),
            name: "Globex".into(),
            kind: RadarKind::Company,
            priority,
            status: RadarStatus::Watching,
            url: None,
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_empty_inputs() {
        let metrics = compute_progress_metrics(
            &ProgressInputs {
                applications: &[],
                contacts: &[],
                radar_items: &[],
                inventory_entries: 0,
                plan: None,
            },
            d(1, 1),
        );
        assert_eq!(metrics.applications, ApplicationCounts::default());
        assert_eq!(metrics.response_rate, 0.0);
        assert_eq!(metrics.plan_completion, 0.0);
        assert_eq!(metrics.current_week, None);
    }

    #[test]
    fn test_counts_and_rates() {
        let applications = vec![
            app(ApplicationStatus::Applied, d(1, 1)),
            app(ApplicationStatus::Applied, d(1, 25)),
            app(ApplicationStatus::Interviewing, d(1, 2)),
            app(ApplicationStatus::Offer, d(1, 3)),
            app(ApplicationStatus::Rejected, d(1, 1)),
        ];
        let contacts = vec![contact(Some(d(1, 30))), contact(Some(d(2, 5))), contact(None)];
        let radar_items = vec![radar(RadarPriority::High), radar(RadarPriority::Low)];

        let mut plan = generate_balanced_action_plan(&ReportContent::default());
        for category in TaskCategory::ALL {
            set_task_completion(&mut plan, 1, category, true).unwrap();
        }

        let metrics = compute_progress_metrics(
            &ProgressInputs {
                applications: &applications,
                contacts: &contacts,
                radar_items: &radar_items,
                inventory_entries: 4,
                plan: Some(&plan),
            },
            d(2, 1),
        );

        assert_eq!(metrics.applications.total, 5);
        assert_eq!(metrics.applications.applied, 2);
        assert_eq!(metrics.response_rate, 0.4);
        // Applied on 1/1 and interviewing since 1/2; the 1/25 one is not due yet.
        assert_eq!(metrics.follow_ups_due, 2);
        assert_eq!(metrics.contacts, 3);
        assert_eq!(metrics.contacts_due, 1);
        assert_eq!(metrics.radar_high_priority, 1);
        assert_eq!(metrics.inventory_entries, 4);
        assert_eq!(metrics.plan_completion, 5.0 / 60.0);
        assert_eq!(metrics.current_week, Some(2));
    }
}
