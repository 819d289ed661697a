//! Follow-up scheduling for job applications.

use chrono::{Days, NaiveDate};

use crate::models::application::{ApplicationRow, ApplicationStatus};

pub const FOLLOW_UP_DAYS: u64 = 10;

const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn suggested_follow_up(applied_on: NaiveDate) -> NaiveDate {
    applied_on
        .checked_add_days(Days::new(FOLLOW_UP_DAYS))
        .unwrap_or(NaiveDate::MAX)
}

/// String form used by the dashboard. Malformed dates yield `None`.
pub fn suggested_follow_up_date(applied_on: &str) -> Option<String> {
    let date = NaiveDate::parse_from_str(applied_on.trim(), DATE_FORMAT).ok()?;
    Some(suggested_follow_up(date).format(DATE_FORMAT).to_string())
}

/// True when the application is still open, the suggested date has arrived,
/// and no next step later than the suggested date is still pending. A next
/// step that has already passed no longer holds the reminder back.
pub fn is_follow_up_due(
    status: ApplicationStatus,
    applied_on: NaiveDate,
    next_step_date: Option<NaiveDate>,
    today: NaiveDate,
) -> bool {
    if !status.is_open() {
        return false;
    }
    let suggested = suggested_follow_up(applied_on);
    if today < suggested {
        return false;
    }
    !matches!(next_step_date, Some(next) if next > suggested && next >= today)
}

pub fn application_follow_up_due(app: &ApplicationRow, today: NaiveDate) -> bool {
    is_follow_up_due(app.status, app.applied_on, app.next_step_date, today)
}
