pub mod handlers;
pub mod store;

use chrono::NaiveDate;

use crate::models::contact::ContactRow;

/// A contact is due once its scheduled follow-up date has arrived.
pub fn contact_follow_up_due(contact: &ContactRow, today: NaiveDate) -> bool {
    matches!(contact.next_follow_up_on, Some(date) if date <= today)
}
