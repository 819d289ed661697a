use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One free-text achievement in a user's impact inventory.
/// Every text field is optional on the wire and defaults to empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImpactInventoryEntry {
    /// Client-generated identifier.
    pub id: String,
    pub title: String,
    pub company: String,
    pub date_range: String,
    pub context: String,
    pub actions: String,
    pub outcomes: String,
    pub metrics: String,
    pub tools: String,
    pub collaborators: String,
    pub skills_used: String,
}

impl ImpactInventoryEntry {
    /// Lower-cased concatenation of every field, used for keyword scans.
    pub fn searchable_text(&self) -> String {
        [
            &self.title,
            &self.company,
            &self.date_range,
            &self.context,
            &self.actions,
            &self.outcomes,
            &self.metrics,
            &self.tools,
            &self.collaborators,
            &self.skills_used,
        ]
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
    }

    /// First non-empty of outcomes, actions, context.
    pub fn evidence_snippet(&self) -> Option<&str> {
        [&self.outcomes, &self.actions, &self.context]
            .into_iter()
            .map(|s| s.trim())
            .find(|s| !s.is_empty())
    }

    pub fn has_metrics(&self) -> bool {
        !self.metrics.trim().is_empty()
    }
}

/// Client-side draft of the inventory, reconciled against the stored copy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryDraft {
    pub entries: Vec<ImpactInventoryEntry>,
    pub updated_at: DateTime<Utc>,
}

/// Which copy survived reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncOutcome {
    /// The draft was newer and has been written.
    DraftSaved,
    /// The stored copy was newer or equal; the draft was discarded.
    RemoteKept,
}

/// Picks the newer of the draft and the stored record by `updated_at` alone.
/// A missing remote always loses; an exact tie keeps the remote.
pub fn reconcile_draft(
    draft_updated_at: DateTime<Utc>,
    remote_updated_at: Option<DateTime<Utc>>,
) -> SyncOutcome {
    match remote_updated_at {
        Some(remote) if remote >= draft_updated_at => SyncOutcome::RemoteKept,
        _ => SyncOutcome::DraftSaved,
    }
}
