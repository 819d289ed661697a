use std::sync::Arc;

use sqlx::PgPool;

use crate::snapshot::insights::InsightSource;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Snapshot insight backend. `None` when no LLM key is configured, in which
    /// case assessments always receive the fallback snapshot.
    pub insights: Option<Arc<dyn InsightSource>>,
}
