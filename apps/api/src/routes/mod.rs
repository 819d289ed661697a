pub mod health;

use axum::{
    routing::{get, patch, post},
    Router,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::state::AppState;
use crate::{applications, contacts, cv, inventory, plan, progress, radar, snapshot};

/// Caller identity for GET and DELETE routes. Bodies carry `user_id` directly.
#[derive(Debug, Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Impact inventory
        .route(
            "/api/v1/inventory",
            get(inventory::handlers::handle_get_inventory)
                .put(inventory::handlers::handle_save_inventory),
        )
        .route(
            "/api/v1/inventory/sync",
            post(inventory::handlers::handle_sync_inventory),
        )
        .route(
            "/api/v1/inventory/skills",
            get(inventory::handlers::handle_derive_skills),
        )
        // CV bullets and versions
        .route(
            "/api/v1/cv/bullets",
            get(cv::handlers::handle_get_bullets).put(cv::handlers::handle_save_bullets),
        )
        .route(
            "/api/v1/cv/bullets/generate",
            post(cv::handlers::handle_generate_bullets),
        )
        .route(
            "/api/v1/cv/versions",
            get(cv::handlers::handle_list_versions).post(cv::handlers::handle_create_version),
        )
        .route(
            "/api/v1/cv/versions/:id",
            get(cv::handlers::handle_get_version)
                .patch(cv::handlers::handle_update_version)
                .delete(cv::handlers::handle_delete_version),
        )
        .route(
            "/api/v1/cv/versions/:id/plain-text",
            get(cv::handlers::handle_version_plain_text),
        )
        // Applications
        .route(
            "/api/v1/applications",
            get(applications::handlers::handle_list_applications)
                .post(applications::handlers::handle_create_application),
        )
        .route(
            "/api/v1/applications/follow-ups",
            get(applications::handlers::handle_follow_ups),
        )
        .route(
            "/api/v1/applications/:id",
            patch(applications::handlers::handle_update_application)
                .delete(applications::handlers::handle_delete_application),
        )
        .route(
            "/api/v1/applications/:id/comms",
            post(applications::handlers::handle_generate_comms),
        )
        // Networking contacts
        .route(
            "/api/v1/contacts",
            get(contacts::handlers::handle_list_contacts)
                .post(contacts::handlers::handle_create_contact),
        )
        .route(
            "/api/v1/contacts/:id",
            patch(contacts::handlers::handle_update_contact)
                .delete(contacts::handlers::handle_delete_contact),
        )
        // Radar
        .route(
            "/api/v1/radar",
            get(radar::handlers::handle_list_radar).post(radar::handlers::handle_create_radar_item),
        )
        .route(
            "/api/v1/radar/:id",
            patch(radar::handlers::handle_update_radar_item)
                .delete(radar::handlers::handle_delete_radar_item),
        )
        // Action plan
        .route("/api/v1/plan", get(plan::handlers::handle_get_plan))
        .route(
            "/api/v1/plan/generate",
            post(plan::handlers::handle_generate_plan),
        )
        .route(
            "/api/v1/plan/weeks/:week/tasks/:category",
            patch(plan::handlers::handle_set_task_completion),
        )
        .route(
            "/api/v1/plan/weeks/:week/regenerate",
            post(plan::handlers::handle_regenerate_week),
        )
        // Progress
        .route("/api/v1/progress", get(progress::handlers::handle_progress))
        // Assessment and reports
        .route(
            "/api/v1/assessments",
            post(snapshot::handlers::handle_submit_assessment),
        )
        .route(
            "/api/v1/reports/latest",
            get(snapshot::handlers::handle_latest_report),
        )
        .route("/api/v1/reports/:id", get(snapshot::handlers::handle_get_report))
        .with_state(state)
}
