pub mod health;
pub mod resumes;

use axum::{
    routing::{get, post},
    Router,
};

use crate::jobs::handlers as jobs;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Resume extraction API
        .route("/api/v1/resumes/extract", post(resumes::handle_extract_upload))
        .route(
            "/api/v1/resumes/extract-text",
            post(resumes::handle_extract_text),
        )
        .route("/api/v1/resumes/template", get(resumes::handle_template))
        // Jobs API
        .route(
            "/api/v1/jobs",
            get(jobs::handle_list_jobs).post(jobs::handle_create_job),
        )
        .route("/api/v1/jobs/sync", post(jobs::handle_sync_jobs))
        .route(
            "/api/v1/jobs/:id",
            get(jobs::handle_get_job)
                .put(jobs::handle_update_job)
                .delete(jobs::handle_delete_job),
        )
        .with_state(state)
}
