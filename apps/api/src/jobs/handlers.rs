use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::errors::AppError;
use crate::jobs::store::JobQuery;
use crate::models::job::{NewJob, StoredJob};
use crate::state::AppState;

#[derive(Serialize)]
pub struct JobListResponse {
    pub jobs: Vec<StoredJob>,
    pub total: usize,
}

/// GET /api/v1/jobs
pub async fn handle_list_jobs(
    State(state): State<AppState>,
    Query(query): Query<JobQuery>,
) -> Result<Json<JobListResponse>, AppError> {
    let jobs = state.job_store.search(&query).await;
    let total = jobs.len();
    Ok(Json(JobListResponse { jobs, total }))
}

/// GET /api/v1/jobs/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<StoredJob>, AppError> {
    state
        .job_store
        .get(id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Job {id} not found")))
}

/// POST /api/v1/jobs
pub async fn handle_create_job(
    State(state): State<AppState>,
    Json(new): Json<NewJob>,
) -> Result<Json<StoredJob>, AppError> {
    if new.title.trim().is_empty() || new.company.trim().is_empty() {
        return Err(AppError::Validation(
            "Job title and company are required".to_string(),
        ));
    }
    Ok(Json(state.job_store.add(new).await))
}

/// PUT /api/v1/jobs/:id
pub async fn handle_update_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(new): Json<NewJob>,
) -> Result<Json<StoredJob>, AppError> {
    if new.title.trim().is_empty() || new.company.trim().is_empty() {
        return Err(AppError::Validation(
            "Job title and company are required".to_string(),
        ));
    }
    state
        .job_store
        .update(id, new)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Job {id} not found")))
}

/// DELETE /api/v1/jobs/:id
pub async fn handle_delete_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    if state.job_store.delete(id).await {
        Ok(Json(json!({ "deleted": true })))
    } else {
        Err(AppError::NotFound(format!("Job {id} not found")))
    }
}

/// POST /api/v1/jobs/sync
///
/// Pulls the remote feed and merges it into the store. A feed failure is
/// not fatal to the jobs surface: the cached listings stay served and the
/// response says the sync did not happen.
pub async fn handle_sync_jobs(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let Some(feed) = &state.job_feed else {
        return Err(AppError::Validation(
            "No remote job feed is configured".to_string(),
        ));
    };

    match feed.fetch().await {
        Ok(remote) => {
            let fetched = remote.len();
            let accepted = state.job_store.merge_remote(remote).await;
            tracing::info!("Synced {accepted} of {fetched} remote jobs");
            Ok(Json(json!({
                "synced": true,
                "fetched": fetched,
                "accepted": accepted,
                "last_sync": state.job_store.last_sync().await,
            })))
        }
        Err(e) => {
            tracing::warn!("Job feed fetch failed, serving cached listings: {e}");
            Ok(Json(json!({
                "synced": false,
                "cached": state.job_store.list().await.len(),
                "last_sync": state.job_store.last_sync().await,
            })))
        }
    }
}
