use std::sync::Arc;

use crate::config::Config;
use crate::jobs::{JobFeed, JobStore};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Explicit store instance owned by the state; nothing process-global.
    pub job_store: Arc<JobStore>,
    /// Pluggable remote feed. None when JOBS_FEED_URL is unset; sync
    /// requests then fail with a validation error instead of hanging.
    pub job_feed: Option<Arc<dyn JobFeed>>,
}
