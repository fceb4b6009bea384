use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Where a stored job listing came from. Local (admin-added) listings
/// survive remote merges; remote listings are replaced wholesale on sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobSource {
    Default,
    Local,
    Remote,
}

/// A job listing held by the caller-owned [`JobStore`](crate::jobs::JobStore).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredJob {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    pub location: String,
    pub job_type: String,
    pub experience: String,
    pub salary: String,
    pub description: String,
    pub requirements: Vec<String>,
    pub posted: String,
    pub url: String,
    pub logo: String,
    pub remote: bool,
    pub skills: Vec<String>,
    pub application_link: Option<String>,
    pub created_at: DateTime<Utc>,
    pub source: JobSource,
}

impl StoredJob {
    /// Dedup key used when merging remote listings: same title at the same
    /// company is the same job, regardless of source.
    pub fn merge_key(&self) -> String {
        format!("{}-{}", self.title, self.company).to_lowercase()
    }
}

/// Fields a caller supplies when adding a listing; everything else is
/// filled in by the store.
#[derive(Debug, Clone, Deserialize)]
pub struct NewJob {
    pub title: String,
    pub company: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub job_type: String,
    #[serde(default)]
    pub experience: String,
    #[serde(default)]
    pub salary: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub logo: String,
    #[serde(default)]
    pub remote: bool,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub application_link: Option<String>,
}
