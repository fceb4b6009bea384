//! Remote job feed client.
//!
//! The feed trait is pluggable so tests can inject canned listings; the
//! HTTP implementation tolerates loosely shaped upstream JSON by filling
//! every missing field with a placeholder rather than rejecting the row.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use uuid::Uuid;

use crate::models::job::{JobSource, StoredJob};

#[async_trait]
pub trait JobFeed: Send + Sync {
    /// Fetch the current remote listings, already normalized.
    async fn fetch(&self) -> anyhow::Result<Vec<StoredJob>>;
}

pub struct HttpJobFeed {
    client: reqwest::Client,
    url: String,
}

impl HttpJobFeed {
    pub fn new(url: String) -> Self {
        HttpJobFeed {
            client: reqwest::Client::new(),
            url,
        }
    }
}

#[async_trait]
impl JobFeed for HttpJobFeed {
    async fn fetch(&self) -> anyhow::Result<Vec<StoredJob>> {
        let body: Value = self
            .client
            .get(&self.url)
            .header("Accept", "application/json")
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        // Upstream sends either a bare array or {"jobs": [...]}.
        let rows = match &body {
            Value::Array(rows) => rows.as_slice(),
            Value::Object(map) => map
                .get("jobs")
                .and_then(Value::as_array)
                .map(Vec::as_slice)
                .unwrap_or_default(),
            _ => &[],
        };

        Ok(rows.iter().map(|row| normalize_remote_job(row, Utc::now())).collect())
    }
}

/// Map one loosely shaped upstream row onto a [`StoredJob`]. Known alias
/// keys are honored, everything else gets a placeholder.
pub fn normalize_remote_job(row: &Value, now: DateTime<Utc>) -> StoredJob {
    let created_at = str_field(row, &["created_at"])
        .and_then(|s| s.parse::<DateTime<Utc>>().ok())
        .unwrap_or(now);

    let requirements = list_field(row, &["requirements", "skills"]);
    let skills = list_field(row, &["skills", "requirements"]);

    StoredJob {
        id: Uuid::new_v4(),
        title: str_field(row, &["title"]).unwrap_or_else(|| "Job Position".to_string()),
        company: str_field(row, &["company"]).unwrap_or_else(|| "Company".to_string()),
        location: str_field(row, &["location"]).unwrap_or_else(|| "Remote".to_string()),
        job_type: str_field(row, &["job_type", "type"])
            .unwrap_or_else(|| "full-time".to_string()),
        experience: str_field(row, &["experience", "experience_level"])
            .unwrap_or_else(|| "Not specified".to_string()),
        salary: str_field(row, &["salary", "salary_range"])
            .unwrap_or_else(|| "Competitive".to_string()),
        description: str_field(row, &["description"])
            .unwrap_or_else(|| "No description available".to_string()),
        requirements,
        posted: format_posted(created_at, now),
        url: str_field(row, &["application_link", "url"]).unwrap_or_else(|| "#".to_string()),
        logo: str_field(row, &["logo", "company_logo"]).unwrap_or_default(),
        remote: bool_field(row, &["remote", "is_remote"]),
        skills,
        application_link: str_field(row, &["application_link"]),
        created_at,
        source: JobSource::Remote,
    }
}

/// Human-readable age of a listing relative to `now`.
pub fn format_posted(created_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let days = (now - created_at).num_days();
    match days {
        d if d < 1 => "Recently".to_string(),
        1 => "1 day ago".to_string(),
        d if d < 7 => format!("{d} days ago"),
        d if d < 30 => format!("{} weeks ago", (d as u64).div_ceil(7)),
        d => format!("{} months ago", (d as u64).div_ceil(30)),
    }
}

fn str_field(row: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| row.get(key).and_then(Value::as_str))
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

fn bool_field(row: &Value, keys: &[&str]) -> bool {
    keys.iter()
        .filter_map(|key| row.get(key).and_then(Value::as_bool))
        .next()
        .unwrap_or(false)
}

fn list_field(row: &Value, keys: &[&str]) -> Vec<String> {
    for key in keys {
        if let Some(items) = row.get(key).and_then(Value::as_array) {
            return items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect();
        }
    }
    Vec::new()
}
