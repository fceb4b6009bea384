//! Caller-owned job listing store.
//!
//! An explicit instance lives in `AppState`; there is no process-global
//! store. Listings are held in memory behind a lock and mirrored to a JSON
//! file when a path is configured. Persistence failures are logged and
//! never fail the request that triggered them.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::jobs::defaults::default_jobs;
use crate::models::job::{JobSource, NewJob, StoredJob};

/// On-disk snapshot shape.
#[derive(Debug, Serialize, Deserialize)]
struct PersistedJobs {
    jobs: Vec<StoredJob>,
    last_sync: Option<DateTime<Utc>>,
}

/// Query parameters for listing search.
#[derive(Debug, Default, Deserialize)]
pub struct JobQuery {
    pub q: Option<String>,
    pub location: Option<String>,
    pub job_type: Option<String>,
    pub remote: Option<bool>,
}

pub struct JobStore {
    inner: RwLock<Inner>,
    path: Option<PathBuf>,
}

struct Inner {
    jobs: Vec<StoredJob>,
    last_sync: Option<DateTime<Utc>>,
}

impl JobStore {
    /// Open a store, loading any persisted snapshot from `path` and seeding
    /// the default listings when the store comes up empty.
    pub fn open(path: Option<PathBuf>) -> Result<Self> {
        let mut loaded = match &path {
            Some(p) if p.exists() => {
                let raw = std::fs::read_to_string(p)
                    .with_context(|| format!("reading job store {}", p.display()))?;
                serde_json::from_str::<PersistedJobs>(&raw)
                    .with_context(|| format!("parsing job store {}", p.display()))?
            }
            _ => PersistedJobs { jobs: Vec::new(), last_sync: None },
        };

        if loaded.jobs.is_empty() {
            loaded.jobs = default_jobs();
        }

        let store = JobStore {
            inner: RwLock::new(Inner { jobs: loaded.jobs, last_sync: loaded.last_sync }),
            path,
        };
        Ok(store)
    }

    /// All listings, newest first.
    pub async fn list(&self) -> Vec<StoredJob> {
        let inner = self.inner.read().await;
        sorted(inner.jobs.clone())
    }

    /// Listings matching `query`, newest first. The free-text term matches
    /// title, company, description, or any skill, case-insensitively.
    pub async fn search(&self, query: &JobQuery) -> Vec<StoredJob> {
        let inner = self.inner.read().await;
        let jobs = inner
            .jobs
            .iter()
            .filter(|job| matches_query(job, query))
            .cloned()
            .collect();
        sorted(jobs)
    }

    pub async fn get(&self, id: Uuid) -> Option<StoredJob> {
        let inner = self.inner.read().await;
        inner.jobs.iter().find(|job| job.id == id).cloned()
    }

    /// Add a caller-supplied listing. Local listings win future merges
    /// against remote ones with the same title and company.
    pub async fn add(&self, new: NewJob) -> StoredJob {
        let job = materialize(new, JobSource::Local);
        let snapshot = {
            let mut inner = self.inner.write().await;
            inner.jobs.insert(0, job.clone());
            snapshot_of(&inner)
        };
        self.persist(snapshot);
        job
    }

    /// Replace the caller-editable fields of an existing listing.
    pub async fn update(&self, id: Uuid, new: NewJob) -> Option<StoredJob> {
        let (updated, snapshot) = {
            let mut inner = self.inner.write().await;
            let job = inner.jobs.iter_mut().find(|job| job.id == id)?;
            let replacement = materialize(new, job.source);
            job.title = replacement.title;
            job.company = replacement.company;
            job.location = replacement.location;
            job.job_type = replacement.job_type;
            job.experience = replacement.experience;
            job.salary = replacement.salary;
            job.description = replacement.description;
            job.requirements = replacement.requirements;
            job.url = replacement.url;
            job.logo = replacement.logo;
            job.remote = replacement.remote;
            job.skills = replacement.skills;
            job.application_link = replacement.application_link;
            (job.clone(), snapshot_of(&inner))
        };
        self.persist(snapshot);
        Some(updated)
    }

    pub async fn delete(&self, id: Uuid) -> bool {
        let snapshot = {
            let mut inner = self.inner.write().await;
            let before = inner.jobs.len();
            inner.jobs.retain(|job| job.id != id);
            if inner.jobs.len() == before {
                return false;
            }
            snapshot_of(&inner)
        };
        self.persist(snapshot);
        true
    }

    /// Merge freshly fetched remote listings into the store.
    ///
    /// Local and default listings are kept as-is; a remote listing is added
    /// only when no existing listing shares its merge key, so local edits
    /// always win. Previously synced remote listings are replaced wholesale.
    /// Returns the number of remote listings accepted.
    pub async fn merge_remote(&self, remote: Vec<StoredJob>) -> usize {
        let mut inner = self.inner.write().await;

        let mut merged: Vec<StoredJob> = inner
            .jobs
            .iter()
            .filter(|job| job.source != JobSource::Remote)
            .cloned()
            .collect();
        let mut seen: std::collections::HashSet<String> =
            merged.iter().map(|job| job.merge_key()).collect();

        let mut accepted = 0;
        for job in remote {
            if seen.insert(job.merge_key()) {
                merged.push(job);
                accepted += 1;
            }
        }

        inner.jobs = merged;
        inner.last_sync = Some(Utc::now());
        let snapshot = snapshot_of(&inner);
        drop(inner);
        self.persist(snapshot);
        accepted
    }

    pub async fn last_sync(&self) -> Option<DateTime<Utc>> {
        self.inner.read().await.last_sync
    }

    /// Writes a snapshot taken after the lock was released; a slow disk
    /// never holds up readers.
    fn persist(&self, snapshot: PersistedJobs) {
        let Some(path) = &self.path else { return };
        let result = serde_json::to_string_pretty(&snapshot)
            .map_err(anyhow::Error::from)
            .and_then(|json| std::fs::write(path, json).map_err(anyhow::Error::from));
        if let Err(e) = result {
            tracing::warn!("Failed to persist job store to {}: {e}", path.display());
        }
    }
}

fn snapshot_of(inner: &Inner) -> PersistedJobs {
    PersistedJobs {
        jobs: inner.jobs.clone(),
        last_sync: inner.last_sync,
    }
}

fn sorted(mut jobs: Vec<StoredJob>) -> Vec<StoredJob> {
    jobs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    jobs
}

fn matches_query(job: &StoredJob, query: &JobQuery) -> bool {
    if let Some(q) = &query.q {
        let term = q.to_lowercase();
        let hit = job.title.to_lowercase().contains(&term)
            || job.company.to_lowercase().contains(&term)
            || job.description.to_lowercase().contains(&term)
            || job.skills.iter().any(|s| s.to_lowercase().contains(&term));
        if !hit {
            return false;
        }
    }
    if let Some(location) = &query.location {
        if !job.location.to_lowercase().contains(&location.to_lowercase()) {
            return false;
        }
    }
    if let Some(job_type) = &query.job_type {
        if &job.job_type != job_type {
            return false;
        }
    }
    if let Some(remote) = query.remote {
        if job.remote != remote {
            return false;
        }
    }
    true
}

fn materialize(new: NewJob, source: JobSource) -> StoredJob {
    let now = Utc::now();
    StoredJob {
        id: Uuid::new_v4(),
        title: new.title,
        company: new.company,
        location: new.location,
        job_type: if new.job_type.is_empty() { "full-time".to_string() } else { new.job_type },
        experience: new.experience,
        salary: new.salary,
        description: new.description,
        requirements: new.requirements,
        posted: "Recently".to_string(),
        url: new.url,
        logo: new.logo,
        remote: new.remote,
        skills: new.skills,
        application_link: new.application_link,
        created_at: now,
        source,
    }
}
