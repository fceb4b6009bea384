//! Seed listings for a freshly created store, so the jobs surface is never
//! empty before the first remote sync.

use chrono::Utc;
use uuid::Uuid;

use crate::models::job::{JobSource, StoredJob};

pub fn default_jobs() -> Vec<StoredJob> {
    vec![
        seed(
            "Senior Software Engineer",
            "Google India",
            "Bangalore, Karnataka",
            "5+ years",
            "₹25-40 LPA",
            "Build scalable systems that serve billions of users worldwide.",
            &["Bachelor's degree in Computer Science", "5+ years of experience"],
            &["JavaScript", "Python", "System Design", "Distributed Systems"],
            true,
            "https://careers.google.com",
        ),
        seed(
            "Full Stack Developer",
            "Microsoft India",
            "Hyderabad, Telangana",
            "3-5 years",
            "₹20-35 LPA",
            "Develop end-to-end solutions using modern web technologies.",
            &["React and Node.js experience", "Cloud platform knowledge"],
            &["React", "Node.js", "TypeScript", "Azure", "MongoDB"],
            true,
            "https://careers.microsoft.com",
        ),
        seed(
            "Frontend Developer",
            "Flipkart",
            "Bangalore, Karnataka",
            "2-4 years",
            "₹15-25 LPA",
            "Create user experiences for millions of customers.",
            &["React.js proficiency", "Modern CSS frameworks"],
            &["React", "JavaScript", "CSS", "HTML", "Redux"],
            false,
            "https://www.flipkartcareers.com",
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn seed(
    title: &str,
    company: &str,
    location: &str,
    experience: &str,
    salary: &str,
    description: &str,
    requirements: &[&str],
    skills: &[&str],
    remote: bool,
    url: &str,
) -> StoredJob {
    StoredJob {
        id: Uuid::new_v4(),
        title: title.to_string(),
        company: company.to_string(),
        location: location.to_string(),
        job_type: "full-time".to_string(),
        experience: experience.to_string(),
        salary: salary.to_string(),
        description: description.to_string(),
        requirements: requirements.iter().map(|r| r.to_string()).collect(),
        posted: "Recently".to_string(),
        url: url.to_string(),
        logo: String::new(),
        remote,
        skills: skills.iter().map(|s| s.to_string()).collect(),
        application_link: Some(url.to_string()),
        created_at: Utc::now(),
        source: JobSource::Default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_well_formed() {
        let jobs = default_jobs();
        assert_eq!(jobs.len(), 3);
        for job in &jobs {
            assert!(!job.title.is_empty());
            assert!(!job.company.is_empty());
            assert_eq!(job.source, JobSource::Default);
            assert!(!job.skills.is_empty());
        }
    }

    #[test]
    fn test_defaults_have_distinct_merge_keys() {
        let jobs = default_jobs();
        let keys: std::collections::HashSet<_> =
            jobs.iter().map(|j| j.merge_key()).collect();
        assert_eq!(keys.len(), jobs.len());
    }
}
