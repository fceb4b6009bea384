//! Heuristic résumé-text extraction.
//!
//! The pipeline is a fixed sequence of independent passes over one
//! normalized document: scalar personal fields, skills, then the three
//! record extractors. Passes never feed each other, so a garbled section
//! degrades only its own output. Everything here is deterministic: the
//! same input text always produces the same profile.

pub mod fields;
pub mod normalize;
pub mod records;
pub mod sections;
pub mod skills;

use crate::models::profile::{PersonalInfo, ResumeProfile};

/// Run the full extraction pipeline over raw résumé text.
///
/// Fields that cannot be recovered stay at their empty defaults; this
/// function does not fail.
pub fn extract_profile(raw: &str, freeform_skill_cap: usize) -> ResumeProfile {
    let text = normalize::normalize(raw);

    ResumeProfile {
        personal_info: PersonalInfo {
            name: fields::extract_name(&text),
            email: fields::extract_email(&text),
            phone: fields::extract_phone(&text),
            location: fields::extract_location(&text),
            summary: fields::extract_summary(&text),
            linkedin: fields::extract_linkedin(&text),
            github: fields::extract_github(&text),
        },
        skills: skills::extract_skills(&text, freeform_skill_cap),
        experience: records::extract_experience(&text),
        education: records::extract_education(&text),
        projects: records::extract_projects(&text),
    }
}
