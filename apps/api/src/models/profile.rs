//! Structured candidate profile produced by the extraction pipeline.
//!
//! Every field has a defined default: a profile is always renderable, with
//! empty strings standing in for anything the pipeline could not recover.

use serde::{Deserialize, Serialize};

/// Single-valued personal fields recovered from the document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonalInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub summary: String,
    pub linkedin: String,
    pub github: String,
}

/// One job history entry. `title` and `company` are always non-empty;
/// a missing description is replaced with filler text at extraction time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub title: String,
    pub company: String,
    pub duration: String,
    pub description: String,
}

/// One education entry. `degree` and `institution` are always non-empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub degree: String,
    pub institution: String,
    pub year: String,
    pub gpa: String,
}

/// One project entry. Entries without both a name and a description are
/// discarded before they reach the profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectEntry {
    pub name: String,
    pub description: String,
    pub technologies: String,
    pub link: String,
}

/// The immutable output of one extraction call.
///
/// Record lists preserve document order. `skills` is unique under
/// case-insensitive comparison with first-seen casing kept.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeProfile {
    pub personal_info: PersonalInfo,
    pub skills: Vec<String>,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub projects: Vec<ProjectEntry>,
}

impl ResumeProfile {
    /// Manual-entry template: the same structural shape the extractor
    /// produces, with one blank experience and education entry for the
    /// form to render.
    pub fn manual_entry_template() -> Self {
        ResumeProfile {
            experience: vec![ExperienceEntry::default()],
            education: vec![EducationEntry::default()],
            ..Default::default()
        }
    }
}
