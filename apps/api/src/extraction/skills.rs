//! Skill matching — a curated-taxonomy pass over the whole document merged
//! with a freeform pass over the labeled skills section.
//!
//! The merged list is unique under case-insensitive comparison and keeps
//! first-seen casing: taxonomy matches in taxonomy order, then freeform
//! tokens in document order.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::extraction::sections::{self, SectionSpan};

/// Curated skill tokens, tested by whole-word containment in a fixed order.
pub const SKILL_TAXONOMY: &[&str] = &[
    // Programming languages
    "JavaScript", "TypeScript", "Python", "Java", "C#", "C++", "PHP", "Ruby", "Go", "Swift",
    "Kotlin", "Rust", "Scala",
    // Frontend
    "React", "Angular", "Vue", "Svelte", "Next.js", "Nuxt.js", "jQuery", "Bootstrap",
    "Tailwind CSS", "SASS", "LESS", "HTML", "CSS", "HTML5", "CSS3", "Webpack", "Vite", "Parcel",
    // Backend
    "Node.js", "Express", "Django", "Flask", "Spring", "Laravel", "Ruby on Rails", "ASP.NET",
    "FastAPI",
    // Data stores
    "MySQL", "PostgreSQL", "MongoDB", "Redis", "SQLite", "Oracle", "SQL Server", "Cassandra",
    "DynamoDB",
    // Cloud and devops
    "AWS", "Azure", "Google Cloud", "Docker", "Kubernetes", "Jenkins", "Git", "CI/CD",
    "Terraform", "Ansible",
    // Data and ML
    "Machine Learning", "Data Science", "TensorFlow", "PyTorch", "Pandas", "NumPy",
    "Scikit-learn", "Jupyter",
    // Mobile
    "React Native", "Flutter", "iOS", "Android", "Xamarin",
    // Other
    "REST", "GraphQL", "gRPC", "Firebase", "Agile", "Scrum", "TDD", "DevOps", "Microservices",
    // Soft skills
    "Leadership", "Communication", "Problem Solving", "Team Management", "Project Management",
];

/// Freeform tokens are appended up to this many per document; the cap is a
/// noise bound, tunable through config.
pub const DEFAULT_FREEFORM_CAP: usize = 10;

const MIN_TOKEN_LEN: usize = 3;
const MAX_TOKEN_LEN: usize = 29;

static SKILLS_LABEL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?i:technical\s+skills|skills|technologies)\s*:?\s*").unwrap()
});

/// Runs both passes over the normalized document.
pub fn extract_skills(text: &str, freeform_cap: usize) -> Vec<String> {
    let mut skills: Vec<String> = Vec::new();
    let lower = text.to_ascii_lowercase();

    for &skill in SKILL_TAXONOMY {
        if contains_whole_word(&lower, &skill.to_ascii_lowercase()) && !contains_ci(&skills, skill)
        {
            skills.push(skill.to_string());
        }
    }

    if let SectionSpan::Scoped(span) = sections::locate_scoped(text, &sections::SKILLS) {
        let content = SKILLS_LABEL_RE.replace(span, "");
        let mut appended = 0;
        for token in content.split(['\n', ',', '|', '-', '\u{2022}']) {
            if appended >= freeform_cap {
                break;
            }
            let token = token.trim();
            if (MIN_TOKEN_LEN..=MAX_TOKEN_LEN).contains(&token.len())
                && !contains_ci(&skills, token)
            {
                skills.push(token.to_string());
                appended += 1;
            }
        }
    }

    skills
}

/// Whole-word containment that also works for tokens ending in non-word
/// characters (`C++`, `C#`, `Node.js`), where a regex `\b` would not. Both
/// arguments must already be lowercased.
fn contains_whole_word(haystack: &str, needle: &str) -> bool {
    haystack.match_indices(needle).any(|(start, _)| {
        let before = haystack[..start].chars().next_back();
        let after = haystack[start + needle.len()..].chars().next();
        !before.is_some_and(|c| c.is_alphanumeric()) && !after.is_some_and(|c| c.is_alphanumeric())
    })
}

fn contains_ci(skills: &[String], candidate: &str) -> bool {
    skills.iter().any(|s| s.eq_ignore_ascii_case(candidate))
}
