//! Scalar field extractors — ordered pattern-family cascades for the
//! single-valued personal fields.
//!
//! Shared contract: try each family in priority order, accept the first
//! match within a family (preferring a capture group over the whole match),
//! and stop at the first success. Families are never merged. A cascade that
//! matches nothing yields an empty string; there is no error path.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::extraction::normalize::collapse_whitespace;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").unwrap()
});

// Regional 10-digit, then international, then NANP. First family that
// matches anywhere wins.
static PHONE_FAMILIES: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"(?:\+91[-.\s]?)?[0-9]{10}").unwrap(),
        Regex::new(r"(?:\+?[0-9]{1,3}[-.\s]?)?\(?[0-9]{3}\)?[-.\s]?[0-9]{3}[-.\s]?[0-9]{4}")
            .unwrap(),
        Regex::new(r"[0-9]{3}[-.\s]?[0-9]{3}[-.\s]?[0-9]{4}").unwrap(),
    ]
});

static LINKEDIN_FAMILIES: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"(?i)linkedin\.com/in/[A-Za-z0-9_-]+").unwrap(),
        Regex::new(r"(?i)linkedin\.com/company/[A-Za-z0-9_-]+").unwrap(),
        Regex::new(r"(?i)linkedin:\s*([A-Za-z0-9/_-]+)").unwrap(),
    ]
});

static GITHUB_FAMILIES: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"(?i)github\.com/[A-Za-z0-9_-]+").unwrap(),
        Regex::new(r"(?i)github:\s*([A-Za-z0-9/_-]+)").unwrap(),
        Regex::new(r"(?i)\bgit:\s*([A-Za-z0-9/_-]+)").unwrap(),
    ]
});

static NAME_FAMILIES: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        // Whole line of two or three capitalized words.
        Regex::new(r"(?m)^[A-Z][a-z]+ [A-Z][a-z]+(?: [A-Z][a-z]+)?$").unwrap(),
        Regex::new(r"(?m)^\s*([A-Z][a-z]+ [A-Z][a-z]+(?: [A-Z][a-z]+)?)\s*$").unwrap(),
        Regex::new(r"(?i:name):\s*([A-Z][a-z]+ [A-Z][a-z]+)").unwrap(),
        // ALL-CAPS heading immediately followed by a role keyword.
        Regex::new(r"([A-Z][A-Z\s]+)\s*(?i:software|developer|engineer)").unwrap(),
        Regex::new(r"(?m)^([A-Z][a-z]+ [A-Z][a-z]+)").unwrap(),
    ]
});

static LOCATION_FAMILIES: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        // General "City, ST" / "City, Country" geographic pattern. Listed
        // before the labeled forms to preserve the source cascade order.
        Regex::new(
            r"[A-Z][a-z]+(?:\s+[A-Z][a-z]+)*,?\s*(?:[A-Z]{2}\b|\b(?:USA|United States|Canada|UK|United Kingdom|India)\b)",
        )
        .unwrap(),
        Regex::new(r"(?i:location):\s*([^,\n]+(?:,\s*[^,\n]+)?)").unwrap(),
        Regex::new(r"(?i:address):\s*([^,\n]+(?:,\s*[^,\n]+)?)").unwrap(),
        Regex::new(r"[A-Z][a-z]+,\s*[A-Z][a-z]+").unwrap(),
    ]
});

static SUMMARY_LABEL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?im)^[^\S\n]*(?:professional\s+summary|career\s+objective|summary|objective|profile|about)\b:?[^\S\n]*",
    )
    .unwrap()
});

static SECTION_HEADING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?im)^\s*(?:experience|work\s+history|employment|education|skills|projects)\b")
        .unwrap()
});

static BLANK_LINE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n[^\S\n]*\n").unwrap());

// Long declarative sentence fallback for the summary.
static SENTENCE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*([A-Z][^.!?\n]{49,399}[.!?])").unwrap());

const MIN_NAME_LEN: usize = 4;
const MAX_NAME_LEN: usize = 49;
const MIN_SUMMARY_LEN: usize = 30;

/// First occurrence of a generic email token.
pub fn extract_email(text: &str) -> String {
    first_match(&EMAIL_RE, text).unwrap_or_default()
}

pub fn extract_phone(text: &str) -> String {
    cascade(&PHONE_FAMILIES, text).unwrap_or_default()
}

/// Domain-qualified path or labeled "LinkedIn:" line, normalized to an
/// absolute https URL.
pub fn extract_linkedin(text: &str) -> String {
    cascade(&LINKEDIN_FAMILIES, text)
        .map(|m| absolutize(&m, "linkedin.com", "linkedin.com/in"))
        .unwrap_or_default()
}

pub fn extract_github(text: &str) -> String {
    cascade(&GITHUB_FAMILIES, text)
        .map(|m| absolutize(&m, "github.com", "github.com"))
        .unwrap_or_default()
}

/// Candidate names outside [4,49] characters fall through to the next
/// pattern family instead of ending the cascade.
pub fn extract_name(text: &str) -> String {
    for re in NAME_FAMILIES.iter() {
        if let Some(candidate) = first_match(re, text) {
            let candidate = candidate.trim().to_string();
            if (MIN_NAME_LEN..=MAX_NAME_LEN).contains(&candidate.len()) {
                return candidate;
            }
        }
    }
    String::new()
}

pub fn extract_location(text: &str) -> String {
    cascade(&LOCATION_FAMILIES, text).unwrap_or_default()
}

/// Labeled summary/objective/profile/about block terminated by a blank line
/// or the next section heading, accepted at ≥30 characters; otherwise the
/// first long declarative sentence in the document.
pub fn extract_summary(text: &str) -> String {
    if let Some(label) = SUMMARY_LABEL_RE.find(text) {
        let rest = &text[label.end()..];
        let mut end = rest.len();
        if let Some(blank) = BLANK_LINE_RE.find(rest) {
            end = end.min(blank.start());
        }
        if let Some(heading) = SECTION_HEADING_RE.find(rest) {
            end = end.min(heading.start());
        }
        let content = collapse_whitespace(&rest[..end]);
        if content.len() >= MIN_SUMMARY_LEN {
            return content;
        }
    }

    first_match(&SENTENCE_RE, text)
        .map(|s| collapse_whitespace(&s))
        .unwrap_or_default()
}

/// Runs one family list: first family with any match wins.
fn cascade(families: &[Regex], text: &str) -> Option<String> {
    families.iter().find_map(|re| first_match(re, text))
}

/// First match of one pattern, preferring the first participating capture
/// group over the whole match.
fn first_match(re: &Regex, text: &str) -> Option<String> {
    re.captures(text).map(|caps| {
        let m = caps
            .iter()
            .skip(1)
            .flatten()
            .next()
            .unwrap_or_else(|| caps.get(0).unwrap());
        m.as_str().trim().to_string()
    })
}

/// Normalizes a profile-link candidate to `https://<domain>/...`, treating
/// bare handles as paths under `handle_base`.
fn absolutize(candidate: &str, domain: &str, handle_base: &str) -> String {
    let lower = candidate.to_ascii_lowercase();
    let url = if lower.contains(domain) {
        candidate.to_string()
    } else {
        format!("{}/{}", handle_base, candidate.trim_start_matches('/'))
    };
    if url.starts_with("http://") || url.starts_with("https://") {
        url
    } else {
        format!("https://{url}")
    }
}
