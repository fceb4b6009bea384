//! Record extractors — recover repeated structured entries (experience,
//! education, projects) from their section spans.
//!
//! Shared shape: scope the section, try record pattern families in priority
//! order, collect all non-overlapping matches within a family in document
//! order, and stop after the first family that yields at least one accepted
//! record. Families are never merged: a document matching a weaker family
//! first can miss records a later family would recover, and that ordering
//! is part of the contract.
//!
//! Experience and education widen to the whole document when their section
//! anchor is missing. Projects never do — generic capitalized-phrase
//! patterns produce too many false positives document-wide, so a missing
//! projects heading yields an empty list.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::extraction::normalize::collapse_whitespace;
use crate::extraction::sections::{self, SectionSpan};
use crate::models::profile::{EducationEntry, ExperienceEntry, ProjectEntry};

/// Stand-in description for experience entries whose convention carries none.
pub const EXPERIENCE_FILLER: &str = "Experience details extracted from resume.";

// "Title — Company — Duration" on one line.
static EXP_DASHED_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([A-Z][^,\n]*?)\s*[-\u{2013}\u{2014}@]\s*([^,\n]+?)\s*[-\u{2013}\u{2014}|]\s*([^,\n]+?)\s*$")
        .unwrap()
});

// "Title at Company — Duration" on one line.
static EXP_AT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([A-Z][^,\n]*?)\s+(?i:at)\s+([^,\n]+?)\s*[-\u{2013}\u{2014}|]\s*([^,\n]+?)\s*$")
        .unwrap()
});

// Labeled "Position:/Company:/Duration:/Description:" blocks.
static POSITION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)position:\s*(.+?)(?:\s+company:|\s+duration:|\s+description:|\n|$)").unwrap());
static COMPANY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)company:\s*(.+?)(?:\s+duration:|\s+description:|\n|$)").unwrap());
static DURATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)duration:\s*(.+?)(?:\s+description:|\n|$)").unwrap());
static DESCRIPTION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)description:\s*(.+?)(?:\n|$)").unwrap());

// Degree keyword, optional qualifier, institution ending in a school word,
// optional year range. The qualifier and institution classes exclude ':' so
// labeled "Degree:/Institution:" blocks fall through to the labeled family.
static EDU_KEYWORD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b((?i:bachelor|master|phd|b\.s\.|b\.a\.|m\.s\.|m\.a\.|ph\.d\.|b\.tech|m\.tech|b\.e\.|m\.e\.))([^,:\n]*?)\s+(?:(?i:from)\s+)?((?:[A-Z][A-Za-z&.]*\s+)*(?i:University|College|Institute|School)[^,\n]*?)(?:[,\s]*(\d{4}(?:\s*[-\u{2013}\u{2014}]\s*(?:\d{4}|(?i:Present|Current)))?))?",
    )
    .unwrap()
});

static EDU_LABELED_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)degree:\s*([^,\n]+?)\s*institution:\s*([^\n]+?)\s*year:\s*([^\s,\n]+)")
        .unwrap()
});

static EDU_DASHED_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)education:\s*([^,\n]+?)\s*[-\u{2013}\u{2014}]\s*([^,\n]+?)\s*[-\u{2013}\u{2014}]\s*([^,\n]+)")
        .unwrap()
});

// "Name — Description" / "Name: Description" project lines.
static PROJECT_LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([A-Z][^,\n]{9,49})\s*[-\u{2013}\u{2014}:]\s*(\S.*)$").unwrap()
});

// Labeled "Project:/Description:/Technologies:/Link:" blocks.
static PROJECT_NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)project:\s*(.+?)(?:\s+description:|\s+technologies:|\s+link:|\n|$)").unwrap()
});
static PROJECT_TECH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)technologies:\s*(.+?)(?:\s+link:|\n|$)").unwrap());
static PROJECT_LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)link:\s*(\S+)").unwrap());

// Lines that belong to a labeled project block; without this guard the
// line family would read "Description: ..." as a project named
// "Description" and shadow the labeled family.
static PROJECT_LABEL_LINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*(?:project|description|technologies|link)\s*:").unwrap());

static BLOCK_SPLIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n[^\S\n]*\n").unwrap());

/// Job history entries from the experience section, or the whole document
/// when no section anchor is present.
pub fn extract_experience(text: &str) -> Vec<ExperienceEntry> {
    let span = sections::locate(text, &sections::EXPERIENCE).text();

    for family in [experience_dashed, experience_at, experience_labeled] {
        let records = family(span);
        if !records.is_empty() {
            return records;
        }
    }
    Vec::new()
}

fn experience_dashed(span: &str) -> Vec<ExperienceEntry> {
    line_records(span, &EXP_DASHED_RE)
}

fn experience_at(span: &str) -> Vec<ExperienceEntry> {
    line_records(span, &EXP_AT_RE)
}

/// One-line record matches with any immediately following non-blank lines
/// collected as the description.
fn line_records(span: &str, re: &Regex) -> Vec<ExperienceEntry> {
    let mut records: Vec<ExperienceEntry> = Vec::new();
    let mut open = false;

    for line in span.lines() {
        if let Some(caps) = re.captures(line) {
            let title = caps[1].trim().to_string();
            let company = caps[2].trim().to_string();
            if title.is_empty() || company.is_empty() {
                continue;
            }
            records.push(ExperienceEntry {
                title,
                company,
                duration: caps[3].trim().to_string(),
                description: String::new(),
            });
            open = true;
        } else if line.trim().is_empty() {
            open = false;
        } else if open {
            if let Some(last) = records.last_mut() {
                if !last.description.is_empty() {
                    last.description.push(' ');
                }
                last.description.push_str(line.trim());
            }
        }
    }

    for record in &mut records {
        if record.description.is_empty() {
            record.description = EXPERIENCE_FILLER.to_string();
        } else {
            record.description = collapse_whitespace(&record.description);
        }
    }
    records
}

fn experience_labeled(span: &str) -> Vec<ExperienceEntry> {
    let mut records = Vec::new();
    for block in BLOCK_SPLIT_RE.split(span) {
        let title = label_value(block, &POSITION_RE);
        let company = label_value(block, &COMPANY_RE);
        if title.is_empty() || company.is_empty() {
            continue;
        }
        let description = label_value(block, &DESCRIPTION_RE);
        records.push(ExperienceEntry {
            title,
            company,
            duration: label_value(block, &DURATION_RE),
            description: if description.is_empty() {
                EXPERIENCE_FILLER.to_string()
            } else {
                description
            },
        });
    }
    records
}

/// Education entries from the education section, or the whole document when
/// no section anchor is present.
pub fn extract_education(text: &str) -> Vec<EducationEntry> {
    let span = sections::locate(text, &sections::EDUCATION).text();

    for family in [education_keyword, education_labeled, education_dashed] {
        let records = family(span);
        if !records.is_empty() {
            return records;
        }
    }
    Vec::new()
}

fn education_keyword(span: &str) -> Vec<EducationEntry> {
    EDU_KEYWORD_RE
        .captures_iter(span)
        .filter_map(|caps| {
            let keyword = caps.get(1).map_or("", |m| m.as_str());
            let qualifier = caps.get(2).map_or("", |m| m.as_str());
            let institution = caps.get(3).map_or("", |m| m.as_str()).trim().to_string();
            if keyword.is_empty() || institution.is_empty() {
                return None;
            }
            Some(EducationEntry {
                degree: format!("{keyword}{qualifier}").trim().to_string(),
                institution,
                year: caps.get(4).map_or(String::new(), |m| m.as_str().trim().to_string()),
                gpa: String::new(),
            })
        })
        .collect()
}

fn education_labeled(span: &str) -> Vec<EducationEntry> {
    three_part_records(span, &EDU_LABELED_RE)
}

fn education_dashed(span: &str) -> Vec<EducationEntry> {
    three_part_records(span, &EDU_DASHED_RE)
}

fn three_part_records(span: &str, re: &Regex) -> Vec<EducationEntry> {
    re.captures_iter(span)
        .filter_map(|caps| {
            let degree = caps[1].trim().to_string();
            let institution = caps[2].trim().to_string();
            if degree.is_empty() || institution.is_empty() {
                return None;
            }
            Some(EducationEntry {
                degree,
                institution,
                year: caps[3].trim().to_string(),
                gpa: String::new(),
            })
        })
        .collect()
}

/// Project entries, strictly scoped: no projects heading means no records.
pub fn extract_projects(text: &str) -> Vec<ProjectEntry> {
    let span = match sections::locate_scoped(text, &sections::PROJECTS) {
        SectionSpan::Scoped(span) => span,
        _ => return Vec::new(),
    };

    for family in [projects_lines, projects_labeled] {
        let records = family(span);
        if !records.is_empty() {
            return records;
        }
    }
    Vec::new()
}

fn projects_lines(span: &str) -> Vec<ProjectEntry> {
    let mut records: Vec<ProjectEntry> = Vec::new();
    let mut open = false;

    for line in span.lines() {
        if PROJECT_LABEL_LINE_RE.is_match(line) {
            open = false;
        } else if let Some(caps) = PROJECT_LINE_RE.captures(line) {
            let name = caps[1].trim().to_string();
            let description = caps[2].trim().to_string();
            if name.is_empty() || description.is_empty() {
                continue;
            }
            records.push(ProjectEntry {
                name,
                description,
                technologies: String::new(),
                link: String::new(),
            });
            open = true;
        } else if line.trim().is_empty() {
            open = false;
        } else if open {
            if let Some(last) = records.last_mut() {
                last.description.push(' ');
                last.description.push_str(line.trim());
            }
        }
    }

    for record in &mut records {
        record.description = collapse_whitespace(&record.description);
    }
    records
}

fn projects_labeled(span: &str) -> Vec<ProjectEntry> {
    let mut records = Vec::new();
    for block in BLOCK_SPLIT_RE.split(span) {
        let name = label_value(block, &PROJECT_NAME_RE);
        let description = label_value(block, &DESCRIPTION_RE);
        if name.is_empty() || description.is_empty() {
            continue;
        }
        records.push(ProjectEntry {
            name,
            description,
            technologies: label_value(block, &PROJECT_TECH_RE),
            link: label_value(block, &PROJECT_LINK_RE),
        });
    }
    records
}

fn label_value(block: &str, re: &Regex) -> String {
    re.captures(block)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_dashed_experience_entries_in_document_order() {
        let text = "Experience\n\
                    Software Engineer - Google - 2020-2022\n\
                    Senior Engineer - Meta - 2022-Present\n";
        let records = extract_experience(text);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].title, "Software Engineer");
        assert_eq!(records[0].company, "Google");
        assert_eq!(records[0].duration, "2020-2022");
        assert_eq!(records[1].title, "Senior Engineer");
        assert_eq!(records[1].company, "Meta");
        assert_eq!(records[1].duration, "2022-Present");
    }

    #[test]
    fn test_missing_description_gets_filler() {
        let text = "Experience\nEngineer - Acme - 2020\n";
        let records = extract_experience(text);
        assert_eq!(records[0].description, EXPERIENCE_FILLER);
    }

    #[test]
    fn test_description_collected_until_blank_line() {
        let text = "Experience\n\
                    Engineer - Acme - 2020\n\
                    Built the billing system.\n\
                    Shipped v2 to production.\n\
                    \n\
                    Stray trailing text";
        let records = extract_experience(text);
        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0].description,
            "Built the billing system. Shipped v2 to production."
        );
    }

    #[test]
    fn test_at_family_used_when_dashed_finds_nothing() {
        let text = "Experience\nStaff Engineer at Initech | 2018-2021\n";
        let records = extract_experience(text);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Staff Engineer");
        assert_eq!(records[0].company, "Initech");
        assert_eq!(records[0].duration, "2018-2021");
    }

    #[test]
    fn test_first_matching_family_wins_no_merge() {
        // One dashed record plus one at-form record: only the dashed family's
        // output survives.
        let text = "Experience\n\
                    Engineer - Acme - 2020\n\
                    \n\
                    Analyst at Initech - 2018\n";
        let records = extract_experience(text);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].company, "Acme");
    }

    #[test]
    fn test_labeled_experience_block() {
        let text = "Experience\n\
                    \n\
                    Position: Senior Developer\n\
                    Company: Initech\n\
                    Duration: 2019 - 2021\n\
                    Description: Led a team of four.\n";
        let records = extract_experience(text);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Senior Developer");
        assert_eq!(records[0].company, "Initech");
        assert_eq!(records[0].duration, "2019 - 2021");
        assert_eq!(records[0].description, "Led a team of four.");
    }

    #[test]
    fn test_labeled_experience_single_line() {
        let text = "Experience\n\nPosition: Dev Company: Acme Duration: 2020\n";
        let records = extract_experience(text);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Dev");
        assert_eq!(records[0].company, "Acme");
        assert_eq!(records[0].duration, "2020");
        assert_eq!(records[0].description, EXPERIENCE_FILLER);
    }

    #[test]
    fn test_experience_without_section_scans_whole_document() {
        let text = "Jane Roe\nEngineer - Acme - 2020\n";
        let records = extract_experience(text);
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_no_experience_found_is_empty_not_error() {
        assert!(extract_experience("nothing structured here").is_empty());
    }

    #[test]
    fn test_education_keyword_family() {
        let text = "Education\nBachelor of Science from State University, 2019\n";
        let records = extract_education(text);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].degree, "Bachelor of Science");
        assert_eq!(records[0].institution, "State University");
        assert_eq!(records[0].year, "2019");
        assert_eq!(records[0].gpa, "");
    }

    #[test]
    fn test_education_labeled_family() {
        let text = "Degree: B.Tech Institution: XYZ University Year: 2020";
        let records = extract_education(text);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].degree, "B.Tech");
        assert_eq!(records[0].institution, "XYZ University");
        assert_eq!(records[0].year, "2020");
    }

    #[test]
    fn test_education_keyword_without_year() {
        let text = "Education\nB.E. Mumbai Institute\n";
        let records = extract_education(text);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].degree, "B.E.");
        assert_eq!(records[0].institution, "Mumbai Institute");
        assert_eq!(records[0].year, "");
    }

    #[test]
    fn test_two_education_entries_in_order() {
        let text = "Education\n\
                    B.S. from ABC University, 2015\n\
                    M.S. from XYZ University, 2017\n";
        let records = extract_education(text);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].year, "2015");
        assert_eq!(records[1].institution, "XYZ University");
    }

    #[test]
    fn test_projects_require_section_heading() {
        // The line shape would match, but there is no projects anchor.
        let text = "Inventory Tracker: CLI tool for warehouse counts\n";
        assert!(extract_projects(text).is_empty());
    }

    #[test]
    fn test_project_line_family() {
        let text = "Projects\n\
                    Inventory Tracker: built a CLI tool for warehouse counts\n\
                    Fleet Dashboard: realtime vehicle telemetry viewer\n";
        let records = extract_projects(text);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "Inventory Tracker");
        assert!(records[0].description.contains("warehouse"));
        assert_eq!(records[1].name, "Fleet Dashboard");
        assert_eq!(records[0].technologies, "");
        assert_eq!(records[0].link, "");
    }

    #[test]
    fn test_project_labeled_family_fills_optional_fields() {
        let text = "Projects\n\
                    \n\
                    Project: Fleet Dashboard\n\
                    Description: Realtime vehicle telemetry.\n\
                    Technologies: Rust, Kafka\n\
                    Link: https://example.com/fleet\n";
        let records = extract_projects(text);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Fleet Dashboard");
        assert_eq!(records[0].description, "Realtime vehicle telemetry.");
        assert_eq!(records[0].technologies, "Rust, Kafka");
        assert_eq!(records[0].link, "https://example.com/fleet");
    }

    #[test]
    fn test_project_without_description_is_discarded() {
        let text = "Projects\n\nProject: Orphan Entry\n";
        assert!(extract_projects(text).is_empty());
    }

    #[test]
    fn test_extraction_stops_at_section_terminator() {
        let text = "Experience\n\
                    Engineer - Acme - 2020\n\
                    Education\n\
                    Tutor - School - 2016\n";
        let records = extract_experience(text);
        // The education section's line never enters the experience span.
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].company, "Acme");
    }
}
