//! Section segmentation — locates a named résumé section's text span using
//! heading-keyword anchors.
//!
//! The outcome is explicitly three-valued so callers can tell a scoped span
//! from whole-document fallback from "no anchor at all". Projects extraction
//! treats the last case as "skip entirely"; experience and education widen
//! to the whole document instead.

/// Keyword anchors for one section, plus the anchors of other sections that
/// terminate its span. Matching is case-insensitive, first occurrence wins.
pub struct SectionAnchors {
    pub anchors: &'static [&'static str],
    pub terminators: &'static [&'static str],
}

pub const EXPERIENCE: SectionAnchors = SectionAnchors {
    anchors: &["experience", "work history", "employment"],
    terminators: &["education", "skills", "projects"],
};

pub const EDUCATION: SectionAnchors = SectionAnchors {
    anchors: &["education", "academic", "qualification"],
    terminators: &["experience", "skills", "projects"],
};

pub const SKILLS: SectionAnchors = SectionAnchors {
    anchors: &["technical skills", "skills", "technologies"],
    terminators: &["experience", "education", "projects"],
};

pub const PROJECTS: SectionAnchors = SectionAnchors {
    anchors: &["projects", "project", "portfolio"],
    terminators: &["experience", "education", "skills"],
};

/// Result of locating a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionSpan<'a> {
    /// Anchor found; span runs from the anchor to the first terminator
    /// occurrence or end of text.
    Scoped(&'a str),
    /// No anchor found; caller gets the entire document.
    WholeDocument(&'a str),
    /// No anchor found and the caller required scoping.
    NotFound,
}

impl<'a> SectionSpan<'a> {
    /// The span text, treating `NotFound` as empty.
    pub fn text(&self) -> &'a str {
        match self {
            SectionSpan::Scoped(s) | SectionSpan::WholeDocument(s) => s,
            SectionSpan::NotFound => "",
        }
    }
}

/// Locates `section` in `text`, falling back to the whole document when no
/// anchor matches.
pub fn locate<'a>(text: &'a str, section: &SectionAnchors) -> SectionSpan<'a> {
    match locate_scoped(text, section) {
        SectionSpan::NotFound => SectionSpan::WholeDocument(text),
        scoped => scoped,
    }
}

/// Locates `section` in `text` with no fallback: absent anchors yield
/// `NotFound`.
pub fn locate_scoped<'a>(text: &'a str, section: &SectionAnchors) -> SectionSpan<'a> {
    // ASCII lowercasing preserves byte offsets, so indices found in the
    // lowered copy slice the original directly.
    let lower = text.to_ascii_lowercase();

    let start = match earliest(&lower, section.anchors, 0) {
        Some((pos, _)) => pos,
        None => return SectionSpan::NotFound,
    };

    let anchor_len = section
        .anchors
        .iter()
        .filter(|a| lower[start..].starts_with(&a.to_ascii_lowercase()))
        .map(|a| a.len())
        .max()
        .unwrap_or(0);

    let end = earliest(&lower, section.terminators, start + anchor_len)
        .map(|(pos, _)| pos)
        .unwrap_or(text.len());

    SectionSpan::Scoped(&text[start..end])
}

/// Earliest occurrence of any keyword at or after `from`, with the keyword
/// that matched.
fn earliest<'k>(
    lower: &str,
    keywords: &'k [&'static str],
    from: usize,
) -> Option<(usize, &'k str)> {
    keywords
        .iter()
        .filter_map(|kw| {
            lower[from..]
                .find(&kw.to_ascii_lowercase())
                .map(|pos| (from + pos, *kw))
        })
        .min_by_key(|(pos, _)| *pos)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = "John Doe\n\
                       EXPERIENCE\n\
                       Engineer - Acme - 2020\n\
                       EDUCATION\n\
                       B.S. from State University\n\
                       SKILLS\n\
                       Rust, Python";

    #[test]
    fn test_scoped_span_runs_to_first_terminator() {
        let span = locate(DOC, &EXPERIENCE);
        match span {
            SectionSpan::Scoped(s) => {
                assert!(s.starts_with("EXPERIENCE"));
                assert!(s.contains("Engineer - Acme"));
                assert!(!s.contains("EDUCATION"));
            }
            other => panic!("expected scoped span, got {other:?}"),
        }
    }

    #[test]
    fn test_education_span_runs_to_skills() {
        let span = locate(DOC, &EDUCATION);
        let text = span.text();
        assert!(text.contains("State University"));
        assert!(!text.contains("Rust"));
    }

    #[test]
    fn test_missing_anchor_falls_back_to_whole_document() {
        let doc = "Jane Roe\njane@example.com";
        assert_eq!(locate(doc, &EXPERIENCE), SectionSpan::WholeDocument(doc));
    }

    #[test]
    fn test_missing_anchor_scoped_is_not_found() {
        let doc = "Jane Roe\njane@example.com";
        assert_eq!(locate_scoped(doc, &PROJECTS), SectionSpan::NotFound);
    }

    #[test]
    fn test_anchor_match_is_case_insensitive() {
        let doc = "Work History\nEngineer - Acme - 2020";
        match locate(doc, &EXPERIENCE) {
            SectionSpan::Scoped(s) => assert!(s.starts_with("Work History")),
            other => panic!("expected scoped span, got {other:?}"),
        }
    }

    #[test]
    fn test_span_without_terminator_runs_to_end() {
        let doc = "intro\nProjects\nChat App: a realtime chat server";
        match locate_scoped(doc, &PROJECTS) {
            SectionSpan::Scoped(s) => assert!(s.ends_with("chat server")),
            other => panic!("expected scoped span, got {other:?}"),
        }
    }

    #[test]
    fn test_not_found_text_is_empty() {
        assert_eq!(SectionSpan::NotFound.text(), "");
    }

    #[test]
    fn test_terminator_inside_anchor_is_skipped() {
        // "projects" must not terminate itself when the span opens with it.
        let doc = "Projects\nTracker - built a tracker";
        match locate_scoped(doc, &PROJECTS) {
            SectionSpan::Scoped(s) => assert!(s.contains("Tracker")),
            other => panic!("expected scoped span, got {other:?}"),
        }
    }
}
