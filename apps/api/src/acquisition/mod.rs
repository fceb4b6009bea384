//! Upload acquisition — turn an uploaded file into extractable plain text.
//!
//! PDFs go through `pdf_extract` first; when that fails (scanned or
//! malformed files) a crude byte scan pulls the literal strings out of the
//! raw PDF stream instead. Either path must produce at least a token of
//! real text or the upload is rejected, so downstream extraction never
//! runs on binary noise.

use thiserror::Error;

use crate::extraction::normalize::collapse_whitespace;

/// Minimum trimmed length for acquired text to count as readable.
pub const MIN_READABLE_LEN: usize = 10;

#[derive(Debug, Error)]
pub enum AcquisitionError {
    #[error("Unsupported file type '{0}': only .pdf and .txt files are accepted")]
    UnsupportedType(String),

    #[error("File exceeds the {max_bytes} byte upload limit")]
    TooLarge { max_bytes: usize },

    #[error("No readable text could be recovered from the file")]
    Unreadable,
}

/// Acquire text from an uploaded file, dispatching on the filename extension.
pub fn acquire_from_upload(
    filename: &str,
    bytes: &[u8],
    max_bytes: usize,
) -> Result<String, AcquisitionError> {
    if bytes.len() > max_bytes {
        return Err(AcquisitionError::TooLarge { max_bytes });
    }

    let lower = filename.to_ascii_lowercase();
    let text = if lower.ends_with(".pdf") {
        pdf_text(bytes)
    } else if lower.ends_with(".txt") {
        String::from_utf8_lossy(bytes).into_owned()
    } else {
        let ext = lower.rsplit('.').next().unwrap_or("").to_string();
        return Err(AcquisitionError::UnsupportedType(ext));
    };

    readable(text)
}

/// Acquire text pasted directly by the caller. Same readability gate as
/// file uploads.
pub fn acquire_from_text(text: &str) -> Result<String, AcquisitionError> {
    readable(text.to_string())
}

fn readable(text: String) -> Result<String, AcquisitionError> {
    if text.trim().chars().count() < MIN_READABLE_LEN {
        return Err(AcquisitionError::Unreadable);
    }
    Ok(text)
}

fn pdf_text(bytes: &[u8]) -> String {
    match pdf_extract::extract_text_from_mem(bytes) {
        Ok(text) if text.trim().len() >= MIN_READABLE_LEN => text,
        Ok(_) | Err(_) => scan_raw_bytes(bytes),
    }
}

/// Last-resort recovery from the raw PDF stream: word-like literal strings
/// first, and when those alone are too short, the content of `BT … ET`
/// text objects with non-word characters stripped. Loses all layout but
/// salvages enough words for extraction on many damaged files.
fn scan_raw_bytes(bytes: &[u8]) -> String {
    let literals = scan_literal_strings(bytes);
    if literals.trim().len() >= MIN_READABLE_LEN {
        return literals;
    }
    scan_text_objects(bytes)
}

/// A literal must be at least this long, with at least one letter, to count
/// as text rather than positioning noise.
const MIN_LITERAL_LEN: usize = 3;

/// Collects the printable content of PDF literal string objects `(...)`,
/// keeping only word-like literals.
fn scan_literal_strings(bytes: &[u8]) -> String {
    let mut literals: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    let mut escaped = false;

    for &b in bytes {
        if depth == 0 {
            if b == b'(' {
                depth = 1;
            }
            continue;
        }
        if escaped {
            escaped = false;
            continue;
        }
        match b {
            b'\\' => escaped = true,
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    let literal = std::mem::take(&mut current);
                    let literal = literal.trim();
                    if literal.len() >= MIN_LITERAL_LEN
                        && literal.chars().any(|c| c.is_ascii_alphabetic())
                    {
                        literals.push(literal.to_string());
                    }
                }
            }
            0x20..=0x7e => current.push(b as char),
            b'\n' | b'\r' | b'\t' => current.push(' '),
            _ => {}
        }
    }
    literals.join(" ")
}

/// Collects `BT … ET` text object content, reducing it to alphanumeric
/// runs. Picks up text drawn with hex strings or odd operators that the
/// literal scan misses.
fn scan_text_objects(bytes: &[u8]) -> String {
    let mut out = String::new();
    let mut from = 0;

    while let Some(start) = find_sub(bytes, b"BT", from) {
        let Some(end) = find_sub(bytes, b"ET", start + 2) else {
            break;
        };
        for &b in &bytes[start + 2..end] {
            if b.is_ascii_alphanumeric() {
                out.push(b as char);
            } else {
                out.push(' ');
            }
        }
        out.push(' ');
        from = end + 2;
    }

    collapse_whitespace(&out)
}

fn find_sub(haystack: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    haystack
        .get(from..)?
        .windows(needle.len())
        .position(|w| w == needle)
        .map(|p| from + p)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_txt_upload_passes_through() {
        let body = b"John Smith\njohn@example.com";
        let text = acquire_from_upload("resume.txt", body, 1024).unwrap();
        assert!(text.contains("John Smith"));
    }

    #[test]
    fn test_extension_check_is_case_insensitive() {
        let body = b"John Smith\njohn@example.com";
        assert!(acquire_from_upload("RESUME.TXT", body, 1024).is_ok());
    }

    #[test]
    fn test_unsupported_extension_rejected() {
        let err = acquire_from_upload("resume.docx", b"irrelevant", 1024).unwrap_err();
        assert!(matches!(err, AcquisitionError::UnsupportedType(ext) if ext == "docx"));
    }

    #[test]
    fn test_oversized_upload_rejected_before_decoding() {
        let body = vec![b'a'; 64];
        let err = acquire_from_upload("resume.txt", &body, 32).unwrap_err();
        assert!(matches!(err, AcquisitionError::TooLarge { max_bytes: 32 }));
    }

    #[test]
    fn test_near_empty_text_is_unreadable() {
        let err = acquire_from_upload("resume.txt", b"  hi  ", 1024).unwrap_err();
        assert!(matches!(err, AcquisitionError::Unreadable));
    }

    #[test]
    fn test_pasted_text_uses_same_gate() {
        assert!(acquire_from_text("short").is_err());
        assert!(acquire_from_text("A perfectly ordinary resume body").is_ok());
    }

    #[test]
    fn test_literal_string_scan_recovers_paren_content() {
        let raw = b"%PDF-1.4 stream BT (John Smith) Tj (Software Engineer) Tj ET";
        let text = scan_literal_strings(raw);
        assert_eq!(text, "John Smith Software Engineer");
    }

    #[test]
    fn test_literal_string_scan_handles_nesting_and_escapes() {
        let raw = br"(outer (inner) tail) (a\)bc)";
        let text = scan_literal_strings(raw);
        assert!(text.contains("outer"));
        assert!(text.contains("inner"));
        assert!(text.contains("abc"));
    }

    #[test]
    fn test_short_and_letterless_literals_are_noise() {
        // Kerning offsets and glyph codes, not text: nothing here survives
        // the word-like filter, so the upload is rejected.
        let raw = b"%PDF-1.4 (1) (22) (4567) (!?.) (x)";
        assert_eq!(scan_literal_strings(raw), "");
        let err = acquire_from_upload("resume.pdf", raw, 1024).unwrap_err();
        assert!(matches!(err, AcquisitionError::Unreadable));
    }

    #[test]
    fn test_text_object_scan_used_when_literals_fall_short() {
        // No usable literals, but the BT..ET text object carries the words.
        let raw = b"%PDF-1.4 stream BT /F1 12 Tf John Smith Software Engineer Tj ET endstream";
        let text = acquire_from_upload("resume.pdf", raw, 1024).unwrap();
        assert!(text.contains("John Smith"));
        assert!(text.contains("Software Engineer"));
    }

    #[test]
    fn test_text_object_scan_strips_non_word_characters() {
        let raw = b"BT [(J)-20(ane)] TJ ET leftovers BT Doe ET";
        let text = scan_text_objects(raw);
        assert!(!text.contains('['));
        assert!(!text.contains('('));
        assert!(text.contains("Doe"));
        assert!(!text.contains("leftovers"));
    }

    #[test]
    fn test_binary_garbage_pdf_is_unreadable() {
        let body = vec![0u8, 1, 2, 3, 255, 254];
        assert!(acquire_from_upload("resume.pdf", &body, 1024).is_err());
    }
}
