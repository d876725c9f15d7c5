//! End-of-line detection and normalization utilities.

use std::borrow::Cow;

/// Represents the detected end-of-line type in a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EolType {
    /// Line Feed (Unix/Linux/macOS) - \n
    Lf,
    /// Carriage Return + Line Feed (Windows) - \r\n
    Crlf,
    /// Carriage Return (old macOS) - \r
    Cr,
    /// More than one kind of line ending
    Mixed,
}

/// Detect the end-of-line type used in `text`.
///
/// Text without any line ending counts as `Lf`.
pub fn detect_eol(text: &str) -> EolType {
    let bytes = text.as_bytes();
    let mut lf_count = 0u64;
    let mut crlf_count = 0u64;
    let mut cr_count = 0u64;

    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\r' => {
                if bytes.get(i + 1) == Some(&b'\n') {
                    crlf_count += 1;
                    i += 2;
                } else {
                    cr_count += 1;
                    i += 1;
                }
            }
            b'\n' => {
                lf_count += 1;
                i += 1;
            }
            _ => i += 1,
        }
    }

    match (lf_count > 0, crlf_count > 0, cr_count > 0) {
        (_, false, false) => EolType::Lf,
        (false, true, false) => EolType::Crlf,
        (false, false, true) => EolType::Cr,
        _ => EolType::Mixed,
    }
}

/// Rewrite every CRLF and lone CR to LF, returning the original EOL type.
pub fn normalize_eol(text: &str) -> (Cow<'_, str>, EolType) {
    let original_eol = detect_eol(text);

    if !text.contains('\r') {
        return (Cow::Borrowed(text), original_eol);
    }

    let bytes = text.as_bytes();
    let mut result = String::with_capacity(text.len());
    let mut start = 0;
    let mut i = 0;

    // CR is ASCII, so every index sliced at here is a char boundary.
    while i < bytes.len() {
        if bytes[i] == b'\r' {
            result.push_str(&text[start..i]);
            result.push('\n');
            i += if bytes.get(i + 1) == Some(&b'\n') { 2 } else { 1 };
            start = i;
        } else {
            i += 1;
        }
    }
    result.push_str(&text[start..]);

    (Cow::Owned(result), original_eol)
}
