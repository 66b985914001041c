//! Document text extraction — the boundary between raw uploads and the
//! analysis engine. Extraction never fails the request; failures are
//! recorded on the document and surfaced to the caller.

use std::path::Path;

use tracing::warn;

use crate::models::session::UploadedDocument;

/// Share of replacement characters above which a lossy decode is considered
/// binary garbage rather than text.
const MAX_REPLACEMENT_RATIO: f64 = 0.10;

/// Extracts plain text from an uploaded file based on its extension.
///
/// PDF goes through `pdf-extract`; txt/markdown decode as UTF-8; anything
/// else gets a lossy decode that is flagged unsuccessful when it looks
/// binary. Never panics.
pub fn extract_text(filename: &str, bytes: &[u8]) -> UploadedDocument {
    let extension = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase);

    let (text, extraction_succeeded, extraction_method) = match extension.as_deref() {
        Some("pdf") => match pdf_extract::extract_text_from_mem(bytes) {
            Ok(text) => {
                let ok = !text.trim().is_empty();
                (text, ok, "pdf")
            }
            Err(e) => {
                warn!("PDF extraction failed for {filename}: {e}");
                (String::new(), false, "pdf")
            }
        },
        Some("txt") | Some("md") | Some("markdown") => {
            (String::from_utf8_lossy(bytes).into_owned(), true, "plain")
        }
        _ => {
            let text = String::from_utf8_lossy(bytes).into_owned();
            let ok = looks_like_text(&text);
            if !ok {
                warn!("Could not extract text from {filename} (unsupported format)");
            }
            (text, ok, "lossy")
        }
    };

    UploadedDocument {
        filename: filename.to_string(),
        byte_size: bytes.len(),
        text: if extraction_succeeded { text } else { String::new() },
        extraction_succeeded,
        extraction_method: extraction_method.to_string(),
    }
}

fn looks_like_text(decoded: &str) -> bool {
    if decoded.trim().is_empty() {
        return false;
    }
    let total = decoded.chars().count();
    let replacements = decoded.chars().filter(|c| *c == '\u{FFFD}').count();
    (replacements as f64) / (total as f64) < MAX_REPLACEMENT_RATIO
}
