// src/extractor.rs
//! PDF text extraction.
//!
//! Parsing is delegated to `lopdf`; this module only decides the page order and
//! how fragments and pages are stitched together.

use lopdf::Document;

use crate::errors::{GradeError, Result};
use crate::models::UploadedFile;

/// Separator placed between the text of consecutive pages.
pub const PAGE_SEPARATOR: &str = "\n\n";

/// Extracts the text of every page of `file`, in page order.
///
/// Each page's text fragments are joined by single spaces and pages are joined
/// by a blank line. A PDF without a text layer yields an empty string; callers
/// decide whether that is a problem.
pub fn extract_text(file: &UploadedFile) -> Result<String> {
    if file.bytes.is_empty() {
        return Err(GradeError::Read {
            name: file.name.clone(),
            reason: "the file is empty".to_string(),
        });
    }

    let document = Document::load_mem(&file.bytes).map_err(|e| GradeError::Parse {
        name: file.name.clone(),
        reason: e.to_string(),
    })?;

    // BTreeMap keyed by page number, so iteration is already in page order.
    let pages = document.get_pages();
    log::debug!("'{}' has {} page(s)", file.name, pages.len());

    let mut page_texts = Vec::with_capacity(pages.len());
    for page_number in pages.keys() {
        let raw = document
            .extract_text(&[*page_number])
            .map_err(|e| GradeError::Parse {
                name: file.name.clone(),
                reason: format!("page {}: {}", page_number, e),
            })?;
        page_texts.push(join_fragments(&raw));
    }

    Ok(page_texts.join(PAGE_SEPARATOR))
}

/// Extracts on the blocking pool; lopdf parsing is CPU-bound.
pub async fn extract_text_blocking(file: std::sync::Arc<UploadedFile>) -> Result<String> {
    tokio::task::spawn_blocking(move || extract_text(&file))
        .await
        .map_err(|e| GradeError::Task(e.to_string()))?
}

fn join_fragments(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fragments_collapse_to_single_spaces() {
        assert_eq!(join_fragments("Intro\n  to\tRust \n"), "Intro to Rust");
        assert_eq!(join_fragments(" \n "), "");
    }

    #[test]
    fn test_empty_payload_is_a_read_error() {
        let file = UploadedFile::new("empty.pdf", Vec::new());
        assert!(matches!(extract_text(&file), Err(GradeError::Read { .. })));
    }

    #[test]
    fn test_garbage_is_a_parse_error() {
        let file = UploadedFile::new("notes.pdf", b"definitely not a pdf".to_vec());
        match extract_text(&file) {
            Err(GradeError::Parse { name, .. }) => assert_eq!(name, "notes.pdf"),
            other => panic!("expected parse error, got {:?}", other),
        }
    }
}
