//! PDF text-layer extraction, entirely in memory.

use lopdf::Document;

use super::extractor::ExtractionError;

/// Concatenate the text layer of every page, in page order.
///
/// The first page that fails to decode aborts the whole document.
pub fn extract_pdf_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    let doc = Document::load_mem(bytes)
        .map_err(|e| ExtractionError::Pdf(format!("failed to open document: {}", e)))?;

    // get_pages is keyed by page number, so iteration is already in order.
    let pages = doc.get_pages();
    tracing::debug!(pages = pages.len(), "extracting PDF text layer");

    let mut text = String::new();
    for page_num in pages.keys() {
        let page_text = doc.extract_text(&[*page_num]).map_err(|e| {
            ExtractionError::Pdf(format!("failed to read page {}: {}", page_num, e))
        })?;
        text.push_str(&page_text);
    }

    Ok(text.trim().to_string())
}

/// Number of pages in a PDF, if it can be opened.
pub fn pdf_page_count(bytes: &[u8]) -> Option<usize> {
    Document::load_mem(bytes).ok().map(|doc| doc.get_pages().len())
}
