//! Text extraction module.
//!
//! Extracts text from uploads using:
//! - UTF-8 decoding for plain text
//! - lopdf for the text layer of PDFs
//! - Tesseract OCR for PNG and JPEG images
//!
//! OCR sits behind `OcrBackend` so another engine (or a fake in tests) can
//! be swapped in.

mod backend;
mod extractor;
mod pdf;
mod tesseract;

pub use backend::{check_binary, OcrBackend, OcrBackendType, OcrConfig, OcrError, OcrResult};
pub use extractor::{ExtractionError, TextExtractor};
pub use pdf::{extract_pdf_text, pdf_page_count};
pub use tesseract::TesseractBackend;
