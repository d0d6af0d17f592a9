//! Text extraction from uploaded files.
//!
//! Dispatches on the declared filename suffix:
//! - `.txt` is decoded directly
//! - `.pdf` goes through the text layer of every page
//! - `.png` / `.jpg` / `.jpeg` are decoded and handed to an OCR backend

use std::sync::Arc;

use bytes::Bytes;
use thiserror::Error;
use tracing::{debug, info};

use super::backend::{check_binary, OcrBackend, OcrConfig, OcrError};
use super::pdf::extract_pdf_text;
use super::tesseract::TesseractBackend;
use crate::models::{ExtractedText, FileKind, UploadedFile};

/// Errors that can occur during text extraction.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),

    #[error("No text could be extracted from file")]
    NoTextExtracted,

    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    #[error("Image decoding failed: {0}")]
    Image(String),

    #[error(transparent)]
    Ocr(#[from] OcrError),

    #[error("Extraction task failed: {0}")]
    Task(String),
}

/// Turns uploads into plain text.
#[derive(Clone)]
pub struct TextExtractor {
    ocr: Arc<dyn OcrBackend>,
}

impl Default for TextExtractor {
    fn default() -> Self {
        Self::with_config(OcrConfig::default())
    }
}

impl TextExtractor {
    /// Create an extractor backed by Tesseract with the given settings.
    pub fn with_config(config: OcrConfig) -> Self {
        Self::new(Arc::new(TesseractBackend::with_config(config)))
    }

    /// Create an extractor with an explicit OCR backend.
    pub fn new(ocr: Arc<dyn OcrBackend>) -> Self {
        Self { ocr }
    }

    pub fn ocr_backend(&self) -> &dyn OcrBackend {
        self.ocr.as_ref()
    }

    /// Extract trimmed, non-empty text from an upload.
    ///
    /// Unsupported suffixes are rejected before any content is read.
    pub async fn extract(&self, file: &UploadedFile) -> Result<ExtractedText, ExtractionError> {
        let kind = file
            .kind()
            .ok_or_else(|| ExtractionError::UnsupportedType(file.filename.clone()))?;

        info!(filename = %file.filename, kind = %kind, bytes = file.bytes.len(), "extracting text");

        let bytes = file.bytes.clone();
        let ocr = Arc::clone(&self.ocr);
        let raw = tokio::task::spawn_blocking(move || extract_raw(kind, &bytes, ocr.as_ref()))
            .await
            .map_err(|e| ExtractionError::Task(e.to_string()))??;

        let text = ExtractedText::new(&raw).ok_or(ExtractionError::NoTextExtracted)?;
        debug!(chars = text.as_str().len(), "extraction complete");
        Ok(text)
    }

    /// Check if required tools are available.
    pub fn check_tools() -> Vec<(String, bool)> {
        ["tesseract"]
            .iter()
            .map(|tool| (tool.to_string(), check_binary(tool)))
            .collect()
    }
}

/// Blocking extraction for a known kind. The result is not yet trimmed for
/// plain text; the caller owns the emptiness check.
fn extract_raw(kind: FileKind, bytes: &Bytes, ocr: &dyn OcrBackend) -> Result<String, ExtractionError> {
    match kind {
        FileKind::Text => Ok(String::from_utf8_lossy(bytes).into_owned()),
        FileKind::Pdf => extract_pdf_text(bytes),
        FileKind::Image(_) => extract_image_text(bytes, ocr),
    }
}

/// Decode the raster first so corrupt uploads fail before OCR runs.
fn extract_image_text(bytes: &[u8], ocr: &dyn OcrBackend) -> Result<String, ExtractionError> {
    let image = image::load_from_memory(bytes).map_err(|e| ExtractionError::Image(e.to_string()))?;
    debug!(width = image.width(), height = image.height(), "running OCR");

    let result = ocr.ocr_image(bytes)?;
    debug!(
        backend = %result.backend,
        elapsed_ms = result.processing_time_ms,
        chars = result.text.len(),
        "OCR complete"
    );
    Ok(result.text.trim().to_string())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::sync::Mutex;

    use super::*;
    use crate::ocr::backend::{OcrBackendType, OcrResult};
    use crate::ocr::pdf::test_support::build_pdf;

    /// OCR stand-in that records what it was given.
    struct FakeOcr {
        text: String,
        seen: Mutex<Vec<usize>>,
    }

    impl FakeOcr {
        fn new(text: &str) -> Self {
            Self {
                text: text.to_string(),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    impl OcrBackend for FakeOcr {
        fn backend_type(&self) -> OcrBackendType {
            OcrBackendType::Custom
        }

        fn is_available(&self) -> bool {
            true
        }

        fn availability_hint(&self) -> String {
            "always available".to_string()
        }

        fn ocr_image(&self, image: &[u8]) -> Result<OcrResult, OcrError> {
            self.seen.lock().unwrap().push(image.len());
            Ok(OcrResult {
                text: self.text.clone(),
                backend: OcrBackendType::Custom,
                processing_time_ms: 0,
            })
        }
    }

    fn png_bytes() -> Vec<u8> {
        let img = image::RgbImage::from_pixel(8, 8, image::Rgb([255, 255, 255]));
        let mut buf = Vec::new();
        img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .unwrap();
        buf
    }

    #[tokio::test]
    async fn test_plain_text_is_trimmed() {
        let extractor = TextExtractor::new(Arc::new(FakeOcr::new("")));
        let file = UploadedFile::new("post.txt", "\n  Hello world  \n".as_bytes().to_vec());
        let text = extractor.extract(&file).await.unwrap();
        assert_eq!(text.as_str(), "Hello world");
    }

    #[tokio::test]
    async fn test_whitespace_only_text_is_no_text() {
        let extractor = TextExtractor::new(Arc::new(FakeOcr::new("")));
        let file = UploadedFile::new("blank.TXT", b" \n\t \r\n".to_vec());
        let err = extractor.extract(&file).await.unwrap_err();
        assert!(matches!(err, ExtractionError::NoTextExtracted));
    }

    #[tokio::test]
    async fn test_unsupported_type_never_reaches_ocr() {
        let ocr = Arc::new(FakeOcr::new("should not run"));
        let extractor = TextExtractor::new(ocr.clone());
        for name in ["slides.pptx", "photo.gif", "README"] {
            let file = UploadedFile::new(name, png_bytes());
            let err = extractor.extract(&file).await.unwrap_err();
            assert!(matches!(err, ExtractionError::UnsupportedType(ref n) if n == name));
        }
        assert!(ocr.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_image_goes_through_ocr() {
        let ocr = Arc::new(FakeOcr::new("  Scanned caption \n\n"));
        let extractor = TextExtractor::new(ocr.clone());
        let bytes = png_bytes();
        let file = UploadedFile::new("Scan.PNG", bytes.clone());

        let text = extractor.extract(&file).await.unwrap();
        assert_eq!(text.as_str(), "Scanned caption");
        assert_eq!(*ocr.seen.lock().unwrap(), vec![bytes.len()]);
    }

    #[tokio::test]
    async fn test_corrupt_image_fails_before_ocr() {
        let ocr = Arc::new(FakeOcr::new("unused"));
        let extractor = TextExtractor::new(ocr.clone());
        let file = UploadedFile::new("broken.jpg", b"definitely not a jpeg".to_vec());

        let err = extractor.extract(&file).await.unwrap_err();
        assert!(matches!(err, ExtractionError::Image(_)));
        assert!(ocr.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_blank_ocr_result_is_no_text() {
        let extractor = TextExtractor::new(Arc::new(FakeOcr::new(" \n ")));
        let file = UploadedFile::new("empty.jpeg", png_bytes());
        let err = extractor.extract(&file).await.unwrap_err();
        assert!(matches!(err, ExtractionError::NoTextExtracted));
    }

    #[tokio::test]
    async fn test_pdf_extraction() {
        let extractor = TextExtractor::new(Arc::new(FakeOcr::new("")));
        let file = UploadedFile::new("deck.pdf", build_pdf(&["Page 1", "Page 2"]));
        let text = extractor.extract(&file).await.unwrap();
        let s = text.as_str();
        assert!(s.find("Page 1").unwrap() < s.find("Page 2").unwrap());
    }

    #[test]
    fn test_check_tools() {
        let tools = TextExtractor::check_tools();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].0, "tesseract");
    }
}
