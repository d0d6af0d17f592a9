//! Tesseract OCR backend implementation.
//!
//! Image bytes are piped to `tesseract stdin stdout`, so nothing is written
//! to disk.

use std::io::Write;
use std::process::{Command, Stdio};
use std::time::Instant;

use tracing::debug;

use super::backend::{check_binary, OcrBackend, OcrBackendType, OcrConfig, OcrError, OcrResult};

/// Tesseract OCR backend.
pub struct TesseractBackend {
    config: OcrConfig,
}

impl TesseractBackend {
    /// Create a new Tesseract backend with default configuration.
    pub fn new() -> Self {
        Self {
            config: OcrConfig::default(),
        }
    }

    /// Create a new Tesseract backend with custom configuration.
    pub fn with_config(config: OcrConfig) -> Self {
        Self { config }
    }

    pub fn language(&self) -> &str {
        &self.config.language
    }

    /// Run Tesseract on an in-memory image.
    fn run_tesseract(&self, image: &[u8]) -> Result<String, OcrError> {
        let spawned = Command::new("tesseract")
            .arg("stdin")
            .arg("stdout")
            .args(["-l", &self.config.language])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn();

        let mut child = match spawned {
            Ok(child) => child,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(OcrError::BackendNotAvailable(
                    "tesseract not found (install tesseract-ocr)".to_string(),
                ));
            }
            Err(e) => return Err(OcrError::Io(e)),
        };

        // Feed stdin from another thread so a chatty stdout can't deadlock us.
        let writer = child.stdin.take().map(|mut stdin| {
            let data = image.to_vec();
            std::thread::spawn(move || stdin.write_all(&data))
        });

        let output = child.wait_with_output()?;
        let write_result = match writer {
            Some(handle) => handle
                .join()
                .map_err(|_| OcrError::OcrFailed("stdin writer panicked".to_string()))?,
            None => Ok(()),
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(OcrError::OcrFailed(format!("tesseract failed: {}", stderr.trim())));
        }
        write_result?;

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

impl Default for TesseractBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl OcrBackend for TesseractBackend {
    fn backend_type(&self) -> OcrBackendType {
        OcrBackendType::Tesseract
    }

    fn is_available(&self) -> bool {
        check_binary("tesseract")
    }

    fn availability_hint(&self) -> String {
        if !check_binary("tesseract") {
            "Tesseract not installed. Install with: apt install tesseract-ocr".to_string()
        } else {
            format!("Tesseract is available (language: {})", self.config.language)
        }
    }

    fn ocr_image(&self, image: &[u8]) -> Result<OcrResult, OcrError> {
        let start = Instant::now();
        let text = self.run_tesseract(image)?;
        let elapsed = start.elapsed();
        debug!(bytes = image.len(), chars = text.len(), "tesseract finished");

        Ok(OcrResult {
            text,
            backend: OcrBackendType::Tesseract,
            processing_time_ms: elapsed.as_millis() as u64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_from_config() {
        let backend = TesseractBackend::with_config(OcrConfig {
            language: "deu".to_string(),
        });
        assert_eq!(backend.language(), "deu");
        assert_eq!(TesseractBackend::new().language(), "eng");
        assert_eq!(backend.backend_type(), OcrBackendType::Tesseract);
    }

    #[test]
    fn test_availability_hint_is_informative() {
        let backend = TesseractBackend::new();
        let hint = backend.availability_hint();
        assert!(hint.contains("Tesseract") || hint.contains("tesseract"));
    }
}
