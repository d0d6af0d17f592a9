//! Uploaded files and the text extracted from them.

use std::fmt;

use bytes::Bytes;

/// Raster formats accepted for OCR.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Png,
    Jpeg,
}

/// File type inferred from the declared filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Text,
    Pdf,
    Image(ImageKind),
}

impl FileKind {
    /// Suffixes accepted by the service, lowercase.
    pub const ALLOWED_EXTENSIONS: [&'static str; 5] = [".txt", ".pdf", ".png", ".jpg", ".jpeg"];

    /// Infer the kind from a filename suffix, ignoring case.
    pub fn from_filename(filename: &str) -> Option<Self> {
        let lower = filename.to_lowercase();
        let ext = Self::ALLOWED_EXTENSIONS
            .iter()
            .find(|ext| lower.ends_with(*ext))?;

        match *ext {
            ".txt" => Some(Self::Text),
            ".pdf" => Some(Self::Pdf),
            ".png" => Some(Self::Image(ImageKind::Png)),
            ".jpg" | ".jpeg" => Some(Self::Image(ImageKind::Jpeg)),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Pdf => "pdf",
            Self::Image(ImageKind::Png) => "png",
            Self::Image(ImageKind::Jpeg) => "jpeg",
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A file received from a client. Consumed once by the extractor.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Declared filename; only used to infer the type.
    pub filename: String,
    /// Raw content.
    pub bytes: Bytes,
}

impl UploadedFile {
    pub fn new(filename: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            filename: filename.into(),
            bytes: bytes.into(),
        }
    }

    /// Type inferred from the filename, `None` when the suffix is not allowed.
    pub fn kind(&self) -> Option<FileKind> {
        FileKind::from_filename(&self.filename)
    }
}

/// Trimmed, non-empty text pulled out of an upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText(String);

impl ExtractedText {
    /// Trim `raw`; `None` when nothing but whitespace remains.
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ExtractedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ExtractedText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
