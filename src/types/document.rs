//! Document formats and the in-memory upload representation

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Supported document formats, detected by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Pdf,
    Docx,
    Txt,
    Markdown,
}

impl DocumentFormat {
    /// Detect the format from a filename, `None` for unsupported extensions
    pub fn from_filename(filename: &str) -> Option<Self> {
        let ext = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())?
            .to_lowercase();
        Self::from_extension(&ext)
    }

    /// Detect the format from a bare extension (without the dot)
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            "txt" => Some(Self::Txt),
            "md" => Some(Self::Markdown),
            _ => None,
        }
    }

    /// Canonical extension for the format
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Docx => "docx",
            Self::Txt => "txt",
            Self::Markdown => "md",
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// An uploaded document with its bytes copied into an owned buffer
///
/// The HTTP layer materializes uploads into this shape before handing them to
/// the background worker, so the ingestion pipeline never touches request
/// state.
#[derive(Debug, Clone)]
pub struct RawDocument {
    /// Original filename as supplied by the uploader
    pub filename: String,
    /// Raw byte payload
    pub data: Vec<u8>,
}

impl RawDocument {
    pub fn new(filename: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            data,
        }
    }

    /// Detected format, `None` when the extension is unsupported
    pub fn format(&self) -> Option<DocumentFormat> {
        DocumentFormat::from_filename(&self.filename)
    }
}
