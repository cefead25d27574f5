//! Plain-text extraction for supported document formats

use std::path::Path;

use crate::error::{Error, Result};
use crate::types::DocumentFormat;

/// Multi-format text extractor
///
/// Stateless: reads the input bytes, produces plain text, touches nothing
/// else.
pub struct TextExtractor;

impl TextExtractor {
    /// Extract plain text from the file at `path`, parsed as `format`
    pub fn extract(path: &Path, format: DocumentFormat) -> Result<String> {
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("<unnamed>")
            .to_string();

        let data = std::fs::read(path)
            .map_err(|e| Error::extraction(&filename, format!("read failed: {}", e)))?;

        Self::extract_bytes(&filename, &data, format)
    }

    /// Extract plain text from in-memory bytes
    pub fn extract_bytes(filename: &str, data: &[u8], format: DocumentFormat) -> Result<String> {
        match format {
            DocumentFormat::Pdf => Self::extract_pdf(filename, data),
            DocumentFormat::Docx => Self::extract_docx(filename, data),
            DocumentFormat::Txt | DocumentFormat::Markdown => Ok(Self::extract_text(data)),
        }
    }

    /// PDF: per-page text concatenated in page order
    ///
    /// Pages that yield no text contribute an empty string, keeping page
    /// order intact for the rest of the document.
    fn extract_pdf(filename: &str, data: &[u8]) -> Result<String> {
        let pages = pdf_extract::extract_text_from_mem_by_pages(data)
            .map_err(|e| Error::extraction(filename, e.to_string()))?;

        // Reject PDFs that parse but carry no page content at all
        if pages.is_empty() {
            let page_count = lopdf::Document::load_mem(data)
                .map(|doc| doc.get_pages().len())
                .unwrap_or(0);
            if page_count == 0 {
                return Err(Error::extraction(filename, "PDF has no pages"));
            }
        }

        Ok(pages.join("\n"))
    }

    /// DOCX: paragraph texts in document order, newline separated
    fn extract_docx(filename: &str, data: &[u8]) -> Result<String> {
        let docx =
            docx_rs::read_docx(data).map_err(|e| Error::extraction(filename, e.to_string()))?;

        let mut paragraphs = Vec::new();
        for child in docx.document.children {
            if let docx_rs::DocumentChild::Paragraph(p) = child {
                let mut paragraph = String::new();
                for child in p.children {
                    if let docx_rs::ParagraphChild::Run(run) = child {
                        for child in run.children {
                            if let docx_rs::RunChild::Text(t) = child {
                                paragraph.push_str(&t.text);
                            }
                        }
                    }
                }
                paragraphs.push(paragraph);
            }
        }

        Ok(paragraphs.join("\n"))
    }

    /// Plain text / markdown: UTF-8 with lossy replacement, never fails
    fn extract_text(data: &[u8]) -> String {
        String::from_utf8_lossy(data).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_reads_utf8() {
        let text = TextExtractor::extract_bytes("notes.txt", "héllo wörld".as_bytes(), DocumentFormat::Txt)
            .unwrap();
        assert_eq!(text, "héllo wörld");
    }

    #[test]
    fn test_plain_text_replaces_invalid_bytes() {
        let bytes = b"good\xff\xfebad";
        let text =
            TextExtractor::extract_bytes("notes.txt", bytes, DocumentFormat::Txt).unwrap();
        assert!(text.starts_with("good"));
        assert!(text.ends_with("bad"));
        assert!(text.contains('\u{FFFD}'));
    }

    #[test]
    fn test_markdown_uses_text_path() {
        let text = TextExtractor::extract_bytes("readme.md", b"# Title\nbody", DocumentFormat::Markdown)
            .unwrap();
        assert_eq!(text, "# Title\nbody");
    }

    #[test]
    fn test_garbage_pdf_is_an_extraction_error() {
        let err = TextExtractor::extract_bytes("broken.pdf", b"not a pdf", DocumentFormat::Pdf)
            .unwrap_err();
        match err {
            Error::Extraction { filename, .. } => assert_eq!(filename, "broken.pdf"),
            other => panic!("expected Extraction, got {:?}", other),
        }
    }

    #[test]
    fn test_garbage_docx_is_an_extraction_error() {
        let err = TextExtractor::extract_bytes("broken.docx", b"not a docx", DocumentFormat::Docx)
            .unwrap_err();
        assert!(matches!(err, Error::Extraction { .. }));
    }

    #[test]
    fn test_extract_from_path_reports_missing_file() {
        let err = TextExtractor::extract(Path::new("/nonexistent/file.txt"), DocumentFormat::Txt)
            .unwrap_err();
        assert!(matches!(err, Error::Extraction { .. }));
    }
}
