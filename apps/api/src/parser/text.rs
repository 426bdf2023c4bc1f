//! Document bytes to plain text.
//!
//! PDFs go through `pdf-extract` (page text concatenated in page order);
//! plain-text uploads are decoded as UTF-8. `AutoTextExtractor` picks one by
//! sniffing the `%PDF-` magic bytes.

use std::path::Path;

use thiserror::Error;
use tracing::debug;

pub const MIME_PDF: &str = "application/pdf";
pub const MIME_TEXT: &str = "text/plain";
pub const MIME_OCTET_STREAM: &str = "application/octet-stream";

const PDF_MAGIC: &[u8] = b"%PDF-";
const UTF8_BOM: &str = "\u{feff}";

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    #[error("document is not valid UTF-8 text: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("unsupported document type: {0}")]
    UnsupportedType(String),
}

pub trait TextExtractor: Send + Sync {
    fn extract_text(&self, bytes: &[u8]) -> Result<String, ExtractError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextExtractor;

impl TextExtractor for PdfTextExtractor {
    fn extract_text(&self, bytes: &[u8]) -> Result<String, ExtractError> {
        // pdf-extract can panic on malformed input
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem(bytes)
        }));
        match result {
            Ok(Ok(text)) => {
                debug!("PDF extracted: {} chars", text.len());
                Ok(text)
            }
            Ok(Err(e)) => Err(ExtractError::Pdf(e.to_string())),
            Err(_) => Err(ExtractError::Pdf("extractor panicked (malformed PDF)".to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract_text(&self, bytes: &[u8]) -> Result<String, ExtractError> {
        let text = std::str::from_utf8(bytes)?;
        Ok(text.strip_prefix(UTF8_BOM).unwrap_or(text).to_string())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AutoTextExtractor;

impl TextExtractor for AutoTextExtractor {
    fn extract_text(&self, bytes: &[u8]) -> Result<String, ExtractError> {
        if bytes.starts_with(PDF_MAGIC) {
            return PdfTextExtractor.extract_text(bytes);
        }
        PlainTextExtractor.extract_text(bytes).map_err(|_| {
            ExtractError::UnsupportedType("neither a PDF nor UTF-8 text".to_string())
        })
    }
}

/// The declared type of an uploaded document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    PlainText,
    /// Undeclared; decided from the bytes.
    Unknown,
}

impl DocumentKind {
    /// Routes by MIME type first, then by file extension.
    pub fn detect(file_name: Option<&str>, content_type: Option<&str>) -> Result<Self, ExtractError> {
        let mime = content_type
            .map(|ct| ct.split(';').next().unwrap_or(ct).trim().to_lowercase())
            .filter(|ct| !ct.is_empty());

        match mime.as_deref() {
            Some(MIME_PDF) => return Ok(DocumentKind::Pdf),
            Some(mime) if mime.starts_with("text/") => return Ok(DocumentKind::PlainText),
            Some(MIME_OCTET_STREAM) | None => {}
            Some(other) => return Err(ExtractError::UnsupportedType(other.to_string())),
        }

        let extension = file_name
            .and_then(|name| Path::new(name).extension())
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase);

        match extension.as_deref() {
            Some("pdf") => Ok(DocumentKind::Pdf),
            Some("txt") | Some("text") | Some("md") => Ok(DocumentKind::PlainText),
            None => Ok(DocumentKind::Unknown),
            Some(other) => Err(ExtractError::UnsupportedType(format!(".{other}"))),
        }
    }

    pub fn extractor(self) -> &'static dyn TextExtractor {
        match self {
            DocumentKind::Pdf => &PdfTextExtractor,
            DocumentKind::PlainText => &PlainTextExtractor,
            DocumentKind::Unknown => &AutoTextExtractor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_strips_bom() {
        let text = PlainTextExtractor
            .extract_text("\u{feff}Jane Doe".as_bytes())
            .unwrap();
        assert_eq!(text, "Jane Doe");
    }

    #[test]
    fn test_plain_text_rejects_invalid_utf8() {
        let err = PlainTextExtractor.extract_text(&[0xff, 0xfe, 0x00]).unwrap_err();
        assert!(matches!(err, ExtractError::Utf8(_)));
    }

    #[test]
    fn test_auto_falls_back_to_text() {
        let text = AutoTextExtractor.extract_text(b"Jane Doe\nEXPERIENCE").unwrap();
        assert_eq!(text, "Jane Doe\nEXPERIENCE");
    }

    #[test]
    fn test_auto_rejects_binary() {
        let err = AutoTextExtractor.extract_text(&[0x50, 0x4b, 0x03, 0xff]).unwrap_err();
        assert!(matches!(err, ExtractError::UnsupportedType(_)));
    }

    #[test]
    fn test_malformed_pdf_is_an_error() {
        let err = AutoTextExtractor.extract_text(b"%PDF-1.7 garbage").unwrap_err();
        assert!(matches!(err, ExtractError::Pdf(_)));
    }

    #[test]
    fn test_detect_by_mime() {
        assert_eq!(
            DocumentKind::detect(Some("cv.bin"), Some("application/pdf")).unwrap(),
            DocumentKind::Pdf
        );
        assert_eq!(
            DocumentKind::detect(None, Some("text/plain; charset=utf-8")).unwrap(),
            DocumentKind::PlainText
        );
    }

    #[test]
    fn test_detect_by_extension() {
        assert_eq!(
            DocumentKind::detect(Some("Jane_CV.PDF"), Some("application/octet-stream")).unwrap(),
            DocumentKind::Pdf
        );
        assert_eq!(
            DocumentKind::detect(Some("notes.txt"), None).unwrap(),
            DocumentKind::PlainText
        );
        assert_eq!(DocumentKind::detect(Some("resume"), None).unwrap(), DocumentKind::Unknown);
    }

    #[test]
    fn test_detect_rejects_unsupported() {
        assert!(DocumentKind::detect(Some("cv.docx"), None).is_err());
        assert!(DocumentKind::detect(Some("cv.pdf"), Some("image/png")).is_err());
    }
}
