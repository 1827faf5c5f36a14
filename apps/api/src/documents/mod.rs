//! Uploaded PDF / DOCX / TXT bytes → plain text.
//!
//! Thin adapters over `pdf-extract` and `zip` + `roxmltree`. No layout recovery:
//! the analysis pipeline only needs line-oriented text.

pub mod upload;

use std::io::{Cursor, Read};

use thiserror::Error;
use zip::ZipArchive;

/// Main body part inside a DOCX package.
const DOCX_BODY_PART: &str = "word/document.xml";

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Unsupported file type '{0}'. Allowed: pdf, docx, txt")]
    UnsupportedFormat(String),

    #[error("Could not read PDF: {0}")]
    Pdf(String),

    #[error("Could not read DOCX archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("Could not read DOCX content: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid DOCX XML: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("Document extraction aborted: {0}")]
    Aborted(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
    Txt,
}

impl DocumentFormat {
    /// Detects the format from a file name's extension (case-insensitive).
    pub fn from_filename(filename: &str) -> Result<Self, ExtractionError> {
        let extension = filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "pdf" => Ok(Self::Pdf),
            "docx" => Ok(Self::Docx),
            "txt" => Ok(Self::Txt),
            _ => Err(ExtractionError::UnsupportedFormat(filename.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Docx => "docx",
            Self::Txt => "txt",
        }
    }
}

/// Extracts plain text synchronously. PDF parsing is CPU-heavy; call
/// [`extract_text_blocking`] from async code.
pub fn extract_text(bytes: &[u8], format: DocumentFormat) -> Result<String, ExtractionError> {
    let text = match format {
        DocumentFormat::Pdf => pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| ExtractionError::Pdf(e.to_string()))?,
        DocumentFormat::Docx => docx_text(bytes)?,
        DocumentFormat::Txt => String::from_utf8_lossy(bytes).into_owned(),
    };

    tracing::debug!(format = format.as_str(), chars = text.len(), "Document text extracted");
    Ok(text)
}

/// Runs [`extract_text`] on the blocking pool. A panic inside the PDF parser
/// surfaces as `ExtractionError::Aborted` instead of taking down the worker.
pub async fn extract_text_blocking(
    bytes: Vec<u8>,
    format: DocumentFormat,
) -> Result<String, ExtractionError> {
    tokio::task::spawn_blocking(move || extract_text(&bytes, format))
        .await
        .map_err(|e| ExtractionError::Aborted(e.to_string()))?
}

// ────────────────────────────────────────────────────────────────────────────
// DOCX
// ────────────────────────────────────────────────────────────────────────────

/// One line per `w:p` paragraph; `w:tab` and `w:br` become whitespace.
fn docx_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    let mut xml = String::new();
    archive.by_name(DOCX_BODY_PART)?.read_to_string(&mut xml)?;

    let doc = roxmltree::Document::parse(&xml)?;
    let mut paragraphs = Vec::new();

    for paragraph in doc
        .descendants()
        .filter(|n| n.is_element() && n.tag_name().name() == "p")
    {
        let mut line = String::new();
        for node in paragraph.descendants().filter(|n| n.is_element()) {
            match node.tag_name().name() {
                "t" => line.push_str(node.text().unwrap_or_default()),
                "tab" => line.push('\t'),
                "br" | "cr" => line.push('\n'),
                _ => {}
            }
        }
        paragraphs.push(line);
    }

    Ok(paragraphs.join("\n"))
}
