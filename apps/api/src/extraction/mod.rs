//! Text extraction for uploaded résumés and job descriptions.
//!
//! Supports `application/pdf` and `text/plain`. Anything else is reported as
//! unsupported rather than silently ignored.

use std::path::Path;
use std::time::Duration;

use bytes::Bytes;
use thiserror::Error;
use tracing::debug;

const PDF_MIME: &str = "application/pdf";
const TEXT_MIME: &str = "text/plain";
/// Browsers send this when they cannot classify a file.
const GENERIC_MIME: &str = "application/octet-stream";
const PDF_EXTRACTION_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Unsupported file type: {0}. Upload a PDF or TXT file.")]
    UnsupportedType(String),

    #[error("The uploaded file is empty")]
    EmptyFile,

    #[error("Could not read PDF: {0}")]
    Pdf(String),

    #[error("Text file is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    #[error("PDF extraction timed out after {secs}s")]
    Timeout { secs: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    PlainText,
}

impl DocumentKind {
    /// Parses a MIME type, ignoring parameters such as `; charset=utf-8`.
    pub fn from_mime(mime: &str) -> Option<Self> {
        let essence = mime.split(';').next().unwrap_or_default().trim();
        if essence.eq_ignore_ascii_case(PDF_MIME) {
            Some(Self::Pdf)
        } else if essence.eq_ignore_ascii_case(TEXT_MIME) {
            Some(Self::PlainText)
        } else {
            None
        }
    }

    pub fn mime(self) -> &'static str {
        match self {
            Self::Pdf => PDF_MIME,
            Self::PlainText => TEXT_MIME,
        }
    }
}

/// The content type to use for an upload: the declared type, or the one implied
/// by the `.pdf` / `.txt` extension when nothing useful was declared.
pub fn resolve_content_type(declared: Option<&str>, file_name: Option<&str>) -> String {
    let declared = declared
        .map(str::trim)
        .filter(|m| !m.is_empty() && !m.eq_ignore_ascii_case(GENERIC_MIME));

    if let Some(mime) = declared {
        return mime.to_string();
    }

    let extension = file_name
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("pdf") => PDF_MIME.to_string(),
        Some("txt") => TEXT_MIME.to_string(),
        _ => GENERIC_MIME.to_string(),
    }
}

/// Extracts UTF-8 text from `data` according to its declared MIME type.
///
/// PDF parsing is CPU-bound and runs on the blocking pool under a timeout.
pub async fn extract_text(data: Bytes, mime_type: &str) -> Result<String, ExtractionError> {
    let kind = DocumentKind::from_mime(mime_type)
        .ok_or_else(|| ExtractionError::UnsupportedType(mime_type.to_string()))?;

    if data.is_empty() {
        return Err(ExtractionError::EmptyFile);
    }

    let text = match kind {
        DocumentKind::PlainText => decode_text(&data)?,
        DocumentKind::Pdf => {
            let task = tokio::task::spawn_blocking(move || {
                pdf_extract::extract_text_from_mem(&data).map_err(|e| e.to_string())
            });
            match tokio::time::timeout(PDF_EXTRACTION_TIMEOUT, task).await {
                Err(_) => {
                    return Err(ExtractionError::Timeout {
                        secs: PDF_EXTRACTION_TIMEOUT.as_secs(),
                    })
                }
                Ok(Err(join_error)) => return Err(ExtractionError::Pdf(join_error.to_string())),
                Ok(Ok(result)) => result.map_err(ExtractionError::Pdf)?,
            }
        }
    };

    debug!("Extracted {} chars from {}", text.len(), kind.mime());
    Ok(text)
}

fn decode_text(data: &[u8]) -> Result<String, ExtractionError> {
    let text = String::from_utf8(data.to_vec())?;
    Ok(text
        .strip_prefix('\u{feff}')
        .map(str::to_string)
        .unwrap_or(text))
}
