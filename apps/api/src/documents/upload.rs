//! Multipart form reading for résumé uploads.

use std::collections::HashMap;

use axum::extract::multipart::{Multipart, MultipartError};
use axum::http::StatusCode;

use crate::documents::{extract_text_blocking, DocumentFormat};
use crate::errors::AppError;
use crate::validation::validate_upload_size;

/// Form field carrying the résumé file.
pub const RESUME_FIELD: &str = "resume";

#[derive(Debug)]
pub struct UploadedFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// A drained multipart form: the résumé file (if sent) plus every text field.
#[derive(Debug, Default)]
pub struct UploadForm {
    pub resume: Option<UploadedFile>,
    pub fields: HashMap<String, String>,
}

impl UploadForm {
    /// Trimmed, non-empty text field value.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    pub fn require_resume(&self) -> Result<&UploadedFile, AppError> {
        self.resume.as_ref().ok_or_else(|| {
            AppError::Validation(format!("No '{RESUME_FIELD}' file was uploaded"))
        })
    }
}

pub async fn read_upload_form(mut multipart: Multipart) -> Result<UploadForm, AppError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();

        if name == RESUME_FIELD {
            let filename = field.file_name().unwrap_or_default().trim().to_string();
            let bytes = field.bytes().await.map_err(multipart_error)?;
            tracing::debug!(filename = %filename, bytes = bytes.len(), "Received resume upload");
            form.resume = Some(UploadedFile {
                filename,
                bytes: bytes.to_vec(),
            });
        } else {
            let value = field.text().await.map_err(multipart_error)?;
            form.fields.insert(name, value);
        }
    }

    Ok(form)
}

/// Checks name, size and format, then extracts the file's text off the async runtime.
pub async fn extract_upload_text(file: &UploadedFile, max_bytes: usize) -> Result<String, AppError> {
    if file.filename.is_empty() {
        return Err(AppError::Validation("No file selected".to_string()));
    }
    let format = DocumentFormat::from_filename(&file.filename)?;
    validate_upload_size(file.bytes.len(), max_bytes)?;

    let text = extract_text_blocking(file.bytes.clone(), format).await?;
    if text.trim().is_empty() {
        return Err(AppError::UnprocessableEntity(
            "Could not extract text from the uploaded file".to_string(),
        ));
    }
    Ok(text)
}

fn multipart_error(err: MultipartError) -> AppError {
    tracing::warn!("Failed to read multipart form: {err}");
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(err.body_text())
    } else {
        AppError::Validation(format!("Malformed upload: {}", err.body_text()))
    }
}
