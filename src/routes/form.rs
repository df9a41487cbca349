//! Multipart form handling
//!
//! Collects an upload form into memory: file fields keep their bytes and
//! metadata, plain fields are read as text.

use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::Multipart;

use crate::error::{AppError, Result};

/// A file field from a multipart upload
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Bytes,
}

impl UploadedFile {
    /// True if the client labelled the file as a PDF
    pub fn is_pdf(&self) -> bool {
        self.content_type
            .as_deref()
            .and_then(|ct| ct.split(';').next())
            .map(|essence| essence.trim().eq_ignore_ascii_case("application/pdf"))
            .unwrap_or(false)
    }

    /// Reject anything that is not labelled as a PDF
    pub fn ensure_pdf(&self, message: &str) -> Result<()> {
        if self.is_pdf() {
            Ok(())
        } else {
            Err(AppError::BadRequest(message.to_string()))
        }
    }
}

/// A fully read multipart form
#[derive(Debug, Default)]
pub struct UploadForm {
    files: HashMap<String, UploadedFile>,
    fields: HashMap<String, String>,
}

impl UploadForm {
    /// Read every field of the multipart body
    pub async fn read(mut multipart: Multipart) -> Result<Self> {
        let mut form = UploadForm::default();

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or("").to_string();

            if field.file_name().is_some() {
                let file_name = field.file_name().map(|s| s.to_string());
                let content_type = field.content_type().map(|s| s.to_string());
                let data = field.bytes().await?;

                tracing::debug!(
                    "Received file field '{}': {:?} ({:?}, {} bytes)",
                    name,
                    file_name,
                    content_type,
                    data.len()
                );

                form.files.insert(
                    name,
                    UploadedFile {
                        file_name,
                        content_type,
                        data,
                    },
                );
            } else {
                let value = field.text().await?;
                form.fields.insert(name, value);
            }
        }

        Ok(form)
    }

    /// Remove and return the file uploaded under `name`
    pub fn take_file(&mut self, name: &str) -> Option<UploadedFile> {
        self.files.remove(name)
    }

    /// Read a boolean form field, falling back to `default` when absent
    pub fn flag(&self, name: &str, default: bool) -> Result<bool> {
        match self.fields.get(name) {
            None => Ok(default),
            Some(raw) => parse_form_bool(raw).ok_or_else(|| {
                AppError::BadRequest(format!("Invalid boolean for '{}': {}", name, raw))
            }),
        }
    }
}

/// Parse the boolean spellings HTML forms and HTTP clients send
pub fn parse_form_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
