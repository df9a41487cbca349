//! Extraction endpoints
//!
//! - POST /extract - Extract text from one uploaded PDF
//! - POST /extract-batch - Extract a question paper and its answer key
//! - POST /extract-base64 - Extract a base64-encoded PDF sent as JSON

use axum::{
    extract::{Multipart, State},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::extract::{decode_base64, ExtractError, Extraction, ExtractionMethod, SelectionReason};
use crate::state::AppState;

use super::form::{UploadForm, UploadedFile};

/// Create the extraction router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/extract", post(extract_pdf))
        .route("/extract-batch", post(extract_batch))
        .route("/extract-base64", post(extract_base64))
}

/// Single-document extraction response
#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub success: bool,
    pub method: ExtractionMethod,
    pub pages: usize,
    pub file_name: Option<String>,
    pub file_size: usize,
    pub reason: SelectionReason,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl ExtractResponse {
    fn new(
        extraction: Extraction,
        file_name: Option<String>,
        file_size: usize,
        return_text: bool,
    ) -> Self {
        Self {
            success: true,
            method: extraction.method,
            pages: extraction.pages,
            file_name,
            file_size,
            reason: extraction.reason,
            text: return_text.then_some(extraction.text),
        }
    }
}

/// POST /extract
///
/// Form fields: `file` (PDF), `return_text` (default true), `use_ocr`
/// (default false).
async fn extract_pdf(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ExtractResponse>> {
    let mut form = UploadForm::read(multipart).await?;

    let upload = form.take_file("file").ok_or_else(|| {
        AppError::BadRequest("No file provided. Use field name 'file'".to_string())
    })?;
    upload.ensure_pdf("File must be a PDF")?;

    let return_text = form.flag("return_text", true)?;
    let use_ocr = form.flag("use_ocr", false)?;

    let extraction = state.extractor().extract_bytes(&upload.data, use_ocr).await?;

    tracing::info!(
        file_name = ?upload.file_name,
        method = %extraction.method,
        reason = ?extraction.reason,
        pages = extraction.pages,
        "Extracted uploaded PDF"
    );

    Ok(Json(ExtractResponse::new(
        extraction,
        upload.file_name,
        upload.data.len(),
        return_text,
    )))
}

/// Per-file result inside a batch response
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum BatchItem {
    Extracted {
        success: bool,
        text: String,
        method: ExtractionMethod,
        pages: usize,
        reason: SelectionReason,
        file_name: Option<String>,
    },
    Failed {
        success: bool,
        error: String,
    },
}

impl BatchItem {
    fn from_result(
        result: std::result::Result<Extraction, ExtractError>,
        file_name: Option<String>,
    ) -> Self {
        match result {
            Ok(extraction) => BatchItem::Extracted {
                success: true,
                text: extraction.text,
                method: extraction.method,
                pages: extraction.pages,
                reason: extraction.reason,
                file_name,
            },
            Err(e) => {
                tracing::warn!("Batch item {:?} failed: {}", file_name, e);
                BatchItem::Failed {
                    success: false,
                    error: e.to_string(),
                }
            }
        }
    }
}

/// Batch extraction response
#[derive(Debug, Serialize)]
pub struct BatchResponse {
    pub question: BatchItem,
    pub answer: BatchItem,
}

/// POST /extract-batch
///
/// Form fields: `question_pdf`, `answer_pdf`, `use_ocr` (default false).
/// A failure on one document is reported in its entry and does not fail
/// the request.
async fn extract_batch(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<BatchResponse>> {
    let mut form = UploadForm::read(multipart).await?;

    let question = required_pdf(&mut form, "question_pdf", "Question")?;
    let answer = required_pdf(&mut form, "answer_pdf", "Answer")?;
    let use_ocr = form.flag("use_ocr", false)?;

    let extractor = state.extractor();
    let question_result = extractor.extract_bytes(&question.data, use_ocr).await;
    let answer_result = extractor.extract_bytes(&answer.data, use_ocr).await;

    Ok(Json(BatchResponse {
        question: BatchItem::from_result(question_result, question.file_name),
        answer: BatchItem::from_result(answer_result, answer.file_name),
    }))
}

fn required_pdf(form: &mut UploadForm, field: &str, label: &str) -> Result<UploadedFile> {
    let upload = form
        .take_file(field)
        .ok_or_else(|| AppError::BadRequest(format!("{} file is required ('{}')", label, field)))?;
    upload.ensure_pdf(&format!("{} file must be a PDF", label))?;
    Ok(upload)
}

/// Base64 extraction request
#[derive(Debug, Deserialize)]
pub struct Base64Request {
    /// Standard base64 PDF bytes
    pub data: String,
    #[serde(default)]
    pub use_ocr: bool,
    #[serde(default = "default_true")]
    pub return_text: bool,
    #[serde(default)]
    pub file_name: Option<String>,
}

fn default_true() -> bool {
    true
}

/// POST /extract-base64
async fn extract_base64(
    State(state): State<AppState>,
    Json(request): Json<Base64Request>,
) -> Result<Json<ExtractResponse>> {
    let data = decode_base64(&request.data)?;
    let extraction = state.extractor().extract_bytes(&data, request.use_ocr).await?;

    Ok(Json(ExtractResponse::new(
        extraction,
        request.file_name,
        data.len(),
        request.return_text,
    )))
}
