//! OCR Types
//!
//! Defines types for OCR processing of rasterized PDF pages.

use serde::{Deserialize, Serialize};

/// OCR engine type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OcrEngineKind {
    /// EasyOCR (neural, via Python)
    EasyOcr,
    /// Tesseract OCR (local binary)
    Tesseract,
}

impl OcrEngineKind {
    /// Method name reported to clients
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EasyOcr => "easyocr",
            Self::Tesseract => "tesseract-ocr",
        }
    }
}

impl std::fmt::Display for OcrEngineKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A piece of recognized text with the engine's confidence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognizedSpan {
    pub text: String,
    /// Normalized to 0.0..=1.0
    pub confidence: f32,
}

impl RecognizedSpan {
    pub fn new(text: impl Into<String>, confidence: f32) -> Self {
        Self {
            text: text.into(),
            confidence,
        }
    }
}

/// OCR error types
#[derive(Debug, thiserror::Error)]
pub enum OcrError {
    #[error("OCR engine not available: {0}")]
    EngineNotAvailable(String),

    #[error("No OCR engines available")]
    NoEngineAvailable,

    #[error("No page rasterizer available")]
    RasterizerUnavailable,

    #[error("Failed to rasterize page: {0}")]
    RasterError(String),

    #[error("OCR processing failed: {0}")]
    ProcessingError(String),

    #[error("Unexpected engine output: {0}")]
    InvalidOutput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl OcrError {
    /// True when the failure means OCR cannot run at all
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            Self::NoEngineAvailable | Self::RasterizerUnavailable | Self::EngineNotAvailable(_)
        )
    }
}
