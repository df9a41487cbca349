//! Extraction result and error types

use std::path::PathBuf;

use serde::{Serialize, Serializer};

use crate::ocr::{OcrEngineKind, OcrError};
use crate::text_layer::{TextBackendKind, TextLayer, TextLayerError};

/// The method that produced the returned text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionMethod {
    TextLayer(TextBackendKind),
    Ocr(OcrEngineKind),
}

impl ExtractionMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TextLayer(kind) => kind.as_str(),
            Self::Ocr(kind) => kind.as_str(),
        }
    }
}

impl std::fmt::Display for ExtractionMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ExtractionMethod {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Why the returned method was chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionReason {
    /// Text layer has Tamil text with no suspect glyphs
    ScriptTextClean,
    /// Text layer has no Tamil text and OCR was not requested
    NoScriptText,
    /// Tamil text carried suspect glyphs, OCR replaced it
    SuspectGlyphs,
    /// Caller asked for OCR
    OcrRequested,
    /// Text layer was empty, OCR filled in
    EmptyTextLayer,
    /// No text layer backend produced a result, OCR filled in
    TextLayerFailed,
    /// OCR was wanted but no engine produced a result
    OcrUnavailable,
}

/// Text extracted from a document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Extraction {
    pub text: String,
    pub pages: usize,
    pub method: ExtractionMethod,
    pub reason: SelectionReason,
}

impl Extraction {
    pub(crate) fn new(method: ExtractionMethod, layer: TextLayer, reason: SelectionReason) -> Self {
        Self {
            text: layer.text,
            pages: layer.pages,
            method,
            reason,
        }
    }
}

/// What this process can use right now
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Capabilities {
    pub mupdf: bool,
    pub pdf_extract: bool,
    pub rasterizer: bool,
    pub easyocr: bool,
    pub tesseract: bool,
}

impl Capabilities {
    /// OCR needs a rasterizer and at least one engine
    pub fn ocr_available(&self) -> bool {
        self.rasterizer && (self.easyocr || self.tesseract)
    }
}

/// Extraction error types
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("PDF file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("No extraction method available (needs mupdf, easyocr or tesseract)")]
    NoMethodAvailable,

    #[error(transparent)]
    TextLayer(#[from] TextLayerError),

    #[error("OCR failed: {0}")]
    Ocr(#[from] OcrError),

    #[error("Base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
