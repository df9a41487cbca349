//! OCR Engines
//!
//! Defines the engine trait shared by the EasyOCR and Tesseract backends.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::process::Command;

use super::types::{OcrEngineKind, OcrError, RecognizedSpan};

/// OCR engine trait
#[async_trait]
pub trait OcrEngine: Send + Sync {
    /// Get the engine type
    fn kind(&self) -> OcrEngineKind;

    /// Check if the engine is installed and usable
    async fn is_available(&self) -> bool;

    /// Recognize every page image, returning one span list per page in order
    async fn recognize(&self, pages: &[PathBuf]) -> Result<Vec<Vec<RecognizedSpan>>, OcrError>;
}

/// Command for an engine process, killed if the recognition future is dropped
pub(crate) fn engine_command(program: &str) -> Command {
    let mut command = Command::new(program);
    command.kill_on_drop(true);
    command
}

/// Mock engine for testing
#[cfg(test)]
pub struct MockEngine {
    pub kind: OcrEngineKind,
    pub available: bool,
    /// Spans returned for every page, or an error message
    pub response: Result<Vec<RecognizedSpan>, String>,
    pub calls: std::sync::atomic::AtomicUsize,
}

#[cfg(test)]
impl MockEngine {
    pub fn returning(kind: OcrEngineKind, spans: Vec<RecognizedSpan>) -> Self {
        Self {
            kind,
            available: true,
            response: Ok(spans),
            calls: Default::default(),
        }
    }

    pub fn failing(kind: OcrEngineKind, message: &str) -> Self {
        Self {
            kind,
            available: true,
            response: Err(message.to_string()),
            calls: Default::default(),
        }
    }

    pub fn unavailable(kind: OcrEngineKind) -> Self {
        Self {
            available: false,
            ..Self::failing(kind, "unavailable")
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(std::sync::atomic::Ordering::SeqCst)
    }
}

#[cfg(test)]
#[async_trait]
impl OcrEngine for MockEngine {
    fn kind(&self) -> OcrEngineKind {
        self.kind
    }

    async fn is_available(&self) -> bool {
        self.available
    }

    async fn recognize(&self, pages: &[PathBuf]) -> Result<Vec<Vec<RecognizedSpan>>, OcrError> {
        self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        match &self.response {
            Ok(spans) => Ok(pages.iter().map(|_| spans.clone()).collect()),
            Err(message) => Err(OcrError::ProcessingError(message.clone())),
        }
    }
}
