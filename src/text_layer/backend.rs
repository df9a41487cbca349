//! Text layer backends
//!
//! Defines the backend trait and the default backend order.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;

use super::pdf_extract_backend::PdfExtractBackend;
use super::types::{TextBackendKind, TextLayer, TextLayerError};

/// Text layer backend trait
#[async_trait]
pub trait TextLayerBackend: Send + Sync {
    /// Get the backend type
    fn kind(&self) -> TextBackendKind;

    /// Check if the backend can be used
    async fn is_available(&self) -> bool;

    /// Extract the embedded text of every page
    async fn extract(&self, path: &Path) -> Result<TextLayer, TextLayerError>;
}

/// Backends in preference order: MuPDF first when compiled in
pub fn default_backends() -> Vec<Arc<dyn TextLayerBackend>> {
    let mut backends: Vec<Arc<dyn TextLayerBackend>> = Vec::new();

    #[cfg(feature = "mupdf")]
    backends.push(Arc::new(super::mupdf_backend::MupdfBackend));

    backends.push(Arc::new(PdfExtractBackend));
    backends
}

/// Mock backend for testing
#[cfg(test)]
pub struct MockTextBackend {
    pub kind: TextBackendKind,
    pub available: bool,
    pub response: Result<TextLayer, String>,
    pub calls: std::sync::atomic::AtomicUsize,
}

#[cfg(test)]
impl MockTextBackend {
    pub fn returning(kind: TextBackendKind, text: &str, pages: usize) -> Self {
        Self {
            kind,
            available: true,
            response: Ok(TextLayer {
                text: text.to_string(),
                pages,
            }),
            calls: Default::default(),
        }
    }

    pub fn failing(kind: TextBackendKind, message: &str) -> Self {
        Self {
            kind,
            available: true,
            response: Err(message.to_string()),
            calls: Default::default(),
        }
    }

    pub fn unavailable(kind: TextBackendKind) -> Self {
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
impl TextLayerBackend for MockTextBackend {
    fn kind(&self) -> TextBackendKind {
        self.kind
    }

    async fn is_available(&self) -> bool {
        self.available
    }

    async fn extract(&self, _path: &Path) -> Result<TextLayer, TextLayerError> {
        self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        self.response.clone().map_err(|message| TextLayerError::Library {
            backend: self.kind,
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_backend_order() {
        let kinds: Vec<_> = default_backends().iter().map(|b| b.kind()).collect();

        #[cfg(feature = "mupdf")]
        assert_eq!(kinds, vec![TextBackendKind::Mupdf, TextBackendKind::PdfExtract]);

        #[cfg(not(feature = "mupdf"))]
        assert_eq!(kinds, vec![TextBackendKind::PdfExtract]);
    }

    #[tokio::test]
    async fn test_default_backends_available() {
        for backend in default_backends() {
            assert!(backend.is_available().await, "{} should be available", backend.kind());
        }
    }
}
