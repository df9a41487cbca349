//! pdf-extract backend
//!
//! `pdf_extract` can panic on malformed input instead of returning an
//! error, so every call goes through `catch_unwind`.

use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use async_trait::async_trait;

use super::backend::TextLayerBackend;
use super::types::{TextBackendKind, TextLayer, TextLayerError};

/// Pure Rust text layer backend
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfExtractBackend;

#[async_trait]
impl TextLayerBackend for PdfExtractBackend {
    fn kind(&self) -> TextBackendKind {
        TextBackendKind::PdfExtract
    }

    async fn is_available(&self) -> bool {
        true
    }

    async fn extract(&self, path: &Path) -> Result<TextLayer, TextLayerError> {
        let data = tokio::fs::read(path).await?;

        tokio::task::spawn_blocking(move || extract_pages(&data))
            .await
            .map_err(|e| TextLayerError::Join(e.to_string()))?
    }
}

/// Extract every page of an in-memory PDF
pub(crate) fn extract_pages(data: &[u8]) -> Result<TextLayer, TextLayerError> {
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem_by_pages(data)
    }));

    match result {
        Ok(Ok(pages)) => {
            let count = pages.len();
            Ok(TextLayer::from_pages(pages, count))
        }
        Ok(Err(e)) => Err(TextLayerError::Library {
            backend: TextBackendKind::PdfExtract,
            message: e.to_string(),
        }),
        Err(_) => Err(TextLayerError::Library {
            backend: TextBackendKind::PdfExtract,
            message: "extraction panicked (malformed document)".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text_layer::test_pdf::{pdf_with_pages, text_lines};

    #[test]
    fn test_pages_joined_and_counted() {
        let pdf = pdf_with_pages(&["Hello page one", "", "Third page"]);
        let layer = extract_pages(&pdf).unwrap();

        assert_eq!(layer.pages, 3);
        assert_eq!(text_lines(&layer.text), vec!["Hello page one", "Third page"]);
    }

    #[tokio::test]
    async fn test_extract_from_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), pdf_with_pages(&["Only page"])).unwrap();

        let layer = PdfExtractBackend.extract(file.path()).await.unwrap();
        assert_eq!(layer.pages, 1);
        assert_eq!(text_lines(&layer.text), vec!["Only page"]);
    }

    #[test]
    fn test_blank_pages_give_blank_layer() {
        let layer = extract_pages(&pdf_with_pages(&["", ""])).unwrap();
        assert_eq!(layer.pages, 2);
        assert!(layer.is_blank());
    }

    #[test]
    fn test_garbage_is_an_error() {
        let result = extract_pages(b"definitely not a pdf");
        assert!(matches!(
            result,
            Err(TextLayerError::Library {
                backend: TextBackendKind::PdfExtract,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let result = PdfExtractBackend
            .extract(Path::new("/nonexistent/input.pdf"))
            .await;
        assert!(matches!(result, Err(TextLayerError::Io(_))));
    }
}
