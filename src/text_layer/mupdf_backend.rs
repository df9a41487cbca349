//! MuPDF backend

use std::path::Path;

use async_trait::async_trait;

use super::backend::TextLayerBackend;
use super::types::{TextBackendKind, TextLayer, TextLayerError};

/// MuPDF text layer backend
#[derive(Debug, Default, Clone, Copy)]
pub struct MupdfBackend;

#[async_trait]
impl TextLayerBackend for MupdfBackend {
    fn kind(&self) -> TextBackendKind {
        TextBackendKind::Mupdf
    }

    async fn is_available(&self) -> bool {
        true
    }

    async fn extract(&self, path: &Path) -> Result<TextLayer, TextLayerError> {
        let path = path
            .to_str()
            .ok_or_else(|| TextLayerError::InvalidPath(path.to_path_buf()))?
            .to_string();

        tokio::task::spawn_blocking(move || extract_document(&path))
            .await
            .map_err(|e| TextLayerError::Join(e.to_string()))?
    }
}

fn extract_document(path: &str) -> Result<TextLayer, TextLayerError> {
    let doc = mupdf::Document::open(path)?;
    let page_count = doc.page_count()? as usize;

    let mut page_texts = Vec::with_capacity(page_count);
    for page_idx in 0..page_count {
        let page = doc.load_page(page_idx as i32)?;
        page_texts.push(page.to_text()?);
    }

    tracing::debug!("MuPDF read {} pages from {}", page_count, path);
    Ok(TextLayer::from_pages(page_texts, page_count))
}

impl From<mupdf::Error> for TextLayerError {
    fn from(err: mupdf::Error) -> Self {
        TextLayerError::Library {
            backend: TextBackendKind::Mupdf,
            message: err.to_string(),
        }
    }
}
