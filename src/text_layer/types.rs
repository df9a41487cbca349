//! Text layer types

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Text-layer backend type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextBackendKind {
    /// MuPDF bindings
    Mupdf,
    /// Pure Rust pdf-extract
    PdfExtract,
}

impl TextBackendKind {
    /// Method name reported to clients
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mupdf => "mupdf",
            Self::PdfExtract => "pdf-extract",
        }
    }
}

impl std::fmt::Display for TextBackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Text pulled from a whole document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextLayer {
    /// Page texts joined with newlines, empty pages skipped
    pub text: String,
    /// Number of pages in the document
    pub pages: usize,
}

impl TextLayer {
    /// Join per-page texts, skipping pages that produced nothing
    pub fn from_pages<I, S>(page_texts: I, pages: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let text = page_texts
            .into_iter()
            .filter(|t| !t.as_ref().is_empty())
            .map(|t| t.as_ref().to_string())
            .collect::<Vec<_>>()
            .join("\n");

        Self { text, pages }
    }

    /// True if there is no visible text at all
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Text layer error types
#[derive(Debug, thiserror::Error)]
pub enum TextLayerError {
    #[error("Path is not valid UTF-8: {0}")]
    InvalidPath(PathBuf),

    #[error("{backend} error: {message}")]
    Library {
        backend: TextBackendKind,
        message: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Task join error: {0}")]
    Join(String),
}
