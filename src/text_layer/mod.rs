//! Text Layer Module
//!
//! Reads the text embedded in a PDF's content streams.
//!
//! Two interchangeable backends:
//! - MuPDF (`mupdf` feature, enabled by default)
//! - pdf-extract (pure Rust, always compiled)
//!
//! Callers pick the first available backend and fall through to the next
//! one when a backend fails on a given document.

mod backend;
#[cfg(feature = "mupdf")]
mod mupdf_backend;
mod pdf_extract_backend;
mod types;

#[cfg(test)]
pub(crate) mod test_pdf;

pub use backend::{default_backends, TextLayerBackend};
#[cfg(feature = "mupdf")]
pub use mupdf_backend::MupdfBackend;
pub use pdf_extract_backend::PdfExtractBackend;
pub use types::{TextBackendKind, TextLayer, TextLayerError};

#[cfg(test)]
pub use backend::MockTextBackend;
