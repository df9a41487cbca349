//! OCR Module
//!
//! OCR for PDFs whose text layer is missing or corrupted.
//!
//! Supports two engines, tried in this order:
//! - EasyOCR (neural, better on Tamil, requires Python + easyocr)
//! - Tesseract (local binary, requires tesseract-ocr with `tam` data)
//!
//! Pages are rasterized with MuPDF, so OCR needs the `mupdf` feature.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tamil_pdf_api::ocr::{OcrService, OcrServiceConfig};
//!
//! let service = OcrService::new(OcrServiceConfig::default());
//! let (engine, layer) = service.extract(Path::new("scan.pdf")).await?;
//! ```

mod easyocr;
mod engine;
mod raster;
mod service;
mod tesseract;
mod types;

pub use easyocr::EasyOcrEngine;
pub use engine::OcrEngine;
pub use raster::{default_rasterizer, PageRasterizer, RasterizedDocument};
pub use service::{OcrService, OcrServiceConfig};
pub use tesseract::TesseractEngine;
pub use types::{OcrEngineKind, OcrError, RecognizedSpan};

#[cfg(feature = "mupdf")]
pub use raster::MupdfRasterizer;

#[cfg(test)]
pub use engine::MockEngine;
#[cfg(test)]
pub use raster::MockRasterizer;
