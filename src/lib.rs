//! Tamil PDF API
//!
//! Extracts text from PDFs, checking Tamil text for the glyph corruption
//! typical of broken font mappings and falling back to OCR when the text
//! layer is empty, corrupted, or OCR was requested.
//!
//! # Modules
//!
//! - `script`: Script detection and corrupted-glyph heuristic
//! - `text_layer`: Embedded text extraction (MuPDF, pdf-extract)
//! - `ocr`: Page rasterization and OCR engines (EasyOCR, Tesseract)
//! - `extract`: Method selection and fallback policy
//! - `routes`: HTTP front end

pub mod config;
pub mod error;
pub mod extract;
pub mod ocr;
pub mod routes;
pub mod scratch;
pub mod script;
pub mod state;
pub mod text_layer;
