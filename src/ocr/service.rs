//! OCR Service
//!
//! Rasterizes a PDF, runs an engine over the page images and keeps only
//! the spans the engine is reasonably sure about.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::{
    easyocr::EasyOcrEngine,
    engine::OcrEngine,
    raster::{default_rasterizer, PageRasterizer, RasterizedDocument},
    tesseract::TesseractEngine,
    types::{OcrEngineKind, OcrError, RecognizedSpan},
};
use crate::text_layer::TextLayer;

/// OCR service configuration
#[derive(Debug, Clone)]
pub struct OcrServiceConfig {
    /// Spans at or below this confidence are discarded
    pub min_confidence: f32,
    /// Page zoom used when rasterizing
    pub render_scale: f32,
    /// EasyOCR language codes
    pub easyocr_languages: Vec<String>,
    /// Tesseract language spec
    pub tesseract_languages: String,
    /// Python interpreter for EasyOCR; python3 then python when unset
    pub python_bin: Option<String>,
    /// Tesseract binary
    pub tesseract_bin: String,
    /// Where rendered pages are written
    pub scratch_dir: PathBuf,
}

impl Default for OcrServiceConfig {
    fn default() -> Self {
        Self {
            min_confidence: 0.3,
            render_scale: 2.0,
            easyocr_languages: vec!["ta".to_string(), "en".to_string()],
            tesseract_languages: "tam+eng".to_string(),
            python_bin: None,
            tesseract_bin: "tesseract".to_string(),
            scratch_dir: std::env::temp_dir(),
        }
    }
}

/// OCR service for image-only or corrupted PDFs
pub struct OcrService {
    config: OcrServiceConfig,
    rasterizer: Option<Arc<dyn PageRasterizer>>,
    engines: Vec<Arc<dyn OcrEngine>>,
}

impl OcrService {
    /// Create a service with EasyOCR first and Tesseract as fallback
    pub fn new(config: OcrServiceConfig) -> Self {
        let engines: Vec<Arc<dyn OcrEngine>> = vec![
            Arc::new(EasyOcrEngine::new(
                config.python_bin.as_deref(),
                &config.easyocr_languages,
            )),
            Arc::new(TesseractEngine::new(
                &config.tesseract_bin,
                &config.tesseract_languages,
            )),
        ];
        let rasterizer = default_rasterizer(&config.scratch_dir);

        Self::with_parts(config, rasterizer, engines)
    }

    /// Create a service from explicit parts
    pub fn with_parts(
        config: OcrServiceConfig,
        rasterizer: Option<Arc<dyn PageRasterizer>>,
        engines: Vec<Arc<dyn OcrEngine>>,
    ) -> Self {
        Self {
            config,
            rasterizer,
            engines,
        }
    }

    pub fn config(&self) -> &OcrServiceConfig {
        &self.config
    }

    pub fn has_rasterizer(&self) -> bool {
        self.rasterizer.is_some()
    }

    /// Engines that are installed, in preference order
    pub async fn available_engines(&self) -> Vec<OcrEngineKind> {
        let mut available = Vec::new();
        for engine in &self.engines {
            if engine.is_available().await {
                available.push(engine.kind());
            }
        }
        available
    }

    /// OCR the document with the first engine that succeeds
    pub async fn extract(&self, pdf: &Path) -> Result<(OcrEngineKind, TextLayer), OcrError> {
        let rasterizer = self
            .rasterizer
            .as_ref()
            .ok_or(OcrError::RasterizerUnavailable)?;

        let mut engines = Vec::new();
        for engine in &self.engines {
            if engine.is_available().await {
                engines.push(engine.clone());
            }
        }
        if engines.is_empty() {
            return Err(OcrError::NoEngineAvailable);
        }

        let document = rasterizer.rasterize(pdf, self.config.render_scale).await?;

        let mut last_error = OcrError::NoEngineAvailable;
        for engine in engines {
            match self.recognize_document(engine.as_ref(), &document).await {
                Ok(layer) => {
                    tracing::info!(
                        "OCR with {} produced {} chars over {} pages",
                        engine.kind(),
                        layer.text.chars().count(),
                        layer.pages
                    );
                    return Ok((engine.kind(), layer));
                }
                Err(e) => {
                    tracing::warn!("OCR engine {} failed: {}, trying next", engine.kind(), e);
                    last_error = e;
                }
            }
        }

        Err(last_error)
    }

    async fn recognize_document(
        &self,
        engine: &dyn OcrEngine,
        document: &RasterizedDocument,
    ) -> Result<TextLayer, OcrError> {
        let recognized = engine.recognize(document.pages()).await?;
        if recognized.len() != document.page_count() {
            return Err(OcrError::InvalidOutput(format!(
                "{} returned {} pages, expected {}",
                engine.kind(),
                recognized.len(),
                document.page_count()
            )));
        }

        let page_texts = recognized
            .iter()
            .map(|spans| page_text(spans, self.config.min_confidence));

        Ok(TextLayer::from_pages(page_texts, document.page_count()))
    }
}

/// Join the confident spans of one page
fn page_text(spans: &[RecognizedSpan], min_confidence: f32) -> String {
    spans
        .iter()
        .filter(|span| span.confidence > min_confidence)
        .map(|span| span.text.trim())
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
