//! Extraction Orchestrator
//!
//! Chooses between the text layer and OCR for a document.
//!
//! The text layer is always tried first. It is accepted as-is when it holds
//! clean Tamil text. OCR takes over when the Tamil text carries suspect
//! glyphs, when the caller asked for OCR, or when the text layer is empty
//! or unreadable. Whenever OCR cannot deliver, the text layer result is
//! returned if there is one.

mod types;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

use crate::config::Config;
use crate::ocr::{OcrEngineKind, OcrService};
use crate::scratch::ScratchPdf;
use crate::script::{ScriptProfile, TAMIL};
use crate::text_layer::{
    default_backends, TextBackendKind, TextLayer, TextLayerBackend, TextLayerError,
};

pub use types::{Capabilities, ExtractError, Extraction, ExtractionMethod, SelectionReason};

/// Outcome of the text layer step
enum TextOutcome {
    Extracted(TextBackendKind, TextLayer),
    Failed(TextLayerError),
    NoBackend,
}

/// PDF text extractor with OCR fallback
pub struct PdfExtractor {
    text_backends: Vec<Arc<dyn TextLayerBackend>>,
    ocr: OcrService,
    script: ScriptProfile,
    scratch_dir: PathBuf,
}

impl PdfExtractor {
    /// Build the extractor with the default backends and engines
    pub fn from_config(config: &Config) -> Self {
        Self::with_parts(
            default_backends(),
            OcrService::new(config.ocr.clone()),
            TAMIL,
            config.scratch_dir.clone(),
        )
    }

    pub fn with_parts(
        text_backends: Vec<Arc<dyn TextLayerBackend>>,
        ocr: OcrService,
        script: ScriptProfile,
        scratch_dir: PathBuf,
    ) -> Self {
        Self {
            text_backends,
            ocr,
            script,
            scratch_dir,
        }
    }

    /// Report which backends and engines can run
    pub async fn capabilities(&self) -> Capabilities {
        let mut caps = Capabilities {
            rasterizer: self.ocr.has_rasterizer(),
            ..Default::default()
        };

        for backend in &self.text_backends {
            if backend.is_available().await {
                match backend.kind() {
                    TextBackendKind::Mupdf => caps.mupdf = true,
                    TextBackendKind::PdfExtract => caps.pdf_extract = true,
                }
            }
        }

        for engine in self.ocr.available_engines().await {
            match engine {
                OcrEngineKind::EasyOcr => caps.easyocr = true,
                OcrEngineKind::Tesseract => caps.tesseract = true,
            }
        }

        caps
    }

    /// Extract text from the PDF at `path`
    ///
    /// `use_ocr` forces OCR unless the text layer already holds clean
    /// Tamil text.
    pub async fn extract(&self, path: &Path, use_ocr: bool) -> Result<Extraction, ExtractError> {
        if !tokio::fs::try_exists(path).await.unwrap_or(false) {
            return Err(ExtractError::FileNotFound(path.to_path_buf()));
        }

        match self.extract_text_layer(path).await {
            TextOutcome::Extracted(kind, layer) if !layer.is_blank() => {
                Ok(self.select_from_text(path, kind, layer, use_ocr).await)
            }
            outcome => self.fallback_to_ocr(path, outcome).await,
        }
    }

    /// Write `data` to scratch storage and extract it
    pub async fn extract_bytes(
        &self,
        data: &[u8],
        use_ocr: bool,
    ) -> Result<Extraction, ExtractError> {
        let scratch = ScratchPdf::write(&self.scratch_dir, data).await?;
        self.extract(scratch.path(), use_ocr).await
    }

    /// Decode a base64 PDF and extract it
    pub async fn extract_base64(
        &self,
        data: &str,
        use_ocr: bool,
    ) -> Result<Extraction, ExtractError> {
        let bytes = decode_base64(data)?;
        self.extract_bytes(&bytes, use_ocr).await
    }

    /// Decide what to do with a non-empty text layer
    async fn select_from_text(
        &self,
        path: &Path,
        kind: TextBackendKind,
        layer: TextLayer,
        use_ocr: bool,
    ) -> Extraction {
        let assessment = self.script.assess(&layer.text);
        tracing::debug!(
            script = self.script.name,
            has_script = assessment.has_script,
            suspect_glyphs = assessment.has_suspect_glyphs,
            use_ocr,
            "Assessed text layer from {}",
            kind
        );

        let text_method = ExtractionMethod::TextLayer(kind);

        if assessment.is_clean_script() {
            return Extraction::new(text_method, layer, SelectionReason::ScriptTextClean);
        }

        if assessment.is_suspect_script() || use_ocr {
            let reason = if assessment.is_suspect_script() {
                SelectionReason::SuspectGlyphs
            } else {
                SelectionReason::OcrRequested
            };

            return match self.ocr.extract(path).await {
                Ok((engine, ocr_layer)) => {
                    Extraction::new(ExtractionMethod::Ocr(engine), ocr_layer, reason)
                }
                Err(e) => {
                    tracing::warn!("OCR wanted ({:?}) but unavailable: {}", reason, e);
                    Extraction::new(text_method, layer, SelectionReason::OcrUnavailable)
                }
            };
        }

        Extraction::new(text_method, layer, SelectionReason::NoScriptText)
    }

    /// OCR a document whose text layer is empty or missing
    async fn fallback_to_ocr(
        &self,
        path: &Path,
        outcome: TextOutcome,
    ) -> Result<Extraction, ExtractError> {
        let reason = match &outcome {
            TextOutcome::Extracted(..) => SelectionReason::EmptyTextLayer,
            TextOutcome::Failed(_) | TextOutcome::NoBackend => SelectionReason::TextLayerFailed,
        };

        let ocr_error = match self.ocr.extract(path).await {
            Ok((engine, layer)) => {
                return Ok(Extraction::new(ExtractionMethod::Ocr(engine), layer, reason));
            }
            Err(e) => e,
        };
        tracing::warn!("OCR fallback ({:?}) failed: {}", reason, ocr_error);

        match outcome {
            TextOutcome::Extracted(kind, layer) => Ok(Extraction::new(
                ExtractionMethod::TextLayer(kind),
                layer,
                SelectionReason::OcrUnavailable,
            )),
            TextOutcome::Failed(e) => Err(e.into()),
            TextOutcome::NoBackend if ocr_error.is_unavailable() => {
                Err(ExtractError::NoMethodAvailable)
            }
            TextOutcome::NoBackend => Err(ocr_error.into()),
        }
    }

    /// Try the text layer backends in order, first success wins
    async fn extract_text_layer(&self, path: &Path) -> TextOutcome {
        let mut outcome = TextOutcome::NoBackend;

        for backend in &self.text_backends {
            if !backend.is_available().await {
                continue;
            }

            match backend.extract(path).await {
                Ok(layer) => {
                    tracing::info!(
                        "Text layer via {}: {} chars over {} pages",
                        backend.kind(),
                        layer.text.chars().count(),
                        layer.pages
                    );
                    return TextOutcome::Extracted(backend.kind(), layer);
                }
                Err(e) => {
                    tracing::warn!("Text layer backend {} failed: {}", backend.kind(), e);
                    outcome = TextOutcome::Failed(e);
                }
            }
        }

        outcome
    }
}

/// Decode standard base64, ignoring surrounding whitespace and line breaks
pub fn decode_base64(data: &str) -> Result<Vec<u8>, ExtractError> {
    let compact: String = data.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    Ok(BASE64.decode(compact)?)
}
