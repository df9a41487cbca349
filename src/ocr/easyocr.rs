//! EasyOCR engine
//!
//! EasyOCR only exists as a Python package, so the engine drives a Python
//! interpreter with a small runner script. The reader is built once per
//! document and all page images are passed in a single invocation; the
//! runner prints one JSON span list per page.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::process::Command;
use tokio::sync::OnceCell;

use super::engine::{engine_command, OcrEngine};
use super::types::{OcrEngineKind, OcrError, RecognizedSpan};

const RUNNER: &str = include_str!("easyocr_runner.py");

/// Interpreters tried when none is configured
const DEFAULT_INTERPRETERS: &[&str] = &["python3", "python"];

/// EasyOCR engine
pub struct EasyOcrEngine {
    /// Configured interpreter, if any
    python: Option<String>,
    /// EasyOCR language codes, e.g. ["ta", "en"]
    languages: Vec<String>,
    /// Interpreter that can import easyocr, resolved on first use
    interpreter: OnceCell<Option<String>>,
}

impl EasyOcrEngine {
    pub fn new(python: Option<&str>, languages: &[String]) -> Self {
        Self {
            python: python.map(str::to_string),
            languages: languages.to_vec(),
            interpreter: OnceCell::new(),
        }
    }

    fn candidates(&self) -> Vec<String> {
        match &self.python {
            Some(python) => vec![python.clone()],
            None => DEFAULT_INTERPRETERS.iter().map(|s| s.to_string()).collect(),
        }
    }

    async fn interpreter(&self) -> Option<&str> {
        self.interpreter
            .get_or_init(|| async {
                for candidate in self.candidates() {
                    let imported = Command::new(&candidate)
                        .args(["-c", "import easyocr"])
                        .output()
                        .await
                        .map(|o| o.status.success())
                        .unwrap_or(false);
                    if imported {
                        tracing::debug!("EasyOCR available via {}", candidate);
                        return Some(candidate);
                    }
                }
                None
            })
            .await
            .as_deref()
    }
}

#[async_trait]
impl OcrEngine for EasyOcrEngine {
    fn kind(&self) -> OcrEngineKind {
        OcrEngineKind::EasyOcr
    }

    async fn is_available(&self) -> bool {
        self.interpreter().await.is_some()
    }

    async fn recognize(&self, pages: &[PathBuf]) -> Result<Vec<Vec<RecognizedSpan>>, OcrError> {
        if pages.is_empty() {
            return Ok(Vec::new());
        }

        let python = self.interpreter().await.ok_or_else(|| {
            OcrError::EngineNotAvailable(
                "EasyOCR not installed. Install with: pip install easyocr".to_string(),
            )
        })?;

        let output = engine_command(python)
            .arg("-c")
            .arg(RUNNER)
            .arg(self.languages.join(","))
            .args(pages)
            .output()
            .await
            .map_err(|e| OcrError::ProcessingError(format!("Failed to run EasyOCR: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(OcrError::ProcessingError(format!(
                "EasyOCR failed: {}",
                stderr.trim()
            )));
        }

        parse_output(&output.stdout, pages.len())
    }
}

/// Parse the runner's JSON output, checking one entry per page came back
pub(crate) fn parse_output(
    stdout: &[u8],
    expected_pages: usize,
) -> Result<Vec<Vec<RecognizedSpan>>, OcrError> {
    let pages: Vec<Vec<RecognizedSpan>> = serde_json::from_slice(stdout)
        .map_err(|e| OcrError::InvalidOutput(format!("EasyOCR output is not valid JSON: {}", e)))?;

    if pages.len() != expected_pages {
        return Err(OcrError::InvalidOutput(format!(
            "EasyOCR returned {} pages, expected {}",
            pages.len(),
            expected_pages
        )));
    }

    Ok(pages)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_output() {
        let stdout = r#"[[{"text":"தமிழ்","confidence":0.91},{"text":"x","confidence":0.1}],[]]"#;
        let pages = parse_output(stdout.as_bytes(), 2).unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0][0], RecognizedSpan::new("தமிழ்", 0.91));
        assert!(pages[1].is_empty());
    }

    #[test]
    fn test_parse_output_page_mismatch() {
        let result = parse_output(b"[[]]", 3);
        assert!(matches!(result, Err(OcrError::InvalidOutput(_))));
    }

    #[test]
    fn test_parse_output_garbage() {
        let result = parse_output(b"Traceback (most recent call last):", 1);
        assert!(matches!(result, Err(OcrError::InvalidOutput(_))));
    }

    #[test]
    fn test_configured_interpreter_is_only_candidate() {
        let engine = EasyOcrEngine::new(Some("/opt/venv/bin/python"), &["ta".to_string()]);
        assert_eq!(engine.candidates(), vec!["/opt/venv/bin/python".to_string()]);

        let engine = EasyOcrEngine::new(None, &["ta".to_string()]);
        assert_eq!(engine.candidates(), vec!["python3".to_string(), "python".to_string()]);
    }

    #[tokio::test]
    async fn test_missing_interpreter_is_unavailable() {
        let engine = EasyOcrEngine::new(Some("definitely-not-python"), &["ta".to_string()]);
        assert!(!engine.is_available().await);

        let result = engine.recognize(&[PathBuf::from("page.png")]).await;
        assert!(matches!(result, Err(OcrError::EngineNotAvailable(_))));
    }
}
