//! Tesseract engine
//!
//! Runs the `tesseract` binary once per page with TSV output and turns
//! the word rows into line spans. A line's confidence is the mean of its
//! word confidences.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::process::Command;
use tokio::sync::OnceCell;

use super::engine::{engine_command, OcrEngine};
use super::types::{OcrEngineKind, OcrError, RecognizedSpan};

/// Tesseract OCR engine
pub struct TesseractEngine {
    binary: String,
    /// Tesseract language spec, e.g. "tam+eng"
    languages: String,
    available: OnceCell<bool>,
}

impl TesseractEngine {
    pub fn new(binary: &str, languages: &str) -> Self {
        Self {
            binary: binary.to_string(),
            languages: languages.to_string(),
            available: OnceCell::new(),
        }
    }

    async fn recognize_page(&self, page: &Path) -> Result<Vec<RecognizedSpan>, OcrError> {
        let output = engine_command(&self.binary)
            .arg(page)
            .arg("stdout")
            .args(["-l", &self.languages])
            .args(["--oem", "3", "--psm", "3"])
            .arg("tsv")
            .output()
            .await
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => OcrError::EngineNotAvailable(format!(
                    "{} not found (install tesseract-ocr)",
                    self.binary
                )),
                _ => OcrError::ProcessingError(format!("Failed to run tesseract: {}", e)),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(OcrError::ProcessingError(format!(
                "Tesseract failed: {}",
                stderr.trim()
            )));
        }

        parse_tsv(&String::from_utf8_lossy(&output.stdout))
    }
}

#[async_trait]
impl OcrEngine for TesseractEngine {
    fn kind(&self) -> OcrEngineKind {
        OcrEngineKind::Tesseract
    }

    async fn is_available(&self) -> bool {
        *self
            .available
            .get_or_init(|| async {
                Command::new(&self.binary)
                    .arg("--version")
                    .output()
                    .await
                    .map(|o| o.status.success())
                    .unwrap_or(false)
            })
            .await
    }

    async fn recognize(&self, pages: &[PathBuf]) -> Result<Vec<Vec<RecognizedSpan>>, OcrError> {
        let mut results = Vec::with_capacity(pages.len());
        for page in pages {
            results.push(self.recognize_page(page).await?);
        }
        Ok(results)
    }
}

/// Word row columns in Tesseract's TSV output
const TSV_COLUMNS: usize = 12;
const WORD_LEVEL: &str = "5";

/// Group TSV word rows into line spans
pub(crate) fn parse_tsv(tsv: &str) -> Result<Vec<RecognizedSpan>, OcrError> {
    struct Line<'a> {
        key: (&'a str, &'a str, &'a str, &'a str),
        words: Vec<&'a str>,
        confidence_sum: f32,
    }

    let mut lines: Vec<Line> = Vec::new();

    for row in tsv.lines().filter(|l| !l.starts_with("level")) {
        let cols: Vec<&str> = row.split('\t').collect();
        if cols.len() < TSV_COLUMNS || cols[0] != WORD_LEVEL {
            continue;
        }

        let confidence: f32 = cols[10]
            .trim()
            .parse()
            .map_err(|_| OcrError::InvalidOutput(format!("bad confidence in row: {}", row)))?;
        let word = cols[11].trim();
        if confidence < 0.0 || word.is_empty() {
            continue;
        }

        // page, block, paragraph, line
        let key = (cols[1], cols[2], cols[3], cols[4]);
        match lines.last_mut() {
            Some(line) if line.key == key => {
                line.words.push(word);
                line.confidence_sum += confidence;
            }
            _ => lines.push(Line {
                key,
                words: vec![word],
                confidence_sum: confidence,
            }),
        }
    }

    Ok(lines
        .into_iter()
        .map(|line| {
            let mean = line.confidence_sum / line.words.len() as f32;
            RecognizedSpan::new(line.words.join(" "), (mean / 100.0).clamp(0.0, 1.0))
        })
        .collect())
}
