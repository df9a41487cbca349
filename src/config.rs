//! Configuration management for the extraction server

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::ocr::OcrServiceConfig;

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    /// Where uploads and rendered pages are written
    pub scratch_dir: PathBuf,
    pub ocr: OcrServiceConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Allowed CORS origins; empty allows any origin
    pub cors_origins: Vec<String>,
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: "0.0.0.0".to_string(),
            port: 5002,
            cors_origins: Vec::new(),
            max_upload_bytes: 50 * 1024 * 1024,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let scratch_dir = env::temp_dir();
        Config {
            server: ServerConfig::default(),
            scratch_dir: scratch_dir.clone(),
            ocr: OcrServiceConfig {
                scratch_dir,
                ..OcrServiceConfig::default()
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build the configuration from a variable lookup
    pub fn from_vars<F>(var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();
        let lookup = |key: &str| var(key).filter(|v| !v.trim().is_empty());

        let scratch_dir = lookup("SCRATCH_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.scratch_dir);

        Config {
            server: ServerConfig {
                host: lookup("SERVER_HOST").unwrap_or(defaults.server.host),
                port: parse_or(
                    "PORT",
                    lookup("PORT").or_else(|| lookup("SERVER_PORT")),
                    defaults.server.port,
                ),
                cors_origins: lookup("CORS_ORIGINS")
                    .map(|v| split_list(&v, ','))
                    .unwrap_or(defaults.server.cors_origins),
                max_upload_bytes: parse_or(
                    "MAX_UPLOAD_BYTES",
                    lookup("MAX_UPLOAD_BYTES"),
                    defaults.server.max_upload_bytes,
                ),
            },
            ocr: OcrServiceConfig {
                min_confidence: parse_or(
                    "OCR_MIN_CONFIDENCE",
                    lookup("OCR_MIN_CONFIDENCE"),
                    defaults.ocr.min_confidence,
                ),
                render_scale: parse_or(
                    "OCR_RENDER_SCALE",
                    lookup("OCR_RENDER_SCALE"),
                    defaults.ocr.render_scale,
                ),
                easyocr_languages: lookup("EASYOCR_LANGUAGES")
                    .map(|v| split_list(&v, ','))
                    .unwrap_or(defaults.ocr.easyocr_languages),
                tesseract_languages: lookup("TESSERACT_LANGUAGES")
                    .unwrap_or(defaults.ocr.tesseract_languages),
                python_bin: lookup("PYTHON_BIN"),
                tesseract_bin: lookup("TESSERACT_BIN").unwrap_or(defaults.ocr.tesseract_bin),
                scratch_dir: scratch_dir.clone(),
            },
            scratch_dir,
        }
    }
}

fn parse_or<T: FromStr>(key: &str, value: Option<String>, default: T) -> T {
    match value {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid value {:?} for {}, using default", raw, key);
            default
        }),
        None => default,
    }
}

fn split_list(value: &str, separator: char) -> Vec<String> {
    value
        .split(separator)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
