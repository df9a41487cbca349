//! Application state management

use std::sync::Arc;

use crate::config::Config;
use crate::extract::PdfExtractor;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,
    extractor: PdfExtractor,
}

impl AppState {
    /// Create the state with the default backends and OCR engines
    pub fn new(config: Config) -> Self {
        let extractor = PdfExtractor::from_config(&config);
        Self::with_extractor(config, extractor)
    }

    /// Create the state around an existing extractor
    pub fn with_extractor(config: Config, extractor: PdfExtractor) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, extractor }),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Get the PDF extractor
    pub fn extractor(&self) -> &PdfExtractor {
        &self.inner.extractor
    }
}
