//! Router test helpers

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use crate::config::Config;
use crate::extract::PdfExtractor;
use crate::ocr::{
    MockEngine, MockRasterizer, OcrEngine, OcrEngineKind, OcrService, OcrServiceConfig,
    PageRasterizer, RecognizedSpan,
};
use crate::script::TAMIL;
use crate::state::AppState;
use crate::text_layer::{MockTextBackend, TextBackendKind, TextLayerBackend};

pub const CLEAN_TAMIL: &str = "கேள்வி 1: தமிழ்நாட்டின் தலைநகரம் எது?";
pub const OCR_TEXT: &str = "ஓசிஆர் உரை";

const BOUNDARY: &str = "tamil-pdf-test-boundary";

/// Application wired to mock backends
pub struct TestApp {
    text: MockTextBackend,
    engines: Vec<MockEngine>,
}

impl TestApp {
    /// Text layer returns `text`; EasyOCR returns [`OCR_TEXT`]
    pub fn with_text(text: &str) -> Self {
        Self {
            text: MockTextBackend::returning(TextBackendKind::Mupdf, text, 1),
            engines: vec![MockEngine::returning(
                OcrEngineKind::EasyOcr,
                vec![RecognizedSpan::new(OCR_TEXT, 0.9)],
            )],
        }
    }

    /// Every method fails
    pub fn failing() -> Self {
        Self {
            text: MockTextBackend::failing(TextBackendKind::Mupdf, "broken xref table"),
            engines: vec![MockEngine::unavailable(OcrEngineKind::EasyOcr)],
        }
    }

    pub fn router(self) -> Router {
        let config = Config::default();
        let rasterizer: Arc<dyn PageRasterizer> = Arc::new(MockRasterizer {
            pages: 1,
            fail: false,
        });
        let engines = self
            .engines
            .into_iter()
            .map(|e| Arc::new(e) as Arc<dyn OcrEngine>)
            .collect();
        let extractor = PdfExtractor::with_parts(
            vec![Arc::new(self.text) as Arc<dyn TextLayerBackend>],
            OcrService::with_parts(OcrServiceConfig::default(), Some(rasterizer), engines),
            TAMIL,
            std::env::temp_dir(),
        );

        super::router(AppState::with_extractor(config, extractor))
    }
}

/// Hand-built multipart/form-data body
#[derive(Default)]
pub struct MultipartBody {
    bytes: Vec<u8>,
}

impl MultipartBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file(mut self, name: &str, file_name: &str, content_type: &str, data: &[u8]) -> Self {
        self.bytes.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\n\
                 Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n\
                 Content-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        self.bytes.extend_from_slice(data);
        self.bytes.extend_from_slice(b"\r\n");
        self
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.bytes.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\n\
                 Content-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
        self
    }

    fn finish(mut self) -> Vec<u8> {
        self.bytes
            .extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        self.bytes
    }
}

pub async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn post_multipart(app: Router, uri: &str, body: MultipartBody) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body.finish()))
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}
