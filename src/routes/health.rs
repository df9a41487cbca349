//! Health and capability endpoints

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
}

#[derive(Serialize)]
struct RootResponse {
    message: &'static str,
    status: &'static str,
    mupdf_available: bool,
    pdf_extract_available: bool,
}

#[derive(Serialize)]
struct OcrMethods {
    tesseract: bool,
    easyocr: bool,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    mupdf_available: bool,
    pdf_extract_available: bool,
    ocr_available: bool,
    ocr_methods: OcrMethods,
}

async fn root(State(state): State<AppState>) -> Json<RootResponse> {
    let caps = state.extractor().capabilities().await;
    Json(RootResponse {
        message: "PDF Extraction API",
        status: "running",
        mupdf_available: caps.mupdf,
        pdf_extract_available: caps.pdf_extract,
    })
}

/// Check service health and which extraction methods can run
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let caps = state.extractor().capabilities().await;
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        mupdf_available: caps.mupdf,
        pdf_extract_available: caps.pdf_extract,
        ocr_available: caps.ocr_available(),
        ocr_methods: OcrMethods {
            tesseract: caps.tesseract,
            easyocr: caps.easyocr,
        },
    })
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use super::super::test_support::{get, TestApp, CLEAN_TAMIL};

    #[tokio::test]
    async fn test_root() {
        let (status, body) = get(TestApp::with_text(CLEAN_TAMIL).router(), "/").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "PDF Extraction API");
        assert_eq!(body["status"], "running");
        assert_eq!(body["mupdf_available"], true);
        assert_eq!(body["pdf_extract_available"], false);
    }

    #[tokio::test]
    async fn test_health_reports_ocr_engines() {
        let (status, body) = get(TestApp::with_text(CLEAN_TAMIL).router(), "/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
        assert_eq!(body["ocr_available"], true);
        assert_eq!(body["ocr_methods"]["easyocr"], true);
        assert_eq!(body["ocr_methods"]["tesseract"], false);
    }

    #[tokio::test]
    async fn test_health_without_ocr() {
        let (_, body) = get(TestApp::failing().router(), "/health").await;

        assert_eq!(body["ocr_available"], false);
        assert_eq!(body["ocr_methods"]["easyocr"], false);
    }
}
