//! Page rasterization
//!
//! Renders every page of a PDF to a PNG file so the OCR engines, which
//! only read images from disk, can work on it.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tempfile::TempDir;

use super::types::OcrError;

/// Rendered pages of one document
///
/// The page images live in a scratch directory that is removed when this
/// value is dropped.
#[derive(Debug)]
pub struct RasterizedDocument {
    _dir: TempDir,
    pages: Vec<PathBuf>,
}

impl RasterizedDocument {
    pub fn new(dir: TempDir, pages: Vec<PathBuf>) -> Self {
        Self { _dir: dir, pages }
    }

    /// Page image paths in page order
    pub fn pages(&self) -> &[PathBuf] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

/// Page rasterizer trait
#[async_trait]
pub trait PageRasterizer: Send + Sync {
    /// Render every page at `scale` (1.0 = 72 dpi)
    async fn rasterize(&self, pdf: &Path, scale: f32) -> Result<RasterizedDocument, OcrError>;
}

/// Rasterizer used by default, if one was compiled in
#[cfg(feature = "mupdf")]
pub fn default_rasterizer(scratch_dir: &Path) -> Option<Arc<dyn PageRasterizer>> {
    Some(Arc::new(MupdfRasterizer::new(scratch_dir)))
}

/// Rasterizer used by default, if one was compiled in
#[cfg(not(feature = "mupdf"))]
pub fn default_rasterizer(_scratch_dir: &Path) -> Option<Arc<dyn PageRasterizer>> {
    None
}

/// MuPDF page rasterizer
#[cfg(feature = "mupdf")]
pub struct MupdfRasterizer {
    scratch_dir: PathBuf,
}

#[cfg(feature = "mupdf")]
impl MupdfRasterizer {
    pub fn new(scratch_dir: &Path) -> Self {
        Self {
            scratch_dir: scratch_dir.to_path_buf(),
        }
    }
}

#[cfg(feature = "mupdf")]
#[async_trait]
impl PageRasterizer for MupdfRasterizer {
    async fn rasterize(&self, pdf: &Path, scale: f32) -> Result<RasterizedDocument, OcrError> {
        let pdf = pdf
            .to_str()
            .ok_or_else(|| OcrError::RasterError(format!("Path is not valid UTF-8: {:?}", pdf)))?
            .to_string();

        tokio::fs::create_dir_all(&self.scratch_dir).await?;
        let dir = tempfile::Builder::new()
            .prefix("ocr-pages-")
            .tempdir_in(&self.scratch_dir)?;
        let out_dir = dir.path().to_path_buf();
        let scale = scale.clamp(0.5, 4.0);

        let pages = tokio::task::spawn_blocking(move || render_pages(&pdf, scale, &out_dir))
            .await
            .map_err(|e| OcrError::RasterError(format!("Task join error: {}", e)))??;

        tracing::debug!("Rasterized {} pages at scale {}", pages.len(), scale);
        Ok(RasterizedDocument::new(dir, pages))
    }
}

#[cfg(feature = "mupdf")]
fn render_pages(pdf: &str, scale: f32, out_dir: &Path) -> Result<Vec<PathBuf>, OcrError> {
    use mupdf::{Colorspace, Matrix};

    let raster_err = |e: mupdf::Error| OcrError::RasterError(e.to_string());

    let doc = mupdf::Document::open(pdf).map_err(raster_err)?;
    let page_count = doc.page_count().map_err(raster_err)? as usize;

    let matrix = Matrix::new_scale(scale, scale);
    let colorspace = Colorspace::device_rgb();

    let mut pages = Vec::with_capacity(page_count);
    for page_idx in 0..page_count {
        let page = doc.load_page(page_idx as i32).map_err(raster_err)?;
        let pixmap = page
            .to_pixmap(&matrix, &colorspace, false, true)
            .map_err(raster_err)?;

        let png = encode_png(&pixmap)?;
        let path = out_dir.join(format!("page-{:04}.png", page_idx + 1));
        std::fs::write(&path, png)?;
        pages.push(path);
    }

    Ok(pages)
}

#[cfg(feature = "mupdf")]
fn encode_png(pixmap: &mupdf::Pixmap) -> Result<Vec<u8>, OcrError> {
    let width = pixmap.width() as u32;
    let height = pixmap.height() as u32;
    let samples = pixmap.samples();
    let n = pixmap.n() as usize;

    let mut rgb_buffer = Vec::with_capacity((width * height * 3) as usize);
    for y in 0..height as usize {
        for x in 0..width as usize {
            let offset = (y * width as usize + x) * n;
            let r = samples.get(offset).copied().unwrap_or(255);
            let g = samples.get(offset + 1).copied().unwrap_or(r);
            let b = samples.get(offset + 2).copied().unwrap_or(r);
            rgb_buffer.extend_from_slice(&[r, g, b]);
        }
    }

    let img = image::RgbImage::from_raw(width, height, rgb_buffer)
        .ok_or_else(|| OcrError::RasterError("Failed to create image buffer".to_string()))?;

    let mut output = Vec::new();
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut std::io::Cursor::new(&mut output), image::ImageFormat::Png)
        .map_err(|e| OcrError::RasterError(e.to_string()))?;

    Ok(output)
}

/// Mock rasterizer for testing: produces page paths without writing images
#[cfg(test)]
pub struct MockRasterizer {
    pub pages: usize,
    pub fail: bool,
}

#[cfg(test)]
#[async_trait]
impl PageRasterizer for MockRasterizer {
    async fn rasterize(&self, _pdf: &Path, _scale: f32) -> Result<RasterizedDocument, OcrError> {
        if self.fail {
            return Err(OcrError::RasterError("mock failure".to_string()));
        }
        let dir = tempfile::tempdir()?;
        let pages = (1..=self.pages)
            .map(|i| dir.path().join(format!("page-{:04}.png", i)))
            .collect();
        Ok(RasterizedDocument::new(dir, pages))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_rasterized_document_removes_dir_on_drop() {
        let doc = MockRasterizer { pages: 2, fail: false }
            .rasterize(Path::new("unused.pdf"), 2.0)
            .await
            .unwrap();
        assert_eq!(doc.page_count(), 2);
        let dir = doc.pages()[0].parent().unwrap().to_path_buf();
        assert!(dir.exists());

        drop(doc);
        assert!(!dir.exists());
    }

    #[cfg(feature = "mupdf")]
    #[tokio::test]
    async fn test_mupdf_rasterizer_rejects_missing_file() {
        let scratch = tempfile::tempdir().unwrap();
        let rasterizer = MupdfRasterizer::new(scratch.path());
        let result = rasterizer
            .rasterize(Path::new("/nonexistent/input.pdf"), 2.0)
            .await;
        assert!(matches!(result, Err(OcrError::RasterError(_))));
    }
}
