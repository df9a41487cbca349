//! Scratch storage for uploaded documents
//!
//! Uploads are written to a named temporary file so the PDF libraries and
//! OCR tools can open them by path. The file is deleted when the guard is
//! dropped, whether or not extraction succeeded.

use std::path::Path;

use tempfile::NamedTempFile;

/// A PDF written to scratch storage
#[derive(Debug)]
pub struct ScratchPdf {
    file: NamedTempFile,
}

impl ScratchPdf {
    /// Write `data` to a new `.pdf` file inside `dir`
    pub async fn write(dir: &Path, data: &[u8]) -> std::io::Result<Self> {
        tokio::fs::create_dir_all(dir).await?;

        let file = tempfile::Builder::new()
            .prefix("upload-")
            .suffix(".pdf")
            .tempfile_in(dir)?;
        tokio::fs::write(file.path(), data).await?;

        tracing::debug!("Wrote {} bytes to {}", data.len(), file.path().display());
        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scratch_file_removed_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let scratch = ScratchPdf::write(dir.path(), b"%PDF-1.4").await.unwrap();
        let path = scratch.path().to_path_buf();

        assert!(path.exists());
        assert_eq!(path.extension().unwrap(), "pdf");
        assert_eq!(std::fs::read(&path).unwrap(), b"%PDF-1.4");

        drop(scratch);
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_creates_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let scratch = ScratchPdf::write(&nested, b"data").await.unwrap();
        assert!(scratch.path().starts_with(&nested));
    }

    #[tokio::test]
    async fn test_large_upload_written_in_full() {
        let dir = tempfile::tempdir().unwrap();
        let data = vec![0x25u8; 4 * 1024 * 1024];
        let scratch = ScratchPdf::write(dir.path(), &data).await.unwrap();

        let written = tokio::fs::read(scratch.path()).await.unwrap();
        assert_eq!(written.len(), data.len());
    }
}
