//! Command-line extractor
//!
//! Runs the same extraction policy as the server on a single PDF and prints
//! the result as JSON on stdout. Logs go to stderr.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use tamil_pdf_api::config::Config;
use tamil_pdf_api::extract::{
    ExtractError, Extraction, ExtractionMethod, PdfExtractor, SelectionReason,
};

/// Extract text from a PDF, using OCR when the Tamil text layer is unusable.
#[derive(Parser, Debug)]
#[command(name = "tamil-extract", version, arg_required_else_help = true)]
struct Cli {
    /// PDF file to extract
    #[arg(required_unless_present = "base64", conflicts_with = "base64")]
    pdf: Option<PathBuf>,

    /// Base64-encoded PDF bytes instead of a file path
    #[arg(long, value_name = "DATA")]
    base64: Option<String>,

    /// Prefer OCR unless the text layer already holds clean Tamil text
    #[arg(long)]
    ocr: bool,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Output {
    Success {
        success: bool,
        text: String,
        pages: usize,
        method: ExtractionMethod,
        reason: SelectionReason,
    },
    Failure {
        success: bool,
        error: String,
        text: &'static str,
    },
}

impl From<Result<Extraction, ExtractError>> for Output {
    fn from(result: Result<Extraction, ExtractError>) -> Self {
        match result {
            Ok(extraction) => Output::Success {
                success: true,
                text: extraction.text,
                pages: extraction.pages,
                method: extraction.method,
                reason: extraction.reason,
            },
            Err(e) => Output::Failure {
                success: false,
                error: e.to_string(),
                text: "",
            },
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    dotenvy::dotenv().ok();
    let extractor = PdfExtractor::from_config(&Config::from_env());

    let result = match (&cli.base64, &cli.pdf) {
        (Some(data), _) => extractor.extract_base64(data, cli.ocr).await,
        (None, Some(path)) => extractor.extract(path, cli.ocr).await,
        (None, None) => anyhow::bail!("either a PDF path or --base64 is required"),
    };

    let failed = result.is_err();
    println!("{}", serde_json::to_string(&Output::from(result))?);

    Ok(if failed { ExitCode::FAILURE } else { ExitCode::SUCCESS })
}
