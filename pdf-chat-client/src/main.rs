use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use pdf_chat_client::HttpDocumentService;
use session_flow::{CandidateFile, Outcome, PDF_MEDIA_TYPE, Phase, SessionController};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Upload a PDF to the document service and chat about it.
#[derive(Debug, Parser)]
#[command(name = "pdf-chat", version, about)]
struct Args {
    /// PDF to upload and discuss.
    pdf: PathBuf,

    /// Base URL of the document service.
    #[arg(long, default_value = "http://127.0.0.1:8000")]
    base_url: String,

    /// Per-request deadline in seconds.
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,
}

/// Media type declared for the candidate, from the file extension. The
/// controller performs the actual acceptance check.
fn declared_media_type(path: &Path) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("pdf") => PDF_MEDIA_TYPE,
        _ => "application/octet-stream",
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::WARN.into()))
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    let bytes = std::fs::read(&args.pdf)
        .with_context(|| format!("failed to read {}", args.pdf.display()))?;
    let name = args
        .pdf
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("document.pdf")
        .to_string();
    let file = CandidateFile::new(name, declared_media_type(&args.pdf), bytes);

    let service = Arc::new(HttpDocumentService::new(&args.base_url));
    let mut controller = SessionController::new(service)
        .with_request_timeout(Duration::from_secs(args.timeout_secs));

    controller.select_file(file);
    if controller.phase() != Phase::FileSelected {
        anyhow::bail!(
            "{}",
            controller.pending_error().unwrap_or("file was rejected")
        );
    }

    controller.upload().await;
    if controller.phase() != Phase::Active {
        anyhow::bail!(
            "{}",
            controller.pending_error().unwrap_or("upload failed")
        );
    }

    if let Some(turn) = controller.transcript().last() {
        println!("{}", turn.text);
    }
    println!("Ask a question, or /end to finish.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim().to_string();
        if line == "/end" {
            break;
        }

        controller.set_draft(line);
        if controller.send_message().await == Outcome::Ignored {
            continue;
        }
        match controller.pending_error() {
            Some(err) => eprintln!("error: {err}"),
            None => {
                if let Some(turn) = controller.transcript().last() {
                    println!("{}", turn.text);
                }
            }
        }
    }

    controller.end_chat().await;
    info!("session ended");
    Ok(())
}
