//! `proposal-report` entry point.
//!
//! Compiles one proposal and its feedback, stores the artifact, and prints
//! where it went along with the composed email's subject and recipients.
//!
//! ```text
//! proposal-report <proposal.json> <feedback.txt> [json|html|text]
//! ```
//!
//! Configuration comes from `PROPOSAL_REPORT__*` environment variables (see
//! `config::AppConfig`); `RUST_LOG` overrides the configured log level.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use proposal_report::adapters::document::{
    LocalArtifactStorage, MetricTextMeasurer, PagedArtifactRenderer,
};
use proposal_report::application::{CompileReportCommand, CompileReportHandler};
use proposal_report::config::{AppConfig, LogFormat, LoggingConfig};
use proposal_report::domain::proposal::ProposalRecord;
use proposal_report::domain::report::{DocumentCompiler, ExportFormat};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: proposal-report <proposal.json> <feedback.txt> [json|html|text]";

struct Args {
    proposal: PathBuf,
    feedback: PathBuf,
    format: Option<ExportFormat>,
}

fn parse_args() -> Result<Args, String> {
    let mut args = std::env::args().skip(1);
    let proposal = args.next().ok_or_else(|| USAGE.to_string())?;
    let feedback = args.next().ok_or_else(|| USAGE.to_string())?;
    let format = args
        .next()
        .map(|f| f.parse::<ExportFormat>().map_err(|e| e.to_string()))
        .transpose()?;
    if args.next().is_some() {
        return Err(USAGE.to_string());
    }
    Ok(Args {
        proposal: proposal.into(),
        feedback: feedback.into(),
        format,
    })
}

fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    match logging.format {
        LogFormat::Json => tracing_subscriber::fmt().with_env_filter(filter).json().init(),
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
}

async fn run(args: Args, config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let proposal = tokio::fs::read_to_string(&args.proposal).await?;
    let record: ProposalRecord = serde_json::from_str(&proposal)?;
    let feedback = tokio::fs::read_to_string(&args.feedback).await?;

    let compiler = DocumentCompiler::new(
        config.layout.compile_options(),
        Arc::new(MetricTextMeasurer::new()),
    );
    let renderer = PagedArtifactRenderer::new().with_text_columns(config.export.text_columns);
    let storage = LocalArtifactStorage::new(config.storage.base_path())
        .with_max_file_size(config.storage.max_file_size_bytes);
    let handler = CompileReportHandler::new(
        compiler,
        Arc::new(renderer),
        Arc::new(storage),
        config.email.sender(),
        config.export.default_format,
    );

    let mut command = CompileReportCommand::new(record, feedback);
    command.format = args.format;
    let report = handler.handle(command).await?;

    println!("report:     {}", report.report_id);
    println!("stored:     {}", report.stored.path);
    println!("pages:      {}", report.page_count);
    println!("sha256:     {}", report.stored.checksum);
    println!("subject:    {}", report.email.subject);
    println!("recipients: {}", report.email.to_header());
    println!("attachment: {}", report.email.attachment.file_name);
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };
    init_tracing(&config.logging);

    if let Err(e) = config.validate() {
        tracing::error!(error = %e, "invalid configuration");
        return ExitCode::FAILURE;
    }

    let args = match parse_args() {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{message}");
            return ExitCode::from(2);
        }
    };

    match run(args, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "report compilation failed");
            ExitCode::FAILURE
        }
    }
}
