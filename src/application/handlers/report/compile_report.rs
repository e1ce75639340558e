//! CompileReportHandler - Command handler for compiling a proposal report.
//!
//! Runs the document compiler and the summary compiler side by side on the
//! blocking pool, encodes the document, stores it, and composes the feedback
//! email around the summary.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use thiserror::Error;
use tracing::info;

use crate::domain::foundation::ReportId;
use crate::domain::proposal::ProposalRecord;
use crate::domain::report::{
    DocumentCompiler, EmailSender, ExportFormat, LayoutError, ProposalEmail, SummaryCompiler,
    SummaryFragment,
};
use crate::ports::{ArtifactRenderer, ArtifactStorage, ExportError, StorageError, StoredArtifact};

/// Command to compile one proposal and its feedback.
#[derive(Debug, Clone)]
pub struct CompileReportCommand {
    pub record: ProposalRecord,
    pub feedback: String,
    /// Export format; the handler default when `None`.
    pub format: Option<ExportFormat>,
    /// Date printed in the title block; today when `None`.
    pub generated_on: Option<NaiveDate>,
}

impl CompileReportCommand {
    pub fn new(record: ProposalRecord, feedback: impl Into<String>) -> Self {
        Self {
            record,
            feedback: feedback.into(),
            format: None,
            generated_on: None,
        }
    }

    pub fn with_format(mut self, format: ExportFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn generated_on(mut self, date: NaiveDate) -> Self {
        self.generated_on = Some(date);
        self
    }
}

/// Result of a successful compilation.
#[derive(Debug, Clone)]
pub struct CompiledReport {
    pub report_id: ReportId,
    pub page_count: usize,
    pub stored: StoredArtifact,
    pub summary: SummaryFragment,
    pub email: ProposalEmail,
}

/// Error type for compiling a report.
///
/// Layout, encoding and storage failures stay distinct.
#[derive(Debug, Error)]
pub enum CompileReportError {
    #[error("Layout failed: {0}")]
    Layout(#[from] LayoutError),

    #[error("Export failed: {0}")]
    Export(#[from] ExportError),

    #[error("Storage failed: {0}")]
    Storage(#[from] StorageError),

    /// A compilation task panicked or was cancelled.
    #[error("Compilation task failed: {0}")]
    TaskFailed(String),
}

impl From<tokio::task::JoinError> for CompileReportError {
    fn from(err: tokio::task::JoinError) -> Self {
        CompileReportError::TaskFailed(err.to_string())
    }
}

/// Handler for compiling reports.
pub struct CompileReportHandler {
    compiler: DocumentCompiler,
    summaries: SummaryCompiler,
    renderer: Arc<dyn ArtifactRenderer>,
    storage: Arc<dyn ArtifactStorage>,
    sender: EmailSender,
    default_format: ExportFormat,
}

impl CompileReportHandler {
    pub fn new(
        compiler: DocumentCompiler,
        renderer: Arc<dyn ArtifactRenderer>,
        storage: Arc<dyn ArtifactStorage>,
        sender: EmailSender,
        default_format: ExportFormat,
    ) -> Self {
        Self {
            compiler,
            summaries: SummaryCompiler::new(),
            renderer,
            storage,
            sender,
            default_format,
        }
    }

    pub async fn handle(
        &self,
        cmd: CompileReportCommand,
    ) -> Result<CompiledReport, CompileReportError> {
        let format = cmd.format.unwrap_or(self.default_format);
        let generated_on = cmd.generated_on.unwrap_or_else(|| Utc::now().date_naive());
        let record = Arc::new(cmd.record);
        let feedback: Arc<str> = Arc::from(cmd.feedback);

        // 1. Compile document and summary concurrently
        let document_task = {
            let compiler = self.compiler.clone();
            let record = Arc::clone(&record);
            let feedback = Arc::clone(&feedback);
            tokio::task::spawn_blocking(move || compiler.compile_on(&record, &feedback, generated_on))
        };
        let summary_task = {
            let summaries = self.summaries;
            let feedback = Arc::clone(&feedback);
            tokio::task::spawn_blocking(move || summaries.compile(&feedback))
        };
        let (document, summary) = tokio::join!(document_task, summary_task);
        let artifact = document??;
        let summary = summary?;

        // 2. Encode
        let rendered = self.renderer.render(&artifact, format)?;

        // 3. Store
        let stored = self.storage.write(&record.project_id, &rendered).await?;

        // 4. Compose the email around the summary
        let email = ProposalEmail::compose(&record, &summary, &self.sender, format);

        info!(
            project_id = %record.project_id,
            report_id = %artifact.id(),
            pages = artifact.page_count(),
            path = %stored.path,
            recipients = email.to.len(),
            "report compiled"
        );

        Ok(CompiledReport {
            report_id: artifact.id(),
            page_count: artifact.page_count(),
            stored,
            summary,
            email,
        })
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════════
