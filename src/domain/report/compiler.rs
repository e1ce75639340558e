//! Document compiler.
//!
//! Lays out the fixed proposal sections in order, hands the budget table to
//! [`BudgetTableLayout`] and styles feedback lines by their [`LineRole`].
//! Every call owns its own [`LayoutContext`], so one compiler can serve many
//! compilations at once.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::artifact::{DocumentArtifact, DocumentMetadata, PageGeometry};
use super::budget_table::{BudgetTableLayout, TableColumns};
use super::errors::LayoutError;
use super::layout::LayoutContext;
use super::style::sheet;
use crate::domain::feedback::{classify_lines, LineRole};
use crate::domain::foundation::{CurrencyFormat, ReportId};
use crate::domain::proposal::{ProposalRecord, NO_REFERENCES};
use crate::ports::TextMeasurer;

pub const DOCUMENT_TITLE: &str = "PROJECT PROPOSAL REVIEW";
pub const FEEDBACK_TITLE: &str = "AI-GENERATED FEEDBACK";
pub const FEEDBACK_INTRO: &str =
    "The following feedback was generated by an AI assistant to help improve this proposal:";
pub const NO_FEEDBACK: &str = "No AI feedback available.";
pub const NO_STAKEHOLDERS: &str = "No stakeholders listed.";

/// Tunables for one document compiler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompileOptions {
    pub geometry: PageGeometry,
    pub columns: TableColumns,
    /// Minimum space, in points, that must remain before some sections start.
    pub reserve_threshold: f32,
    pub currency: CurrencyFormat,
    /// Leave out the references section when the field is blank.
    pub omit_empty_references: bool,
    pub author: String,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            geometry: PageGeometry::LETTER,
            columns: TableColumns::default(),
            reserve_threshold: 200.0,
            currency: CurrencyFormat::default(),
            omit_empty_references: true,
            author: "Student Project Portal".to_string(),
        }
    }
}

/// Compiles a proposal and its feedback into a [`DocumentArtifact`].
#[derive(Clone)]
pub struct DocumentCompiler {
    options: CompileOptions,
    measurer: Arc<dyn TextMeasurer>,
}

impl DocumentCompiler {
    pub fn new(options: CompileOptions, measurer: Arc<dyn TextMeasurer>) -> Self {
        Self { options, measurer }
    }

    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// Compiles with today's date in the title block.
    pub fn compile(
        &self,
        record: &ProposalRecord,
        feedback: &str,
    ) -> Result<DocumentArtifact, LayoutError> {
        self.compile_on(record, feedback, Utc::now().date_naive())
    }

    /// Compiles with an explicit generation date.
    pub fn compile_on(
        &self,
        record: &ProposalRecord,
        feedback: &str,
        generated_on: NaiveDate,
    ) -> Result<DocumentArtifact, LayoutError> {
        info!(project_id = %record.project_id, "compiling proposal document");
        record.check_budget()?;
        if record.has_total_mismatch() {
            warn!(
                project_id = %record.project_id,
                declared = ?record.declared_budget_total,
                computed = %record.budget_total(),
                "declared budget total differs from item sum; using computed total"
            );
        }

        let mut ctx = LayoutContext::new(self.options.geometry, self.measurer.as_ref())?;

        self.title_block(&mut ctx, record, generated_on)?;
        self.student_information(&mut ctx, record)?;
        self.project_details(&mut ctx, record)?;
        ctx.page_break();
        self.narrative(&mut ctx, record)?;
        ctx.page_break();
        self.budget(&mut ctx, record)?;
        self.stakeholders(&mut ctx, record)?;
        self.references(&mut ctx, record)?;
        ctx.page_break();
        self.feedback(&mut ctx, feedback)?;

        let metadata = DocumentMetadata {
            title: format!("Project Proposal - {}", record.project_title),
            author: self.options.author.clone(),
            subject: "Project Proposal Review".to_string(),
            keywords: vec![
                "proposal".to_string(),
                "review".to_string(),
                "feedback".to_string(),
            ],
            project_id: record.project_id.clone(),
            generated_on,
        };
        let artifact = ctx.finish(ReportId::new(), metadata);
        info!(
            project_id = %record.project_id,
            report_id = %artifact.id(),
            pages = artifact.page_count(),
            "proposal document compiled"
        );
        Ok(artifact)
    }

    fn title_block(
        &self,
        ctx: &mut LayoutContext<'_>,
        record: &ProposalRecord,
        generated_on: NaiveDate,
    ) -> Result<(), LayoutError> {
        ctx.heading(DOCUMENT_TITLE, sheet::title())?;
        ctx.move_down(0.5, &sheet::BODY);
        ctx.heading(&format!("Project ID: {}", record.project_id), sheet::subtitle())?;
        ctx.heading(
            &format!("Generated on: {}", generated_on.format("%B %-d, %Y")),
            sheet::subtitle(),
        )?;
        ctx.move_down(1.0, &sheet::BODY);
        ctx.rule()?;
        ctx.move_down(1.0, &sheet::BODY);
        Ok(())
    }

    fn student_information(
        &self,
        ctx: &mut LayoutContext<'_>,
        record: &ProposalRecord,
    ) -> Result<(), LayoutError> {
        section(ctx, "STUDENT INFORMATION")?;
        let fields = [
            ("Student Name", record.student_name.as_str()),
            ("Student ID", record.student_id.as_str()),
            ("SAP Code", record.sap_code.as_str()),
            ("College", record.college_name.as_str()),
            ("Email", record.student_email.as_str()),
            ("Course/Department", record.course_or_default()),
            ("Supervisor", record.supervisor_name_or_default()),
            ("Supervisor Email", record.supervisor_email_or_default()),
        ];
        for (label, value) in fields {
            ctx.paragraph(&format!("{}: {}", label, value), sheet::body())?;
        }
        ctx.move_down(1.0, &sheet::BODY);
        Ok(())
    }

    fn project_details(
        &self,
        ctx: &mut LayoutContext<'_>,
        record: &ProposalRecord,
    ) -> Result<(), LayoutError> {
        section(ctx, "PROJECT DETAILS")?;
        labeled(ctx, "Title:", &record.project_title)?;
        labeled(ctx, "Abstract:", &record.abstract_text)
    }

    fn narrative(&self, ctx: &mut LayoutContext<'_>, record: &ProposalRecord) -> Result<(), LayoutError> {
        labeled(ctx, "Introduction/Background:", &record.introduction)?;
        labeled(ctx, "Objectives:", &record.objectives)?;
        labeled(ctx, "Methodology:", &record.methodology)?;
        ctx.reserve(self.options.reserve_threshold);
        labeled(ctx, "Timeline/Schedule:", record.timeline_or_default())?;
        labeled(ctx, "Expected Outcomes/Deliverables:", &record.outcomes)
    }

    fn budget(&self, ctx: &mut LayoutContext<'_>, record: &ProposalRecord) -> Result<(), LayoutError> {
        section(ctx, "BUDGET INFORMATION")?;

        let planner = BudgetTableLayout::new(
            self.options.geometry,
            self.options.columns,
            &self.options.currency,
            ctx.measurer(),
        );
        let plan = planner.plan(&record.budget_items, ctx.cursor())?;
        debug!(
            rows = plan.rows.len(),
            breaks = plan.breaks.len(),
            total = %plan.total,
            "budget table planned"
        );

        let first_page = ctx.page_index();
        for row in plan.rows {
            while ctx.page_index() < first_page + row.page {
                ctx.new_page();
            }
            ctx.advance_to(row.y)?;
            let height = row.height;
            ctx.place(row.into_content(), height)?;
        }
        ctx.move_down(1.0, &sheet::BODY);
        Ok(())
    }

    fn stakeholders(
        &self,
        ctx: &mut LayoutContext<'_>,
        record: &ProposalRecord,
    ) -> Result<(), LayoutError> {
        ctx.reserve(self.options.reserve_threshold);
        section(ctx, "STAKEHOLDERS")?;
        if record.stakeholders.is_empty() {
            ctx.paragraph(NO_STAKEHOLDERS, sheet::body())?;
        }
        for stakeholder in &record.stakeholders {
            ctx.heading(&format!("{}:", stakeholder.name), sheet::strong())?;
            ctx.paragraph(&format!("Role: {}", stakeholder.role), sheet::body())?;
            ctx.move_down(0.5, &sheet::BODY);
        }
        ctx.move_down(1.0, &sheet::BODY);
        Ok(())
    }

    fn references(&self, ctx: &mut LayoutContext<'_>, record: &ProposalRecord) -> Result<(), LayoutError> {
        let text = match record.references_text() {
            Some(text) => text,
            None if self.options.omit_empty_references => return Ok(()),
            None => NO_REFERENCES,
        };
        ctx.reserve(self.options.reserve_threshold);
        section(ctx, "REFERENCES")?;
        ctx.paragraph(text, sheet::body())
    }

    fn feedback(&self, ctx: &mut LayoutContext<'_>, feedback: &str) -> Result<(), LayoutError> {
        ctx.heading(FEEDBACK_TITLE, sheet::feedback_title())?;
        ctx.move_down(1.0, &sheet::BODY);
        ctx.paragraph(FEEDBACK_INTRO, sheet::body())?;
        ctx.move_down(1.0, &sheet::BODY);

        if feedback.trim().is_empty() {
            return ctx.paragraph(NO_FEEDBACK, sheet::body());
        }

        for line in classify_lines(feedback) {
            if line.is_blank() {
                ctx.move_down(0.5, &sheet::BODY);
                continue;
            }
            let text = line.text.trim();
            match line.role {
                LineRole::MajorHeading => {
                    ctx.heading(text, sheet::feedback_major())?;
                    ctx.move_down(0.5, &sheet::BODY);
                }
                LineRole::SubHeading => {
                    ctx.heading(text, sheet::feedback_sub())?;
                    ctx.move_down(0.2, &sheet::BODY);
                }
                LineRole::Body => {
                    ctx.paragraph(text, sheet::body())?;
                    ctx.move_down(0.2, &sheet::BODY);
                }
            }
        }
        Ok(())
    }
}

fn section(ctx: &mut LayoutContext<'_>, title: &str) -> Result<(), LayoutError> {
    ctx.heading(title, sheet::section())?;
    ctx.move_down(0.5, &sheet::BODY);
    Ok(())
}

fn labeled(ctx: &mut LayoutContext<'_>, label: &str, value: &str) -> Result<(), LayoutError> {
    ctx.heading(label, sheet::field_label())?;
    ctx.paragraph(value, sheet::body())?;
    ctx.move_down(0.5, &sheet::BODY);
    Ok(())
}

// ════════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════════
