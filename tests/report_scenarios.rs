//! End-to-end report compilation scenarios.

use std::sync::Arc;

use chrono::NaiveDate;
use proposal_report::adapters::document::{
    LocalArtifactStorage, MetricTextMeasurer, PagedArtifactRenderer,
};
use proposal_report::application::{CompileReportCommand, CompileReportHandler};
use proposal_report::domain::feedback::FeedbackDigest;
use proposal_report::domain::foundation::CurrencyFormat;
use proposal_report::domain::proposal::{BudgetItem, ProposalRecord, Stakeholder};
use proposal_report::domain::report::{
    sheet, BlockContent, BudgetTableLayout, CompileOptions, DocumentCompiler, EmailSender,
    ExportFormat, PageGeometry, RowRole, SummaryCompiler, TableColumns,
};
use proposal_report::ports::{ArtifactStorage, TextMeasurer};
use rust_decimal::Decimal;
use tempfile::TempDir;

// ════════════════════════════════════════════════════════════════════════════════
// Fixtures
// ════════════════════════════════════════════════════════════════════════════════

const SCENARIO_A_FEEDBACK: &str = "1. OVERALL ASSESSMENT\nGood work overall\n\n2. STRENGTHS\n- Clear objectives\n- Strong methodology\n\n3. AREAS FOR IMPROVEMENT\n- Add more references\n";

const LONG_JUSTIFICATION: &str = "Field kits are required at each of the three sampling sites so that measurements can be taken on the same day and compared without transport delays affecting the results";

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 20).unwrap()
}

fn proposal() -> ProposalRecord {
    ProposalRecord {
        project_id: "PRJ-2024-017".into(),
        student_name: "Sam Rivera".into(),
        student_id: "ST-5531, ST-5532".into(),
        sap_code: "SAP-88".into(),
        college_name: "College of Science".into(),
        student_email: "sam@example.edu".into(),
        course: Some("Environmental Science".into()),
        supervisor_name: Some("Dr. Okafor".into()),
        supervisor_email: Some("okafor@example.edu".into()),
        project_title: "River Health Monitoring".into(),
        abstract_text: "Low-cost monitoring of river water quality.".into(),
        introduction: "Rivers near the campus lack regular monitoring.".into(),
        objectives: "Measure pH, turbidity and temperature weekly.".into(),
        methodology: "Deploy sensors and sample by hand for calibration.".into(),
        timeline: "Twelve weeks.".into(),
        outcomes: "A public dashboard and a written report.".into(),
        references: String::new(),
        budget_items: vec![
            BudgetItem::new("Sensor kits", Decimal::new(45000, 2), LONG_JUSTIFICATION).unwrap(),
            BudgetItem::new("Sample bottles", Decimal::new(125, 1), "Consumables").unwrap(),
            BudgetItem::new("Transport", Decimal::new(80, 0), "Site visits").unwrap(),
        ],
        declared_budget_total: Some(Decimal::new(54250, 2)),
        stakeholders: vec![
            Stakeholder::new("City Water Board", "Data consumer"),
            Stakeholder::new("Dr. Okafor", "Supervisor"),
        ],
    }
}

fn compiler() -> DocumentCompiler {
    DocumentCompiler::new(CompileOptions::default(), Arc::new(MetricTextMeasurer::new()))
}

// ════════════════════════════════════════════════════════════════════════════════
// Scenario A: summary extraction
// ════════════════════════════════════════════════════════════════════════════════

#[test]
fn scenario_a_summary_has_overall_two_strengths_one_improvement() {
    let digest = FeedbackDigest::extract(SCENARIO_A_FEEDBACK);
    assert_eq!(digest.overall.as_deref(), Some("Good work overall"));
    assert_eq!(digest.strengths, vec!["Clear objectives", "Strong methodology"]);
    assert_eq!(digest.improvements, vec!["Add more references"]);

    let html = SummaryCompiler::new().compile(SCENARIO_A_FEEDBACK).into_string();
    assert!(html.contains("<p><strong>Overall:</strong> Good work overall</p>"));

    let strengths = html.split("Key Strengths:").nth(1).unwrap();
    let strengths = strengths.split("</ul>").next().unwrap();
    assert_eq!(strengths.matches("<li>").count(), 2);

    let improvements = html.split("Areas for Improvement:").nth(1).unwrap();
    let improvements = improvements.split("</ul>").next().unwrap();
    assert_eq!(improvements.matches("<li>").count(), 1);
}

// ════════════════════════════════════════════════════════════════════════════════
// Scenario B: wrapped budget rows
// ════════════════════════════════════════════════════════════════════════════════

#[test]
fn scenario_b_wrapped_row_is_at_least_four_lines_tall() {
    let measurer = MetricTextMeasurer::new();
    let line = measurer.line_height(&sheet::TABLE_BODY);
    let artifact = compiler().compile_on(&proposal(), "", date()).unwrap();

    let row = artifact
        .table_rows()
        .into_iter()
        .find(|(_, block)| block.content.text_lines().iter().any(|l| l.starts_with("Sensor kits")))
        .map(|(_, block)| block.clone())
        .unwrap();
    assert!(row.height >= 4.0 * line);
}

#[test]
fn scenario_b_header_repeats_before_row_pushed_to_next_page() {
    let measurer = MetricTextMeasurer::new();
    let currency = CurrencyFormat::default();
    let geometry = PageGeometry::LETTER;
    let layout = BudgetTableLayout::new(geometry, TableColumns::default(), &currency, &measurer);
    let items = proposal().budget_items;

    // Leave room for the header and the two short rows, not the tall one
    let short_row = measurer.line_height(&sheet::TABLE_BODY) + 10.0;
    let header = measurer.line_height(&sheet::TABLE_HEADER) + 10.0;
    let reordered = vec![items[1].clone(), items[2].clone(), items[0].clone()];
    let start = geometry.content_bottom() - header - 2.0 * short_row - 5.0;

    let plan = layout.plan(&reordered, start).unwrap();
    let tall_index = plan
        .rows
        .iter()
        .position(|r| r.role == RowRole::Item && r.item_index == Some(2))
        .unwrap();

    assert_eq!(plan.rows[tall_index].page, 1);
    assert_eq!(plan.rows[tall_index - 1].role, RowRole::Header);
    assert_eq!(plan.rows[tall_index - 1].page, 1);
    assert_eq!(plan.rows[tall_index - 1].y, geometry.content_top());
    assert!(plan.rows.iter().all(|r| r.bottom() <= geometry.content_bottom()));
}

#[test]
fn budget_total_is_recomputed_from_items() {
    let mut record = proposal();
    record.declared_budget_total = Some(Decimal::new(1, 0));
    let artifact = compiler().compile_on(&record, "", date()).unwrap();
    assert!(artifact.contains_text("Total Budget: $542.50"));
}

// ════════════════════════════════════════════════════════════════════════════════
// Scenario C: empty references
// ════════════════════════════════════════════════════════════════════════════════

#[test]
fn scenario_c_empty_references_leave_no_heading() {
    let artifact = compiler().compile_on(&proposal(), SCENARIO_A_FEEDBACK, date()).unwrap();
    assert!(!artifact.contains_text("REFERENCES"));
    assert!(!artifact
        .blocks()
        .any(|(_, block)| matches!(&block.content, BlockContent::Heading { lines, .. } if lines.iter().any(|l| l.contains("REFERENCES")))));
}

#[test]
fn whitespace_references_count_as_empty() {
    let mut record = proposal();
    record.references = "  \n\t".into();
    let artifact = compiler().compile_on(&record, "", date()).unwrap();
    assert!(!artifact.contains_text("REFERENCES"));
}

// ════════════════════════════════════════════════════════════════════════════════
// Whole pipeline
// ════════════════════════════════════════════════════════════════════════════════

#[test]
fn every_page_is_numbered_against_the_final_total() {
    let artifact = compiler().compile_on(&proposal(), SCENARIO_A_FEEDBACK, date()).unwrap();
    let total = artifact.page_count();
    assert!(total >= 4);
    for page in artifact.pages() {
        assert_eq!(page.footer, Some(format!("Page {} of {}", page.number, total)));
    }
}

#[test]
fn identical_input_gives_identical_layout() {
    let first = compiler().compile_on(&proposal(), SCENARIO_A_FEEDBACK, date()).unwrap();
    let second = compiler().compile_on(&proposal(), SCENARIO_A_FEEDBACK, date()).unwrap();
    assert_eq!(first.pages(), second.pages());
}

#[tokio::test]
async fn handler_stores_artifact_and_composes_email() {
    let temp = TempDir::new().unwrap();
    let storage = Arc::new(LocalArtifactStorage::new(temp.path().join("reports")));
    let handler = CompileReportHandler::new(
        compiler(),
        Arc::new(PagedArtifactRenderer::new()),
        storage.clone(),
        EmailSender::default(),
        ExportFormat::Html,
    );

    let report = handler
        .handle(
            CompileReportCommand::new(proposal(), SCENARIO_A_FEEDBACK)
                .with_format(ExportFormat::Json)
                .generated_on(date()),
        )
        .await
        .unwrap();

    assert!(storage.exists(&report.stored.path).await.unwrap());
    let bytes = storage.read(&report.stored.path).await.unwrap();
    assert_eq!(bytes.len() as u64, report.stored.size_bytes);
    let file_name = report.stored.path.file_name().unwrap();
    assert!(file_name.starts_with("proposal_PRJ-2024-017_"));
    assert!(file_name.ends_with(".json"));

    assert_eq!(report.email.subject, "Project Proposal Feedback - PRJ-2024-017");
    assert_eq!(report.email.to_header(), "sam@example.edu, okafor@example.edu");
    assert!(report.email.html_body.contains("Good work overall"));
}
