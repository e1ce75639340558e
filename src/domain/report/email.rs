//! Feedback email composition.
//!
//! Builds the message that accompanies a compiled report. Delivery is left
//! to the caller.

use serde::{Deserialize, Serialize};

use super::format::ExportFormat;
use super::html::escape_html;
use super::summary::SummaryFragment;
use crate::domain::proposal::ProposalRecord;

/// Who the email comes from and how the portal signs it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailSender {
    pub from_email: String,
    pub from_name: String,
    pub team_name: String,
}

impl EmailSender {
    /// `"Name" <address>` form for the From header.
    pub fn mailbox(&self) -> String {
        format!("\"{}\" <{}>", self.from_name, self.from_email)
    }
}

impl Default for EmailSender {
    fn default() -> Self {
        Self {
            from_email: "noreply@example.com".to_string(),
            from_name: "Student Portal".to_string(),
            team_name: "Student Project Portal Team".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailAttachment {
    pub file_name: String,
    pub content_type: String,
}

/// A composed, unsent feedback email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalEmail {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub html_body: String,
    pub attachment: EmailAttachment,
}

impl ProposalEmail {
    /// Composes the email for `record`, embedding `summary` and naming the
    /// attached artifact after the project.
    ///
    /// Recipients are the student plus the supervisor when an address is on
    /// file.
    pub fn compose(
        record: &ProposalRecord,
        summary: &SummaryFragment,
        sender: &EmailSender,
        format: ExportFormat,
    ) -> Self {
        let mut to = vec![record.student_email.trim().to_string()];
        if let Some(supervisor) = record.supervisor_email() {
            to.push(supervisor.to_string());
        }

        Self {
            from: sender.mailbox(),
            to,
            subject: format!("Project Proposal Feedback - {}", record.project_id),
            html_body: html_body(record, summary, sender),
            attachment: EmailAttachment {
                file_name: format!("Project_Proposal_{}.{}", record.project_id, format.extension()),
                content_type: format.content_type().to_string(),
            },
        }
    }

    /// Recipients joined for a single To header.
    pub fn to_header(&self) -> String {
        self.to.join(", ")
    }
}

fn html_body(record: &ProposalRecord, summary: &SummaryFragment, sender: &EmailSender) -> String {
    format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 650px; margin: 0 auto;">
  <div style="background-color: #0369A1; color: white; padding: 20px; text-align: center;">
    <h1>Project Proposal Feedback</h1>
  </div>
  <div style="padding: 20px; border: 1px solid #e5e7eb; background-color: white;">
    <p>Dear {student},</p>
    <p>Thank you for submitting your project proposal titled: <strong>"{title}"</strong> (Project ID: {project_id}).</p>
    <p>We're pleased to provide you with AI-generated feedback on your proposal. This feedback is designed to help you refine and strengthen your project plan.</p>
    <div style="margin: 20px 0; padding: 15px; background-color: #f0f9ff; border-left: 4px solid #0369A1;">
      <h3>Feedback Summary:</h3>
      {summary}
    </div>
    <p>Please find attached a document containing your complete proposal along with detailed AI feedback and recommendations.</p>
    <p>If you have any questions or need further clarification regarding the feedback, please contact your supervisor or department administrator.</p>
    <p>Best regards,<br>
    {team}</p>
  </div>
  <div style="padding: 10px; text-align: center; font-size: 12px; color: #6b7280;">
    <p>This is an automated email. Please do not reply directly to this message.</p>
  </div>
</div>
"#,
        student = escape_html(&record.student_name),
        title = escape_html(&record.project_title),
        project_id = escape_html(&record.project_id),
        summary = summary.as_str(),
        team = escape_html(&sender.team_name),
    )
}
