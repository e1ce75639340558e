//! Proposal record - the structured submission handed to the engine.
//!
//! The submission layer has already checked required-field presence and word
//! limits. The engine only substitutes placeholders for optional fields and
//! recomputes derived values such as the budget total.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{round_amount, ValidationError};

/// Placeholder for a missing optional identification field.
pub const NOT_AVAILABLE: &str = "N/A";

/// Placeholder for a missing optional narrative field.
pub const NOT_PROVIDED: &str = "Not provided";

/// Placeholder used when an empty references section is rendered.
pub const NO_REFERENCES: &str = "No references provided.";

/// One line of a proposal's cost breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetItem {
    pub description: String,
    pub cost: Decimal,
    #[serde(default)]
    pub justification: String,
}

impl BudgetItem {
    /// Creates a budget item, rejecting negative costs.
    pub fn new(
        description: impl Into<String>,
        cost: Decimal,
        justification: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        if cost.is_sign_negative() && !cost.is_zero() {
            return Err(ValidationError::negative_amount("cost", cost));
        }
        Ok(Self {
            description: description.into(),
            cost,
            justification: justification.into(),
        })
    }
}

/// A person or organisation with an interest in the project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stakeholder {
    pub name: String,
    /// Either one of the form's suggested roles or free text.
    pub role: String,
}

impl Stakeholder {
    pub fn new(name: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: role.into(),
        }
    }
}

/// The structured submission data for one student project proposal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProposalRecord {
    // Identification
    pub project_id: String,
    pub student_name: String,
    /// Student or team identifiers, as submitted.
    pub student_id: String,
    pub sap_code: String,
    pub college_name: String,
    pub student_email: String,
    pub course: Option<String>,
    pub supervisor_name: Option<String>,
    pub supervisor_email: Option<String>,

    // Narrative
    pub project_title: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub introduction: String,
    pub objectives: String,
    pub methodology: String,
    pub timeline: String,
    pub outcomes: String,
    pub references: String,

    // Budget and stakeholders, in submission order
    pub budget_items: Vec<BudgetItem>,
    /// Total as claimed by the submitter. Never rendered; see [`ProposalRecord::budget_total`].
    #[serde(rename = "budget_total")]
    pub declared_budget_total: Option<Decimal>,
    pub stakeholders: Vec<Stakeholder>,
}

impl ProposalRecord {
    /// Sum of all item costs, each rounded to the cent, recomputed on every call.
    pub fn budget_total(&self) -> Decimal {
        self.budget_items.iter().map(|item| round_amount(item.cost)).sum()
    }

    /// Returns true when the submitter's declared total disagrees with the
    /// recomputed sum.
    pub fn has_total_mismatch(&self) -> bool {
        self.declared_budget_total
            .map(|declared| declared != self.budget_total())
            .unwrap_or(false)
    }

    /// Checks the invariants the layout relies on.
    pub fn check_budget(&self) -> Result<(), ValidationError> {
        for (index, item) in self.budget_items.iter().enumerate() {
            if item.cost.is_sign_negative() && !item.cost.is_zero() {
                return Err(ValidationError::negative_amount(
                    format!("budget_items[{}].cost", index),
                    item.cost,
                ));
            }
        }
        Ok(())
    }

    /// Course, or `N/A`.
    pub fn course_or_default(&self) -> &str {
        optional_or(&self.course, NOT_AVAILABLE)
    }

    /// Supervisor name, or `N/A`.
    pub fn supervisor_name_or_default(&self) -> &str {
        optional_or(&self.supervisor_name, NOT_AVAILABLE)
    }

    /// Supervisor email, or `N/A`.
    pub fn supervisor_email_or_default(&self) -> &str {
        optional_or(&self.supervisor_email, NOT_AVAILABLE)
    }

    /// Timeline, or `Not provided`.
    pub fn timeline_or_default(&self) -> &str {
        text_or(&self.timeline, NOT_PROVIDED)
    }

    /// References trimmed, or `None` when blank.
    pub fn references_text(&self) -> Option<&str> {
        let trimmed = self.references.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }

    /// Supervisor email only when it holds an address.
    pub fn supervisor_email(&self) -> Option<&str> {
        self.supervisor_email
            .as_deref()
            .map(str::trim)
            .filter(|email| !email.is_empty())
    }
}

/// Returns `value` unless it is blank, in which case `fallback`.
pub fn text_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.trim().is_empty() {
        fallback
    } else {
        value
    }
}

fn optional_or<'a>(value: &'a Option<String>, fallback: &'a str) -> &'a str {
    value
        .as_deref()
        .map(|v| text_or(v, fallback))
        .unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn item(cost: &str) -> BudgetItem {
        BudgetItem::new("Item", dec(cost), "Needed").unwrap()
    }

    #[test]
    fn budget_total_is_recomputed_from_items() {
        let record = ProposalRecord {
            budget_items: vec![item("10.25"), item("4.75"), item("100")],
            declared_budget_total: Some(dec("999")),
            ..Default::default()
        };
        assert_eq!(record.budget_total(), dec("115.00"));
        assert!(record.has_total_mismatch());
    }

    #[test]
    fn budget_total_sums_cent_rounded_costs() {
        let record = ProposalRecord {
            budget_items: vec![item("0.005"), item("0.005"), item("1.234")],
            ..Default::default()
        };
        assert_eq!(record.budget_total(), dec("1.25"));
    }

    #[test]
    fn matching_declared_total_is_not_a_mismatch() {
        let record = ProposalRecord {
            budget_items: vec![item("10"), item("5")],
            declared_budget_total: Some(dec("15.00")),
            ..Default::default()
        };
        assert!(!record.has_total_mismatch());
    }

    #[test]
    fn empty_budget_totals_zero() {
        assert_eq!(ProposalRecord::default().budget_total(), Decimal::ZERO);
    }

    #[test]
    fn budget_item_rejects_negative_cost() {
        let result = BudgetItem::new("Refund", dec("-1"), "");
        assert!(matches!(result, Err(ValidationError::NegativeAmount { .. })));
        assert!(BudgetItem::new("Free", Decimal::ZERO, "").is_ok());
    }

    #[test]
    fn check_budget_reports_offending_index() {
        let record = ProposalRecord {
            budget_items: vec![
                item("1"),
                BudgetItem {
                    description: "Bad".into(),
                    cost: dec("-2"),
                    justification: String::new(),
                },
            ],
            ..Default::default()
        };
        let err = record.check_budget().unwrap_err();
        assert!(err.to_string().contains("budget_items[1].cost"));
    }

    #[test]
    fn optional_fields_fall_back_to_placeholders() {
        let record = ProposalRecord {
            course: Some("   ".into()),
            supervisor_name: None,
            ..Default::default()
        };
        assert_eq!(record.course_or_default(), "N/A");
        assert_eq!(record.supervisor_name_or_default(), "N/A");
        assert_eq!(record.supervisor_email_or_default(), "N/A");
        assert_eq!(record.timeline_or_default(), "Not provided");
        assert_eq!(record.references_text(), None);
        assert_eq!(record.supervisor_email(), None);
    }

    #[test]
    fn deserializes_submission_json() {
        let json = r#"{
            "project_id": "PROJ-42",
            "student_name": "A. Student",
            "abstract": "Short abstract",
            "budget_items": [
                {"description": "Sensors", "cost": "12.5", "justification": "Data"}
            ],
            "budget_total": "12.50",
            "stakeholders": [{"name": "Lab", "role": "Sponsor"}]
        }"#;
        let record: ProposalRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.project_id, "PROJ-42");
        assert_eq!(record.abstract_text, "Short abstract");
        assert_eq!(record.budget_items[0].cost, dec("12.5"));
        assert_eq!(record.stakeholders[0].role, "Sponsor");
        assert!(!record.has_total_mismatch());
    }
}
