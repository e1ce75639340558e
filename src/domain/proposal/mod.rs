//! Proposal module - the submission data consumed by the report engine.

mod record;

pub use record::{
    text_or, BudgetItem, ProposalRecord, Stakeholder, NOT_AVAILABLE, NOT_PROVIDED,
    NO_REFERENCES,
};
