//! Proposal Report - Compiles student project proposals into reviewable reports
//!
//! This crate turns a structured proposal plus free-form AI feedback into a
//! paginated document artifact and an HTML summary for the feedback email.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
