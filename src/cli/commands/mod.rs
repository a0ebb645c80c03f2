//! CLI command implementations

pub mod analyze;
pub mod anomalies;
pub mod completions;
pub mod filter;
pub mod init;
pub mod normality;
pub mod report;
pub mod stats;
