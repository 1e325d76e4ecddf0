//! Inspections over Java syntax trees, with safe quick-fixes.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod discovery;
pub mod error;
pub mod exit;
pub mod fix;
pub mod java;
pub mod oracle;
pub mod reporting;
pub mod tree;
pub mod types;
