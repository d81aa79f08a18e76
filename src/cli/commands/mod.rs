//! CLI command handlers extracted from main.rs.

#[allow(clippy::missing_errors_doc)]
pub mod call;
