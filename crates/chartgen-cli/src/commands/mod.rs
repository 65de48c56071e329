//! CLI command implementations

pub mod check_version;
pub mod generate;
