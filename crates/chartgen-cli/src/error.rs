//! CLI error types with exit code handling
//!
//! This module provides a unified error type for CLI operations that
//! maps errors to appropriate exit codes.

use chartgen_core::InflateError;
use miette::Diagnostic;
use thiserror::Error;

use crate::exit_codes;

/// CLI-specific error type that includes exit code information
#[derive(Error, Debug, Diagnostic)]
pub enum CliError {
    /// Failure inside the inflation pipeline
    #[error(transparent)]
    #[diagnostic(transparent)]
    Inflate(#[from] InflateError),

    /// IO error (config file not found, output not writable, etc.)
    #[error("IO error: {message}")]
    #[diagnostic(code(chartgen::cli::io))]
    Io { message: String },
}

impl CliError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Inflate(e) => match e {
                InflateError::Config(_) => exit_codes::CONFIG_ERROR,
                InflateError::Version(_) => exit_codes::VERSION_ERROR,
                InflateError::Process(_) => exit_codes::ERROR,
                InflateError::Fetch(_) => exit_codes::FETCH_ERROR,
                InflateError::Render(_) => exit_codes::RENDER_ERROR,
                InflateError::Workdir(_) => exit_codes::IO_ERROR,
                InflateError::Manifest { .. } => exit_codes::MANIFEST_ERROR,
            },
            CliError::Io { .. } => exit_codes::IO_ERROR,
        }
    }

    /// Create an IO error with context
    pub fn io(context: impl std::fmt::Display, err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{}: {}", context, err),
        }
    }
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
