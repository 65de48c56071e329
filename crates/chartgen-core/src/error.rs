//! Error types for chart inflation
//!
//! Every stage of the pipeline has its own error enum; [`InflateError`] is the
//! umbrella type returned by the generator. Subprocess failures always keep the
//! literal command line and the captured stderr so the final message names what
//! was run and what it said.

use std::time::Duration;

use miette::Diagnostic;
use thiserror::Error;

/// Problems with the user-supplied generator configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Malformed generator configuration: {0}")]
    Malformed(#[from] serde_yaml::Error),

    #[error("chartName cannot be empty")]
    MissingChartName,

    #[error("chartName {name:?} must be a single directory name")]
    InvalidChartName { name: String },
}

/// Problems with the helm binary's reported version
#[derive(Error, Debug)]
pub enum VersionError {
    #[error("Could not find a version number in helm output: {output:?}")]
    Unparseable { output: String },

    #[error("This generator requires helm v3 but got v{version}")]
    UnsupportedMajor { version: String },
}

/// A single external command that could not be run to completion
#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("Failed to start command {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to run command {command} ({status}): {stderr}")]
    Failed {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("Command {command} timed out after {timeout:?}")]
    TimedOut { command: String, timeout: Duration },

    #[error("IO error while running {command}: {source}")]
    Io {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

impl ProcessError {
    /// The command line that was attempted
    pub fn command(&self) -> &str {
        match self {
            Self::Spawn { command, .. }
            | Self::Failed { command, .. }
            | Self::TimedOut { command, .. }
            | Self::Io { command, .. } => command,
        }
    }

    /// Captured standard error, empty when the process never finished
    pub fn stderr(&self) -> &str {
        match self {
            Self::Failed { stderr, .. } => stderr,
            Self::Spawn { .. } | Self::TimedOut { .. } | Self::Io { .. } => "",
        }
    }
}

/// Errors returned by the inflation pipeline
#[derive(Error, Debug, Diagnostic)]
pub enum InflateError {
    #[error(transparent)]
    #[diagnostic(
        code(chartgen::config),
        help("check the generator configuration; chartName is the only required field")
    )]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(
        code(chartgen::version),
        help("install helm v3 or point helmBin at a v3 binary")
    )]
    Version(#[from] VersionError),

    #[error(transparent)]
    #[diagnostic(code(chartgen::process))]
    Process(#[from] ProcessError),

    #[error("Failed to pull chart: {0}")]
    #[diagnostic(
        code(chartgen::fetch),
        help("check chartRepoName/chartRepoUrl and chartVersion, or place the chart under chartHome")
    )]
    Fetch(ProcessError),

    #[error("Failed to render chart: {0}")]
    #[diagnostic(code(chartgen::render))]
    Render(ProcessError),

    #[error("Failed to prepare working directory: {0}")]
    #[diagnostic(code(chartgen::workdir))]
    Workdir(#[from] std::io::Error),

    #[error("Invalid manifest in document {index}: {message}")]
    #[diagnostic(code(chartgen::manifest))]
    Manifest { index: usize, message: String },
}

impl InflateError {
    /// The underlying process error, if this failure came from running helm
    pub fn process_error(&self) -> Option<&ProcessError> {
        match self {
            Self::Process(e) | Self::Fetch(e) | Self::Render(e) => Some(e),
            _ => None,
        }
    }
}

/// Result type for inflation operations
pub type Result<T> = std::result::Result<T, InflateError>;
