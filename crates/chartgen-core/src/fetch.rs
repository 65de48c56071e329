//! Chart acquisition
//!
//! A chart counts as local when `<chartHome>/<chartName>` is a directory. The
//! directory's contents are trusted as-is; a partial copy left by an earlier
//! interrupted pull is reused.

use crate::config::GeneratorConfig;
use crate::error::InflateError;
use crate::runner::{CommandInvocation, ProcessRunner};

/// How the chart ended up under chart home
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acquisition {
    AlreadyLocal,
    Fetched,
}

/// Whether the chart directory already exists
pub fn is_chart_local(config: &GeneratorConfig) -> bool {
    config.chart_dir().is_dir()
}

/// Chart reference passed to `helm pull`
///
/// With a repository URL the bare chart name is used and `--repo` does the
/// addressing; otherwise the name is qualified with the repository alias.
pub fn chart_reference(config: &GeneratorConfig) -> String {
    match config.chart_repo_url {
        Some(_) => config.chart_name.clone(),
        None => format!("{}/{}", config.chart_repo_name, config.chart_name),
    }
}

/// `pull --untar --untardir <chartHome> [--version V] [--repo URL] <ref>`
pub fn pull_args(config: &GeneratorConfig) -> Vec<String> {
    let mut args = vec![
        "pull".to_string(),
        "--untar".to_string(),
        "--untardir".to_string(),
        config.chart_home.display().to_string(),
    ];
    if let Some(version) = &config.chart_version {
        args.push("--version".to_string());
        args.push(version.clone());
    }
    if let Some(url) = &config.chart_repo_url {
        args.push("--repo".to_string());
        args.push(url.clone());
    }
    args.push(chart_reference(config));
    args
}

pub fn pull_invocation(config: &GeneratorConfig) -> CommandInvocation {
    CommandInvocation::helm(config, pull_args(config))
}

/// Pull the chart unless it is already present under chart home
pub fn ensure_chart_local(
    config: &GeneratorConfig,
    runner: &dyn ProcessRunner,
) -> Result<Acquisition, InflateError> {
    if is_chart_local(config) {
        tracing::info!(
            chart = %config.chart_name,
            path = %config.chart_dir().display(),
            "using local chart"
        );
        return Ok(Acquisition::AlreadyLocal);
    }

    let invocation = pull_invocation(config);
    tracing::debug!(command = %invocation, "pulling chart");
    runner.run(&invocation).map_err(InflateError::Fetch)?;
    tracing::info!(chart = %chart_reference(config), "chart pulled");
    Ok(Acquisition::Fetched)
}
