//! Chart rendering via `helm template`

use crate::config::GeneratorConfig;
use crate::error::InflateError;
use crate::runner::{CommandInvocation, ProcessRunner};

/// `template [release] <chartDir> [--namespace NS] [--values PATH] [extra...]`
///
/// Extra arguments are appended verbatim.
pub fn template_args(config: &GeneratorConfig) -> Vec<String> {
    let mut args = vec!["template".to_string()];
    if let Some(release) = &config.release_name {
        args.push(release.clone());
    }
    args.push(config.chart_dir().display().to_string());
    if let Some(namespace) = &config.release_namespace {
        args.push("--namespace".to_string());
        args.push(namespace.clone());
    }
    if !config.values.as_os_str().is_empty() {
        args.push("--values".to_string());
        args.push(config.values.display().to_string());
    }
    args.extend(config.extra_args.iter().cloned());
    args
}

pub fn template_invocation(config: &GeneratorConfig) -> CommandInvocation {
    CommandInvocation::helm(config, template_args(config))
}

/// Render the local chart and return helm's stdout
pub fn render(config: &GeneratorConfig, runner: &dyn ProcessRunner) -> Result<Vec<u8>, InflateError> {
    let invocation = template_invocation(config);
    tracing::debug!(command = %invocation, "rendering chart");
    let manifest = runner.run(&invocation).map_err(InflateError::Render)?;
    tracing::info!(
        chart = %config.chart_name,
        bytes = manifest.len(),
        "chart rendered"
    );
    Ok(manifest)
}
