//! Generate command - inflate a chart described by a generator config

use std::io::{Read, Write};
use std::path::Path;
use std::time::Duration;

use chartgen_core::{HelmChartInflationGenerator, Resource, SystemRunner};
use console::style;

use crate::error::{CliError, Result};

pub fn run(
    config_path: &Path,
    output: Option<&Path>,
    timeout: Option<u64>,
    summary: bool,
) -> Result<()> {
    let content = read_config(config_path)?;

    let mut runner = SystemRunner::new();
    if let Some(secs) = timeout {
        runner = runner.with_timeout(Duration::from_secs(secs));
    }

    let generator = HelmChartInflationGenerator::from_yaml(&content)?.with_runner(runner);
    tracing::debug!(
        chart = %generator.config().chart_name,
        workdir = %generator.workdir().display(),
        "starting inflation"
    );

    let result = generator.generate()?;
    let resources = result.resources()?;

    if summary {
        print_summary(&resources);
        return Ok(());
    }

    let manifest = result.into_bytes();
    match output {
        Some(path) => std::fs::write(path, &manifest)
            .map_err(|e| CliError::io(format!("Failed to write {}", path.display()), e))?,
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(&manifest)
                .and_then(|_| stdout.flush())
                .map_err(|e| CliError::io("Failed to write manifest to stdout", e))?;
        }
    }

    Ok(())
}

/// Read the generator config from a file, or stdin for `-`
fn read_config(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .map_err(|e| CliError::io("Failed to read config from stdin", e))?;
        return Ok(content);
    }

    std::fs::read_to_string(path)
        .map_err(|e| CliError::io(format!("Failed to read config {}", path.display()), e))
}

fn print_summary(resources: &[Resource]) {
    println!(
        "{} {} resource(s)",
        style("Rendered").green().bold(),
        resources.len()
    );
    for resource in resources {
        let namespace = resource
            .namespace
            .as_deref()
            .map(|ns| format!(" ({})", ns))
            .unwrap_or_default();
        println!(
            "  {} {}{}",
            style(&resource.api_version).dim(),
            resource.id(),
            style(namespace).dim()
        );
    }
}
