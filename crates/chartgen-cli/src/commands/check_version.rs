//! Check-version command - run only the helm version gate

use chartgen_core::{SystemRunner, WorkingDirectory, check_helm};
use console::style;

use crate::error::{CliError, Result};

pub fn run(helm_bin: &str) -> Result<()> {
    let workdir = WorkingDirectory::new()
        .map_err(|e| CliError::io("Failed to create working directory", e))?;

    let version = check_helm(helm_bin, &workdir.helm_home(), &SystemRunner::new())?;

    println!(
        "{} {} {}",
        style("✓").green().bold(),
        helm_bin,
        style(version).cyan()
    );
    Ok(())
}
