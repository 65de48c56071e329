//! The chart inflation pipeline
//!
//! [`HelmChartInflationGenerator::generate`] runs three steps in order, each
//! aborting the run on failure:
//!
//! 1. check that helm is v3
//! 2. pull the chart unless it is already under chart home
//! 3. `helm template` the chart and capture the manifest stream
//!
//! The run's working directory is removed afterwards on every path, including
//! panics (the directory is dropped during unwinding).

use std::path::Path;

use crate::args::HelmChartArgs;
use crate::config::GeneratorConfig;
use crate::error::Result;
use crate::fetch::{Acquisition, ensure_chart_local};
use crate::render::render;
use crate::resources::{Resource, parse_resources};
use crate::runner::{ProcessRunner, SystemRunner};
use crate::version::{HelmVersion, check_version};
use crate::workdir::WorkingDirectory;

/// Output of a successful run
#[derive(Debug, Clone)]
pub struct InflationResult {
    /// Raw `helm template` output, a multi-document YAML stream
    pub manifest: Vec<u8>,
    pub helm_version: HelmVersion,
    pub acquisition: Acquisition,
}

impl InflationResult {
    /// Split the manifest into individual resources
    pub fn resources(&self) -> Result<Vec<Resource>> {
        parse_resources(&self.manifest)
    }

    /// The raw manifest stream
    pub fn into_bytes(self) -> Vec<u8> {
        self.manifest
    }
}

/// Generates Kubernetes resources from a helm chart
pub struct HelmChartInflationGenerator {
    config: GeneratorConfig,
    workdir: WorkingDirectory,
    runner: Box<dyn ProcessRunner>,
}

impl HelmChartInflationGenerator {
    /// Resolve `args` and run helm as a child process
    pub fn new(args: HelmChartArgs) -> Result<Self> {
        let (config, workdir) = GeneratorConfig::resolve(args)?;
        Ok(Self {
            config,
            workdir,
            runner: Box::new(SystemRunner::new()),
        })
    }

    /// Parse and resolve a plugin configuration document
    pub fn from_yaml(content: &str) -> Result<Self> {
        Self::new(HelmChartArgs::from_yaml(content)?)
    }

    /// Replace the process runner
    pub fn with_runner(mut self, runner: impl ProcessRunner + 'static) -> Self {
        self.runner = Box::new(runner);
        self
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Root of this run's working directory
    pub fn workdir(&self) -> &Path {
        self.workdir.path()
    }

    /// Run the pipeline and release the working directory
    pub fn generate(self) -> Result<InflationResult> {
        let Self {
            config,
            workdir,
            runner,
        } = self;

        let result = run_pipeline(&config, &*runner);

        let root = workdir.path().to_path_buf();
        if let Err(e) = workdir.close() {
            tracing::warn!(
                path = %root.display(),
                error = %e,
                "failed to remove working directory"
            );
        }

        result
    }
}

fn run_pipeline(config: &GeneratorConfig, runner: &dyn ProcessRunner) -> Result<InflationResult> {
    let helm_version = check_version(config, runner)?;
    let acquisition = ensure_chart_local(config, runner)?;
    let manifest = render(config, runner)?;
    Ok(InflationResult {
        manifest,
        helm_version,
        acquisition,
    })
}
