//! Chartgen Core - inflate Helm charts into Kubernetes manifests
//!
//! This crate implements a manifest generator that shells out to `helm`:
//!
//! - `args`: The raw plugin configuration document
//! - `config`: Defaults resolution against a per-run working directory
//! - `version`: Rejects anything but helm v3
//! - `fetch`: Pulls the chart unless it is already local
//! - `render`: Runs `helm template` and captures the manifest stream
//! - `resources`: Splits the stream into individual objects
//!
//! ## Example
//!
//! ```rust,no_run
//! use chartgen_core::HelmChartInflationGenerator;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let generator = HelmChartInflationGenerator::from_yaml(
//!     "chartName: nginx\nchartRepoUrl: https://charts.bitnami.com/bitnami\n",
//! )?;
//! let result = generator.generate()?;
//! for resource in result.resources()? {
//!     println!("{}", resource.id());
//! }
//! # Ok(())
//! # }
//! ```

pub mod args;
pub mod config;
pub mod error;
pub mod fetch;
pub mod generator;
pub mod render;
pub mod resources;
pub mod runner;
pub mod version;
pub mod workdir;

pub use args::{HelmChartArgs, ObjectMeta};
pub use config::GeneratorConfig;
pub use error::{ConfigError, InflateError, ProcessError, Result, VersionError};
pub use fetch::{Acquisition, ensure_chart_local};
pub use generator::{HelmChartInflationGenerator, InflationResult};
pub use render::render;
pub use resources::{Resource, parse_resources};
pub use runner::{CommandInvocation, ProcessRunner, SystemRunner};
pub use version::{HelmVersion, check_helm, check_version};
pub use workdir::WorkingDirectory;
