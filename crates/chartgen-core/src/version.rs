//! Helm version gate
//!
//! The pull/template command lines differ incompatibly between helm major
//! versions, so anything other than v3 is rejected before a chart is touched.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::path::Path;

use crate::config::GeneratorConfig;
use crate::error::{InflateError, VersionError};
use crate::runner::{CommandInvocation, ProcessRunner, helm_env};

/// The only helm major version whose CLI this generator speaks
pub const SUPPORTED_MAJOR: &str = "3";

static VERSION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"v\d+(\.\d+)+").expect("version pattern is valid"));

/// Version reported by `helm version`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelmVersion {
    /// Dotted version without the `v` prefix, e.g. `3.14.2`
    pub version: String,
    pub major: String,
}

impl HelmVersion {
    pub fn is_supported(&self) -> bool {
        self.major == SUPPORTED_MAJOR
    }
}

impl fmt::Display for HelmVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.version)
    }
}

/// `helm version -c --short`
pub fn version_invocation(helm_bin: &str, helm_home: &Path) -> CommandInvocation {
    CommandInvocation {
        program: helm_bin.to_string(),
        args: vec!["version".into(), "-c".into(), "--short".into()],
        env: helm_env(helm_home),
    }
}

/// Find the first `v<major>.<minor>...` token in helm's output
pub fn parse_version(output: &[u8]) -> Result<HelmVersion, VersionError> {
    let text = String::from_utf8_lossy(output);
    let unparseable = || VersionError::Unparseable {
        output: text.trim().to_string(),
    };

    let found = VERSION_RE.find(&text).ok_or_else(unparseable)?;
    let version = found
        .as_str()
        .strip_prefix('v')
        .filter(|v| !v.is_empty())
        .ok_or_else(unparseable)?;
    let major = version.split('.').next().unwrap_or_default();

    Ok(HelmVersion {
        version: version.to_string(),
        major: major.to_string(),
    })
}

/// Run `helm version` and fail unless it reports major version 3
pub fn check_version(
    config: &GeneratorConfig,
    runner: &dyn ProcessRunner,
) -> Result<HelmVersion, InflateError> {
    check_helm(&config.helm_bin, &config.helm_home, runner)
}

/// Version gate for a helm binary outside of a generator run
pub fn check_helm(
    helm_bin: &str,
    helm_home: &Path,
    runner: &dyn ProcessRunner,
) -> Result<HelmVersion, InflateError> {
    let stdout = runner.run(&version_invocation(helm_bin, helm_home))?;
    let version = parse_version(&stdout)?;
    if !version.is_supported() {
        return Err(VersionError::UnsupportedMajor {
            version: version.version,
        }
        .into());
    }
    tracing::info!(helm = %version, "helm version accepted");
    Ok(version)
}
