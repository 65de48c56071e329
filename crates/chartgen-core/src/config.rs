//! Resolved generator configuration
//!
//! [`GeneratorConfig::resolve`] validates the raw [`HelmChartArgs`], allocates
//! the run's [`WorkingDirectory`] and fills in every default from it, in this
//! order: chart home, repository alias, helm binary, helm home, values file.
//! The values default is derived after chart home so an explicit `chartHome`
//! moves it too.

use std::path::{Component, Path, PathBuf};

use crate::args::{HelmChartArgs, ObjectMeta, non_empty};
use crate::error::{ConfigError, Result};
use crate::workdir::{CHART_HOME_DIR, HELM_HOME_DIR, WorkingDirectory};

/// Repository alias used when none is configured
pub const DEFAULT_REPO_NAME: &str = "stable";

/// Helm binary used when none is configured
pub const DEFAULT_HELM_BIN: &str = "helm";

/// File name of a chart's bundled values
pub const VALUES_FILE: &str = "values.yaml";

/// Configuration driving a single inflation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub metadata: ObjectMeta,
    pub chart_name: String,
    pub chart_version: Option<String>,
    pub chart_repo_name: String,
    pub chart_repo_url: Option<String>,
    pub chart_home: PathBuf,
    pub release_name: Option<String>,
    pub release_namespace: Option<String>,
    pub values: PathBuf,
    pub extra_args: Vec<String>,
    pub helm_bin: String,
    pub helm_home: PathBuf,
}

impl GeneratorConfig {
    /// Validate `args` and resolve it against a freshly allocated working directory
    ///
    /// An invalid chart name is rejected before any directory is created.
    pub fn resolve(args: HelmChartArgs) -> Result<(Self, WorkingDirectory)> {
        Self::resolve_under(args, &std::env::temp_dir())
    }

    /// Like [`GeneratorConfig::resolve`], allocating the working directory under `parent`
    pub fn resolve_under(args: HelmChartArgs, parent: &Path) -> Result<(Self, WorkingDirectory)> {
        validate(&args)?;
        let workdir = WorkingDirectory::new_in(parent)?;
        let config = Self::resolve_in(args, workdir.path())?;
        tracing::debug!(
            chart = %config.chart_name,
            workdir = %workdir.path().display(),
            "resolved generator configuration"
        );
        Ok((config, workdir))
    }

    /// Parse a configuration document and resolve it
    pub fn from_yaml(content: &str) -> Result<(Self, WorkingDirectory)> {
        Self::resolve(HelmChartArgs::from_yaml(content)?)
    }

    /// Resolve `args`, deriving unset paths from `root`
    pub fn resolve_in(args: HelmChartArgs, root: &Path) -> std::result::Result<Self, ConfigError> {
        let chart_name = validate(&args)?.to_string();

        let chart_home = non_empty(&args.chart_home)
            .map(PathBuf::from)
            .unwrap_or_else(|| root.join(CHART_HOME_DIR));
        let chart_repo_name = non_empty(&args.chart_repo_name)
            .unwrap_or(DEFAULT_REPO_NAME)
            .to_string();
        let helm_bin = non_empty(&args.helm_bin)
            .unwrap_or(DEFAULT_HELM_BIN)
            .to_string();
        let helm_home = non_empty(&args.helm_home)
            .map(PathBuf::from)
            .unwrap_or_else(|| root.join(HELM_HOME_DIR));
        let values = non_empty(&args.values)
            .map(PathBuf::from)
            .unwrap_or_else(|| chart_home.join(&chart_name).join(VALUES_FILE));

        Ok(Self {
            chart_version: non_empty(&args.chart_version).map(str::to_string),
            chart_repo_url: non_empty(&args.chart_repo_url).map(str::to_string),
            release_name: non_empty(&args.release_name).map(str::to_string),
            release_namespace: non_empty(&args.release_namespace).map(str::to_string),
            metadata: args.metadata,
            extra_args: args.extra_args,
            chart_name,
            chart_repo_name,
            chart_home,
            values,
            helm_bin,
            helm_home,
        })
    }

    /// Where the chart lives once it is local: `<chartHome>/<chartName>`
    ///
    /// Always below chart home, since the chart name is a single path component.
    pub fn chart_dir(&self) -> PathBuf {
        self.chart_home.join(&self.chart_name)
    }
}

/// The chart name, which must be one plain directory name
fn validate(args: &HelmChartArgs) -> std::result::Result<&str, ConfigError> {
    let name = non_empty(&args.chart_name).ok_or(ConfigError::MissingChartName)?;
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(name),
        _ => Err(ConfigError::InvalidChartName {
            name: name.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InflateError;

    #[test]
    fn test_defaults_from_root() {
        let root = Path::new("/tmp/chartgen-abc");
        let config = GeneratorConfig::resolve_in(HelmChartArgs::for_chart("nginx"), root).unwrap();

        assert_eq!(config.chart_name, "nginx");
        assert_eq!(config.chart_home, root.join("chart"));
        assert_eq!(config.chart_repo_name, "stable");
        assert_eq!(config.helm_bin, "helm");
        assert_eq!(config.helm_home, root.join(".helm"));
        assert_eq!(config.values, root.join("chart").join("nginx").join("values.yaml"));
        assert_eq!(config.chart_version, None);
        assert_eq!(config.chart_repo_url, None);
        assert_eq!(config.release_name, None);
        assert_eq!(config.release_namespace, None);
        assert!(config.extra_args.is_empty());
    }

    #[test]
    fn test_values_follow_explicit_chart_home() {
        let args = HelmChartArgs {
            chart_home: Some("/charts".to_string()),
            ..HelmChartArgs::for_chart("redis")
        };
        let config = GeneratorConfig::resolve_in(args, Path::new("/tmp/x")).unwrap();

        assert_eq!(config.chart_home, PathBuf::from("/charts"));
        assert_eq!(config.values, PathBuf::from("/charts/redis/values.yaml"));
        assert_eq!(config.chart_dir(), PathBuf::from("/charts/redis"));
    }

    #[test]
    fn test_explicit_values_are_kept() {
        let args = HelmChartArgs {
            chart_repo_name: Some("bitnami".to_string()),
            helm_bin: Some("/opt/helm3/helm".to_string()),
            helm_home: Some("/var/helm".to_string()),
            values: Some("/etc/values/prod.yaml".to_string()),
            release_namespace: Some("prod".to_string()),
            ..HelmChartArgs::for_chart("nginx")
        };
        let config = GeneratorConfig::resolve_in(args, Path::new("/tmp/x")).unwrap();

        assert_eq!(config.chart_repo_name, "bitnami");
        assert_eq!(config.helm_bin, "/opt/helm3/helm");
        assert_eq!(config.helm_home, PathBuf::from("/var/helm"));
        assert_eq!(config.values, PathBuf::from("/etc/values/prod.yaml"));
        assert_eq!(config.release_namespace.as_deref(), Some("prod"));
    }

    #[test]
    fn test_empty_strings_use_defaults() {
        let args = HelmChartArgs {
            chart_repo_name: Some(String::new()),
            helm_bin: Some(String::new()),
            chart_version: Some(String::new()),
            release_name: Some(String::new()),
            ..HelmChartArgs::for_chart("nginx")
        };
        let config = GeneratorConfig::resolve_in(args, Path::new("/tmp/x")).unwrap();

        assert_eq!(config.chart_repo_name, "stable");
        assert_eq!(config.helm_bin, "helm");
        assert_eq!(config.chart_version, None);
        assert_eq!(config.release_name, None);
    }

    #[test]
    fn test_missing_chart_name() {
        let err = GeneratorConfig::resolve_in(HelmChartArgs::default(), Path::new("/tmp/x"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::MissingChartName));

        let err = GeneratorConfig::resolve(HelmChartArgs::for_chart("")).unwrap_err();
        assert!(matches!(
            err,
            InflateError::Config(ConfigError::MissingChartName)
        ));
    }

    #[test]
    fn test_missing_chart_name_creates_no_workdir() {
        let parent = tempfile::TempDir::new().unwrap();

        for yaml in ["chartName: \"\"\n", "releaseName: web\n", "chartName: ../etc\n"] {
            let args = HelmChartArgs::from_yaml(yaml).unwrap();
            let err = GeneratorConfig::resolve_under(args, parent.path()).unwrap_err();
            assert!(matches!(err, InflateError::Config(_)), "{yaml}: {err:?}");
        }

        assert_eq!(std::fs::read_dir(parent.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_resolve_under_creates_one_workdir() {
        let parent = tempfile::TempDir::new().unwrap();

        let (config, workdir) =
            GeneratorConfig::resolve_under(HelmChartArgs::for_chart("nginx"), parent.path()).unwrap();

        let entries: Vec<_> = std::fs::read_dir(parent.path())
            .unwrap()
            .map(|e| e.unwrap().path())
            .collect();
        assert_eq!(entries, vec![workdir.path().to_path_buf()]);
        assert!(
            workdir
                .path()
                .file_name()
                .unwrap()
                .to_string_lossy()
                .starts_with("chartgen-")
        );
        assert_eq!(config.chart_home, workdir.path().join("chart"));
    }

    #[test]
    fn test_chart_name_must_stay_under_chart_home() {
        for name in ["/etc", "../x", "a/../../b", "bitnami/nginx", ".", ".."] {
            let err = GeneratorConfig::resolve_in(HelmChartArgs::for_chart(name), Path::new("/tmp/x"))
                .unwrap_err();
            match err {
                ConfigError::InvalidChartName { name: rejected } => assert_eq!(rejected, name),
                other => panic!("{name}: unexpected error {other:?}"),
            }
        }

        let config =
            GeneratorConfig::resolve_in(HelmChartArgs::for_chart("nginx-ingress"), Path::new("/charts"))
                .unwrap();
        assert_eq!(config.chart_dir(), Path::new("/charts/chart/nginx-ingress"));
    }

    #[test]
    fn test_resolve_allocates_workdir() {
        let (config, workdir) = GeneratorConfig::from_yaml("chartName: nginx\n").unwrap();

        assert!(workdir.path().is_dir());
        assert!(config.chart_home.starts_with(workdir.path()));
        assert!(config.helm_home.starts_with(workdir.path()));
        assert_eq!(
            config.values,
            config.chart_home.join("nginx").join("values.yaml")
        );
    }

    #[test]
    fn test_resolve_allocates_workdir_with_explicit_paths() {
        let (_, workdir) = GeneratorConfig::from_yaml(
            "chartName: nginx\nchartHome: /charts\nhelmHome: /helm\nvalues: /v.yaml\n",
        )
        .unwrap();
        assert!(workdir.path().is_dir());
    }

    #[test]
    fn test_from_yaml_malformed() {
        let err = GeneratorConfig::from_yaml("chartName: [nginx\n").unwrap_err();
        assert!(matches!(err, InflateError::Config(ConfigError::Malformed(_))));
    }
}
