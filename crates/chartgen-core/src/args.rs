//! Raw generator configuration as written by the user
//!
//! This is the plugin configuration document handed over by the manifest
//! pipeline, before any defaults are applied:
//!
//! ```yaml
//! apiVersion: builtin
//! kind: HelmChartInflationGenerator
//! metadata:
//!   name: nginx
//! chartName: nginx
//! chartRepoUrl: https://charts.example.com
//! releaseNamespace: prod
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::ConfigError;

/// Identity block of the plugin configuration; opaque to the generator
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, String>,
}

/// Chart inflation options
///
/// Every optional field treats an empty string the same as an absent key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct HelmChartArgs {
    /// Plugin API version (informational)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,

    /// Plugin kind (informational)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(default)]
    pub metadata: ObjectMeta,

    /// Name of the chart, required
    #[serde(default)]
    pub chart_name: Option<String>,

    /// Chart version to pull; latest when unset
    #[serde(default)]
    pub chart_version: Option<String>,

    /// Repository alias used to qualify the chart reference
    #[serde(default)]
    pub chart_repo_name: Option<String>,

    /// Repository URL; replaces the alias when set
    #[serde(default, alias = "chartRepoURL")]
    pub chart_repo_url: Option<String>,

    /// Directory holding local charts
    #[serde(default)]
    pub chart_home: Option<String>,

    /// Helm binary name or path
    #[serde(default)]
    pub helm_bin: Option<String>,

    /// Root of helm's config/cache/data directories
    #[serde(default)]
    pub helm_home: Option<String>,

    #[serde(default)]
    pub release_name: Option<String>,

    #[serde(default)]
    pub release_namespace: Option<String>,

    /// Values file passed to `helm template`
    #[serde(default)]
    pub values: Option<String>,

    /// Passed verbatim to `helm template`
    #[serde(default, alias = "chartArgs")]
    pub extra_args: Vec<String>,
}

impl HelmChartArgs {
    /// Parse a configuration document
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Minimal configuration for a chart name
    pub fn for_chart(chart_name: impl Into<String>) -> Self {
        Self {
            chart_name: Some(chart_name.into()),
            ..Default::default()
        }
    }
}

/// `Some(value)` only for non-empty strings
pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let args = HelmChartArgs::from_yaml(
            r#"
apiVersion: builtin
kind: HelmChartInflationGenerator
metadata:
  name: nginx-gen
  labels:
    team: web
chartName: nginx
chartVersion: 1.2.3
chartRepoName: bitnami
chartRepoUrl: https://charts.example.com
chartHome: /charts
helmBin: /usr/local/bin/helm
helmHome: /tmp/helm
releaseName: web
releaseNamespace: prod
values: /charts/nginx/prod-values.yaml
extraArgs:
  - --include-crds
  - --kube-version=1.29
"#,
        )
        .unwrap();

        assert_eq!(args.kind.as_deref(), Some("HelmChartInflationGenerator"));
        assert_eq!(args.metadata.name.as_deref(), Some("nginx-gen"));
        assert_eq!(args.metadata.labels["team"], "web");
        assert_eq!(args.chart_name.as_deref(), Some("nginx"));
        assert_eq!(args.chart_version.as_deref(), Some("1.2.3"));
        assert_eq!(args.chart_repo_name.as_deref(), Some("bitnami"));
        assert_eq!(
            args.chart_repo_url.as_deref(),
            Some("https://charts.example.com")
        );
        assert_eq!(args.chart_home.as_deref(), Some("/charts"));
        assert_eq!(args.helm_bin.as_deref(), Some("/usr/local/bin/helm"));
        assert_eq!(args.helm_home.as_deref(), Some("/tmp/helm"));
        assert_eq!(args.release_name.as_deref(), Some("web"));
        assert_eq!(args.release_namespace.as_deref(), Some("prod"));
        assert_eq!(args.extra_args, vec!["--include-crds", "--kube-version=1.29"]);
    }

    #[test]
    fn test_parse_aliases() {
        let args = HelmChartArgs::from_yaml(
            r#"
chartName: nginx
chartRepoURL: https://charts.example.com
chartArgs: ["--skip-tests"]
"#,
        )
        .unwrap();

        assert_eq!(
            args.chart_repo_url.as_deref(),
            Some("https://charts.example.com")
        );
        assert_eq!(args.extra_args, vec!["--skip-tests"]);
    }

    #[test]
    fn test_null_fields_are_unset() {
        let args = HelmChartArgs::from_yaml("chartName: nginx\nchartVersion:\n").unwrap();
        assert_eq!(args.chart_version, None);
    }

    #[test]
    fn test_unknown_field_is_malformed() {
        let err = HelmChartArgs::from_yaml("chartname: nginx\n").unwrap_err();
        assert!(matches!(err, ConfigError::Malformed(_)));
        assert!(err.to_string().contains("chartname"));
    }

    #[test]
    fn test_wrong_shape_is_malformed() {
        let err = HelmChartArgs::from_yaml("- nginx\n- redis\n").unwrap_err();
        assert!(matches!(err, ConfigError::Malformed(_)));

        let err = HelmChartArgs::from_yaml("chartName: nginx\nextraArgs: --debug\n").unwrap_err();
        assert!(matches!(err, ConfigError::Malformed(_)));
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(&None), None);
        assert_eq!(non_empty(&Some(String::new())), None);
        assert_eq!(non_empty(&Some("prod".to_string())), Some("prod"));
    }
}
