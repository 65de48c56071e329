//! Splitting rendered output into resources

use serde::Deserialize;
use serde_yaml::Value;

use crate::error::InflateError;

/// One Kubernetes object from the rendered stream
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    pub api_version: String,
    pub kind: String,
    pub name: Option<String>,
    pub namespace: Option<String>,
    /// The complete document
    pub value: Value,
}

impl Resource {
    /// `Kind/name`, or just `Kind` for unnamed objects
    pub fn id(&self) -> String {
        match &self.name {
            Some(name) => format!("{}/{}", self.kind, name),
            None => self.kind.clone(),
        }
    }

    fn from_value(index: usize, value: Value) -> Result<Self, InflateError> {
        let invalid = |message: &str| InflateError::Manifest {
            index,
            message: message.to_string(),
        };

        if !value.is_mapping() {
            return Err(invalid("document is not a mapping"));
        }

        let api_version = value
            .get("apiVersion")
            .and_then(Value::as_str)
            .ok_or_else(|| invalid("missing apiVersion"))?
            .to_string();
        let kind = value
            .get("kind")
            .and_then(Value::as_str)
            .ok_or_else(|| invalid("missing kind"))?
            .to_string();

        let metadata = value.get("metadata");
        let field = |key: &str| {
            metadata
                .and_then(|m| m.get(key))
                .and_then(Value::as_str)
                .map(str::to_string)
        };
        let name = field("name");
        let namespace = field("namespace");

        Ok(Self {
            api_version,
            kind,
            name,
            namespace,
            value,
        })
    }
}

/// Parse a multi-document YAML stream
///
/// Empty and comment-only documents are skipped. Every other document must be
/// a mapping with `apiVersion` and `kind`. Document indexes in errors count
/// from zero over the whole stream.
pub fn parse_resources(manifest: &[u8]) -> Result<Vec<Resource>, InflateError> {
    let mut resources = Vec::new();

    for (index, document) in serde_yaml::Deserializer::from_slice(manifest).enumerate() {
        let value = Value::deserialize(document).map_err(|e| InflateError::Manifest {
            index,
            message: e.to_string(),
        })?;
        if value.is_null() {
            continue;
        }
        resources.push(Resource::from_value(index, value)?);
    }

    Ok(resources)
}
