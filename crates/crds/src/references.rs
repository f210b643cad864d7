//! Template object references for ClusterClass CRDs
//!
//! Provides Kubernetes-style object references pointing at the templates a
//! ClusterClass is assembled from. Follows the Kubernetes `ObjectReference`
//! shape with apiVersion, kind, name, and optional namespace.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reference to a template object (InfrastructureClusterTemplate, ControlPlaneTemplate, ...)
///
/// - `apiVersion`: API group and version of the referenced template (e.g., "infrastructure.cluster.x-k8s.io/v1beta1")
/// - `kind`: Kind of the referenced template (e.g., "DockerClusterTemplate")
/// - `name`: Name of the referenced template (required)
/// - `namespace`: Namespace of the referenced template (optional, defaults to the ClusterClass namespace)
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct TemplateReference {
    /// API version of the referenced template
    pub api_version: String,

    /// Kind of the referenced template
    pub kind: String,

    /// Name of the referenced template
    pub name: String,

    /// Namespace of the referenced template (defaults to same namespace as the ClusterClass)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

impl TemplateReference {
    /// Create a new reference with apiVersion, kind, and name (same namespace)
    pub fn new(api_version: impl Into<String>, kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            api_version: api_version.into(),
            kind: kind.into(),
            name: name.into(),
            namespace: None,
        }
    }

    /// Set an explicit namespace on the reference
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Namespace the reference points into, falling back to `default_namespace`
    pub fn namespace_or<'a>(&'a self, default_namespace: &'a str) -> &'a str {
        match self.namespace.as_deref() {
            Some(ns) if !ns.is_empty() => ns,
            _ => default_namespace,
        }
    }
}

impl fmt::Display for TemplateReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.namespace.as_deref() {
            Some(ns) => write!(f, "{} {}/{} ({})", self.kind, ns, self.name, self.api_version),
            None => write!(f, "{} {} ({})", self.kind, self.name, self.api_version),
        }
    }
}

/// A template slot that may or may not carry a reference.
///
/// Mirrors Cluster API's `LocalObjectTemplate`. The reference is optional at
/// the type level so an unset slot is distinguishable from a dangling one.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct LocalObjectTemplate {
    /// Reference to the template object
    #[serde(rename = "ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<TemplateReference>,
}

impl LocalObjectTemplate {
    /// Template slot pointing at `reference`
    pub fn referencing(reference: TemplateReference) -> Self {
        Self { reference: Some(reference) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespace_falls_back_to_default() {
        let reference = TemplateReference::new("infrastructure.cluster.x-k8s.io/v1beta1", "DockerClusterTemplate", "t1");
        assert_eq!(reference.namespace_or("default"), "default");

        let reference = reference.with_namespace("capi-system");
        assert_eq!(reference.namespace_or("default"), "capi-system");
    }

    #[test]
    fn test_empty_namespace_treated_as_unset() {
        let reference = TemplateReference::new("v1", "Kind", "n").with_namespace("");
        assert_eq!(reference.namespace_or("fallback"), "fallback");
    }

    #[test]
    fn test_local_object_template_uses_ref_key() {
        let slot = LocalObjectTemplate::referencing(
            TemplateReference::new("controlplane.cluster.x-k8s.io/v1beta1", "KubeadmControlPlaneTemplate", "cp"),
        );
        let json = serde_json::to_value(&slot).unwrap();
        assert_eq!(json["ref"]["kind"], "KubeadmControlPlaneTemplate");
        assert_eq!(json["ref"]["apiVersion"], "controlplane.cluster.x-k8s.io/v1beta1");
        assert!(json["ref"].get("namespace").is_none());

        let unset: LocalObjectTemplate = serde_json::from_str("{}").unwrap();
        assert!(unset.reference.is_none());
    }
}
