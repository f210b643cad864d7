//! Cluster CRD
//!
//! Only the topology portion of the Cluster API `Cluster` is modelled: the
//! name of the ClusterClass a managed cluster is built from.

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(CustomResource, Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
#[kube(
    group = "cluster.x-k8s.io",
    version = "v1beta1",
    kind = "Cluster",
    namespaced,
    derive = "PartialEq"
)]
#[serde(rename_all = "camelCase")]
pub struct ClusterSpec {
    /// Managed topology (absent for clusters not built from a ClusterClass)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topology: Option<Topology>,

    /// Whether reconciliation of this cluster is paused
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub paused: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Topology {
    /// Name of the ClusterClass in the cluster's namespace
    pub class: String,

    /// Kubernetes version of the cluster
    #[serde(default)]
    pub version: String,
}

impl Cluster {
    /// ClusterClass name this cluster is built from, if it uses a managed topology
    pub fn topology_class(&self) -> Option<&str> {
        self.spec
            .topology
            .as_ref()
            .map(|t| t.class.as_str())
            .filter(|class| !class.is_empty())
    }
}
