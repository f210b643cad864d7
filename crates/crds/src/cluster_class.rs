//! ClusterClass CRD
//!
//! Reusable template describing the shape of a cluster by reference: its
//! infrastructure, control plane, and worker machine deployment classes.

use crate::references::{LocalObjectTemplate, TemplateReference};
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(CustomResource, Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
#[kube(
    group = "cluster.x-k8s.io",
    version = "v1beta1",
    kind = "ClusterClass",
    plural = "clusterclasses",
    namespaced,
    derive = "PartialEq"
)]
#[serde(rename_all = "camelCase")]
pub struct ClusterClassSpec {
    /// Reference to the InfrastructureClusterTemplate
    #[serde(default)]
    pub infrastructure: LocalObjectTemplate,

    /// Control plane template and its optional machine infrastructure
    #[serde(default)]
    pub control_plane: ControlPlaneClass,

    /// Worker machine deployment classes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workers: Option<WorkersClass>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ControlPlaneClass {
    /// Reference to the ControlPlaneTemplate
    #[serde(rename = "ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<TemplateReference>,

    /// InfrastructureMachineTemplate for control plane machines (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub machine_infrastructure: Option<LocalObjectTemplate>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WorkersClass {
    /// Ordered machine deployment classes
    #[serde(default)]
    pub machine_deployments: Vec<MachineDeploymentClass>,
}

/// One worker flavor a cluster built from the class can instantiate.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MachineDeploymentClass {
    /// Class name, unique within the ClusterClass
    pub class: String,

    pub template: MachineDeploymentClassTemplate,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MachineDeploymentClassTemplate {
    /// Labels and annotations applied to machine deployments of this class
    #[serde(default)]
    pub metadata: TemplateMetadata,

    /// Reference to the BootstrapTemplate
    #[serde(default)]
    pub bootstrap: LocalObjectTemplate,

    /// Reference to the InfrastructureMachineTemplate
    #[serde(default)]
    pub infrastructure: LocalObjectTemplate,
}

/// Subset of object metadata a class may stamp onto generated objects.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TemplateMetadata {
    /// Labels
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,

    /// Annotations
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, String>,
}

impl ClusterClassSpec {
    /// Worker classes in declaration order (empty when no workers are declared)
    pub fn machine_deployment_classes(&self) -> &[MachineDeploymentClass] {
        self.workers
            .as_ref()
            .map(|w| w.machine_deployments.as_slice())
            .unwrap_or_default()
    }

    /// Reference to the control plane InfrastructureMachineTemplate, if any
    pub fn control_plane_machine_infrastructure(&self) -> Option<&TemplateReference> {
        self.control_plane
            .machine_infrastructure
            .as_ref()
            .and_then(|m| m.reference.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_cluster_class_spec() {
        let spec: ClusterClassSpec = serde_json::from_value(serde_json::json!({
            "infrastructure": {
                "ref": {
                    "apiVersion": "infrastructure.cluster.x-k8s.io/v1beta1",
                    "kind": "DockerClusterTemplate",
                    "name": "quick-start-cluster"
                }
            },
            "controlPlane": {
                "ref": {
                    "apiVersion": "controlplane.cluster.x-k8s.io/v1beta1",
                    "kind": "KubeadmControlPlaneTemplate",
                    "name": "quick-start-control-plane"
                },
                "machineInfrastructure": {
                    "ref": {
                        "apiVersion": "infrastructure.cluster.x-k8s.io/v1beta1",
                        "kind": "DockerMachineTemplate",
                        "name": "quick-start-control-plane"
                    }
                }
            },
            "workers": {
                "machineDeployments": [{
                    "class": "default-worker",
                    "template": {
                        "metadata": { "labels": { "foo": "bar" } },
                        "bootstrap": {
                            "ref": {
                                "apiVersion": "bootstrap.cluster.x-k8s.io/v1beta1",
                                "kind": "KubeadmConfigTemplate",
                                "name": "quick-start-default-worker-bootstraptemplate"
                            }
                        },
                        "infrastructure": {
                            "ref": {
                                "apiVersion": "infrastructure.cluster.x-k8s.io/v1beta1",
                                "kind": "DockerMachineTemplate",
                                "name": "quick-start-default-worker-machinetemplate"
                            }
                        }
                    }
                }]
            }
        }))
        .unwrap();

        assert_eq!(spec.infrastructure.reference.as_ref().unwrap().kind, "DockerClusterTemplate");
        assert_eq!(
            spec.control_plane_machine_infrastructure().unwrap().name,
            "quick-start-control-plane"
        );
        let workers = spec.machine_deployment_classes();
        assert_eq!(workers.len(), 1);
        assert_eq!(workers[0].class, "default-worker");
        assert_eq!(workers[0].template.metadata.labels.get("foo").map(String::as_str), Some("bar"));
        assert!(workers[0].template.metadata.annotations.is_empty());
    }

    #[test]
    fn test_empty_spec_has_no_references() {
        let spec: ClusterClassSpec = serde_json::from_str("{}").unwrap();
        assert!(spec.infrastructure.reference.is_none());
        assert!(spec.control_plane.reference.is_none());
        assert!(spec.control_plane_machine_infrastructure().is_none());
        assert!(spec.machine_deployment_classes().is_empty());
    }
}
