//! Resolved ClusterClass blueprint.
//!
//! A blueprint is the ClusterClass together with every template it
//! references, fetched at resolution time. It is built in one go by the
//! resolver and handed out by value; nothing in it is optional unless the
//! ClusterClass slot it mirrors is optional.

use crds::{ClusterClass, TemplateMetadata};
use kube::api::DynamicObject;
use serde::Serialize;
use std::collections::BTreeMap;

/// Fully resolved ClusterClass.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterBlueprint {
    /// The ClusterClass the blueprint was resolved from
    pub cluster_class: ClusterClass,

    /// Template referenced by `spec.infrastructure.ref`
    pub infrastructure_cluster_template: DynamicObject,

    /// Control plane templates
    pub control_plane: ControlPlaneBlueprint,

    /// Worker classes keyed by class name
    pub machine_deployments: BTreeMap<String, MachineDeploymentBlueprint>,
}

/// Control plane part of a blueprint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlPlaneBlueprint {
    /// Template referenced by `spec.controlPlane.ref`
    pub template: DynamicObject,

    /// Template referenced by `spec.controlPlane.machineInfrastructure.ref`, when set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub infrastructure_machine_template: Option<DynamicObject>,
}

/// One resolved worker class.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MachineDeploymentBlueprint {
    /// Labels and annotations declared on the worker class
    pub metadata: TemplateMetadata,

    /// Template referenced by `template.infrastructure.ref`
    pub infrastructure_machine_template: DynamicObject,

    /// Template referenced by `template.bootstrap.ref`
    pub bootstrap_template: DynamicObject,
}

impl ClusterBlueprint {
    /// Whether control plane machines get an InfrastructureMachineTemplate
    pub fn has_control_plane_infrastructure_machine(&self) -> bool {
        self.control_plane.infrastructure_machine_template.is_some()
    }

    /// Resolved worker class by name
    pub fn machine_deployment(&self, class: &str) -> Option<&MachineDeploymentBlueprint> {
        self.machine_deployments.get(class)
    }

    /// Names of all resolved worker classes, sorted
    pub fn machine_deployment_classes(&self) -> impl Iterator<Item = &str> {
        self.machine_deployments.keys().map(String::as_str)
    }
}
