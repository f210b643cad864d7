//! Test utilities for unit testing the resolver
//!
//! This module provides helpers for creating test data and setting up test scenarios.

use crds::{
    Cluster, ClusterClass, ClusterClassSpec, ClusterSpec, ControlPlaneClass, LocalObjectTemplate,
    MachineDeploymentClass, MachineDeploymentClassTemplate, TemplateMetadata, TemplateReference, Topology,
    WorkersClass,
};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use kube::api::{ApiResource, DynamicObject, GroupVersionKind};
use kube::ResourceExt;
use std::collections::BTreeMap;

pub const NAMESPACE: &str = "default";

fn template(group: &str, kind: &str, namespace: &str, name: &str) -> DynamicObject {
    let resource = ApiResource::from_gvk(&GroupVersionKind::gvk(group, "v1beta1", kind));
    DynamicObject::new(name, &resource)
        .within(namespace)
        .data(serde_json::json!({ "spec": { "template": { "spec": {} } } }))
}

/// Helper to create a test InfrastructureClusterTemplate
pub fn infrastructure_cluster_template(namespace: &str, name: &str) -> DynamicObject {
    template("infrastructure.cluster.x-k8s.io", "GenericInfrastructureClusterTemplate", namespace, name)
}

/// Helper to create a test ControlPlaneTemplate
pub fn control_plane_template(namespace: &str, name: &str) -> DynamicObject {
    template("controlplane.cluster.x-k8s.io", "GenericControlPlaneTemplate", namespace, name)
}

/// Helper to create a test InfrastructureMachineTemplate
pub fn infrastructure_machine_template(namespace: &str, name: &str) -> DynamicObject {
    template("infrastructure.cluster.x-k8s.io", "GenericInfrastructureMachineTemplate", namespace, name)
}

/// Helper to create a test BootstrapTemplate
pub fn bootstrap_template(namespace: &str, name: &str) -> DynamicObject {
    template("bootstrap.cluster.x-k8s.io", "GenericBootstrapConfigTemplate", namespace, name)
}

/// Reference pointing at a test template
pub fn reference_to(object: &DynamicObject) -> TemplateReference {
    let (api_version, kind) = object
        .types
        .as_ref()
        .map(|t| (t.api_version.clone(), t.kind.clone()))
        .unwrap_or_default();
    let mut reference = TemplateReference::new(api_version, kind, object.name_any());
    reference.namespace = object.namespace();
    reference
}

/// Builder for test ClusterClasses
pub struct ClusterClassBuilder {
    namespace: String,
    name: String,
    spec: ClusterClassSpec,
}

impl ClusterClassBuilder {
    pub fn new(namespace: &str, name: &str) -> Self {
        Self {
            namespace: namespace.to_string(),
            name: name.to_string(),
            spec: ClusterClassSpec::default(),
        }
    }

    pub fn with_infrastructure_cluster_template(mut self, template: &DynamicObject) -> Self {
        self.spec.infrastructure = LocalObjectTemplate::referencing(reference_to(template));
        self
    }

    pub fn with_control_plane_template(mut self, template: &DynamicObject) -> Self {
        self.spec.control_plane.reference = Some(reference_to(template));
        self
    }

    pub fn with_control_plane_infrastructure_machine_template(mut self, template: &DynamicObject) -> Self {
        self.spec.control_plane = ControlPlaneClass {
            machine_infrastructure: Some(LocalObjectTemplate::referencing(reference_to(template))),
            ..self.spec.control_plane
        };
        self
    }

    pub fn with_worker_machine_deployment_classes(mut self, classes: Vec<MachineDeploymentClass>) -> Self {
        self.spec.workers = Some(WorkersClass {
            machine_deployments: classes,
        });
        self
    }

    pub fn build(self) -> ClusterClass {
        ClusterClass {
            metadata: ObjectMeta {
                name: Some(self.name),
                namespace: Some(self.namespace),
                ..Default::default()
            },
            spec: self.spec,
        }
    }
}

/// Builder for test worker classes
pub struct MachineDeploymentClassBuilder {
    class: MachineDeploymentClass,
}

impl MachineDeploymentClassBuilder {
    pub fn new(class: &str) -> Self {
        Self {
            class: MachineDeploymentClass {
                class: class.to_string(),
                template: MachineDeploymentClassTemplate::default(),
            },
        }
    }

    pub fn with_labels(mut self, labels: &[(&str, &str)]) -> Self {
        self.class.template.metadata.labels = to_map(labels);
        self
    }

    pub fn with_annotations(mut self, annotations: &[(&str, &str)]) -> Self {
        self.class.template.metadata.annotations = to_map(annotations);
        self
    }

    pub fn with_infrastructure_template(mut self, template: &DynamicObject) -> Self {
        self.class.template.infrastructure = LocalObjectTemplate::referencing(reference_to(template));
        self
    }

    pub fn with_bootstrap_template(mut self, template: &DynamicObject) -> Self {
        self.class.template.bootstrap = LocalObjectTemplate::referencing(reference_to(template));
        self
    }

    pub fn build(self) -> MachineDeploymentClass {
        self.class
    }
}

/// Helper to create a test Cluster, optionally using a managed topology
pub fn cluster(namespace: &str, name: &str, class: Option<&str>) -> Cluster {
    let mut cluster = Cluster::new(
        name,
        ClusterSpec {
            topology: class.map(|class| Topology {
                class: class.to_string(),
                version: "v1.30.0".to_string(),
            }),
            ..Default::default()
        },
    );
    cluster.metadata.namespace = Some(namespace.to_string());
    cluster
}

/// Metadata map from key/value pairs
pub fn to_map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Metadata a worker class is expected to carry into its blueprint
pub fn metadata(labels: &[(&str, &str)], annotations: &[(&str, &str)]) -> TemplateMetadata {
    TemplateMetadata {
        labels: to_map(labels),
        annotations: to_map(annotations),
    }
}
