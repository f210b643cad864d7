//! Resolver and controller error types.
//!
//! Every resolution failure names the object or reference slot that has to be
//! fixed, so the message can be shown to the ClusterClass author as-is.

use crds::TemplateReference;
use kube::Error as KubeError;
use std::fmt;
use thiserror::Error;
use topology_store::StoreError;

/// Reference slot of a ClusterClass that a template is resolved from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateField {
    /// `spec.infrastructure.ref`
    InfrastructureCluster,
    /// `spec.controlPlane.ref`
    ControlPlane,
    /// `spec.controlPlane.machineInfrastructure.ref`
    ControlPlaneInfrastructureMachine,
    /// `template.infrastructure.ref` of a worker class
    WorkerInfrastructureMachine {
        /// Worker class name
        class: String,
    },
    /// `template.bootstrap.ref` of a worker class
    WorkerBootstrap {
        /// Worker class name
        class: String,
    },
}

impl TemplateField {
    /// Worker class the slot belongs to, if any
    pub fn worker_class(&self) -> Option<&str> {
        match self {
            TemplateField::WorkerInfrastructureMachine { class } | TemplateField::WorkerBootstrap { class } => {
                Some(class.as_str())
            }
            _ => None,
        }
    }

    /// Kind of template expected in this slot
    pub fn template_kind(&self) -> &'static str {
        match self {
            TemplateField::InfrastructureCluster => "InfrastructureClusterTemplate",
            TemplateField::ControlPlane => "ControlPlaneTemplate",
            TemplateField::ControlPlaneInfrastructureMachine | TemplateField::WorkerInfrastructureMachine { .. } => {
                "InfrastructureMachineTemplate"
            }
            TemplateField::WorkerBootstrap { .. } => "BootstrapTemplate",
        }
    }
}

impl fmt::Display for TemplateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateField::InfrastructureCluster => f.write_str("spec.infrastructure.ref"),
            TemplateField::ControlPlane => f.write_str("spec.controlPlane.ref"),
            TemplateField::ControlPlaneInfrastructureMachine => {
                f.write_str("spec.controlPlane.machineInfrastructure.ref")
            }
            TemplateField::WorkerInfrastructureMachine { class } => write!(
                f,
                "spec.workers.machineDeployments[class={}].template.infrastructure.ref",
                class
            ),
            TemplateField::WorkerBootstrap { class } => write!(
                f,
                "spec.workers.machineDeployments[class={}].template.bootstrap.ref",
                class
            ),
        }
    }
}

/// Errors that abort a blueprint resolution.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// Namespace or class name missing from the request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Cluster does not use a managed topology
    #[error("Cluster {cluster} has no spec.topology.class")]
    MissingTopology {
        /// Cluster as namespace/name
        cluster: String,
    },

    /// The ClusterClass does not exist
    #[error("ClusterClass {namespace}/{name} not found")]
    ClassNotFound {
        /// Namespace the class was looked up in
        namespace: String,
        /// Requested class name
        name: String,
        /// Store error reporting the absence
        #[source]
        source: StoreError,
    },

    /// The ClusterClass could not be read
    #[error("Failed to read ClusterClass {namespace}/{name}: {source}")]
    ClassFetch {
        /// Namespace the class was looked up in
        namespace: String,
        /// Requested class name
        name: String,
        /// Underlying store failure
        #[source]
        source: StoreError,
    },

    /// A required reference is unset
    #[error("ClusterClass is missing required reference {field} ({})", .field.template_kind())]
    MissingReference {
        /// Slot left unset
        field: TemplateField,
    },

    /// A reference is set but unusable
    #[error("Invalid reference {field}: {reason}")]
    InvalidReference {
        /// Slot holding the reference
        field: TemplateField,
        /// What is wrong with it
        reason: String,
    },

    /// A set reference points at an object absent from the store
    #[error("{} referenced by {field} not found: {reference}", .field.template_kind())]
    ReferencedObjectNotFound {
        /// Slot holding the reference
        field: TemplateField,
        /// Reference as queried, namespace filled in
        reference: TemplateReference,
    },

    /// Any other store failure while reading a referenced template
    #[error("Failed to read {} referenced by {field} ({reference}): {source}", .field.template_kind())]
    TemplateFetch {
        /// Slot holding the reference
        field: TemplateField,
        /// Reference as queried, namespace filled in
        reference: TemplateReference,
        /// Underlying store failure
        #[source]
        source: StoreError,
    },

    /// Two worker classes share the same class name
    #[error("ClusterClass declares worker class {class:?} more than once")]
    DuplicateWorkerClass {
        /// The repeated class name
        class: String,
    },
}

impl ResolveError {
    /// Reference slot the error is attributed to, if it is about a template
    pub fn field(&self) -> Option<&TemplateField> {
        match self {
            ResolveError::MissingReference { field }
            | ResolveError::InvalidReference { field, .. }
            | ResolveError::ReferencedObjectNotFound { field, .. }
            | ResolveError::TemplateFetch { field, .. } => Some(field),
            _ => None,
        }
    }
}

/// Errors that can occur in the topology controller binary.
#[derive(Debug, Error)]
pub enum ControllerError {
    /// Kubernetes API error
    #[error("Kubernetes error: {0}")]
    Kube(#[from] KubeError),

    /// Blueprint resolution failed
    #[error("Blueprint resolution failed: {0}")]
    Resolve(#[from] ResolveError),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Cluster not found
    #[error("Cluster not found: {0}")]
    ClusterNotFound(String),

    /// Blueprint could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
