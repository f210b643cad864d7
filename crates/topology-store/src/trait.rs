//! ObjectStore trait for mocking
//!
//! This trait abstracts read access to ClusterClasses and the templates they
//! reference. The Kubernetes-backed store implements it, and tests use the
//! in-memory mock.

use crate::error::StoreError;
use crds::ClusterClass;
use kube::api::DynamicObject;

/// Read-only access to ClusterClasses and template objects
///
/// Implementations must return `StoreError::NotFound` for absent objects so
/// callers can tell a dangling reference from a failing backend.
/// All async methods must be `Send` to work with Tokio's work-stealing runtime.
#[async_trait::async_trait]
pub trait ObjectStore: Send + Sync {
    /// Get a ClusterClass by namespace and name
    async fn get_cluster_class(&self, namespace: &str, name: &str) -> Result<ClusterClass, StoreError>;

    /// Get a template object by apiVersion, kind, namespace and name
    ///
    /// The body is returned as-is at the requested apiVersion.
    async fn get(&self, api_version: &str, kind: &str, namespace: &str, name: &str) -> Result<DynamicObject, StoreError>;
}
