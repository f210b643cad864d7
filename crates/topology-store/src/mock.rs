//! Mock ObjectStore for unit testing
//!
//! This module provides an in-memory implementation of `ObjectStore` that can
//! be used in unit tests without requiring a running Kubernetes API server.

use crate::client::api_resource;
use crate::error::StoreError;
use crate::store_trait::ObjectStore;
use crds::ClusterClass;
use kube::api::DynamicObject;
use kube::ResourceExt;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Template objects are keyed by (apiVersion, kind, namespace, name)
type TemplateKey = (String, String, String, String);

/// Mock ObjectStore for testing
///
/// Stores ClusterClasses and templates in memory, can be configured to fail
/// specific lookups, and records every lookup in call order.
#[derive(Clone, Default)]
pub struct MockObjectStore {
    pub(crate) cluster_classes: Arc<Mutex<HashMap<(String, String), ClusterClass>>>,
    pub(crate) templates: Arc<Mutex<HashMap<TemplateKey, DynamicObject>>>,
    pub(crate) failures: Arc<Mutex<HashMap<String, String>>>,
    pub(crate) requests: Arc<Mutex<Vec<String>>>,
}

impl std::fmt::Debug for MockObjectStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockObjectStore")
            .field("cluster_classes", &lock(&self.cluster_classes).len())
            .field("templates", &lock(&self.templates).len())
            .finish_non_exhaustive()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn template_key(api_version: &str, kind: &str, namespace: &str, name: &str) -> TemplateKey {
    (
        api_version.to_string(),
        kind.to_string(),
        namespace.to_string(),
        name.to_string(),
    )
}

fn request_key(kind: &str, namespace: &str, name: &str) -> String {
    format!("{}/{}/{}", kind, namespace, name)
}

impl MockObjectStore {
    /// Create a new, empty mock store
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a ClusterClass to the mock store (for test setup)
    ///
    /// Classes without a namespace are stored in "default".
    pub fn add_cluster_class(&self, cluster_class: ClusterClass) {
        let namespace = cluster_class.namespace().unwrap_or_else(|| "default".to_string());
        let name = cluster_class.name_any();
        lock(&self.cluster_classes).insert((namespace, name), cluster_class);
    }

    /// Add a template object to the mock store (for test setup)
    ///
    /// The apiVersion and kind are read from the object's type metadata.
    pub fn add_template(&self, template: DynamicObject) {
        let (api_version, kind) = template
            .types
            .as_ref()
            .map(|t| (t.api_version.clone(), t.kind.clone()))
            .unwrap_or_default();
        let namespace = template.namespace().unwrap_or_else(|| "default".to_string());
        let name = template.name_any();
        lock(&self.templates).insert((api_version, kind, namespace, name), template);
    }

    /// Build and add a template from its coordinates and body (for test setup)
    pub fn add_template_with(
        &self,
        api_version: &str,
        kind: &str,
        namespace: &str,
        name: &str,
        data: serde_json::Value,
    ) -> Result<DynamicObject, StoreError> {
        let resource = api_resource(api_version, kind)?;
        let template = DynamicObject::new(name, &resource).within(namespace).data(data);
        self.add_template(template.clone());
        Ok(template)
    }

    /// Remove a template from the mock store, returning it if present
    pub fn remove_template(&self, api_version: &str, kind: &str, namespace: &str, name: &str) -> Option<DynamicObject> {
        lock(&self.templates).remove(&template_key(api_version, kind, namespace, name))
    }

    /// Make every lookup of kind/namespace/name fail with a backend error
    ///
    /// Use kind "ClusterClass" to fail ClusterClass lookups.
    pub fn fail_on(&self, kind: &str, namespace: &str, name: &str, message: impl Into<String>) {
        lock(&self.failures).insert(request_key(kind, namespace, name), message.into());
    }

    /// Lookups performed so far, as "kind/namespace/name", in call order
    pub fn requests(&self) -> Vec<String> {
        lock(&self.requests).clone()
    }

    fn record(&self, kind: &str, namespace: &str, name: &str) -> Result<(), StoreError> {
        let key = request_key(kind, namespace, name);
        lock(&self.requests).push(key.clone());
        match lock(&self.failures).get(&key) {
            Some(message) => Err(StoreError::Backend(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait::async_trait]
impl ObjectStore for MockObjectStore {
    async fn get_cluster_class(&self, namespace: &str, name: &str) -> Result<ClusterClass, StoreError> {
        self.record("ClusterClass", namespace, name)?;
        lock(&self.cluster_classes)
            .get(&(namespace.to_string(), name.to_string()))
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("ClusterClass {}/{}", namespace, name)))
    }

    async fn get(&self, api_version: &str, kind: &str, namespace: &str, name: &str) -> Result<DynamicObject, StoreError> {
        api_resource(api_version, kind)?;
        self.record(kind, namespace, name)?;
        lock(&self.templates)
            .get(&template_key(api_version, kind, namespace, name))
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("{} {}/{} ({})", kind, namespace, name, api_version)))
    }
}
