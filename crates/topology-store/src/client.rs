//! Kubernetes-backed object store
//!
//! Reads ClusterClasses through the typed API and templates through
//! `Api<DynamicObject>`, since template kinds are only known at runtime from
//! the references a ClusterClass carries.

use crate::error::StoreError;
use crate::store_trait::ObjectStore;
use crds::ClusterClass;
use kube::api::{Api, ApiResource, DynamicObject, GroupVersionKind};
use kube::Client;
use tracing::debug;

/// Object store reading from the Kubernetes API server
#[derive(Clone)]
pub struct KubeObjectStore {
    client: Client,
}

impl std::fmt::Debug for KubeObjectStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KubeObjectStore").finish_non_exhaustive()
    }
}

impl KubeObjectStore {
    /// Create a new store on top of an existing Kubernetes client
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Get the underlying Kubernetes client
    pub fn client(&self) -> &Client {
        &self.client
    }
}

/// Split an apiVersion into group and version ("apps/v1" -> ("apps", "v1"), "v1" -> ("", "v1"))
pub fn parse_api_version(api_version: &str) -> Result<(String, String), StoreError> {
    match api_version.split_once('/') {
        Some((group, version)) if !group.is_empty() && !version.is_empty() && !version.contains('/') => {
            Ok((group.to_string(), version.to_string()))
        }
        None if !api_version.is_empty() => Ok((String::new(), api_version.to_string())),
        _ => Err(StoreError::InvalidRequest(format!("invalid apiVersion {:?}", api_version))),
    }
}

/// Build an ApiResource from an apiVersion and kind.
///
/// The plural is derived from the kind, which holds for Cluster API template kinds.
pub fn api_resource(api_version: &str, kind: &str) -> Result<ApiResource, StoreError> {
    if kind.is_empty() {
        return Err(StoreError::InvalidRequest("kind must not be empty".to_string()));
    }
    let (group, version) = parse_api_version(api_version)?;
    Ok(ApiResource::from_gvk(&GroupVersionKind::gvk(&group, &version, kind)))
}

#[async_trait::async_trait]
impl ObjectStore for KubeObjectStore {
    async fn get_cluster_class(&self, namespace: &str, name: &str) -> Result<ClusterClass, StoreError> {
        debug!(namespace = %namespace, name = %name, "Fetching ClusterClass");
        let api: Api<ClusterClass> = Api::namespaced(self.client.clone(), namespace);
        api.get_opt(name)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("ClusterClass {}/{}", namespace, name)))
    }

    async fn get(&self, api_version: &str, kind: &str, namespace: &str, name: &str) -> Result<DynamicObject, StoreError> {
        let resource = api_resource(api_version, kind)?;
        debug!(
            api_version = %api_version,
            kind = %kind,
            namespace = %namespace,
            name = %name,
            "Fetching template"
        );
        let api: Api<DynamicObject> = Api::namespaced_with(self.client.clone(), namespace, &resource);
        api.get_opt(name)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("{} {}/{}", kind, namespace, name)))
    }
}
