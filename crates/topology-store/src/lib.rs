//! Topology object store
//!
//! Read-only access to Cluster API ClusterClasses and the templates they reference.
//!
//! # Example
//!
//! ```no_run
//! use topology_store::{KubeObjectStore, ObjectStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = kube::Client::try_default().await?;
//! let store = KubeObjectStore::new(client);
//!
//! let class = store.get_cluster_class("default", "quick-start").await?;
//! let template = store
//!     .get("infrastructure.cluster.x-k8s.io/v1beta1", "DockerClusterTemplate", "default", "quick-start-cluster")
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
#[path = "trait.rs"]
pub mod store_trait;
#[cfg(any(test, feature = "test-util"))]
pub mod mock;

pub use client::KubeObjectStore;
pub use error::StoreError;
pub use store_trait::ObjectStore;
#[cfg(any(test, feature = "test-util"))]
pub use mock::MockObjectStore;
