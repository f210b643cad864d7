//! Cluster topology blueprint resolution
//!
//! Resolves a Cluster API `ClusterClass` into a `ClusterBlueprint`: the class
//! together with every InfrastructureClusterTemplate, ControlPlaneTemplate,
//! InfrastructureMachineTemplate and BootstrapTemplate it references.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use topology_controller::BlueprintResolver;
//! use topology_store::KubeObjectStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = kube::Client::try_default().await?;
//! let resolver = BlueprintResolver::new(Arc::new(KubeObjectStore::new(client)));
//!
//! let blueprint = resolver.resolve("default", "quick-start").await?;
//! for class in blueprint.machine_deployment_classes() {
//!     println!("worker class {}", class);
//! }
//! # Ok(())
//! # }
//! ```

pub mod blueprint;
pub mod config;
pub mod error;
pub mod resolver;
#[cfg(test)]
mod test_utils;

pub use blueprint::{ClusterBlueprint, ControlPlaneBlueprint, MachineDeploymentBlueprint};
pub use config::{Config, Target};
pub use error::{ControllerError, ResolveError, TemplateField};
pub use resolver::BlueprintResolver;
