//! Cluster topology CRD Definitions
//!
//! Kubernetes Custom Resource Definitions consumed by the topology blueprint resolver.

pub mod cluster;
pub mod cluster_class;
pub mod references;

pub use cluster::*;
pub use cluster_class::*;
pub use references::*;
