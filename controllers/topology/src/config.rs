//! Controller configuration loaded from environment variables.

use crate::error::ControllerError;

/// What the controller should resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Resolve the ClusterClass the named Cluster's topology points at
    Cluster(String),
    /// Resolve the named ClusterClass directly
    ClusterClass(String),
}

/// Controller configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Namespace of the Cluster / ClusterClass
    pub namespace: String,
    /// Object to resolve
    pub target: Target,
}

impl Config {
    /// Load configuration from the process environment
    ///
    /// - `CLUSTER_NAMESPACE`: namespace (default "default")
    /// - `CLUSTER_NAME`: Cluster to resolve the topology of
    /// - `CLUSTER_CLASS`: ClusterClass to resolve directly, used when `CLUSTER_NAME` is unset
    pub fn from_env() -> Result<Self, ControllerError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ControllerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let namespace = non_empty("CLUSTER_NAMESPACE").unwrap_or_else(|| "default".to_string());
        let target = match (non_empty("CLUSTER_NAME"), non_empty("CLUSTER_CLASS")) {
            (Some(cluster), _) => Target::Cluster(cluster),
            (None, Some(class)) => Target::ClusterClass(class),
            (None, None) => {
                return Err(ControllerError::InvalidConfig(
                    "CLUSTER_NAME or CLUSTER_CLASS environment variable is required".to_string(),
                ));
            }
        };

        Ok(Self { namespace, target })
    }
}
