//! Topology Controller
//!
//! Resolves the ClusterClass blueprint for a Cluster (or for a ClusterClass
//! directly) and prints it as JSON on stdout. Logs go to stderr.

use crds::Cluster;
use kube::{Api, Client};
use std::sync::Arc;
use topology_controller::{BlueprintResolver, Config, ControllerError, Target};
use topology_store::KubeObjectStore;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), ControllerError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    // kube's rustls-tls client needs a process-wide crypto provider
    if rustls::crypto::ring::default_provider().install_default().is_err() {
        debug!("rustls crypto provider already installed");
    }

    info!("Starting Topology Controller");

    let config = Config::from_env()?;
    info!("Configuration:");
    info!("  Namespace: {}", config.namespace);
    match &config.target {
        Target::Cluster(name) => info!("  Cluster: {}", name),
        Target::ClusterClass(name) => info!("  ClusterClass: {}", name),
    }

    let client = Client::try_default().await?;
    let resolver = BlueprintResolver::new(Arc::new(KubeObjectStore::new(client.clone())));

    let blueprint = match &config.target {
        Target::Cluster(name) => {
            let clusters: Api<Cluster> = Api::namespaced(client, &config.namespace);
            let cluster = clusters
                .get_opt(name)
                .await?
                .ok_or_else(|| ControllerError::ClusterNotFound(format!("{}/{}", config.namespace, name)))?;
            resolver.resolve_for_cluster(&cluster).await?
        }
        Target::ClusterClass(name) => resolver.resolve(&config.namespace, name).await?,
    };

    println!("{}", serde_json::to_string_pretty(&blueprint)?);
    Ok(())
}
