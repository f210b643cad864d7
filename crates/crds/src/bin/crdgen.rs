//! Prints the CustomResourceDefinitions for the topology CRDs as a YAML stream.

use anyhow::Result;
use crds::{Cluster, ClusterClass};
use kube::CustomResourceExt;

fn main() -> Result<()> {
    let crds = [ClusterClass::crd(), Cluster::crd()];
    for crd in &crds {
        print!("---\n{}", serde_yaml::to_string(crd)?);
    }
    Ok(())
}
