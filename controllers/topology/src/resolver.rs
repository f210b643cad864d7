//! ClusterClass blueprint resolution.
//!
//! Walks every template reference a ClusterClass declares, fetches each one
//! from the object store and assembles the results into a `ClusterBlueprint`.
//! Fetches run one after another in declaration order and the first failure
//! aborts the whole resolution, so a caller either gets a complete blueprint
//! or an error naming the slot to fix.

use crate::blueprint::{ClusterBlueprint, ControlPlaneBlueprint, MachineDeploymentBlueprint};
use crate::error::{ResolveError, TemplateField};
use crds::{Cluster, ClusterClass, MachineDeploymentClass, TemplateReference};
use kube::api::DynamicObject;
use kube::ResourceExt;
use std::collections::BTreeMap;
use std::sync::Arc;
use topology_store::ObjectStore;
use tracing::{debug, error, info, warn};

/// Resolves ClusterClasses into blueprints.
///
/// Holds no state besides the store handle; one resolver can serve any number
/// of concurrent resolutions.
#[derive(Clone)]
pub struct BlueprintResolver {
    store: Arc<dyn ObjectStore>,
}

impl std::fmt::Debug for BlueprintResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlueprintResolver").finish_non_exhaustive()
    }
}

impl BlueprintResolver {
    /// Create a resolver reading from `store`
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self { store }
    }

    /// Resolve the ClusterClass a Cluster's managed topology is built from.
    ///
    /// The class is looked up in the cluster's namespace.
    pub async fn resolve_for_cluster(&self, cluster: &Cluster) -> Result<ClusterBlueprint, ResolveError> {
        let namespace = cluster.namespace().unwrap_or_default();
        let Some(class_name) = cluster.topology_class() else {
            return Err(ResolveError::MissingTopology {
                cluster: format!("{}/{}", namespace, cluster.name_any()),
            });
        };
        self.resolve(&namespace, class_name).await
    }

    /// Resolve ClusterClass `namespace/class_name` into a blueprint.
    pub async fn resolve(&self, namespace: &str, class_name: &str) -> Result<ClusterBlueprint, ResolveError> {
        if namespace.is_empty() {
            return Err(ResolveError::InvalidRequest("namespace must not be empty".to_string()));
        }
        if class_name.is_empty() {
            return Err(ResolveError::InvalidRequest("ClusterClass name must not be empty".to_string()));
        }

        info!("Resolving blueprint for ClusterClass {}/{}", namespace, class_name);
        let cluster_class = self.fetch_cluster_class(namespace, class_name).await?;
        let spec = &cluster_class.spec;

        let infrastructure_cluster_template = self
            .fetch_required(namespace, spec.infrastructure.reference.as_ref(), TemplateField::InfrastructureCluster)
            .await?;

        let template = self
            .fetch_required(namespace, spec.control_plane.reference.as_ref(), TemplateField::ControlPlane)
            .await?;
        let infrastructure_machine_template = match spec.control_plane_machine_infrastructure() {
            Some(reference) => Some(
                self.fetch_template(namespace, reference, TemplateField::ControlPlaneInfrastructureMachine)
                    .await?,
            ),
            None => {
                debug!("ClusterClass {}/{} has no control plane machine infrastructure", namespace, class_name);
                None
            }
        };
        let control_plane = ControlPlaneBlueprint {
            template,
            infrastructure_machine_template,
        };

        let machine_deployments = self
            .resolve_machine_deployments(namespace, spec.machine_deployment_classes())
            .await?;

        info!(
            "Resolved blueprint for ClusterClass {}/{} ({} worker classes)",
            namespace,
            class_name,
            machine_deployments.len()
        );
        Ok(ClusterBlueprint {
            cluster_class,
            infrastructure_cluster_template,
            control_plane,
            machine_deployments,
        })
    }

    async fn fetch_cluster_class(&self, namespace: &str, name: &str) -> Result<ClusterClass, ResolveError> {
        match self.store.get_cluster_class(namespace, name).await {
            Ok(cluster_class) => Ok(cluster_class),
            Err(e) if e.is_not_found() => {
                warn!("ClusterClass {}/{} not found", namespace, name);
                Err(ResolveError::ClassNotFound {
                    namespace: namespace.to_string(),
                    name: name.to_string(),
                    source: e,
                })
            }
            Err(e) => {
                error!("Failed to read ClusterClass {}/{}: {}", namespace, name, e);
                Err(ResolveError::ClassFetch {
                    namespace: namespace.to_string(),
                    name: name.to_string(),
                    source: e,
                })
            }
        }
    }

    /// Resolve worker classes in declaration order.
    ///
    /// Each entry is built completely before it is inserted; a duplicate class
    /// name is rejected before any of its templates are fetched.
    async fn resolve_machine_deployments(
        &self,
        namespace: &str,
        classes: &[MachineDeploymentClass],
    ) -> Result<BTreeMap<String, MachineDeploymentBlueprint>, ResolveError> {
        let mut resolved = BTreeMap::new();
        for md_class in classes {
            if resolved.contains_key(&md_class.class) {
                return Err(ResolveError::DuplicateWorkerClass {
                    class: md_class.class.clone(),
                });
            }
            let blueprint = self.resolve_machine_deployment(namespace, md_class).await?;
            resolved.insert(md_class.class.clone(), blueprint);
        }
        Ok(resolved)
    }

    async fn resolve_machine_deployment(
        &self,
        namespace: &str,
        md_class: &MachineDeploymentClass,
    ) -> Result<MachineDeploymentBlueprint, ResolveError> {
        let template = &md_class.template;
        let infrastructure_field = TemplateField::WorkerInfrastructureMachine {
            class: md_class.class.clone(),
        };
        let bootstrap_field = TemplateField::WorkerBootstrap {
            class: md_class.class.clone(),
        };

        // Both slots are checked before anything is fetched.
        let infrastructure_ref = required(template.infrastructure.reference.as_ref(), &infrastructure_field)?;
        let bootstrap_ref = required(template.bootstrap.reference.as_ref(), &bootstrap_field)?;

        let infrastructure_machine_template = self
            .fetch_template(namespace, infrastructure_ref, infrastructure_field)
            .await?;
        let bootstrap_template = self.fetch_template(namespace, bootstrap_ref, bootstrap_field).await?;

        debug!("Resolved worker class {}", md_class.class);
        Ok(MachineDeploymentBlueprint {
            metadata: template.metadata.clone(),
            infrastructure_machine_template,
            bootstrap_template,
        })
    }

    async fn fetch_required(
        &self,
        namespace: &str,
        reference: Option<&TemplateReference>,
        field: TemplateField,
    ) -> Result<DynamicObject, ResolveError> {
        let reference = required(reference, &field)?;
        self.fetch_template(namespace, reference, field).await
    }

    /// Fetch the template `reference` points at, resolving a missing namespace to `namespace`.
    async fn fetch_template(
        &self,
        namespace: &str,
        reference: &TemplateReference,
        field: TemplateField,
    ) -> Result<DynamicObject, ResolveError> {
        validate_reference(reference, &field)?;
        let target_namespace = reference.namespace_or(namespace);

        debug!("Fetching {} for {}", reference, field);
        match self
            .store
            .get(&reference.api_version, &reference.kind, target_namespace, &reference.name)
            .await
        {
            Ok(template) => Ok(template),
            Err(e) if e.is_not_found() => {
                warn!("{} referenced by {} not found", reference, field);
                Err(ResolveError::ReferencedObjectNotFound {
                    reference: reference.clone().with_namespace(target_namespace),
                    field,
                })
            }
            Err(e) => {
                error!("Failed to read {} referenced by {}: {}", reference, field, e);
                Err(ResolveError::TemplateFetch {
                    reference: reference.clone().with_namespace(target_namespace),
                    field,
                    source: e,
                })
            }
        }
    }
}

fn required<'a>(
    reference: Option<&'a TemplateReference>,
    field: &TemplateField,
) -> Result<&'a TemplateReference, ResolveError> {
    reference.ok_or_else(|| {
        warn!("Required reference {} is not set", field);
        ResolveError::MissingReference { field: field.clone() }
    })
}

fn validate_reference(reference: &TemplateReference, field: &TemplateField) -> Result<(), ResolveError> {
    let reason = if reference.name.is_empty() {
        "name must not be empty"
    } else if reference.kind.is_empty() {
        "kind must not be empty"
    } else if reference.api_version.is_empty() {
        "apiVersion must not be empty"
    } else {
        return Ok(());
    };
    Err(ResolveError::InvalidReference {
        field: field.clone(),
        reason: reason.to_string(),
    })
}
