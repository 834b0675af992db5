// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! The provisioning workflow: version, cluster, credentials, client, namespace, workload, service.
//!
//! Steps run strictly in order and the first error ends the run. The deployment
//! and the service only depend on the namespace, so they are applied concurrently.

use crate::config::WorkflowSpec;
use crate::constants::gke::{POLL_INTERVAL_SECS, POLL_MAX_INTERVAL_SECS};
use crate::error::Result;
use crate::gke::{resolve_latest_version, ClusterProvisioner, ContainerEngine};
use crate::kubernetes::{
    apply_deployment, apply_namespace, apply_service, await_deployment_ready,
    await_load_balancer, connect_to_cluster, AppLabels, ClusterConnector, CredentialDocument,
    DeploymentSpec, ServiceSpec,
};
use crate::types::cluster::ClusterSpec;
use kube::{Resource, ResourceExt};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument};

/// What a successful run hands back to the caller
#[derive(Debug, Clone)]
pub struct WorkflowOutputs {
    pub version: String,
    pub deployment_id: String,
    pub service_id: String,
    /// External address of the service, when readiness was awaited
    pub load_balancer: Option<String>,
    pub kubeconfig: CredentialDocument,
}

impl WorkflowOutputs {
    /// Values exported to whoever invoked the workflow
    pub fn exports(&self) -> serde_json::Value {
        serde_json::json!({ "kubeconfig": self.kubeconfig.as_str() })
    }
}

/// Identifier of an object as assigned by the API server:
/// `<apiVersion>/<kind>:<namespace>/<name>::<uid>`
pub fn resource_id<K>(obj: &K) -> String
where
    K: Resource<DynamicType = ()>,
{
    format!(
        "{}/{}:{}/{}::{}",
        K::api_version(&()),
        K::kind(&()),
        obj.namespace().unwrap_or_default(),
        obj.name_any(),
        obj.uid().unwrap_or_default()
    )
}

pub struct Workflow {
    engine: Arc<dyn ContainerEngine>,
    connector: Arc<dyn ClusterConnector>,
    spec: WorkflowSpec,
    poll_interval: Duration,
    poll_max_interval: Duration,
}

impl Workflow {
    pub fn new(
        engine: Arc<dyn ContainerEngine>,
        connector: Arc<dyn ClusterConnector>,
        spec: WorkflowSpec,
    ) -> Self {
        Self {
            engine,
            connector,
            spec,
            poll_interval: Duration::from_secs(POLL_INTERVAL_SECS),
            poll_max_interval: Duration::from_secs(POLL_MAX_INTERVAL_SECS),
        }
    }

    pub fn with_poll_interval(mut self, initial: Duration, max: Duration) -> Self {
        self.poll_interval = initial;
        self.poll_max_interval = max;
        self
    }

    #[instrument(skip(self), fields(cluster = %self.spec.cluster_name))]
    pub async fn run(&self) -> Result<WorkflowOutputs> {
        let version = resolve_latest_version(self.engine.as_ref()).await?;

        let handle = ClusterProvisioner::new(self.engine.clone())
            .with_poll_interval(self.poll_interval, self.poll_max_interval)
            .provision(ClusterSpec::pinned(&self.spec, &version))
            .await?;

        let connection = connect_to_cluster(&handle, self.connector.as_ref()).await?;
        let client = &connection.client;

        apply_namespace(client, &self.spec.namespace).await?;

        let labels = AppLabels::new(&self.spec.app_label);
        let deployment_spec = DeploymentSpec::from_workflow(&self.spec, &labels);
        let service_spec = ServiceSpec::from_workflow(&self.spec, &labels);

        let (deployment, service) = futures::try_join!(
            apply_deployment(client, &deployment_spec),
            apply_service(client, &service_spec)
        )?;

        let load_balancer = if self.spec.await_readiness {
            let (_, address) = futures::try_join!(
                await_deployment_ready(
                    client,
                    &deployment_spec.namespace,
                    &deployment_spec.name,
                    self.spec.readiness_timeout
                ),
                await_load_balancer(
                    client,
                    &service_spec.namespace,
                    &service_spec.name,
                    self.spec.readiness_timeout
                )
            )?;
            Some(address)
        } else {
            None
        };

        info!("Workflow complete");
        Ok(WorkflowOutputs {
            version,
            deployment_id: resource_id(&deployment),
            service_id: resource_id(&service),
            load_balancer,
            kubeconfig: connection.kubeconfig,
        })
    }
}
