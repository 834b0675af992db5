// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Client creation for the provisioned cluster

use crate::error::{PickardError, Result};
use crate::gke::ClusterHandle;
use crate::kubernetes::kubeconfig::{synthesize, CredentialDocument};
use async_trait::async_trait;
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::Client;
use tracing::{info, instrument};

/// Turns a credential document into a live API client
#[async_trait]
pub trait ClusterConnector: Send + Sync {
    async fn connect(&self, kubeconfig: &CredentialDocument) -> Result<Client>;
}

/// Connector that loads the document through kube's kubeconfig support
#[derive(Debug, Clone, Copy, Default)]
pub struct KubeconfigConnector;

#[async_trait]
impl ClusterConnector for KubeconfigConnector {
    async fn connect(&self, kubeconfig: &CredentialDocument) -> Result<Client> {
        create_client(kubeconfig.to_kubeconfig()?).await
    }
}

/// A client bound to the provisioned cluster together with the document it was built from
#[derive(Clone)]
pub struct ClusterConnection {
    pub client: Client,
    pub kubeconfig: CredentialDocument,
}

/// Connect to a provisioned cluster. Blocks until the cluster's outputs have
/// resolved, so nothing downstream can reach the API before the cluster is up.
#[instrument(skip(handle, connector), fields(cluster = %handle.spec().name))]
pub async fn connect_to_cluster(
    handle: &ClusterHandle,
    connector: &dyn ClusterConnector,
) -> Result<ClusterConnection> {
    info!(
        "Waiting for cluster to finish provisioning (operation {})...",
        handle.operation_name()
    );
    let outputs = handle.ready().await?;

    let kubeconfig = synthesize(
        &outputs.endpoint,
        &outputs.name,
        &outputs.cluster_ca_certificate,
    );
    let client = connector.connect(&kubeconfig).await?;
    info!("Connected to cluster {} as {}", outputs.name, kubeconfig.context());

    Ok(ClusterConnection { client, kubeconfig })
}

/// Create a Kubernetes client from a parsed kubeconfig
pub async fn create_client(kubeconfig: Kubeconfig) -> Result<Client> {
    let client_config =
        kube::Config::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default())
            .await
            .map_err(|e| {
                PickardError::KubeconfigError(format!("Failed to create config: {}", e))
            })?;

    Client::try_from(client_config)
        .map_err(|e| PickardError::KubeconfigError(format!("Failed to create client: {}", e)))
}
