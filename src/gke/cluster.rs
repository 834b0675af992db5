// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Cluster creation and deferred resolution of the cluster's connection attributes

use crate::constants::gke::{POLL_INTERVAL_SECS, POLL_MAX_INTERVAL_SECS};
use crate::error::{PickardError, Result};
use crate::gke::ContainerEngine;
use crate::output::{deferred, Output};
use crate::types::cluster::{ClusterSpec, Operation};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, instrument, Instrument};

/// Attributes of a provisioned cluster that only exist once creation has finished
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterOutputs {
    pub endpoint: String,
    pub name: String,
    pub cluster_ca_certificate: String,
}

/// A submitted cluster whose outputs resolve when the creation operation completes
#[derive(Clone)]
pub struct ClusterHandle {
    spec: ClusterSpec,
    operation: String,
    outputs: Output<ClusterOutputs>,
}

impl ClusterHandle {
    pub fn spec(&self) -> &ClusterSpec {
        &self.spec
    }

    pub fn operation_name(&self) -> &str {
        &self.operation
    }

    /// Wait for the cluster to be up and return its connection attributes
    pub async fn ready(&self) -> Result<ClusterOutputs> {
        self.outputs.get().await
    }
}

pub struct ClusterProvisioner {
    engine: Arc<dyn ContainerEngine>,
    poll_interval: Duration,
    poll_max_interval: Duration,
}

impl ClusterProvisioner {
    pub fn new(engine: Arc<dyn ContainerEngine>) -> Self {
        Self {
            engine,
            poll_interval: Duration::from_secs(POLL_INTERVAL_SECS),
            poll_max_interval: Duration::from_secs(POLL_MAX_INTERVAL_SECS),
        }
    }

    pub fn with_poll_interval(mut self, initial: Duration, max: Duration) -> Self {
        self.poll_interval = initial;
        self.poll_max_interval = max;
        self
    }

    /// Submit the cluster creation. A rejected request fails here; the
    /// returned handle's outputs settle once the operation has finished.
    #[instrument(skip(self, spec), fields(cluster = %spec.name, version = %spec.min_master_version))]
    pub async fn provision(&self, spec: ClusterSpec) -> Result<ClusterHandle> {
        info!(
            "Creating cluster {} with {} x {} nodes",
            spec.name, spec.initial_node_count, spec.node_config.machine_type
        );
        let operation = self.engine.create_cluster(&spec.to_request()).await?;
        info!("Cluster creation submitted as operation {}", operation.name);

        let (resolver, outputs) = deferred();
        let engine = self.engine.clone();
        let cluster_name = spec.name.clone();
        let operation_name = operation.name.clone();
        let (initial, max) = (self.poll_interval, self.poll_max_interval);

        tokio::spawn(
            async move {
                let result = async {
                    wait_for_operation(engine.as_ref(), operation, initial, max).await?;
                    describe_cluster(engine.as_ref(), &cluster_name).await
                }
                .await;
                resolver.resolve(result);
            }
            .in_current_span(),
        );

        Ok(ClusterHandle {
            spec,
            operation: operation_name,
            outputs,
        })
    }
}

/// Poll an operation until it is done, backing off exponentially up to `max`
async fn wait_for_operation(
    engine: &dyn ContainerEngine,
    mut operation: Operation,
    initial: Duration,
    max: Duration,
) -> Result<()> {
    let mut interval = initial;

    loop {
        if let Some(message) = operation.failure() {
            return Err(PickardError::ClusterCreation(message));
        }
        if operation.is_done() {
            info!("Operation {} is done", operation.name);
            return Ok(());
        }

        info!(
            "Operation {} is {:?}, checking again in {:?}...",
            operation.name, operation.status, interval
        );
        sleep(interval).await;
        interval = interval.saturating_mul(2).min(max);

        operation = engine.get_operation(&operation.name).await?;
    }
}

async fn describe_cluster(engine: &dyn ContainerEngine, name: &str) -> Result<ClusterOutputs> {
    let cluster = engine.get_cluster(name).await?;

    let Some(endpoint) = cluster.endpoint.filter(|e| !e.is_empty()) else {
        return Err(PickardError::ClusterCreation(format!(
            "Cluster {} has no endpoint",
            name
        )));
    };

    let Some(ca) = cluster
        .master_auth
        .and_then(|auth| auth.cluster_ca_certificate)
    else {
        return Err(PickardError::ClusterCreation(format!(
            "Cluster {} has no CA certificate",
            name
        )));
    };

    info!(
        "Cluster {} is {} at {}",
        cluster.name,
        cluster.status.as_deref().unwrap_or("UNKNOWN"),
        endpoint
    );
    Ok(ClusterOutputs {
        endpoint,
        name: cluster.name,
        cluster_ca_certificate: ca,
    })
}
