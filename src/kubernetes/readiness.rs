// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Waiting for applied workloads to become usable

use crate::error::{PickardError, Result};
use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::core::v1::Service;
use kube::{Api, Client};
use kube_runtime::wait::await_condition;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{info, instrument};

/// All desired replicas are updated and available for the latest generation,
/// and no pods of an older revision remain
pub fn is_rollout_complete(deployment: Option<&Deployment>) -> bool {
    let Some(deployment) = deployment else {
        return false;
    };
    let Some(status) = deployment.status.as_ref() else {
        return false;
    };

    let desired = deployment
        .spec
        .as_ref()
        .and_then(|s| s.replicas)
        .unwrap_or(1);
    let observed_latest = match (deployment.metadata.generation, status.observed_generation) {
        (Some(generation), Some(observed)) => observed >= generation,
        _ => false,
    };

    observed_latest
        && status.replicas.unwrap_or(0) == desired
        && status.updated_replicas.unwrap_or(0) == desired
        && status.available_replicas.unwrap_or(0) == desired
}

/// External address assigned to a load-balanced service, if any
pub fn load_balancer_address(service: &Service) -> Option<String> {
    service
        .status
        .as_ref()
        .and_then(|s| s.load_balancer.as_ref())
        .and_then(|lb| lb.ingress.as_ref())
        .and_then(|ingress| ingress.first())
        .and_then(|i| i.ip.clone().or_else(|| i.hostname.clone()))
}

pub fn has_load_balancer_address(service: Option<&Service>) -> bool {
    service.and_then(load_balancer_address).is_some()
}

#[instrument(skip(client))]
pub async fn await_deployment_ready(
    client: &Client,
    namespace: &str,
    name: &str,
    limit: Duration,
) -> Result<()> {
    let deployments: Api<Deployment> = Api::namespaced(client.clone(), namespace);

    info!("Waiting for deployment rollout...");
    timeout(limit, await_condition(deployments, name, is_rollout_complete))
        .await
        .map_err(|_| {
            PickardError::Readiness(format!(
                "deployment {}/{} did not complete its rollout within {:?}",
                namespace, name, limit
            ))
        })??;
    info!("Deployment rollout complete");

    Ok(())
}

/// Wait until the service has an ingress address and return it
#[instrument(skip(client))]
pub async fn await_load_balancer(
    client: &Client,
    namespace: &str,
    name: &str,
    limit: Duration,
) -> Result<String> {
    let services: Api<Service> = Api::namespaced(client.clone(), namespace);

    info!("Waiting for load balancer address...");
    let service = timeout(limit, await_condition(services, name, has_load_balancer_address))
        .await
        .map_err(|_| {
            PickardError::Readiness(format!(
                "service {}/{} got no load balancer address within {:?}",
                namespace, name, limit
            ))
        })??;

    let address = service
        .as_ref()
        .and_then(load_balancer_address)
        .ok_or_else(|| {
            PickardError::Readiness(format!(
                "service {}/{} has no load balancer address",
                namespace, name
            ))
        })?;
    info!("Load balancer is reachable at {}", address);

    Ok(address)
}
