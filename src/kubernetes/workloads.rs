// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Replicated workload deployment

use crate::config::WorkflowSpec;
use crate::constants::FIELD_MANAGER;
use crate::error::Result;
use crate::kubernetes::labels::AppLabels;
use k8s_openapi::api::apps::v1::{Deployment, DeploymentSpec as K8sDeploymentSpec};
use k8s_openapi::api::core::v1::{Container, PodSpec, PodTemplateSpec};
use kube::{
    api::{ObjectMeta, Patch, PatchParams},
    Api, Client,
};
use tracing::{info, instrument};

#[derive(Debug, Clone, PartialEq)]
pub struct ContainerSpec {
    pub name: String,
    pub image: String,
}

/// Desired deployment: one container, replicated, selected by the shared labels
#[derive(Debug, Clone, PartialEq)]
pub struct DeploymentSpec {
    pub name: String,
    pub namespace: String,
    pub replicas: i32,
    pub labels: AppLabels,
    pub container: ContainerSpec,
}

impl DeploymentSpec {
    /// The container is named after the deployment
    pub fn from_workflow(spec: &WorkflowSpec, labels: &AppLabels) -> Self {
        Self {
            name: spec.deployment_name.clone(),
            namespace: spec.namespace.clone(),
            replicas: spec.replicas,
            labels: labels.clone(),
            container: ContainerSpec {
                name: spec.deployment_name.clone(),
                image: spec.image.clone(),
            },
        }
    }
}

pub fn build_deployment(spec: &DeploymentSpec) -> Deployment {
    Deployment {
        metadata: ObjectMeta {
            name: Some(spec.name.clone()),
            namespace: Some(spec.namespace.clone()),
            ..Default::default()
        },
        spec: Some(K8sDeploymentSpec {
            replicas: Some(spec.replicas),
            selector: spec.labels.selector(),
            template: PodTemplateSpec {
                metadata: Some(ObjectMeta {
                    labels: Some(spec.labels.to_map()),
                    ..Default::default()
                }),
                spec: Some(PodSpec {
                    containers: vec![Container {
                        name: spec.container.name.clone(),
                        image: Some(spec.container.image.clone()),
                        ..Default::default()
                    }],
                    ..Default::default()
                }),
            },
            ..Default::default()
        }),
        ..Default::default()
    }
}

#[instrument(skip(client, spec), fields(deployment = %format!("{}/{}", spec.namespace, spec.name)))]
pub async fn apply_deployment(client: &Client, spec: &DeploymentSpec) -> Result<Deployment> {
    let deployments: Api<Deployment> = Api::namespaced(client.clone(), &spec.namespace);

    info!(
        "Applying deployment with {} replicas of {}",
        spec.replicas, spec.container.image
    );
    let pp = PatchParams::apply(FIELD_MANAGER).force();
    let applied = deployments
        .patch(&spec.name, &pp, &Patch::Apply(&build_deployment(spec)))
        .await?;

    Ok(applied)
}
