// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Load-balanced service exposure

use crate::config::WorkflowSpec;
use crate::constants::{workload::SERVICE_TYPE, FIELD_MANAGER};
use crate::error::Result;
use crate::kubernetes::labels::AppLabels;
use k8s_openapi::api::core::v1::{Service, ServicePort, ServiceSpec as K8sServiceSpec};
use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;
use kube::{
    api::{ObjectMeta, Patch, PatchParams},
    Api, Client,
};
use tracing::{info, instrument};

/// Desired service: `port` on the load balancer forwarded to `target_port` on the selected pods
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceSpec {
    pub name: String,
    pub namespace: String,
    pub labels: AppLabels,
    pub port: i32,
    pub target_port: i32,
}

impl ServiceSpec {
    pub fn from_workflow(spec: &WorkflowSpec, labels: &AppLabels) -> Self {
        Self {
            name: spec.service_name.clone(),
            namespace: spec.namespace.clone(),
            labels: labels.clone(),
            port: spec.service_port,
            target_port: spec.target_port,
        }
    }
}

pub fn build_service(spec: &ServiceSpec) -> Service {
    Service {
        metadata: ObjectMeta {
            name: Some(spec.name.clone()),
            namespace: Some(spec.namespace.clone()),
            labels: Some(spec.labels.to_map()),
            ..Default::default()
        },
        spec: Some(K8sServiceSpec {
            ports: Some(vec![ServicePort {
                port: spec.port,
                target_port: Some(IntOrString::Int(spec.target_port)),
                ..Default::default()
            }]),
            selector: Some(spec.labels.to_map()),
            type_: Some(SERVICE_TYPE.to_string()),
            ..Default::default()
        }),
        ..Default::default()
    }
}

#[instrument(skip(client, spec), fields(service = %format!("{}/{}", spec.namespace, spec.name)))]
pub async fn apply_service(client: &Client, spec: &ServiceSpec) -> Result<Service> {
    let services: Api<Service> = Api::namespaced(client.clone(), &spec.namespace);

    info!(
        "Applying {} service {} -> {}",
        SERVICE_TYPE, spec.port, spec.target_port
    );
    let pp = PatchParams::apply(FIELD_MANAGER).force();
    let applied = services
        .patch(&spec.name, &pp, &Patch::Apply(&build_service(spec)))
        .await?;

    Ok(applied)
}
