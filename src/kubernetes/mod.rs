// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes side of the workflow: credentials, client creation and the applied resources.

pub mod client;
pub mod kubeconfig;
pub mod labels;
pub mod namespaces;
pub mod readiness;
pub mod services;
pub mod workloads;

pub use client::{connect_to_cluster, ClusterConnection, ClusterConnector, KubeconfigConnector};
pub use kubeconfig::{synthesize, CredentialDocument};
pub use labels::AppLabels;
pub use namespaces::apply_namespace;
pub use readiness::{await_deployment_ready, await_load_balancer};
pub use services::{apply_service, ServiceSpec};
pub use workloads::{apply_deployment, DeploymentSpec};
