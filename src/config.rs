// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::{cluster, names, workload, READINESS_TIMEOUT_SECS};
use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Provider coordinates loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// GCP project the cluster is created in
    pub project: String,
    /// Zone used both for the version catalog and the cluster location
    pub zone: String,
    /// Bearer token for the GKE API; falls back to `gcloud auth print-access-token`
    pub access_token: Option<String>,
    /// Optional file to write the exported kubeconfig to
    pub kubeconfig_out: Option<PathBuf>,
    pub await_readiness: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let project =
            env::var("GOOGLE_PROJECT").context("GOOGLE_PROJECT environment variable not set")?;
        let zone = env::var("GOOGLE_ZONE").context("GOOGLE_ZONE environment variable not set")?;
        let access_token = env::var("GOOGLE_OAUTH_ACCESS_TOKEN")
            .ok()
            .filter(|t| !t.is_empty());
        let kubeconfig_out = env::var("PICKARD_KUBECONFIG_OUT").ok().map(PathBuf::from);
        let await_readiness: bool = env::var("PICKARD_AWAIT_READINESS")
            .unwrap_or("true".to_string())
            .parse()
            .unwrap_or(true);

        Ok(Config {
            project,
            zone,
            access_token,
            kubeconfig_out,
            await_readiness,
        })
    }

    /// Workflow policy with readiness waiting taken from the environment
    pub fn workflow_spec(&self) -> WorkflowSpec {
        WorkflowSpec {
            await_readiness: self.await_readiness,
            ..Default::default()
        }
    }
}

/// Every policy value the workflow applies. `Default` yields the fixed demo setup.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowSpec {
    pub cluster_name: String,
    pub initial_node_count: i32,
    pub machine_type: String,
    pub oauth_scopes: Vec<String>,
    pub namespace: String,
    pub deployment_name: String,
    pub service_name: String,
    /// Value of the `app` label used as selector by the deployment and the service
    pub app_label: String,
    pub replicas: i32,
    pub image: String,
    pub service_port: i32,
    pub target_port: i32,
    /// Wait for the rollout and the load balancer after applying
    pub await_readiness: bool,
    pub readiness_timeout: Duration,
}

impl Default for WorkflowSpec {
    fn default() -> Self {
        Self {
            cluster_name: names::CLUSTER.to_string(),
            initial_node_count: cluster::INITIAL_NODE_COUNT,
            machine_type: cluster::MACHINE_TYPE.to_string(),
            oauth_scopes: cluster::OAUTH_SCOPES.iter().map(|s| s.to_string()).collect(),
            namespace: names::NAMESPACE.to_string(),
            deployment_name: names::DEPLOYMENT.to_string(),
            service_name: names::SERVICE.to_string(),
            app_label: names::APP.to_string(),
            replicas: workload::REPLICAS,
            image: workload::IMAGE.to_string(),
            service_port: workload::SERVICE_PORT,
            target_port: workload::TARGET_PORT,
            await_readiness: true,
            readiness_timeout: Duration::from_secs(READINESS_TIMEOUT_SECS),
        }
    }
}
