// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::config::WorkflowSpec;
use crate::constants::names;
use serde::{Deserialize, Serialize};

/// Desired managed cluster, with both control plane and nodes pinned to one version
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterSpec {
    pub name: String,
    pub initial_node_count: i32,
    pub min_master_version: String,
    pub node_version: String,
    pub node_config: NodeConfig,
}

impl ClusterSpec {
    /// Build the cluster spec for a resolved engine version.
    /// The same version is used for the control plane and the node pool.
    pub fn pinned(spec: &WorkflowSpec, version: &str) -> Self {
        Self {
            name: spec.cluster_name.clone(),
            initial_node_count: spec.initial_node_count,
            min_master_version: version.to_string(),
            node_version: version.to_string(),
            node_config: NodeConfig {
                machine_type: spec.machine_type.clone(),
                oauth_scopes: spec.oauth_scopes.clone(),
            },
        }
    }

    /// Translate into the GKE `clusters.create` request body
    pub fn to_request(&self) -> CreateClusterRequest {
        CreateClusterRequest {
            cluster: ClusterRequest {
                name: self.name.clone(),
                initial_cluster_version: self.min_master_version.clone(),
                node_pools: vec![NodePool {
                    name: names::NODE_POOL.to_string(),
                    initial_node_count: self.initial_node_count,
                    version: self.node_version.clone(),
                    config: self.node_config.clone(),
                }],
            },
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NodeConfig {
    pub machine_type: String,
    pub oauth_scopes: Vec<String>,
}

#[derive(Serialize, Clone, Debug)]
pub struct CreateClusterRequest {
    pub cluster: ClusterRequest,
}

#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ClusterRequest {
    pub name: String,
    pub initial_cluster_version: String,
    pub node_pools: Vec<NodePool>,
}

#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct NodePool {
    pub name: String,
    pub initial_node_count: i32,
    pub version: String,
    pub config: NodeConfig,
}

/// Response of `projects.locations.getServerConfig`
#[derive(Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ServerConfig {
    /// Ordered newest first
    #[serde(default)]
    pub valid_master_versions: Vec<String>,
}

impl ServerConfig {
    pub fn latest_master_version(&self) -> Option<&str> {
        self.valid_master_versions.first().map(String::as_str)
    }
}

/// The subset of a GKE cluster resource the workflow reads back
#[derive(Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct Cluster {
    pub name: String,
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub master_auth: Option<MasterAuth>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct MasterAuth {
    #[serde(default)]
    pub cluster_ca_certificate: Option<String>,
}

/// Long-running GKE operation
#[derive(Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    pub name: String,
    pub status: OperationStatus,
    #[serde(default)]
    pub status_message: Option<String>,
    #[serde(default)]
    pub error: Option<OperationError>,
}

#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperationStatus {
    StatusUnspecified,
    Pending,
    Running,
    Done,
    Aborting,
}

#[derive(Deserialize, Clone, Debug)]
pub struct OperationError {
    #[serde(default)]
    pub code: i32,
    #[serde(default)]
    pub message: String,
}

impl Operation {
    pub fn is_done(&self) -> bool {
        self.status == OperationStatus::Done
    }

    /// Failure message if the operation ended badly
    pub fn failure(&self) -> Option<String> {
        if let Some(error) = &self.error {
            return Some(error.message.clone());
        }
        match self.status {
            OperationStatus::Aborting => Some(
                self.status_message
                    .clone()
                    .unwrap_or_else(|| format!("operation {} aborted", self.name)),
            ),
            _ => None,
        }
    }
}
