// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubeconfig synthesis for a provisioned GKE cluster.
//!
//! The document authenticates through the `gcp` auth provider, which shells out to
//! `gcloud config config-helper` for a fresh token, so it can be consumed by any
//! kubectl-compatible client.

use crate::constants::kubeconfig::{
    AUTH_PROVIDER, CMD_ARGS, CMD_PATH, CONTEXT_PREFIX, EXPIRY_KEY, TOKEN_KEY,
};
use crate::error::{PickardError, Result};
use kube::config::Kubeconfig;

/// A rendered kubeconfig with a single cluster, context and user, all named after the context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialDocument {
    context: String,
    yaml: String,
}

impl CredentialDocument {
    pub fn context(&self) -> &str {
        &self.context
    }

    pub fn as_str(&self) -> &str {
        &self.yaml
    }

    /// Parse the document into kube's kubeconfig model
    pub fn to_kubeconfig(&self) -> Result<Kubeconfig> {
        serde_yaml::from_str(&self.yaml)
            .map_err(|e| PickardError::KubeconfigError(format!("Failed to parse kubeconfig: {}", e)))
    }
}

/// Context name for a cluster
pub fn context_name(cluster_name: &str) -> String {
    format!("{}{}", CONTEXT_PREFIX, cluster_name)
}

/// Render the kubeconfig for a cluster. Inputs are used as given.
pub fn synthesize(endpoint: &str, cluster_name: &str, ca_certificate: &str) -> CredentialDocument {
    let context = context_name(cluster_name);

    let yaml = [
        "apiVersion: v1".to_string(),
        "clusters:".to_string(),
        "- cluster:".to_string(),
        format!("    certificate-authority-data: {}", ca_certificate),
        format!("    server: https://{}", endpoint),
        format!("  name: {}", context),
        "contexts:".to_string(),
        "- context:".to_string(),
        format!("    cluster: {}", context),
        format!("    user: {}", context),
        format!("  name: {}", context),
        format!("current-context: {}", context),
        "kind: Config".to_string(),
        "preferences: {}".to_string(),
        "users:".to_string(),
        format!("- name: {}", context),
        "  user:".to_string(),
        "    auth-provider:".to_string(),
        "      config:".to_string(),
        format!("        cmd-args: {}", CMD_ARGS),
        format!("        cmd-path: {}", CMD_PATH),
        format!("        expiry-key: '{}'", EXPIRY_KEY),
        format!("        token-key: '{}'", TOKEN_KEY),
        format!("      name: {}", AUTH_PROVIDER),
    ]
    .join("\n");

    CredentialDocument { context, yaml }
}
