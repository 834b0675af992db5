// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PickardError {
    #[error("Kubernetes API error: {0}")]
    KubeError(#[from] kube::Error),

    #[error("Kubeconfig error: {0}")]
    KubeconfigError(String),

    #[error("Version catalog query failed: {0}")]
    VersionCatalog(String),

    #[error("Cluster creation failed: {0}")]
    ClusterCreation(String),

    #[error("GKE API error: {status} - {message}")]
    Gke { status: u16, message: String },

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to obtain access token: {0}")]
    Token(String),

    #[error("Resource not ready: {0}")]
    Readiness(String),

    #[error("Output abandoned before it was resolved")]
    Abandoned,

    /// A deferred output was rejected by its producer
    #[error(transparent)]
    Upstream(Arc<PickardError>),
}

impl From<kube_runtime::wait::Error> for PickardError {
    fn from(e: kube_runtime::wait::Error) -> Self {
        PickardError::Readiness(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PickardError>;
