// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! GKE REST API client

use crate::config::Config;
use crate::constants::gke::{API_BASE, REQUEST_TIMEOUT_SECS};
use crate::error::{PickardError, Result};
use crate::types::cluster::{Cluster, CreateClusterRequest, Operation, ServerConfig};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, instrument, warn};
use url::Url;

/// The managed Kubernetes engine calls the workflow depends on
#[async_trait]
pub trait ContainerEngine: Send + Sync {
    /// Version catalog for the configured location
    async fn server_config(&self) -> Result<ServerConfig>;

    /// Submit a cluster creation, returning the long-running operation
    async fn create_cluster(&self, request: &CreateClusterRequest) -> Result<Operation>;

    async fn get_operation(&self, name: &str) -> Result<Operation>;

    async fn get_cluster(&self, name: &str) -> Result<Cluster>;
}

/// Where the bearer token for the GKE API comes from
#[derive(Debug, Clone)]
pub enum TokenSource {
    Static(String),
    /// `gcloud auth print-access-token`, invoked per request
    Gcloud,
}

impl TokenSource {
    pub async fn token(&self) -> Result<String> {
        match self {
            TokenSource::Static(token) => Ok(token.clone()),
            TokenSource::Gcloud => {
                let output = Command::new("gcloud")
                    .args(["auth", "print-access-token"])
                    .output()
                    .await
                    .map_err(|e| PickardError::Token(format!("Failed to run gcloud: {}", e)))?;

                if !output.status.success() {
                    return Err(PickardError::Token(
                        String::from_utf8_lossy(&output.stderr).trim().to_string(),
                    ));
                }

                Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
            }
        }
    }
}

/// GKE client scoped to one project and location
#[derive(Clone)]
pub struct GkeClient {
    http: reqwest::Client,
    base_url: Url,
    token: TokenSource,
}

impl GkeClient {
    pub fn new(config: &Config) -> Result<Self> {
        let token = match &config.access_token {
            Some(token) => TokenSource::Static(token.clone()),
            None => TokenSource::Gcloud,
        };
        Self::with_base(API_BASE, &config.project, &config.zone, token)
    }

    /// Create a client against a custom API root
    pub fn with_base(api_base: &str, project: &str, zone: &str, token: TokenSource) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        let base_url =
            Url::parse(api_base)?.join(&format!("projects/{}/locations/{}/", project, zone))?;

        Ok(Self {
            http,
            base_url,
            token,
        })
    }

    fn url(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    async fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let token = self.token.token().await?;
        let value = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|e| PickardError::Token(format!("Invalid token: {}", e)))?;
        headers.insert(AUTHORIZATION, value);

        Ok(headers)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path)?;
        debug!("GET {}", url);
        let response = self
            .http
            .get(url)
            .headers(self.headers().await?)
            .send()
            .await?;

        handle_response(response).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(&self, path: &str, body: &B) -> Result<T> {
        let url = self.url(path)?;
        debug!("POST {}", url);
        let response = self
            .http
            .post(url)
            .headers(self.headers().await?)
            .json(body)
            .send()
            .await?;

        handle_response(response).await
    }
}

async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    if status.is_success() {
        Ok(response.json().await?)
    } else {
        let body = response
            .text()
            .await
            .inspect_err(|e| warn!("Failed to read error response body: {}", e))
            .ok();
        Err(PickardError::Gke {
            status: status.as_u16(),
            message: failure_message(status, body),
        })
    }
}

/// The response body, or the status reason when the body is empty or unreadable
fn failure_message(status: StatusCode, body: Option<String>) -> String {
    body.filter(|b| !b.trim().is_empty()).unwrap_or_else(|| {
        status
            .canonical_reason()
            .unwrap_or("unknown status")
            .to_string()
    })
}

#[async_trait]
impl ContainerEngine for GkeClient {
    #[instrument(skip(self))]
    async fn server_config(&self) -> Result<ServerConfig> {
        self.get("serverConfig").await
    }

    #[instrument(skip(self, request), fields(cluster = %request.cluster.name))]
    async fn create_cluster(&self, request: &CreateClusterRequest) -> Result<Operation> {
        self.post("clusters", request).await
    }

    #[instrument(skip(self))]
    async fn get_operation(&self, name: &str) -> Result<Operation> {
        self.get(&format!("operations/{}", name)).await
    }

    #[instrument(skip(self))]
    async fn get_cluster(&self, name: &str) -> Result<Cluster> {
        self.get(&format!("clusters/{}", name)).await
    }
}
