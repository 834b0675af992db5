// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Test doubles for the GKE API and the Kubernetes API, sharing one call journal.

use crate::error::{PickardError, Result};
use crate::gke::ContainerEngine;
use crate::kubernetes::{ClusterConnector, CredentialDocument};
use crate::types::cluster::{
    Cluster, CreateClusterRequest, MasterAuth, Operation, OperationError, OperationStatus,
    ServerConfig,
};
use async_trait::async_trait;
use http::{Request, Response};
use http_body_util::BodyExt;
use kube::client::Body;
use kube::Client;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use tower::Service;

/// Ordered log of every call made against the test doubles
pub type Journal = Arc<Mutex<Vec<String>>>;

pub fn journal() -> Journal {
    Arc::new(Mutex::new(Vec::new()))
}

/// A mock HTTP service that returns predefined responses based on request paths.
#[derive(Clone)]
pub struct MockService {
    responses: Arc<Mutex<HashMap<(String, String), (u16, String)>>>,
    journal: Journal,
    bodies: Arc<Mutex<Vec<serde_json::Value>>>,
}

impl MockService {
    pub fn with_journal(journal: Journal) -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            journal,
            bodies: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn on(self, method: &str, path: &str, status: u16, body: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert((method.to_string(), path.to_string()), (status, body.to_string()));
        self
    }

    /// Add a response for GET requests matching the path
    pub fn on_get(self, path: &str, status: u16, body: &str) -> Self {
        self.on("GET", path, status, body)
    }

    /// Add a response for PATCH requests matching the path
    pub fn on_patch(self, path: &str, status: u16, body: &str) -> Self {
        self.on("PATCH", path, status, body)
    }

    /// Build a kube Client from this mock service
    pub fn into_client(self) -> Client {
        Client::new(self, "default")
    }

    pub fn journal(&self) -> Journal {
        self.journal.clone()
    }

    /// JSON bodies of the requests received so far, in arrival order
    pub fn bodies(&self) -> Vec<serde_json::Value> {
        self.bodies.lock().unwrap().clone()
    }

    fn find_response(&self, method: &str, path: &str) -> Option<(u16, String)> {
        let responses = self.responses.lock().unwrap();

        if let Some(resp) = responses.get(&(method.to_string(), path.to_string())) {
            return Some(resp.clone());
        }

        // Longest registered prefix wins, so /namespaces/x does not shadow /namespaces/x/services/y
        responses
            .iter()
            .filter(|((m, p), _)| m == method && path.starts_with(p.as_str()))
            .max_by_key(|((_, p), _)| p.len())
            .map(|(_, resp)| resp.clone())
    }
}

impl Service<Request<Body>> for MockService {
    type Response = Response<Body>;
    type Error = tower::BoxError;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = std::result::Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<std::result::Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let method = req.method().to_string();
        let path = req.uri().path().to_string();

        self.journal
            .lock()
            .unwrap()
            .push(format!("{} {}", method, path));
        let response = self.find_response(&method, &path);
        let bodies = self.bodies.clone();

        Box::pin(async move {
            let bytes = req
                .into_body()
                .collect()
                .await
                .map_err(tower::BoxError::from)?
                .to_bytes();
            if let Ok(json) = serde_json::from_slice(&bytes) {
                bodies.lock().unwrap().push(json);
            }

            let (status, body) = response.unwrap_or_else(|| {
                (
                    404,
                    r#"{"kind":"Status","apiVersion":"v1","status":"Failure","message":"not found","reason":"NotFound","code":404}"#
                        .to_string(),
                )
            });
            Ok(Response::builder()
                .status(status)
                .header("content-type", "application/json")
                .body(Body::from(body.into_bytes()))
                .unwrap())
        })
    }
}

/// In-memory GKE. Creation operations stay RUNNING for a configurable number of polls.
pub struct FakeEngine {
    journal: Journal,
    versions: Vec<String>,
    catalog_error: Option<(u16, String)>,
    create_error: Option<(u16, String)>,
    operation_error: Option<String>,
    pending_polls: Mutex<u32>,
    endpoint: Option<String>,
    created: Mutex<Vec<CreateClusterRequest>>,
}

impl FakeEngine {
    pub fn new(journal: Journal) -> Self {
        Self {
            journal,
            versions: vec!["1.14.10-gke.27".to_string()],
            catalog_error: None,
            create_error: None,
            operation_error: None,
            pending_polls: Mutex::new(0),
            endpoint: Some("34.1.2.3".to_string()),
            created: Mutex::new(Vec::new()),
        }
    }

    pub fn with_versions(mut self, versions: &[&str]) -> Self {
        self.versions = versions.iter().map(|v| v.to_string()).collect();
        self
    }

    pub fn failing_catalog(mut self, status: u16, message: &str) -> Self {
        self.catalog_error = Some((status, message.to_string()));
        self
    }

    pub fn failing_create(mut self, status: u16, message: &str) -> Self {
        self.create_error = Some((status, message.to_string()));
        self
    }

    /// The operation finishes with this error
    pub fn with_operation_error(mut self, message: &str) -> Self {
        self.operation_error = Some(message.to_string());
        self
    }

    pub fn with_pending_polls(self, polls: u32) -> Self {
        *self.pending_polls.lock().unwrap() = polls;
        self
    }

    pub fn without_endpoint(mut self) -> Self {
        self.endpoint = None;
        self
    }

    /// Creation requests received so far
    pub fn created(&self) -> Vec<CreateClusterRequest> {
        self.created.lock().unwrap().clone()
    }

    fn record(&self, entry: &str) {
        self.journal.lock().unwrap().push(entry.to_string());
    }

    fn operation(&self) -> Operation {
        let pending = *self.pending_polls.lock().unwrap();
        let (status, error) = if pending > 0 {
            (OperationStatus::Running, None)
        } else {
            (
                OperationStatus::Done,
                self.operation_error.as_ref().map(|message| OperationError {
                    code: 8,
                    message: message.clone(),
                }),
            )
        };

        Operation {
            name: "operation-create-demo-cluster".to_string(),
            status,
            status_message: None,
            error,
        }
    }
}

#[async_trait]
impl ContainerEngine for FakeEngine {
    async fn server_config(&self) -> Result<ServerConfig> {
        self.record("gke serverConfig");
        if let Some((status, message)) = &self.catalog_error {
            return Err(PickardError::Gke {
                status: *status,
                message: message.clone(),
            });
        }
        Ok(ServerConfig {
            valid_master_versions: self.versions.clone(),
            ..Default::default()
        })
    }

    async fn create_cluster(&self, request: &CreateClusterRequest) -> Result<Operation> {
        self.record("gke createCluster");
        if let Some((status, message)) = &self.create_error {
            return Err(PickardError::Gke {
                status: *status,
                message: message.clone(),
            });
        }
        self.created.lock().unwrap().push(request.clone());
        Ok(self.operation())
    }

    async fn get_operation(&self, _name: &str) -> Result<Operation> {
        self.record("gke getOperation");
        {
            let mut pending = self.pending_polls.lock().unwrap();
            *pending = pending.saturating_sub(1);
        }
        Ok(self.operation())
    }

    async fn get_cluster(&self, name: &str) -> Result<Cluster> {
        self.record("gke getCluster");
        Ok(Cluster {
            name: name.to_string(),
            endpoint: self.endpoint.clone(),
            master_auth: Some(MasterAuth {
                cluster_ca_certificate: Some("QkFTRTY0Q0VSVA==".to_string()),
            }),
            status: Some("RUNNING".to_string()),
            ..Default::default()
        })
    }
}

/// Connector that hands out clients backed by a [`MockService`]
pub struct FakeConnector {
    mock: MockService,
}

impl FakeConnector {
    pub fn new(mock: MockService) -> Self {
        Self { mock }
    }
}

#[async_trait]
impl ClusterConnector for FakeConnector {
    async fn connect(&self, kubeconfig: &CredentialDocument) -> Result<Client> {
        self.mock
            .journal()
            .lock()
            .unwrap()
            .push(format!("connect {}", kubeconfig.context()));
        Ok(self.mock.clone().into_client())
    }
}

/// Create a mock namespace JSON response
pub fn namespace_json(name: &str) -> String {
    serde_json::json!({
        "apiVersion": "v1",
        "kind": "Namespace",
        "metadata": {
            "name": name,
            "uid": format!("uid-{}", name)
        }
    })
    .to_string()
}

pub fn deployment_json(namespace: &str, name: &str) -> String {
    serde_json::json!({
        "apiVersion": "apps/v1",
        "kind": "Deployment",
        "metadata": {
            "name": name,
            "namespace": namespace,
            "uid": format!("uid-{}", name)
        },
        "spec": {
            "replicas": 3,
            "selector": { "matchLabels": { "app": "pickard-app" } },
            "template": {
                "metadata": { "labels": { "app": "pickard-app" } },
                "spec": { "containers": [{ "name": name, "image": "ronaldcrb/node-pickard" }] }
            }
        }
    })
    .to_string()
}

pub fn service_json(namespace: &str, name: &str) -> String {
    serde_json::json!({
        "apiVersion": "v1",
        "kind": "Service",
        "metadata": {
            "name": name,
            "namespace": namespace,
            "uid": format!("uid-{}", name)
        },
        "spec": {
            "type": "LoadBalancer",
            "selector": { "app": "pickard-app" },
            "ports": [{ "port": 80, "targetPort": 3000 }]
        }
    })
    .to_string()
}

/// A deployment whose rollout has finished for its latest generation
pub fn ready_deployment_json(namespace: &str, name: &str) -> String {
    let mut deployment: serde_json::Value =
        serde_json::from_str(&deployment_json(namespace, name)).unwrap();
    deployment["metadata"]["generation"] = serde_json::json!(1);
    deployment["status"] = serde_json::json!({
        "observedGeneration": 1,
        "replicas": 3,
        "updatedReplicas": 3,
        "readyReplicas": 3,
        "availableReplicas": 3
    });
    deployment.to_string()
}

/// A service whose load balancer has been assigned an ingress IP
pub fn exposed_service_json(namespace: &str, name: &str, ip: &str) -> String {
    let mut service: serde_json::Value =
        serde_json::from_str(&service_json(namespace, name)).unwrap();
    service["status"] = serde_json::json!({
        "loadBalancer": { "ingress": [{ "ip": ip }] }
    });
    service.to_string()
}

/// Wrap objects in the body of a LIST response
pub fn list_json(api_version: &str, kind: &str, items: &[String]) -> String {
    let items: Vec<serde_json::Value> = items
        .iter()
        .map(|item| serde_json::from_str(item).unwrap())
        .collect();
    serde_json::json!({
        "apiVersion": api_version,
        "kind": kind,
        "metadata": { "resourceVersion": "100" },
        "items": items
    })
    .to_string()
}
