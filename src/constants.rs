// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Field manager name used for server-side apply
pub const FIELD_MANAGER: &str = "pickard";

/// Names of the resources created by the workflow
pub mod names {
    pub const CLUSTER: &str = "demo-cluster";
    pub const NAMESPACE: &str = "demo-ns";
    pub const DEPLOYMENT: &str = "pickard-demo";
    pub const SERVICE: &str = "pickard-service";
    /// Value of the `app` label shared by the deployment and the service
    pub const APP: &str = "pickard-app";
    pub const NODE_POOL: &str = "default-pool";
}

/// Node pool policy
pub mod cluster {
    pub const INITIAL_NODE_COUNT: i32 = 2;
    pub const MACHINE_TYPE: &str = "n1-standard-1";
    pub const OAUTH_SCOPES: [&str; 4] = [
        "https://www.googleapis.com/auth/compute",
        "https://www.googleapis.com/auth/devstorage.read_only",
        "https://www.googleapis.com/auth/logging.write",
        "https://www.googleapis.com/auth/monitoring",
    ];
}

/// Workload policy
pub mod workload {
    pub const REPLICAS: i32 = 3;
    pub const IMAGE: &str = "ronaldcrb/node-pickard";
    pub const SERVICE_PORT: i32 = 80;
    pub const TARGET_PORT: i32 = 3000;
    pub const SERVICE_TYPE: &str = "LoadBalancer";
}

/// Kubeconfig synthesis
pub mod kubeconfig {
    pub const CONTEXT_PREFIX: &str = "demo_";
    pub const AUTH_PROVIDER: &str = "gcp";
    pub const CMD_PATH: &str = "gcloud";
    pub const CMD_ARGS: &str = "config config-helper --format=json";
    pub const EXPIRY_KEY: &str = "{.credential.token_expiry}";
    pub const TOKEN_KEY: &str = "{.credential.access_token}";
}

/// GKE API access
pub mod gke {
    pub const API_BASE: &str = "https://container.googleapis.com/v1/";
    pub const REQUEST_TIMEOUT_SECS: u64 = 30;
    /// Initial polling interval in seconds while a cluster operation runs
    pub const POLL_INTERVAL_SECS: u64 = 10;
    /// Maximum polling interval in seconds (exponential backoff cap)
    pub const POLL_MAX_INTERVAL_SECS: u64 = 60;
}

/// How long to wait for rollouts and load balancers
pub const READINESS_TIMEOUT_SECS: u64 = 600;
