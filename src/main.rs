// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use pickard::config::Config;
use pickard::gke::GkeClient;
use pickard::kubernetes::KubeconfigConnector;
use pickard::workflow::Workflow;

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr, stdout carries the workflow outputs
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("Starting pickard provisioning workflow");

    let config = Config::from_env()?;
    info!(
        "Configuration loaded: project={}, zone={}",
        config.project, config.zone
    );

    let engine = GkeClient::new(&config)?;
    let workflow = Workflow::new(
        Arc::new(engine),
        Arc::new(KubeconfigConnector),
        config.workflow_spec(),
    );

    let outputs = workflow.run().await?;

    println!("deployment => {}", outputs.deployment_id);
    println!("service => {}", outputs.service_id);
    if let Some(address) = &outputs.load_balancer {
        info!("Service reachable at http://{}", address);
    }

    if let Some(path) = &config.kubeconfig_out {
        tokio::fs::write(path, outputs.kubeconfig.as_str())
            .await
            .with_context(|| format!("Failed to write kubeconfig to {}", path.display()))?;
        info!("Kubeconfig written to {}", path.display());
    }

    println!("{}", serde_json::to_string_pretty(&outputs.exports())?);

    Ok(())
}
