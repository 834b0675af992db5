// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::error::{PickardError, Result};
use crate::gke::ContainerEngine;
use tracing::{info, instrument};

/// Query the engine's version catalog and pick the latest control plane version
#[instrument(skip(engine))]
pub async fn resolve_latest_version(engine: &dyn ContainerEngine) -> Result<String> {
    let catalog = engine.server_config().await?;

    let Some(version) = catalog.latest_master_version() else {
        return Err(PickardError::VersionCatalog(
            "no master versions offered".to_string(),
        ));
    };

    let version = version.trim();
    if version.is_empty() {
        return Err(PickardError::VersionCatalog(
            "latest master version is empty".to_string(),
        ));
    }

    info!("Latest GKE master version is {}", version);
    Ok(version.to_string())
}
