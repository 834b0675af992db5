// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Namespace management

use crate::constants::FIELD_MANAGER;
use crate::error::Result;
use k8s_openapi::api::core::v1::Namespace;
use kube::{
    api::{ObjectMeta, Patch, PatchParams},
    Api, Client,
};
use tracing::{info, instrument};

/// Apply the namespace, creating it on first run and converging it afterwards
#[instrument(skip(client))]
pub async fn apply_namespace(client: &Client, namespace: &str) -> Result<Namespace> {
    let namespaces: Api<Namespace> = Api::all(client.clone());

    let ns = Namespace {
        metadata: ObjectMeta {
            name: Some(namespace.to_string()),
            ..Default::default()
        },
        ..Default::default()
    };

    info!("Applying namespace {}", namespace);
    let pp = PatchParams::apply(FIELD_MANAGER).force();
    let applied = namespaces.patch(namespace, &pp, &Patch::Apply(&ns)).await?;
    info!("Namespace {} applied", namespace);

    Ok(applied)
}
