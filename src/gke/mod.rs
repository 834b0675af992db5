// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Managed Kubernetes engine access: version catalog and cluster provisioning.

pub mod client;
pub mod cluster;
pub mod versions;

pub use client::{ContainerEngine, GkeClient, TokenSource};
pub use cluster::{ClusterHandle, ClusterOutputs, ClusterProvisioner};
pub use versions::resolve_latest_version;
