// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Selector labels shared by the deployment and the service that routes to it

use k8s_openapi::apimachinery::pkg::apis::meta::v1::LabelSelector;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Immutable label set. One value is handed to both the workload and the
/// service so their selectors cannot drift apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppLabels(Arc<BTreeMap<String, String>>);

impl AppLabels {
    /// `{app: <app>}`
    pub fn new(app: &str) -> Self {
        Self(Arc::new(BTreeMap::from([(
            "app".to_string(),
            app.to_string(),
        )])))
    }

    pub fn to_map(&self) -> BTreeMap<String, String> {
        (*self.0).clone()
    }

    pub fn selector(&self) -> LabelSelector {
        LabelSelector {
            match_labels: Some(self.to_map()),
            ..Default::default()
        }
    }
}
