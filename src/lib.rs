// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
pub mod config;
pub mod constants;
pub mod error;
pub mod gke;
pub mod kubernetes;
pub mod output;
pub mod types;
pub mod workflow;

#[cfg(test)]
pub mod test_utils;
