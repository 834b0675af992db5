// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Deferred values resolved once by a single producer and awaited by any number of readers.

use crate::error::{PickardError, Result};
use std::sync::Arc;
use tokio::sync::watch;

type Slot<T> = Option<std::result::Result<T, Arc<PickardError>>>;

/// Read side of a deferred value. Cloning yields another reader of the same value.
#[derive(Clone)]
pub struct Output<T> {
    rx: watch::Receiver<Slot<T>>,
}

/// Write side of a deferred value. Consumed on resolution.
pub struct Resolver<T> {
    tx: watch::Sender<Slot<T>>,
}

/// Create an unresolved output and the resolver that settles it
pub fn deferred<T>() -> (Resolver<T>, Output<T>) {
    let (tx, rx) = watch::channel(None);
    (Resolver { tx }, Output { rx })
}

impl<T> Resolver<T> {
    pub fn resolve(self, result: Result<T>) {
        self.tx.send_replace(Some(result.map_err(Arc::new)));
    }
}

impl<T: Clone> Output<T> {
    /// Wait until the producer settles the value.
    /// A rejection is returned to every reader with the producer's original message.
    pub async fn get(&self) -> Result<T> {
        let mut rx = self.rx.clone();
        let slot = rx
            .wait_for(Option::is_some)
            .await
            .map_err(|_| PickardError::Abandoned)?;

        match &*slot {
            Some(Ok(value)) => Ok(value.clone()),
            Some(Err(e)) => Err(PickardError::Upstream(e.clone())),
            None => Err(PickardError::Abandoned),
        }
    }
}
