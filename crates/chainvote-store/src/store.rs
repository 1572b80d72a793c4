//! # Store Writer and Reader Handles
//!
//! Built on `tokio::sync::watch`: the writer half lives in [`ObserverStore`],
//! readers are cloneable [`StoreReader`]s. Watch semantics fit the store
//! contract exactly — readers want the latest consistent snapshot, not a
//! replayable event log.

use std::sync::atomic::{AtomicU64, Ordering};

use thiserror::Error;
use tokio::sync::watch;
use tracing::debug;

use crate::snapshot::AppSnapshot;

/// The store writer was dropped; no further snapshots will arrive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("observer store closed")]
pub struct StoreClosed;

/// Writer half of the store. Not `Clone`: single-writer by construction.
pub struct ObserverStore {
    sender: watch::Sender<AppSnapshot>,
    publishes: AtomicU64,
}

impl ObserverStore {
    /// Create a store holding the empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        let (sender, _) = watch::channel(AppSnapshot::default());
        Self {
            sender,
            publishes: AtomicU64::new(0),
        }
    }

    /// Current snapshot, cloned out.
    #[must_use]
    pub fn snapshot(&self) -> AppSnapshot {
        self.sender.borrow().clone()
    }

    /// Register a new reader.
    #[must_use]
    pub fn subscribe(&self) -> StoreReader {
        StoreReader {
            receiver: self.sender.subscribe(),
        }
    }

    /// Apply `mutate` to the snapshot and publish the result to all readers.
    ///
    /// The mutation runs under the watch lock, so readers observe either the
    /// old snapshot or the fully-updated one, never an intermediate state.
    pub fn publish<F>(&self, mutate: F)
    where
        F: FnOnce(&mut AppSnapshot),
    {
        self.sender.send_modify(mutate);
        let n = self.publishes.fetch_add(1, Ordering::Relaxed) + 1;
        debug!(publishes = n, "store snapshot published");
    }

    /// Total publishes since creation.
    pub fn publishes(&self) -> u64 {
        self.publishes.load(Ordering::Relaxed)
    }
}

impl Default for ObserverStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Cloneable read handle.
#[derive(Debug, Clone)]
pub struct StoreReader {
    receiver: watch::Receiver<AppSnapshot>,
}

impl StoreReader {
    /// Latest published snapshot, cloned out. Never blocks.
    #[must_use]
    pub fn current(&self) -> AppSnapshot {
        self.receiver.borrow().clone()
    }

    /// Wait for the next publish and return it.
    ///
    /// Returns [`StoreClosed`] once the writer has been dropped.
    pub async fn changed(&mut self) -> Result<AppSnapshot, StoreClosed> {
        self.receiver.changed().await.map_err(|_| StoreClosed)?;
        Ok(self.receiver.borrow_and_update().clone())
    }
}
