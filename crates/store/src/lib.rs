//! In-memory record store standing in for a remote roster backend.

use std::{
    sync::atomic::{AtomicBool, AtomicI64, Ordering},
    time::Duration,
};

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use shared::{
    domain::{DeleteReceipt, HeroDraft, HeroId, HeroRecord},
    error::StoreUnavailable,
};

/// Asynchronous CRUD surface the roster controller is written against.
/// Failures are opaque: callers branch on success vs. failure only.
#[async_trait]
pub trait RecordBackend: Send + Sync {
    /// Snapshot copy of all current records in internal order.
    async fn list(&self) -> Result<Vec<HeroRecord>>;
    /// Assigns a fresh unique id, appends, and returns the stored record.
    /// Field validation is the caller's responsibility.
    async fn create(&self, draft: HeroDraft) -> Result<HeroRecord>;
    /// Replaces the stored fields in place by id. An unknown id is a silent
    /// no-op that still returns the input unchanged.
    async fn update(&self, record: HeroRecord) -> Result<HeroRecord>;
    /// Removes the record if present; silent no-op otherwise. Always
    /// resolves with a receipt for the requested id.
    async fn delete(&self, id: HeroId) -> Result<DeleteReceipt>;
}

/// Per-operation artificial delays applied before any state is touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatencyProfile {
    pub list: Duration,
    pub mutate: Duration,
}

impl LatencyProfile {
    pub fn none() -> Self {
        Self {
            list: Duration::ZERO,
            mutate: Duration::ZERO,
        }
    }
}

impl Default for LatencyProfile {
    fn default() -> Self {
        Self {
            list: Duration::from_millis(800),
            mutate: Duration::from_millis(500),
        }
    }
}

/// Exclusive owner of the roster records. Identity comes from a monotonic
/// counter, so rapid sequential creates never collide.
pub struct MemoryStore {
    records: Mutex<Vec<HeroRecord>>,
    next_id: AtomicI64,
    latency: LatencyProfile,
    unstable: AtomicBool,
}

impl MemoryStore {
    pub fn new(latency: LatencyProfile) -> Self {
        Self::with_records(latency, Vec::new())
    }

    pub fn with_records(latency: LatencyProfile, seed: Vec<HeroRecord>) -> Self {
        let next_id = seed.iter().map(|record| record.id.0).max().unwrap_or(0) + 1;
        Self {
            records: Mutex::new(seed),
            next_id: AtomicI64::new(next_id),
            latency,
            unstable: AtomicBool::new(false),
        }
    }

    /// While set, every operation resolves to a failure after its usual
    /// latency elapses.
    pub fn set_unstable(&self, unstable: bool) {
        self.unstable.store(unstable, Ordering::SeqCst);
    }

    async fn simulate_round_trip(&self, latency: Duration) -> Result<()> {
        tokio::time::sleep(latency).await;
        if self.unstable.load(Ordering::SeqCst) {
            return Err(StoreUnavailable.into());
        }
        Ok(())
    }
}

#[async_trait]
impl RecordBackend for MemoryStore {
    async fn list(&self) -> Result<Vec<HeroRecord>> {
        self.simulate_round_trip(self.latency.list).await?;
        let records = self.records.lock().await;
        debug!(count = records.len(), "store: list");
        Ok(records.clone())
    }

    async fn create(&self, draft: HeroDraft) -> Result<HeroRecord> {
        self.simulate_round_trip(self.latency.mutate).await?;
        let record = HeroRecord {
            id: HeroId(self.next_id.fetch_add(1, Ordering::SeqCst)),
            name: draft.name,
            power: draft.power,
        };
        let mut records = self.records.lock().await;
        records.push(record.clone());
        debug!(id = record.id.0, "store: record created");
        Ok(record)
    }

    async fn update(&self, record: HeroRecord) -> Result<HeroRecord> {
        self.simulate_round_trip(self.latency.mutate).await?;
        let mut records = self.records.lock().await;
        match records.iter_mut().find(|stored| stored.id == record.id) {
            Some(stored) => {
                *stored = record.clone();
                debug!(id = record.id.0, "store: record updated");
            }
            None => warn!(id = record.id.0, "store: update for unknown id ignored"),
        }
        Ok(record)
    }

    async fn delete(&self, id: HeroId) -> Result<DeleteReceipt> {
        self.simulate_round_trip(self.latency.mutate).await?;
        let mut records = self.records.lock().await;
        let before = records.len();
        records.retain(|stored| stored.id != id);
        if records.len() < before {
            debug!(id = id.0, "store: record deleted");
        } else {
            warn!(id = id.0, "store: delete for unknown id ignored");
        }
        Ok(DeleteReceipt { id })
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
