//! Time-boxed snapshot cache.
//!
//! The cache is a host-owned collaborator, never implicit state inside the
//! pipeline: the TUI holds one so month navigation refits without
//! re-fetching, and the `r` key invalidates it explicitly.

use std::time::{Duration, Instant};

use crate::error::AppError;
use crate::pipeline::RawTable;

pub struct SnapshotCache {
    ttl: Duration,
    slot: Option<Entry>,
}

struct Entry {
    fetched_at: Instant,
    table: RawTable,
}

impl SnapshotCache {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, slot: None }
    }

    /// Return the cached table when it is still fresh, otherwise run `fetch`
    /// and store the result. The returned `Duration` is the snapshot's age
    /// (zero for a fresh fetch).
    pub fn get_or_fetch<F>(&mut self, fetch: F) -> Result<(RawTable, Duration), AppError>
    where
        F: FnOnce() -> Result<RawTable, AppError>,
    {
        if let Some(entry) = &self.slot {
            let age = entry.fetched_at.elapsed();
            if age < self.ttl {
                return Ok((entry.table.clone(), age));
            }
        }

        let table = fetch()?;
        self.slot = Some(Entry {
            fetched_at: Instant::now(),
            table: table.clone(),
        });
        Ok((table, Duration::ZERO))
    }

    /// Drop the cached snapshot; the next `get_or_fetch` will re-fetch.
    pub fn invalidate(&mut self) {
        self.slot = None;
    }
}
