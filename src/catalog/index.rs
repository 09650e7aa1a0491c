//! Optional time-boxed snapshot of the flat catalog.
//!
//! With a zero TTL the index is a pass-through and every request walks the
//! tree. Otherwise the last scan is shared until it expires or is invalidated.

use super::scanner::{Catalog, TreeScanner};
use parking_lot::RwLock;
use reelshelf_common::Result;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

struct Snapshot {
    taken_at: Instant,
    catalog: Arc<Catalog>,
}

pub struct CatalogIndex {
    ttl: Duration,
    snapshot: RwLock<Option<Snapshot>>,
}

impl CatalogIndex {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            snapshot: RwLock::new(None),
        }
    }

    pub fn is_enabled(&self) -> bool {
        !self.ttl.is_zero()
    }

    /// Return the current snapshot, rescanning if it is missing or stale.
    ///
    /// A failed rescan leaves the previous snapshot in place.
    pub fn get_or_scan(&self, scanner: &TreeScanner) -> Result<Arc<Catalog>> {
        if !self.is_enabled() {
            return scanner.scan().map(Arc::new);
        }

        if let Some(snapshot) = self.snapshot.read().as_ref() {
            if snapshot.taken_at.elapsed() < self.ttl {
                return Ok(Arc::clone(&snapshot.catalog));
            }
        }

        debug!("Catalog snapshot missing or expired, rescanning");
        let catalog = Arc::new(scanner.scan()?);
        *self.snapshot.write() = Some(Snapshot {
            taken_at: Instant::now(),
            catalog: Arc::clone(&catalog),
        });
        Ok(catalog)
    }

    /// Drop the current snapshot so the next read rescans.
    pub fn invalidate(&self) {
        *self.snapshot.write() = None;
    }
}
