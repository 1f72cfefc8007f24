//! One-way marker gating the unique-observation channel.
//!
//! The flag records that this device's eligibility for the unique channel
//! has been consumed, not that a delivery succeeded. It is set before the
//! delivery starts and is never cleared by the application. The key carries
//! a policy version so a redeploy can start a new population without
//! touching the device token or the stored record.

use std::sync::Arc;

use destiny_shared::constants::{DEDUP_KEY_PREFIX, FLAG_SET_VALUE};

use crate::error::Result;
use crate::kv::KvStore;

#[derive(Clone)]
pub struct DedupFlag {
    kv: Arc<dyn KvStore>,
    key: String,
}

impl DedupFlag {
    pub fn new(kv: Arc<dyn KvStore>, version: &str) -> Self {
        Self {
            kv,
            key: format!("{DEDUP_KEY_PREFIX}{version}"),
        }
    }

    /// Storage key, e.g. `star_destiny_synced_unique_v5_final`.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn is_set(&self) -> Result<bool> {
        Ok(self.kv.get(&self.key)?.is_some())
    }

    /// Set the flag if it is not set yet.
    ///
    /// Returns `true` when this call set it, i.e. the caller now owns the
    /// single unique delivery for this device.
    /// The check and the write are one step in the store, so concurrent
    /// claimers sharing a database file get exactly one `true`.
    pub fn claim(&self) -> Result<bool> {
        self.kv.set_if_absent(&self.key, FLAG_SET_VALUE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Barrier;
    use std::thread;

    use crate::database::Database;
    use crate::kv::MemoryStore;

    #[test]
    fn claim_once() {
        let flag = DedupFlag::new(Arc::new(MemoryStore::new()), "v5_final");
        assert_eq!(flag.key(), "star_destiny_synced_unique_v5_final");
        assert!(!flag.is_set().unwrap());

        assert!(flag.claim().unwrap());
        assert!(flag.is_set().unwrap());
        assert!(!flag.claim().unwrap());
        assert!(!flag.claim().unwrap());
    }

    #[test]
    fn new_version_starts_fresh() {
        let kv: Arc<dyn KvStore> = Arc::new(MemoryStore::new());
        assert!(DedupFlag::new(kv.clone(), "v5_final").claim().unwrap());
        assert!(DedupFlag::new(kv.clone(), "v6").claim().unwrap());
        assert!(!DedupFlag::new(kv, "v5_final").claim().unwrap());
    }

    #[test]
    fn any_stored_value_counts_as_set() {
        let kv = Arc::new(MemoryStore::new());
        kv.set("star_destiny_synced_unique_v1", "1").unwrap();
        assert!(!DedupFlag::new(kv, "v1").claim().unwrap());
    }

    #[test]
    fn concurrent_claims_across_handles_yield_one_winner() {
        const HANDLES: usize = 8;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dedup.db");
        let handles: Vec<Arc<dyn KvStore>> = (0..HANDLES)
            .map(|_| Arc::new(Database::open_at(&path).unwrap()) as Arc<dyn KvStore>)
            .collect();

        for round in 0..20 {
            let version = format!("r{round}");
            let barrier = Arc::new(Barrier::new(HANDLES));
            let workers: Vec<_> = handles
                .iter()
                .cloned()
                .map(|kv| {
                    let barrier = barrier.clone();
                    let version = version.clone();
                    thread::spawn(move || {
                        let flag = DedupFlag::new(kv, &version);
                        barrier.wait();
                        flag.claim().unwrap()
                    })
                })
                .collect();

            let winners = workers
                .into_iter()
                .map(|w| w.join().unwrap())
                .filter(|won| *won)
                .count();
            assert_eq!(winners, 1, "round {round}");
        }
    }

    #[test]
    fn concurrent_claims_on_shared_memory_store() {
        let kv: Arc<dyn KvStore> = Arc::new(MemoryStore::new());
        let barrier = Arc::new(Barrier::new(8));
        let workers: Vec<_> = (0..8)
            .map(|_| {
                let kv = kv.clone();
                let barrier = barrier.clone();
                thread::spawn(move || {
                    barrier.wait();
                    DedupFlag::new(kv, "v5_final").claim().unwrap()
                })
            })
            .collect();

        let winners = workers
            .into_iter()
            .map(|w| w.join().unwrap())
            .filter(|won| *won)
            .count();
        assert_eq!(winners, 1);
    }
}
