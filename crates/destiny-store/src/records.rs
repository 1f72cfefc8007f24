//! Single-slot store for the last resolved record.

use std::sync::Arc;

use destiny_shared::catalog;
use destiny_shared::constants::RECORD_KEY;

use crate::error::Result;
use crate::kv::KvStore;
use crate::models::UserRecord;

#[derive(Clone)]
pub struct RecordStore {
    kv: Arc<dyn KvStore>,
}

impl RecordStore {
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self { kv }
    }

    /// Replace the stored record. No history is kept.
    pub fn save(&self, record: &UserRecord) -> Result<()> {
        let json = serde_json::to_string(record)?;
        self.kv.set(RECORD_KEY, &json)?;
        tracing::debug!(
            birth_date = %record.birth_date,
            constellation = %record.constellation_id,
            "saved record"
        );
        Ok(())
    }

    /// Last saved record, or `None`.
    ///
    /// Never fails: an unreadable slot is reported as empty, and an entry
    /// that does not parse (or names a mansion outside the catalog) is
    /// deleted before returning `None`.
    pub fn load_last(&self) -> Option<UserRecord> {
        let raw = match self.kv.get(RECORD_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::error!(error = %e, "failed to read stored record");
                return None;
            }
        };

        match serde_json::from_str::<UserRecord>(&raw) {
            Ok(record) if catalog::get(record.constellation_id).is_some() => Some(record),
            Ok(record) => {
                tracing::warn!(
                    constellation = %record.constellation_id,
                    "stored record names an unknown constellation, discarding"
                );
                self.discard();
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "stored record is corrupt, discarding");
                self.discard();
                None
            }
        }
    }

    /// Remove the stored record.
    pub fn clear(&self) -> Result<()> {
        self.kv.remove(RECORD_KEY)
    }

    fn discard(&self) {
        if let Err(e) = self.clear() {
            tracing::error!(error = %e, "failed to discard stored record");
        }
    }
}
