//! Application state shared by every CLI command.
//!
//! [`AppState`] plays the part of the UI shell: it restores the last result
//! on startup, and on a new submission resolves the date, persists the
//! record and hands it to the submission pipeline without waiting for the
//! deliveries.

use std::sync::Arc;

use tracing::{error, info};

use destiny_shared::catalog::{self, CatalogRecord};
use destiny_shared::{resolve, BirthDate, DeviceToken, InvalidDateError, YearWindow};
use destiny_store::{Enrichment, KvStore, RecordStore, StoreError, UserRecord};

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::pipeline::{SubmissionHandle, SubmissionPipeline};

/// A stored record together with its catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub record: UserRecord,
    pub constellation: &'static CatalogRecord,
}

pub struct AppState {
    records: RecordStore,
    pipeline: SubmissionPipeline,
}

impl AppState {
    pub fn new(kv: Arc<dyn KvStore>, pipeline: SubmissionPipeline) -> Self {
        Self {
            records: RecordStore::new(kv),
            pipeline,
        }
    }

    pub fn from_config(kv: Arc<dyn KvStore>, config: &ClientConfig) -> Result<Self, ClientError> {
        let pipeline = SubmissionPipeline::from_config(kv.clone(), config)?;
        Ok(Self::new(kv, pipeline))
    }

    /// Result from a previous visit, if any.
    pub fn restore(&self) -> Option<Resolution> {
        let record = self.records.load_last()?;
        let constellation = catalog::get(record.constellation_id)?;
        Some(Resolution {
            record,
            constellation,
        })
    }

    /// Resolve a picked date, remember it and relay it.
    ///
    /// Only a bad date is reported. Persistence and delivery problems are
    /// logged; the resolved result is returned regardless.
    pub fn handle_submission(
        &self,
        input: &str,
        enrichment: Option<Enrichment>,
    ) -> Result<(Resolution, SubmissionHandle), InvalidDateError> {
        let birth_date = BirthDate::parse(input.trim(), YearWindow::through_current_year())?;
        let constellation = resolve(birth_date);

        let enrichment = enrichment.filter(|e| !e.is_empty());
        let record = UserRecord::new(birth_date, constellation.id, enrichment);

        if let Err(e) = self.records.save(&record) {
            error!(error = %e, "failed to persist record");
        }
        info!(
            birth_date = %birth_date,
            constellation = constellation.full_name,
            "resolved birth date"
        );

        let handle = self.pipeline.submit(&record, constellation.full_name);

        Ok((
            Resolution {
                record,
                constellation,
            },
            handle,
        ))
    }

    pub fn device_id(&self) -> Result<DeviceToken, StoreError> {
        self.pipeline.identity().get_or_create_device_id()
    }

    /// Forget the stored result so the next visit prompts again. The device
    /// token and dedup flag are kept.
    pub fn forget_record(&self) -> Result<(), StoreError> {
        self.records.clear()
    }
}
