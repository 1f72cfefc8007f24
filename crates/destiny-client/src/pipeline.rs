//! Dual-channel submission pipeline.
//!
//! Every submission is posted to the all-observations sink. The
//! unique-observations sink receives at most one submission per device and
//! dedup policy version: the dedup flag is claimed synchronously, before
//! anything is spawned, so a slow or failing delivery, a repeated click or a
//! process torn down mid-flight can never produce a second unique delivery.
//! A failed unique delivery is therefore never retried.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use destiny_shared::DeviceToken;
use destiny_store::{DedupFlag, DeviceIdentityStore, KvStore, UserRecord};

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::payload::{ClientMetadata, Payload};
use crate::sink::{Sink, WebhookSink};

pub struct SubmissionPipeline {
    identity: DeviceIdentityStore,
    dedup: DedupFlag,
    all_sink: Arc<dyn Sink>,
    unique_sink: Arc<dyn Sink>,
    client: ClientMetadata,
}

impl SubmissionPipeline {
    pub fn new(
        kv: Arc<dyn KvStore>,
        dedup_version: &str,
        all_sink: Arc<dyn Sink>,
        unique_sink: Arc<dyn Sink>,
    ) -> Self {
        Self {
            identity: DeviceIdentityStore::new(kv.clone()),
            dedup: DedupFlag::new(kv, dedup_version),
            all_sink,
            unique_sink,
            client: ClientMetadata::detect(),
        }
    }

    /// Pipeline posting to the webhooks named in `config`.
    pub fn from_config(kv: Arc<dyn KvStore>, config: &ClientConfig) -> Result<Self, ClientError> {
        let all = WebhookSink::new("all", config.all_sink_url.clone(), config.request_timeout)?;
        let unique =
            WebhookSink::new("unique", config.unique_sink_url.clone(), config.request_timeout)?;
        Ok(Self::new(
            kv,
            &config.dedup_version,
            Arc::new(all),
            Arc::new(unique),
        ))
    }

    pub fn identity(&self) -> &DeviceIdentityStore {
        &self.identity
    }

    /// Relay a resolved record to both sinks.
    ///
    /// Returns immediately; deliveries run as detached Tokio tasks. Must be
    /// called from within a Tokio runtime.
    pub fn submit(&self, record: &UserRecord, resolved_full_name: &str) -> SubmissionHandle {
        let device = self.device_token();
        let payload = Arc::new(Payload::build(
            record,
            resolved_full_name,
            &device,
            &self.client,
        ));

        info!(
            device = %device,
            birth_date = %payload.birth_date,
            constellation = %payload.constellation,
            "submitting record"
        );

        let mut tasks = Vec::with_capacity(2);
        tasks.push(spawn_delivery(self.all_sink.clone(), payload.clone()));

        let unique_claimed = match self.dedup.claim() {
            Ok(true) => {
                info!(flag = %self.dedup.key(), "first submission from this device, flag set");
                tasks.push(spawn_delivery(self.unique_sink.clone(), payload));
                true
            }
            Ok(false) => {
                debug!(flag = %self.dedup.key(), "device already counted, skipping unique sink");
                false
            }
            Err(e) => {
                error!(error = %e, "dedup flag unavailable, skipping unique sink");
                false
            }
        };

        SubmissionHandle {
            tasks,
            unique_claimed,
        }
    }

    fn device_token(&self) -> DeviceToken {
        match self.identity.get_or_create_device_id() {
            Ok(token) => token,
            Err(e) => {
                let token = DeviceToken::generate();
                warn!(
                    error = %e,
                    device = %token,
                    "device token not persisted, using a temporary one"
                );
                token
            }
        }
    }
}

fn spawn_delivery(sink: Arc<dyn Sink>, payload: Arc<Payload>) -> JoinHandle<()> {
    tokio::spawn(async move {
        sink.deliver(&payload).await;
    })
}

/// The deliveries started by one [`SubmissionPipeline::submit`] call.
///
/// Dropping the handle leaves them running detached. Awaiting
/// [`join`](Self::join) waits for them; nothing about their outcome is
/// reported.
#[derive(Debug)]
pub struct SubmissionHandle {
    tasks: Vec<JoinHandle<()>>,
    unique_claimed: bool,
}

impl SubmissionHandle {
    /// Whether this submission consumed the device's unique delivery.
    pub fn unique_claimed(&self) -> bool {
        self.unique_claimed
    }

    /// Number of deliveries started (1 or 2).
    pub fn dispatched(&self) -> usize {
        self.tasks.len()
    }

    pub async fn join(self) {
        for result in futures::future::join_all(self.tasks).await {
            if let Err(e) = result {
                error!(error = %e, "delivery task did not finish");
            }
        }
    }
}
