//! Per-device identity.
//!
//! The device token is minted the first time it is asked for and then read
//! back forever after. Nothing in normal operation rotates or deletes it;
//! only wiping local state does.

use std::sync::Arc;

use destiny_shared::constants::DEVICE_TOKEN_KEY;
use destiny_shared::DeviceToken;

use crate::error::Result;
use crate::kv::KvStore;

#[derive(Clone)]
pub struct DeviceIdentityStore {
    kv: Arc<dyn KvStore>,
}

impl DeviceIdentityStore {
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self { kv }
    }

    /// Return the stored token, creating and persisting one on first use.
    pub fn get_or_create_device_id(&self) -> Result<DeviceToken> {
        if let Some(token) = self.peek()? {
            return Ok(token);
        }

        let token = DeviceToken::generate();
        self.kv.set(DEVICE_TOKEN_KEY, token.as_str())?;
        tracing::info!(device = %token, "created device token");
        Ok(token)
    }

    /// Stored token, without creating one.
    pub fn peek(&self) -> Result<Option<DeviceToken>> {
        Ok(self
            .kv
            .get(DEVICE_TOKEN_KEY)?
            .and_then(|raw| DeviceToken::from_stored(&raw)))
    }
}
