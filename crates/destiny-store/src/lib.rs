//! # destiny-store
//!
//! Local persistence for Star Destiny, backed by SQLite.
//!
//! All state lives in string slots behind the [`KvStore`] trait: the last
//! resolved [`UserRecord`], the device token and the dedup flags. The
//! crate exposes a synchronous [`Database`] handle plus typed wrappers for
//! each slot.

pub mod database;
pub mod dedup;
pub mod device;
pub mod kv;
pub mod migrations;
pub mod models;
pub mod records;

mod error;

pub use database::Database;
pub use dedup::DedupFlag;
pub use device::DeviceIdentityStore;
pub use error::StoreError;
pub use kv::{KvStore, MemoryStore};
pub use models::*;
pub use records::RecordStore;
