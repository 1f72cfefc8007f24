//! # destiny-shared
//!
//! Types shared by every Star Destiny crate: the fixed 28-mansion catalog,
//! validated birth dates and the date → mansion resolver.

pub mod calendar;
pub mod catalog;
pub mod constants;
pub mod error;
pub mod types;

pub use calendar::{resolve, resolve_str, BirthDate, YearWindow};
pub use catalog::CatalogRecord;
pub use error::{CatalogError, InvalidDateError};
pub use types::{ConstellationId, DeviceToken, Direction};
