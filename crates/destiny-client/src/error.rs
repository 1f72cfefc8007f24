use thiserror::Error;

use destiny_shared::InvalidDateError;
use destiny_store::StoreError;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("Invalid birth date: {0}")]
    InvalidDate(#[from] InvalidDateError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}
