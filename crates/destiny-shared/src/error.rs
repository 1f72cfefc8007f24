use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidDateError {
    #[error("Malformed date {0:?}: expected YYYY-MM-DD")]
    Malformed(String),

    #[error("Invalid month: {0}")]
    InvalidMonth(u32),

    #[error("Invalid day {day} for {year:04}-{month:02}")]
    InvalidDay { year: i32, month: u32, day: u32 },

    #[error("Year {year} outside of {min}..={max}")]
    YearOutOfRange { year: i32, min: i32, max: i32 },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Unknown constellation id: {0}")]
    UnknownConstellation(u8),
}
