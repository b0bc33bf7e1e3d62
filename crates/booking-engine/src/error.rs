//! Error types for booking-engine operations.
//!
//! Business outcomes (invalid drafts, conflicts) are reported through result
//! values, not through these errors. A `BookingError` means the caller broke a
//! type contract, e.g. handed the detector a time string it never validated.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Invalid time of day: {0:?}")]
    InvalidTime(String),

    #[error("Invalid business hours: open {open} must be before close {close} within one day")]
    InvalidWindow { open: u32, close: u32 },

    #[error("Invalid slot step: {0} minutes")]
    InvalidStep(u32),

    #[error("Invalid duration: {0} minutes")]
    InvalidDuration(i64),

    #[error("Minutes out of range for a time of day: {0}")]
    MinutesOutOfRange(u32),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BookingError>;
