//! Error types for slotwise operations.
//!
//! The resolver itself is pure and infallible — malformed rules degrade to
//! "no availability" rather than failing. These errors belong to the boundary
//! surfaces: parsing schedule documents, reserving slots, and loading page
//! customization blobs.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SlotError {
    /// A wall-clock time string was not "HH:MM" (24-hour).
    #[error("Invalid time: {0}")]
    InvalidTime(String),

    /// A calendar date string was not "YYYY-MM-DD".
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// The `(business, date, time)` slot is already reserved by a
    /// non-cancelled booking.
    #[error("Slot already booked: {date} {time}")]
    SlotTaken {
        date: chrono::NaiveDate,
        time: chrono::NaiveTime,
    },

    /// A page-customization document could not be parsed or migrated.
    #[error("Customization error: {0}")]
    Customization(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SlotError>;
