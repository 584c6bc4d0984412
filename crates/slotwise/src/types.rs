//! Domain model for availability resolution.
//!
//! These are read projections of what the booking platform persists per
//! business: weekly recurring open hours, blocked date ranges, and existing
//! bookings. All times are business-local wall clock (`NaiveTime`/`NaiveDate`);
//! the engine performs no timezone arithmetic.
//!
//! Wire conventions match the persistence store: weekdays are Sunday-based
//! `0..=6` integers, times are `"HH:MM"`, dates are `"YYYY-MM-DD"`.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};

/// Fixed slot granularity. Every offerable slot occupies 60 minutes
/// regardless of how wide the open window is; a 90-minute window yields
/// exactly one slot.
pub const SLOT_MINUTES: i64 = 60;

/// Fixed minimum lead time for same-day bookings. Customers cannot book a
/// slot starting in under 30 minutes. Distinct from the owner-configurable
/// inter-booking buffer.
pub const LEAD_TIME_MINUTES: i64 = 30;

/// One weekly recurring open-hours rule.
///
/// A business may hold several rules for the same weekday (split
/// morning/afternoon hours); each contributes slots independently and the
/// results are unioned. A rule whose `start_time` is not strictly before
/// `end_time` contributes nothing — bad data degrades, it never errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityRule {
    #[serde(with = "weekday_sun0")]
    pub day_of_week: Weekday,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl AvailabilityRule {
    /// Hourly slot starts generated by this rule: `start_time`, then every
    /// 60 minutes, as long as the slot's full hour fits before `end_time`.
    /// Partial trailing hours are dropped (`09:00-11:30` emits `09:00` and
    /// `10:00` only; a 90-minute window yields exactly one slot).
    ///
    /// Disabled or inverted (`start >= end`) rules emit nothing.
    pub fn hourly_starts(&self) -> Vec<NaiveTime> {
        if !self.enabled || self.start_time >= self.end_time {
            return Vec::new();
        }
        // Minutes-from-midnight arithmetic; NaiveTime addition wraps at
        // midnight, which would loop a rule ending at 00:00.
        let end = (self.end_time.num_seconds_from_midnight() / 60) as i64;
        let mut cursor = (self.start_time.num_seconds_from_midnight() / 60) as i64;
        let mut starts = Vec::new();
        while cursor + SLOT_MINUTES <= end {
            starts.push(
                NaiveTime::from_num_seconds_from_midnight_opt(cursor as u32 * 60, 0)
                    .expect("cursor stays within the day"),
            );
            cursor += SLOT_MINUTES;
        }
        starts
    }
}

/// An inclusive calendar-date range with zero availability, regardless of
/// weekly rules (holidays, vacations). Date granularity only: a period
/// cannot block half a day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockedPeriod {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Display-only; never consulted during resolution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl BlockedPeriod {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

/// Read projection of a non-cancelled booking. The supplying query filters
/// out cancelled bookings before the engine ever sees them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExistingBooking {
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub time: NaiveTime,
}

/// The aggregate resolver input: everything the engine needs to answer
/// availability queries for one business, fetched as a snapshot before
/// resolution begins.
///
/// This is also the JSON document the CLI and WASM surfaces consume.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    #[serde(default)]
    pub rules: Vec<AvailabilityRule>,
    #[serde(default)]
    pub blocked_periods: Vec<BlockedPeriod>,
    #[serde(default)]
    pub bookings: Vec<ExistingBooking>,
    /// Minutes of mandatory gap required immediately before an existing
    /// booking's start (travel/setup time between jobs). Defaults to 0.
    #[serde(default)]
    pub buffer_minutes: u32,
}

impl Schedule {
    /// True when no business-specific configuration is present at all —
    /// the preview/demo mode where the fixed default slot list applies.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty() && self.blocked_periods.is_empty() && self.bookings.is_empty()
    }
}

/// Parse a `"HH:MM"` wall-clock time.
pub fn parse_time(s: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M").map_err(|_| SlotError::InvalidTime(s.to_string()))
}

/// Parse a `"YYYY-MM-DD"` calendar date.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| SlotError::InvalidDate(s.to_string()))
}

/// Parse a local datetime in either `"YYYY-MM-DD HH:MM"` or
/// `"YYYY-MM-DDTHH:MM"` form.
pub fn parse_datetime(s: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M"))
        .map_err(|_| SlotError::InvalidDate(s.to_string()))
}

/// Format a time back to the `"HH:MM"` wire form.
pub fn format_time(t: NaiveTime) -> String {
    t.format("%H:%M").to_string()
}

fn default_true() -> bool {
    true
}

/// Serde helper: `NaiveTime` as `"HH:MM"` (the persistence store never
/// carries seconds).
pub(crate) mod hhmm {
    use chrono::NaiveTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(t: &NaiveTime, ser: S) -> Result<S::Ok, S::Error> {
        ser.serialize_str(&t.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<NaiveTime, D::Error> {
        let s = String::deserialize(de)?;
        NaiveTime::parse_from_str(&s, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(&s, "%H:%M:%S"))
            .map_err(serde::de::Error::custom)
    }
}

/// Serde helper: `Weekday` as a Sunday-based `0..=6` integer, matching the
/// store's `day_of_week` column.
pub(crate) mod weekday_sun0 {
    use chrono::Weekday;
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(day: &Weekday, ser: S) -> Result<S::Ok, S::Error> {
        ser.serialize_u8(day.num_days_from_sunday() as u8)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<Weekday, D::Error> {
        let n = u8::deserialize(de)?;
        match n {
            0 => Ok(Weekday::Sun),
            1 => Ok(Weekday::Mon),
            2 => Ok(Weekday::Tue),
            3 => Ok(Weekday::Wed),
            4 => Ok(Weekday::Thu),
            5 => Ok(Weekday::Fri),
            6 => Ok(Weekday::Sat),
            other => Err(serde::de::Error::custom(format!(
                "day_of_week out of range: {} (expected 0..=6, 0 = Sunday)",
                other
            ))),
        }
    }
}
