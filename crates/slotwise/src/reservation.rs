//! Optimistic slot reservation with conflict-refresh.
//!
//! Availability is computed from a snapshot, so two customers can both see
//! the same slot as free; the race is resolved only at insertion time, by a
//! uniqueness constraint on `(business, date, time)` over non-cancelled
//! bookings. When the constraint fires, the loser gets back a refreshed
//! slot list (the contested slot folded in) so the UI can re-render without
//! a second fetch round trip.

use std::collections::HashSet;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use thiserror::Error;

use crate::error::SlotError;
use crate::resolver::resolve_slots;
use crate::types::{ExistingBooking, Schedule};

/// Write-side interface for booking insertion. Implementations must enforce
/// uniqueness of `(business_id, date, time)` across non-cancelled bookings;
/// a cancelled booking frees its slot for re-reservation.
pub trait BookingStore {
    /// Reserve the slot, failing with [`SlotError::SlotTaken`] if a
    /// non-cancelled booking already holds it.
    fn try_reserve(
        &mut self,
        business_id: &str,
        date: NaiveDate,
        time: NaiveTime,
    ) -> Result<(), SlotError>;

    /// Cancel a reservation, freeing its slot. Returns `false` if no such
    /// reservation existed.
    fn cancel(&mut self, business_id: &str, date: NaiveDate, time: NaiveTime) -> bool;

    fn is_reserved(&self, business_id: &str, date: NaiveDate, time: NaiveTime) -> bool;
}

/// Why a reservation attempt was rejected. Both variants carry the slot
/// list recomputed against current knowledge, ready to re-render.
#[derive(Error, Debug, PartialEq)]
pub enum ReserveError {
    /// The requested time is not currently offered for that date (stale UI,
    /// out-of-hours request, or inside a buffer window).
    #[error("Slot {date} {time} is not offerable")]
    NotOfferable {
        date: NaiveDate,
        time: NaiveTime,
        refreshed: Vec<NaiveTime>,
    },

    /// Another booking won the race for this slot.
    #[error("Slot {date} {time} was taken concurrently")]
    SlotTaken {
        date: NaiveDate,
        time: NaiveTime,
        refreshed: Vec<NaiveTime>,
    },
}

/// Validate the slot against current availability, then reserve it.
///
/// The schedule is the same snapshot the customer's slot list was rendered
/// from; validation catches requests that were never offerable, the store's
/// uniqueness constraint catches concurrent winners.
pub fn reserve_slot<S: BookingStore + ?Sized>(
    store: &mut S,
    business_id: &str,
    date: NaiveDate,
    time: NaiveTime,
    now: NaiveDateTime,
    schedule: &Schedule,
) -> Result<(), ReserveError> {
    let offered = resolve_slots(date, now, schedule);
    if !offered.contains(&time) {
        return Err(ReserveError::NotOfferable {
            date,
            time,
            refreshed: offered,
        });
    }

    match store.try_reserve(business_id, date, time) {
        Ok(()) => Ok(()),
        Err(_) => {
            // Fold the contested slot into the snapshot and recompute, so
            // the refreshed list no longer offers it.
            let mut refreshed_schedule = schedule.clone();
            refreshed_schedule
                .bookings
                .push(ExistingBooking { date, time });
            Err(ReserveError::SlotTaken {
                date,
                time,
                refreshed: resolve_slots(date, now, &refreshed_schedule),
            })
        }
    }
}

/// In-memory [`BookingStore`] with the uniqueness constraint enforced by a
/// `HashSet` keyed on `(business, date, time)`.
#[derive(Debug, Default)]
pub struct InMemoryBookingStore {
    reserved: HashSet<(String, NaiveDate, NaiveTime)>,
}

impl InMemoryBookingStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BookingStore for InMemoryBookingStore {
    fn try_reserve(
        &mut self,
        business_id: &str,
        date: NaiveDate,
        time: NaiveTime,
    ) -> Result<(), SlotError> {
        let key = (business_id.to_string(), date, time);
        if self.reserved.contains(&key) {
            return Err(SlotError::SlotTaken { date, time });
        }
        self.reserved.insert(key);
        Ok(())
    }

    fn cancel(&mut self, business_id: &str, date: NaiveDate, time: NaiveTime) -> bool {
        self.reserved.remove(&(business_id.to_string(), date, time))
    }

    fn is_reserved(&self, business_id: &str, date: NaiveDate, time: NaiveTime) -> bool {
        self.reserved
            .contains(&(business_id.to_string(), date, time))
    }
}
