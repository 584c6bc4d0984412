//! Persistence-store seam -- the four read queries the resolver's inputs
//! come from.
//!
//! The application fetches these projections (concurrently if it likes)
//! before resolution begins; the resolver itself never touches the store.
//! [`fetch_schedule`] assembles the four answers into one [`Schedule`]
//! snapshot. A business id the provider knows nothing about yields an empty
//! schedule, which is exactly the preview/demo degraded mode.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::types::{AvailabilityRule, BlockedPeriod, ExistingBooking, Schedule};

/// Read-side interface onto the booking platform's persistence store,
/// scoped per business (tenant).
pub trait AvailabilityProvider {
    /// Enabled weekly rules for the business. Disabled rules are filtered
    /// out store-side.
    fn enabled_rules(&self, business_id: &str) -> Vec<AvailabilityRule>;

    /// All blocked periods for the business.
    fn blocked_periods(&self, business_id: &str) -> Vec<BlockedPeriod>;

    /// Non-cancelled bookings on or after `from`.
    fn future_bookings(&self, business_id: &str, from: NaiveDate) -> Vec<ExistingBooking>;

    /// The business's configured inter-booking buffer, in minutes.
    /// Defaults to 0 when unset.
    fn buffer_minutes(&self, business_id: &str) -> u32 {
        let _ = business_id;
        0
    }
}

/// Snapshot the four projections into a [`Schedule`] for resolution.
pub fn fetch_schedule<P: AvailabilityProvider + ?Sized>(
    provider: &P,
    business_id: &str,
    from: NaiveDate,
) -> Schedule {
    Schedule {
        rules: provider.enabled_rules(business_id),
        blocked_periods: provider.blocked_periods(business_id),
        bookings: provider.future_bookings(business_id, from),
        buffer_minutes: provider.buffer_minutes(business_id),
    }
}

/// In-memory provider backing tests and the owner-facing availability
/// preview, keyed by business id.
#[derive(Debug, Default)]
pub struct InMemoryProvider {
    schedules: HashMap<String, Schedule>,
}

impl InMemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install or replace the full schedule for a business.
    pub fn insert(&mut self, business_id: impl Into<String>, schedule: Schedule) {
        self.schedules.insert(business_id.into(), schedule);
    }

    fn get(&self, business_id: &str) -> Option<&Schedule> {
        self.schedules.get(business_id)
    }
}

impl AvailabilityProvider for InMemoryProvider {
    fn enabled_rules(&self, business_id: &str) -> Vec<AvailabilityRule> {
        self.get(business_id)
            .map(|s| s.rules.iter().filter(|r| r.enabled).cloned().collect())
            .unwrap_or_default()
    }

    fn blocked_periods(&self, business_id: &str) -> Vec<BlockedPeriod> {
        self.get(business_id)
            .map(|s| s.blocked_periods.clone())
            .unwrap_or_default()
    }

    fn future_bookings(&self, business_id: &str, from: NaiveDate) -> Vec<ExistingBooking> {
        self.get(business_id)
            .map(|s| {
                s.bookings
                    .iter()
                    .filter(|b| b.date >= from)
                    .copied()
                    .collect()
            })
            .unwrap_or_default()
    }

    fn buffer_minutes(&self, business_id: &str) -> u32 {
        self.get(business_id).map(|s| s.buffer_minutes).unwrap_or(0)
    }
}
