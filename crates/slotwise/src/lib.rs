//! # slotwise
//!
//! Appointment-availability resolution for mobile detailing businesses.
//!
//! The engine answers one question deterministically: given a business's
//! weekly open hours, blocked date ranges, existing bookings, and buffer
//! policy, which start times may a customer book on a given date? The
//! computation is pure and synchronous -- the surrounding application
//! fetches the inputs, the engine resolves, the UI renders.
//!
//! ## Modules
//!
//! - [`resolver`] — slot resolution and the per-day availability predicate
//! - [`types`] — domain model (rules, blocked periods, bookings, schedule)
//! - [`provider`] — read-side seam onto the persistence store
//! - [`reservation`] — optimistic booking insertion with conflict refresh
//! - [`sync`] — calendar-export ledger (injected key-value interface)
//! - [`customization`] — versioned landing-page schema with legacy migration
//! - [`error`] — error types

pub mod customization;
pub mod error;
pub mod provider;
pub mod reservation;
pub mod resolver;
pub mod sync;
pub mod types;

pub use error::SlotError;
pub use provider::{fetch_schedule, AvailabilityProvider};
pub use reservation::{reserve_slot, BookingStore, ReserveError};
pub use resolver::{available_days, is_date_available, resolve_default_slots, resolve_slots};
pub use types::{AvailabilityRule, BlockedPeriod, ExistingBooking, Schedule};
