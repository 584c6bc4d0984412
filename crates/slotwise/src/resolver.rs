//! Slot resolution -- computes which appointment start times are offerable
//! on a given calendar date.
//!
//! Given a snapshot of a business's weekly rules, blocked periods, existing
//! bookings, and buffer policy, [`resolve_slots`] applies the exclusion
//! pipeline in a fixed order: past-date guard, blocked-period guard, rule
//! selection by weekday, hourly slot generation, same-day lead-time cutoff,
//! then booking-collision and buffer filtering.
//!
//! The companion predicate [`is_date_available`] answers "could this day have
//! any slots at all" without generating them -- the cheap check the booking
//! calendar uses to grey out days. It is sound in one direction only: `false`
//! guarantees resolution yields nothing; `true` makes no promise, since a
//! fully-booked day still has matching rules.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use crate::types::{
    AvailabilityRule, BlockedPeriod, Schedule, LEAD_TIME_MINUTES, SLOT_MINUTES,
};

/// The fixed fallback slot list for preview/demo mode, hourly starts from
/// 09:00 through 17:00. Offered when a schedule carries no business
/// configuration at all (no rules, no blocked periods, no bookings).
pub fn default_slot_times() -> Vec<NaiveTime> {
    (9..18)
        .map(|h| NaiveTime::from_hms_opt(h, 0, 0).unwrap())
        .collect()
}

/// Resolve the ordered, deduplicated list of offerable start times for
/// `date`, as seen at wall-clock instant `now`.
///
/// Pure and infallible: malformed rules (inverted hours, disabled) simply
/// contribute no slots. `now` is an explicit parameter so callers and tests
/// control the clock.
///
/// A schedule with no configuration at all falls back to
/// [`resolve_default_slots`] -- preview mode for a business that has not set
/// up its hours yet is a supported configuration, not an error.
pub fn resolve_slots(date: NaiveDate, now: NaiveDateTime, schedule: &Schedule) -> Vec<NaiveTime> {
    if schedule.is_empty() {
        return resolve_default_slots(date, now);
    }

    let today = now.date();
    if date < today {
        return Vec::new();
    }
    if schedule.blocked_periods.iter().any(|p| p.contains(date)) {
        return Vec::new();
    }

    // Union slots from every enabled rule matching this weekday, then
    // dedup (overlapping split-hours rules must not double-emit a time).
    let weekday = date.weekday();
    let mut candidates: Vec<NaiveTime> = schedule
        .rules
        .iter()
        .filter(|r| r.enabled && r.day_of_week == weekday)
        .flat_map(AvailabilityRule::hourly_starts)
        .collect();
    if candidates.is_empty() {
        return Vec::new();
    }
    candidates.sort();
    candidates.dedup();

    if date == today {
        retain_after_cutoff(&mut candidates, date, now);
    }

    let booked: Vec<NaiveTime> = schedule
        .bookings
        .iter()
        .filter(|b| b.date == date)
        .map(|b| b.time)
        .collect();
    exclude_booked(&mut candidates, &booked, schedule.buffer_minutes);

    candidates
}

/// Degraded-mode resolution: the fixed default slot list filtered only by
/// the past-date guard and the same-day lead-time cutoff.
pub fn resolve_default_slots(date: NaiveDate, now: NaiveDateTime) -> Vec<NaiveTime> {
    let today = now.date();
    if date < today {
        return Vec::new();
    }
    let mut slots = default_slot_times();
    if date == today {
        retain_after_cutoff(&mut slots, date, now);
    }
    slots
}

/// Cheap per-day availability check: past-date guard, blocked-period guard,
/// and enabled-rule weekday match, without generating slot lists.
///
/// With no rules and no blocked periods configured the schedule is in
/// preview mode, where every non-past date is available (mirroring the
/// default-slot fallback of [`resolve_slots`]).
///
/// Rules with inverted hours (`start >= end`) generate no slots and so do
/// not count as availability here either.
pub fn is_date_available(
    date: NaiveDate,
    today: NaiveDate,
    rules: &[AvailabilityRule],
    blocked_periods: &[BlockedPeriod],
) -> bool {
    if rules.is_empty() && blocked_periods.is_empty() {
        return date >= today;
    }
    if date < today {
        return false;
    }
    if blocked_periods.iter().any(|p| p.contains(date)) {
        return false;
    }
    let weekday = date.weekday();
    rules
        .iter()
        .any(|r| r.enabled && r.day_of_week == weekday && r.start_time < r.end_time)
}

/// The available dates in `[from, to]` (inclusive), as the booking calendar
/// renders a month: one [`is_date_available`] call per day.
pub fn available_days(
    schedule: &Schedule,
    from: NaiveDate,
    to: NaiveDate,
    today: NaiveDate,
) -> Vec<NaiveDate> {
    let mut days = Vec::new();
    let mut cursor = from;
    while cursor <= to {
        if is_date_available(cursor, today, &schedule.rules, &schedule.blocked_periods) {
            days.push(cursor);
        }
        match cursor.succ_opt() {
            Some(next) => cursor = next,
            None => break,
        }
    }
    days
}

/// Same-day lead-time filter: keep only slots starting strictly after
/// `now + LEAD_TIME_MINUTES`. A slot exactly at the cutoff is dropped.
fn retain_after_cutoff(candidates: &mut Vec<NaiveTime>, date: NaiveDate, now: NaiveDateTime) {
    let cutoff = now + Duration::minutes(LEAD_TIME_MINUTES);
    candidates.retain(|&t| date.and_time(t) > cutoff);
}

/// Remove candidates colliding with booked times, plus any slot whose
/// occupied hour would run into the pre-booking buffer window.
///
/// For a booking at `b` with buffer `m`, the buffer window is
/// `[b - m, b)`; a candidate occupying `[s, s + 60)` is excluded when
/// `s + 60 > b - m && s < b`. Arithmetic is done in minutes-from-midnight
/// so a buffer reaching past midnight cannot wrap.
fn exclude_booked(candidates: &mut Vec<NaiveTime>, booked: &[NaiveTime], buffer_minutes: u32) {
    if booked.is_empty() {
        return;
    }
    let minutes = |t: NaiveTime| (t.num_seconds_from_midnight() / 60) as i64;
    for &b in booked {
        let b_min = minutes(b);
        candidates.retain(|&slot| slot != b);
        if buffer_minutes > 0 {
            let buffer_start = b_min - buffer_minutes as i64;
            candidates.retain(|&slot| {
                let s = minutes(slot);
                !(s + SLOT_MINUTES > buffer_start && s < b_min)
            });
        }
    }
}
