//! Tests for optimistic reservation and conflict-refresh.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use slotwise::reservation::{reserve_slot, BookingStore, InMemoryBookingStore, ReserveError};
use slotwise::types::{AvailabilityRule, Schedule};

fn d(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn t(s: &str) -> NaiveTime {
    NaiveTime::parse_from_str(s, "%H:%M").unwrap()
}

fn dt(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
}

fn open_schedule(date: NaiveDate) -> Schedule {
    Schedule {
        rules: vec![AvailabilityRule {
            day_of_week: date.weekday(),
            start_time: t("09:00"),
            end_time: t("13:00"),
            enabled: true,
        }],
        ..Schedule::default()
    }
}

const NOW: &str = "2026-09-01 08:00";

#[test]
fn reserving_an_offered_slot_succeeds() {
    let date = d("2026-09-07");
    let schedule = open_schedule(date);
    let mut store = InMemoryBookingStore::new();

    reserve_slot(&mut store, "biz-1", date, t("10:00"), dt(NOW), &schedule).unwrap();
    assert!(store.is_reserved("biz-1", date, t("10:00")));
}

#[test]
fn unoffered_time_is_rejected_with_the_current_slot_list() {
    let date = d("2026-09-07");
    let schedule = open_schedule(date);
    let mut store = InMemoryBookingStore::new();

    // 13:00 is closing time, never offered.
    let err = reserve_slot(&mut store, "biz-1", date, t("13:00"), dt(NOW), &schedule).unwrap_err();
    match err {
        ReserveError::NotOfferable { refreshed, .. } => {
            assert_eq!(refreshed, vec![t("09:00"), t("10:00"), t("11:00"), t("12:00")]);
        }
        other => panic!("expected NotOfferable, got {:?}", other),
    }
    assert!(!store.is_reserved("biz-1", date, t("13:00")));
}

#[test]
fn losing_the_race_returns_refreshed_slots_without_the_contested_time() {
    let date = d("2026-09-07");
    let schedule = open_schedule(date);
    let mut store = InMemoryBookingStore::new();

    // Another customer already inserted this booking; our schedule snapshot
    // predates it, so validation still offers 10:00.
    store.try_reserve("biz-1", date, t("10:00")).unwrap();

    let err = reserve_slot(&mut store, "biz-1", date, t("10:00"), dt(NOW), &schedule).unwrap_err();
    match err {
        ReserveError::SlotTaken { refreshed, .. } => {
            assert!(!refreshed.contains(&t("10:00")));
            assert_eq!(refreshed, vec![t("09:00"), t("11:00"), t("12:00")]);
        }
        other => panic!("expected SlotTaken, got {:?}", other),
    }
}

#[test]
fn refreshed_list_applies_the_buffer_around_the_contested_slot() {
    let date = d("2026-09-07");
    let mut schedule = open_schedule(date);
    schedule.buffer_minutes = 30;
    let mut store = InMemoryBookingStore::new();

    store.try_reserve("biz-1", date, t("11:00")).unwrap();

    let err = reserve_slot(&mut store, "biz-1", date, t("11:00"), dt(NOW), &schedule).unwrap_err();
    match err {
        // The 10:00 slot runs into the 30-minute buffer before the
        // contested 11:00 booking, so the refresh drops it too.
        ReserveError::SlotTaken { refreshed, .. } => {
            assert_eq!(refreshed, vec![t("09:00"), t("12:00")]);
        }
        other => panic!("expected SlotTaken, got {:?}", other),
    }
}

#[test]
fn slots_are_scoped_per_business() {
    let date = d("2026-09-07");
    let schedule = open_schedule(date);
    let mut store = InMemoryBookingStore::new();

    reserve_slot(&mut store, "biz-1", date, t("10:00"), dt(NOW), &schedule).unwrap();
    reserve_slot(&mut store, "biz-2", date, t("10:00"), dt(NOW), &schedule).unwrap();

    assert!(store.is_reserved("biz-1", date, t("10:00")));
    assert!(store.is_reserved("biz-2", date, t("10:00")));
}

#[test]
fn cancelling_frees_the_slot_for_re_reservation() {
    let date = d("2026-09-07");
    let schedule = open_schedule(date);
    let mut store = InMemoryBookingStore::new();

    reserve_slot(&mut store, "biz-1", date, t("09:00"), dt(NOW), &schedule).unwrap();
    assert!(store.cancel("biz-1", date, t("09:00")));
    assert!(!store.is_reserved("biz-1", date, t("09:00")));

    reserve_slot(&mut store, "biz-1", date, t("09:00"), dt(NOW), &schedule).unwrap();
    assert!(store.is_reserved("biz-1", date, t("09:00")));

    // Cancelling something that was never reserved reports false.
    assert!(!store.cancel("biz-1", date, t("10:00")));
}
