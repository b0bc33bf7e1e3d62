//! Property-based tests for time arithmetic, conflict detection and slot search.
//!
//! These hold for *any* well-formed agenda, not just the scenarios in
//! `conflict_tests.rs` and `slots_tests.rs`.

use booking_engine::{
    check_conflicts, find_available_slots, minutes_to_time, time_to_minutes, AppointmentStatus,
    BusinessHours, ExistingBooking, TimeRange,
};
use chrono::NaiveDate;
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()
}

/// A start minute and duration that end before midnight.
fn arb_interval() -> impl Strategy<Value = (u32, u32)> {
    (0u32..1380).prop_flat_map(|start| (Just(start), 1u32..=(1439 - start).min(180)))
}

fn arb_status() -> impl Strategy<Value = AppointmentStatus> {
    prop_oneof![
        Just(AppointmentStatus::Pending),
        Just(AppointmentStatus::Confirmed),
        Just(AppointmentStatus::Completed),
        Just(AppointmentStatus::Cancelled),
    ]
}

fn arb_agenda() -> impl Strategy<Value = Vec<ExistingBooking>> {
    prop::collection::vec((arb_interval(), arb_status()), 0..8).prop_map(|items| {
        items
            .into_iter()
            .enumerate()
            .map(|(i, ((start, minutes), status))| {
                ExistingBooking::new(format!("b{i}"), day(), minutes_to_time(start), status)
                    .with_service(minutes, "Corte")
            })
            .collect()
    })
}

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Property 1: minutes ↔ HH:mm is an exact round trip over one day
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn time_round_trip(m in 0u32..1440) {
        prop_assert_eq!(time_to_minutes(&minutes_to_time(m)).unwrap(), m);
    }
}

// ---------------------------------------------------------------------------
// Property 2: disjoint intervals never conflict, overlapping ones always do
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn conflict_matches_interval_overlap(
        (a_start, a_len) in arb_interval(),
        (b_start, b_len) in arb_interval(),
        status in arb_status(),
    ) {
        let existing = vec![
            ExistingBooking::new("a", day(), minutes_to_time(a_start), status)
                .with_service(a_len, "Corte"),
        ];
        let result = check_conflicts(
            "pro-1",
            day(),
            &minutes_to_time(b_start),
            b_len,
            &existing,
            None,
        )
        .unwrap();

        let a_end = a_start + a_len;
        let b_end = b_start + b_len;
        let disjoint = a_end <= b_start || b_end <= a_start;
        let expected = !disjoint && status != AppointmentStatus::Cancelled;

        prop_assert_eq!(result.has_conflict, expected);
        prop_assert_eq!(result.conflicting_appointment.is_some(), expected);
    }
}

// ---------------------------------------------------------------------------
// Property 3: checking twice gives the same answer
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn check_is_idempotent(agenda in arb_agenda(), (start, len) in arb_interval()) {
        let time = minutes_to_time(start);
        let first = check_conflicts("pro-1", day(), &time, len, &agenda, None).unwrap();
        let second = check_conflicts("pro-1", day(), &time, len, &agenda, None).unwrap();
        prop_assert_eq!(first, second);
    }
}

// ---------------------------------------------------------------------------
// Property 4: every suggestion is free, on the grid, in the window, and ranked
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn suggestions_are_free_and_ranked(
        agenda in arb_agenda(),
        duration in 15u32..=120,
        preferred in 0u32..1440,
    ) {
        let hours = BusinessHours::default();
        let slots = find_available_slots(
            &agenda,
            day(),
            duration,
            &minutes_to_time(preferred),
            &hours,
        )
        .unwrap();

        prop_assert!(slots.len() <= 5);

        let busy: Vec<TimeRange> = agenda
            .iter()
            .filter(|b| b.status != AppointmentStatus::Cancelled)
            .map(|b| b.occupied_range().unwrap())
            .collect();

        let mut last_distance = 0i64;
        for slot in &slots {
            let start = time_to_minutes(slot).unwrap();
            let candidate = TimeRange::starting_at(start, duration);

            prop_assert!(start >= hours.open() && candidate.end <= hours.close());
            prop_assert_eq!((start - hours.open()) % hours.step(), 0);
            prop_assert!(busy.iter().all(|b| !candidate.overlaps(b)), "{} is busy", slot);

            let distance = (i64::from(start) - i64::from(preferred)).abs();
            prop_assert!(distance >= last_distance);
            last_distance = distance;
        }
    }
}

// ---------------------------------------------------------------------------
// Property 5: any reported conflict really overlaps the candidate
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn reported_conflict_overlaps_candidate(agenda in arb_agenda(), (start, len) in arb_interval()) {
        let result = check_conflicts("pro-1", day(), &minutes_to_time(start), len, &agenda, None)
            .unwrap();

        if let Some(conflict) = result.conflicting_appointment {
            let busy = TimeRange {
                start: time_to_minutes(&conflict.start_time).unwrap(),
                end: time_to_minutes(&conflict.end_time).unwrap(),
            };
            prop_assert!(TimeRange::starting_at(start, len).overlaps(&busy));
        } else {
            prop_assert!(result.suggested_slots.is_empty());
        }
    }
}
