//! Tests for the composed validate-then-check flow.

use booking_engine::{
    review_draft, AppointmentDraft, AppointmentStatus, BookingError, BusinessHours, DraftReview,
    ExistingBooking, ScheduleWarning,
};
use chrono::NaiveDate;

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()
}

fn draft_at(time: &str) -> AppointmentDraft {
    AppointmentDraft {
        client_id: Some("client-1".into()),
        professional_id: Some("pro-1".into()),
        service_id: Some("service-1".into()),
        date: Some(day()),
        start_time: Some(time.into()),
        duration: Some(30),
        price: Some(40.0),
        ..AppointmentDraft::default()
    }
}

fn agenda() -> Vec<ExistingBooking> {
    vec![ExistingBooking::new("b1", day(), "10:00", AppointmentStatus::Confirmed)
        .with_service(30, "Corte")]
}

#[test]
fn invalid_draft_is_not_checked_against_the_agenda() {
    let draft = AppointmentDraft {
        client_id: None,
        ..draft_at("10:15")
    };

    let review = review_draft(&draft, &agenda(), None, day(), &BusinessHours::default()).unwrap();

    match review {
        DraftReview::Invalid(result) => assert!(result.has_error("clientId")),
        other => panic!("expected Invalid, got {other:?}"),
    }
}

#[test]
fn overlapping_draft_is_a_conflict_with_suggestions() {
    let review =
        review_draft(&draft_at("10:15"), &agenda(), None, day(), &BusinessHours::default())
            .unwrap();

    match review {
        DraftReview::Conflict(result) => {
            assert_eq!(result.conflicting_appointment.unwrap().id, "b1");
            assert_eq!(result.suggested_slots[0], "10:30");
        }
        other => panic!("expected Conflict, got {other:?}"),
    }
}

#[test]
fn free_draft_is_available() {
    let review =
        review_draft(&draft_at("10:30"), &agenda(), None, day(), &BusinessHours::default())
            .unwrap();

    assert_eq!(review, DraftReview::Available { warnings: vec![] });
}

#[test]
fn editing_a_booking_into_its_own_slot_is_available() {
    let review = review_draft(
        &draft_at("10:00"),
        &agenda(),
        Some("b1"),
        day(),
        &BusinessHours::default(),
    )
    .unwrap();

    assert!(matches!(review, DraftReview::Available { .. }));
}

#[test]
fn cancelled_draft_holds_no_time() {
    let draft = AppointmentDraft {
        status: Some(AppointmentStatus::Cancelled),
        ..draft_at("10:00")
    };

    let review = review_draft(&draft, &agenda(), None, day(), &BusinessHours::default()).unwrap();

    assert!(matches!(review, DraftReview::Available { .. }));
}

#[test]
fn draft_without_duration_is_checked_as_thirty_minutes() {
    let draft = AppointmentDraft {
        duration: None,
        ..draft_at("09:30")
    };

    let review = review_draft(&draft, &agenda(), None, day(), &BusinessHours::default()).unwrap();

    assert!(matches!(review, DraftReview::Available { .. }));
}

#[test]
fn available_review_keeps_fallback_warnings() {
    let agenda = vec![ExistingBooking::new(
        "b9",
        day(),
        "14:00",
        AppointmentStatus::Pending,
    )];

    let review =
        review_draft(&draft_at("10:00"), &agenda, None, day(), &BusinessHours::default())
            .unwrap();

    assert_eq!(
        review,
        DraftReview::Available {
            warnings: vec![ScheduleWarning::MissingServiceDuration {
                booking_id: "b9".into()
            }]
        }
    );
}

#[test]
fn review_serializes_with_outcome_tag() {
    let review =
        review_draft(&draft_at("10:15"), &agenda(), None, day(), &BusinessHours::default())
            .unwrap();
    let json = serde_json::to_value(&review).unwrap();

    assert_eq!(json["outcome"], "conflict");
    assert_eq!(json["hasConflict"], true);
    assert_eq!(json["conflictingAppointment"]["endTime"], "10:30");
}

#[test]
fn oversized_duration_error_carries_the_draft_value() {
    let too_long = i64::from(u32::MAX) + 1;
    let draft = AppointmentDraft {
        duration: Some(too_long),
        ..draft_at("10:00")
    };

    let err = review_draft(&draft, &agenda(), None, day(), &BusinessHours::default()).unwrap_err();

    assert!(matches!(err, BookingError::InvalidDuration(minutes) if minutes == too_long));
}
