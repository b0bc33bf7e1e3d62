//! Detect whether a candidate appointment collides with a professional's agenda.
//!
//! Intervals are half-open: an appointment ending exactly when another starts
//! is NOT a conflict. The scan stops at the first overlapping booking in input
//! order; callers that want the earliest collision pass bookings sorted by time.

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::error::{BookingError, Result};
use crate::hours::BusinessHours;
use crate::model::{ConflictResult, ConflictingAppointment, ExistingBooking, ScheduleWarning};
use crate::slots::rank_free_slots;
use crate::time::{minutes_to_time, time_to_minutes, TimeRange, MINUTES_PER_DAY};

/// Check a candidate against `existing_bookings` using the default business hours
/// for the suggested alternatives.
///
/// See [`check_conflicts_with_hours`].
pub fn check_conflicts(
    professional_id: &str,
    date: NaiveDate,
    start_time: &str,
    duration_minutes: u32,
    existing_bookings: &[ExistingBooking],
    exclude_booking_id: Option<&str>,
) -> Result<ConflictResult> {
    check_conflicts_with_hours(
        professional_id,
        date,
        start_time,
        duration_minutes,
        existing_bookings,
        exclude_booking_id,
        &BusinessHours::default(),
    )
}

/// Check a candidate appointment against a professional's bookings for one day.
///
/// Bookings on other dates, cancelled bookings and the booking named by
/// `exclude_booking_id` (the one being edited) are ignored. On the first
/// overlap, the result names the conflicting booking and carries up to five
/// alternative start times within `hours`, closest to `start_time` first.
///
/// Bookings without a joined service duration are treated as 30 minutes long
/// and reported in [`ConflictResult::warnings`].
///
/// # Errors
/// Returns `BookingError::InvalidTime` for a malformed `start_time` or booking
/// time, and `BookingError::InvalidDuration` when the duration is zero or the
/// appointment would run past midnight.
pub fn check_conflicts_with_hours(
    professional_id: &str,
    date: NaiveDate,
    start_time: &str,
    duration_minutes: u32,
    existing_bookings: &[ExistingBooking],
    exclude_booking_id: Option<&str>,
    hours: &BusinessHours,
) -> Result<ConflictResult> {
    let candidate = candidate_range(start_time, duration_minutes)?;

    let mut active: Vec<(&ExistingBooking, TimeRange)> = Vec::new();
    let mut warnings = Vec::new();
    for booking in existing_bookings
        .iter()
        .filter(|b| b.occupies(date) && exclude_booking_id != Some(b.id.as_str()))
    {
        if booking.service_duration().is_none() {
            warn!(
                professional_id,
                booking_id = %booking.id,
                "booking has no service duration, assuming fallback"
            );
            warnings.push(ScheduleWarning::MissingServiceDuration {
                booking_id: booking.id.clone(),
            });
        }
        active.push((booking, booking.occupied_range()?));
    }

    let Some((booking, range)) = active.iter().find(|(_, range)| candidate.overlaps(range)) else {
        debug!(professional_id, %date, start_time, "no conflict");
        return Ok(ConflictResult::clear(warnings));
    };

    debug!(
        professional_id,
        %date,
        start_time,
        conflicting_id = %booking.id,
        overlap_minutes = candidate.overlap_minutes(range),
        "conflict found"
    );

    let occupied = active.iter().map(|(_, range)| *range).collect();
    let suggested_slots = rank_free_slots(occupied, duration_minutes, candidate.start, hours);

    Ok(ConflictResult {
        has_conflict: true,
        conflicting_appointment: Some(ConflictingAppointment {
            id: booking.id.clone(),
            start_time: minutes_to_time(range.start),
            end_time: minutes_to_time(range.end),
            client_name: booking.client_name().map(str::to_string),
            service_name: booking.service_name().map(str::to_string),
        }),
        suggested_slots,
        warnings,
    })
}

fn candidate_range(start_time: &str, duration_minutes: u32) -> Result<TimeRange> {
    if duration_minutes == 0 {
        return Err(BookingError::InvalidDuration(i64::from(duration_minutes)));
    }
    let start = time_to_minutes(start_time)?;
    let range = TimeRange::starting_at(start, duration_minutes);
    if range.end > MINUTES_PER_DAY {
        return Err(BookingError::InvalidDuration(i64::from(duration_minutes)));
    }
    Ok(range)
}
