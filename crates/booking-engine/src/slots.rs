//! Alternative start times for a professional's day.
//!
//! Candidates sit on the business-hours grid (every `step` minutes from
//! opening), not on the edges of existing bookings. Free candidates are ranked
//! by how far they are from the time the client asked for.

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::error::{BookingError, Result};
use crate::hours::BusinessHours;
use crate::model::ExistingBooking;
use crate::time::{minutes_to_time, time_to_minutes, TimeRange};

/// Most alternatives ever offered for one request.
pub const MAX_SUGGESTIONS: usize = 5;

/// Find open start times of `duration_minutes` on `date`, closest to
/// `preferred_time` first.
///
/// Cancelled bookings and bookings on other dates are ignored. At most
/// [`MAX_SUGGESTIONS`] `HH:mm` strings are returned; equally distant candidates
/// keep their chronological order.
///
/// # Errors
/// Returns `BookingError::InvalidTime` if `preferred_time` or a booking's time
/// is malformed, and `BookingError::InvalidDuration` for a zero duration.
pub fn find_available_slots(
    existing_bookings: &[ExistingBooking],
    date: NaiveDate,
    duration_minutes: u32,
    preferred_time: &str,
    hours: &BusinessHours,
) -> Result<Vec<String>> {
    if duration_minutes == 0 {
        return Err(BookingError::InvalidDuration(i64::from(duration_minutes)));
    }
    let preferred = time_to_minutes(preferred_time)?;

    let mut occupied = Vec::new();
    for booking in existing_bookings.iter().filter(|b| b.occupies(date)) {
        if booking.service_duration().is_none() {
            warn!(booking_id = %booking.id, "booking has no service duration, assuming fallback");
        }
        occupied.push(booking.occupied_range()?);
    }

    Ok(rank_free_slots(occupied, duration_minutes, preferred, hours))
}

/// Rank grid candidates that avoid every `occupied` range.
pub(crate) fn rank_free_slots(
    mut occupied: Vec<TimeRange>,
    duration_minutes: u32,
    preferred: u32,
    hours: &BusinessHours,
) -> Vec<String> {
    occupied.sort_by_key(|range| (range.start, range.end));

    let mut free: Vec<u32> = hours
        .candidate_starts(duration_minutes)
        .filter(|&start| {
            let candidate = TimeRange::starting_at(start, duration_minutes);
            !occupied.iter().any(|busy| candidate.overlaps(busy))
        })
        .collect();

    debug!(
        occupied = occupied.len(),
        free = free.len(),
        duration_minutes,
        "slot search complete"
    );

    // Stable sort: ties stay in chronological order.
    free.sort_by_key(|&start| (i64::from(start) - i64::from(preferred)).abs());

    free.into_iter()
        .take(MAX_SUGGESTIONS)
        .map(minutes_to_time)
        .collect()
}
