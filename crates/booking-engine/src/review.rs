//! The booking-form flow: validate a draft, then check it against the agenda.

use chrono::NaiveDate;
use serde::Serialize;

use crate::conflict::check_conflicts_with_hours;
use crate::error::{BookingError, Result};
use crate::hours::BusinessHours;
use crate::model::{
    AppointmentDraft, ConflictResult, ExistingBooking, ScheduleWarning, ValidationResult,
    FALLBACK_DURATION_MINUTES,
};
use crate::validator::validate_at;

/// Outcome of reviewing a draft before it is committed to storage.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DraftReview {
    /// The draft has field errors; no conflict check was made.
    Invalid(ValidationResult),
    /// The draft is well-formed but collides with an existing booking.
    Conflict(ConflictResult),
    /// The draft can be booked.
    Available { warnings: Vec<ScheduleWarning> },
}

/// Validate `draft` as of `today` and, if it is well-formed, check it against
/// `existing_bookings`.
///
/// A draft without a duration is checked as [`FALLBACK_DURATION_MINUTES`] long.
/// A cancelled draft holds no time and is always available.
///
/// # Errors
/// Propagates `BookingError` from the conflict check, e.g. a malformed
/// `booking_time` in storage data.
pub fn review_draft(
    draft: &AppointmentDraft,
    existing_bookings: &[ExistingBooking],
    exclude_booking_id: Option<&str>,
    today: NaiveDate,
    hours: &BusinessHours,
) -> Result<DraftReview> {
    let validation = validate_at(draft, today);
    if !validation.is_valid {
        return Ok(DraftReview::Invalid(validation));
    }

    let (Some(professional_id), Some(date), Some(start_time)) = (
        draft.professional_id.as_deref(),
        draft.date,
        draft.start_time.as_deref(),
    ) else {
        return Ok(DraftReview::Invalid(validation));
    };

    if draft.status.is_some_and(|status| !status.occupies_time()) {
        return Ok(DraftReview::Available {
            warnings: Vec::new(),
        });
    }

    let duration = match draft.duration {
        Some(minutes) => {
            u32::try_from(minutes).map_err(|_| BookingError::InvalidDuration(minutes))?
        }
        None => FALLBACK_DURATION_MINUTES,
    };

    let result = check_conflicts_with_hours(
        professional_id,
        date,
        start_time,
        duration,
        existing_bookings,
        exclude_booking_id,
        hours,
    )?;

    if result.has_conflict {
        Ok(DraftReview::Conflict(result))
    } else {
        Ok(DraftReview::Available {
            warnings: result.warnings,
        })
    }
}
