//! Wall-clock arithmetic on minutes since midnight.
//!
//! Times carry no date and no timezone. A booking must start and end within the
//! same calendar day, so a start lives in `[0, MINUTES_PER_DAY)` and an end is at
//! most `MINUTES_PER_DAY`.

use crate::error::{BookingError, Result};

pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Convert a `HH:mm` string into minutes since midnight.
///
/// Storage rows from a SQL `time` column arrive as `HH:mm:ss`; the seconds
/// component is accepted and discarded.
///
/// # Errors
/// Returns `BookingError::InvalidTime` if the string is not a zero-padded
/// 24-hour clock time.
pub fn time_to_minutes(time: &str) -> Result<u32> {
    parse_clock(time, true).ok_or_else(|| BookingError::InvalidTime(time.to_string()))
}

/// Format minutes since midnight as a zero-padded `HH:mm` string.
///
/// Exact inverse of [`time_to_minutes`] over `[0, MINUTES_PER_DAY)`.
/// `MINUTES_PER_DAY` itself formats as `"24:00"`, the end-of-day marker used
/// for ranges that run up to midnight; larger values keep counting hours
/// (`"25:00"`) and are never produced by this crate. Use
/// [`checked_minutes_to_time`] for untrusted input.
pub fn minutes_to_time(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Like [`minutes_to_time`], but only for a time of day in `[0, MINUTES_PER_DAY)`.
///
/// # Errors
/// Returns `BookingError::MinutesOutOfRange` for values of a day or more.
pub fn checked_minutes_to_time(minutes: u32) -> Result<String> {
    if minutes >= MINUTES_PER_DAY {
        return Err(BookingError::MinutesOutOfRange(minutes));
    }
    Ok(minutes_to_time(minutes))
}

/// True when `time` is exactly `HH:mm` with hour 0–23 and minute 0–59.
pub fn is_strict_hhmm(time: &str) -> bool {
    parse_clock(time, false).is_some()
}

fn parse_clock(time: &str, allow_seconds: bool) -> Option<u32> {
    let mut parts = time.split(':');
    let hour = two_digits(parts.next()?)?;
    let minute = two_digits(parts.next()?)?;

    if let Some(seconds) = parts.next() {
        if !allow_seconds || two_digits(seconds)? > 59 {
            return None;
        }
    }
    if parts.next().is_some() || hour > 23 || minute > 59 {
        return None;
    }

    Some(hour * 60 + minute)
}

fn two_digits(part: &str) -> Option<u32> {
    if part.len() != 2 || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

/// A half-open interval `[start, end)` of minutes within one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeRange {
    pub start: u32,
    pub end: u32,
}

impl TimeRange {
    /// The interval occupied by something starting at `start` for `duration_minutes`.
    pub fn starting_at(start: u32, duration_minutes: u32) -> Self {
        Self {
            start,
            end: start.saturating_add(duration_minutes),
        }
    }

    /// Length of the range; 0 for an inverted range.
    pub fn duration_minutes(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    /// Two ranges overlap iff `self.start < other.end && self.end > other.start`.
    ///
    /// A range ending exactly when another starts does NOT overlap it.
    pub fn overlaps(&self, other: &TimeRange) -> bool {
        self.start < other.end && self.end > other.start
    }

    /// Length of the shared part of two ranges, 0 when they do not overlap.
    pub fn overlap_minutes(&self, other: &TimeRange) -> u32 {
        if !self.overlaps(other) {
            return 0;
        }
        self.end
            .min(other.end)
            .saturating_sub(self.start.max(other.start))
    }
}
