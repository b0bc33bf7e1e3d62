//! Business-hours window and the grid alternative slots are searched on.
//!
//! A barbershop record carries its own `opening_time`/`closing_time`; callers
//! that have it should build a [`BusinessHours`] from it with
//! [`BusinessHours::from_opening_times`]. The [`Default`] window (08:00–19:00 on
//! a 30-minute grid) is what a shop without configured hours gets.

use crate::error::{BookingError, Result};
use crate::time::{time_to_minutes, MINUTES_PER_DAY};

pub const DEFAULT_OPEN_HOUR: u32 = 8;
pub const DEFAULT_CLOSE_HOUR: u32 = 19;
pub const DEFAULT_SLOT_STEP_MINUTES: u32 = 30;

/// The daily window in which appointments may be placed.
///
/// `open` and `close` are minutes since midnight; `step` is the spacing of
/// candidate start times, counted from `open`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusinessHours {
    open: u32,
    close: u32,
    step: u32,
}

impl Default for BusinessHours {
    fn default() -> Self {
        Self {
            open: DEFAULT_OPEN_HOUR * 60,
            close: DEFAULT_CLOSE_HOUR * 60,
            step: DEFAULT_SLOT_STEP_MINUTES,
        }
    }
}

impl BusinessHours {
    /// Build a window from minutes since midnight.
    ///
    /// # Errors
    /// Returns `BookingError::InvalidWindow` unless `open < close <= 24:00`, and
    /// `BookingError::InvalidStep` when `step` is zero.
    pub fn new(open: u32, close: u32, step: u32) -> Result<Self> {
        if open >= close || close > MINUTES_PER_DAY {
            return Err(BookingError::InvalidWindow { open, close });
        }
        if step == 0 {
            return Err(BookingError::InvalidStep(step));
        }
        Ok(Self { open, close, step })
    }

    /// Whole-hour window, e.g. `from_hours(8, 19)` for 08:00–19:00.
    pub fn from_hours(open_hour: u32, close_hour: u32) -> Result<Self> {
        Self::new(
            open_hour.saturating_mul(60),
            close_hour.saturating_mul(60),
            DEFAULT_SLOT_STEP_MINUTES,
        )
    }

    /// Window from a shop's `opening_time`/`closing_time` strings (`HH:mm` or `HH:mm:ss`).
    pub fn from_opening_times(opening_time: &str, closing_time: &str) -> Result<Self> {
        Self::new(
            time_to_minutes(opening_time)?,
            time_to_minutes(closing_time)?,
            DEFAULT_SLOT_STEP_MINUTES,
        )
    }

    /// Same window with a different candidate spacing.
    pub fn with_step(self, step: u32) -> Result<Self> {
        Self::new(self.open, self.close, step)
    }

    pub fn open(&self) -> u32 {
        self.open
    }

    pub fn close(&self) -> u32 {
        self.close
    }

    pub fn step(&self) -> u32 {
        self.step
    }

    /// Candidate start times for an appointment of `duration_minutes`.
    ///
    /// Runs from `open` to `close - duration_minutes` inclusive on the step grid.
    /// Empty when the appointment does not fit in the window at all.
    pub fn candidate_starts(&self, duration_minutes: u32) -> impl Iterator<Item = u32> {
        let last = self.close.checked_sub(duration_minutes);
        let (first, last) = match last {
            Some(last) if last >= self.open => (self.open, last),
            _ => (1, 0),
        };
        (first..=last).step_by(self.step as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_window_is_eight_to_nineteen_on_half_hours() {
        let hours = BusinessHours::default();
        assert_eq!(hours.open(), 480);
        assert_eq!(hours.close(), 1140);
        assert_eq!(hours.step(), 30);
    }

    #[test]
    fn last_candidate_ends_exactly_at_close() {
        let hours = BusinessHours::from_hours(8, 10).unwrap();
        let starts: Vec<u32> = hours.candidate_starts(60).collect();
        assert_eq!(starts, vec![480, 510, 540]);
    }

    #[test]
    fn too_long_appointment_has_no_candidates() {
        let hours = BusinessHours::from_hours(8, 9).unwrap();
        assert_eq!(hours.candidate_starts(90).count(), 0);
    }

    #[test]
    fn rejects_inverted_or_overlong_windows() {
        assert!(BusinessHours::new(600, 600, 30).is_err());
        assert!(BusinessHours::new(700, 600, 30).is_err());
        assert!(BusinessHours::new(0, MINUTES_PER_DAY + 1, 30).is_err());
        assert!(BusinessHours::new(480, 1140, 0).is_err());
    }

    #[test]
    fn builds_from_shop_opening_times() {
        let hours = BusinessHours::from_opening_times("09:00:00", "18:30").unwrap();
        assert_eq!(hours.open(), 540);
        assert_eq!(hours.close(), 1110);
    }
}
