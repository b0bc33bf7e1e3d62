//! # booking-engine
//!
//! Scheduling decisions for a barbershop booking system.
//!
//! Given a candidate appointment and a professional's existing bookings for one
//! day, the engine answers three questions: is the draft well-formed, does it
//! collide with anything already booked, and if so, which nearby start times
//! are still open. Everything is pure computation over in-memory values;
//! fetching bookings and committing the result belong to the caller.
//!
//! ## Modules
//!
//! - [`time`] — `HH:mm` ↔ minutes-since-midnight conversions and [`TimeRange`]
//! - [`model`] — drafts, booking snapshots and result types
//! - [`validator`] — field-level checks on a (possibly partial) draft
//! - [`conflict`] — first-overlap detection against existing bookings
//! - [`slots`] — ranked alternative start times inside business hours
//! - [`hours`] — business-hours window and slot grid
//! - [`review`] — validation and conflict check composed for a booking form
//! - [`error`] — Error types

pub mod conflict;
pub mod error;
pub mod hours;
pub mod model;
pub mod review;
pub mod slots;
pub mod time;
pub mod validator;

pub use conflict::{check_conflicts, check_conflicts_with_hours};
pub use error::BookingError;
pub use hours::BusinessHours;
pub use model::{
    bookings_from_json, AppointmentDraft, AppointmentStatus, ConflictResult,
    ConflictingAppointment, ExistingBooking, ScheduleWarning, ValidationError, ValidationResult,
};
pub use review::{review_draft, DraftReview};
pub use slots::find_available_slots;
pub use time::{checked_minutes_to_time, minutes_to_time, time_to_minutes, TimeRange};
pub use validator::{validate, validate_at};
