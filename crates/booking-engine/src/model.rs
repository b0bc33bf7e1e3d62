//! Drafts, booking snapshots and the result values the engine hands back.
//!
//! Drafts arrive from a booking form and use camelCase keys. Existing bookings
//! arrive from storage rows and keep the row's snake_case keys, including the
//! optional joined `service` and `client` records.

use chrono::NaiveDate;
use serde::{de, Deserialize, Deserializer, Serialize};

use crate::error::Result;
use crate::time::{time_to_minutes, TimeRange, MINUTES_PER_DAY};

/// Duration assumed for a booking whose service join is missing.
pub const FALLBACK_DURATION_MINUTES: u32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl AppointmentStatus {
    /// Cancelled appointments free their slot; every other status holds it.
    pub fn occupies_time(self) -> bool {
        self != AppointmentStatus::Cancelled
    }
}

/// A candidate appointment, possibly only partly filled in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppointmentDraft {
    pub client_id: Option<String>,
    pub professional_id: Option<String>,
    pub service_id: Option<String>,
    /// A blank string from an untouched date input reads as absent.
    #[serde(deserialize_with = "blank_date_as_none")]
    pub date: Option<NaiveDate>,
    /// Wall-clock start, `HH:mm`.
    pub start_time: Option<String>,
    /// Minutes. Signed so that a bad form value reaches the validator intact.
    /// Accepts whole-number floats (`30.0`) and numeric strings.
    #[serde(deserialize_with = "form_minutes")]
    pub duration: Option<i64>,
    pub price: Option<f64>,
    pub notes: Option<String>,
    pub status: Option<AppointmentStatus>,
    pub send_notification: Option<bool>,
}

impl AppointmentDraft {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

fn blank_date_as_none<'de, D>(deserializer: D) -> std::result::Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .map_err(|e| de::Error::custom(format!("invalid date {s:?}: {e}"))),
    }
}

/// How a number-ish form field can arrive over JSON.
#[derive(Deserialize)]
#[serde(untagged)]
enum FormNumber {
    Int(i64),
    Float(f64),
    Text(String),
}

fn form_minutes<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<FormNumber>::deserialize(deserializer)? else {
        return Ok(None);
    };
    match raw {
        FormNumber::Int(minutes) => Ok(Some(minutes)),
        FormNumber::Float(value) => whole_minutes(value).map(Some).map_err(de::Error::custom),
        FormNumber::Text(text) => {
            let text = text.trim();
            if text.is_empty() {
                return Ok(None);
            }
            if let Ok(minutes) = text.parse::<i64>() {
                return Ok(Some(minutes));
            }
            let value = text
                .parse::<f64>()
                .map_err(|_| de::Error::custom(format!("invalid duration {text:?}")))?;
            whole_minutes(value).map(Some).map_err(de::Error::custom)
        }
    }
}

fn whole_minutes(value: f64) -> std::result::Result<i64, String> {
    // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive.
    // NaN and infinities have a NaN fractional part.
    if value.fract() != 0.0 || value < i64::MIN as f64 || value >= i64::MAX as f64 {
        return Err(format!("duration must be a whole number of minutes, got {value}"));
    }
    Ok(value as i64)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceSummary {
    #[serde(default)]
    pub duration_minutes: Option<u32>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientSummary {
    #[serde(default)]
    pub name: Option<String>,
}

/// Read-only snapshot of an appointment already on a professional's agenda.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExistingBooking {
    pub id: String,
    pub booking_time: String,
    pub booking_date: NaiveDate,
    pub status: AppointmentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<ServiceSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<ClientSummary>,
}

impl ExistingBooking {
    pub fn new(
        id: impl Into<String>,
        booking_date: NaiveDate,
        booking_time: impl Into<String>,
        status: AppointmentStatus,
    ) -> Self {
        Self {
            id: id.into(),
            booking_time: booking_time.into(),
            booking_date,
            status,
            service: None,
            client: None,
        }
    }

    pub fn with_service(mut self, duration_minutes: u32, name: impl Into<String>) -> Self {
        self.service = Some(ServiceSummary {
            duration_minutes: Some(duration_minutes),
            name: Some(name.into()),
        });
        self
    }

    pub fn with_client(mut self, name: impl Into<String>) -> Self {
        self.client = Some(ClientSummary {
            name: Some(name.into()),
        });
        self
    }

    /// Duration from the joined service, if the join came back.
    pub fn service_duration(&self) -> Option<u32> {
        self.service.as_ref().and_then(|s| s.duration_minutes)
    }

    pub fn service_name(&self) -> Option<&str> {
        self.service.as_ref().and_then(|s| s.name.as_deref())
    }

    pub fn client_name(&self) -> Option<&str> {
        self.client.as_ref().and_then(|c| c.name.as_deref())
    }

    /// Whether this booking blocks time on `date`.
    pub fn occupies(&self, date: NaiveDate) -> bool {
        self.booking_date == date && self.status.occupies_time()
    }

    /// The interval this booking holds, falling back to
    /// [`FALLBACK_DURATION_MINUTES`] when the service duration is unknown.
    ///
    /// A booking is a same-day interval: one running past midnight is cut at
    /// the end of its day.
    pub fn occupied_range(&self) -> Result<TimeRange> {
        let start = time_to_minutes(&self.booking_time)?;
        let duration = self
            .service_duration()
            .unwrap_or(FALLBACK_DURATION_MINUTES);
        let range = TimeRange::starting_at(start, duration);
        Ok(TimeRange {
            start: range.start,
            end: range.end.min(MINUTES_PER_DAY),
        })
    }
}

/// Parse a JSON array of storage rows into booking snapshots.
pub fn bookings_from_json(json: &str) -> Result<Vec<ExistingBooking>> {
    Ok(serde_json::from_str(json)?)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<ValidationError>,
}

impl ValidationResult {
    pub fn from_errors(errors: Vec<ValidationError>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    /// Whether any error was reported against `field`.
    pub fn has_error(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }
}

/// The existing booking a candidate collided with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictingAppointment {
    pub id: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_name: Option<String>,
}

/// Data-quality issues noticed while checking a schedule.
///
/// These never change the outcome; they tell the caller that an assumption was
/// made on its behalf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScheduleWarning {
    /// The booking had no joined service duration and was treated as
    /// [`FALLBACK_DURATION_MINUTES`] long.
    MissingServiceDuration { booking_id: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictResult {
    pub has_conflict: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conflicting_appointment: Option<ConflictingAppointment>,
    /// Up to five `HH:mm` start times, closest to the requested time first.
    pub suggested_slots: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub warnings: Vec<ScheduleWarning>,
}

impl ConflictResult {
    pub fn clear(warnings: Vec<ScheduleWarning>) -> Self {
        Self {
            has_conflict: false,
            conflicting_appointment: None,
            suggested_slots: Vec::new(),
            warnings,
        }
    }
}
