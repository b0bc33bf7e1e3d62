//! Field-level checks on an appointment draft.
//!
//! Every check runs; the result lists all problems at once so a form can mark
//! each field. Messages are user-facing (pt-BR), field names match the form's
//! camelCase keys.

use chrono::{Local, NaiveDate};

use crate::model::{AppointmentDraft, ValidationError, ValidationResult};
use crate::time::is_strict_hhmm;

/// Validate `draft` against today's local date.
pub fn validate(draft: &AppointmentDraft) -> ValidationResult {
    validate_at(draft, Local::now().date_naive())
}

/// Validate `draft` as if the current date were `today`.
///
/// A draft dated `today` is accepted; only strictly earlier dates are rejected.
pub fn validate_at(draft: &AppointmentDraft, today: NaiveDate) -> ValidationResult {
    let mut errors = Vec::new();

    require_id(&mut errors, "clientId", draft.client_id.as_deref(), "Cliente é obrigatório");
    require_id(
        &mut errors,
        "professionalId",
        draft.professional_id.as_deref(),
        "Profissional é obrigatório",
    );
    require_id(&mut errors, "serviceId", draft.service_id.as_deref(), "Serviço é obrigatório");

    match draft.date {
        None => errors.push(ValidationError::new("date", "Data é obrigatória")),
        Some(date) if date < today => {
            errors.push(ValidationError::new("date", "Data não pode ser no passado"))
        }
        Some(_) => {}
    }

    match draft.start_time.as_deref() {
        None => errors.push(ValidationError::new("startTime", "Horário é obrigatório")),
        Some(time) if !is_strict_hhmm(time) => errors.push(ValidationError::new(
            "startTime",
            "Horário inválido (use o formato HH:mm)",
        )),
        Some(_) => {}
    }

    if let Some(duration) = draft.duration {
        if duration <= 0 {
            errors.push(ValidationError::new("duration", "Duração deve ser maior que zero"));
        }
    }

    if let Some(price) = draft.price {
        if price.is_nan() || price < 0.0 {
            errors.push(ValidationError::new("price", "Preço não pode ser negativo"));
        }
    }

    ValidationResult::from_errors(errors)
}

fn require_id(errors: &mut Vec<ValidationError>, field: &str, value: Option<&str>, message: &str) {
    if value.map_or(true, |v| v.trim().is_empty()) {
        errors.push(ValidationError::new(field, message));
    }
}
