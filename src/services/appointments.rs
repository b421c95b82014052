use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time};

#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleAppointmentRequest {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub specialist: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentConfirmation {
    pub confirmation: String,
    pub appointment_id: String,
    pub specialist: String,
    /// Echo of the requested date string
    pub date: String,
}

/// Accepts RFC 3339, `YYYY-MM-DDTHH:MM[:SS[.f]]`, a space instead of `T`,
/// or a bare date (midnight). Offsets are dropped; the wall-clock time is kept.
pub fn parse_appointment_date(input: &str) -> Result<PrimitiveDateTime> {
    let input = input.trim();

    if let Ok(with_offset) = OffsetDateTime::parse(input, &Rfc3339) {
        return Ok(PrimitiveDateTime::new(with_offset.date(), with_offset.time()));
    }

    let normalized = input.replacen(' ', "T", 1);
    let layouts = [
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]"),
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
        format_description!("[year]-[month]-[day]T[hour]:[minute]"),
    ];
    for layout in layouts {
        if let Ok(parsed) = PrimitiveDateTime::parse(&normalized, layout) {
            return Ok(parsed);
        }
    }

    Date::parse(input, format_description!("[year]-[month]-[day]"))
        .map(|date| PrimitiveDateTime::new(date, Time::MIDNIGHT))
        .map_err(|e| AppError::InvalidRequest(format!("Invalid date '{}': {}", input, e)))
}

/// Build a confirmation for a requested slot. Nothing is booked anywhere.
pub fn schedule_appointment(
    request: &ScheduleAppointmentRequest,
    now: OffsetDateTime,
) -> Result<AppointmentConfirmation> {
    let specialist = request.specialist.trim();
    if specialist.is_empty() {
        return Err(AppError::InvalidRequest("Specialist is required".to_string()));
    }

    let when = parse_appointment_date(&request.date)?;
    let display = when
        .format(format_description!(
            "[month repr:long] [day], [year] at [hour repr:12]:[minute] [period]"
        ))
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let millis = now.unix_timestamp_nanos() / 1_000_000;

    Ok(AppointmentConfirmation {
        confirmation: format!("Appointment scheduled with {} on {}", specialist, display),
        appointment_id: format!("APT-{}", millis),
        specialist: specialist.to_string(),
        date: request.date.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn request(date: &str, specialist: &str) -> ScheduleAppointmentRequest {
        ScheduleAppointmentRequest {
            date: date.to_string(),
            specialist: specialist.to_string(),
        }
    }

    #[test]
    fn test_parse_variants() {
        let expected = datetime!(2025-03-07 14:30);
        assert_eq!(parse_appointment_date("2025-03-07T14:30").unwrap(), expected);
        assert_eq!(parse_appointment_date("2025-03-07T14:30:00").unwrap(), expected);
        assert_eq!(parse_appointment_date("2025-03-07 14:30:00").unwrap(), expected);
        assert_eq!(parse_appointment_date("2025-03-07T14:30:00Z").unwrap(), expected);
        assert_eq!(
            parse_appointment_date("2025-03-07T14:30:00.250").unwrap(),
            datetime!(2025-03-07 14:30:00.25)
        );
        assert_eq!(
            parse_appointment_date("2025-03-07").unwrap(),
            datetime!(2025-03-07 0:00)
        );
        assert!(parse_appointment_date("next tuesday").is_err());
        assert!(parse_appointment_date("2025-13-01T10:00").is_err());
    }

    #[test]
    fn test_confirmation_formatting() {
        let now = datetime!(2025-01-01 12:00:00 UTC);
        let confirmation =
            schedule_appointment(&request("2025-03-07T14:30", "Dr. Smith"), now).unwrap();

        assert_eq!(
            confirmation.confirmation,
            "Appointment scheduled with Dr. Smith on March 07, 2025 at 02:30 PM"
        );
        assert_eq!(confirmation.appointment_id, "APT-1735732800000");
        assert_eq!(confirmation.date, "2025-03-07T14:30");

        let json = serde_json::to_value(&confirmation).unwrap();
        assert_eq!(json["appointmentId"], "APT-1735732800000");
    }

    #[test]
    fn test_morning_slot_uses_am() {
        let now = OffsetDateTime::UNIX_EPOCH;
        let confirmation =
            schedule_appointment(&request("2025-11-20T09:05:00", "Cardiologist"), now).unwrap();
        assert!(confirmation.confirmation.ends_with("November 20, 2025 at 09:05 AM"));
    }

    #[test]
    fn test_rejects_missing_specialist() {
        let now = OffsetDateTime::UNIX_EPOCH;
        assert!(schedule_appointment(&request("2025-03-07T14:30", " "), now).is_err());
    }
}
