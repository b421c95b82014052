use crate::error::AppError;
use crate::services::appointments::{self, ScheduleAppointmentRequest};
use axum::{extract::rejection::JsonRejection, Json};
use serde_json::{json, Value};
use time::OffsetDateTime;

/// POST /api/schedule-appointment - Confirmation text only, nothing is booked
pub async fn schedule_appointment(
    payload: Result<Json<ScheduleAppointmentRequest>, JsonRejection>,
) -> Json<Value> {
    let result = payload.map_err(AppError::from).and_then(|Json(request)| {
        appointments::schedule_appointment(&request, OffsetDateTime::now_utc())
    });

    match result {
        Ok(confirmation) => {
            tracing::info!("Appointment {} confirmed", confirmation.appointment_id);
            let mut body = json!(confirmation);
            body["success"] = json!(true);
            Json(body)
        }
        Err(e) => {
            e.report("Appointment scheduling");
            Json(json!({
                "success": false,
                "error": format!("Failed to schedule appointment: {}", e.user_message()),
            }))
        }
    }
}
