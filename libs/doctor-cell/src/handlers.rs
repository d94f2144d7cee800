// libs/doctor-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Extension, State},
    Json,
};
use serde_json::{json, Value};

use shared_models::auth::Identity;
use shared_models::error::AppError;
use shared_models::status::BookingStatus;
use shared_store::AppState;

use crate::models::{DoctorError, UpdateStatusRequest};
use crate::services::appointments::DoctorAppointmentService;

#[axum::debug_handler]
pub async fn get_doctor_appointments(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<Value>, AppError> {
    let service = DoctorAppointmentService::new(state.store.clone());

    let appointments = service
        .list_for(&identity)
        .await
        .map_err(map_doctor_error)?;

    Ok(Json(json!(appointments)))
}

#[axum::debug_handler]
pub async fn update_appointment_status(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<Value>, AppError> {
    let service = DoctorAppointmentService::new(state.store.clone());

    let appointment = service
        .update_status(&identity, request.appointment_id, &request.status)
        .await
        .map_err(map_doctor_error)?;

    let verb = if appointment.status == BookingStatus::Confirmed {
        "confirmed"
    } else {
        "canceled"
    };

    Ok(Json(json!({
        "message": format!("Appointment {} successfully", verb),
        "appointment": appointment,
    })))
}

fn map_doctor_error(e: DoctorError) -> AppError {
    match e {
        DoctorError::AccessDenied(msg) => AppError::Forbidden(msg),
        DoctorError::ProfileNotFound => AppError::NotFound("Doctor profile not found".to_string()),
        DoctorError::AppointmentNotFound => AppError::NotFound("Appointment not found".to_string()),
        DoctorError::NotOwner => {
            AppError::Forbidden("You can only update your own appointments".to_string())
        }
        DoctorError::InvalidStatus => {
            AppError::ValidationError("Invalid status. Must be CONFIRMED or CANCELED".to_string())
        }
        DoctorError::InvalidTransition(status) => {
            AppError::BadRequest(format!("Appointment is already {}", status))
        }
        DoctorError::DatabaseError(msg) => AppError::Database(msg),
    }
}
