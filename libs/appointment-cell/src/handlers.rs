// libs/appointment-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Extension, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use doctor_cell::services::availability::AvailabilityService;
use doctor_cell::services::directory::DoctorDirectoryService;
use shared_models::auth::Identity;
use shared_models::error::AppError;
use shared_store::AppState;

use crate::models::{AppointmentError, AvailabilityQuery, CreateAppointmentRequest};
use crate::services::booking::AppointmentBookingService;

#[axum::debug_handler]
pub async fn create_appointment(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Json(request): Json<CreateAppointmentRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let service = AppointmentBookingService::new(state.store.clone());

    let appointment = service
        .create_appointment(&identity, request)
        .await
        .map_err(|e| match e {
            AppointmentError::AccessDenied(msg) => AppError::Forbidden(msg),
            AppointmentError::DoctorNotFound => AppError::NotFound("Doctor not found".to_string()),
            AppointmentError::NoMatchingSlot => {
                AppError::BadRequest("Doctor is not available at the selected time".to_string())
            }
            AppointmentError::InvalidTime(msg) => AppError::BadRequest(msg),
            AppointmentError::DatabaseError(msg) => AppError::Database(msg),
        })?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Appointment created successfully",
            "appointment": appointment,
        })),
    ))
}

#[axum::debug_handler]
pub async fn get_doctor_availability(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<Value>, AppError> {
    let service = AvailabilityService::new(state.store.clone());
    let slots = service.find_availability(query.doctor_id, query.date).await;
    Ok(Json(json!(slots)))
}

#[axum::debug_handler]
pub async fn get_all_doctors(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, AppError> {
    let service = DoctorDirectoryService::new(state.store.clone());
    let doctors = service.list_doctors().await;
    Ok(Json(json!(doctors)))
}
