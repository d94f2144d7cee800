// libs/bed-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use shared_models::auth::Identity;
use shared_models::error::AppError;
use shared_store::AppState;

use crate::models::{BedBookingError, BookBedRequest};
use crate::services::booking::BedBookingService;

#[axum::debug_handler]
pub async fn get_hospitals(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, AppError> {
    let service = BedBookingService::new(state.store.clone());
    let hospitals = service.list_hospitals().await;
    Ok(Json(json!(hospitals)))
}

#[axum::debug_handler]
pub async fn book_bed(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Json(request): Json<BookBedRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let service = BedBookingService::new(state.store.clone());

    let booking = service
        .book_bed(&identity, request)
        .await
        .map_err(map_bed_error)?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Bed booked successfully",
            "booking": booking,
        })),
    ))
}

#[axum::debug_handler]
pub async fn get_user_bookings(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<Value>, AppError> {
    let service = BedBookingService::new(state.store.clone());
    let bookings = service.user_bookings(&identity).await;
    Ok(Json(json!(bookings)))
}

#[axum::debug_handler]
pub async fn cancel_booking(
    State(state): State<Arc<AppState>>,
    Path(booking_id): Path<Uuid>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<Value>, AppError> {
    let service = BedBookingService::new(state.store.clone());

    let booking = service
        .cancel_booking(&identity, booking_id)
        .await
        .map_err(map_bed_error)?;

    Ok(Json(json!({
        "message": "Booking canceled successfully",
        "booking": booking,
    })))
}

fn map_bed_error(e: BedBookingError) -> AppError {
    match e {
        BedBookingError::AccessDenied(msg) => AppError::Forbidden(msg),
        BedBookingError::ValidationError(msg) => AppError::ValidationError(msg),
        BedBookingError::HospitalNotFound => AppError::NotFound("Hospital not found".to_string()),
        BedBookingError::NoBedsAvailable => {
            AppError::BadRequest("No beds available at this hospital".to_string())
        }
        BedBookingError::BookingNotFound => AppError::NotFound("Booking not found".to_string()),
        BedBookingError::NotOwner => {
            AppError::Forbidden("You can only cancel your own bookings".to_string())
        }
        BedBookingError::AlreadyCanceled => {
            AppError::BadRequest("Booking is already canceled".to_string())
        }
        BedBookingError::DatabaseError(msg) => AppError::Database(msg),
    }
}
