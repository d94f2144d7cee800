// libs/doctor-cell/src/models.rs
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use shared_models::status::BookingStatus;

#[derive(Error, Debug)]
pub enum DoctorError {
    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Doctor profile not found")]
    ProfileNotFound,

    #[error("Appointment not found")]
    AppointmentNotFound,

    #[error("You can only update your own appointments")]
    NotOwner,

    #[error("Invalid status. Must be CONFIRMED or CANCELED")]
    InvalidStatus,

    #[error("Appointment is already {0}")]
    InvalidTransition(BookingStatus),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[derive(Error, Debug, PartialEq)]
pub enum SlotError {
    #[error("Invalid time slot: {0}")]
    InvalidTimeFormat(String),
}

// ==============================================================================
// RESPONSE MODELS
// ==============================================================================

/// Directory entry joined with the doctor's hospital name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoctorSummary {
    pub id: Uuid,
    pub name: String,
    pub specialty: String,
    pub email: String,
    pub phone: Option<String>,
    pub hospital: Option<String>,
    pub avatar: Option<String>,
}

/// Open slot as displayed to patients; `time` is the 12-hour form the
/// booking endpoint accepts back.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotView {
    pub id: Uuid,
    pub time: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentPatientView {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

/// A doctor's view of one of their appointments, patient nested.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorAppointmentView {
    pub id: Uuid,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    pub patient: AppointmentPatientView,
}

// ==============================================================================
// REQUEST MODELS
// ==============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusRequest {
    pub appointment_id: Uuid,
    pub status: String,
}
