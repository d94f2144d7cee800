// libs/appointment-cell/src/models.rs
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum AppointmentError {
    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Doctor not found")]
    DoctorNotFound,

    #[error("Doctor is not available at the selected time")]
    NoMatchingSlot,

    #[error("Invalid time: {0}")]
    InvalidTime(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

// ==============================================================================
// REQUEST MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppointmentRequest {
    pub doctor_id: Uuid,
    pub date: NaiveDate,
    /// 12-hour clock string, e.g. "10:00 AM".
    pub time_slot: String,
    pub phone: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityQuery {
    pub doctor_id: Uuid,
    pub date: NaiveDate,
}
