// libs/bed-cell/src/models.rs
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use shared_models::records::BedType;

#[derive(Error, Debug, PartialEq)]
pub enum LedgerError {
    #[error("Hospital not found")]
    NotFound,

    #[error("No beds available at this hospital")]
    InsufficientCapacity,
}

#[derive(Error, Debug)]
pub enum BedBookingError {
    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("{0}")]
    ValidationError(String),

    #[error("Hospital not found")]
    HospitalNotFound,

    #[error("No beds available at this hospital")]
    NoBedsAvailable,

    #[error("Booking not found")]
    BookingNotFound,

    #[error("You can only cancel your own bookings")]
    NotOwner,

    #[error("Booking is already canceled")]
    AlreadyCanceled,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

// ==============================================================================
// REQUEST/RESPONSE MODELS
// ==============================================================================

/// Fields are optional so validation can name exactly what is missing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookBedRequest {
    pub hospital_id: Option<Uuid>,
    pub bed_type: Option<String>,
    pub admission_date: Option<NaiveDate>,
    pub reason: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BedCategorySummary {
    pub bed_type: BedType,
    pub available: i32,
    pub price: i64,
}

/// Hospital listing entry with the per-category view computed from the
/// shared bed pool and the static price table.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HospitalSummary {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub bed_availability: i32,
    pub categories: Vec<BedCategorySummary>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BedBookingView {
    #[serde(flatten)]
    pub booking: shared_models::records::BedBooking,
    pub hospital_name: Option<String>,
}
