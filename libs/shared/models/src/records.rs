use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::status::BookingStatus;

/// Patient profile row. Materialized lazily on the first booking, so the id
/// always equals the authenticated user's id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Seeded by administration; read-only to the booking core.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    pub id: Uuid,
    pub name: String,
    pub specialty: String,
    pub email: String,
    pub phone: Option<String>,
    pub hospital_id: Option<Uuid>,
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hospital {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    /// Remaining bookable beds. Never negative; mutated only by the ledger
    /// inside a transaction paired with a BedBooking write.
    pub bed_availability: i32,
    pub bed_prices: BedPrices,
}

/// Static per-category daily rate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BedPrices {
    pub general: i64,
    pub icu: i64,
    pub emergency: i64,
    pub pediatric: i64,
}

impl BedPrices {
    pub fn for_type(&self, bed_type: BedType) -> i64 {
        match bed_type {
            BedType::General => self.general,
            BedType::Icu => self.icu,
            BedType::Emergency => self.emergency,
            BedType::Pediatric => self.pediatric,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BedType {
    General,
    Icu,
    Emergency,
    Pediatric,
}

impl BedType {
    pub const ALL: [BedType; 4] = [
        BedType::General,
        BedType::Icu,
        BedType::Emergency,
        BedType::Pediatric,
    ];
}

impl fmt::Display for BedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BedType::General => write!(f, "general"),
            BedType::Icu => write!(f, "icu"),
            BedType::Emergency => write!(f, "emergency"),
            BedType::Pediatric => write!(f, "pediatric"),
        }
    }
}

impl FromStr for BedType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "general" => Ok(BedType::General),
            "icu" => Ok(BedType::Icu),
            "emergency" => Ok(BedType::Emergency),
            "pediatric" => Ok(BedType::Pediatric),
            other => Err(format!(
                "Unknown bed type '{}'. Must be one of general, icu, emergency, pediatric",
                other
            )),
        }
    }
}

/// One bookable window on a doctor's calendar. `[start_time, end_time)` is
/// half-open; at most one non-canceled appointment may hold the slot, which
/// is enforced by flipping `is_booked` atomically with appointment creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilitySlot {
    pub id: Uuid,
    pub doctor_id: Uuid,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub is_booked: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub doctor_id: Uuid,
    /// Kept so cancellation can release the underlying slot.
    pub slot_id: Uuid,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub status: BookingStatus,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BedBooking {
    pub id: Uuid,
    pub user_id: Uuid,
    pub hospital_id: Uuid,
    pub bed_type: BedType,
    pub admission_date: NaiveDate,
    pub reason: String,
    pub notes: String,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}
