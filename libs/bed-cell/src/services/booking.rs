// libs/bed-cell/src/services/booking.rs
use chrono::{NaiveDate, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use shared_models::auth::{Identity, Role};
use shared_models::records::{BedBooking, BedType};
use shared_models::status::BookingStatus;
use shared_store::Store;

use crate::models::{
    BedBookingError, BedBookingView, BedCategorySummary, BookBedRequest, HospitalSummary,
    LedgerError,
};
use crate::services::ledger::{release_bed, reserve_bed};

pub struct BedBookingService {
    store: Store,
}

/// Validated form of a booking request, after presence checks.
struct BookBedInput {
    hospital_id: Uuid,
    bed_type: BedType,
    admission_date: NaiveDate,
    reason: String,
    notes: String,
}

impl BedBookingService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Hospital listing with the per-category availability/price view.
    pub async fn list_hospitals(&self) -> Vec<HospitalSummary> {
        let mut hospitals = self
            .store
            .read(|db| {
                db.hospitals
                    .values()
                    .map(|hospital| HospitalSummary {
                        id: hospital.id,
                        name: hospital.name.clone(),
                        address: hospital.address.clone(),
                        bed_availability: hospital.bed_availability,
                        categories: BedType::ALL
                            .iter()
                            .map(|&bed_type| BedCategorySummary {
                                bed_type,
                                // Beds come out of one shared pool
                                available: hospital.bed_availability,
                                price: hospital.bed_prices.for_type(bed_type),
                            })
                            .collect(),
                    })
                    .collect::<Vec<_>>()
            })
            .await;

        hospitals.sort_by(|a, b| a.name.cmp(&b.name));
        hospitals
    }

    /// Patient-side bed booking: capacity check and decrement commit
    /// atomically with the PENDING booking record.
    pub async fn book_bed(
        &self,
        identity: &Identity,
        request: BookBedRequest,
    ) -> Result<BedBooking, BedBookingError> {
        if identity.role != Role::Patient {
            return Err(BedBookingError::AccessDenied(
                "Only patients can book beds".to_string(),
            ));
        }

        let input = validate_request(request)?;
        let user_id = identity.id;

        let booking = self
            .store
            .transaction(move |db| {
                if !db.hospitals.contains_key(&input.hospital_id) {
                    return Err(BedBookingError::HospitalNotFound);
                }

                reserve_bed(db, input.hospital_id).map_err(|e| match e {
                    LedgerError::NotFound => BedBookingError::HospitalNotFound,
                    LedgerError::InsufficientCapacity => BedBookingError::NoBedsAvailable,
                })?;

                let booking = BedBooking {
                    id: Uuid::new_v4(),
                    user_id,
                    hospital_id: input.hospital_id,
                    bed_type: input.bed_type,
                    admission_date: input.admission_date,
                    reason: input.reason,
                    notes: input.notes,
                    status: BookingStatus::Pending,
                    created_at: Utc::now(),
                };
                db.bed_bookings.insert(booking.id, booking.clone());
                Ok(booking)
            })
            .await?;

        info!(
            "Bed booked: {} at hospital {} for user {}",
            booking.id, booking.hospital_id, booking.user_id
        );
        Ok(booking)
    }

    /// Caller's bookings, newest first, hospital name joined in.
    pub async fn user_bookings(&self, identity: &Identity) -> Vec<BedBookingView> {
        let user_id = identity.id;
        let mut bookings = self
            .store
            .read(|db| {
                db.bed_bookings
                    .values()
                    .filter(|b| b.user_id == user_id)
                    .map(|b| BedBookingView {
                        booking: b.clone(),
                        hospital_name: db
                            .hospitals
                            .get(&b.hospital_id)
                            .map(|h| h.name.clone()),
                    })
                    .collect::<Vec<_>>()
            })
            .await;

        bookings.sort_by(|a, b| b.booking.created_at.cmp(&a.booking.created_at));
        bookings
    }

    /// Owner-only cancellation. A booking that is already CANCELED is
    /// rejected so the ledger is never incremented twice for one booking.
    pub async fn cancel_booking(
        &self,
        identity: &Identity,
        booking_id: Uuid,
    ) -> Result<BedBooking, BedBookingError> {
        let user_id = identity.id;

        let booking = self
            .store
            .transaction(move |db| {
                let current = db
                    .bed_bookings
                    .get(&booking_id)
                    .ok_or(BedBookingError::BookingNotFound)?
                    .clone();

                if current.user_id != user_id {
                    return Err(BedBookingError::NotOwner);
                }

                if current.status == BookingStatus::Canceled {
                    debug!("Re-cancel attempt on booking {}", booking_id);
                    return Err(BedBookingError::AlreadyCanceled);
                }

                release_bed(db, current.hospital_id).map_err(|_| {
                    BedBookingError::DatabaseError(format!(
                        "Hospital {} missing for booking {}",
                        current.hospital_id, booking_id
                    ))
                })?;

                let booking = db
                    .bed_bookings
                    .get_mut(&booking_id)
                    .ok_or(BedBookingError::BookingNotFound)?;
                booking.status = BookingStatus::Canceled;
                Ok(booking.clone())
            })
            .await?;

        info!("Bed booking {} canceled by {}", booking_id, user_id);
        Ok(booking)
    }
}

fn validate_request(request: BookBedRequest) -> Result<BookBedInput, BedBookingError> {
    let mut missing = Vec::new();
    if request.hospital_id.is_none() {
        missing.push("hospitalId");
    }
    if request.bed_type.is_none() {
        missing.push("bedType");
    }
    if request.admission_date.is_none() {
        missing.push("admissionDate");
    }
    if request.reason.as_deref().map_or(true, str::is_empty) {
        missing.push("reason");
    }
    if !missing.is_empty() {
        return Err(BedBookingError::ValidationError(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )));
    }

    let bed_type = request
        .bed_type
        .as_deref()
        .unwrap_or_default()
        .parse::<BedType>()
        .map_err(BedBookingError::ValidationError)?;

    Ok(BookBedInput {
        hospital_id: request.hospital_id.expect("presence checked"),
        bed_type,
        admission_date: request.admission_date.expect("presence checked"),
        reason: request.reason.expect("presence checked"),
        notes: request.notes.unwrap_or_default(),
    })
}
