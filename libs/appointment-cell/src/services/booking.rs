// libs/appointment-cell/src/services/booking.rs
use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use doctor_cell::services::availability::{
    match_slot, parse_time_slot, requested_window, reserve_slot,
};
use shared_models::auth::{Identity, Role};
use shared_models::records::{Appointment, Patient};
use shared_models::status::BookingStatus;
use shared_store::{Database, Store};

use crate::models::{AppointmentError, CreateAppointmentRequest};

pub struct AppointmentBookingService {
    store: Store,
}

impl AppointmentBookingService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Patient-side booking: resolve the requested window against the
    /// doctor's open slots and, in one transaction, materialize the patient
    /// profile if needed, flip the slot and insert the PENDING appointment.
    pub async fn create_appointment(
        &self,
        identity: &Identity,
        request: CreateAppointmentRequest,
    ) -> Result<Appointment, AppointmentError> {
        if identity.role != Role::Patient {
            return Err(AppointmentError::AccessDenied(
                "Only patients can book appointments".to_string(),
            ));
        }

        let start = parse_time_slot(&request.time_slot)
            .map_err(|e| AppointmentError::InvalidTime(e.to_string()))?;
        let (start, end) =
            requested_window(start).map_err(|e| AppointmentError::InvalidTime(e.to_string()))?;

        debug!(
            "Booking request: patient {} doctor {} on {} at {}",
            identity.id, request.doctor_id, request.date, start
        );

        let identity = identity.clone();
        let appointment = self
            .store
            .transaction(move |db| {
                if !db.doctors.contains_key(&request.doctor_id) {
                    return Err(AppointmentError::DoctorNotFound);
                }

                let patient_id = ensure_patient_profile(db, &identity, request.phone.clone());

                let slot_id = match_slot(db, request.doctor_id, request.date, start, end)
                    .ok_or(AppointmentError::NoMatchingSlot)?;
                reserve_slot(db, slot_id);

                let appointment = Appointment {
                    id: Uuid::new_v4(),
                    patient_id,
                    doctor_id: request.doctor_id,
                    slot_id,
                    date: request.date,
                    start_time: start,
                    status: BookingStatus::Pending,
                    phone: request.phone,
                    created_at: Utc::now(),
                };
                db.appointments.insert(appointment.id, appointment.clone());
                Ok(appointment)
            })
            .await?;

        info!(
            "Appointment {} created for patient {} with doctor {}",
            appointment.id, appointment.patient_id, appointment.doctor_id
        );
        Ok(appointment)
    }
}

/// Upsert-on-demand: patients get a profile row the first time they book,
/// keyed by their identity id. Safe to call when the row already exists.
pub fn ensure_patient_profile(
    db: &mut Database,
    identity: &Identity,
    phone: Option<String>,
) -> Uuid {
    db.patients.entry(identity.id).or_insert_with(|| {
        debug!("Materializing patient profile for {}", identity.id);
        Patient {
            id: identity.id,
            name: identity.name.clone(),
            email: identity.email.clone(),
            phone,
            created_at: Utc::now(),
        }
    });
    identity.id
}
