// libs/doctor-cell/src/services/appointments.rs

use tracing::{debug, info, warn};
use uuid::Uuid;

use shared_models::auth::{Identity, Role};
use shared_models::records::Appointment;
use shared_models::status::BookingStatus;
use shared_store::{Database, Store};

use crate::models::{
    AppointmentPatientView, DoctorAppointmentView, DoctorError,
};
use crate::services::availability::release_slot;

pub struct DoctorAppointmentService {
    store: Store,
}

impl DoctorAppointmentService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// All appointments assigned to the calling doctor, date ascending,
    /// patient nested.
    pub async fn list_for(
        &self,
        identity: &Identity,
    ) -> Result<Vec<DoctorAppointmentView>, DoctorError> {
        require_doctor(identity)?;
        let email = identity.email.clone();

        let mut appointments = self
            .store
            .read(|db| {
                let doctor_id = find_doctor_by_email(db, &email)?;
                let views = db
                    .appointments
                    .values()
                    .filter(|a| a.doctor_id == doctor_id)
                    .map(|a| DoctorAppointmentView {
                        id: a.id,
                        date: a.date,
                        start_time: a.start_time,
                        status: a.status,
                        created_at: a.created_at,
                        patient: patient_view(db, a),
                    })
                    .collect::<Vec<_>>();
                Ok(views)
            })
            .await?;

        appointments.sort_by_key(|a| (a.date, a.start_time));
        Ok(appointments)
    }

    /// Doctor-side status overwrite: only CONFIRMED or CANCELED are legal
    /// targets, only the assigned doctor may write, and cancellation frees
    /// the underlying slot in the same transaction.
    pub async fn update_status(
        &self,
        identity: &Identity,
        appointment_id: Uuid,
        status: &str,
    ) -> Result<Appointment, DoctorError> {
        require_doctor(identity)?;

        let new_status = match status.parse::<BookingStatus>() {
            Ok(s @ (BookingStatus::Confirmed | BookingStatus::Canceled)) => s,
            _ => {
                warn!("Rejected status value {:?} for appointment {}", status, appointment_id);
                return Err(DoctorError::InvalidStatus);
            }
        };

        let email = identity.email.clone();
        let updated = self
            .store
            .transaction(move |db| {
                let doctor_id = find_doctor_by_email(db, &email)?;

                let current = db
                    .appointments
                    .get(&appointment_id)
                    .ok_or(DoctorError::AppointmentNotFound)?
                    .clone();

                if current.doctor_id != doctor_id {
                    return Err(DoctorError::NotOwner);
                }

                if !current.status.can_transition_to(new_status) {
                    debug!(
                        "Illegal transition {} -> {} on appointment {}",
                        current.status, new_status, appointment_id
                    );
                    return Err(DoctorError::InvalidTransition(current.status));
                }

                if new_status == BookingStatus::Canceled {
                    release_slot(db, current.slot_id);
                }

                let appointment = db
                    .appointments
                    .get_mut(&appointment_id)
                    .ok_or(DoctorError::AppointmentNotFound)?;
                appointment.status = new_status;
                Ok(appointment.clone())
            })
            .await?;

        info!(
            "Appointment {} set to {} by doctor {}",
            appointment_id, new_status, identity.id
        );
        Ok(updated)
    }
}

fn require_doctor(identity: &Identity) -> Result<(), DoctorError> {
    if identity.role != Role::Doctor {
        return Err(DoctorError::AccessDenied(
            "Only doctors can access this resource".to_string(),
        ));
    }
    Ok(())
}

fn find_doctor_by_email(db: &Database, email: &str) -> Result<Uuid, DoctorError> {
    db.doctors
        .values()
        .find(|d| d.email == email)
        .map(|d| d.id)
        .ok_or(DoctorError::ProfileNotFound)
}

fn patient_view(db: &Database, appointment: &Appointment) -> AppointmentPatientView {
    match db.patients.get(&appointment.patient_id) {
        Some(patient) => AppointmentPatientView {
            id: patient.id,
            name: patient.name.clone(),
            email: patient.email.clone(),
            phone: patient.phone.clone(),
        },
        // Patient rows are materialized before any appointment insert, but a
        // view should not fail the whole listing if one is missing.
        None => AppointmentPatientView {
            id: appointment.patient_id,
            name: String::new(),
            email: String::new(),
            phone: None,
        },
    }
}
