// libs/doctor-cell/src/services/directory.rs

use tracing::debug;

use shared_store::Store;

use crate::models::DoctorSummary;

pub struct DoctorDirectoryService {
    store: Store,
}

impl DoctorDirectoryService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// All registered doctors with their hospital name joined in.
    pub async fn list_doctors(&self) -> Vec<DoctorSummary> {
        debug!("Listing doctor directory");

        let mut doctors: Vec<DoctorSummary> = self
            .store
            .read(|db| {
                db.doctors
                    .values()
                    .map(|doctor| DoctorSummary {
                        id: doctor.id,
                        name: doctor.name.clone(),
                        specialty: doctor.specialty.clone(),
                        email: doctor.email.clone(),
                        phone: doctor.phone.clone(),
                        hospital: doctor
                            .hospital_id
                            .and_then(|id| db.hospitals.get(&id))
                            .map(|hospital| hospital.name.clone()),
                        avatar: doctor.avatar.clone(),
                    })
                    .collect()
            })
            .await;

        doctors.sort_by(|a, b| a.name.cmp(&b.name));
        doctors
    }
}
