use chrono::{NaiveDate, NaiveTime, Utc};
use uuid::Uuid;

use shared_models::records::{AvailabilitySlot, BedPrices, Doctor, Hospital};

use crate::memory::Database;

/// Demo dataset for local development: one hospital, two doctors, a day of
/// half-hour slots each. Enabled via SEED_DEMO_DATA.
pub fn demo_database() -> Database {
    let mut db = Database::default();

    let hospital_id = Uuid::new_v4();
    db.hospitals.insert(
        hospital_id,
        Hospital {
            id: hospital_id,
            name: "City Hospital".to_string(),
            address: "123 Main St, NY".to_string(),
            bed_availability: 10,
            bed_prices: BedPrices {
                general: 120,
                icu: 600,
                emergency: 350,
                pediatric: 180,
            },
        },
    );

    let doctors = [
        ("Dr. Alice Brown", "Cardiology", "alice.brown@example.com", "123-456-7890"),
        ("Dr. Bob Wilson", "Neurology", "bob.wilson@example.com", "987-654-3210"),
    ];

    for (name, specialty, email, phone) in doctors {
        let doctor_id = Uuid::new_v4();
        db.doctors.insert(
            doctor_id,
            Doctor {
                id: doctor_id,
                name: name.to_string(),
                specialty: specialty.to_string(),
                email: email.to_string(),
                phone: Some(phone.to_string()),
                hospital_id: Some(hospital_id),
                avatar: None,
            },
        );

        let date = Utc::now().date_naive() + chrono::Duration::days(1);
        for slot in half_hour_slots(doctor_id, date, 9, 17) {
            db.slots.insert(slot.id, slot);
        }
    }

    db
}

/// Half-hour slots between `from_hour` and `to_hour` on the given date.
pub fn half_hour_slots(
    doctor_id: Uuid,
    date: NaiveDate,
    from_hour: u32,
    to_hour: u32,
) -> Vec<AvailabilitySlot> {
    let mut slots = Vec::new();
    for hour in from_hour..to_hour {
        for minute in [0, 30] {
            let start = NaiveTime::from_hms_opt(hour, minute, 0).expect("valid slot time");
            let end = start + chrono::Duration::minutes(30);
            slots.push(AvailabilitySlot {
                id: Uuid::new_v4(),
                doctor_id,
                date,
                start_time: start,
                end_time: end,
                is_booked: false,
            });
        }
    }
    slots
}
