// libs/doctor-cell/src/services/availability.rs

use chrono::{Duration, NaiveDate, NaiveTime};
use tracing::debug;
use uuid::Uuid;

use shared_models::records::AvailabilitySlot;
use shared_store::{Database, Store};

use crate::models::{SlotError, SlotView};

/// Fixed appointment length.
pub const APPOINTMENT_MINUTES: i64 = 30;

/// Parse a 12-hour clock string ("10:00 AM") into a NaiveTime. "12 PM"
/// stays hour 12, any other PM hour adds 12, "12 AM" is hour 0.
pub fn parse_time_slot(raw: &str) -> Result<NaiveTime, SlotError> {
    NaiveTime::parse_from_str(raw.trim(), "%I:%M %p")
        .map_err(|_| SlotError::InvalidTimeFormat(raw.to_string()))
}

/// The requested window: fixed-length, rejected if it would wrap midnight.
pub fn requested_window(start: NaiveTime) -> Result<(NaiveTime, NaiveTime), SlotError> {
    let (end, wrapped) = start.overflowing_add_signed(Duration::minutes(APPOINTMENT_MINUTES));
    if wrapped != 0 {
        return Err(SlotError::InvalidTimeFormat(
            "time slot extends past midnight".to_string(),
        ));
    }
    Ok((start, end))
}

/// Find the earliest unbooked slot covering the requested window. Runs
/// against an open transaction so the match and the flip commit together.
pub fn match_slot(
    db: &Database,
    doctor_id: Uuid,
    date: NaiveDate,
    start: NaiveTime,
    end: NaiveTime,
) -> Option<Uuid> {
    db.slots
        .values()
        .filter(|slot| {
            slot.doctor_id == doctor_id
                && slot.date == date
                && !slot.is_booked
                && slot.start_time <= start
                && slot.end_time >= end
        })
        .min_by_key(|slot| slot.start_time)
        .map(|slot| slot.id)
}

pub fn reserve_slot(db: &mut Database, slot_id: Uuid) {
    if let Some(slot) = db.slots.get_mut(&slot_id) {
        slot.is_booked = true;
    }
}

pub fn release_slot(db: &mut Database, slot_id: Uuid) {
    if let Some(slot) = db.slots.get_mut(&slot_id) {
        slot.is_booked = false;
    }
}

pub struct AvailabilityService {
    store: Store,
}

impl AvailabilityService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Unbooked slots for a doctor on a date, earliest first. Not isolated
    /// from concurrent bookings; the reserve step re-checks.
    pub async fn find_availability(&self, doctor_id: Uuid, date: NaiveDate) -> Vec<SlotView> {
        debug!("Listing availability for doctor {} on {}", doctor_id, date);

        let mut slots: Vec<AvailabilitySlot> = self
            .store
            .read(|db| {
                db.slots
                    .values()
                    .filter(|slot| {
                        slot.doctor_id == doctor_id && slot.date == date && !slot.is_booked
                    })
                    .cloned()
                    .collect()
            })
            .await;

        slots.sort_by_key(|slot| slot.start_time);

        slots
            .into_iter()
            .map(|slot| SlotView {
                id: slot.id,
                time: slot.start_time.format("%-I:%M %p").to_string(),
                start_time: slot.start_time,
                end_time: slot.end_time,
            })
            .collect()
    }
}
