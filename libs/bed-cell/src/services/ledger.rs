// libs/bed-cell/src/services/ledger.rs

use tracing::debug;
use uuid::Uuid;

use shared_store::Database;

use crate::models::LedgerError;

/// Take one bed. The caller must already hold a transaction scope so the
/// capacity check and the decrement are atomic against concurrent bookings.
pub fn reserve_bed(db: &mut Database, hospital_id: Uuid) -> Result<(), LedgerError> {
    let hospital = db
        .hospitals
        .get_mut(&hospital_id)
        .ok_or(LedgerError::NotFound)?;

    if hospital.bed_availability <= 0 {
        return Err(LedgerError::InsufficientCapacity);
    }

    hospital.bed_availability -= 1;
    debug!(
        "Reserved bed at {}, {} remaining",
        hospital_id, hospital.bed_availability
    );
    Ok(())
}

/// Return one bed. No upper bound is enforced; the cancellation guard in
/// the booking service prevents double releases for the same booking.
pub fn release_bed(db: &mut Database, hospital_id: Uuid) -> Result<(), LedgerError> {
    let hospital = db
        .hospitals
        .get_mut(&hospital_id)
        .ok_or(LedgerError::NotFound)?;

    hospital.bed_availability += 1;
    debug!(
        "Released bed at {}, {} available",
        hospital_id, hospital.bed_availability
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use shared_models::records::{BedPrices, Hospital};

    fn db_with_hospital(beds: i32) -> (Database, Uuid) {
        let id = Uuid::new_v4();
        let mut db = Database::default();
        db.hospitals.insert(
            id,
            Hospital {
                id,
                name: "City Hospital".to_string(),
                address: "123 Main St".to_string(),
                bed_availability: beds,
                bed_prices: BedPrices {
                    general: 120,
                    icu: 600,
                    emergency: 350,
                    pediatric: 180,
                },
            },
        );
        (db, id)
    }

    #[test]
    fn reserve_decrements_by_exactly_one() {
        let (mut db, id) = db_with_hospital(2);
        reserve_bed(&mut db, id).unwrap();
        assert_eq!(db.hospitals[&id].bed_availability, 1);
    }

    #[test]
    fn reserve_fails_at_zero_capacity() {
        let (mut db, id) = db_with_hospital(0);
        assert_matches!(reserve_bed(&mut db, id), Err(LedgerError::InsufficientCapacity));
        assert_eq!(db.hospitals[&id].bed_availability, 0);
    }

    #[test]
    fn unknown_hospital_is_not_found() {
        let (mut db, _) = db_with_hospital(1);
        assert_matches!(reserve_bed(&mut db, Uuid::new_v4()), Err(LedgerError::NotFound));
        assert_matches!(release_bed(&mut db, Uuid::new_v4()), Err(LedgerError::NotFound));
    }

    #[test]
    fn release_increments_by_exactly_one() {
        let (mut db, id) = db_with_hospital(0);
        release_bed(&mut db, id).unwrap();
        assert_eq!(db.hospitals[&id].bed_availability, 1);
    }
}
