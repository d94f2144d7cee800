use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

use shared_models::records::{
    Appointment, AvailabilitySlot, BedBooking, Doctor, Hospital, Patient,
};

/// All persisted tables. Cloning is cheap enough at this scale that a full
/// snapshot backs every transaction.
#[derive(Debug, Clone, Default)]
pub struct Database {
    pub patients: HashMap<Uuid, Patient>,
    pub doctors: HashMap<Uuid, Doctor>,
    pub hospitals: HashMap<Uuid, Hospital>,
    pub slots: HashMap<Uuid, AvailabilitySlot>,
    pub appointments: HashMap<Uuid, Appointment>,
    pub bed_bookings: HashMap<Uuid, BedBooking>,
}

/// Shared data-access handle. A single mutex over the whole database makes
/// every transaction serializable: the capacity/availability check and the
/// paired mutation commit as one unit with respect to concurrent callers.
#[derive(Clone, Default)]
pub struct Store {
    inner: Arc<Mutex<Database>>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_database(db: Database) -> Self {
        Self {
            inner: Arc::new(Mutex::new(db)),
        }
    }

    /// Non-isolated read. Listing results can go stale against concurrent
    /// writes; the reserve step re-checks inside a transaction.
    pub async fn read<T>(&self, f: impl FnOnce(&Database) -> T) -> T {
        let guard = self.inner.lock().await;
        f(&guard)
    }

    /// Scoped transaction: the closure runs against the live database and
    /// any `Err` restores the pre-transaction snapshot, so no path can leave
    /// a decremented counter without its booking record or vice versa.
    pub async fn transaction<T, E>(
        &self,
        f: impl FnOnce(&mut Database) -> Result<T, E>,
    ) -> Result<T, E> {
        let mut guard = self.inner.lock().await;
        let snapshot = guard.clone();
        match f(&mut guard) {
            Ok(value) => Ok(value),
            Err(err) => {
                debug!("Transaction rolled back");
                *guard = snapshot;
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_models::records::BedPrices;

    fn hospital(beds: i32) -> Hospital {
        Hospital {
            id: Uuid::new_v4(),
            name: "Test Hospital".to_string(),
            address: "1 Test Way".to_string(),
            bed_availability: beds,
            bed_prices: BedPrices {
                general: 100,
                icu: 500,
                emergency: 300,
                pediatric: 150,
            },
        }
    }

    #[tokio::test]
    async fn commit_persists_mutations() {
        let store = Store::new();
        let h = hospital(3);
        let id = h.id;
        store
            .transaction(|db| -> Result<(), ()> {
                db.hospitals.insert(id, h.clone());
                Ok(())
            })
            .await
            .unwrap();

        let beds = store
            .read(|db| db.hospitals.get(&id).map(|h| h.bed_availability))
            .await;
        assert_eq!(beds, Some(3));
    }

    #[tokio::test]
    async fn error_rolls_back_every_mutation_in_scope() {
        let h = hospital(5);
        let id = h.id;
        let mut db = Database::default();
        db.hospitals.insert(id, h);
        let store = Store::with_database(db);

        let result: Result<(), &str> = store
            .transaction(|db| {
                db.hospitals.get_mut(&id).unwrap().bed_availability -= 1;
                Err("record creation failed")
            })
            .await;

        assert!(result.is_err());
        let beds = store
            .read(|db| db.hospitals.get(&id).unwrap().bed_availability)
            .await;
        assert_eq!(beds, 5, "decrement must not survive the rollback");
    }

    #[tokio::test]
    async fn transactions_serialize_under_contention() {
        let h = hospital(1);
        let id = h.id;
        let mut db = Database::default();
        db.hospitals.insert(id, h);
        let store = Store::with_database(db);

        let mut tasks = Vec::new();
        for _ in 0..8 {
            let store = store.clone();
            tasks.push(tokio::spawn(async move {
                store
                    .transaction(|db| {
                        let hospital = db.hospitals.get_mut(&id).unwrap();
                        if hospital.bed_availability <= 0 {
                            return Err(());
                        }
                        hospital.bed_availability -= 1;
                        Ok(())
                    })
                    .await
            }));
        }

        let results = futures::future::join_all(tasks).await;
        let successes = results
            .into_iter()
            .filter(|r| matches!(r, Ok(Ok(()))))
            .count();
        assert_eq!(successes, 1);
        let beds = store
            .read(|db| db.hospitals.get(&id).unwrap().bed_availability)
            .await;
        assert_eq!(beds, 0);
    }
}
