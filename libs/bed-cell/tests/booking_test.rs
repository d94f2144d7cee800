// libs/bed-cell/tests/booking_test.rs

use assert_matches::assert_matches;
use chrono::NaiveDate;
use uuid::Uuid;

use bed_cell::models::{BedBookingError, BookBedRequest};
use bed_cell::services::booking::BedBookingService;
use shared_models::auth::{Identity, Role};
use shared_models::records::{BedPrices, Hospital};
use shared_models::status::BookingStatus;
use shared_store::{Database, Store};

fn patient(name: &str) -> Identity {
    Identity {
        id: Uuid::new_v4(),
        role: Role::Patient,
        email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
        name: name.to_string(),
    }
}

fn store_with_hospital(beds: i32) -> (Store, Uuid) {
    let id = Uuid::new_v4();
    let mut db = Database::default();
    db.hospitals.insert(
        id,
        Hospital {
            id,
            name: "City Hospital".to_string(),
            address: "123 Main St, NY".to_string(),
            bed_availability: beds,
            bed_prices: BedPrices {
                general: 120,
                icu: 600,
                emergency: 350,
                pediatric: 180,
            },
        },
    );
    (Store::with_database(db), id)
}

fn request(hospital_id: Uuid) -> BookBedRequest {
    BookBedRequest {
        hospital_id: Some(hospital_id),
        bed_type: Some("icu".to_string()),
        admission_date: Some(NaiveDate::from_ymd_opt(2025, 5, 1).unwrap()),
        reason: Some("Post-surgery care".to_string()),
        notes: None,
    }
}

async fn beds_left(store: &Store, id: Uuid) -> i32 {
    store.read(|db| db.hospitals[&id].bed_availability).await
}

#[tokio::test]
async fn booking_decrements_availability_and_starts_pending() {
    let (store, hospital_id) = store_with_hospital(2);
    let service = BedBookingService::new(store.clone());

    let booking = service
        .book_bed(&patient("John Doe"), request(hospital_id))
        .await
        .unwrap();

    assert_eq!(booking.status, BookingStatus::Pending);
    assert_eq!(beds_left(&store, hospital_id).await, 1);
}

#[tokio::test]
async fn round_trip_book_fail_cancel_rebook() {
    let (store, hospital_id) = store_with_hospital(1);
    let service = BedBookingService::new(store.clone());
    let alice = patient("Alice A");
    let bob = patient("Bob B");

    let booking = service.book_bed(&alice, request(hospital_id)).await.unwrap();
    assert_eq!(beds_left(&store, hospital_id).await, 0);

    let err = service.book_bed(&bob, request(hospital_id)).await.unwrap_err();
    assert_matches!(err, BedBookingError::NoBedsAvailable);

    let canceled = service.cancel_booking(&alice, booking.id).await.unwrap();
    assert_eq!(canceled.status, BookingStatus::Canceled);
    assert_eq!(beds_left(&store, hospital_id).await, 1);

    service.book_bed(&bob, request(hospital_id)).await.unwrap();
    assert_eq!(beds_left(&store, hospital_id).await, 0);
}

#[tokio::test]
async fn at_most_n_concurrent_bookings_succeed() {
    let (store, hospital_id) = store_with_hospital(3);

    let mut tasks = Vec::new();
    for i in 0..10 {
        let store = store.clone();
        let caller = patient(&format!("Patient {}", i));
        tasks.push(tokio::spawn(async move {
            BedBookingService::new(store)
                .book_bed(&caller, request(hospital_id))
                .await
        }));
    }

    let results = futures::future::join_all(tasks).await;
    let successes = results
        .into_iter()
        .filter(|r| matches!(r, Ok(Ok(_))))
        .count();

    assert_eq!(successes, 3);
    assert_eq!(beds_left(&store, hospital_id).await, 0);
    let records = store.read(|db| db.bed_bookings.len()).await;
    assert_eq!(records, 3, "every decrement must have a booking record");
}

#[tokio::test]
async fn only_the_owner_can_cancel() {
    let (store, hospital_id) = store_with_hospital(1);
    let service = BedBookingService::new(store.clone());
    let alice = patient("Alice A");

    let booking = service.book_bed(&alice, request(hospital_id)).await.unwrap();

    let err = service
        .cancel_booking(&patient("Mallory M"), booking.id)
        .await
        .unwrap_err();
    assert_matches!(err, BedBookingError::NotOwner);

    // Booking and ledger untouched
    let status = store.read(|db| db.bed_bookings[&booking.id].status).await;
    assert_eq!(status, BookingStatus::Pending);
    assert_eq!(beds_left(&store, hospital_id).await, 0);
}

#[tokio::test]
async fn re_cancel_does_not_release_a_second_bed() {
    let (store, hospital_id) = store_with_hospital(1);
    let service = BedBookingService::new(store.clone());
    let alice = patient("Alice A");

    let booking = service.book_bed(&alice, request(hospital_id)).await.unwrap();
    service.cancel_booking(&alice, booking.id).await.unwrap();
    assert_eq!(beds_left(&store, hospital_id).await, 1);

    let err = service.cancel_booking(&alice, booking.id).await.unwrap_err();
    assert_matches!(err, BedBookingError::AlreadyCanceled);
    assert_eq!(beds_left(&store, hospital_id).await, 1);
}

#[tokio::test]
async fn missing_fields_are_named_in_the_validation_error() {
    let (store, _) = store_with_hospital(1);
    let service = BedBookingService::new(store);

    let err = service
        .book_bed(
            &patient("John Doe"),
            BookBedRequest {
                hospital_id: None,
                bed_type: Some("icu".to_string()),
                admission_date: None,
                reason: None,
                notes: None,
            },
        )
        .await
        .unwrap_err();

    match err {
        BedBookingError::ValidationError(msg) => {
            assert!(msg.contains("hospitalId"));
            assert!(msg.contains("admissionDate"));
            assert!(msg.contains("reason"));
            assert!(!msg.contains("bedType"));
        }
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[tokio::test]
async fn unknown_bed_type_is_rejected() {
    let (store, hospital_id) = store_with_hospital(1);
    let mut req = request(hospital_id);
    req.bed_type = Some("penthouse".to_string());

    let err = BedBookingService::new(store.clone())
        .book_bed(&patient("John Doe"), req)
        .await
        .unwrap_err();
    assert_matches!(err, BedBookingError::ValidationError(_));
    assert_eq!(beds_left(&store, hospital_id).await, 1);
}

#[tokio::test]
async fn unknown_hospital_is_not_found() {
    let (store, _) = store_with_hospital(1);
    let err = BedBookingService::new(store)
        .book_bed(&patient("John Doe"), request(Uuid::new_v4()))
        .await
        .unwrap_err();
    assert_matches!(err, BedBookingError::HospitalNotFound);
}

#[tokio::test]
async fn doctors_cannot_book_beds() {
    let (store, hospital_id) = store_with_hospital(1);
    let mut caller = patient("Dr. Caller");
    caller.role = Role::Doctor;

    let err = BedBookingService::new(store)
        .book_bed(&caller, request(hospital_id))
        .await
        .unwrap_err();
    assert_matches!(err, BedBookingError::AccessDenied(_));
}

#[tokio::test]
async fn cancel_of_unknown_booking_is_not_found() {
    let (store, _) = store_with_hospital(1);
    let err = BedBookingService::new(store)
        .cancel_booking(&patient("John Doe"), Uuid::new_v4())
        .await
        .unwrap_err();
    assert_matches!(err, BedBookingError::BookingNotFound);
}

#[tokio::test]
async fn hospital_summaries_carry_per_category_prices() {
    let (store, hospital_id) = store_with_hospital(4);
    let summaries = BedBookingService::new(store).list_hospitals().await;

    assert_eq!(summaries.len(), 1);
    let summary = &summaries[0];
    assert_eq!(summary.id, hospital_id);
    assert_eq!(summary.bed_availability, 4);
    assert_eq!(summary.categories.len(), 4);
    let icu = summary
        .categories
        .iter()
        .find(|c| c.bed_type == shared_models::records::BedType::Icu)
        .unwrap();
    assert_eq!(icu.price, 600);
    assert_eq!(icu.available, 4);
}

#[tokio::test]
async fn user_bookings_come_back_newest_first_with_hospital_name() {
    let (store, hospital_id) = store_with_hospital(3);
    let service = BedBookingService::new(store.clone());
    let alice = patient("Alice A");

    let first = service.book_bed(&alice, request(hospital_id)).await.unwrap();
    let second = service.book_bed(&alice, request(hospital_id)).await.unwrap();
    // Someone else's booking must not show up
    service
        .book_bed(&patient("Bob B"), request(hospital_id))
        .await
        .unwrap();

    let bookings = service.user_bookings(&alice).await;
    assert_eq!(bookings.len(), 2);
    assert_eq!(bookings[0].booking.id, second.id);
    assert_eq!(bookings[1].booking.id, first.id);
    assert_eq!(bookings[0].hospital_name.as_deref(), Some("City Hospital"));
}
