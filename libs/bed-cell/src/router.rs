// libs/bed-cell/src/router.rs
use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};

use shared_store::AppState;
use shared_utils::extractor::auth_middleware;

use crate::handlers;

pub fn bed_routes(state: Arc<AppState>) -> Router {
    let protected_routes = Router::new()
        .route("/book", post(handlers::book_bed))
        .route("/bookings", get(handlers::get_user_bookings))
        .route("/cancel/{booking_id}", put(handlers::cancel_booking))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    // Hospital listing is public
    let public_routes = Router::new().route("/hospitals", get(handlers::get_hospitals));

    Router::new()
        .merge(protected_routes)
        .merge(public_routes)
        .with_state(state)
}
