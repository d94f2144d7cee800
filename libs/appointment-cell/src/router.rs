// libs/appointment-cell/src/router.rs
use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use shared_store::AppState;
use shared_utils::extractor::auth_middleware;

use crate::handlers;

pub fn appointment_routes(state: Arc<AppState>) -> Router {
    let protected_routes = Router::new()
        .route("/create", post(handlers::create_appointment))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    // Availability and the doctor directory are browsable without a token
    let public_routes = Router::new()
        .route("/availability", get(handlers::get_doctor_availability))
        .route("/doctors", get(handlers::get_all_doctors));

    Router::new()
        .merge(protected_routes)
        .merge(public_routes)
        .with_state(state)
}
