use std::sync::Arc;

use axum::{routing::get, Router};

use appointment_cell::router::appointment_routes;
use bed_cell::router::bed_routes;
use doctor_cell::router::doctor_routes;
use shared_store::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(|| async { "Medibook API is running!" }))
        .nest("/appointments", appointment_routes(state.clone()))
        .nest("/beds", bed_routes(state.clone()))
        .nest("/doctor", doctor_routes(state.clone()))
}
