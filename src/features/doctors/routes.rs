use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::doctors::handlers;
use crate::features::doctors::services::DoctorService;

/// Routes for the doctors feature.
///
/// Updates ride on POST (not PUT/PATCH), matching the clients already in
/// the field.
pub fn routes(service: Arc<DoctorService>) -> Router {
    Router::new()
        .route(
            "/api/doctor",
            get(handlers::list_doctors).post(handlers::create_doctor),
        )
        .route("/api/doctor/data/{id}", get(handlers::get_doctor))
        .route(
            "/api/doctor/{id}",
            post(handlers::update_doctor).delete(handlers::delete_doctor),
        )
        .with_state(service)
}
