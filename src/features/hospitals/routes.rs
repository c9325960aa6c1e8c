use std::sync::Arc;

use axum::{
    routing::{delete, get},
    Router,
};

use crate::features::hospitals::handlers;
use crate::features::hospitals::services::HospitalService;

/// Routes for the hospitals feature
pub fn routes(service: Arc<HospitalService>) -> Router {
    Router::new()
        .route(
            "/api/hospital",
            get(handlers::list_hospitals).post(handlers::create_hospital),
        )
        .route(
            "/api/hospital/{id}",
            delete(handlers::delete_hospital).put(handlers::update_hospital),
        )
        .with_state(service)
}
