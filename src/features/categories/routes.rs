use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::categories::handlers;
use crate::features::categories::services::CategoryService;

/// Routes for the categories feature.
///
/// Updates ride on POST (not PUT/PATCH), matching the clients already in
/// the field.
pub fn routes(service: Arc<CategoryService>) -> Router {
    Router::new()
        .route(
            "/api/categories",
            get(handlers::list_categories).post(handlers::create_category),
        )
        .route(
            "/api/categories/bydoctor/{id}",
            get(handlers::list_category_doctors),
        )
        .route(
            "/api/categories/{id}",
            post(handlers::update_category).delete(handlers::delete_category),
        )
        .with_state(service)
}
