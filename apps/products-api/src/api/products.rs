//! Products API routes

use axum::Router;
use domain_products::{ProductService, SqlProductRepository, handlers};

use crate::state::AppState;

/// Create products router
pub fn router(state: &AppState) -> Router {
    let repository = SqlProductRepository::new(state.db.clone());
    let service = ProductService::new(repository);
    handlers::router(service)
}
