//! Products Domain
//!
//! Catalog of products (name, stock, price) over a SQL table.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, query-string extraction
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Validation, sort whitelist, existence checks
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← ProductRepository trait + SeaORM implementation
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Product, params, filters
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_products::{handlers, ProductService, SqlProductRepository};
//! # fn build(db: sea_orm::DatabaseConnection) -> axum::Router {
//! let service = ProductService::new(SqlProductRepository::new(db));
//! handlers::router(service)
//! # }
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod persistence;
pub mod repository;
pub mod service;

pub use error::{ProductError, ProductResult};
pub use handlers::ApiDoc;
pub use models::{
    MessageResponse, OrderQuery, Product, ProductFilter, ProductParams, ProductSortField,
    SearchQuery,
};
pub use persistence::SqlProductRepository;
pub use repository::ProductRepository;
pub use service::ProductService;
