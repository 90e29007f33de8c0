//! Database access for the catalog service.
//!
//! - [`postgres`]: pool configuration, connect-with-retry, migrations, health
//! - [`repository`]: generic CRUD over SeaORM entities
//! - [`common`]: error type and backoff helpers
//!
//! ```ignore
//! use database::postgres::{self, PostgresConfig};
//! use database::RetryConfig;
//!
//! let db = postgres::connect_from_config_with_retry(config, RetryConfig::default()).await?;
//! postgres::run_migrations::<Migrator>(&db, "products_api").await?;
//! ```

pub mod common;
pub mod postgres;
pub mod repository;

pub use common::{DatabaseError, DatabaseResult, RetryConfig};
pub use repository::{BaseRepository, CrudRepository, NamedEntity};
