//! Shared test infrastructure for the catalog crates.
//!
//! - [`TestDatabase`]: in-memory SQLite with a migrator applied
//! - `PostgresTestDatabase`: throwaway PostgreSQL container (feature: `postgres`)
//! - [`TestDataBuilder`]: deterministic fixture values
//! - [`assertions`]: assertion helpers
//!
//! ```rust,ignore
//! use test_utils::TestDatabase;
//!
//! #[tokio::test]
//! async fn lists_nothing_on_empty_table() {
//!     let db = TestDatabase::new::<migration::SchemaMigrator>().await;
//!     let repo = SqlProductRepository::new(db.connection());
//!     assert!(repo.get_all().await.unwrap().is_empty());
//! }
//! ```

use rust_decimal::Decimal;
use uuid::Uuid;

mod sqlite;
pub use sqlite::TestDatabase;

#[cfg(feature = "postgres")]
mod postgres;
#[cfg(feature = "postgres")]
pub use postgres::PostgresTestDatabase;

/// Deterministic fixture values derived from a seed.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Seed from the test's name so reruns produce the same data.
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    pub fn id(&self) -> Uuid {
        let bytes = self.seed.to_le_bytes();
        let mut uuid_bytes = [0u8; 16];
        uuid_bytes[..8].copy_from_slice(&bytes);
        uuid_bytes[8..].copy_from_slice(&bytes);
        Uuid::from_bytes(uuid_bytes)
    }

    /// e.g. `test-product-1234-main`
    pub fn name(&self, prefix: &str, suffix: &str) -> String {
        format!("test-{}-{}-{}", prefix, self.seed, suffix)
    }

    /// Stock level in 0..1000
    pub fn stock(&self) -> i32 {
        (self.seed % 1000) as i32
    }

    /// Price in 0.00..=999.99 with two decimal places
    pub fn price(&self) -> Decimal {
        Decimal::new((self.seed % 100_000) as i64, 2)
    }
}

pub mod assertions {
    use rust_decimal::Decimal;
    use uuid::Uuid;

    pub fn assert_uuid_eq(actual: Uuid, expected: Uuid, context: &str) {
        assert_eq!(
            actual, expected,
            "{}: expected UUID {}, got {}",
            context, expected, actual
        );
    }

    pub fn assert_some<T>(value: Option<T>, context: &str) -> T {
        value.unwrap_or_else(|| panic!("{}: expected Some, got None", context))
    }

    /// Compare prices numerically, ignoring scale (20.5 == 20.50).
    pub fn assert_price_eq(actual: Decimal, expected: Decimal, context: &str) {
        assert!(
            actual.normalize() == expected.normalize(),
            "{}: expected price {}, got {}",
            context,
            expected,
            actual
        );
    }
}
