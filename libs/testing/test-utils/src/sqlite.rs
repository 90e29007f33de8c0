use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

/// Private in-memory SQLite database with a migrator applied.
///
/// The pool holds exactly one connection; a second connection would open a
/// different, empty database. `LIKE` is switched to case-sensitive so name
/// search behaves as it does on PostgreSQL.
pub struct TestDatabase {
    connection: DatabaseConnection,
}

impl TestDatabase {
    pub async fn new<M: MigratorTrait>() -> Self {
        let mut options = ConnectOptions::new("sqlite::memory:");
        options
            .max_connections(1)
            .min_connections(1)
            .sqlx_logging(false);

        let connection = Database::connect(options)
            .await
            .expect("Failed to open in-memory SQLite");

        connection
            .execute_unprepared("PRAGMA case_sensitive_like = ON")
            .await
            .expect("Failed to enable case-sensitive LIKE");

        M::up(&connection, None)
            .await
            .expect("Failed to apply migrations");

        tracing::debug!("In-memory test database ready");
        Self { connection }
    }

    /// Cloned handle; all clones share the single pooled connection.
    pub fn connection(&self) -> DatabaseConnection {
        self.connection.clone()
    }
}
