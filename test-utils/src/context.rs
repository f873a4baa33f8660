use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use wiremock::MockServer;

use crate::error::TestError;

/// Test context containing the database connection and mock external endpoints.
///
/// Provides an in-memory SQLite database connection for isolated tests, plus optional
/// recording servers standing in for the Discord webhook and the metadata API.
pub struct TestContext {
    /// Optional database connection to in-memory SQLite instance.
    ///
    /// Initialized lazily when `database()` is first called. Using `Option` allows
    /// deferred connection until actually needed by the test.
    pub db: Option<DatabaseConnection>,

    /// Recording endpoint standing in for the Discord webhook.
    pub webhook: Option<MockServer>,

    /// Recording endpoint standing in for the metadata API that legacy requests are
    /// forwarded to.
    pub upstream: Option<MockServer>,
}

impl TestContext {
    /// Creates a new empty test context.
    ///
    /// The database connection will be created lazily when `database()` is first called.
    pub fn new() -> Self {
        Self {
            db: None,
            webhook: None,
            upstream: None,
        }
    }

    /// Gets or creates the in-memory SQLite database connection.
    ///
    /// Returns a reference to the existing database connection if one exists, otherwise
    /// creates a new in-memory SQLite database and stores the connection. The connection
    /// persists for the lifetime of this test context.
    ///
    /// # Returns
    /// - `Ok(&DatabaseConnection)` - Reference to the database connection
    /// - `Err(TestError::Database)` - Failed to connect to in-memory SQLite database
    pub async fn database(&mut self) -> Result<&DatabaseConnection, TestError> {
        match self.db {
            Some(ref db) => Ok(db),
            None => {
                // Every pooled connection would open its own empty in-memory database
                let mut opt = ConnectOptions::new("sqlite::memory:");
                opt.max_connections(1).min_connections(1).sqlx_logging(false);

                let db = Database::connect(opt).await?;

                let db_ref = self.db.insert(db);

                Ok(&*db_ref) // Re-borrow as immutable
            }
        }
    }

    /// URL of the mock webhook, if one was configured.
    pub fn webhook_url(&self) -> Option<String> {
        self.webhook
            .as_ref()
            .map(|server| format!("{}/api/webhooks/1/token", server.uri()))
    }

    /// URL of the mock metadata endpoint, if one was configured.
    pub fn upstream_url(&self) -> Option<String> {
        self.upstream
            .as_ref()
            .map(|server| format!("{}/metadata", server.uri()))
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
