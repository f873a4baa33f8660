use thiserror::Error;

/// Errors that can occur while setting up or inspecting a test environment.
#[derive(Error, Debug)]
pub enum TestError {
    /// Failed to connect to or prepare the in-memory SQLite database.
    #[error(transparent)]
    Database(#[from] sea_orm::DbErr),

    /// A mock server did not receive the expected number of requests in time.
    #[error("Expected {expected} request(s) but received {received} before the timeout")]
    Timeout {
        /// Number of requests the test waited for
        expected: usize,
        /// Number of requests actually recorded
        received: usize,
    },
}
