use axum::http::StatusCode;

use crate::{context::TestContext, error::TestError, mock};

/// Builder for creating test contexts.
///
/// Provides a fluent interface for configuring test environments with an in-memory SQLite
/// database and recording mock endpoints. Call `build()` to create the configured context.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::builder::TestBuilder;
///
/// let test = TestBuilder::new()
///     .with_webhook()
///     .with_upstream()
///     .build()
///     .await?;
/// ```
pub struct TestBuilder {
    /// Status the mock webhook answers with, when a webhook was requested.
    webhook: Option<StatusCode>,

    /// Status the mock metadata API answers with, when an upstream was requested.
    upstream: Option<StatusCode>,
}

impl TestBuilder {
    /// Creates a new test builder with no mock endpoints configured.
    pub fn new() -> Self {
        Self {
            webhook: None,
            upstream: None,
        }
    }

    /// Adds a mock Discord webhook answering `204 No Content`, as Discord does.
    pub fn with_webhook(self) -> Self {
        self.with_webhook_status(StatusCode::NO_CONTENT)
    }

    /// Adds a mock Discord webhook answering with the given status.
    ///
    /// Use an error status to exercise best-effort delivery paths.
    pub fn with_webhook_status(mut self, status: StatusCode) -> Self {
        self.webhook = Some(status);
        self
    }

    /// Adds a mock metadata API answering `200 OK`.
    pub fn with_upstream(self) -> Self {
        self.with_upstream_status(StatusCode::OK)
    }

    /// Adds a mock metadata API answering with the given status.
    pub fn with_upstream_status(mut self, status: StatusCode) -> Self {
        self.upstream = Some(status);
        self
    }

    /// Builds and initializes the test context.
    ///
    /// Connects the in-memory SQLite database and starts every requested mock endpoint.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Fully initialized test context
    /// - `Err(TestError::Database)` - Failed to connect to the database
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new();

        setup.database().await?;

        if let Some(status) = self.webhook {
            setup.webhook = Some(mock::start(status).await);
        }
        if let Some(status) = self.upstream {
            setup.upstream = Some(mock::start(status).await);
        }

        Ok(setup)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
