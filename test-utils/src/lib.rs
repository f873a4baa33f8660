//! Modmail Web Test Utils
//!
//! Provides shared testing utilities for building integration and unit tests for the modmail
//! web front-end. This crate offers a builder pattern for creating test contexts with in-memory
//! SQLite databases and recording HTTP endpoints that stand in for external services.
//!
//! # Overview
//!
//! The test utilities consist of four main components:
//! - **TestBuilder**: Fluent builder for configuring test environments
//! - **TestContext**: Test environment containing the database connection and mock endpoints
//! - **mock**: `wiremock` servers standing in for the webhook and the metadata API
//! - **TestError**: Error types that can occur during test setup
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::builder::TestBuilder;
//!
//! #[tokio::test]
//! async fn test_webhook_delivery() -> Result<(), TestError> {
//!     let test = TestBuilder::new().with_webhook().build().await?;
//!
//!     let webhook = test.webhook.as_ref().unwrap();
//!     // Point the application at test.webhook_url() and assert on webhook.requests()
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod mock;
