//! Recording stand-ins for external HTTP services.
//!
//! The Discord webhook and the metadata API are replaced by `wiremock` servers that answer
//! every POST with a fixed status. `RecordedRequests` adds the two queries tests make against
//! them: a snapshot of what arrived, and a bounded wait for deliveries made in the background.

use std::time::Duration;

use axum::http::StatusCode;
use wiremock::{matchers::method, Mock, ResponseTemplate};

pub use wiremock::{MockServer, Request};

use crate::error::TestError;

/// Interval between checks while waiting for background deliveries.
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Starts a mock server answering every POST with `status`.
pub async fn start(status: StatusCode) -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(status.as_u16()))
        .mount(&server)
        .await;

    server
}

/// Queries over the requests a `MockServer` has recorded.
pub trait RecordedRequests {
    /// Every request received so far, in arrival order.
    fn requests(&self) -> impl std::future::Future<Output = Vec<Request>> + Send;

    /// Waits until at least `count` requests have arrived.
    ///
    /// # Returns
    /// - `Ok(Vec<Request>)` - All received requests once `count` is reached
    /// - `Err(TestError::Timeout)` - Fewer than `count` requests arrived in time
    fn wait_for_requests(
        &self,
        count: usize,
        timeout: Duration,
    ) -> impl std::future::Future<Output = Result<Vec<Request>, TestError>> + Send;
}

impl RecordedRequests for MockServer {
    async fn requests(&self) -> Vec<Request> {
        // Recording is on by default for `MockServer::start`
        self.received_requests().await.unwrap_or_default()
    }

    async fn wait_for_requests(
        &self,
        count: usize,
        timeout: Duration,
    ) -> Result<Vec<Request>, TestError> {
        let wait = async {
            loop {
                let requests = self.requests().await;
                if requests.len() >= count {
                    return requests;
                }
                tokio::time::sleep(POLL_INTERVAL).await;
            }
        };

        match tokio::time::timeout(timeout, wait).await {
            Ok(requests) => Ok(requests),
            Err(_) => Err(TestError::Timeout {
                expected: count,
                received: self.requests().await.len(),
            }),
        }
    }
}
