//! Discord webhook client.
//!
//! Posts plain-text messages to a Discord channel webhook under a fixed display name and
//! avatar. The client reuses the application's shared `reqwest::Client`, so it carries the same
//! timeout and redirect policy as every other outbound request.

use reqwest::Client;
use serde::Serialize;
use url::Url;

use crate::server::error::webhook::WebhookError;

/// Display name shown on webhook messages.
pub const WEBHOOK_USERNAME: &str = "modmail.tk";

/// Avatar shown on webhook messages.
pub const WEBHOOK_AVATAR_URL: &str =
    "http://icons.iconarchive.com/icons/graphicloads/100-flat/256/analytics-icon.png";

/// JSON body accepted by Discord's "Execute Webhook" endpoint.
#[derive(Serialize)]
struct WebhookPayload<'a> {
    content: &'a str,
    username: &'a str,
    avatar_url: &'a str,
}

/// Client for a single Discord webhook.
///
/// Cheap to clone: the underlying `reqwest::Client` is reference counted.
#[derive(Clone, Debug)]
pub struct Webhook {
    client: Client,
    url: Url,
    username: String,
    avatar_url: String,
}

impl Webhook {
    /// Creates a webhook client using the default display name and avatar.
    ///
    /// # Arguments
    /// - `client` - Shared HTTP client used for delivery
    /// - `url` - Full webhook URL including its token
    pub fn new(client: Client, url: Url) -> Self {
        Self {
            client,
            url,
            username: WEBHOOK_USERNAME.to_string(),
            avatar_url: WEBHOOK_AVATAR_URL.to_string(),
        }
    }

    /// Posts a message to the webhook.
    ///
    /// # Arguments
    /// - `content` - Plain-text message body
    ///
    /// # Returns
    /// - `Ok(())` - Discord accepted the message
    /// - `Err(WebhookError::Delivery)` - Request failed or timed out
    /// - `Err(WebhookError::Rejected)` - Discord answered with a non-success status
    pub async fn send(&self, content: &str) -> Result<(), WebhookError> {
        let payload = WebhookPayload {
            content,
            username: &self.username,
            avatar_url: &self.avatar_url,
        };

        let response = self
            .client
            .post(self.url.clone())
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(WebhookError::Rejected(status));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::http::StatusCode;
    use test_utils::{builder::TestBuilder, mock::RecordedRequests};

    use super::*;

    fn webhook_for(url: &str) -> Webhook {
        Webhook::new(Client::new(), Url::parse(url).unwrap())
    }

    /// Tests the payload shape posted to Discord.
    ///
    /// Expected: one JSON POST with content, username and avatar_url
    #[tokio::test]
    async fn posts_content_with_identity() {
        let test = TestBuilder::new().with_webhook().build().await.unwrap();
        let webhook = webhook_for(&test.webhook_url().unwrap());

        webhook.send("hello").await.unwrap();

        let server = test.webhook.as_ref().unwrap();
        let requests = server
            .wait_for_requests(1, Duration::from_secs(2))
            .await
            .unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, axum::http::Method::POST);
        assert_eq!(requests[0].url.path(), "/api/webhooks/1/token");
        assert_eq!(
            requests[0].body_json::<serde_json::Value>().unwrap(),
            serde_json::json!({
                "content": "hello",
                "username": WEBHOOK_USERNAME,
                "avatar_url": WEBHOOK_AVATAR_URL,
            })
        );
    }

    /// Tests that an error status from Discord is reported.
    ///
    /// Expected: Err(WebhookError::Rejected(500))
    #[tokio::test]
    async fn reports_rejected_status() {
        let test = TestBuilder::new()
            .with_webhook_status(StatusCode::INTERNAL_SERVER_ERROR)
            .build()
            .await
            .unwrap();
        let webhook = webhook_for(&test.webhook_url().unwrap());

        let result = webhook.send("hello").await;

        assert!(matches!(
            result,
            Err(WebhookError::Rejected(StatusCode::INTERNAL_SERVER_ERROR))
        ));
    }

    /// Tests that an unreachable webhook is reported as a delivery failure.
    ///
    /// Expected: Err(WebhookError::Delivery)
    #[tokio::test]
    async fn reports_unreachable_webhook() {
        // Bind and immediately release a port so nothing is listening on it
        let addr = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap();

        let result = webhook_for(&format!("http://{addr}/api/webhooks/1/token"))
            .send("hello")
            .await;

        assert!(matches!(result, Err(WebhookError::Delivery(_))));
    }
}
