//! HTTP front-end for the modmail site.
//!
//! Serves the static landing page and the post-login pages, keeps the legacy `/modmail`
//! metadata route alive, and funnels every failure through one error boundary that logs it
//! and reports unexpected errors to a Discord webhook.
//!
//! # Architecture
//!
//! - **Controllers** (`controller/`) - HTTP request handlers
//! - **Services** (`service/`) - Webhook delivery, the notification queue, page templates
//! - **Middleware** (`middleware/`) - Error boundary and legacy host matching
//! - **Error** (`error/`) - Structured and unstructured application errors
//! - **Startup/Shutdown** - Ordered construction and teardown of shared clients
//!
//! # Request flow
//!
//! 1. Request passes the trace layer and enters the error boundary
//! 2. The session layer loads the session, if a handler asks for one
//! 3. The controller handles the request, returning a response or an `AppError`
//! 4. The error boundary logs failures, queues notifications and writes the final body

pub mod config;
pub mod controller;
pub mod error;
pub mod middleware;
pub mod router;
pub mod service;
pub mod shutdown;
pub mod startup;
pub mod state;
pub mod util;

#[cfg(test)]
mod test;
