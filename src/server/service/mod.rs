//! Service layer for outbound integrations and rendering.
//!
//! Services sit between the controllers and the outside world:
//!
//! - **Webhook** (`webhook`) - Discord webhook client
//! - **Notifications** (`notification`, `notifier`) - Operator messages and their background
//!   delivery queue
//! - **Templates** (`template`) - Placeholder substitution for the deprecated login pages

pub mod notification;
pub mod notifier;
pub mod template;
pub mod webhook;
