use std::net::SocketAddr;

use crate::server::util::text::truncate_chars;

/// Longest error trace, in characters, posted to the webhook.
pub const MAX_TRACE_CHARS: usize = 1000;

/// Messages posted to the operator webhook.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notification {
    /// The server finished startup and is about to accept traffic.
    ServerStarted { addr: SocketAddr },
    /// The server stopped accepting traffic and is tearing down.
    ServerStopped,
    /// A request failed with an unstructured error.
    ServerError { trace: String },
}

impl Notification {
    /// Plain-text webhook content for this notification.
    ///
    /// Error traces are cut to their first `MAX_TRACE_CHARS` characters.
    pub fn content(&self) -> String {
        match self {
            Self::ServerStarted { addr } => format!("Server started on {addr}"),
            Self::ServerStopped => "Server stopped".to_string(),
            Self::ServerError { trace } => truncate_chars(trace, MAX_TRACE_CHARS).to_string(),
        }
    }
}
