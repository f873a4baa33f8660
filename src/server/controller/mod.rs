//! HTTP request handlers.
//!
//! Controllers extract what they need from the request and the application state, call into
//! services, and return either a response or an `AppError` for the error boundary to map.

pub mod fallback;
pub mod legacy;
pub mod pages;
