//! Request processing layers.
//!
//! - **Boundary** (`boundary`) - Outermost error boundary and panic conversion
//! - **Host** (`host`) - Host constraint extractor for the legacy route

pub mod boundary;
pub mod host;
