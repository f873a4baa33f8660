//! Small helpers shared by controllers and services.

pub mod text;
