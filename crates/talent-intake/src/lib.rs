//! Core library for the conversational recruitment intake service.
//!
//! The interesting machinery lives in [`workflows::intake`]: pure text
//! extractors, the staged dialogue controller, and the storage contract a
//! deployment must satisfy. Configuration, telemetry, and the top-level
//! error type are shared with the API service.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
