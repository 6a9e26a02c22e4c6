//! Infrastructure layer providing external service integrations.
//!
//! This module contains the file exports of a submitted application, the
//! system clipboard and the log file setup.

pub mod clipboard;
pub mod persistence;
pub mod telemetry;

pub use clipboard::*;
pub use persistence::*;
pub use telemetry::*;
