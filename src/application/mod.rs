//! Application layer managing state and the form workflow.
//!
//! This module coordinates between the domain layer and presentation layer,
//! managing the form lifecycle, focus, and user interactions.

pub mod config;
pub mod state;

pub use config::*;
pub use state::*;
