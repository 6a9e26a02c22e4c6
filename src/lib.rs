//! jobform - Terminal Job Application Form
//!
//! A terminal job-application form with position-dependent fields,
//! validation on submit and a read-only summary of the submitted application.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
pub use application::*;
