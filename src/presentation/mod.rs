//! Presentation layer handling terminal UI and user input.
//!
//! This module manages the terminal user interface using ratatui,
//! handles keyboard input, and renders the form and summary views.

pub mod ui;
pub mod input;
pub mod terminal;

pub use ui::*;
pub use input::*;
pub use terminal::*;