//! Presentation layer handling terminal UI and user input.
//!
//! This module renders the storefront screens using ratatui and maps
//! keyboard input onto application actions and API calls.

pub mod ui;
pub mod input;

pub use ui::*;
pub use input::*;
