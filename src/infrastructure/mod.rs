//! Infrastructure layer providing external service integrations.
//!
//! This module contains the HTTP collaborator for the storefront API,
//! environment configuration, log setup and CSV export of order history.

pub mod api;
pub mod config;
pub mod export;
pub mod logging;

pub use api::*;
pub use config::*;
pub use export::*;
pub use logging::*;
