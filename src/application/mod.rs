//! Application layer managing state and user workflows.
//!
//! This module coordinates between the domain layer and presentation layer:
//! it owns the cart and filter stores, the data loaded from the API and the
//! navigation state of the storefront.

pub mod state;

pub use state::*;
