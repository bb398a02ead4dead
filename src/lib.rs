//! tsfood - Terminal Food Ordering Library
//!
//! A terminal storefront for a food delivery API: browse and filter
//! restaurants, fill a multi-restaurant cart, check out, and review orders.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
pub use application::*;
