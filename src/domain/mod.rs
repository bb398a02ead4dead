pub mod cart;
pub mod catalog;
pub mod errors;
pub mod filters;
pub mod models;
pub mod pricing;

pub use cart::*;
pub use catalog::*;
pub use errors::*;
pub use filters::*;
pub use models::*;
pub use pricing::*;
