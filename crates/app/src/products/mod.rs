//! Products

pub mod errors;
pub mod models;
mod store;

pub use errors::StoreError;
pub use store::*;
