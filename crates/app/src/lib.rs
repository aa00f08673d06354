//! Product catalog domain, storage contract and store adapters.

pub mod context;
pub mod products;
pub mod stores;

#[cfg(test)]
mod test;
