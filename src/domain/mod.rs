//! Domain layer: pure models and the ports infrastructure implements.

pub mod models;
pub mod ports;

pub use ports::{CompletionStore, StoreError};
