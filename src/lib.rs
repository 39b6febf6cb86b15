//! Forex trading journal backend: trade models, the analytics and
//! filtering engine, and the command surface a UI calls into.

pub mod analytics;
pub mod commands;
pub mod error;
pub mod models;
pub mod store;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use error::{JournalError, Result};
pub use store::{MemoryStore, TradeStore};
