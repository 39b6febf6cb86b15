mod memory;

pub use memory::MemoryStore;

use crate::error::Result;
use crate::models::{Settings, TradeRecord};

/// Boundary to whatever holds the journal. The hosted backend lives behind
/// this trait; `MemoryStore` is the in-process implementation.
pub trait TradeStore: Send + Sync {
    fn list_trades(&self) -> Result<Vec<TradeRecord>>;

    fn get_trade(&self, id: &str) -> Result<Option<TradeRecord>>;

    fn insert_trade(&self, trade: TradeRecord) -> Result<()>;

    /// Insert or overwrite by id.
    fn upsert_trade(&self, trade: TradeRecord) -> Result<()>;

    /// Returns false when no trade had that id.
    fn delete_trade(&self, id: &str) -> Result<bool>;

    fn delete_all_trades(&self) -> Result<usize>;

    fn get_settings(&self) -> Result<Settings>;

    fn save_settings(&self, settings: Settings) -> Result<()>;
}
