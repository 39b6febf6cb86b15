use std::sync::Mutex;

use super::TradeStore;
use crate::error::{JournalError, Result};
use crate::models::{Settings, TradeRecord};

#[derive(Default)]
struct StoreState {
    trades: Vec<TradeRecord>,
    settings: Settings,
}

/// Trades kept in insertion order behind a mutex.
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<StoreState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_trades(trades: Vec<TradeRecord>) -> Self {
        Self {
            state: Mutex::new(StoreState {
                trades,
                settings: Settings::default(),
            }),
        }
    }
}

impl TradeStore for MemoryStore {
    fn list_trades(&self) -> Result<Vec<TradeRecord>> {
        let state = self.state.lock()?;
        Ok(state.trades.clone())
    }

    fn get_trade(&self, id: &str) -> Result<Option<TradeRecord>> {
        let state = self.state.lock()?;
        Ok(state.trades.iter().find(|t| t.id == id).cloned())
    }

    fn insert_trade(&self, trade: TradeRecord) -> Result<()> {
        let mut state = self.state.lock()?;
        if state.trades.iter().any(|t| t.id == trade.id) {
            return Err(JournalError::Store(format!("Duplicate trade id: {}", trade.id)));
        }
        state.trades.push(trade);
        Ok(())
    }

    fn upsert_trade(&self, trade: TradeRecord) -> Result<()> {
        let mut state = self.state.lock()?;
        match state.trades.iter().position(|t| t.id == trade.id) {
            Some(pos) => state.trades[pos] = trade,
            None => state.trades.push(trade),
        }
        Ok(())
    }

    fn delete_trade(&self, id: &str) -> Result<bool> {
        let mut state = self.state.lock()?;
        let before = state.trades.len();
        state.trades.retain(|t| t.id != id);
        Ok(state.trades.len() != before)
    }

    fn delete_all_trades(&self) -> Result<usize> {
        let mut state = self.state.lock()?;
        let count = state.trades.len();
        state.trades.clear();
        Ok(count)
    }

    fn get_settings(&self) -> Result<Settings> {
        let state = self.state.lock()?;
        Ok(state.settings.clone())
    }

    fn save_settings(&self, settings: Settings) -> Result<()> {
        let mut state = self.state.lock()?;
        state.settings = settings;
        Ok(())
    }
}
