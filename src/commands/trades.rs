use chrono::Utc;

use crate::analytics::{filter_trades, is_degenerate_setup, risk_reward, sort_trades};
use crate::error::{JournalError, Result};
use crate::models::{
    CreateTradeInput, FilterCriteria, SortSpec, TradeRecord, UpdateTradeInput, validate_trade,
};
use crate::store::TradeStore;

pub(crate) fn new_trade_id() -> String {
    format!("TRADE-{}-{}", Utc::now().timestamp_millis(), uuid::Uuid::new_v4())
}

/// Recompute the derived ratio from the record's own setup fields.
fn derive_risk_reward(trade: &mut TradeRecord) {
    if is_degenerate_setup(trade.trade_type, trade.entry_price, trade.stop_loss) {
        log::warn!(
            "Stop loss {} is on the wrong side of entry {} for {} {}; risk:reward set to 0",
            trade.stop_loss,
            trade.entry_price,
            trade.trade_type,
            trade.pair
        );
    }
    trade.risk_reward_ratio = risk_reward(
        trade.trade_type,
        trade.entry_price,
        trade.stop_loss,
        trade.take_profit,
    );
}

/// History view: filter first, then order.
pub fn get_trades(
    store: &dyn TradeStore,
    filters: Option<&FilterCriteria>,
    sort: Option<&SortSpec>,
) -> Result<Vec<TradeRecord>> {
    let trades = store.list_trades()?;
    let filtered = match filters {
        Some(criteria) => filter_trades(&trades, criteria),
        None => trades,
    };
    log::debug!("get_trades: {} trades after filtering", filtered.len());
    Ok(sort_trades(&filtered, sort))
}

pub fn get_trade(store: &dyn TradeStore, id: &str) -> Result<TradeRecord> {
    store
        .get_trade(id)?
        .ok_or_else(|| JournalError::NotFound(id.to_string()))
}

pub fn create_trade(store: &dyn TradeStore, input: CreateTradeInput) -> Result<TradeRecord> {
    let now = Utc::now().timestamp();

    let mut trade = TradeRecord {
        id: new_trade_id(),
        pair: input.pair,
        timeframe: input.timeframe,
        trade_type: input.trade_type,
        entry_price: input.entry_price,
        exit_price: input.exit_price,
        stop_loss: input.stop_loss,
        take_profit: input.take_profit,
        entry_date: input.entry_date,
        exit_date: input.exit_date,
        profit_loss: input.profit_loss,
        risk_reward_ratio: 0.0,
        indicators: input.indicators,
        market_sentiment: input.market_sentiment,
        notes: input.notes,
        screenshot_url: input.screenshot_url,
        created_at: now,
        updated_at: now,
    };

    validate_trade(&trade).map_err(JournalError::Validation)?;
    derive_risk_reward(&mut trade);

    store.insert_trade(trade.clone())?;
    log::info!("Created trade {} ({} {})", trade.id, trade.trade_type, trade.pair);

    Ok(trade)
}

pub fn update_trade(
    store: &dyn TradeStore,
    id: &str,
    update: UpdateTradeInput,
) -> Result<TradeRecord> {
    let mut trade = get_trade(store, id)?;
    let setup_changed = update.changes_setup();

    if let Some(pair) = update.pair {
        trade.pair = pair;
    }
    if let Some(timeframe) = update.timeframe {
        trade.timeframe = timeframe;
    }
    if let Some(trade_type) = update.trade_type {
        trade.trade_type = trade_type;
    }
    if let Some(entry_price) = update.entry_price {
        trade.entry_price = entry_price;
    }
    if let Some(exit_price) = update.exit_price {
        trade.exit_price = exit_price;
    }
    if let Some(stop_loss) = update.stop_loss {
        trade.stop_loss = stop_loss;
    }
    if let Some(take_profit) = update.take_profit {
        trade.take_profit = take_profit;
    }
    if let Some(entry_date) = update.entry_date {
        trade.entry_date = entry_date;
    }
    if let Some(exit_date) = update.exit_date {
        trade.exit_date = exit_date;
    }
    if let Some(profit_loss) = update.profit_loss {
        trade.profit_loss = profit_loss;
    }
    if let Some(indicators) = update.indicators {
        trade.indicators = indicators;
    }
    if let Some(market_sentiment) = update.market_sentiment {
        trade.market_sentiment = market_sentiment;
    }
    if let Some(notes) = update.notes {
        trade.notes = notes;
    }
    if let Some(screenshot_url) = update.screenshot_url {
        trade.screenshot_url = screenshot_url;
    }

    validate_trade(&trade).map_err(JournalError::Validation)?;
    if setup_changed {
        derive_risk_reward(&mut trade);
    }
    trade.updated_at = Utc::now().timestamp();

    store.upsert_trade(trade.clone())?;
    log::info!("Updated trade {}", trade.id);

    Ok(trade)
}

pub fn delete_trade(store: &dyn TradeStore, id: &str) -> Result<()> {
    if !store.delete_trade(id)? {
        return Err(JournalError::NotFound(id.to_string()));
    }
    log::info!("Deleted trade {}", id);
    Ok(())
}

/// Copy of the plan with the outcome cleared, entered now.
pub fn duplicate_trade(store: &dyn TradeStore, id: &str) -> Result<TradeRecord> {
    let original = get_trade(store, id)?;
    let now = Utc::now();

    let notes = match original.notes.as_deref() {
        None | Some("") => "(Copy)".to_string(),
        Some(notes) => format!("{} (Copy)", notes),
    };

    let copy = TradeRecord {
        id: new_trade_id(),
        entry_date: now,
        exit_price: None,
        exit_date: None,
        profit_loss: None,
        notes: Some(notes),
        created_at: now.timestamp(),
        updated_at: now.timestamp(),
        ..original
    };

    store.insert_trade(copy.clone())?;
    log::info!("Duplicated trade {} as {}", id, copy.id);

    Ok(copy)
}

pub fn delete_all_trades(store: &dyn TradeStore) -> Result<usize> {
    let count = store.delete_all_trades()?;
    log::info!("Deleted all {} trades", count);
    Ok(count)
}
