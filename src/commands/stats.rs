use chrono::{DateTime, Utc};

use crate::analytics::{
    AggregateStats, DateRange, EquityCurvePoint, aggregate, daily_equity_curve, filter_trades,
};
use crate::error::Result;
use crate::models::{FilterCriteria, TradeRecord};
use crate::store::TradeStore;

fn trades_in_range(
    store: &dyn TradeStore,
    filters: Option<&FilterCriteria>,
    date_range: DateRange,
    now: DateTime<Utc>,
) -> Result<Vec<TradeRecord>> {
    let mut criteria = filters.cloned().unwrap_or_default();

    // The preset narrows, never widens, an explicit lower bound.
    if let Some(threshold) = date_range.threshold(now) {
        criteria.date_from = Some(match criteria.date_from {
            Some(from) if from > threshold => from,
            _ => threshold,
        });
    }

    let trades = store.list_trades()?;
    Ok(filter_trades(&trades, &criteria))
}

/// Aggregates over the same filtered set the history view shows.
pub fn get_dashboard_stats(
    store: &dyn TradeStore,
    filters: Option<&FilterCriteria>,
    date_range: DateRange,
    now: DateTime<Utc>,
) -> Result<AggregateStats> {
    let trades = trades_in_range(store, filters, date_range, now)?;
    let stats = aggregate(&trades);
    log::debug!(
        "Dashboard stats over {} trades: P/L {:.2}, win rate {:.1}%",
        stats.total_trades,
        stats.total_profit_loss,
        stats.win_rate
    );
    Ok(stats)
}

pub fn get_equity_curve(
    store: &dyn TradeStore,
    date_range: DateRange,
    now: DateTime<Utc>,
) -> Result<Vec<EquityCurvePoint>> {
    let trades = trades_in_range(store, None, date_range, now)?;
    Ok(daily_equity_curve(&trades))
}
