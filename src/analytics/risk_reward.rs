use crate::models::TradeType;

/// Reward distance over risk distance for a planned trade.
///
/// Returns 0 when the stop sits on the wrong side of the entry (or on it):
/// the setup is degenerate and the caller is expected to warn about it.
/// The result is unrounded; use [`round_for_display`] for presentation.
pub fn risk_reward(
    trade_type: TradeType,
    entry_price: f64,
    stop_loss: f64,
    take_profit: f64,
) -> f64 {
    let (risk, reward) = match trade_type {
        TradeType::Buy => (entry_price - stop_loss, take_profit - entry_price),
        TradeType::Sell => (stop_loss - entry_price, entry_price - take_profit),
    };

    if risk <= 0.0 {
        return 0.0;
    }

    reward / risk
}

pub fn is_degenerate_setup(trade_type: TradeType, entry_price: f64, stop_loss: f64) -> bool {
    match trade_type {
        TradeType::Buy => entry_price - stop_loss <= 0.0,
        TradeType::Sell => stop_loss - entry_price <= 0.0,
    }
}

/// Two decimal places.
pub fn round_for_display(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
