use chrono::{DateTime, Duration, Utc};

use crate::analytics::risk_reward;
use crate::models::{CurrencyPair, Indicators, Timeframe, TradeRecord, TradeType};

pub fn base_time() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2024-01-15T12:00:00Z")
        .unwrap()
        .with_timezone(&Utc)
}

/// A closed EUR/USD H1 buy, `day` days after the base time.
pub fn make_trade(id: &str, day: i64, profit_loss: Option<f64>) -> TradeRecord {
    TradeRecord {
        id: id.to_string(),
        pair: CurrencyPair::EurUsd,
        timeframe: Timeframe::H1,
        trade_type: TradeType::Buy,
        entry_price: 1.1000,
        exit_price: profit_loss.map(|_| 1.1050),
        stop_loss: 1.0950,
        take_profit: 1.1100,
        entry_date: base_time() + Duration::days(day),
        exit_date: profit_loss.map(|_| base_time() + Duration::days(day) + Duration::hours(6)),
        profit_loss,
        risk_reward_ratio: risk_reward(TradeType::Buy, 1.1000, 1.0950, 1.1100),
        indicators: Indicators::default(),
        market_sentiment: None,
        notes: None,
        screenshot_url: None,
        created_at: 0,
        updated_at: 0,
    }
}

pub fn ids(trades: &[TradeRecord]) -> Vec<&str> {
    trades.iter().map(|t| t.id.as_str()).collect()
}

/// Route `log` output through the test harness. Safe to call repeatedly.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
