use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Instruments the journal knows about. Anything else is logged as `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CurrencyPair {
    #[serde(rename = "EUR/USD")]
    EurUsd,
    #[serde(rename = "GBP/USD")]
    GbpUsd,
    #[serde(rename = "USD/JPY")]
    UsdJpy,
    #[serde(rename = "USD/CHF")]
    UsdChf,
    #[serde(rename = "AUD/USD")]
    AudUsd,
    #[serde(rename = "USD/CAD")]
    UsdCad,
    #[serde(rename = "NZD/USD")]
    NzdUsd,
    #[serde(rename = "EUR/GBP")]
    EurGbp,
    #[serde(rename = "EUR/JPY")]
    EurJpy,
    #[serde(rename = "GBP/JPY")]
    GbpJpy,
    #[serde(rename = "AUD/JPY")]
    AudJpy,
    #[serde(rename = "EUR/AUD")]
    EurAud,
    #[serde(rename = "EUR/CHF")]
    EurChf,
    #[serde(rename = "XAU/USD")]
    XauUsd,
    #[serde(rename = "XAG/USD")]
    XagUsd,
    Other,
}

impl CurrencyPair {
    pub const ALL: [CurrencyPair; 16] = [
        CurrencyPair::EurUsd,
        CurrencyPair::GbpUsd,
        CurrencyPair::UsdJpy,
        CurrencyPair::UsdChf,
        CurrencyPair::AudUsd,
        CurrencyPair::UsdCad,
        CurrencyPair::NzdUsd,
        CurrencyPair::EurGbp,
        CurrencyPair::EurJpy,
        CurrencyPair::GbpJpy,
        CurrencyPair::AudJpy,
        CurrencyPair::EurAud,
        CurrencyPair::EurChf,
        CurrencyPair::XauUsd,
        CurrencyPair::XagUsd,
        CurrencyPair::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CurrencyPair::EurUsd => "EUR/USD",
            CurrencyPair::GbpUsd => "GBP/USD",
            CurrencyPair::UsdJpy => "USD/JPY",
            CurrencyPair::UsdChf => "USD/CHF",
            CurrencyPair::AudUsd => "AUD/USD",
            CurrencyPair::UsdCad => "USD/CAD",
            CurrencyPair::NzdUsd => "NZD/USD",
            CurrencyPair::EurGbp => "EUR/GBP",
            CurrencyPair::EurJpy => "EUR/JPY",
            CurrencyPair::GbpJpy => "GBP/JPY",
            CurrencyPair::AudJpy => "AUD/JPY",
            CurrencyPair::EurAud => "EUR/AUD",
            CurrencyPair::EurChf => "EUR/CHF",
            CurrencyPair::XauUsd => "XAU/USD",
            CurrencyPair::XagUsd => "XAG/USD",
            CurrencyPair::Other => "Other",
        }
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CurrencyPair {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CurrencyPair::ALL
            .iter()
            .copied()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown currency pair: {}", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    M5,
    M15,
    M30,
    H1,
    H4,
    D1,
    W1,
    MN,
}

impl Timeframe {
    pub const ALL: [Timeframe; 8] = [
        Timeframe::M5,
        Timeframe::M15,
        Timeframe::M30,
        Timeframe::H1,
        Timeframe::H4,
        Timeframe::D1,
        Timeframe::W1,
        Timeframe::MN,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Timeframe::M5 => "M5",
            Timeframe::M15 => "M15",
            Timeframe::M30 => "M30",
            Timeframe::H1 => "H1",
            Timeframe::H4 => "H4",
            Timeframe::D1 => "D1",
            Timeframe::W1 => "W1",
            Timeframe::MN => "MN",
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Timeframe {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Timeframe::ALL
            .iter()
            .copied()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown timeframe: {}", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TradeType {
    Buy,
    Sell,
}

impl TradeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeType::Buy => "Buy",
            TradeType::Sell => "Sell",
        }
    }
}

impl fmt::Display for TradeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TradeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "buy" | "long" => Ok(TradeType::Buy),
            "sell" | "short" => Ok(TradeType::Sell),
            _ => Err(format!("Unknown trade type: {}", s)),
        }
    }
}

/// Self-reported directional bias at entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarketSentiment {
    #[serde(rename = "Strong Bullish")]
    StrongBullish,
    #[serde(rename = "Moderate Bullish")]
    ModerateBullish,
    Neutral,
    #[serde(rename = "Moderate Bearish")]
    ModerateBearish,
    #[serde(rename = "Strong Bearish")]
    StrongBearish,
}

impl MarketSentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            MarketSentiment::StrongBullish => "Strong Bullish",
            MarketSentiment::ModerateBullish => "Moderate Bullish",
            MarketSentiment::Neutral => "Neutral",
            MarketSentiment::ModerateBearish => "Moderate Bearish",
            MarketSentiment::StrongBearish => "Strong Bearish",
        }
    }
}

impl fmt::Display for MarketSentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MarketSentiment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [
            MarketSentiment::StrongBullish,
            MarketSentiment::ModerateBullish,
            MarketSentiment::Neutral,
            MarketSentiment::ModerateBearish,
            MarketSentiment::StrongBearish,
        ]
        .into_iter()
        .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
        .ok_or_else(|| format!("Unknown market sentiment: {}", s))
    }
}

/// Indicator readings captured at entry. All optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Indicators {
    #[serde(default)]
    pub bb_upper: Option<f64>,
    #[serde(default)]
    pub bb_middle: Option<f64>,
    #[serde(default)]
    pub bb_lower: Option<f64>,
    #[serde(default)]
    pub macd_line: Option<f64>,
    #[serde(default)]
    pub macd_signal: Option<f64>,
    #[serde(default)]
    pub macd_histogram: Option<f64>,
    #[serde(default)]
    pub stochastic_k: Option<f64>,
    #[serde(default)]
    pub stochastic_d: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    pub id: String,
    pub pair: CurrencyPair,
    pub timeframe: Timeframe,
    #[serde(rename = "type")]
    pub trade_type: TradeType,

    pub entry_price: f64,
    #[serde(default)]
    pub exit_price: Option<f64>,
    pub stop_loss: f64,
    pub take_profit: f64,

    pub entry_date: DateTime<Utc>,
    #[serde(default)]
    pub exit_date: Option<DateTime<Utc>>,

    #[serde(default)]
    pub profit_loss: Option<f64>,
    pub risk_reward_ratio: f64, // derived, see analytics::risk_reward

    #[serde(flatten)]
    pub indicators: Indicators,
    #[serde(default)]
    pub market_sentiment: Option<MarketSentiment>,

    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub screenshot_url: Option<String>,

    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

impl TradeRecord {
    pub fn is_winner(&self) -> bool {
        self.profit_loss.is_some_and(|pl| pl > 0.0)
    }

    pub fn is_loser(&self) -> bool {
        self.profit_loss.is_some_and(|pl| pl < 0.0)
    }

    pub fn is_closed(&self) -> bool {
        self.profit_loss.is_some()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTradeInput {
    pub pair: CurrencyPair,
    pub timeframe: Timeframe,
    #[serde(rename = "type")]
    pub trade_type: TradeType,

    pub entry_price: f64,
    #[serde(default)]
    pub exit_price: Option<f64>,
    pub stop_loss: f64,
    pub take_profit: f64,

    pub entry_date: DateTime<Utc>,
    #[serde(default)]
    pub exit_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub profit_loss: Option<f64>,

    #[serde(flatten)]
    pub indicators: Indicators,
    #[serde(default)]
    pub market_sentiment: Option<MarketSentiment>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub screenshot_url: Option<String>,
}

/// Partial update. `None` leaves the stored value untouched; the nested
/// options on exit fields allow clearing them (`Some(None)`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTradeInput {
    pub pair: Option<CurrencyPair>,
    pub timeframe: Option<Timeframe>,
    #[serde(rename = "type")]
    pub trade_type: Option<TradeType>,
    pub entry_price: Option<f64>,
    pub exit_price: Option<Option<f64>>,
    pub stop_loss: Option<f64>,
    pub take_profit: Option<f64>,
    pub entry_date: Option<DateTime<Utc>>,
    pub exit_date: Option<Option<DateTime<Utc>>>,
    pub profit_loss: Option<Option<f64>>,
    pub indicators: Option<Indicators>,
    pub market_sentiment: Option<Option<MarketSentiment>>,
    pub notes: Option<Option<String>>,
    pub screenshot_url: Option<Option<String>>,
}

impl UpdateTradeInput {
    /// True when the update touches an input of the risk:reward formula.
    pub fn changes_setup(&self) -> bool {
        self.trade_type.is_some()
            || self.entry_price.is_some()
            || self.stop_loss.is_some()
            || self.take_profit.is_some()
    }
}

/// Check the data-entry constraints on a record.
pub fn validate_trade(trade: &TradeRecord) -> Result<(), String> {
    let positive = [
        ("entry_price", Some(trade.entry_price)),
        ("stop_loss", Some(trade.stop_loss)),
        ("take_profit", Some(trade.take_profit)),
        ("exit_price", trade.exit_price),
    ];
    for (name, value) in positive {
        if let Some(v) = value {
            if !v.is_finite() || v <= 0.0 {
                return Err(format!("{} must be greater than 0, got {}", name, v));
            }
        }
    }

    let target_behind_entry = match trade.trade_type {
        TradeType::Buy => trade.take_profit < trade.entry_price,
        TradeType::Sell => trade.take_profit > trade.entry_price,
    };
    if target_behind_entry {
        return Err(format!(
            "take_profit {} is on the wrong side of entry {} for a {}",
            trade.take_profit, trade.entry_price, trade.trade_type
        ));
    }

    if let Some(exit_date) = trade.exit_date {
        if exit_date < trade.entry_date {
            return Err("exit_date must not be before entry_date".to_string());
        }
    }

    let stochastic = [
        ("stochastic_k", trade.indicators.stochastic_k),
        ("stochastic_d", trade.indicators.stochastic_d),
    ];
    for (name, value) in stochastic {
        if let Some(v) = value {
            if !(0.0..=100.0).contains(&v) {
                return Err(format!("{} must be within [0, 100], got {}", name, v));
            }
        }
    }

    Ok(())
}
