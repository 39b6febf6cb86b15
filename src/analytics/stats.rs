use std::collections::HashMap;
use std::hash::Hash;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{CurrencyPair, Timeframe, TradeRecord};

pub const RISK_REWARD_BUCKET_LABELS: [&str; 5] = ["<1", "1-1.5", "1.5-2", "2-3", ">3"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairPerformance {
    pub pair: CurrencyPair,
    pub profit_loss: f64,
    pub trade_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeframePerformance {
    pub timeframe: Timeframe,
    pub win_rate: f64,
    pub trade_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CumulativePnlPoint {
    pub trade_id: String,
    pub entry_date: DateTime<Utc>,
    pub cumulative_pnl: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskRewardBucket {
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateStats {
    pub total_trades: usize,
    pub total_profit_loss: f64,
    pub win_rate: f64,
    pub avg_risk_reward: f64,
    pub pair_breakdown: Vec<PairPerformance>,
    pub timeframe_breakdown: Vec<TimeframePerformance>,
    pub cumulative_pnl: Vec<CumulativePnlPoint>,
    pub risk_reward_distribution: Vec<RiskRewardBucket>,

    pub wins: usize,
    pub losses: usize,
    pub breakevens: usize,
    pub open_trades: usize,
    pub gross_profit: f64,
    pub gross_loss: f64,
    pub profit_factor: f64,
    pub best_trade: f64,
    pub worst_trade: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquityCurvePoint {
    pub date: String,
    pub cumulative_pnl: f64,
    pub daily_pnl: f64,
    pub trade_count: i32,
}

/// Dashboard period presets, measured back from `now`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateRange {
    Today,
    Week,
    Month,
    #[serde(rename = "3months")]
    ThreeMonths,
    #[serde(rename = "6months")]
    SixMonths,
    Year,
    #[default]
    All,
}

impl DateRange {
    pub fn threshold(self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            DateRange::Today => Some(crate::models::start_of_day(now.date_naive())),
            DateRange::Week => Some(now - Duration::days(7)),
            DateRange::Month => Some(now - Duration::days(30)),
            DateRange::ThreeMonths => Some(now - Duration::days(90)),
            DateRange::SixMonths => Some(now - Duration::days(180)),
            DateRange::Year => Some(now - Duration::days(365)),
            DateRange::All => None,
        }
    }
}

/// Histogram slot for a ratio. Upper edges are inclusive, so a value sitting
/// exactly on an edge stays in the lower bucket (1.5 is "1-1.5", 3.0 is "2-3").
pub fn risk_reward_bucket(ratio: f64) -> usize {
    if ratio <= 1.0 {
        0
    } else if ratio <= 1.5 {
        1
    } else if ratio <= 2.0 {
        2
    } else if ratio <= 3.0 {
        3
    } else {
        4
    }
}

fn win_rate(wins: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        wins as f64 / total as f64 * 100.0
    }
}

/// Groups in first-appearance order.
fn group_by<K: Copy + Eq + Hash>(
    trades: &[TradeRecord],
    key: impl Fn(&TradeRecord) -> K,
) -> Vec<(K, Vec<&TradeRecord>)> {
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<(K, Vec<&TradeRecord>)> = Vec::new();

    for trade in trades {
        let k = key(trade);
        let slot = *index.entry(k).or_insert_with(|| {
            groups.push((k, Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(trade);
    }

    groups
}

pub fn aggregate(trades: &[TradeRecord]) -> AggregateStats {
    let total = trades.len();
    let pnl = |t: &TradeRecord| t.profit_loss.unwrap_or(0.0);

    let total_profit_loss: f64 = trades.iter().map(pnl).sum();
    let wins = trades.iter().filter(|t| t.is_winner()).count();
    let losses = trades.iter().filter(|t| t.is_loser()).count();
    let open_trades = trades.iter().filter(|t| !t.is_closed()).count();
    let breakevens = total - wins - losses - open_trades;

    let avg_risk_reward = if total == 0 {
        0.0
    } else {
        trades.iter().map(|t| t.risk_reward_ratio).sum::<f64>() / total as f64
    };

    let pair_breakdown = group_by(trades, |t| t.pair)
        .into_iter()
        .map(|(pair, group)| PairPerformance {
            pair,
            profit_loss: group.iter().map(|&t| pnl(t)).sum(),
            trade_count: group.len(),
        })
        .collect();

    let timeframe_breakdown = group_by(trades, |t| t.timeframe)
        .into_iter()
        .map(|(timeframe, group)| TimeframePerformance {
            timeframe,
            win_rate: win_rate(group.iter().filter(|t| t.is_winner()).count(), group.len()),
            trade_count: group.len(),
        })
        .collect();

    // Chronological copy, independent of whatever order the caller sorted by.
    let mut chronological: Vec<&TradeRecord> = trades.iter().collect();
    chronological.sort_by_key(|t| t.entry_date);
    let mut running = 0.0;
    let cumulative_pnl = chronological
        .into_iter()
        .map(|t| {
            running += pnl(t);
            CumulativePnlPoint {
                trade_id: t.id.clone(),
                entry_date: t.entry_date,
                cumulative_pnl: running,
            }
        })
        .collect();

    let mut counts = [0usize; 5];
    for trade in trades {
        counts[risk_reward_bucket(trade.risk_reward_ratio)] += 1;
    }
    let risk_reward_distribution = RISK_REWARD_BUCKET_LABELS
        .iter()
        .zip(counts)
        .map(|(label, count)| RiskRewardBucket {
            label: label.to_string(),
            count,
        })
        .collect();

    let gross_profit: f64 = trades.iter().filter(|t| t.is_winner()).map(pnl).sum();
    let gross_loss: f64 = trades.iter().filter(|t| t.is_loser()).map(pnl).sum::<f64>().abs();
    let profit_factor = if gross_loss > 0.0 {
        gross_profit / gross_loss
    } else if gross_profit > 0.0 {
        f64::INFINITY
    } else {
        0.0
    };

    let closed: Vec<f64> = trades.iter().filter_map(|t| t.profit_loss).collect();
    let best_trade = closed.iter().copied().reduce(f64::max).unwrap_or(0.0);
    let worst_trade = closed.iter().copied().reduce(f64::min).unwrap_or(0.0);

    AggregateStats {
        total_trades: total,
        total_profit_loss,
        win_rate: win_rate(wins, total),
        avg_risk_reward,
        pair_breakdown,
        timeframe_breakdown,
        cumulative_pnl,
        risk_reward_distribution,
        wins,
        losses,
        breakevens,
        open_trades,
        gross_profit,
        gross_loss,
        profit_factor,
        best_trade,
        worst_trade,
    }
}

/// Closed trades bucketed by UTC close day, with a running total.
pub fn daily_equity_curve(trades: &[TradeRecord]) -> Vec<EquityCurvePoint> {
    let mut daily_map: HashMap<String, (f64, i32)> = HashMap::new();

    for trade in trades {
        let Some(pnl) = trade.profit_loss else {
            continue;
        };
        let closed_at = trade.exit_date.unwrap_or(trade.entry_date);
        let date = closed_at.format("%Y-%m-%d").to_string();

        let entry = daily_map.entry(date).or_insert((0.0, 0));
        entry.0 += pnl;
        entry.1 += 1;
    }

    let mut sorted_dates: Vec<_> = daily_map.into_iter().collect();
    sorted_dates.sort_by(|a, b| a.0.cmp(&b.0));

    let mut cumulative_pnl = 0.0;
    let mut result: Vec<EquityCurvePoint> = Vec::new();

    for (date, (daily_pnl, trade_count)) in sorted_dates {
        cumulative_pnl += daily_pnl;
        result.push(EquityCurvePoint {
            date,
            cumulative_pnl,
            daily_pnl,
            trade_count,
        });
    }

    result
}
