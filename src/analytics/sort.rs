use std::cmp::Ordering;

use chrono::{DateTime, Utc};

use crate::models::{SortDirection, SortField, SortSpec, TradeRecord};

enum SortKey<'a> {
    Number(Option<f64>),
    Date(Option<DateTime<Utc>>),
    Text(&'a str),
}

fn sort_key(trade: &TradeRecord, field: SortField) -> SortKey<'_> {
    match field {
        SortField::Pair => SortKey::Text(trade.pair.as_str()),
        SortField::Timeframe => SortKey::Text(trade.timeframe.as_str()),
        SortField::TradeType => SortKey::Text(trade.trade_type.as_str()),
        SortField::EntryPrice => SortKey::Number(Some(trade.entry_price)),
        SortField::ExitPrice => SortKey::Number(trade.exit_price),
        SortField::StopLoss => SortKey::Number(Some(trade.stop_loss)),
        SortField::TakeProfit => SortKey::Number(Some(trade.take_profit)),
        SortField::EntryDate => SortKey::Date(Some(trade.entry_date)),
        SortField::ExitDate => SortKey::Date(trade.exit_date),
        SortField::ProfitLoss => SortKey::Number(trade.profit_loss),
        SortField::RiskRewardRatio => SortKey::Number(Some(trade.risk_reward_ratio)),
    }
}

/// Absent values go last whatever the direction; only present values are
/// subject to `direction`.
fn compare_optional<T>(
    a: Option<T>,
    b: Option<T>,
    direction: SortDirection,
    cmp: impl Fn(&T, &T) -> Ordering,
) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => match direction {
            SortDirection::Asc => cmp(&a, &b),
            SortDirection::Desc => cmp(&b, &a),
        },
    }
}

fn compare(a: &TradeRecord, b: &TradeRecord, spec: &SortSpec) -> Ordering {
    match (sort_key(a, spec.field), sort_key(b, spec.field)) {
        (SortKey::Number(x), SortKey::Number(y)) => {
            compare_optional(x, y, spec.direction, f64::total_cmp)
        }
        (SortKey::Date(x), SortKey::Date(y)) => compare_optional(x, y, spec.direction, Ord::cmp),
        (SortKey::Text(x), SortKey::Text(y)) => {
            compare_optional(Some(x), Some(y), spec.direction, Ord::cmp)
        }
        // Keys for one field always share a variant.
        _ => Ordering::Equal,
    }
}

/// Stable sort of a copy of `trades`. Without a `SortSpec` the input order is kept.
pub fn sort_trades(trades: &[TradeRecord], spec: Option<&SortSpec>) -> Vec<TradeRecord> {
    let mut sorted = trades.to_vec();
    if let Some(spec) = spec {
        sorted.sort_by(|a, b| compare(a, b, spec));
    }
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CurrencyPair;
    use crate::test_helpers::{ids, make_trade};

    fn journal() -> Vec<TradeRecord> {
        let mut a = make_trade("a", 2, Some(50.0));
        a.pair = CurrencyPair::GbpUsd;
        let b = make_trade("b", 0, None);
        let mut c = make_trade("c", 1, Some(-20.0));
        c.pair = CurrencyPair::AudUsd;
        let d = make_trade("d", 3, Some(50.0));
        let e = make_trade("e", 4, Some(200.0));
        vec![a, b, c, d, e]
    }

    #[test]
    fn test_unsorted_keeps_input_order() {
        let trades = journal();
        assert_eq!(sort_trades(&trades, None), trades);
    }

    #[test]
    fn test_numeric_ascending_with_nulls_last() {
        let trades = journal();
        let out = sort_trades(&trades, Some(&SortSpec::asc(SortField::ProfitLoss)));
        assert_eq!(ids(&out), vec!["c", "a", "d", "e", "b"]);
    }

    #[test]
    fn test_numeric_descending_keeps_nulls_last() {
        let trades = journal();
        let out = sort_trades(&trades, Some(&SortSpec::desc(SortField::ProfitLoss)));
        // a and d tie at 50.0 and keep their input order.
        assert_eq!(ids(&out), vec!["e", "a", "d", "c", "b"]);
    }

    #[test]
    fn test_toggling_reverses_non_null_records() {
        let trades: Vec<TradeRecord> = journal().into_iter().filter(|t| t.id != "d").collect();
        let asc = sort_trades(&trades, Some(&SortSpec::asc(SortField::ProfitLoss)));
        let desc = sort_trades(&trades, Some(&SortSpec::desc(SortField::ProfitLoss)));

        let mut asc_present: Vec<&str> = asc
            .iter()
            .filter(|t| t.profit_loss.is_some())
            .map(|t| t.id.as_str())
            .collect();
        let desc_present: Vec<&str> = desc
            .iter()
            .filter(|t| t.profit_loss.is_some())
            .map(|t| t.id.as_str())
            .collect();
        asc_present.reverse();
        assert_eq!(asc_present, desc_present);

        assert_eq!(asc.last().map(|t| t.id.as_str()), Some("b"));
        assert_eq!(desc.last().map(|t| t.id.as_str()), Some("b"));
    }

    #[test]
    fn test_dates_sort_chronologically() {
        let trades = journal();
        let out = sort_trades(&trades, Some(&SortSpec::asc(SortField::EntryDate)));
        assert_eq!(ids(&out), vec!["b", "c", "a", "d", "e"]);

        let out = sort_trades(&trades, Some(&SortSpec::desc(SortField::ExitDate)));
        assert_eq!(ids(&out), vec!["e", "d", "a", "c", "b"]);
    }

    #[test]
    fn test_pairs_sort_lexicographically_and_stably() {
        let trades = journal();
        let out = sort_trades(&trades, Some(&SortSpec::asc(SortField::Pair)));
        // AUD/USD < EUR/USD (b, d, e in input order) < GBP/USD
        assert_eq!(ids(&out), vec!["c", "b", "d", "e", "a"]);
    }

    #[test]
    fn test_input_is_not_reordered() {
        let trades = journal();
        let before = trades.clone();
        let _ = sort_trades(&trades, Some(&SortSpec::desc(SortField::EntryDate)));
        assert_eq!(trades, before);
    }
}
