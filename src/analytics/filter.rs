use crate::models::{FilterCriteria, TradeRecord};

/// Records satisfying every active criterion, in input order.
/// Empty criteria yield a full copy of the input.
pub fn filter_trades(trades: &[TradeRecord], criteria: &FilterCriteria) -> Vec<TradeRecord> {
    if criteria.is_empty() {
        return trades.to_vec();
    }

    trades
        .iter()
        .filter(|t| criteria.matches(t))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CurrencyPair, Timeframe, TradeType, start_of_day};
    use crate::test_helpers::{base_time, ids, make_trade};
    use chrono::Duration;

    fn journal() -> Vec<TradeRecord> {
        let mut a = make_trade("a", 0, Some(120.0));
        a.notes = Some("London breakout, clean retest".to_string());

        let mut b = make_trade("b", 1, Some(-40.0));
        b.pair = CurrencyPair::GbpJpy;
        b.timeframe = Timeframe::H4;
        b.trade_type = TradeType::Sell;

        let mut c = make_trade("c", 2, None);
        c.pair = CurrencyPair::XauUsd;
        c.notes = Some("Gold news spike".to_string());

        let mut d = make_trade("d", 3, Some(0.0));
        d.timeframe = Timeframe::D1;

        vec![a, b, c, d]
    }

    #[test]
    fn test_empty_criteria_returns_everything_in_order() {
        let trades = journal();
        let out = filter_trades(&trades, &FilterCriteria::default());
        assert_eq!(out, trades);
    }

    #[test]
    fn test_search_matches_pair_or_notes_case_insensitive() {
        let trades = journal();

        let by_pair = FilterCriteria {
            search: Some("gbp".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(&filter_trades(&trades, &by_pair)), vec!["b"]);

        let by_notes = FilterCriteria {
            search: Some("BREAKOUT".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(&filter_trades(&trades, &by_notes)), vec!["a"]);

        // "usd" hits EUR/USD and XAU/USD pairs; trade b has no notes and a JPY pair.
        let shared = FilterCriteria {
            search: Some("usd".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(&filter_trades(&trades, &shared)), vec!["a", "c", "d"]);
    }

    #[test]
    fn test_exact_matches_are_anded() {
        let trades = journal();
        let criteria = FilterCriteria {
            pair: Some(CurrencyPair::EurUsd),
            timeframe: Some(Timeframe::D1),
            ..Default::default()
        };
        assert_eq!(ids(&filter_trades(&trades, &criteria)), vec!["d"]);

        let criteria = FilterCriteria {
            trade_type: Some(TradeType::Sell),
            pair: Some(CurrencyPair::EurUsd),
            ..Default::default()
        };
        assert!(filter_trades(&trades, &criteria).is_empty());
    }

    #[test]
    fn test_date_bounds_are_inclusive_on_full_timestamp() {
        let trades = journal();
        let criteria = FilterCriteria {
            date_from: Some(base_time() + Duration::days(1)),
            date_to: Some(base_time() + Duration::days(2)),
            ..Default::default()
        };
        assert_eq!(ids(&filter_trades(&trades, &criteria)), vec!["b", "c"]);

        // A date-only upper bound is midnight, so a trade later that day is excluded.
        let day_of_c = (base_time() + Duration::days(2)).date_naive();
        let criteria = FilterCriteria {
            date_to: Some(start_of_day(day_of_c)),
            ..Default::default()
        };
        assert_eq!(ids(&filter_trades(&trades, &criteria)), vec!["a", "b"]);
    }

    #[test]
    fn test_profit_only_has_no_false_positives() {
        let trades = journal();
        let criteria = FilterCriteria {
            profit_only: true,
            ..Default::default()
        };
        let out = filter_trades(&trades, &criteria);
        assert_eq!(ids(&out), vec!["a"]);
        assert!(out.iter().all(|t| t.profit_loss.is_some_and(|pl| pl > 0.0)));
    }

    #[test]
    fn test_loss_only_excludes_open_and_breakeven() {
        let trades = journal();
        let criteria = FilterCriteria {
            loss_only: true,
            ..Default::default()
        };
        assert_eq!(ids(&filter_trades(&trades, &criteria)), vec!["b"]);
    }

    #[test]
    fn test_profit_and_loss_flags_together_intersect() {
        let trades = journal();
        let criteria = FilterCriteria {
            profit_only: true,
            loss_only: true,
            ..Default::default()
        };
        assert!(filter_trades(&trades, &criteria).is_empty());
    }

    #[test]
    fn test_input_is_not_mutated() {
        let trades = journal();
        let before = trades.clone();
        let criteria = FilterCriteria {
            pair: Some(CurrencyPair::GbpJpy),
            ..Default::default()
        };
        let _ = filter_trades(&trades, &criteria);
        assert_eq!(trades, before);
    }
}
