use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::trade::{CurrencyPair, Timeframe, TradeRecord, TradeType};

/// Active filters on the trade history. Every set field must match.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub pair: Option<CurrencyPair>,
    #[serde(default)]
    pub timeframe: Option<Timeframe>,
    #[serde(default, rename = "type")]
    pub trade_type: Option<TradeType>,
    #[serde(default)]
    pub date_from: Option<DateTime<Utc>>,
    #[serde(default)]
    pub date_to: Option<DateTime<Utc>>,
    #[serde(default)]
    pub profit_only: bool,
    #[serde(default)]
    pub loss_only: bool,
}

impl FilterCriteria {
    /// Search text, if any non-blank text was entered.
    pub fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.search_term().is_none()
            && self.pair.is_none()
            && self.timeframe.is_none()
            && self.trade_type.is_none()
            && self.date_from.is_none()
            && self.date_to.is_none()
            && !self.profit_only
            && !self.loss_only
    }

    pub fn matches(&self, trade: &TradeRecord) -> bool {
        if let Some(term) = self.search_term() {
            let needle = term.to_lowercase();
            let in_pair = trade.pair.as_str().to_lowercase().contains(&needle);
            let in_notes = trade
                .notes
                .as_deref()
                .is_some_and(|n| n.to_lowercase().contains(&needle));
            if !in_pair && !in_notes {
                return false;
            }
        }

        if self.pair.is_some_and(|p| p != trade.pair) {
            return false;
        }
        if self.timeframe.is_some_and(|t| t != trade.timeframe) {
            return false;
        }
        if self.trade_type.is_some_and(|t| t != trade.trade_type) {
            return false;
        }

        if self.date_from.is_some_and(|from| trade.entry_date < from) {
            return false;
        }
        if self.date_to.is_some_and(|to| trade.entry_date > to) {
            return false;
        }

        // Both flags may be set at once; the result is then the intersection.
        if self.profit_only && !trade.is_winner() {
            return false;
        }
        if self.loss_only && !trade.is_loser() {
            return false;
        }

        true
    }
}

/// Midnight UTC of a calendar date, for date-only filter inputs.
pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(chrono::NaiveTime::MIN).and_utc()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Pair,
    Timeframe,
    #[serde(rename = "type")]
    TradeType,
    EntryPrice,
    ExitPrice,
    StopLoss,
    TakeProfit,
    EntryDate,
    ExitDate,
    ProfitLoss,
    RiskRewardRatio,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    pub fn asc(field: SortField) -> Self {
        Self::new(field, SortDirection::Asc)
    }

    pub fn desc(field: SortField) -> Self {
        Self::new(field, SortDirection::Desc)
    }

    /// Column-header click: the same field flips direction, a new field
    /// starts ascending. Used by the UI; the sorter only reads `direction`.
    pub fn toggled(current: Option<&SortSpec>, field: SortField) -> SortSpec {
        match current {
            Some(spec) if spec.field == field => SortSpec::new(field, spec.direction.reversed()),
            _ => SortSpec::asc(field),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_search_is_inactive() {
        let criteria = FilterCriteria {
            search: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(criteria.is_empty());
        assert!(criteria.search_term().is_none());
    }

    #[test]
    fn test_toggle_rule() {
        let first = SortSpec::toggled(None, SortField::ProfitLoss);
        assert_eq!(first, SortSpec::asc(SortField::ProfitLoss));

        let second = SortSpec::toggled(Some(&first), SortField::ProfitLoss);
        assert_eq!(second, SortSpec::desc(SortField::ProfitLoss));

        let third = SortSpec::toggled(Some(&second), SortField::EntryDate);
        assert_eq!(third, SortSpec::asc(SortField::EntryDate));
    }

    #[test]
    fn test_criteria_deserializes_from_partial_json() {
        let criteria: FilterCriteria =
            serde_json::from_str(r#"{"pair": "GBP/JPY", "profit_only": true}"#).unwrap();
        assert_eq!(criteria.pair, Some(CurrencyPair::GbpJpy));
        assert!(criteria.profit_only);
        assert!(!criteria.loss_only);
    }

    #[test]
    fn test_start_of_day() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 17).unwrap();
        assert_eq!(start_of_day(date).to_rfc3339(), "2024-05-17T00:00:00+00:00");
    }
}
