use std::collections::HashSet;
use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::trades::create_trade;
use crate::analytics::risk_reward;
use crate::error::{JournalError, Result};
use crate::models::{
    CreateTradeInput, CurrencyPair, Indicators, MarketSentiment, Settings, Timeframe, TradeRecord,
    TradeType, start_of_day, validate_trade,
};
use crate::store::TradeStore;

const BACKUP_VERSION: &str = "1.0.0";

#[derive(Debug, Serialize, Deserialize)]
pub struct BackupData {
    pub version: String,
    pub export_date: String,
    pub settings: Settings,
    pub trades: Vec<TradeRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ImportPreview {
    pub line: usize,
    pub pair: CurrencyPair,
    pub trade_type: TradeType,
    pub entry_price: f64,
    pub entry_date: DateTime<Utc>,
    pub profit_loss: Option<f64>,
    pub risk_reward_ratio: f64,
    pub fingerprint: String,
    pub duplicate: bool,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ImportResult {
    pub imported: usize,
    pub duplicates: usize,
    pub errors: Vec<String>,
}

/// One row of the trade-history CSV. Exported files carry `id` and
/// `risk_reward_ratio` too; both are ignored on import.
#[derive(Debug, Serialize, Deserialize)]
struct CsvTradeRow {
    #[serde(default)]
    id: Option<String>,
    pair: String,
    timeframe: String,
    #[serde(rename = "type")]
    trade_type: String,
    entry_price: f64,
    #[serde(default)]
    exit_price: Option<f64>,
    stop_loss: f64,
    take_profit: f64,
    entry_date: String,
    #[serde(default)]
    exit_date: Option<String>,
    #[serde(default)]
    profit_loss: Option<f64>,
    #[serde(default)]
    risk_reward_ratio: Option<f64>,
    #[serde(default)]
    market_sentiment: Option<String>,
    #[serde(default)]
    notes: Option<String>,
}

impl From<&TradeRecord> for CsvTradeRow {
    fn from(trade: &TradeRecord) -> Self {
        CsvTradeRow {
            id: Some(trade.id.clone()),
            pair: trade.pair.to_string(),
            timeframe: trade.timeframe.to_string(),
            trade_type: trade.trade_type.to_string(),
            entry_price: trade.entry_price,
            exit_price: trade.exit_price,
            stop_loss: trade.stop_loss,
            take_profit: trade.take_profit,
            entry_date: trade.entry_date.to_rfc3339(),
            exit_date: trade.exit_date.map(|d| d.to_rfc3339()),
            profit_loss: trade.profit_loss,
            risk_reward_ratio: Some(trade.risk_reward_ratio),
            market_sentiment: trade.market_sentiment.map(|m| m.to_string()),
            notes: trade.notes.clone(),
        }
    }
}

/// Two ISO codes, optionally separated by '/', '-', '_' or a space.
pub fn pair_pattern() -> std::result::Result<Regex, String> {
    Regex::new(r"^([A-Za-z]{3})\s*[/\-_ ]?\s*([A-Za-z]{3})$").map_err(|e| e.to_string())
}

/// "EURUSD", "eur/usd", "EUR-USD" all become EUR/USD. Unknown symbols
/// are journaled as Other.
pub fn normalize_pair(pair_re: &Regex, raw: &str) -> CurrencyPair {
    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case("other") {
        return CurrencyPair::Other;
    }

    let Some(caps) = pair_re.captures(trimmed) else {
        log::warn!("Unrecognised pair symbol '{}', importing as Other", raw);
        return CurrencyPair::Other;
    };
    let symbol = format!("{}/{}", caps[1].to_uppercase(), caps[2].to_uppercase());

    symbol.parse().unwrap_or_else(|_| {
        log::warn!("Pair {} is not in the journal's list, importing as Other", symbol);
        CurrencyPair::Other
    })
}

/// Accepts RFC 3339, "YYYY-MM-DD HH:MM:SS" (UTC) or a bare date (midnight UTC).
fn parse_datetime(value: &str) -> std::result::Result<DateTime<Utc>, String> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
        return Ok(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(start_of_day(date));
    }
    Err(format!("Invalid date: {}", value))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

fn row_to_input(
    pair_re: &Regex,
    row: CsvTradeRow,
) -> std::result::Result<CreateTradeInput, String> {
    let exit_date = match non_empty(row.exit_date) {
        Some(value) => Some(parse_datetime(&value)?),
        None => None,
    };
    let market_sentiment = match non_empty(row.market_sentiment) {
        Some(value) => Some(value.parse::<MarketSentiment>()?),
        None => None,
    };

    Ok(CreateTradeInput {
        pair: normalize_pair(pair_re, &row.pair),
        timeframe: row.timeframe.parse::<Timeframe>()?,
        trade_type: row.trade_type.parse::<TradeType>()?,
        entry_price: row.entry_price,
        exit_price: row.exit_price,
        stop_loss: row.stop_loss,
        take_profit: row.take_profit,
        entry_date: parse_datetime(&row.entry_date)?,
        exit_date,
        profit_loss: row.profit_loss,
        indicators: Indicators::default(),
        market_sentiment,
        notes: non_empty(row.notes),
        screenshot_url: None,
    })
}

fn generate_fingerprint(
    pair: CurrencyPair,
    trade_type: TradeType,
    entry_date: DateTime<Utc>,
    entry_price: f64,
) -> String {
    format!(
        "csv|{}|{}|{}|{:.5}",
        pair.as_str().to_lowercase(),
        trade_type.as_str().to_lowercase(),
        entry_date.timestamp(),
        entry_price
    )
}

fn trade_fingerprint(trade: &TradeRecord) -> String {
    generate_fingerprint(trade.pair, trade.trade_type, trade.entry_date, trade.entry_price)
}

/// Parsed rows with their 1-based line numbers (header is line 1).
fn parse_csv_rows(
    csv_content: &str,
) -> Result<Vec<(usize, std::result::Result<CreateTradeInput, String>)>> {
    let pair_re = pair_pattern().map_err(JournalError::Parse)?;
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(csv_content.trim_start_matches('\u{feff}').as_bytes());

    let mut rows = Vec::new();
    for (index, record) in reader.deserialize::<CsvTradeRow>().enumerate() {
        let line = index + 2;
        let parsed = match record {
            Ok(row) => row_to_input(&pair_re, row),
            Err(e) => Err(e.to_string()),
        };
        rows.push((line, parsed));
    }
    Ok(rows)
}

fn existing_fingerprints(store: &dyn TradeStore) -> Result<HashSet<String>> {
    Ok(store.list_trades()?.iter().map(trade_fingerprint).collect())
}

pub fn preview_trades_csv(store: &dyn TradeStore, csv_content: &str) -> Result<Vec<ImportPreview>> {
    let known = existing_fingerprints(store)?;
    let mut previews = Vec::new();

    for (line, parsed) in parse_csv_rows(csv_content)? {
        match parsed {
            Ok(input) => {
                let fingerprint = generate_fingerprint(
                    input.pair,
                    input.trade_type,
                    input.entry_date,
                    input.entry_price,
                );
                previews.push(ImportPreview {
                    line,
                    pair: input.pair,
                    trade_type: input.trade_type,
                    entry_price: input.entry_price,
                    entry_date: input.entry_date,
                    profit_loss: input.profit_loss,
                    risk_reward_ratio: risk_reward(
                        input.trade_type,
                        input.entry_price,
                        input.stop_loss,
                        input.take_profit,
                    ),
                    duplicate: known.contains(&fingerprint),
                    fingerprint,
                });
            }
            Err(e) => log::warn!("Skipping CSV line {}: {}", line, e),
        }
    }

    Ok(previews)
}

pub fn import_trades_csv(store: &dyn TradeStore, csv_content: &str) -> Result<ImportResult> {
    let mut known = existing_fingerprints(store)?;
    let mut result = ImportResult::default();

    for (line, parsed) in parse_csv_rows(csv_content)? {
        let input = match parsed {
            Ok(input) => input,
            Err(e) => {
                log::warn!("Skipping CSV line {}: {}", line, e);
                result.errors.push(format!("Line {}: {}", line, e));
                continue;
            }
        };

        let fingerprint =
            generate_fingerprint(input.pair, input.trade_type, input.entry_date, input.entry_price);
        if known.contains(&fingerprint) {
            result.duplicates += 1;
            continue;
        }

        match create_trade(store, input) {
            Ok(_) => {
                known.insert(fingerprint);
                result.imported += 1;
            }
            Err(e) => result.errors.push(format!("Line {}: {}", line, e)),
        }
    }

    log::info!(
        "CSV import: {} imported, {} duplicates, {} errors",
        result.imported,
        result.duplicates,
        result.errors.len()
    );

    Ok(result)
}

pub fn export_trades_csv(store: &dyn TradeStore) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for trade in store.list_trades()? {
        writer.serialize(CsvTradeRow::from(&trade))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| JournalError::Io(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| JournalError::Parse(e.to_string()))
}

/// Export settings and all trades as pretty-printed JSON.
pub fn export_all_data(store: &dyn TradeStore) -> Result<String> {
    let backup = BackupData {
        version: BACKUP_VERSION.to_string(),
        export_date: Utc::now().to_rfc3339(),
        settings: store.get_settings()?,
        trades: store.list_trades()?,
    };

    Ok(serde_json::to_string_pretty(&backup)?)
}

/// Restore a JSON backup. Trades overwrite by id and their ratio is derived
/// again from the setup; returns (settings_updated, trades_imported).
///
/// Nothing is written unless the settings and every trade validate.
pub fn import_all_data(store: &dyn TradeStore, json_data: &str) -> Result<(usize, usize)> {
    let mut backup: BackupData = serde_json::from_str(json_data)?;

    Settings::validate_risk_percent(backup.settings.risk_percent)
        .map_err(JournalError::Validation)?;
    for trade in &mut backup.trades {
        validate_trade(trade)
            .map_err(|e| JournalError::Validation(format!("{}: {}", trade.id, e)))?;
        trade.risk_reward_ratio = risk_reward(
            trade.trade_type,
            trade.entry_price,
            trade.stop_loss,
            trade.take_profit,
        );
    }

    store.save_settings(backup.settings)?;
    let mut imported_trades = 0;
    for trade in backup.trades {
        store.upsert_trade(trade)?;
        imported_trades += 1;
    }

    log::info!("Restored backup v{}: {} trades", backup.version, imported_trades);
    Ok((1, imported_trades))
}

pub fn write_backup(store: &dyn TradeStore, path: &Path) -> Result<()> {
    let json = export_all_data(store)?;
    std::fs::write(path, json)?;
    log::info!("Backup written to {:?}", path);
    Ok(())
}

pub fn read_backup(store: &dyn TradeStore, path: &Path) -> Result<(usize, usize)> {
    let json = std::fs::read_to_string(path)?;
    import_all_data(store, &json)
}
