use crate::domain::entities::trade::Trade;
use crate::domain::error::DomainError;
use crate::domain::ports::trade_repository::TradeRepository;
use crate::domain::values::trade_status::TradeStatus;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::Read;
use std::sync::Arc;

const REQUIRED_COLUMNS: [&str; 8] = [
    "account_id",
    "symbol",
    "trade_type",
    "contracts",
    "strike_price",
    "premium_per_share",
    "open_date",
    "expiration_date",
];

/// Result of a CSV import or a confirm call.
///
/// `imported_count` counts rows that passed the in-transaction checks
/// during the scan. When `committed` is false those rows were rolled
/// back and nothing persisted, even though the count is non-zero; the
/// distinction is deliberate and callers must honor it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportOutcome {
    pub message: String,
    pub imported_count: usize,
    pub total_attempted: usize,
    pub parse_errors: Vec<String>,
    pub transaction_errors: Vec<String>,
    pub committed: bool,
}

/// One row of a dry-run preview.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowPreview {
    pub line_num: usize,
    pub trade: Trade,
    pub profit_loss: Option<f64>,
    pub missing_fields: Vec<String>,
    pub is_valid: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportPreview {
    pub total_records: usize,
    pub parse_errors: Vec<String>,
    pub results: Vec<RowPreview>,
}

/// Name-to-position map over the header row, built once per file so
/// field lookups tolerate column reordering without per-row scans.
struct ColumnIndex {
    by_name: HashMap<String, usize>,
}

impl ColumnIndex {
    fn new(headers: &csv::StringRecord) -> Self {
        let by_name = headers
            .iter()
            .enumerate()
            .map(|(i, name)| (name.to_string(), i))
            .collect();
        Self { by_name }
    }

    fn has(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    fn field<'r>(&self, record: &'r csv::StringRecord, name: &str) -> Option<&'r str> {
        self.by_name.get(name).and_then(|&i| record.get(i))
    }

    /// Optional fields: present and non-empty, or nothing.
    fn optional<'r>(&self, record: &'r csv::StringRecord, name: &str) -> Option<&'r str> {
        self.field(record, name).filter(|v| !v.is_empty())
    }
}

fn parse_record(
    columns: &ColumnIndex,
    record: &csv::StringRecord,
    now: DateTime<Utc>,
) -> Result<Trade, String> {
    let account_id = match columns.field(record, "account_id") {
        Some(v) => v
            .parse::<i64>()
            .map_err(|e| format!("invalid account_id: {e}"))?,
        None => return Err("account_id column not found".to_string()),
    };

    let symbol = match columns.field(record, "symbol") {
        Some("") => return Err("symbol cannot be empty".to_string()),
        Some(v) => v.to_string(),
        None => return Err("symbol column not found".to_string()),
    };

    let trade_type = match columns.field(record, "trade_type") {
        Some("") => return Err("trade_type cannot be empty".to_string()),
        Some(v) => v.parse().map_err(|e| format!("invalid trade_type: {e}"))?,
        None => return Err("trade_type column not found".to_string()),
    };

    let contracts = match columns.field(record, "contracts") {
        Some(v) => v
            .parse::<i64>()
            .map_err(|e| format!("invalid contracts: {e}"))?,
        None => return Err("contracts column not found".to_string()),
    };

    let strike_price = match columns.field(record, "strike_price") {
        Some(v) => v
            .parse::<f64>()
            .map_err(|e| format!("invalid strike_price: {e}"))?,
        None => return Err("strike_price column not found".to_string()),
    };

    let premium_per_share = match columns.field(record, "premium_per_share") {
        Some(v) => v
            .parse::<f64>()
            .map_err(|e| format!("invalid premium_per_share: {e}"))?,
        None => return Err("premium_per_share column not found".to_string()),
    };

    let open_date = match columns.field(record, "open_date") {
        Some("") => return Err("open_date cannot be empty".to_string()),
        Some(v) => NaiveDate::parse_from_str(v, "%Y-%m-%d")
            .map_err(|e| format!("invalid open_date: {e}"))?,
        None => return Err("open_date column not found".to_string()),
    };

    let expiration_date = match columns.field(record, "expiration_date") {
        Some("") => return Err("expiration_date cannot be empty".to_string()),
        Some(v) => NaiveDate::parse_from_str(v, "%Y-%m-%d")
            .map_err(|e| format!("invalid expiration_date: {e}"))?,
        None => return Err("expiration_date column not found".to_string()),
    };

    // Enrichment fields are best-effort: present-but-unparsable values
    // are dropped rather than failing the row.
    let close_date = columns
        .optional(record, "close_date")
        .and_then(|v| NaiveDate::parse_from_str(v, "%Y-%m-%d").ok());
    let close_method = columns
        .optional(record, "close_method")
        .and_then(|v| v.parse().ok());
    let close_price = columns
        .optional(record, "close_price")
        .and_then(|v| v.parse::<f64>().ok());
    let fees = columns
        .optional(record, "fees")
        .and_then(|v| v.parse::<f64>().ok())
        .unwrap_or(0.0);
    let tags = columns.optional(record, "tags").map(String::from);
    let notes = columns.optional(record, "notes").map(String::from);

    Ok(Trade {
        trade_id: None,
        account_id,
        symbol,
        trade_type,
        contracts,
        strike_price,
        premium_per_share,
        open_date,
        expiration_date,
        close_date,
        close_method,
        close_price,
        fees,
        status: TradeStatus::Open,
        tags,
        notes,
        wheel_id: None,
        created_at: now,
        updated_at: now,
    })
}

pub struct ImportUseCase {
    trades: Arc<dyn TradeRepository>,
}

impl ImportUseCase {
    pub fn new(trades: Arc<dyn TradeRepository>) -> Self {
        Self { trades }
    }

    pub fn import_csv<R: Read>(&self, input: R) -> Result<ImportOutcome, DomainError> {
        self.import_csv_as_of(input, Utc::now().date_naive())
    }

    /// Import with an explicit processing date, which decides whether
    /// rows without closing data derive as OPEN or EXPIRED.
    pub fn import_csv_as_of<R: Read>(
        &self,
        input: R,
        today: NaiveDate,
    ) -> Result<ImportOutcome, DomainError> {
        let (trades, parse_errors) = self.parse_rows(input, today)?;

        if trades.is_empty() {
            return Ok(ImportOutcome {
                message: "No valid trades found in CSV".to_string(),
                imported_count: 0,
                total_attempted: 0,
                parse_errors,
                transaction_errors: Vec::new(),
                committed: false,
            });
        }

        let mut outcome = self.persist(trades)?;
        outcome.parse_errors = parse_errors;
        Ok(outcome)
    }

    /// Dry run: parse and derive every row without persisting anything,
    /// so a caller can review before committing via `confirm`.
    pub fn preview_csv<R: Read>(&self, input: R) -> Result<ImportPreview, DomainError> {
        self.preview_csv_as_of(input, Utc::now().date_naive())
    }

    pub fn preview_csv_as_of<R: Read>(
        &self,
        input: R,
        today: NaiveDate,
    ) -> Result<ImportPreview, DomainError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(input);
        let columns = Self::check_headers(&mut reader)?;

        let mut results = Vec::new();
        let mut parse_errors = Vec::new();
        let now = Utc::now();

        for (i, record) in reader.records().enumerate() {
            let line_num = i + 2;
            let record = match record {
                Ok(r) => r,
                Err(e) => {
                    parse_errors.push(format!("Line {line_num}: {e}"));
                    continue;
                }
            };
            let mut trade = match parse_record(&columns, &record, now) {
                Ok(t) => t,
                Err(e) => {
                    parse_errors.push(format!("Line {line_num}: {e}"));
                    continue;
                }
            };

            trade.derive_status(today);
            let profit_loss = trade.estimated_profit_loss();
            let missing_fields = trade.missing_close_fields();
            let is_valid = missing_fields.is_empty();

            results.push(RowPreview {
                line_num,
                trade,
                profit_loss,
                missing_fields,
                is_valid,
            });
        }

        Ok(ImportPreview {
            total_records: results.len(),
            parse_errors,
            results,
        })
    }

    /// Persist trades a caller has already reviewed (typically preview
    /// output), bypassing file parsing.
    pub fn confirm(&self, trades: Vec<Trade>) -> Result<ImportOutcome, DomainError> {
        if trades.is_empty() {
            return Err(DomainError::InvalidInput("No trades provided".into()));
        }
        self.persist(trades)
    }

    fn check_headers<R: Read>(
        reader: &mut csv::Reader<R>,
    ) -> Result<ColumnIndex, DomainError> {
        let headers = reader
            .headers()
            .map_err(|e| DomainError::InvalidInput(format!("Failed to read CSV headers: {e}")))?;
        let columns = ColumnIndex::new(headers);
        if !REQUIRED_COLUMNS.iter().all(|c| columns.has(c)) {
            return Err(DomainError::InvalidInput(format!(
                "CSV headers mismatch. Required: {REQUIRED_COLUMNS:?}"
            )));
        }
        Ok(columns)
    }

    fn parse_rows<R: Read>(
        &self,
        input: R,
        today: NaiveDate,
    ) -> Result<(Vec<Trade>, Vec<String>), DomainError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(input);
        let columns = Self::check_headers(&mut reader)?;

        let mut trades = Vec::new();
        let mut parse_errors = Vec::new();
        let now = Utc::now();

        for (i, record) in reader.records().enumerate() {
            let line_num = i + 2;
            let record = match record {
                Ok(r) => r,
                Err(e) => {
                    parse_errors.push(format!("Line {line_num}: {e}"));
                    continue;
                }
            };
            let mut trade = match parse_record(&columns, &record, now) {
                Ok(t) => t,
                Err(e) => {
                    parse_errors.push(format!("Line {line_num}: {e}"));
                    continue;
                }
            };

            trade.derive_status(today);
            if let Err(e) = trade.validate() {
                parse_errors.push(format!("Line {line_num}: {e}"));
                continue;
            }
            trades.push(trade);
        }

        Ok((trades, parse_errors))
    }

    fn persist(&self, trades: Vec<Trade>) -> Result<ImportOutcome, DomainError> {
        let total_attempted = trades.len();
        let batch = self.trades.save_batch(&trades)?;
        let committed = batch.committed();
        let message = if committed {
            "Trades imported successfully".to_string()
        } else {
            "transaction rolled back due to errors".to_string()
        };

        Ok(ImportOutcome {
            message,
            imported_count: batch.imported_count,
            total_attempted,
            parse_errors: Vec::new(),
            transaction_errors: batch.errors,
            committed,
        })
    }
}
