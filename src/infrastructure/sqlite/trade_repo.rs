use crate::domain::entities::trade::{CloseTrade, Trade, TradeUpdate};
use crate::domain::error::DomainError;
use crate::domain::ports::trade_repository::{
    BatchOutcome, DashboardStats, SymbolPerformance, TradeFilter, TradeRepository, TradeSummary,
};
use crate::domain::values::trade_status::TradeStatus;
use crate::domain::values::trade_type::TradeType;
use crate::infrastructure::sqlite::{parse_date, parse_opt_date, parse_timestamp, SharedConnection};
use chrono::Utc;
use rusqlite::params;

const SELECT_COLS: &str = "trade_id, account_id, symbol, trade_type, contracts, strike_price, premium_per_share, open_date, expiration_date, close_date, close_method, close_price, fees, status, tags, notes, wheel_id, created_at, updated_at";

const INSERT_SQL: &str = "INSERT INTO trades (account_id, symbol, trade_type, contracts, strike_price, premium_per_share, open_date, expiration_date, close_date, close_method, close_price, fees, status, tags, notes, wheel_id, created_at, updated_at)
     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18)";

pub struct SqliteTradeRepo {
    conn: SharedConnection,
}

impl SqliteTradeRepo {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }

    pub(crate) fn row_to_trade(row: &rusqlite::Row) -> Result<Trade, rusqlite::Error> {
        let type_str: String = row.get(3)?;
        let open_str: String = row.get(7)?;
        let exp_str: String = row.get(8)?;
        let close_date_str: Option<String> = row.get(9)?;
        let close_method_str: Option<String> = row.get(10)?;
        let status_str: String = row.get(13)?;
        let created_str: String = row.get(17)?;
        let updated_str: String = row.get(18)?;

        Ok(Trade {
            trade_id: row.get(0)?,
            account_id: row.get(1)?,
            symbol: row.get(2)?,
            trade_type: type_str.parse().unwrap_or_else(|_| {
                log::warn!("invalid trade_type '{type_str}' in trade row, defaulting to CSP");
                TradeType::Csp
            }),
            contracts: row.get(4)?,
            strike_price: row.get(5)?,
            premium_per_share: row.get(6)?,
            open_date: parse_date(&open_str),
            expiration_date: parse_date(&exp_str),
            close_date: parse_opt_date(close_date_str),
            close_method: close_method_str.and_then(|s| s.parse().ok()),
            close_price: row.get(11)?,
            fees: row.get(12)?,
            status: status_str.parse().unwrap_or_else(|_| {
                log::warn!("invalid status '{status_str}' in trade row, defaulting to OPEN");
                TradeStatus::Open
            }),
            tags: row.get(14)?,
            notes: row.get(15)?,
            wheel_id: row.get(16)?,
            created_at: parse_timestamp(&created_str),
            updated_at: parse_timestamp(&updated_str),
        })
    }

    fn insert_params(trade: &Trade) -> [Box<dyn rusqlite::types::ToSql>; 18] {
        [
            Box::new(trade.account_id),
            Box::new(trade.symbol.clone()),
            Box::new(trade.trade_type.to_string()),
            Box::new(trade.contracts),
            Box::new(trade.strike_price),
            Box::new(trade.premium_per_share),
            Box::new(trade.open_date.to_string()),
            Box::new(trade.expiration_date.to_string()),
            Box::new(trade.close_date.map(|d| d.to_string())),
            Box::new(trade.close_method.map(|m| m.to_string())),
            Box::new(trade.close_price),
            Box::new(trade.fees),
            Box::new(trade.status.to_string()),
            Box::new(trade.tags.clone()),
            Box::new(trade.notes.clone()),
            Box::new(trade.wheel_id),
            Box::new(trade.created_at.to_rfc3339()),
            Box::new(trade.updated_at.to_rfc3339()),
        ]
    }
}

impl TradeRepository for SqliteTradeRepo {
    fn add(&self, trade: &Trade) -> Result<Trade, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let param_values = Self::insert_params(trade);
        let params_refs: Vec<&dyn rusqlite::types::ToSql> =
            param_values.iter().map(|p| p.as_ref()).collect();
        conn.execute(INSERT_SQL, params_refs.as_slice())
            .map_err(|e| DomainError::Database(format!("Failed to add trade: {e}")))?;

        let mut saved = trade.clone();
        saved.trade_id = Some(conn.last_insert_rowid());
        Ok(saved)
    }

    fn get(&self, id: i64) -> Result<Option<Trade>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let sql = format!("SELECT {SELECT_COLS} FROM trades WHERE trade_id = ?1");
        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let mut rows = stmt
            .query_map(params![id], Self::row_to_trade)
            .map_err(|e| DomainError::Database(e.to_string()))?;
        Ok(rows.next().and_then(|r| r.ok()))
    }

    fn list(&self, filter: &TradeFilter) -> Result<Vec<Trade>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let mut sql = format!("SELECT {SELECT_COLS} FROM trades WHERE 1=1");
        let mut param_values: Vec<Box<dyn rusqlite::types::ToSql>> = Vec::new();

        if let Some(status) = &filter.status {
            sql.push_str(&format!(" AND status = ?{}", param_values.len() + 1));
            param_values.push(Box::new(status.to_string()));
        }
        if let Some(account_id) = filter.account_id {
            sql.push_str(&format!(" AND account_id = ?{}", param_values.len() + 1));
            param_values.push(Box::new(account_id));
        }
        sql.push_str(" ORDER BY expiration_date DESC");

        let params_refs: Vec<&dyn rusqlite::types::ToSql> =
            param_values.iter().map(|p| p.as_ref()).collect();
        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let trades = stmt
            .query_map(params_refs.as_slice(), Self::row_to_trade)
            .map_err(|e| DomainError::Database(e.to_string()))?
            .filter_map(|r| r.ok())
            .collect();
        Ok(trades)
    }

    fn update(&self, id: i64, update: &TradeUpdate) -> Result<(), DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let rows = conn
            .execute(
                "UPDATE trades SET symbol = ?1, trade_type = ?2, contracts = ?3, strike_price = ?4,
                     premium_per_share = ?5, fees = ?6, tags = ?7, notes = ?8, updated_at = ?9
                 WHERE trade_id = ?10",
                params![
                    update.symbol,
                    update.trade_type.to_string(),
                    update.contracts,
                    update.strike_price,
                    update.premium_per_share,
                    update.fees,
                    update.tags,
                    update.notes,
                    Utc::now().to_rfc3339(),
                    id,
                ],
            )
            .map_err(|e| DomainError::Database(format!("Failed to update trade: {e}")))?;
        if rows == 0 {
            return Err(DomainError::NotFound(format!("Trade not found: {id}")));
        }
        Ok(())
    }

    fn close(&self, id: i64, close: &CloseTrade) -> Result<(), DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let rows = conn
            .execute(
                "UPDATE trades SET close_date = ?1, close_method = ?2, close_price = ?3, status = 'CLOSED', updated_at = ?4
                 WHERE trade_id = ?5",
                params![
                    close.close_date.to_string(),
                    close.close_method.to_string(),
                    close.close_price,
                    Utc::now().to_rfc3339(),
                    id,
                ],
            )
            .map_err(|e| DomainError::Database(format!("Failed to close trade: {e}")))?;
        if rows == 0 {
            return Err(DomainError::NotFound(format!("Trade not found: {id}")));
        }
        Ok(())
    }

    fn delete(&self, id: i64) -> Result<(), DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let rows = conn
            .execute("DELETE FROM trades WHERE trade_id = ?1", params![id])
            .map_err(|e| DomainError::Database(format!("Failed to delete trade: {e}")))?;
        if rows == 0 {
            return Err(DomainError::NotFound(format!("Trade not found: {id}")));
        }
        Ok(())
    }

    fn save_batch(&self, trades: &[Trade]) -> Result<BatchOutcome, DomainError> {
        let mut conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let tx = conn
            .transaction()
            .map_err(|e| DomainError::Database(format!("failed to begin transaction: {e}")))?;

        let mut imported_count = 0;
        let mut errors = Vec::new();

        for (i, trade) in trades.iter().enumerate() {
            // Account state can change between upload and commit, so the
            // active check runs again here, inside the transaction.
            let account_active: bool = tx
                .query_row(
                    "SELECT EXISTS(SELECT 1 FROM accounts WHERE account_id = ?1 AND is_active = 1)",
                    params![trade.account_id],
                    |row| row.get(0),
                )
                .unwrap_or(false);
            if !account_active {
                errors.push(format!(
                    "Trade {} ({}): Account ID {} not found or inactive",
                    i + 1,
                    trade.symbol,
                    trade.account_id
                ));
                continue;
            }

            let param_values = Self::insert_params(trade);
            let params_refs: Vec<&dyn rusqlite::types::ToSql> =
                param_values.iter().map(|p| p.as_ref()).collect();
            match tx.execute(INSERT_SQL, params_refs.as_slice()) {
                Ok(_) => imported_count += 1,
                Err(e) => errors.push(format!("Trade {} ({}): {e}", i + 1, trade.symbol)),
            }
        }

        if !errors.is_empty() {
            log::warn!(
                "rolling back trade batch: {} of {} rows failed",
                errors.len(),
                trades.len()
            );
            tx.rollback()
                .map_err(|e| DomainError::Database(format!("failed to roll back transaction: {e}")))?;
            return Ok(BatchOutcome {
                imported_count,
                errors,
            });
        }

        tx.commit()
            .map_err(|e| DomainError::Database(format!("failed to commit transaction: {e}")))?;
        Ok(BatchOutcome {
            imported_count,
            errors,
        })
    }

    fn dashboard(&self) -> Result<DashboardStats, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let total_trades: usize = conn
            .query_row("SELECT COUNT(*) FROM trades", [], |r| r.get(0))
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let open_trades: usize = conn
            .query_row("SELECT COUNT(*) FROM trades WHERE status = 'OPEN'", [], |r| {
                r.get(0)
            })
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let closed_trades: usize = conn
            .query_row(
                "SELECT COUNT(*) FROM trades WHERE status = 'CLOSED'",
                [],
                |r| r.get(0),
            )
            .map_err(|e| DomainError::Database(e.to_string()))?;

        let open_trades_net_premium: f64 = conn
            .query_row(
                "SELECT COALESCE(SUM((premium_per_share * contracts * 100) - fees), 0)
                 FROM trades WHERE status = 'OPEN'",
                [],
                |r| r.get(0),
            )
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let premium_collected: f64 = conn
            .query_row(
                "SELECT COALESCE(SUM((premium_per_share * contracts * 100) - (close_price * contracts * 100) - fees), 0)
                 FROM trades WHERE status = 'CLOSED'",
                [],
                |r| r.get(0),
            )
            .map_err(|e| DomainError::Database(e.to_string()))?;

        let win_rate = if total_trades > 0 {
            closed_trades as f64 / total_trades as f64 * 100.0
        } else {
            0.0
        };

        Ok(DashboardStats {
            total_trades,
            open_trades,
            closed_trades,
            win_rate,
            open_trades_net_premium,
            premium_collected,
        })
    }

    fn performance(&self) -> Result<Vec<SymbolPerformance>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let mut stmt = conn
            .prepare(
                "SELECT symbol, COUNT(*) as trades,
                        SUM((premium_per_share * contracts * 100) - fees) as total_premium
                 FROM trades WHERE status = 'CLOSED'
                 GROUP BY symbol
                 ORDER BY total_premium DESC",
            )
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let performance = stmt
            .query_map([], |row| {
                Ok(SymbolPerformance {
                    symbol: row.get(0)?,
                    trades: row.get(1)?,
                    total_premium: row.get(2)?,
                })
            })
            .map_err(|e| DomainError::Database(e.to_string()))?
            .filter_map(|r| r.ok())
            .collect();
        Ok(performance)
    }

    fn summary(&self, account_id: i64) -> Result<TradeSummary, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let total_trades: usize = conn
            .query_row(
                "SELECT COUNT(*) FROM trades WHERE account_id = ?1",
                params![account_id],
                |r| r.get(0),
            )
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let open_trades: usize = conn
            .query_row(
                "SELECT COUNT(*) FROM trades WHERE account_id = ?1 AND status = 'OPEN'",
                params![account_id],
                |r| r.get(0),
            )
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let total_premium: f64 = conn
            .query_row(
                "SELECT COALESCE(SUM((premium_per_share * contracts * 100) - fees), 0)
                 FROM trades WHERE account_id = ?1 AND status = 'CLOSED'",
                params![account_id],
                |r| r.get(0),
            )
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(TradeSummary {
            total_trades,
            open_trades,
            total_premium,
        })
    }
}
