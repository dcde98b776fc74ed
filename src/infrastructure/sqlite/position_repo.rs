use crate::domain::entities::position::{ClosePosition, Position, PositionDraft, PositionUpdate};
use crate::domain::error::DomainError;
use crate::domain::ports::position_repository::{PortfolioItem, PositionRepository};
use crate::domain::values::position_status::PositionStatus;
use crate::infrastructure::sqlite::{parse_date, parse_opt_date, parse_timestamp, SharedConnection};
use chrono::Utc;
use rusqlite::params;

const SELECT_COLS: &str = "position_id, account_id, symbol, shares, cost_basis_per_share, acquired_date, sold_date, sold_price_per_share, status, is_covered, wheel_id, notes, created_at, updated_at";

pub struct SqlitePositionRepo {
    conn: SharedConnection,
}

impl SqlitePositionRepo {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }

    pub(crate) fn row_to_position(row: &rusqlite::Row) -> Result<Position, rusqlite::Error> {
        let acquired_str: String = row.get(5)?;
        let sold_str: Option<String> = row.get(6)?;
        let status_str: String = row.get(8)?;
        let is_covered: i32 = row.get(9)?;
        let created_str: String = row.get(12)?;
        let updated_str: String = row.get(13)?;

        Ok(Position {
            position_id: row.get(0)?,
            account_id: row.get(1)?,
            symbol: row.get(2)?,
            shares: row.get(3)?,
            cost_basis_per_share: row.get(4)?,
            acquired_date: parse_date(&acquired_str),
            sold_date: parse_opt_date(sold_str),
            sold_price_per_share: row.get(7)?,
            status: status_str.parse().unwrap_or_else(|_| {
                log::warn!("invalid status '{status_str}' in position row, defaulting to OPEN");
                PositionStatus::Open
            }),
            is_covered: is_covered != 0,
            wheel_id: row.get(10)?,
            notes: row.get(11)?,
            created_at: parse_timestamp(&created_str),
            updated_at: parse_timestamp(&updated_str),
        })
    }
}

impl PositionRepository for SqlitePositionRepo {
    fn add(&self, draft: &PositionDraft) -> Result<Position, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let now = Utc::now();
        conn.execute(
            "INSERT INTO positions (account_id, symbol, shares, cost_basis_per_share, acquired_date, status, notes, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, 'OPEN', ?6, ?7, ?8)",
            params![
                draft.account_id,
                draft.symbol,
                draft.shares,
                draft.cost_basis_per_share,
                draft.acquired_date.to_string(),
                draft.notes,
                now.to_rfc3339(),
                now.to_rfc3339(),
            ],
        )
        .map_err(|e| DomainError::Database(format!("Failed to add position: {e}")))?;

        Ok(Position {
            position_id: conn.last_insert_rowid(),
            account_id: draft.account_id,
            symbol: draft.symbol.clone(),
            shares: draft.shares,
            cost_basis_per_share: draft.cost_basis_per_share,
            acquired_date: draft.acquired_date,
            sold_date: None,
            sold_price_per_share: None,
            status: PositionStatus::Open,
            is_covered: false,
            wheel_id: None,
            notes: draft.notes.clone(),
            created_at: now,
            updated_at: now,
        })
    }

    fn get(&self, id: i64) -> Result<Option<Position>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let sql = format!("SELECT {SELECT_COLS} FROM positions WHERE position_id = ?1");
        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let mut rows = stmt
            .query_map(params![id], Self::row_to_position)
            .map_err(|e| DomainError::Database(e.to_string()))?;
        Ok(rows.next().and_then(|r| r.ok()))
    }

    fn list(&self, status: PositionStatus) -> Result<Vec<Position>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let sql = format!(
            "SELECT {SELECT_COLS} FROM positions WHERE status = ?1 ORDER BY acquired_date DESC"
        );
        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let positions = stmt
            .query_map(params![status.to_string()], Self::row_to_position)
            .map_err(|e| DomainError::Database(e.to_string()))?
            .filter_map(|r| r.ok())
            .collect();
        Ok(positions)
    }

    fn update(&self, id: i64, update: &PositionUpdate) -> Result<(), DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let rows = conn
            .execute(
                "UPDATE positions SET shares = ?1, cost_basis_per_share = ?2, is_covered = ?3, notes = ?4, updated_at = ?5
                 WHERE position_id = ?6",
                params![
                    update.shares,
                    update.cost_basis_per_share,
                    update.is_covered as i32,
                    update.notes,
                    Utc::now().to_rfc3339(),
                    id,
                ],
            )
            .map_err(|e| DomainError::Database(format!("Failed to update position: {e}")))?;
        if rows == 0 {
            return Err(DomainError::NotFound(format!("Position not found: {id}")));
        }
        Ok(())
    }

    fn close(&self, id: i64, close: &ClosePosition) -> Result<(), DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let rows = conn
            .execute(
                "UPDATE positions SET sold_date = ?1, sold_price_per_share = ?2, status = 'CLOSED', updated_at = ?3
                 WHERE position_id = ?4",
                params![
                    close.sold_date.to_string(),
                    close.sold_price_per_share,
                    Utc::now().to_rfc3339(),
                    id,
                ],
            )
            .map_err(|e| DomainError::Database(format!("Failed to close position: {e}")))?;
        if rows == 0 {
            return Err(DomainError::NotFound(format!("Position not found: {id}")));
        }
        Ok(())
    }

    fn delete(&self, id: i64) -> Result<(), DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let rows = conn
            .execute("DELETE FROM positions WHERE position_id = ?1", params![id])
            .map_err(|e| DomainError::Database(format!("Failed to delete position: {e}")))?;
        if rows == 0 {
            return Err(DomainError::NotFound(format!("Position not found: {id}")));
        }
        Ok(())
    }

    fn portfolio(&self) -> Result<Vec<PortfolioItem>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let mut stmt = conn
            .prepare(
                "SELECT symbol, account_id, SUM(shares) as total_shares
                 FROM positions
                 WHERE shares > 0 AND status = 'OPEN'
                 GROUP BY symbol, account_id
                 ORDER BY symbol, account_id",
            )
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let rows: Vec<(String, i64, i64)> = stmt
            .query_map([], |row| {
                Ok((row.get(0)?, row.get(1)?, row.get(2)?))
            })
            .map_err(|e| DomainError::Database(e.to_string()))?
            .filter_map(|r| r.ok())
            .collect();

        // Rows arrive symbol-ordered, so per-symbol aggregation is a fold.
        let mut portfolio: Vec<PortfolioItem> = Vec::new();
        for (symbol, account_id, shares) in rows {
            match portfolio.last_mut() {
                Some(item) if item.symbol == symbol => {
                    item.total_shares += shares;
                    item.accounts.push(account_id);
                }
                _ => portfolio.push(PortfolioItem {
                    symbol,
                    total_shares: shares,
                    accounts: vec![account_id],
                }),
            }
        }
        Ok(portfolio)
    }
}
