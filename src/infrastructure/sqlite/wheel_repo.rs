use crate::domain::entities::wheel::{Wheel, WheelDetail, WheelDraft, WheelUpdate};
use crate::domain::error::DomainError;
use crate::domain::ports::wheel_repository::WheelRepository;
use crate::domain::values::wheel_status::WheelStatus;
use crate::infrastructure::sqlite::position_repo::SqlitePositionRepo;
use crate::infrastructure::sqlite::trade_repo::SqliteTradeRepo;
use crate::infrastructure::sqlite::{parse_date, parse_opt_date, parse_timestamp, SharedConnection};
use chrono::Utc;
use rusqlite::params;

const SELECT_COLS: &str = "wheel_id, account_id, symbol, start_date, end_date, status, current_phase, total_premium, total_pnl, created_at, updated_at";

const TRADE_COLS: &str = "trade_id, account_id, symbol, trade_type, contracts, strike_price, premium_per_share, open_date, expiration_date, close_date, close_method, close_price, fees, status, tags, notes, wheel_id, created_at, updated_at";

const POSITION_COLS: &str = "position_id, account_id, symbol, shares, cost_basis_per_share, acquired_date, sold_date, sold_price_per_share, status, is_covered, wheel_id, notes, created_at, updated_at";

pub struct SqliteWheelRepo {
    conn: SharedConnection,
}

impl SqliteWheelRepo {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }

    fn row_to_wheel(row: &rusqlite::Row) -> Result<Wheel, rusqlite::Error> {
        let start_str: String = row.get(3)?;
        let end_str: Option<String> = row.get(4)?;
        let status_str: String = row.get(5)?;
        let created_str: String = row.get(9)?;
        let updated_str: String = row.get(10)?;

        Ok(Wheel {
            wheel_id: row.get(0)?,
            account_id: row.get(1)?,
            symbol: row.get(2)?,
            start_date: parse_date(&start_str),
            end_date: parse_opt_date(end_str),
            status: status_str.parse().unwrap_or_else(|_| {
                log::warn!("invalid status '{status_str}' in wheel row, defaulting to ACTIVE");
                WheelStatus::Active
            }),
            current_phase: row.get(6)?,
            total_premium: row.get(7)?,
            total_pnl: row.get(8)?,
            created_at: parse_timestamp(&created_str),
            updated_at: parse_timestamp(&updated_str),
        })
    }
}

impl WheelRepository for SqliteWheelRepo {
    fn add(&self, draft: &WheelDraft) -> Result<Wheel, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let now = Utc::now();
        // New cycles always start in the cash-secured-put phase.
        conn.execute(
            "INSERT INTO wheels (account_id, symbol, start_date, status, current_phase, total_premium, total_pnl, created_at, updated_at)
             VALUES (?1, ?2, ?3, 'ACTIVE', 'CSP', 0.0, 0.0, ?4, ?5)",
            params![
                draft.account_id,
                draft.symbol,
                draft.start_date.to_string(),
                now.to_rfc3339(),
                now.to_rfc3339(),
            ],
        )
        .map_err(|e| DomainError::Database(format!("Failed to add wheel: {e}")))?;

        Ok(Wheel {
            wheel_id: conn.last_insert_rowid(),
            account_id: draft.account_id,
            symbol: draft.symbol.clone(),
            start_date: draft.start_date,
            end_date: None,
            status: WheelStatus::Active,
            current_phase: Some("CSP".to_string()),
            total_premium: 0.0,
            total_pnl: 0.0,
            created_at: now,
            updated_at: now,
        })
    }

    fn get(&self, id: i64) -> Result<Option<Wheel>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let sql = format!("SELECT {SELECT_COLS} FROM wheels WHERE wheel_id = ?1");
        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let mut rows = stmt
            .query_map(params![id], Self::row_to_wheel)
            .map_err(|e| DomainError::Database(e.to_string()))?;
        Ok(rows.next().and_then(|r| r.ok()))
    }

    fn get_detail(&self, id: i64) -> Result<Option<WheelDetail>, DomainError> {
        let wheel = match self.get(id)? {
            Some(w) => w,
            None => return Ok(None),
        };

        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;

        let sql = format!("SELECT {TRADE_COLS} FROM trades WHERE wheel_id = ?1 ORDER BY open_date");
        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let trades = stmt
            .query_map(params![id], SqliteTradeRepo::row_to_trade)
            .map_err(|e| DomainError::Database(e.to_string()))?
            .filter_map(|r| r.ok())
            .collect();

        let sql = format!("SELECT {POSITION_COLS} FROM positions WHERE wheel_id = ?1");
        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let positions = stmt
            .query_map(params![id], SqlitePositionRepo::row_to_position)
            .map_err(|e| DomainError::Database(e.to_string()))?
            .filter_map(|r| r.ok())
            .collect();

        Ok(Some(WheelDetail {
            wheel,
            trades,
            positions,
        }))
    }

    fn list(&self, status: WheelStatus) -> Result<Vec<Wheel>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let sql =
            format!("SELECT {SELECT_COLS} FROM wheels WHERE status = ?1 ORDER BY start_date DESC");
        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let wheels = stmt
            .query_map(params![status.to_string()], Self::row_to_wheel)
            .map_err(|e| DomainError::Database(e.to_string()))?
            .filter_map(|r| r.ok())
            .collect();
        Ok(wheels)
    }

    fn update(&self, id: i64, update: &WheelUpdate) -> Result<(), DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let rows = conn
            .execute(
                "UPDATE wheels SET current_phase = ?1, total_premium = ?2, total_pnl = ?3, status = ?4, updated_at = ?5
                 WHERE wheel_id = ?6",
                params![
                    update.current_phase,
                    update.total_premium,
                    update.total_pnl,
                    update.status.to_string(),
                    Utc::now().to_rfc3339(),
                    id,
                ],
            )
            .map_err(|e| DomainError::Database(format!("Failed to update wheel: {e}")))?;
        if rows == 0 {
            return Err(DomainError::NotFound(format!("Wheel not found: {id}")));
        }
        Ok(())
    }
}
