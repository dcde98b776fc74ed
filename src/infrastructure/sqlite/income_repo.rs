use crate::domain::entities::income::{Income, IncomeDraft};
use crate::domain::error::DomainError;
use crate::domain::ports::income_repository::{IncomeFilter, IncomeRepository};
use crate::infrastructure::sqlite::{parse_date, parse_timestamp, SharedConnection};
use chrono::Utc;
use rusqlite::params;

const SELECT_COLS: &str = "income_id, account_id, symbol, income_type, amount, payment_date, currency, notes, created_at";

pub struct SqliteIncomeRepo {
    conn: SharedConnection,
}

impl SqliteIncomeRepo {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }

    fn row_to_income(row: &rusqlite::Row) -> Result<Income, rusqlite::Error> {
        let payment_str: String = row.get(5)?;
        let created_str: String = row.get(8)?;

        Ok(Income {
            income_id: row.get(0)?,
            account_id: row.get(1)?,
            symbol: row.get(2)?,
            income_type: row.get(3)?,
            amount: row.get(4)?,
            payment_date: parse_date(&payment_str),
            currency: row.get(6)?,
            notes: row.get(7)?,
            created_at: parse_timestamp(&created_str),
        })
    }
}

impl IncomeRepository for SqliteIncomeRepo {
    fn add(&self, draft: &IncomeDraft) -> Result<Income, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let now = Utc::now();
        conn.execute(
            "INSERT INTO dividends_income (account_id, symbol, income_type, amount, payment_date, currency, notes, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                draft.account_id,
                draft.symbol,
                draft.income_type,
                draft.amount,
                draft.payment_date.to_string(),
                draft.currency,
                draft.notes,
                now.to_rfc3339(),
            ],
        )
        .map_err(|e| DomainError::Database(format!("Failed to add income: {e}")))?;

        Ok(Income {
            income_id: conn.last_insert_rowid(),
            account_id: draft.account_id,
            symbol: draft.symbol.clone(),
            income_type: draft.income_type.clone(),
            amount: draft.amount,
            payment_date: draft.payment_date,
            currency: draft.currency.clone(),
            notes: draft.notes.clone(),
            created_at: now,
        })
    }

    fn list(&self, filter: &IncomeFilter) -> Result<Vec<Income>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let mut sql = format!("SELECT {SELECT_COLS} FROM dividends_income WHERE 1=1");
        let mut param_values: Vec<Box<dyn rusqlite::types::ToSql>> = Vec::new();

        if let Some(account_id) = filter.account_id {
            sql.push_str(&format!(" AND account_id = ?{}", param_values.len() + 1));
            param_values.push(Box::new(account_id));
        }
        if let Some(income_type) = &filter.income_type {
            sql.push_str(&format!(" AND income_type = ?{}", param_values.len() + 1));
            param_values.push(Box::new(income_type.clone()));
        }
        sql.push_str(" ORDER BY payment_date DESC");

        let params_refs: Vec<&dyn rusqlite::types::ToSql> =
            param_values.iter().map(|p| p.as_ref()).collect();
        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let incomes = stmt
            .query_map(params_refs.as_slice(), Self::row_to_income)
            .map_err(|e| DomainError::Database(e.to_string()))?
            .filter_map(|r| r.ok())
            .collect();
        Ok(incomes)
    }

    fn delete(&self, id: i64) -> Result<(), DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let rows = conn
            .execute(
                "DELETE FROM dividends_income WHERE income_id = ?1",
                params![id],
            )
            .map_err(|e| DomainError::Database(format!("Failed to delete income: {e}")))?;
        if rows == 0 {
            return Err(DomainError::NotFound(format!("Income not found: {id}")));
        }
        Ok(())
    }
}
