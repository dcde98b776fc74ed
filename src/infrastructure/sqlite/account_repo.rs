use crate::domain::entities::account::{Account, AccountDraft, AccountTransaction, AccountUpdate};
use crate::domain::error::DomainError;
use crate::domain::ports::account_repository::AccountRepository;
use crate::infrastructure::sqlite::{parse_timestamp, SharedConnection};
use chrono::Utc;
use rusqlite::params;

const SELECT_COLS: &str = "account_id, name, broker, currency, initial_balance, current_balance, is_active, created_at, updated_at";

pub struct SqliteAccountRepo {
    conn: SharedConnection,
}

impl SqliteAccountRepo {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }

    fn row_to_account(row: &rusqlite::Row) -> Result<Account, rusqlite::Error> {
        let is_active: i32 = row.get(6)?;
        let created_str: String = row.get(7)?;
        let updated_str: String = row.get(8)?;

        Ok(Account {
            account_id: row.get(0)?,
            name: row.get(1)?,
            broker: row.get(2)?,
            currency: row.get(3)?,
            initial_balance: row.get(4)?,
            current_balance: row.get(5)?,
            is_active: is_active != 0,
            created_at: parse_timestamp(&created_str),
            updated_at: parse_timestamp(&updated_str),
        })
    }
}

impl AccountRepository for SqliteAccountRepo {
    fn add(&self, draft: &AccountDraft) -> Result<Account, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let now = Utc::now();
        let current_balance = draft.current_balance.unwrap_or(draft.initial_balance);
        conn.execute(
            "INSERT INTO accounts (name, broker, currency, initial_balance, current_balance, is_active, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, 1, ?6, ?7)",
            params![
                draft.name,
                draft.broker,
                draft.currency,
                draft.initial_balance,
                current_balance,
                now.to_rfc3339(),
                now.to_rfc3339(),
            ],
        )
        .map_err(|e| DomainError::Database(format!("Failed to add account: {e}")))?;

        Ok(Account {
            account_id: conn.last_insert_rowid(),
            name: draft.name.clone(),
            broker: draft.broker.clone(),
            currency: draft.currency.clone(),
            initial_balance: draft.initial_balance,
            current_balance,
            is_active: true,
            created_at: now,
            updated_at: now,
        })
    }

    fn get(&self, id: i64) -> Result<Option<Account>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let sql = format!("SELECT {SELECT_COLS} FROM accounts WHERE account_id = ?1");
        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let mut rows = stmt
            .query_map(params![id], Self::row_to_account)
            .map_err(|e| DomainError::Database(e.to_string()))?;
        Ok(rows.next().and_then(|r| r.ok()))
    }

    fn list(&self, include_inactive: bool) -> Result<Vec<Account>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let sql = if include_inactive {
            format!("SELECT {SELECT_COLS} FROM accounts ORDER BY account_id")
        } else {
            format!("SELECT {SELECT_COLS} FROM accounts WHERE is_active = 1 ORDER BY account_id")
        };
        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let accounts = stmt
            .query_map([], Self::row_to_account)
            .map_err(|e| DomainError::Database(e.to_string()))?
            .filter_map(|r| r.ok())
            .collect();
        Ok(accounts)
    }

    fn update(&self, id: i64, update: &AccountUpdate) -> Result<(), DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let rows = conn
            .execute(
                "UPDATE accounts SET name = ?1, broker = ?2, currency = ?3, current_balance = ?4, updated_at = ?5
                 WHERE account_id = ?6",
                params![
                    update.name,
                    update.broker,
                    update.currency,
                    update.current_balance,
                    Utc::now().to_rfc3339(),
                    id,
                ],
            )
            .map_err(|e| DomainError::Database(format!("Failed to update account: {e}")))?;
        if rows == 0 {
            return Err(DomainError::NotFound(format!("Account not found: {id}")));
        }
        Ok(())
    }

    fn activate(&self, id: i64) -> Result<(), DomainError> {
        let mut conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let tx = conn
            .transaction()
            .map_err(|e| DomainError::Database(format!("failed to begin transaction: {e}")))?;

        tx.execute("UPDATE accounts SET is_active = 0", [])
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let rows = tx
            .execute(
                "UPDATE accounts SET is_active = 1, updated_at = ?1 WHERE account_id = ?2",
                params![Utc::now().to_rfc3339(), id],
            )
            .map_err(|e| DomainError::Database(e.to_string()))?;
        if rows == 0 {
            // Dropping the transaction rolls the blanket deactivation back.
            return Err(DomainError::NotFound(format!("Account not found: {id}")));
        }

        tx.commit()
            .map_err(|e| DomainError::Database(format!("failed to commit transaction: {e}")))?;
        Ok(())
    }

    fn delete(&self, id: i64) -> Result<(), DomainError> {
        let mut conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let tx = conn
            .transaction()
            .map_err(|e| DomainError::Database(format!("failed to begin transaction: {e}")))?;

        tx.execute("DELETE FROM trades WHERE account_id = ?1", params![id])
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let rows = tx
            .execute("DELETE FROM accounts WHERE account_id = ?1", params![id])
            .map_err(|e| DomainError::Database(e.to_string()))?;
        if rows == 0 {
            return Err(DomainError::NotFound(format!("Account not found: {id}")));
        }

        tx.commit()
            .map_err(|e| DomainError::Database(format!("failed to commit transaction: {e}")))?;
        Ok(())
    }

    fn active_account_id(&self) -> Result<Option<i64>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let mut stmt = conn
            .prepare("SELECT account_id FROM accounts WHERE is_active = 1 LIMIT 1")
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let mut rows = stmt
            .query_map([], |row| row.get::<_, i64>(0))
            .map_err(|e| DomainError::Database(e.to_string()))?;
        Ok(rows.next().and_then(|r| r.ok()))
    }

    fn deposit(&self, id: i64, amount: f64, notes: Option<&str>) -> Result<(), DomainError> {
        let mut conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let tx = conn
            .transaction()
            .map_err(|e| DomainError::Database(format!("failed to begin transaction: {e}")))?;

        let rows = tx
            .execute(
                "UPDATE accounts SET current_balance = current_balance + ?1, updated_at = ?2
                 WHERE account_id = ?3 AND is_active = 1",
                params![amount, Utc::now().to_rfc3339(), id],
            )
            .map_err(|e| DomainError::Database(e.to_string()))?;
        if rows == 0 {
            return Err(DomainError::NotFound(
                "Account not found or inactive".into(),
            ));
        }

        tx.execute(
            "INSERT INTO account_transactions (account_id, transaction_type, amount, transaction_date, notes)
             VALUES (?1, 'DEPOSIT', ?2, ?3, ?4)",
            params![id, amount, Utc::now().to_rfc3339(), notes],
        )
        .map_err(|e| DomainError::Database(e.to_string()))?;

        tx.commit()
            .map_err(|e| DomainError::Database(format!("failed to commit transaction: {e}")))?;
        Ok(())
    }

    fn withdraw(&self, id: i64, amount: f64, notes: Option<&str>) -> Result<(), DomainError> {
        let mut conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let tx = conn
            .transaction()
            .map_err(|e| DomainError::Database(format!("failed to begin transaction: {e}")))?;

        let current_balance: f64 = tx
            .query_row(
                "SELECT current_balance FROM accounts WHERE account_id = ?1 AND is_active = 1",
                params![id],
                |row| row.get(0),
            )
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => {
                    DomainError::NotFound("Account not found or inactive".into())
                }
                other => DomainError::Database(other.to_string()),
            })?;

        if current_balance < amount {
            return Err(DomainError::InvalidInput(format!(
                "Insufficient balance. Current: {current_balance:.2}, Requested: {amount:.2}"
            )));
        }

        tx.execute(
            "UPDATE accounts SET current_balance = current_balance - ?1, updated_at = ?2
             WHERE account_id = ?3 AND is_active = 1",
            params![amount, Utc::now().to_rfc3339(), id],
        )
        .map_err(|e| DomainError::Database(e.to_string()))?;

        tx.execute(
            "INSERT INTO account_transactions (account_id, transaction_type, amount, transaction_date, notes)
             VALUES (?1, 'WITHDRAWAL', ?2, ?3, ?4)",
            params![id, amount, Utc::now().to_rfc3339(), notes],
        )
        .map_err(|e| DomainError::Database(e.to_string()))?;

        tx.commit()
            .map_err(|e| DomainError::Database(format!("failed to commit transaction: {e}")))?;
        Ok(())
    }

    fn transactions(&self, id: i64) -> Result<Vec<AccountTransaction>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let mut stmt = conn
            .prepare(
                "SELECT transaction_id, account_id, transaction_type, amount, transaction_date, notes
                 FROM account_transactions WHERE account_id = ?1
                 ORDER BY transaction_date DESC",
            )
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let transactions = stmt
            .query_map(params![id], |row| {
                let date_str: String = row.get(4)?;
                Ok(AccountTransaction {
                    transaction_id: row.get(0)?,
                    account_id: row.get(1)?,
                    transaction_type: row.get(2)?,
                    amount: row.get(3)?,
                    transaction_date: parse_timestamp(&date_str),
                    notes: row.get(5)?,
                })
            })
            .map_err(|e| DomainError::Database(e.to_string()))?
            .filter_map(|r| r.ok())
            .collect();
        Ok(transactions)
    }
}
