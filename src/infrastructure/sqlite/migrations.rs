use rusqlite::Connection;

pub fn run_migrations(conn: &Connection) -> Result<(), String> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS accounts (
            account_id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            broker TEXT NOT NULL,
            currency TEXT NOT NULL DEFAULT 'USD',
            initial_balance REAL NOT NULL DEFAULT 0.0,
            current_balance REAL NOT NULL DEFAULT 0.0,
            is_active INTEGER NOT NULL DEFAULT 1,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS trades (
            trade_id INTEGER PRIMARY KEY AUTOINCREMENT,
            account_id INTEGER NOT NULL,
            symbol TEXT NOT NULL,
            trade_type TEXT NOT NULL CHECK(trade_type IN ('CSP', 'CC', 'PUT', 'CALL')),
            contracts INTEGER NOT NULL,
            strike_price REAL NOT NULL,
            premium_per_share REAL NOT NULL,
            open_date TEXT NOT NULL,
            expiration_date TEXT NOT NULL,
            close_date TEXT,
            close_method TEXT CHECK(close_method IN ('BTC', 'EXPIRATION', 'ASSIGNMENT')),
            close_price REAL,
            fees REAL NOT NULL DEFAULT 0.0,
            status TEXT NOT NULL DEFAULT 'OPEN' CHECK(status IN ('OPEN', 'CLOSED', 'EXPIRED')),
            tags TEXT,
            notes TEXT,
            wheel_id INTEGER,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            FOREIGN KEY (account_id) REFERENCES accounts(account_id) ON DELETE CASCADE
        );

        CREATE TABLE IF NOT EXISTS positions (
            position_id INTEGER PRIMARY KEY AUTOINCREMENT,
            account_id INTEGER NOT NULL,
            symbol TEXT NOT NULL,
            shares INTEGER NOT NULL,
            cost_basis_per_share REAL NOT NULL,
            acquired_date TEXT NOT NULL,
            sold_date TEXT,
            sold_price_per_share REAL,
            status TEXT NOT NULL DEFAULT 'OPEN' CHECK(status IN ('OPEN', 'CLOSED')),
            is_covered INTEGER NOT NULL DEFAULT 0,
            wheel_id INTEGER,
            notes TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            FOREIGN KEY (account_id) REFERENCES accounts(account_id) ON DELETE CASCADE
        );

        CREATE TABLE IF NOT EXISTS wheels (
            wheel_id INTEGER PRIMARY KEY AUTOINCREMENT,
            account_id INTEGER NOT NULL,
            symbol TEXT NOT NULL,
            start_date TEXT NOT NULL,
            end_date TEXT,
            status TEXT NOT NULL DEFAULT 'ACTIVE' CHECK(status IN ('ACTIVE', 'COMPLETED')),
            current_phase TEXT,
            total_premium REAL NOT NULL DEFAULT 0.0,
            total_pnl REAL NOT NULL DEFAULT 0.0,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            FOREIGN KEY (account_id) REFERENCES accounts(account_id) ON DELETE CASCADE
        );

        CREATE TABLE IF NOT EXISTS dividends_income (
            income_id INTEGER PRIMARY KEY AUTOINCREMENT,
            account_id INTEGER NOT NULL,
            symbol TEXT,
            income_type TEXT NOT NULL,
            amount REAL NOT NULL,
            payment_date TEXT NOT NULL,
            currency TEXT NOT NULL DEFAULT 'USD',
            notes TEXT,
            created_at TEXT NOT NULL,
            FOREIGN KEY (account_id) REFERENCES accounts(account_id) ON DELETE CASCADE
        );

        CREATE TABLE IF NOT EXISTS account_transactions (
            transaction_id INTEGER PRIMARY KEY AUTOINCREMENT,
            account_id INTEGER NOT NULL,
            transaction_type TEXT NOT NULL CHECK(transaction_type IN ('DEPOSIT', 'WITHDRAWAL')),
            amount REAL NOT NULL,
            transaction_date TEXT NOT NULL,
            notes TEXT,
            FOREIGN KEY (account_id) REFERENCES accounts(account_id) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_trades_account ON trades(account_id);
        CREATE INDEX IF NOT EXISTS idx_trades_status ON trades(status);
        CREATE INDEX IF NOT EXISTS idx_trades_expiration ON trades(expiration_date);
        CREATE INDEX IF NOT EXISTS idx_trades_wheel ON trades(wheel_id);
        CREATE INDEX IF NOT EXISTS idx_positions_status ON positions(status);
        CREATE INDEX IF NOT EXISTS idx_positions_wheel ON positions(wheel_id);
        CREATE INDEX IF NOT EXISTS idx_wheels_status ON wheels(status);
        CREATE INDEX IF NOT EXISTS idx_income_account ON dividends_income(account_id);
        CREATE INDEX IF NOT EXISTS idx_transactions_account ON account_transactions(account_id);
        ",
    )
    .map_err(|e| format!("Migration failed: {e}"))
}
