use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "wheeltrack", about = "Options wheel strategy tracker")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create an account
    AccountAdd {
        /// JSON with name, broker, currency, initial_balance, current_balance
        json: String,
    },
    /// List accounts (active only unless --all)
    Accounts {
        #[arg(long)]
        all: bool,
    },
    /// Show one account
    Account { id: i64 },
    /// Update an account
    AccountUpdate {
        id: i64,
        /// JSON with name, broker, currency, current_balance
        json: String,
    },
    /// Make an account the single active one
    AccountActivate { id: i64 },
    /// Delete an account and its trades
    AccountDelete { id: i64 },
    /// Deposit into an active account
    Deposit {
        id: i64,
        amount: f64,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Withdraw from an active account
    Withdraw {
        id: i64,
        amount: f64,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Show an account's deposit/withdrawal history
    Transactions { id: i64 },
    /// Create a trade
    TradeAdd {
        /// JSON with account_id, symbol, trade_type, contracts, strike_price,
        /// premium_per_share, open_date, expiration_date, fees, tags, notes
        json: String,
    },
    /// List trades
    Trades {
        /// Status filter (OPEN, CLOSED, EXPIRED)
        #[arg(long, default_value = "OPEN")]
        status: String,
        /// Account id (defaults to the active account)
        #[arg(long)]
        account: Option<i64>,
    },
    /// Show one trade
    Trade { id: i64 },
    /// Update a trade
    TradeUpdate {
        id: i64,
        /// JSON with symbol, trade_type, contracts, strike_price,
        /// premium_per_share, fees, tags, notes
        json: String,
    },
    /// Close a trade
    TradeClose {
        id: i64,
        /// Close date (YYYY-MM-DD)
        close_date: String,
        /// Close method (BTC, EXPIRATION, ASSIGNMENT)
        close_method: String,
        #[arg(long)]
        close_price: Option<f64>,
    },
    /// Delete a trade
    TradeDelete { id: i64 },
    /// Import trades from a CSV file (all-or-nothing)
    Import {
        /// Path to the CSV file
        file: String,
    },
    /// Dry-run a CSV file: parse and derive without saving
    ImportPreview {
        /// Path to the CSV file
        file: String,
    },
    /// Persist previously previewed trades
    ImportConfirm {
        /// JSON with a trades array, as returned by import-preview
        json: String,
    },
    /// Create a stock position
    PositionAdd {
        /// JSON with account_id, symbol, shares, cost_basis_per_share,
        /// acquired_date, notes
        json: String,
    },
    /// List positions
    Positions {
        /// Status filter (OPEN, CLOSED)
        #[arg(long, default_value = "OPEN")]
        status: String,
    },
    /// Show one position
    Position { id: i64 },
    /// Update a position
    PositionUpdate {
        id: i64,
        /// JSON with shares, cost_basis_per_share, is_covered, notes
        json: String,
    },
    /// Close a position
    PositionClose {
        id: i64,
        /// Sold date (YYYY-MM-DD)
        sold_date: String,
        sold_price: f64,
    },
    /// Delete a position
    PositionDelete { id: i64 },
    /// Start a wheel cycle
    WheelAdd {
        /// JSON with account_id, symbol, start_date
        json: String,
    },
    /// List wheel cycles
    Wheels {
        /// Status filter (ACTIVE, COMPLETED)
        #[arg(long, default_value = "ACTIVE")]
        status: String,
    },
    /// Show a wheel with its trades and positions
    Wheel { id: i64 },
    /// Update a wheel cycle
    WheelUpdate {
        id: i64,
        /// JSON with status, current_phase, total_premium, total_pnl
        json: String,
    },
    /// Record a dividend or other income event
    IncomeAdd {
        /// JSON with account_id, symbol, income_type, amount, payment_date,
        /// currency, notes
        json: String,
    },
    /// List income events
    Income {
        #[arg(long)]
        account: Option<i64>,
        #[arg(long)]
        income_type: Option<String>,
    },
    /// Delete an income event
    IncomeDelete { id: i64 },
    /// Aggregate trade statistics
    Dashboard,
    /// Per-symbol premium over closed trades
    Performance,
    /// Per-account trade summary
    Summary { account: i64 },
    /// Open shares grouped by symbol across accounts
    Portfolio,
}
