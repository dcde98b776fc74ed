use clap::Parser;
use serde::Deserialize;
use wheeltrack::cli::commands::{Cli, Commands};
use wheeltrack::domain::entities::account::{AccountDraft, AccountUpdate};
use wheeltrack::domain::entities::income::IncomeDraft;
use wheeltrack::domain::entities::position::{ClosePosition, PositionDraft, PositionUpdate};
use wheeltrack::domain::entities::trade::{CloseTrade, Trade, TradeDraft, TradeUpdate};
use wheeltrack::domain::entities::wheel::{WheelDraft, WheelUpdate};
use wheeltrack::domain::ports::income_repository::IncomeFilter;
use wheeltrack::WheelTrack;

#[derive(Deserialize)]
struct ConfirmRequest {
    trades: Vec<Trade>,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    let db_path = std::env::var("WHEELTRACK_DB").unwrap_or_else(|_| "./wheeltrack.db".into());

    let wt = match WheelTrack::new(&db_path) {
        Ok(wt) => wt,
        Err(e) => {
            eprintln!("Error initializing WheelTrack: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run_command(wt, cli.command) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run_command(wt: WheelTrack, cmd: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        Commands::AccountAdd { json } => {
            let draft: AccountDraft = serde_json::from_str(&json)?;
            let account = wt.account_add(draft)?;
            print_json(&account);
        }
        Commands::Accounts { all } => {
            let accounts = wt.accounts(all)?;
            print_json(&accounts);
        }
        Commands::Account { id } => {
            let account = wt.account(id)?;
            print_json(&account);
        }
        Commands::AccountUpdate { id, json } => {
            let update: AccountUpdate = serde_json::from_str(&json)?;
            wt.account_update(id, update)?;
            println!("Account {id} updated");
        }
        Commands::AccountActivate { id } => {
            wt.account_activate(id)?;
            println!("Account {id} activated");
        }
        Commands::AccountDelete { id } => {
            wt.account_delete(id)?;
            println!("Account {id} and related trades deleted");
        }
        Commands::Deposit { id, amount, notes } => {
            wt.deposit(id, amount, notes.as_deref())?;
            println!("Deposited {amount:.2} into account {id}");
        }
        Commands::Withdraw { id, amount, notes } => {
            wt.withdraw(id, amount, notes.as_deref())?;
            println!("Withdrew {amount:.2} from account {id}");
        }
        Commands::Transactions { id } => {
            let transactions = wt.account_transactions(id)?;
            print_json(&transactions);
        }
        Commands::TradeAdd { json } => {
            let draft: TradeDraft = serde_json::from_str(&json)?;
            let trade = wt.trade_add(draft)?;
            print_json(&trade);
        }
        Commands::Trades { status, account } => {
            let status = status.parse().map_err(|e: String| e)?;
            let trades = wt.trades(Some(status), account)?;
            print_json(&trades);
        }
        Commands::Trade { id } => {
            let trade = wt.trade(id)?;
            print_json(&trade);
        }
        Commands::TradeUpdate { id, json } => {
            let update: TradeUpdate = serde_json::from_str(&json)?;
            wt.trade_update(id, update)?;
            println!("Trade {id} updated");
        }
        Commands::TradeClose {
            id,
            close_date,
            close_method,
            close_price,
        } => {
            let close = CloseTrade {
                close_date: parse_date(&close_date)?,
                close_method: close_method.parse().map_err(|e: String| e)?,
                close_price,
            };
            wt.trade_close(id, close)?;
            println!("Trade {id} closed");
        }
        Commands::TradeDelete { id } => {
            wt.trade_delete(id)?;
            println!("Trade {id} deleted");
        }
        Commands::Import { file } => {
            let input = std::fs::File::open(&file)?;
            let outcome = wt.import_csv(input)?;
            print_json(&outcome);
        }
        Commands::ImportPreview { file } => {
            let input = std::fs::File::open(&file)?;
            let preview = wt.preview_csv(input)?;
            print_json(&preview);
        }
        Commands::ImportConfirm { json } => {
            let request: ConfirmRequest = serde_json::from_str(&json)?;
            let outcome = wt.confirm_import(request.trades)?;
            print_json(&outcome);
        }
        Commands::PositionAdd { json } => {
            let draft: PositionDraft = serde_json::from_str(&json)?;
            let position = wt.position_add(draft)?;
            print_json(&position);
        }
        Commands::Positions { status } => {
            let status = status.parse().map_err(|e: String| e)?;
            let positions = wt.positions(status)?;
            print_json(&positions);
        }
        Commands::Position { id } => {
            let position = wt.position(id)?;
            print_json(&position);
        }
        Commands::PositionUpdate { id, json } => {
            let update: PositionUpdate = serde_json::from_str(&json)?;
            wt.position_update(id, update)?;
            println!("Position {id} updated");
        }
        Commands::PositionClose {
            id,
            sold_date,
            sold_price,
        } => {
            let close = ClosePosition {
                sold_date: parse_date(&sold_date)?,
                sold_price_per_share: sold_price,
            };
            wt.position_close(id, close)?;
            println!("Position {id} closed");
        }
        Commands::PositionDelete { id } => {
            wt.position_delete(id)?;
            println!("Position {id} deleted");
        }
        Commands::WheelAdd { json } => {
            let draft: WheelDraft = serde_json::from_str(&json)?;
            let wheel = wt.wheel_add(draft)?;
            print_json(&wheel);
        }
        Commands::Wheels { status } => {
            let status = status.parse().map_err(|e: String| e)?;
            let wheels = wt.wheels(status)?;
            print_json(&wheels);
        }
        Commands::Wheel { id } => {
            let detail = wt.wheel(id)?;
            print_json(&detail);
        }
        Commands::WheelUpdate { id, json } => {
            let update: WheelUpdate = serde_json::from_str(&json)?;
            wt.wheel_update(id, update)?;
            println!("Wheel {id} updated");
        }
        Commands::IncomeAdd { json } => {
            let draft: IncomeDraft = serde_json::from_str(&json)?;
            let income = wt.income_add(draft)?;
            print_json(&income);
        }
        Commands::Income {
            account,
            income_type,
        } => {
            let incomes = wt.incomes(IncomeFilter {
                account_id: account,
                income_type,
            })?;
            print_json(&incomes);
        }
        Commands::IncomeDelete { id } => {
            wt.income_delete(id)?;
            println!("Income {id} deleted");
        }
        Commands::Dashboard => {
            let dashboard = wt.dashboard()?;
            print_json(&dashboard);
        }
        Commands::Performance => {
            let performance = wt.performance()?;
            print_json(&performance);
        }
        Commands::Summary { account } => {
            let summary = wt.summary(account)?;
            print_json(&summary);
        }
        Commands::Portfolio => {
            let portfolio = wt.portfolio()?;
            print_json(&portfolio);
        }
    }
    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("Error serializing output: {e}"),
    }
}

fn parse_date(s: &str) -> Result<chrono::NaiveDate, String> {
    chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| format!("Invalid date format: {s}. Use YYYY-MM-DD"))
}
