//! Transaction CLI commands
//!
//! Adding, listing and exporting the logged-in user's transactions.

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::format_transaction_table;
use crate::error::{BudgetError, BudgetResult};
use crate::models::{Category, Money, NewTransaction, TransactionKind, UserId};
use crate::services::TransactionService;
use crate::session::Session;
use crate::storage::Storage;

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Record a transaction
    Add {
        /// Amount, at least 0.01
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Food, Rent, Transport, Shopping, Entertainment or Others
        #[arg(short, long)]
        category: Category,
        /// income or expense
        #[arg(short, long)]
        kind: TransactionKind,
    },

    /// List all transactions
    List,

    /// Export transactions as CSV
    Export {
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command(
    storage: &Storage,
    settings: &Settings,
    session: &Session,
    cmd: TransactionCommands,
) -> BudgetResult<()> {
    let identity = session.require_user()?;
    let service = TransactionService::new(storage);

    match cmd {
        TransactionCommands::Add {
            amount,
            category,
            kind,
        } => {
            let input = parse_new_transaction(identity.user_id, &amount, category, kind)?;
            let txn = service.add(input.user_id, input.amount, input.category, input.kind)?;

            println!(
                "Added {} {} of {} ({})",
                txn.category,
                txn.kind.as_str(),
                txn.amount.format_with_symbol(&settings.currency_symbol),
                txn.id
            );
        }

        TransactionCommands::List => {
            let transactions = service.list(identity.user_id)?;
            println!("Transactions for {}", identity.username);
            print!(
                "{}",
                format_transaction_table(&transactions, &settings.currency_symbol)
            );
        }

        TransactionCommands::Export { output } => match output {
            Some(path) => {
                let file = File::create(&path).map_err(|e| {
                    BudgetError::Export(format!("Failed to create {}: {}", path.display(), e))
                })?;
                let rows = service.export_csv(identity.user_id, BufWriter::new(file))?;
                println!("Exported {} transactions to {}", rows, path.display());
            }
            None => {
                service.export_csv(identity.user_id, io::stdout().lock())?;
            }
        },
    }

    Ok(())
}

/// Parse and check user input for a new transaction
fn parse_new_transaction(
    user_id: UserId,
    amount: &str,
    category: Category,
    kind: TransactionKind,
) -> BudgetResult<NewTransaction> {
    let amount = Money::parse(amount).map_err(|e| BudgetError::Validation(e.to_string()))?;
    let input = NewTransaction::new(user_id, amount, category, kind);
    input
        .validate()
        .map_err(|e| BudgetError::Validation(e.to_string()))?;
    Ok(input)
}
