//! Budget goal CLI commands

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::error::{BudgetError, BudgetResult};
use crate::models::Money;
use crate::services::BudgetService;
use crate::session::Session;
use crate::storage::Storage;

/// Goal subcommands
#[derive(Subcommand)]
pub enum GoalCommands {
    /// Set the spending goal (e.g. "5000" or "5000.00")
    Set {
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },

    /// Show the current spending goal
    Show,
}

/// Handle a goal command
pub fn handle_goal_command(
    storage: &Storage,
    settings: &Settings,
    session: &Session,
    cmd: GoalCommands,
) -> BudgetResult<()> {
    let identity = session.require_user()?;
    let service = BudgetService::new(storage);

    match cmd {
        GoalCommands::Set { amount } => {
            let amount = Money::parse(&amount).map_err(|e| BudgetError::Validation(e.to_string()))?;
            service.set_goal(identity.user_id, amount)?;
            println!(
                "Budget goal set to {}",
                amount.format_with_symbol(&settings.currency_symbol)
            );
        }
        GoalCommands::Show => {
            let goal = service.get_goal(identity.user_id)?;
            println!(
                "Budget goal: {}",
                goal.format_with_symbol(&settings.currency_symbol)
            );
        }
    }

    Ok(())
}
