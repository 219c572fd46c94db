//! Report CLI commands

use std::path::PathBuf;

use clap::Args;

use crate::config::settings::Settings;
use crate::error::BudgetResult;
use crate::reports::{render_pie_chart, BudgetSummary};
use crate::services::{BudgetService, TransactionService};
use crate::session::Session;
use crate::storage::Storage;

#[derive(Args)]
pub struct HistoryArgs {
    /// Number of entries to show
    #[arg(short = 'n', long, default_value = "20")]
    pub count: usize,
}

#[derive(Args)]
pub struct SummaryArgs {
    /// Write the spending pie chart to this SVG file
    #[arg(long)]
    pub chart: Option<PathBuf>,
}

/// Handle `summary`
pub fn handle_summary_command(
    storage: &Storage,
    settings: &Settings,
    session: &Session,
    args: SummaryArgs,
) -> BudgetResult<()> {
    let identity = session.require_user()?;

    let transactions = TransactionService::new(storage).list(identity.user_id)?;
    let goal = BudgetService::new(storage).get_goal(identity.user_id)?;
    let summary = BudgetSummary::generate(&transactions, goal);

    println!("Welcome, {}!", identity.username);
    println!();
    print!("{}", summary.format_terminal(&settings.currency_symbol));

    if let Some(path) = args.chart {
        let chart = render_pie_chart(&summary.category_totals, &settings.chart)?;
        if chart.write_to(&path)? {
            println!("\nSpending chart written to {}", path.display());
        } else {
            println!("\nNo expense data to chart.");
        }
    }

    Ok(())
}

/// Handle `history`: show the most recent audit log entries
pub fn handle_history_command(storage: &Storage, args: HistoryArgs) -> BudgetResult<()> {
    let Some(logger) = storage.audit_logger() else {
        println!("Audit logging is disabled.");
        return Ok(());
    };

    let entries = logger.read_recent(args.count)?;
    if entries.is_empty() {
        println!("No changes recorded yet.");
        return Ok(());
    }

    for entry in &entries {
        println!("{}", entry.format_human_readable());
    }
    Ok(())
}
