use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use budget_tracker::cli::{
    handle_goal_command, handle_history_command, handle_login, handle_logout, handle_register,
    handle_summary_command, handle_transaction_command, handle_whoami, GoalCommands, HistoryArgs,
    LoginArgs, RegisterArgs, SummaryArgs, TransactionCommands,
};
use budget_tracker::config::{paths::BudgetPaths, settings::Settings};
use budget_tracker::session::SessionFile;
use budget_tracker::storage::Storage;

#[derive(Parser)]
#[command(
    name = "budget",
    version,
    about = "Personal budget tracker",
    long_about = "Track income and expenses against a spending goal. Register, log in, \
                  record transactions by category, and see how much of your budget \
                  is left."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new account
    Register(RegisterArgs),

    /// Log in with email and password
    Login(LoginArgs),

    /// Log out the current user
    Logout,

    /// Show the logged-in user
    Whoami,

    /// Spending goal commands
    #[command(subcommand)]
    Goal(GoalCommands),

    /// Transaction commands
    #[command(subcommand, alias = "transaction")]
    Txn(TransactionCommands),

    /// Show the budget summary
    Summary(SummaryArgs),

    /// Show recent changes from the audit log
    History(HistoryArgs),

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let paths = BudgetPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let Some(command) = cli.command else {
        println!("Budget Tracker - personal budget tracking");
        println!();
        println!("Run 'budget --help' for usage information.");
        return Ok(());
    };

    match command {
        Commands::Config => print_config(&paths, &settings),
        command => run(command, &paths, &settings)?,
    }

    Ok(())
}

fn run(command: Commands, paths: &BudgetPaths, settings: &Settings) -> Result<()> {
    let storage = Storage::open_with_paths(paths, settings)?;
    if !paths.settings_file().exists() {
        settings.save(paths)?;
    }
    let session_file = SessionFile::from_paths(paths);
    let mut session = session_file.load()?;

    match command {
        Commands::Register(args) => handle_register(&storage, settings, args)?,
        Commands::Login(args) => handle_login(&storage, settings, &mut session, &session_file, args)?,
        Commands::Logout => handle_logout(&mut session, &session_file)?,
        Commands::Whoami => handle_whoami(&session)?,
        Commands::Goal(cmd) => handle_goal_command(&storage, settings, &session, cmd)?,
        Commands::Txn(cmd) => handle_transaction_command(&storage, settings, &session, cmd)?,
        Commands::Summary(args) => handle_summary_command(&storage, settings, &session, args)?,
        Commands::History(args) => handle_history_command(&storage, args)?,
        Commands::Config => print_config(paths, settings),
    }

    Ok(())
}

fn print_config(paths: &BudgetPaths, settings: &Settings) {
    println!("Budget Tracker Configuration");
    println!("============================");
    println!("Data directory: {}", paths.base_dir().display());
    println!("Database:       {}", paths.database_file().display());
    println!("Settings file:  {}", paths.settings_file().display());
    println!("Session file:   {}", paths.session_file().display());
    println!("Audit log:      {}", paths.audit_log().display());
    println!();
    println!("Settings:");
    println!("  Currency symbol: {}", settings.currency_symbol);
    println!(
        "  Chart size:      {}x{}",
        settings.chart.width, settings.chart.height
    );
    println!("  Audit enabled:   {}", settings.audit_enabled);
    println!(
        "  Password hash:   argon2id m={} t={} p={}",
        settings.password_hashing.memory_cost,
        settings.password_hashing.time_cost,
        settings.password_hashing.parallelism
    );
}
