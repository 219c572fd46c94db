//! Authentication CLI commands
//!
//! Registration, login and logout. Passwords are read from the command line,
//! the `BUDGET_TRACKER_PASSWORD` environment variable, or a hidden prompt.

use clap::Args;

use crate::config::settings::Settings;
use crate::crypto::SecureString;
use crate::error::{BudgetError, BudgetResult};
use crate::services::AuthService;
use crate::session::{Session, SessionFile};
use crate::storage::Storage;

/// Environment variable that supplies a password non-interactively
pub const PASSWORD_ENV: &str = "BUDGET_TRACKER_PASSWORD";

#[derive(Args)]
pub struct RegisterArgs {
    /// Username to register
    #[arg(short, long)]
    pub username: String,

    /// Email address used to log in
    #[arg(short, long)]
    pub email: String,

    /// Password (prompted for, with confirmation, if omitted)
    #[arg(long, env = PASSWORD_ENV, hide_env_values = true)]
    pub password: Option<String>,
}

#[derive(Args)]
pub struct LoginArgs {
    /// Email address
    #[arg(short, long)]
    pub email: String,

    /// Password (prompted for if omitted)
    #[arg(long, env = PASSWORD_ENV, hide_env_values = true)]
    pub password: Option<String>,
}

/// Handle `register`
pub fn handle_register(storage: &Storage, settings: &Settings, args: RegisterArgs) -> BudgetResult<()> {
    let password = match args.password {
        Some(password) => SecureString::new(password),
        None => {
            let password = prompt("Password: ")?;
            let confirm = prompt("Confirm password: ")?;
            check_confirmation(&password, &confirm)?;
            password
        }
    };

    let user = AuthService::new(storage, settings).register(&args.username, &args.email, &password)?;

    println!("Registered user '{}' ({})", user.username, user.email);
    println!("Run 'budget login --email {}' to log in.", user.email);
    Ok(())
}

/// Handle `login`
pub fn handle_login(
    storage: &Storage,
    settings: &Settings,
    session: &mut Session,
    session_file: &SessionFile,
    args: LoginArgs,
) -> BudgetResult<()> {
    let password = match args.password {
        Some(password) => SecureString::new(password),
        None => prompt("Password: ")?,
    };

    let identity = session.login(storage, settings, &args.email, &password)?;
    println!("Logged in as {}", identity.username);

    session_file.save(session)
}

/// Handle `logout`
pub fn handle_logout(session: &mut Session, session_file: &SessionFile) -> BudgetResult<()> {
    match session.logout() {
        Some(identity) => println!("Logged out {}", identity.username),
        None => println!("Not logged in."),
    }
    session_file.save(session)
}

/// Handle `whoami`
pub fn handle_whoami(session: &Session) -> BudgetResult<()> {
    match session.current() {
        Some(identity) => println!("{} ({})", identity.username, identity.user_id),
        None => println!("{}", session.username()),
    }
    Ok(())
}

fn prompt(label: &str) -> BudgetResult<SecureString> {
    rpassword::prompt_password(label)
        .map(SecureString::new)
        .map_err(|e| BudgetError::Io(format!("Failed to read password: {}", e)))
}

fn check_confirmation(password: &SecureString, confirm: &SecureString) -> BudgetResult<()> {
    if password != confirm {
        return Err(BudgetError::Validation("Passwords do not match".into()));
    }
    Ok(())
}
