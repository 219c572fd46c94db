//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod auth;
pub mod goal;
pub mod report;
pub mod transaction;

pub use auth::{handle_login, handle_logout, handle_register, handle_whoami, LoginArgs, RegisterArgs};
pub use goal::{handle_goal_command, GoalCommands};
pub use report::{handle_history_command, handle_summary_command, HistoryArgs, SummaryArgs};
pub use transaction::{handle_transaction_command, TransactionCommands};
