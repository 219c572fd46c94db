//! Budget Tracker - personal budget tracking from the command line
//!
//! Users register, log in, set a spending goal, and record income and
//! expense transactions. The summary report compares expenses against the
//! goal and can draw a per-category pie chart.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (users, transactions, money, categories)
//! - `storage`: SQLite storage layer
//! - `services`: Business logic layer
//! - `reports`: Budget summary and pie chart
//! - `session`: Logged-in identity shared between commands
//! - `audit`: Audit logging system
//!
//! # Example
//!
//! ```rust,ignore
//! use budget_tracker::config::{paths::BudgetPaths, settings::Settings};
//! use budget_tracker::storage::Storage;
//!
//! let paths = BudgetPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let storage = Storage::open_with_paths(&paths, &settings)?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod crypto;
pub mod display;
pub mod error;
pub mod models;
pub mod reports;
pub mod services;
pub mod session;
pub mod storage;

pub use error::{BudgetError, BudgetResult};
