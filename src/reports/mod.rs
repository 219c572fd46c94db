//! Reports module for the budget tracker
//!
//! Provides the budget summary and the spending pie chart drawn from it.

pub mod chart;
pub mod summary;

pub use chart::{render_pie_chart, ChartImage, PLACEHOLDER_URL};
pub use summary::{BudgetSummary, CategoryTotal};
