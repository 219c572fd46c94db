//! Budget summary report
//!
//! Totals a user's expenses per category and compares them to the budget
//! goal.

use std::collections::BTreeMap;

use crate::models::{Category, Money, Transaction, TransactionKind};

/// Expense total for one category
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub category: Category,
    pub total: Money,
    /// Share of total expense, 0-100
    pub percentage: f64,
}

/// Budget summary for one user
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetSummary {
    /// Expense totals per category, ordered by category label
    pub category_totals: Vec<CategoryTotal>,
    pub total_expense: Money,
    pub total_income: Money,
    pub budget_goal: Money,
    /// Goal minus total expense; negative when over budget
    pub remaining: Money,
}

impl BudgetSummary {
    /// Build a summary from a user's transactions and goal
    ///
    /// Only expenses count toward category totals and `remaining`. Income is
    /// totalled separately for display.
    pub fn generate(transactions: &[Transaction], budget_goal: Money) -> Self {
        let mut by_category: BTreeMap<Category, Money> = BTreeMap::new();
        let mut total_expense = Money::zero();
        let mut total_income = Money::zero();

        for txn in transactions {
            match txn.kind {
                TransactionKind::Expense => {
                    *by_category.entry(txn.category).or_default() += txn.amount;
                    total_expense += txn.amount;
                }
                TransactionKind::Income => total_income += txn.amount,
            }
        }

        let category_totals = by_category
            .into_iter()
            .map(|(category, total)| CategoryTotal {
                category,
                total,
                percentage: percentage_of(total, total_expense),
            })
            .collect();

        Self {
            category_totals,
            total_expense,
            total_income,
            budget_goal,
            remaining: budget_goal - total_expense,
        }
    }

    /// Whether expenses exceed the goal
    pub fn is_over_budget(&self) -> bool {
        self.remaining.is_negative()
    }

    /// Whether there is anything to chart
    pub fn has_expenses(&self) -> bool {
        !self.category_totals.is_empty()
    }

    /// Format the summary for terminal display
    pub fn format_terminal(&self, currency_symbol: &str) -> String {
        let money = |m: Money| m.format_with_symbol(currency_symbol);
        let mut output = String::new();

        output.push_str("Budget Summary\n");
        output.push_str(&"=".repeat(40));
        output.push('\n');
        output.push_str(&format!("{:<20} {:>19}\n", "Total Expenses:", money(self.total_expense)));
        output.push_str(&format!("{:<20} {:>19}\n", "Total Income:", money(self.total_income)));
        output.push_str(&format!("{:<20} {:>19}\n", "Budget Goal:", money(self.budget_goal)));
        output.push_str(&format!("{:<20} {:>19}\n", "Remaining Budget:", money(self.remaining)));

        if self.has_expenses() {
            output.push('\n');
            output.push_str(&format!("{:<20} {:>12} {:>6}\n", "Category", "Amount", "%"));
            output.push_str(&"-".repeat(40));
            output.push('\n');
            for row in &self.category_totals {
                output.push_str(&format!(
                    "{:<20} {:>12} {:>5.1}%\n",
                    row.category,
                    money(row.total),
                    row.percentage
                ));
            }
        } else {
            output.push_str("\nNo expenses recorded.\n");
        }

        output.push('\n');
        if self.is_over_budget() {
            output.push_str(&format!(
                "You are over budget by {}!\n",
                money(self.remaining.abs())
            ));
        } else {
            output.push_str("You are within your budget.\n");
        }

        output
    }
}

fn percentage_of(part: Money, whole: Money) -> f64 {
    if whole.is_zero() {
        0.0
    } else {
        (part.cents() as f64 / whole.cents() as f64) * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TransactionId, UserId};

    fn txn(id: i64, dollars: i64, category: Category, kind: TransactionKind) -> Transaction {
        Transaction {
            id: TransactionId::new(id),
            user_id: UserId::new(1),
            amount: Money::from_dollars(dollars),
            category,
            kind,
        }
    }

    #[test]
    fn test_over_budget_summary() {
        let transactions = vec![
            txn(1, 100, Category::Food, TransactionKind::Expense),
            txn(2, 50, Category::Food, TransactionKind::Expense),
            txn(3, 200, Category::Rent, TransactionKind::Expense),
        ];

        let summary = BudgetSummary::generate(&transactions, Money::from_dollars(300));

        assert_eq!(summary.category_totals.len(), 2);
        assert_eq!(summary.category_totals[0].category, Category::Food);
        assert_eq!(summary.category_totals[0].total, Money::from_dollars(150));
        assert_eq!(summary.category_totals[1].category, Category::Rent);
        assert_eq!(summary.category_totals[1].total, Money::from_dollars(200));
        assert_eq!(summary.total_expense, Money::from_dollars(350));
        assert_eq!(summary.remaining, Money::from_dollars(-50));
        assert!(summary.is_over_budget());
    }

    #[test]
    fn test_empty_summary() {
        let summary = BudgetSummary::generate(&[], Money::from_dollars(500));

        assert!(summary.category_totals.is_empty());
        assert!(!summary.has_expenses());
        assert_eq!(summary.total_expense, Money::zero());
        assert_eq!(summary.remaining, Money::from_dollars(500));
        assert!(!summary.is_over_budget());
    }

    #[test]
    fn test_income_is_excluded_from_totals() {
        let transactions = vec![
            txn(1, 1000, Category::Others, TransactionKind::Income),
            txn(2, 40, Category::Transport, TransactionKind::Expense),
        ];

        let summary = BudgetSummary::generate(&transactions, Money::from_dollars(100));

        assert_eq!(summary.category_totals.len(), 1);
        assert_eq!(summary.category_totals[0].category, Category::Transport);
        assert_eq!(summary.total_expense, Money::from_dollars(40));
        assert_eq!(summary.total_income, Money::from_dollars(1000));
        assert_eq!(summary.remaining, Money::from_dollars(60));
    }

    #[test]
    fn test_only_income_has_no_expenses() {
        let transactions = vec![txn(1, 10, Category::Food, TransactionKind::Income)];

        let summary = BudgetSummary::generate(&transactions, Money::zero());

        assert!(!summary.has_expenses());
        assert_eq!(summary.remaining, Money::zero());
        assert!(!summary.is_over_budget());
    }

    #[test]
    fn test_categories_sorted_by_label() {
        let transactions = vec![
            txn(1, 5, Category::Transport, TransactionKind::Expense),
            txn(2, 5, Category::Entertainment, TransactionKind::Expense),
            txn(3, 5, Category::Rent, TransactionKind::Expense),
            txn(4, 5, Category::Food, TransactionKind::Expense),
        ];

        let summary = BudgetSummary::generate(&transactions, Money::zero());
        let labels: Vec<_> = summary
            .category_totals
            .iter()
            .map(|row| row.category.as_str())
            .collect();

        assert_eq!(labels, vec!["Entertainment", "Food", "Rent", "Transport"]);
    }

    #[test]
    fn test_percentages_sum_to_hundred() {
        let transactions = vec![
            txn(1, 150, Category::Food, TransactionKind::Expense),
            txn(2, 200, Category::Rent, TransactionKind::Expense),
        ];

        let summary = BudgetSummary::generate(&transactions, Money::zero());
        let sum: f64 = summary.category_totals.iter().map(|r| r.percentage).sum();

        assert!((sum - 100.0).abs() < 1e-9);
        assert!((summary.category_totals[1].percentage - 57.142857).abs() < 1e-4);
    }

    #[test]
    fn test_exactly_at_goal_is_within_budget() {
        let transactions = vec![txn(1, 300, Category::Rent, TransactionKind::Expense)];

        let summary = BudgetSummary::generate(&transactions, Money::from_dollars(300));

        assert_eq!(summary.remaining, Money::zero());
        assert!(!summary.is_over_budget());
    }

    #[test]
    fn test_format_terminal() {
        let transactions = vec![
            txn(1, 150, Category::Food, TransactionKind::Expense),
            txn(2, 200, Category::Rent, TransactionKind::Expense),
        ];
        let summary = BudgetSummary::generate(&transactions, Money::from_dollars(300));

        let output = summary.format_terminal("$");

        assert!(output.contains("$350.00"));
        assert!(output.contains("-$50.00"));
        assert!(output.contains("Food"));
        assert!(output.contains("57.1%"));
        assert!(output.contains("over budget by $50.00"));
    }

    #[test]
    fn test_format_terminal_within_budget() {
        let summary = BudgetSummary::generate(&[], Money::from_dollars(20));

        let output = summary.format_terminal("€");

        assert!(output.contains("€20.00"));
        assert!(output.contains("No expenses recorded."));
        assert!(output.contains("within your budget"));
    }
}
