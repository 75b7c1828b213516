//! # Expense Ledger
//!
//! Cash taken out of the drawer during the current shift (ice, gas refill,
//! change runs).
//!
//! ## Scope
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  The ledger belongs to the open session, NOT to a date.                 │
//! │                                                                         │
//! │  • Switching the report window leaves it untouched                     │
//! │  • It is never persisted; a reload starts empty                        │
//! │  • Its sum feeds expected cash in every reconciliation                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::validation::{validate_expense_amount, validate_expense_description};

/// One cash outflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ExpenseEntry {
    pub description: String,
    pub amount: Money,
}

/// Ordered list of the shift's expenses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ExpenseLedger {
    entries: Vec<ExpenseEntry>,
}

impl ExpenseLedger {
    pub fn new() -> Self {
        ExpenseLedger::default()
    }

    /// Appends an expense.
    ///
    /// ## Errors
    /// - `Blank` when the description is empty after trimming
    /// - `MustBePositive` when the amount is zero or negative
    ///
    /// The ledger is unchanged on error.
    pub fn add(&mut self, description: &str, amount: Money) -> CoreResult<&ExpenseEntry> {
        let description = validate_expense_description(description)?;
        validate_expense_amount(amount)?;

        self.entries.push(ExpenseEntry {
            description,
            amount,
        });
        let index = self.entries.len() - 1;
        Ok(&self.entries[index])
    }

    /// Removes the expense at `index`.
    pub fn remove(&mut self, index: usize) -> CoreResult<ExpenseEntry> {
        if index >= self.entries.len() {
            return Err(CoreError::ExpenseOutOfRange {
                index,
                len: self.entries.len(),
            });
        }
        Ok(self.entries.remove(index))
    }

    /// Running total of all entries.
    pub fn sum(&self) -> Money {
        self.entries.iter().map(|e| e.amount).sum()
    }

    pub fn entries(&self) -> &[ExpenseEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
