//! # Cash Reconciliation
//!
//! Compares the cash the operator counted against what the drawer should
//! hold.
//!
//! ## The Formula
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   expected = (gross revenue − e-wallet) − expenses + starting float     │
//! │              └────── cash sales ───────┘                                │
//! │                                                                         │
//! │   variance = actual counted − expected                                  │
//! │                                                                         │
//! │   |variance| ≤ tolerance  →  Balanced                                  │
//! │    variance  > 0          →  Over   (more cash than expected)          │
//! │    variance  < 0          →  Short  (cash missing)                     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! E-wallet receipts never touch the drawer. Expenses are cash that left
//! it. Everything is integer cents, so a zero tolerance is an exact match
//! to the cent.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::aggregate::SalesSummary;
use crate::money::Money;

// =============================================================================
// Inputs
// =============================================================================

/// Operator-entered drawer amounts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CashCount {
    /// Float the drawer opened with.
    pub starting_cash: Money,
    /// Cash physically counted at close.
    pub actual_cash: Money,
}

impl CashCount {
    pub fn new(starting_cash: Money, actual_cash: Money) -> Self {
        CashCount {
            starting_cash,
            actual_cash,
        }
    }

    /// Reads the two input fields leniently.
    ///
    /// Blank or unreadable text is zero. This can hide a forgotten entry;
    /// the report still renders.
    pub fn from_inputs(starting_cash: &str, actual_cash: &str) -> Self {
        CashCount {
            starting_cash: Money::parse_lenient(starting_cash),
            actual_cash: Money::parse_lenient(actual_cash),
        }
    }
}

// =============================================================================
// Status
// =============================================================================

/// Outcome of the drawer count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum VarianceStatus {
    Balanced,
    Over,
    Short,
}

impl VarianceStatus {
    /// Classifies a variance, treating anything within `tolerance` as
    /// balanced.
    pub fn classify(variance: Money, tolerance: Money) -> Self {
        if variance.abs() <= tolerance.abs() {
            VarianceStatus::Balanced
        } else if variance.is_positive() {
            VarianceStatus::Over
        } else {
            VarianceStatus::Short
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            VarianceStatus::Balanced => "Balanced",
            VarianceStatus::Over => "Over",
            VarianceStatus::Short => "Short",
        }
    }
}

// =============================================================================
// Result
// =============================================================================

/// Full reconciliation, recomputed on demand and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ReconciliationResult {
    pub gross_revenue: Money,
    pub e_wallet_total: Money,
    /// Gross revenue less e-wallet receipts.
    pub cash_total: Money,
    pub total_expenses: Money,
    pub starting_cash: Money,
    pub expected_cash: Money,
    pub actual_cash: Money,
    /// Actual minus expected; positive is a surplus.
    pub variance: Money,
    pub status: VarianceStatus,
}

/// Cash the drawer should hold.
pub fn expected_cash(
    gross_revenue: Money,
    e_wallet_total: Money,
    total_expenses: Money,
    starting_cash: Money,
) -> Money {
    (gross_revenue - e_wallet_total) - total_expenses + starting_cash
}

/// Reconciles a window's sales against the counted drawer.
pub fn reconcile(
    summary: &SalesSummary,
    total_expenses: Money,
    cash: CashCount,
    tolerance: Money,
) -> ReconciliationResult {
    let gross_revenue = summary.total_revenue;
    let e_wallet_total = summary.total_e_wallet;
    let expected = expected_cash(gross_revenue, e_wallet_total, total_expenses, cash.starting_cash);
    let variance = cash.actual_cash - expected;

    ReconciliationResult {
        gross_revenue,
        e_wallet_total,
        cash_total: gross_revenue - e_wallet_total,
        total_expenses,
        starting_cash: cash.starting_cash,
        expected_cash: expected,
        actual_cash: cash.actual_cash,
        variance,
        status: VarianceStatus::classify(variance, tolerance),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(gross: i64, e_wallet: i64) -> SalesSummary {
        SalesSummary {
            total_revenue: Money::from_major(gross),
            total_e_wallet: Money::from_major(e_wallet),
            total_cash: Money::from_major(gross - e_wallet),
            ..SalesSummary::default()
        }
    }

    #[test]
    fn test_balanced_drawer() {
        let cash = CashCount::new(Money::from_major(200), Money::from_major(850));
        let result = reconcile(&summary(1000, 300), Money::from_major(50), cash, Money::zero());

        assert_eq!(result.expected_cash, Money::from_major(850));
        assert_eq!(result.cash_total, Money::from_major(700));
        assert!(result.variance.is_zero());
        assert_eq!(result.status, VarianceStatus::Balanced);
    }

    #[test]
    fn test_over_and_short() {
        let over = reconcile(
            &summary(1000, 300),
            Money::from_major(50),
            CashCount::new(Money::from_major(200), Money::from_major(900)),
            Money::zero(),
        );
        assert_eq!(over.variance, Money::from_major(50));
        assert_eq!(over.status, VarianceStatus::Over);

        let short = reconcile(
            &summary(1000, 300),
            Money::from_major(50),
            CashCount::new(Money::from_major(200), Money::from_major(800)),
            Money::zero(),
        );
        assert_eq!(short.variance, Money::from_major(-50));
        assert_eq!(short.status, VarianceStatus::Short);
    }

    #[test]
    fn test_tolerance() {
        assert_eq!(
            VarianceStatus::classify(Money::from_cents(-1), Money::from_cents(1)),
            VarianceStatus::Balanced
        );
        assert_eq!(
            VarianceStatus::classify(Money::from_cents(-2), Money::from_cents(1)),
            VarianceStatus::Short
        );
        assert_eq!(
            VarianceStatus::classify(Money::from_cents(1), Money::zero()),
            VarianceStatus::Over
        );
    }

    #[test]
    fn test_unreadable_inputs_are_zero() {
        let cash = CashCount::from_inputs("", "lots");
        assert!(cash.starting_cash.is_zero());
        assert!(cash.actual_cash.is_zero());

        let result = reconcile(&summary(100, 0), Money::zero(), cash, Money::zero());
        assert_eq!(result.variance, Money::from_major(-100));
        assert_eq!(result.status, VarianceStatus::Short);
    }

    #[test]
    fn test_decimal_inputs_balance_exactly() {
        let summary = SalesSummary {
            total_revenue: Money::parse_lenient("1000.10"),
            total_e_wallet: Money::parse_lenient("300.05"),
            ..SalesSummary::default()
        };
        let cash = CashCount::from_inputs("200", "850.00");
        let result = reconcile(&summary, Money::parse_lenient("50.05"), cash, Money::zero());

        assert_eq!(result.status, VarianceStatus::Balanced);
    }
}
