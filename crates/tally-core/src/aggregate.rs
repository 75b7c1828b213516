//! # Sales Aggregation
//!
//! Filters sales by report window and rolls them up into totals.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │   sales ──► filter(start ≤ date ≤ end) ──► fold ──► SalesSummary        │
//! │                                                                         │
//! │   per sale:  revenue += total     profit += profit     tax += tax       │
//! │              E-Wallet ? e_wallet += total : cash += total               │
//! │              item_counts[name] += count   (every line)                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Summaries are additive: the summary of two disjoint sets of sales is the
//! componentwise sum of their summaries. [`SalesSummary::merge`] is that sum.
//!
//! Item counts are keyed by display name, not product id. Two products that
//! share a name are reported together.

use std::ops::Add;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::Sale;
use crate::window::ReportWindow;

// =============================================================================
// Item Counts
// =============================================================================

/// Units sold for one display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ItemCount {
    pub name: String,
    pub count: i64,
}

/// Name → units sold, in first-seen order.
///
/// The order matters: it is the tie-break for the top-seller ranking.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ItemCounts(Vec<ItemCount>);

impl ItemCounts {
    pub fn new() -> Self {
        ItemCounts::default()
    }

    /// Adds `count` units under `name`, appending the name if unseen.
    pub fn add(&mut self, name: &str, count: i64) {
        match self.0.iter_mut().find(|entry| entry.name == name) {
            Some(entry) => entry.count = entry.count.saturating_add(count),
            None => self.0.push(ItemCount {
                name: name.to_string(),
                count,
            }),
        }
    }

    pub fn get(&self, name: &str) -> Option<i64> {
        self.0
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.count)
    }

    /// Folds another set of counts in, keeping this set's order first.
    pub fn merge(&mut self, other: &ItemCounts) {
        for entry in &other.0 {
            self.add(&entry.name, entry.count);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ItemCount> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> FromIterator<(&'a str, i64)> for ItemCounts {
    fn from_iter<I: IntoIterator<Item = (&'a str, i64)>>(iter: I) -> Self {
        let mut counts = ItemCounts::new();
        for (name, count) in iter {
            counts.add(name, count);
        }
        counts
    }
}

// =============================================================================
// Sales Summary
// =============================================================================

/// Totals over a set of sales.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SalesSummary {
    pub sale_count: usize,
    pub total_revenue: Money,
    pub total_profit: Money,
    pub total_tax: Money,
    pub total_cash: Money,
    pub total_e_wallet: Money,
    pub item_counts: ItemCounts,
}

impl SalesSummary {
    /// Adds one sale.
    ///
    /// Unreadable money on the record already reads as zero, so the sale
    /// still counts toward `sale_count` and the item counts.
    pub fn record(&mut self, sale: &Sale) {
        self.sale_count += 1;
        self.total_revenue += sale.total;
        self.total_profit += sale.profit;
        self.total_tax += sale.tax;

        if sale.payment_method.is_cash() {
            self.total_cash += sale.total;
        } else {
            self.total_e_wallet += sale.total;
        }

        for item in &sale.items {
            self.item_counts.add(&item.name, item.count);
        }
    }

    /// Componentwise sum with another summary.
    pub fn merge(&mut self, other: &SalesSummary) {
        self.sale_count += other.sale_count;
        self.total_revenue += other.total_revenue;
        self.total_profit += other.total_profit;
        self.total_tax += other.total_tax;
        self.total_cash += other.total_cash;
        self.total_e_wallet += other.total_e_wallet;
        self.item_counts.merge(&other.item_counts);
    }
}

impl Add for SalesSummary {
    type Output = SalesSummary;

    fn add(mut self, other: SalesSummary) -> SalesSummary {
        self.merge(&other);
        self
    }
}

// =============================================================================
// Operations
// =============================================================================

/// Sales whose date falls inside `window`, in stored order.
///
/// Sales with an unreadable date never match.
pub fn filter_sales<'a>(sales: &'a [Sale], window: &ReportWindow) -> Vec<&'a Sale> {
    sales
        .iter()
        .filter(|sale| sale.date.is_some_and(|at| window.contains(at)))
        .collect()
}

/// Rolls any set of sales into a summary.
pub fn summarize<'a, I>(sales: I) -> SalesSummary
where
    I: IntoIterator<Item = &'a Sale>,
{
    let mut summary = SalesSummary::default();
    for sale in sales {
        summary.record(sale);
    }
    summary
}

/// Summary of the sales inside `window`.
///
/// ## Example
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use tally_core::aggregate::aggregate;
/// use tally_core::window::{ReportWindow, WindowKind};
///
/// let window = ReportWindow {
///     start: Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap(),
///     end: Utc.with_ymd_and_hms(2024, 5, 1, 23, 59, 59).unwrap(),
///     kind: WindowKind::Calendar,
/// };
/// let summary = aggregate(&[], &window);
/// assert_eq!(summary.sale_count, 0);
/// assert!(summary.total_revenue.is_zero());
/// ```
pub fn aggregate(sales: &[Sale], window: &ReportWindow) -> SalesSummary {
    summarize(filter_sales(sales, window))
}

// =============================================================================
// Unit Tests
// =============================================================================
