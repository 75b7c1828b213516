//! # Dashboard Report
//!
//! Everything the dashboard shows for one report window, assembled from the
//! pure core functions in a single pass.
//!
//! ## Assembly
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  sales ──► filter_sales(window) ─┬─► summarize ──┬─► top_sellers        │
//! │                                  │               └─► reconcile ◄── cash │
//! │                                  │                        ▲             │
//! │                                  └─► audit rows           │             │
//! │                                      (newest first)   expenses.sum()    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Reports are never cached; every call recomputes from the current state,
//! so a void is reflected in the next report immediately.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tally_core::aggregate::{filter_sales, summarize};
use tally_core::{
    reconcile, top_sellers, CashCount, DateRange, ExpenseLedger, Money, PaymentMethod,
    ReconciliationResult, ReportWindow, Sale, SaleId, SalesSummary, TopSeller,
};
use ts_rs::TS;
use uuid::Uuid;

use crate::config::SessionConfig;

// =============================================================================
// Audit Row
// =============================================================================

/// One sale in the audit table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct AuditRow {
    pub sale_id: SaleId,
    #[ts(as = "Option<String>")]
    pub date: Option<DateTime<Utc>>,
    /// Operator name, `"System"` when none was recorded.
    pub cashier: String,
    /// e.g. `"3x Coke, 1x Bread"`
    pub items: String,
    pub total: Money,
    pub payment_method: PaymentMethod,
}

impl From<&Sale> for AuditRow {
    fn from(sale: &Sale) -> Self {
        AuditRow {
            sale_id: sale.id,
            date: sale.date,
            cashier: sale.cashier_name().to_string(),
            items: sale.item_summary(),
            total: sale.total,
            payment_method: sale.payment_method,
        }
    }
}

/// Audit rows for the matching sales, most recent first.
///
/// Sales are stored in checkout order, so this is the stored order reversed.
pub fn audit_rows(matching: &[&Sale]) -> Vec<AuditRow> {
    matching.iter().rev().map(|sale| AuditRow::from(*sale)).collect()
}

// =============================================================================
// Dashboard Report
// =============================================================================

/// What was asked for: the picked dates, the resolved window and its label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ReportRequest {
    pub range: DateRange,
    pub window: ReportWindow,
    pub label: String,
}

/// The full dashboard for one window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DashboardReport {
    #[ts(as = "String")]
    pub session_id: Uuid,
    pub request: ReportRequest,
    pub summary: SalesSummary,
    pub top_sellers: Vec<TopSeller>,
    pub audit: Vec<AuditRow>,
    pub expenses: ExpenseLedger,
    pub reconciliation: ReconciliationResult,
}

impl DashboardReport {
    /// Builds the report from current data.
    ///
    /// The expense ledger and cash count are the session's, whatever the
    /// window: they describe the drawer right now.
    pub fn assemble(
        session_id: Uuid,
        request: ReportRequest,
        sales: &[Sale],
        expenses: &ExpenseLedger,
        cash: CashCount,
        config: &SessionConfig,
    ) -> Self {
        let matching = filter_sales(sales, &request.window);
        let summary = summarize(matching.iter().copied());
        let tolerance = config.balance_tolerance();

        DashboardReport {
            session_id,
            top_sellers: top_sellers(&summary.item_counts, config.top_seller_limit()),
            audit: audit_rows(&matching),
            expenses: expenses.clone(),
            reconciliation: reconcile(&summary, expenses.sum(), cash, tolerance),
            summary,
            request,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};
    use tally_core::{SaleItem, VarianceStatus, WindowKind};

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, hour, 0, 0).unwrap()
    }

    fn sale(id: SaleId, hour: u32, total: i64, method: PaymentMethod) -> Sale {
        Sale {
            id,
            date: Some(at(hour)),
            items: vec![SaleItem::new(1, "Coke", 1)],
            total: Money::from_major(total),
            profit: Money::zero(),
            tax: Money::zero(),
            payment_method: method,
            cashier: None,
        }
    }

    fn request(start: u32, end: u32) -> ReportRequest {
        let day = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        ReportRequest {
            range: DateRange::single(day),
            window: ReportWindow {
                start: at(start),
                end: at(end),
                kind: WindowKind::LiveShift,
            },
            label: "2024-05-01".to_string(),
        }
    }

    #[test]
    fn test_audit_rows_are_newest_first() {
        let sales = vec![
            sale(1, 9, 10, PaymentMethod::Cash),
            sale(2, 10, 20, PaymentMethod::Cash),
            sale(3, 11, 30, PaymentMethod::EWallet),
        ];
        let matching: Vec<&Sale> = sales.iter().collect();

        let rows = audit_rows(&matching);
        assert_eq!(rows.iter().map(|r| r.sale_id).collect::<Vec<_>>(), vec![3, 2, 1]);
        assert_eq!(rows[0].cashier, "System");
        assert_eq!(rows[0].items, "1x Coke");
    }

    #[test]
    fn test_assemble_reconciles_window_sales() {
        let sales = vec![
            sale(1, 7, 500, PaymentMethod::Cash), // before the shift
            sale(2, 9, 700, PaymentMethod::Cash),
            sale(3, 10, 300, PaymentMethod::EWallet),
        ];
        let mut expenses = ExpenseLedger::new();
        expenses.add("Ice", Money::from_major(50)).unwrap();
        let cash = CashCount::new(Money::from_major(200), Money::from_major(850));

        let report = DashboardReport::assemble(
            Uuid::new_v4(),
            request(8, 12),
            &sales,
            &expenses,
            cash,
            &SessionConfig::default(),
        );

        assert_eq!(report.summary.sale_count, 2);
        assert_eq!(report.reconciliation.gross_revenue, Money::from_major(1000));
        assert_eq!(report.reconciliation.expected_cash, Money::from_major(850));
        assert_eq!(report.reconciliation.status, VarianceStatus::Balanced);
        assert_eq!(report.top_sellers[0].count, 2);
        assert_eq!(report.audit.len(), 2);
    }

    #[test]
    fn test_configured_tolerance_and_limit_apply() {
        let mut bread = sale(2, 10, 300, PaymentMethod::Cash);
        bread.items = vec![SaleItem::new(2, "Bread", 1)];
        let sales = vec![sale(1, 9, 700, PaymentMethod::Cash), bread];
        let cash = CashCount::new(Money::zero(), Money::from_cents(99_950));

        let strict = DashboardReport::assemble(
            Uuid::nil(),
            request(8, 12),
            &sales,
            &ExpenseLedger::new(),
            cash,
            &SessionConfig::default(),
        );
        assert_eq!(strict.reconciliation.status, VarianceStatus::Short);
        assert_eq!(strict.top_sellers.len(), 2);

        let mut config = SessionConfig::default();
        config.report.balance_tolerance_cents = 100;
        config.report.top_seller_limit = 1;
        let lenient = DashboardReport::assemble(
            Uuid::nil(),
            request(8, 12),
            &sales,
            &ExpenseLedger::new(),
            cash,
            &config,
        );
        assert_eq!(lenient.reconciliation.status, VarianceStatus::Balanced);
        assert_eq!(lenient.top_sellers.len(), 1);
    }

    #[test]
    fn test_report_serializes_camel_case() {
        let report = DashboardReport::assemble(
            Uuid::nil(),
            request(8, 12),
            &[],
            &ExpenseLedger::new(),
            CashCount::default(),
            &SessionConfig::default(),
        );

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["reconciliation"]["status"], "Balanced");
        assert_eq!(json["summary"]["saleCount"], 0);
        assert!(json["topSellers"].as_array().unwrap().is_empty());
    }
}
