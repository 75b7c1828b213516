use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde_json::json;
use tempfile::tempdir;

use tally_core::{QuickRange, VarianceStatus};
use tally_session::{
    ApiError, ErrorCode, JsonFileStore, ReconciliationSession, SessionConfig, ShiftContext,
    StateStore,
};

fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, hour, minute, 0).unwrap()
}

/// State as the checkout screen writes it, quirks included.
fn stored_state() -> serde_json::Value {
    json!({
        "products": [
            { "id": 101, "name": "Coke", "category": "Drinks", "price": 25, "cost": 18, "qty": 10 },
            { "id": 102, "name": "Bread", "category": "Bakery", "price": "40", "cost": 30, "qty": 5 }
        ],
        "sales": [
            {
                "id": 1714550400000_i64,
                "date": "2024-05-01T08:00:00.000Z",
                "items": [{ "id": 101, "name": "Coke", "count": 2 }],
                "total": 50, "profit": 14, "tax": 0,
                "paymentMethod": "Cash", "cashier": "Ben"
            },
            {
                "id": 1714557600000_i64,
                "date": "2024-05-01T10:00:00.000Z",
                "items": [
                    { "id": 101, "name": "Coke", "count": 3 },
                    { "productId": 102, "name": "Bread", "qty": 2 }
                ],
                "total": "700", "profit": 100, "tax": 12,
                "paymentMethod": "Cash", "cashier": "Ana"
            },
            {
                "id": 1714561200000_i64,
                "date": "2024-05-01T11:00:00.000Z",
                "items": [{ "id": 102, "name": "Bread", "count": 1 }],
                "total": 300, "profit": 40, "tax": 5,
                "paymentMethod": "E-Wallet"
            },
            {
                "id": 1714564800000_i64,
                "date": "2024-05-01T12:00:00.000Z",
                "items": [{ "id": 101, "name": "Coke", "count": 4 }],
                "total": "n/a", "profit": 0, "tax": 0,
                "paymentMethod": "Cash"
            }
        ],
        "inventoryLogs": [],
        "rawMaterials": [{ "id": 7, "name": "Flour", "qty": "50kg", "expiry": "2024-06-01" }],
        "employees": [{ "id": 1001, "name": "Admin", "pin": "0000", "role": "Admin" }]
    })
}

#[test]
fn full_shift_reconciles_voids_and_persists() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("backoffice.json");
    std::fs::write(&path, serde_json::to_string_pretty(&stored_state()).unwrap()).unwrap();

    let shift = ShiftContext::new(Some("Ana".to_string()), Some(at(9, 0)));
    let mut session =
        ReconciliationSession::open(JsonFileStore::new(&path), shift, SessionConfig::default(), Utc)
            .unwrap();

    session.set_cash_inputs("200", "850");
    session.add_expense("Ice", "50").unwrap();

    // Live shift: 09:00 to 12:30, the 08:00 sale belongs to the last shift
    let report = session.quick_report(QuickRange::Today, at(12, 30));
    assert_eq!(report.summary.sale_count, 3);
    assert_eq!(report.reconciliation.gross_revenue.cents(), 100_000);
    assert_eq!(report.reconciliation.e_wallet_total.cents(), 30_000);
    assert_eq!(report.reconciliation.expected_cash.cents(), 85_000);
    assert_eq!(report.reconciliation.status, VarianceStatus::Balanced);

    // The unreadable total still counts its items
    assert_eq!(report.top_sellers[0].name, "Coke");
    assert_eq!(report.top_sellers[0].count, 7);
    assert_eq!(report.audit[0].sale_id, 1714564800000);

    // Void the 10:00 sale
    let outcome = session.void_transaction(1714557600000, at(12, 35)).unwrap();
    assert_eq!(outcome.restored.len(), 2);

    let after = session.quick_report(QuickRange::Today, at(12, 40));
    assert_eq!(after.summary.sale_count, 2);
    assert_eq!(after.reconciliation.status, VarianceStatus::Over);
    assert_eq!(after.reconciliation.variance.cents(), 70_000);

    // Second void is refused
    let err: ApiError = session
        .void_transaction(1714557600000, at(12, 41))
        .unwrap_err()
        .into();
    assert_eq!(err.code, ErrorCode::NotFound);

    // What landed on disk
    let reloaded = JsonFileStore::new(&path).load().unwrap();
    assert_eq!(reloaded.products.get(101).map(|p| p.qty), Some(13));
    assert_eq!(reloaded.products.get(102).map(|p| p.qty), Some(7));
    assert_eq!(reloaded.sales.len(), 3);
    assert_eq!(reloaded.inventory_logs.len(), 1);
    assert_eq!(reloaded.inventory_logs[0].user, "Ana");
    assert!(reloaded.extra.contains_key("rawMaterials"));
    assert!(reloaded.extra.contains_key("employees"));
}

#[test]
fn historical_range_ignores_shift_start() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("backoffice.json");
    std::fs::write(&path, stored_state().to_string()).unwrap();

    let shift = ShiftContext::new(None, Some(at(9, 0)));
    let session =
        ReconciliationSession::open(JsonFileStore::new(&path), shift, SessionConfig::default(), Utc)
            .unwrap();

    // Viewed the next day, May 1 is a full calendar day
    let next_day = Utc.with_ymd_and_hms(2024, 5, 2, 9, 0, 0).unwrap();
    let may1 = NaiveDate::from_ymd_opt(2024, 5, 1);
    let report = session.report_for_inputs(may1, may1, next_day).unwrap();

    assert_eq!(report.summary.sale_count, 4);
    assert_eq!(report.summary.total_cash.cents(), 75_000);
    assert_eq!(report.summary.total_e_wallet.cents(), 30_000);
    assert_eq!(report.summary.total_tax.cents(), 1_700);
}

#[test]
fn fresh_install_starts_empty() {
    let dir = tempdir().unwrap();
    let session = ReconciliationSession::open(
        JsonFileStore::new(dir.path().join("missing.json")),
        ShiftContext::default(),
        SessionConfig::default(),
        Utc,
    )
    .unwrap();

    let report = session.quick_report(QuickRange::Month, at(12, 0));
    assert_eq!(report.summary.sale_count, 0);
    assert!(report.top_sellers.is_empty());
    assert!(report.audit.is_empty());
}
