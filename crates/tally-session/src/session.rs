//! # Reconciliation Session
//!
//! The one object that owns the back-office state for an operator's shift.
//!
//! ## Ownership
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    ReconciliationSession                                │
//! │                                                                         │
//! │  ┌──────────────────┐  ┌──────────────┐  ┌──────────────────────────┐  │
//! │  │ BackOfficeState  │  │ ShiftContext │  │ Session-local            │  │
//! │  │ (durable)        │  │ operator     │  │ ExpenseLedger            │  │
//! │  │ products, sales, │  │ shift_start  │  │ CashCount                │  │
//! │  │ activity log     │  └──────────────┘  │ (never persisted)        │  │
//! │  └────────┬─────────┘                    └──────────────────────────┘  │
//! │           │ save_all after every durable mutation                       │
//! │           ▼                                                             │
//! │  ┌──────────────────┐                                                   │
//! │  │   StateStore     │                                                   │
//! │  └──────────────────┘                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Scoped Transaction
//! Durable mutations go through [`ReconciliationSession::transaction`]:
//! the closure validates and mutates, and only if it succeeds is the whole
//! state handed to the store. A rejected operation has changed nothing and
//! saves nothing.

use std::fmt;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use tally_core::window::{resolve_window, today_in, window_label};
use tally_core::{
    void_sale, CashCount, CoreResult, DateRange, ExpenseEntry, ExpenseLedger, Money, QuickRange,
    ReportWindow, SaleId, ValidationError, VoidOutcome,
};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::SessionConfig;
use crate::error::SessionResult;
use crate::report::{DashboardReport, ReportRequest};
use crate::state::{ActivityEntry, BackOfficeState, ShiftContext};
use crate::store::StateStore;

/// Activity log action recorded for a void.
pub const VOID_ACTION: &str = "Void";

/// An operator's reconciliation session.
///
/// `Tz` is the zone calendar days are counted in (the store's local zone).
pub struct ReconciliationSession<S: StateStore, Tz: TimeZone = Utc> {
    id: Uuid,
    store: S,
    state: BackOfficeState,
    shift: ShiftContext,
    expenses: ExpenseLedger,
    cash: CashCount,
    config: SessionConfig,
    tz: Tz,
}

impl<S, Tz> ReconciliationSession<S, Tz>
where
    S: StateStore,
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    /// Opens a session over the store's current state.
    pub fn open(store: S, shift: ShiftContext, config: SessionConfig, tz: Tz) -> SessionResult<Self> {
        let state = store.load()?;
        let session = ReconciliationSession {
            id: Uuid::new_v4(),
            store,
            state,
            shift,
            expenses: ExpenseLedger::new(),
            cash: CashCount::default(),
            config,
            tz,
        };

        info!(
            session_id = %session.id,
            operator = session.shift.operator().unwrap_or(tally_core::DEFAULT_OPERATOR),
            shift_start = ?session.shift.shift_start,
            sales = session.state.sales.len(),
            "Reconciliation session opened"
        );
        Ok(session)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> &BackOfficeState {
        &self.state
    }

    pub fn shift(&self) -> &ShiftContext {
        &self.shift
    }

    pub fn expenses(&self) -> &ExpenseLedger {
        &self.expenses
    }

    pub fn cash_count(&self) -> CashCount {
        self.cash
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    // =========================================================================
    // Operator Inputs (session-local, never persisted)
    // =========================================================================

    /// Records the opening float and the counted drawer cash.
    ///
    /// Unreadable text in either field is zero.
    pub fn set_cash_inputs(&mut self, starting_cash: &str, actual_cash: &str) -> CashCount {
        self.cash = CashCount::from_inputs(starting_cash, actual_cash);
        debug!(
            starting_cash = %self.cash.starting_cash,
            actual_cash = %self.cash.actual_cash,
            "Cash count updated"
        );
        self.cash
    }

    /// Adds an expense from the two input fields.
    ///
    /// A blank amount field is missing input; text that reads as zero or
    /// less is rejected by the ledger.
    pub fn add_expense(&mut self, description: &str, amount_input: &str) -> SessionResult<ExpenseEntry> {
        if amount_input.trim().is_empty() {
            return Err(ValidationError::required("amount").into());
        }
        let amount = Money::parse_lenient(amount_input);
        let entry = self.expenses.add(description, amount)?.clone();

        info!(
            description = %entry.description,
            amount = %entry.amount,
            total = %self.expenses.sum(),
            "Expense added"
        );
        Ok(entry)
    }

    /// Removes the expense at `index`.
    pub fn remove_expense(&mut self, index: usize) -> SessionResult<ExpenseEntry> {
        let entry = self.expenses.remove(index)?;
        info!(index, description = %entry.description, "Expense removed");
        Ok(entry)
    }

    // =========================================================================
    // Reports
    // =========================================================================

    /// The calendar date of `now` in the session's zone.
    pub fn today(&self, now: DateTime<Utc>) -> NaiveDate {
        today_in(now, &self.tz)
    }

    /// Resolves `range` against the current shift.
    pub fn window_for(&self, range: &DateRange, now: DateTime<Utc>) -> ReportWindow {
        let window = resolve_window(range, now, &self.tz, self.shift.shift_start);
        debug!(
            start = %window.start,
            end = %window.end,
            kind = ?window.kind,
            "Resolved report window"
        );
        window
    }

    /// Dashboard for a date range.
    pub fn report(&self, range: &DateRange, now: DateTime<Utc>) -> DashboardReport {
        let window = self.window_for(range, now);
        let request = ReportRequest {
            range: *range,
            label: window_label(range, &window, &self.tz),
            window,
        };

        let report = DashboardReport::assemble(
            self.id,
            request,
            &self.state.sales,
            &self.expenses,
            self.cash,
            &self.config,
        );

        debug!(
            sales = report.summary.sale_count,
            revenue = %report.summary.total_revenue,
            variance = %report.reconciliation.variance,
            status = report.reconciliation.status.label(),
            "Report assembled"
        );
        report
    }

    /// Dashboard from the two date pickers; both must be filled in.
    pub fn report_for_inputs(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        now: DateTime<Utc>,
    ) -> SessionResult<DashboardReport> {
        let range = DateRange::from_inputs(start, end)?;
        Ok(self.report(&range, now))
    }

    /// Dashboard for a quick-range shortcut.
    pub fn quick_report(&self, range: QuickRange, now: DateTime<Utc>) -> DashboardReport {
        let range = DateRange::quick(range, self.today(now));
        self.report(&range, now)
    }

    // =========================================================================
    // Durable Mutations
    // =========================================================================

    /// Voids a sale: restores its stock, removes it, logs it, then saves.
    ///
    /// ## Errors
    /// `NotFound` when the sale does not exist; nothing is changed or saved.
    pub fn void_transaction(&mut self, id: SaleId, now: DateTime<Utc>) -> SessionResult<VoidOutcome> {
        let operator = self.shift.operator().map(str::to_string);
        let config = &self.config;

        let outcome = Self::transaction(&mut self.store, &mut self.state, |state| {
            let outcome = void_sale(&mut state.sales, &mut state.products, id)?;

            let details = format!(
                "Voided receipt #{} ({}): {}",
                outcome.sale.id,
                config.format_currency(outcome.sale.total),
                outcome.sale.item_summary()
            );
            state.log_activity(ActivityEntry::new(now, VOID_ACTION, details, operator.as_deref()));
            Ok(outcome)
        })?;

        for missing in &outcome.missing {
            warn!(
                sale_id = id,
                product_id = ?missing.product_id,
                name = %missing.name,
                count = missing.count,
                "Voided line's product is not in the catalog; stock not restored"
            );
        }
        info!(
            sale_id = id,
            total = %outcome.sale.total,
            restored = outcome.restored.len(),
            "Sale voided"
        );
        Ok(outcome)
    }

    /// Applies `mutate` to a draft of the state, saves the draft, and only
    /// then makes it current.
    ///
    /// A rejected mutation or a failed save leaves the in-memory state as it
    /// was, matching what the store holds.
    ///
    /// Split from `&mut self` so the closure can borrow other fields.
    fn transaction<F, R>(store: &mut S, state: &mut BackOfficeState, mutate: F) -> SessionResult<R>
    where
        F: FnOnce(&mut BackOfficeState) -> CoreResult<R>,
    {
        let mut draft = state.clone();
        let result = mutate(&mut draft)?;
        store.save_all(&draft)?;
        *state = draft;
        Ok(result)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{SessionError, StoreError};
    use crate::store::MemoryStore;
    use chrono::FixedOffset;
    use tally_core::{Catalog, CoreError, ErrorKind, PaymentMethod, Product, Sale, SaleItem, VarianceStatus};

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, day, hour, 0, 0).unwrap()
    }

    fn sale(id: SaleId, when: DateTime<Utc>, total: i64, method: PaymentMethod, items: Vec<SaleItem>) -> Sale {
        Sale {
            id,
            date: Some(when),
            items,
            total: Money::from_major(total),
            profit: Money::from_major(total / 5),
            tax: Money::zero(),
            payment_method: method,
            cashier: Some("Ana".to_string()),
        }
    }

    fn store() -> MemoryStore {
        let products = Catalog::new(vec![Product::new(1, "X", 10), Product::new(2, "Y", 5)]);
        let sales = vec![
            sale(1, at(1, 7), 400, PaymentMethod::Cash, vec![SaleItem::new(1, "X", 1)]),
            sale(
                2,
                at(1, 10),
                700,
                PaymentMethod::Cash,
                vec![SaleItem::new(1, "X", 3), SaleItem::new(2, "Y", 2)],
            ),
            sale(3, at(1, 11), 300, PaymentMethod::EWallet, vec![SaleItem::new(2, "Y", 1)]),
        ];
        MemoryStore::new(BackOfficeState::new(products, sales))
    }

    fn session(shift_start: Option<DateTime<Utc>>) -> ReconciliationSession<MemoryStore> {
        let shift = ShiftContext::new(Some("Ana".to_string()), shift_start);
        ReconciliationSession::open(store(), shift, SessionConfig::default(), Utc).unwrap()
    }

    #[test]
    fn test_today_report_starts_at_shift() {
        let mut session = session(Some(at(1, 9)));
        session.set_cash_inputs("200", "850");
        session.add_expense("Ice", "50").unwrap();

        let report = session.quick_report(QuickRange::Today, at(1, 12));

        // The 07:00 sale belongs to the previous shift
        assert_eq!(report.summary.sale_count, 2);
        assert_eq!(report.reconciliation.expected_cash, Money::from_major(850));
        assert_eq!(report.reconciliation.status, VarianceStatus::Balanced);
        assert_eq!(report.audit[0].sale_id, 3);
    }

    #[test]
    fn test_today_report_without_shift_uses_midnight() {
        let session = session(None);
        let report = session.quick_report(QuickRange::Today, at(1, 12));
        assert_eq!(report.summary.sale_count, 3);
    }

    #[test]
    fn test_missing_date_is_missing_input() {
        let session = session(None);
        let err = session
            .report_for_inputs(NaiveDate::from_ymd_opt(2024, 5, 1), None, at(1, 12))
            .unwrap_err();

        let api: crate::error::ApiError = err.into();
        assert_eq!(api.code, crate::error::ErrorCode::MissingInput);
    }

    #[test]
    fn test_void_saves_once_and_logs() {
        let mut session = session(Some(at(1, 9)));

        let outcome = session.void_transaction(2, at(1, 12)).unwrap();

        assert_eq!(outcome.restored.len(), 2);
        assert_eq!(session.store().save_count(), 1);

        let saved = session.store().state();
        assert_eq!(saved.products.get(1).map(|p| p.qty), Some(13));
        assert_eq!(saved.products.get(2).map(|p| p.qty), Some(7));
        assert!(saved.sales.iter().all(|s| s.id != 2));

        let log = saved.inventory_logs.last().unwrap();
        assert_eq!(log.action, "Void");
        assert_eq!(log.user, "Ana");
        assert_eq!(log.details, "Voided receipt #2 (₱700.00): 3x X, 2x Y");
    }

    #[test]
    fn test_second_void_is_not_found_and_not_saved() {
        let mut session = session(None);
        session.void_transaction(2, at(1, 12)).unwrap();

        let err = session.void_transaction(2, at(1, 12)).unwrap_err();
        assert!(matches!(err, SessionError::Core(CoreError::SaleNotFound(2))));
        assert_eq!(session.store().save_count(), 1);
        assert_eq!(session.state().products.get(1).map(|p| p.qty), Some(13));
    }

    /// Loads fine, refuses every write.
    struct ReadOnlyStore(BackOfficeState);

    impl StateStore for ReadOnlyStore {
        fn load(&self) -> Result<BackOfficeState, StoreError> {
            Ok(self.0.clone())
        }

        fn save_all(&mut self, _state: &BackOfficeState) -> Result<(), StoreError> {
            Err(StoreError::Io {
                path: "/readonly/backoffice.json".into(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            })
        }
    }

    #[test]
    fn test_failed_save_leaves_state_untouched() {
        let state = store().state().clone();
        let mut session = ReconciliationSession::open(
            ReadOnlyStore(state),
            ShiftContext::default(),
            SessionConfig::default(),
            Utc,
        )
        .unwrap();

        let err = session.void_transaction(2, at(1, 12)).unwrap_err();
        assert!(matches!(err, SessionError::Store(_)));

        // Still there, stock unchanged, nothing logged; a retry hits the store again
        assert!(session.state().sales.iter().any(|s| s.id == 2));
        assert_eq!(session.state().products.get(1).map(|p| p.qty), Some(10));
        assert!(session.state().inventory_logs.is_empty());
        assert!(matches!(
            session.void_transaction(2, at(1, 12)),
            Err(SessionError::Store(_))
        ));
    }

    #[test]
    fn test_cash_inputs_are_lenient() {
        let mut session = session(None);

        let cash = session.set_cash_inputs("200.50", "lots");
        assert_eq!(cash.starting_cash, Money::from_cents(20050));
        assert!(cash.actual_cash.is_zero());
        assert_eq!(session.cash_count(), cash);
    }

    #[test]
    fn test_report_after_void_excludes_sale() {
        let mut session = session(Some(at(1, 9)));
        let before = session.quick_report(QuickRange::Today, at(1, 12));
        session.void_transaction(2, at(1, 12)).unwrap();
        let after = session.quick_report(QuickRange::Today, at(1, 12));

        assert_eq!(
            before.summary.total_revenue - after.summary.total_revenue,
            Money::from_major(700)
        );
    }

    #[test]
    fn test_expenses_are_not_persisted() {
        let mut session = session(None);
        session.add_expense("Ice", "25.50").unwrap();
        session.remove_expense(0).unwrap();

        assert_eq!(session.store().save_count(), 0);
    }

    #[test]
    fn test_expense_inputs_are_validated() {
        let mut session = session(None);

        let err = session.add_expense("Ice", "  ").unwrap_err();
        assert!(matches!(&err, SessionError::Core(e) if e.kind() == ErrorKind::MissingInput));

        let err = session.add_expense("Ice", "-5").unwrap_err();
        assert!(matches!(&err, SessionError::Core(e) if e.kind() == ErrorKind::InvalidInput));

        let err = session.remove_expense(0).unwrap_err();
        assert!(matches!(&err, SessionError::Core(e) if e.kind() == ErrorKind::OutOfRange));

        assert!(session.expenses().is_empty());
    }

    #[test]
    fn test_expenses_survive_window_changes() {
        let mut session = session(None);
        session.add_expense("Ice", "50").unwrap();

        let history = session.report(
            &DateRange::single(NaiveDate::from_ymd_opt(2024, 4, 1).unwrap()),
            at(1, 12),
        );
        assert_eq!(history.reconciliation.total_expenses, Money::from_major(50));
        assert_eq!(session.expenses().len(), 1);
    }

    #[test]
    fn test_store_time_zone_decides_today() {
        // 17:00 UTC on May 1 is already May 2 at UTC+8; no sales yet that day
        let tz = FixedOffset::east_opt(8 * 3600).unwrap();
        let session = ReconciliationSession::open(store(), ShiftContext::default(), SessionConfig::default(), tz)
            .unwrap();

        assert_eq!(session.today(at(1, 17)), NaiveDate::from_ymd_opt(2024, 5, 2).unwrap());
        let report = session.quick_report(QuickRange::Today, at(1, 17));
        assert_eq!(report.summary.sale_count, 0);
    }
}
