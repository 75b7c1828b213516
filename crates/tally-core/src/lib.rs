//! # tally-core: Pure Business Logic for the Tally Back-Office
//!
//! This crate is the shift-aware sales aggregation and cash-reconciliation
//! engine. It contains every calculation as a pure function with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Tally Back-Office Architecture                      │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Rendering front end (external collaborator)        │   │
//! │  │    Date pickers ──► Dashboard ──► Audit table ──► Void button   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              tally-session (state + storage seam)               │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ tally-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐  ┌───────────┐  ┌─────────┐  ┌──────────────┐   │   │
//! │  │   │  window  │─►│ aggregate │─►│ ranking │  │ reconciliation│  │   │
//! │  │   │  shift / │  │  totals,  │  │  top-N  │  │  expected vs  │  │   │
//! │  │   │ calendar │  │  splits   │  │ sellers │  │  counted cash │  │   │
//! │  │   └──────────┘  └─────┬─────┘  └─────────┘  └──────▲───────┘   │   │
//! │  │                       └──────────────────────────────┤          │   │
//! │  │   ┌──────────┐                        ┌─────────────┴──┐       │   │
//! │  │   │   void   │ restores stock,        │    expense     │       │   │
//! │  │   │          │ removes the sale       │    ledger      │       │   │
//! │  │   └──────────┘                        └────────────────┘       │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CLOCK • NO STORAGE • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Stored records (Sale, SaleItem, Product, Catalog)
//! - [`money`] - Money type with integer arithmetic
//! - [`lenient`] - Forgiving deserializers for stored money and quantities
//! - [`error`] - Domain error types
//! - [`validation`] - Operator input validation
//! - [`window`] - Report window resolution (live shift vs calendar days)
//! - [`aggregate`] - Sales totals, payment split, item counts
//! - [`ranking`] - Top-seller ranking
//! - [`expense`] - Session expense ledger
//! - [`reconciliation`] - Expected cash and variance
//! - [`void`] - Sale void with stock restoration
//!
//! ## Example Usage
//!
//! ```rust
//! use tally_core::money::Money;
//! use tally_core::reconciliation::{expected_cash, VarianceStatus};
//!
//! let expected = expected_cash(
//!     Money::from_major(1000), // gross revenue
//!     Money::from_major(300),  // e-wallet receipts
//!     Money::from_major(50),   // expenses
//!     Money::from_major(200),  // starting float
//! );
//! assert_eq!(expected, Money::from_major(850));
//!
//! let variance = Money::from_major(900) - expected;
//! assert_eq!(VarianceStatus::classify(variance, Money::zero()), VarianceStatus::Over);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod aggregate;
pub mod error;
pub mod expense;
pub mod lenient;
pub mod money;
pub mod ranking;
pub mod reconciliation;
pub mod types;
pub mod validation;
pub mod void;
pub mod window;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use aggregate::{aggregate, ItemCount, ItemCounts, SalesSummary};
pub use error::{CoreError, CoreResult, ErrorKind, ValidationError};
pub use expense::{ExpenseEntry, ExpenseLedger};
pub use money::Money;
pub use ranking::{top_sellers, TopSeller};
pub use reconciliation::{reconcile, CashCount, ReconciliationResult, VarianceStatus};
pub use types::*;
pub use void::{void_sale, MissingProduct, StockRestore, VoidOutcome};
pub use window::{resolve_window, DateRange, QuickRange, ReportWindow, WindowKind};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Display name used when a sale or activity has no recorded operator.
pub const DEFAULT_OPERATOR: &str = "System";

/// Number of entries shown in the top-seller list.
pub const DEFAULT_TOP_SELLER_LIMIT: usize = 5;
