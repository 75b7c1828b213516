//! # tally-session: Session State for the Tally Back-Office
//!
//! Wraps the pure `tally-core` engine in a session that owns the state,
//! talks to the storage collaborator, and reads configuration.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Tally Back-Office Data Flow                      │
//! │                                                                         │
//! │  Front end (apps/backoffice, or any renderer)                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  tally-session (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌────────────────────┐  ┌──────────┐  ┌──────────────────┐   │   │
//! │  │   │ ReconciliationSess.│  │  report  │  │  SessionConfig   │   │   │
//! │  │   │ expenses, cash,    │─►│ assemble │  │  toml + env      │   │   │
//! │  │   │ void transaction   │  └──────────┘  └──────────────────┘   │   │
//! │  │   └─────────┬──────────┘                                       │   │
//! │  │             │ save_all                                          │   │
//! │  │   ┌─────────▼──────────┐                                       │   │
//! │  │   │ StateStore         │  JsonFileStore │ MemoryStore          │   │
//! │  │   └────────────────────┘                                       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  tally-core (pure functions)                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage Example
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use tally_session::{
//!     MemoryStore, ReconciliationSession, SessionConfig, ShiftContext,
//! };
//! use tally_core::QuickRange;
//!
//! let shift = ShiftContext::new(Some("Ana".into()), None);
//! let mut session =
//!     ReconciliationSession::open(MemoryStore::default(), shift, SessionConfig::default(), Utc)
//!         .unwrap();
//!
//! session.set_cash_inputs("200", "200");
//!
//! let now = Utc.with_ymd_and_hms(2024, 5, 1, 18, 0, 0).unwrap();
//! let report = session.quick_report(QuickRange::Today, now);
//! assert_eq!(report.reconciliation.status.label(), "Balanced");
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod report;
pub mod session;
pub mod state;
pub mod store;

pub use config::SessionConfig;
pub use error::{ApiError, ConfigError, ErrorCode, SessionError, SessionResult, StoreError};
pub use logging::init_tracing;
pub use report::{AuditRow, DashboardReport, ReportRequest};
pub use session::ReconciliationSession;
pub use state::{ActivityEntry, BackOfficeState, ShiftContext};
pub use store::{JsonFileStore, MemoryStore, StateStore};
