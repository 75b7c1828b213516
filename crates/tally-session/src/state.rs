//! # Back-Office State
//!
//! The data the storage collaborator holds, plus who is on shift.
//!
//! ## Stored Document
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  {                                                                      │
//! │    "products":      [ Product, ... ]      ← qty restored by void        │
//! │    "sales":         [ Sale, ... ]         ← removed by void             │
//! │    "inventoryLogs": [ ActivityEntry, ... ]← appended by void            │
//! │    "rawMaterials":  [ ... ]               ┐ not read here, kept          │
//! │    "employees":     [ ... ]               ┘ byte-for-byte on save       │
//! │  }                                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tally_core::{lenient, Catalog, Sale, DEFAULT_OPERATOR};
use ts_rs::TS;

// =============================================================================
// Activity Log
// =============================================================================

/// One line of the activity log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ActivityEntry {
    #[serde(with = "lenient::instant", default)]
    #[ts(as = "Option<String>")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub details: String,
    #[serde(default)]
    pub user: String,
}

impl ActivityEntry {
    /// Creates an entry, recording `"System"` when no operator is known.
    pub fn new(
        at: DateTime<Utc>,
        action: impl Into<String>,
        details: impl Into<String>,
        user: Option<&str>,
    ) -> Self {
        ActivityEntry {
            timestamp: Some(at),
            action: action.into(),
            details: details.into(),
            user: user.unwrap_or(DEFAULT_OPERATOR).to_string(),
        }
    }
}

// =============================================================================
// Back-Office State
// =============================================================================

/// Everything the storage collaborator loads and saves.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackOfficeState {
    #[serde(default)]
    pub products: Catalog,

    #[serde(default)]
    pub sales: Vec<Sale>,

    #[serde(default)]
    pub inventory_logs: Vec<ActivityEntry>,

    /// Collections this engine does not interpret.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl BackOfficeState {
    pub fn new(products: Catalog, sales: Vec<Sale>) -> Self {
        BackOfficeState {
            products,
            sales,
            ..BackOfficeState::default()
        }
    }

    /// Appends to the activity log.
    pub fn log_activity(&mut self, entry: ActivityEntry) {
        self.inventory_logs.push(entry);
    }
}

// =============================================================================
// Shift Context
// =============================================================================

/// Who is logged in and since when.
///
/// Supplied by the login screen. Both parts may be absent: reports then
/// fall back to midnight and entries are attributed to `"System"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ShiftContext {
    pub operator: Option<String>,
    #[ts(as = "Option<String>")]
    pub shift_start: Option<DateTime<Utc>>,
}

impl ShiftContext {
    pub fn new(operator: Option<String>, shift_start: Option<DateTime<Utc>>) -> Self {
        ShiftContext {
            operator,
            shift_start,
        }
    }

    /// Operator name, blank treated as absent.
    pub fn operator(&self) -> Option<&str> {
        self.operator
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}
