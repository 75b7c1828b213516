//! # Domain Types
//!
//! Stored records the back-office works on.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Sale       │   │    SaleItem     │   │    Product      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (epoch ms)  │──►│  product_id     │──►│  id             │       │
//! │  │  date           │   │  name           │   │  name           │       │
//! │  │  total/profit/  │   │  count          │   │  qty (stock)    │       │
//! │  │  tax            │   └─────────────────┘   └─────────────────┘       │
//! │  │  payment_method │                                                    │
//! │  │  cashier        │   ┌─────────────────┐   ┌─────────────────┐       │
//! │  └─────────────────┘   │ PaymentMethod   │   │    Catalog      │       │
//! │                        │  Cash           │   │  Vec<Product>   │       │
//! │                        │  E-Wallet       │   └─────────────────┘       │
//! │                        └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Stored Shape
//! Records are written by the checkout screen and read back here. Field
//! names are camelCase, money is decimal major units, and historical data
//! uses two spellings for some item fields (`count`/`qty`,
//! `id`/`productId`). Reading is lenient everywhere (see [`crate::lenient`]).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use ts_rs::TS;

use crate::lenient;
use crate::money::Money;
use crate::DEFAULT_OPERATOR;

/// Sale identifier: the creation instant in epoch milliseconds.
pub type SaleId = i64;

/// Product identifier.
pub type ProductId = i64;

// =============================================================================
// Payment Method
// =============================================================================

/// How a sale was paid.
///
/// Only `E-Wallet` is recognised by name; anything else a record carries
/// (including nothing at all) is treated as cash in the drawer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, TS)]
#[ts(export)]
pub enum PaymentMethod {
    #[default]
    Cash,
    #[serde(rename = "E-Wallet")]
    EWallet,
}

impl PaymentMethod {
    /// Label shown in the audit table.
    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::EWallet => "E-Wallet",
        }
    }

    /// Whether this payment ends up as physical cash in the drawer.
    #[inline]
    pub fn is_cash(&self) -> bool {
        matches!(self, PaymentMethod::Cash)
    }
}

impl<'de> Deserialize<'de> for PaymentMethod {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(match value.as_str() {
            Some("E-Wallet") => PaymentMethod::EWallet,
            _ => PaymentMethod::Cash,
        })
    }
}

// =============================================================================
// Sale Item
// =============================================================================

/// One line of a sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(from = "RawSaleItem", rename_all = "camelCase")]
#[ts(export)]
pub struct SaleItem {
    /// Catalog product this line was sold from. `None` when the record
    /// carries no readable reference.
    #[serde(rename = "id")]
    pub product_id: Option<ProductId>,

    /// Display name at the time of sale.
    pub name: String,

    /// Units sold (removed from stock at sale time).
    pub count: i64,
}

impl SaleItem {
    /// Creates a sale line.
    pub fn new(product_id: ProductId, name: impl Into<String>, count: i64) -> Self {
        SaleItem {
            product_id: Some(product_id),
            name: name.into(),
            count,
        }
    }
}

/// Wire shape of a sale line, covering every spelling the stored data uses.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSaleItem {
    #[serde(default)]
    id: Value,
    #[serde(default)]
    product_id: Value,
    #[serde(default)]
    name: Value,
    #[serde(default)]
    count: Value,
    #[serde(default)]
    qty: Value,
}

impl From<RawSaleItem> for SaleItem {
    fn from(raw: RawSaleItem) -> Self {
        // First non-zero spelling wins, as the checkout screen wrote it
        let count = [&raw.count, &raw.qty]
            .into_iter()
            .filter_map(lenient::value_as_i64)
            .find(|c| *c != 0)
            .unwrap_or(0);

        let product_id = [&raw.id, &raw.product_id]
            .into_iter()
            .filter_map(lenient::value_as_i64)
            .find(|id| *id != 0);

        let name = match raw.name {
            Value::String(s) => s,
            Value::Null => String::new(),
            other => other.to_string(),
        };

        SaleItem {
            product_id,
            name,
            count,
        }
    }
}

// =============================================================================
// Sale
// =============================================================================

/// A completed sale.
///
/// Immutable once recorded. The only way a sale changes is being removed
/// by a void.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Sale {
    pub id: SaleId,

    /// Completion instant. `None` when the stored value is unreadable;
    /// such a sale never falls inside a report window.
    #[serde(with = "lenient::instant", default)]
    #[ts(as = "Option<String>")]
    pub date: Option<DateTime<Utc>>,

    #[serde(default)]
    pub items: Vec<SaleItem>,

    #[serde(with = "lenient::money", default)]
    #[ts(type = "number")]
    pub total: Money,

    #[serde(with = "lenient::money", default)]
    #[ts(type = "number")]
    pub profit: Money,

    #[serde(with = "lenient::money", default)]
    #[ts(type = "number")]
    pub tax: Money,

    #[serde(default)]
    pub payment_method: PaymentMethod,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cashier: Option<String>,
}

impl Sale {
    /// Operator name for display, `"System"` when none was recorded.
    pub fn cashier_name(&self) -> &str {
        match self.cashier.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => DEFAULT_OPERATOR,
        }
    }

    /// Human summary of the lines, e.g. `"3x Coke, 1x Bread"`.
    ///
    /// A sale without lines reads `"No details"`.
    pub fn item_summary(&self) -> String {
        if self.items.is_empty() {
            return "No details".to_string();
        }
        self.items
            .iter()
            .map(|item| format!("{}x {}", item.count, item.name))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

// =============================================================================
// Product & Catalog
// =============================================================================

/// A catalog product.
///
/// Only `qty` is touched by the reconciliation engine; the other fields are
/// carried so the catalog survives a load/save cycle unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    pub id: ProductId,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub category: String,

    #[serde(with = "lenient::money", default)]
    #[ts(type = "number")]
    pub price: Money,

    #[serde(with = "lenient::money", default)]
    #[ts(type = "number")]
    pub cost: Money,

    /// Current stock. May go negative when oversold.
    #[serde(with = "lenient::count", default)]
    #[ts(type = "number")]
    pub qty: i64,
}

impl Product {
    /// Creates a product with zero price and cost.
    pub fn new(id: ProductId, name: impl Into<String>, qty: i64) -> Self {
        Product {
            id,
            name: name.into(),
            category: String::new(),
            price: Money::zero(),
            cost: Money::zero(),
            qty,
        }
    }
}

/// The product catalog, in stored order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Catalog(Vec<Product>);

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Catalog(products)
    }

    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.0.iter().find(|p| p.id == id)
    }

    pub fn get_mut(&mut self, id: ProductId) -> Option<&mut Product> {
        self.0.iter_mut().find(|p| p.id == id)
    }

    /// Puts `count` units back on the shelf.
    ///
    /// Returns the new stock level, or `None` if the product is gone.
    pub fn restore_stock(&mut self, id: ProductId, count: i64) -> Option<i64> {
        let product = self.get_mut(id)?;
        product.qty = product.qty.saturating_add(count);
        Some(product.qty)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Product> for Catalog {
    fn from_iter<I: IntoIterator<Item = Product>>(iter: I) -> Self {
        Catalog(iter.into_iter().collect())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
