//! # Sale Void
//!
//! Cancels a recorded sale and puts its units back in stock.
//!
//! ## Order of Effects
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  void_sale(id)                                                          │
//! │                                                                         │
//! │  1. find sale by id ──────────── missing? → NotFound, NOTHING changes   │
//! │  2. for each item:                                                      │
//! │       catalog[item.product].qty += item.count                           │
//! │       product gone? → note it, carry on with the next item              │
//! │  3. remove the sale from the list                                       │
//! │                                                                         │
//! │  Step 2 reads the sale's items, so it runs before step 3.               │
//! │  After step 3 the id no longer exists: a second void is NotFound,       │
//! │  never a second restock.                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! There is no rollback. Each item restores independently and the sale is
//! removed even when some of its products have left the catalog.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::types::{Catalog, ProductId, Sale, SaleId};

/// Stock put back for one sale line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct StockRestore {
    pub product_id: ProductId,
    pub name: String,
    pub count: i64,
    /// Stock level after the restore.
    pub new_qty: i64,
}

/// A sale line whose product could not be restocked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct MissingProduct {
    /// The reference the line carried, if any.
    pub product_id: Option<ProductId>,
    pub name: String,
    pub count: i64,
}

/// What a void did.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct VoidOutcome {
    /// The removed sale.
    pub sale: Sale,
    pub restored: Vec<StockRestore>,
    pub missing: Vec<MissingProduct>,
}

impl VoidOutcome {
    /// Whether every line found its product.
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Voids sale `id`, restoring its stock into `catalog`.
///
/// ## Errors
/// `SaleNotFound` when no sale has this id. Neither collection is touched.
pub fn void_sale(sales: &mut Vec<Sale>, catalog: &mut Catalog, id: SaleId) -> CoreResult<VoidOutcome> {
    let index = sales
        .iter()
        .position(|sale| sale.id == id)
        .ok_or(CoreError::SaleNotFound(id))?;

    let mut restored = Vec::new();
    let mut missing = Vec::new();

    for item in &sales[index].items {
        let new_qty = item
            .product_id
            .and_then(|product_id| catalog.restore_stock(product_id, item.count));

        match (item.product_id, new_qty) {
            (Some(product_id), Some(new_qty)) => restored.push(StockRestore {
                product_id,
                name: item.name.clone(),
                count: item.count,
                new_qty,
            }),
            _ => missing.push(MissingProduct {
                product_id: item.product_id,
                name: item.name.clone(),
                count: item.count,
            }),
        }
    }

    let sale = sales.remove(index);

    Ok(VoidOutcome {
        sale,
        restored,
        missing,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
