//! # Top-Seller Ranking
//!
//! Reduces item counts to the best-selling names.
//!
//! Sorting is stable: names with equal counts keep their first-seen order
//! from the item counts, so `{A:5, B:5, C:3}` always ranks `A` before `B`.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::aggregate::ItemCounts;

/// One row of the top-seller list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TopSeller {
    /// 1-based position.
    pub rank: usize,
    pub name: String,
    pub count: i64,
}

/// Ranks `counts` by units sold, highest first, keeping at most `limit`.
pub fn top_sellers(counts: &ItemCounts, limit: usize) -> Vec<TopSeller> {
    let mut ranked: Vec<_> = counts.iter().collect();
    // sort_by is stable; equal counts stay in insertion order
    ranked.sort_by(|a, b| b.count.cmp(&a.count));

    ranked
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(i, entry)| TopSeller {
            rank: i + 1,
            name: entry.name.clone(),
            count: entry.count,
        })
        .collect()
}
