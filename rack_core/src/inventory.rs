//! # Offcut Inventory
//!
//! Matches required cut lengths against leftover pieces already in stock,
//! before ordering new rods.
//!
//! For each requirement, pieces within `tolerance` are taken closest length
//! first until the requirement is met or the candidates run out. The caller's
//! inventory is never touched: reconciliation works on a copy and hands back
//! the remaining inventory for the storage layer to commit.
//!
//! Anything that could not be matched stays in `remaining_required`.
//!
//! ## Example
//!
//! ```rust
//! use rack_core::inventory::{consume, RequiredLength, UsablePiece};
//!
//! let stock = vec![UsablePiece::new(24.1, 3, "from job 25-014")];
//! let required = vec![RequiredLength::new(24.0, 4)];
//!
//! let outcome = consume(&required, &stock, 0.25);
//! assert_eq!(outcome.used[0].quantity, 3);
//! assert_eq!(outcome.remaining_required, vec![RequiredLength::new(24.0, 1)]);
//! assert!(outcome.remaining_inventory.is_empty());
//! ```

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculations::capacity::LENGTH_EPSILON;
use crate::calculations::cutting::{CutPiece, CuttingPlan};

/// Lengths closer than this are treated as the same when grouping (in)
const GROUPING_RESOLUTION: f64 = 1e-6;

/// A stocked leftover piece.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsablePiece {
    pub id: Uuid,
    pub length_in: f64,
    pub quantity: u32,
    #[serde(default)]
    pub note: String,
    pub created_at: DateTime<Utc>,
}

impl UsablePiece {
    pub fn new(length_in: f64, quantity: u32, note: impl Into<String>) -> Self {
        UsablePiece {
            id: Uuid::new_v4(),
            length_in,
            quantity,
            note: note.into(),
            created_at: Utc::now(),
        }
    }
}

/// `qty` pieces of `length_in` still to be sourced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RequiredLength {
    pub length_in: f64,
    pub qty: u32,
}

impl RequiredLength {
    pub fn new(length_in: f64, qty: u32) -> Self {
        RequiredLength { length_in, qty }
    }
}

/// Audit record of inventory drawn for one requirement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsedPiece {
    pub requested_length_in: f64,
    pub quantity: u32,
    pub source_id: Uuid,
    pub source_length_in: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconcileOutcome {
    /// Requirements not covered by inventory
    pub remaining_required: Vec<RequiredLength>,
    /// Inventory after consumption; emptied pieces are dropped
    pub remaining_inventory: Vec<UsablePiece>,
    pub used: Vec<UsedPiece>,
}

impl ReconcileOutcome {
    pub fn is_satisfied(&self) -> bool {
        self.remaining_required.is_empty()
    }

    /// Pieces still to be cut from new rods
    pub fn shortfall_qty(&self) -> u32 {
        self.remaining_required.iter().map(|r| r.qty).sum()
    }
}

/// Draw required lengths from inventory, closest match first.
pub fn consume(required: &[RequiredLength], inventory: &[UsablePiece], tolerance_in: f64) -> ReconcileOutcome {
    let mut stock = inventory.to_vec();
    let mut remaining_required = Vec::new();
    let mut used = Vec::new();

    for need in required {
        let mut outstanding = need.qty;

        let mut candidates: Vec<(usize, f64)> = stock
            .iter()
            .enumerate()
            .filter(|(_, piece)| piece.quantity > 0)
            .map(|(i, piece)| (i, (piece.length_in - need.length_in).abs()))
            .filter(|(_, diff)| *diff <= tolerance_in + LENGTH_EPSILON)
            .collect();
        candidates.sort_by(|a, b| a.1.total_cmp(&b.1));

        for (i, _) in candidates {
            if outstanding == 0 {
                break;
            }
            let piece = &mut stock[i];
            let take = outstanding.min(piece.quantity);
            if take == 0 {
                continue;
            }
            piece.quantity -= take;
            outstanding -= take;
            used.push(UsedPiece {
                requested_length_in: need.length_in,
                quantity: take,
                source_id: piece.id,
                source_length_in: piece.length_in,
            });
        }

        if outstanding > 0 {
            remaining_required.push(RequiredLength::new(need.length_in, outstanding));
        }
    }

    stock.retain(|piece| piece.quantity > 0);

    tracing::debug!(
        requirements = required.len(),
        drawn = used.len(),
        short = remaining_required.len(),
        "inventory reconciled"
    );

    ReconcileOutcome {
        remaining_required,
        remaining_inventory: stock,
        used,
    }
}

/// Collapse cut pieces into requirements, longest first.
pub fn required_from_pieces(pieces: &[CutPiece]) -> Vec<RequiredLength> {
    group_lengths(pieces.iter().map(|p| p.length_in))
        .into_iter()
        .map(|(length_in, qty)| RequiredLength::new(length_in, qty))
        .collect()
}

/// Turn rod leftovers from a cutting plan into inventory records.
///
/// Freeing a leftover takes one more saw cut, so `kerf_in` is taken off
/// rods that carry any cuts. Leftovers shorter than `min_len_in` are scrap.
pub fn offcuts_from_plan(plan: &CuttingPlan, kerf_in: f64, min_len_in: f64, note: &str) -> Vec<UsablePiece> {
    let lengths = plan.rods.iter().filter_map(|rod| {
        let kerf = if rod.cuts.is_empty() { 0.0 } else { kerf_in };
        let usable = rod.waste_in - kerf;
        (usable >= min_len_in && usable > 0.0).then_some(usable)
    });

    group_lengths(lengths)
        .into_iter()
        .map(|(length_in, quantity)| UsablePiece::new(length_in, quantity, note))
        .collect()
}

/// Count lengths that agree to within the grouping resolution.
fn group_lengths(lengths: impl Iterator<Item = f64>) -> Vec<(f64, u32)> {
    let mut groups: BTreeMap<i64, (f64, u32)> = BTreeMap::new();
    for length in lengths {
        let key = (length / GROUPING_RESOLUTION).round() as i64;
        groups.entry(key).or_insert((length, 0)).1 += 1;
    }
    groups.into_values().rev().collect()
}
