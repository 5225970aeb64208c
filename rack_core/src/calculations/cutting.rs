//! # Cutting Plan
//!
//! Lays the job's leg and sloped-rod pieces out on physical rods using
//! First-Fit-Decreasing:
//!
//! 1. Sort pieces longest first (stable, so equal lengths keep their order)
//! 2. Put each piece on the first open rod with room for it plus one kerf
//! 3. Open a new rod when none has room
//!
//! FFD is deterministic for a given input and stays within 11/9 of the
//! optimal rod count.
//!
//! Rods that end up with the same set of cuts are grouped into patterns so
//! a fabricator can read "cut 6 rods as 2 x Hypo 150 + ..." instead of six
//! separate listings.
//!
//! ## Example
//!
//! ```rust
//! use rack_core::calculations::cutting::{plan_cuts, CutPiece, PieceType};
//!
//! let pieces = vec![
//!     CutPiece::new(PieceType::Hypo, 150.0),
//!     CutPiece::new(PieceType::Front, 24.0),
//!     CutPiece::new(PieceType::Rear, 72.8),
//! ];
//! let plan = plan_cuts(&pieces, 164.0, 0.125);
//! assert_eq!(plan.rod_count(), 2);
//! ```

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::calculations::capacity::LENGTH_EPSILON;
use crate::calculations::rod_totals::StructureBreakdown;

/// Kind of piece cut from rod stock
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PieceType {
    Front,
    Rear,
    Hypo,
}

impl fmt::Display for PieceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PieceType::Front => "Front",
            PieceType::Rear => "Rear",
            PieceType::Hypo => "Hypo",
        };
        f.write_str(name)
    }
}

/// A single piece to cut.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CutPiece {
    pub piece_type: PieceType,
    pub length_in: f64,
}

impl CutPiece {
    pub fn new(piece_type: PieceType, length_in: f64) -> Self {
        CutPiece { piece_type, length_in }
    }

    fn signature(&self) -> String {
        format!("{}:{:.3}", self.piece_type, self.length_in)
    }

    /// Longest first, then by piece type so equal lengths have one order
    fn canonical_cmp(&self, other: &Self) -> Ordering {
        other
            .length_in
            .total_cmp(&self.length_in)
            .then(self.piece_type.cmp(&other.piece_type))
    }
}

/// Cuts taken from one physical rod.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RodPlan {
    /// Cuts in the order they were placed
    pub cuts: Vec<CutPiece>,
    /// Piece lengths plus one kerf between consecutive cuts (in)
    pub used_length_in: f64,
    /// `rod_length - used_length` (in)
    pub waste_in: f64,
}

impl RodPlan {
    fn open() -> Self {
        RodPlan {
            cuts: Vec::new(),
            used_length_in: 0.0,
            waste_in: 0.0,
        }
    }

    /// Length this rod would reach after adding `piece`.
    fn length_with(&self, piece: &CutPiece, kerf_in: f64) -> f64 {
        let kerf = if self.cuts.is_empty() { 0.0 } else { kerf_in };
        self.used_length_in + kerf + piece.length_in
    }

    /// Cuts in canonical order: longest first, ties by piece type
    pub fn sorted_cuts(&self) -> Vec<CutPiece> {
        let mut cuts = self.cuts.clone();
        cuts.sort_by(CutPiece::canonical_cmp);
        cuts
    }

    /// Order-independent key for grouping identical rods
    pub fn signature(&self) -> String {
        self.sorted_cuts()
            .iter()
            .map(CutPiece::signature)
            .collect::<Vec<_>>()
            .join(" + ")
    }
}

/// A recurring set of cuts and how many rods use it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CutPattern {
    pub signature: String,
    /// Cuts in one rod of this pattern, longest first, ties by piece type
    pub cuts: Vec<CutPiece>,
    pub rod_count: usize,
    pub waste_per_rod_in: f64,
}

/// Full cutting plan for a job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CuttingPlan {
    /// Every piece requested, longest first
    pub pieces: Vec<CutPiece>,
    /// One entry per rod consumed
    pub rods: Vec<RodPlan>,
    /// Rod patterns, most frequent first
    pub patterns: Vec<CutPattern>,
    pub total_waste_in: f64,
    /// Pieces longer than the rod stock, left out of the plan
    pub oversized: Vec<CutPiece>,
}

impl CuttingPlan {
    fn empty() -> Self {
        CuttingPlan {
            pieces: Vec::new(),
            rods: Vec::new(),
            patterns: Vec::new(),
            total_waste_in: 0.0,
            oversized: Vec::new(),
        }
    }

    /// Rods the plan consumes
    pub fn rod_count(&self) -> usize {
        self.rods.len()
    }

    pub fn is_complete(&self) -> bool {
        self.oversized.is_empty()
    }

    /// Share of purchased rod length that ends up in pieces, in percent
    pub fn utilization_percent(&self, rod_length_in: f64) -> f64 {
        let stock = self.rods.len() as f64 * rod_length_in;
        if stock <= 0.0 {
            return 0.0;
        }
        let pieces: f64 = self.rods.iter().flat_map(|r| &r.cuts).map(|c| c.length_in).sum();
        pieces / stock * 100.0
    }

    /// The `n` most frequent patterns
    pub fn top_patterns(&self, n: usize) -> &[CutPattern] {
        &self.patterns[..n.min(self.patterns.len())]
    }
}

/// Expand a structure breakdown into individual pieces.
pub fn cut_pieces(breakdown: &[StructureBreakdown]) -> Vec<CutPiece> {
    let mut pieces = Vec::new();
    for b in breakdown {
        let kinds = [
            (PieceType::Front, b.front_legs, b.legs.front_leg_height_in),
            (PieceType::Rear, b.rear_legs, b.legs.rear_leg_height_in),
            (PieceType::Hypo, b.hypo_rods, b.legs.hypotenuse_rod_length_in),
        ];
        for (piece_type, count, length_in) in kinds {
            pieces.extend(std::iter::repeat(CutPiece::new(piece_type, length_in)).take(count));
        }
    }
    pieces
}

/// Plan cuts with First-Fit-Decreasing.
///
/// An empty piece list gives an empty plan.
pub fn plan_cuts(pieces: &[CutPiece], rod_length_in: f64, kerf_in: f64) -> CuttingPlan {
    if pieces.is_empty() {
        return CuttingPlan::empty();
    }

    let mut sorted = pieces.to_vec();
    sorted.sort_by(|a, b| b.length_in.total_cmp(&a.length_in));

    let mut rods: Vec<RodPlan> = Vec::new();
    let mut oversized = Vec::new();

    for piece in &sorted {
        if piece.length_in > rod_length_in + LENGTH_EPSILON {
            oversized.push(*piece);
            continue;
        }

        let slot = rods
            .iter()
            .position(|rod| rod.length_with(piece, kerf_in) <= rod_length_in + LENGTH_EPSILON);
        let rod = match slot {
            Some(index) => &mut rods[index],
            None => {
                rods.push(RodPlan::open());
                let last = rods.len() - 1;
                &mut rods[last]
            }
        };
        rod.used_length_in = rod.length_with(piece, kerf_in);
        rod.cuts.push(*piece);
    }

    for rod in &mut rods {
        rod.waste_in = (rod_length_in - rod.used_length_in).max(0.0);
    }

    let total_waste_in = rods.iter().map(|r| r.waste_in).sum();
    let patterns = summarize_patterns(&rods);

    CuttingPlan {
        pieces: sorted,
        rods,
        patterns,
        total_waste_in,
        oversized,
    }
}

/// Group rods by cut signature, most frequent first.
///
/// Patterns with equal frequency keep the order their first rod was opened.
pub fn summarize_patterns(rods: &[RodPlan]) -> Vec<CutPattern> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut patterns: Vec<CutPattern> = Vec::new();

    for rod in rods {
        let signature = rod.signature();
        match index.get(&signature) {
            Some(&i) => patterns[i].rod_count += 1,
            None => {
                index.insert(signature.clone(), patterns.len());
                patterns.push(CutPattern {
                    signature,
                    cuts: rod.sorted_cuts(),
                    rod_count: 1,
                    waste_per_rod_in: rod.waste_in,
                });
            }
        }
    }

    patterns.sort_by(|a, b| b.rod_count.cmp(&a.rod_count));
    patterns
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn reference_pieces() -> Vec<CutPiece> {
        // Two 3-panel structures: 4 of each kind
        let mut pieces = Vec::new();
        for _ in 0..4 {
            pieces.push(CutPiece::new(PieceType::Front, 24.0));
            pieces.push(CutPiece::new(PieceType::Rear, 72.84));
            pieces.push(CutPiece::new(PieceType::Hypo, 150.0));
        }
        pieces
    }

    #[test]
    fn test_empty_plan() {
        let plan = plan_cuts(&[], 164.0, 0.125);
        assert_eq!(plan.rod_count(), 0);
        assert_eq!(plan.total_waste_in, 0.0);
        assert!(plan.patterns.is_empty());
        assert!(plan.is_complete());
    }

    #[test]
    fn test_rods_never_overfilled() {
        let plan = plan_cuts(&reference_pieces(), 164.0, 0.125);
        for rod in &plan.rods {
            let pieces: f64 = rod.cuts.iter().map(|c| c.length_in).sum();
            let kerfs = rod.cuts.len().saturating_sub(1) as f64 * 0.125;
            assert_relative_eq!(rod.used_length_in, pieces + kerfs, epsilon = 1e-9);
            assert!(rod.used_length_in <= 164.0 + 1e-9);
            assert!(rod.waste_in >= 0.0);
        }
        let placed: usize = plan.rods.iter().map(|r| r.cuts.len()).sum();
        assert_eq!(placed, 12);
    }

    #[test]
    fn test_ffd_layout() {
        let plan = plan_cuts(&reference_pieces(), 164.0, 0.125);
        // Each 150" hypo takes its own rod; nothing else fits beside it
        // (150 + 0.125 + 24 > 164). Rears pair up: 72.84 * 2 + 0.125 = 145.805,
        // leaving 18.195, too short for a 24" front.
        // All four fronts share one rod.
        assert_eq!(plan.rod_count(), 4 + 2 + 1);
        assert_eq!(plan.rods[0].cuts[0].piece_type, PieceType::Hypo);
    }

    #[test]
    fn test_patterns_grouped_and_sorted() {
        let plan = plan_cuts(&reference_pieces(), 164.0, 0.125);
        assert_eq!(plan.patterns[0].rod_count, 4);
        assert_eq!(plan.patterns[0].cuts, vec![CutPiece::new(PieceType::Hypo, 150.0)]);
        let total: usize = plan.patterns.iter().map(|p| p.rod_count).sum();
        assert_eq!(total, plan.rod_count());
        assert_eq!(plan.top_patterns(1).len(), 1);
        assert_eq!(plan.top_patterns(100).len(), plan.patterns.len());
    }

    #[test]
    fn test_kerf_blocks_exact_pair() {
        // Two 82" pieces fill a rod exactly with no kerf, but not with one
        let pieces = vec![CutPiece::new(PieceType::Front, 82.0); 2];
        assert_eq!(plan_cuts(&pieces, 164.0, 0.0).rod_count(), 1);
        assert_eq!(plan_cuts(&pieces, 164.0, 0.125).rod_count(), 2);
    }

    #[test]
    fn test_oversized_pieces_reported() {
        let pieces = vec![
            CutPiece::new(PieceType::Hypo, 190.0),
            CutPiece::new(PieceType::Front, 24.0),
        ];
        let plan = plan_cuts(&pieces, 164.0, 0.125);
        assert!(!plan.is_complete());
        assert_eq!(plan.oversized.len(), 1);
        assert_eq!(plan.rod_count(), 1);
        assert_relative_eq!(plan.total_waste_in, 140.0);
    }

    #[test]
    fn test_deterministic() {
        let a = plan_cuts(&reference_pieces(), 164.0, 0.125);
        let b = plan_cuts(&reference_pieces(), 164.0, 0.125);
        assert_eq!(a, b);
    }

    #[test]
    fn test_signature_ignores_order() {
        let mut a = RodPlan::open();
        a.cuts = vec![CutPiece::new(PieceType::Front, 24.0), CutPiece::new(PieceType::Rear, 70.0)];
        let mut b = RodPlan::open();
        b.cuts = vec![CutPiece::new(PieceType::Rear, 70.0), CutPiece::new(PieceType::Front, 24.0)];
        assert_eq!(a.signature(), b.signature());
        assert_eq!(a.signature(), "Rear:70.000 + Front:24.000");
    }

    #[test]
    fn test_equal_length_mixed_types_share_a_pattern() {
        // At 0 degrees tilt front and rear legs come out the same length
        let mut a = RodPlan::open();
        a.cuts = vec![CutPiece::new(PieceType::Front, 24.0), CutPiece::new(PieceType::Rear, 24.0)];
        let mut b = RodPlan::open();
        b.cuts = vec![CutPiece::new(PieceType::Rear, 24.0), CutPiece::new(PieceType::Front, 24.0)];
        assert_eq!(a.signature(), "Front:24.000 + Rear:24.000");
        assert_eq!(a.signature(), b.signature());

        let patterns = summarize_patterns(&[a, b]);
        assert_eq!(patterns.len(), 1);
        assert_eq!(patterns[0].rod_count, 2);
        assert_eq!(
            patterns[0].cuts,
            vec![CutPiece::new(PieceType::Front, 24.0), CutPiece::new(PieceType::Rear, 24.0)]
        );
    }

    #[test]
    fn test_utilization() {
        let pieces = vec![CutPiece::new(PieceType::Front, 82.0)];
        let plan = plan_cuts(&pieces, 164.0, 0.125);
        assert_relative_eq!(plan.utilization_percent(164.0), 50.0);
    }
}
