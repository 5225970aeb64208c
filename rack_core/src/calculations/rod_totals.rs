//! # Rod Totals
//!
//! Rolls per-structure leg lengths up into piece counts and total inches
//! of rod for the whole job.
//!
//! `total_rods_needed` is `ceil(total_inches / rod_length)`: a lower bound
//! that ignores kerf and packing. The cutting plan's rod count is the number
//! actually consumed when the pieces are laid out on real rods, and is
//! usually higher. Both are reported.

use serde::{Deserialize, Serialize};

use crate::calculations::capacity::LENGTH_EPSILON;
use crate::calculations::distribution::StructureGroup;
use crate::calculations::legs::{legs_for_structure, LegSet, RiseVariant, LEGS_PER_STRUCTURE};

/// One structure group with its legs and material needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructureBreakdown {
    pub panels_per_structure: usize,
    pub count: usize,
    pub legs: LegSet,
    pub front_legs: usize,
    pub rear_legs: usize,
    pub hypo_rods: usize,
    pub front_inches: f64,
    pub rear_inches: f64,
    pub hypo_inches: f64,
}

impl StructureBreakdown {
    /// Build the breakdown for `count` structures sharing one leg set.
    pub fn new(group: StructureGroup, legs: LegSet) -> Self {
        let pieces = LEGS_PER_STRUCTURE * group.count;
        let per_type = pieces as f64;
        StructureBreakdown {
            panels_per_structure: group.panels_per_structure,
            count: group.count,
            legs,
            front_legs: pieces,
            rear_legs: pieces,
            hypo_rods: pieces,
            front_inches: per_type * legs.front_leg_height_in,
            rear_inches: per_type * legs.rear_leg_height_in,
            hypo_inches: per_type * legs.hypotenuse_rod_length_in,
        }
    }

    pub fn total_inches(&self) -> f64 {
        self.front_inches + self.rear_inches + self.hypo_inches
    }
}

/// Job-wide rod totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RodTotals {
    pub total_front_legs: usize,
    pub total_rear_legs: usize,
    pub total_hypo_rods: usize,
    pub total_inches_required: f64,
    /// Inches-based lower bound on rods to buy
    pub total_rods_needed: usize,
    /// True when every structure has the same panel count
    pub is_uniform: bool,
}

/// Breakdown plus totals, as reported under `rods`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RodSummary {
    pub breakdown: Vec<StructureBreakdown>,
    pub totals: RodTotals,
}

/// Compute the per-group breakdown.
pub fn structure_breakdown(
    groups: &[StructureGroup],
    front_leg_height_in: f64,
    panel_len_in: f64,
    tilt_angle_deg: f64,
    gap_in: f64,
    rise: RiseVariant,
) -> Vec<StructureBreakdown> {
    groups
        .iter()
        .map(|group| {
            let legs = legs_for_structure(
                front_leg_height_in,
                group.panels_per_structure,
                panel_len_in,
                tilt_angle_deg,
                gap_in,
                rise,
            );
            StructureBreakdown::new(*group, legs)
        })
        .collect()
}

/// Sum a breakdown into job totals.
pub fn aggregate(breakdown: &[StructureBreakdown], rod_length_in: f64) -> RodTotals {
    let total_front_legs = breakdown.iter().map(|b| b.front_legs).sum();
    let total_rear_legs = breakdown.iter().map(|b| b.rear_legs).sum();
    let total_hypo_rods = breakdown.iter().map(|b| b.hypo_rods).sum();
    let total_inches_required: f64 = breakdown.iter().map(StructureBreakdown::total_inches).sum();

    RodTotals {
        total_front_legs,
        total_rear_legs,
        total_hypo_rods,
        total_inches_required,
        total_rods_needed: rods_for_inches(total_inches_required, rod_length_in),
        is_uniform: breakdown.len() == 1,
    }
}

/// `ceil(inches / rod_length)`, ignoring float noise just above a whole rod.
fn rods_for_inches(inches: f64, rod_length_in: f64) -> usize {
    if inches <= 0.0 {
        return 0;
    }
    ((inches - LENGTH_EPSILON) / rod_length_in).ceil().max(0.0) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn breakdown_for(groups: &[StructureGroup]) -> Vec<StructureBreakdown> {
        structure_breakdown(groups, 24.0, 45.0, 19.0, 5.0, RiseVariant::FullSpan)
    }

    #[test]
    fn test_piece_counts_per_structure() {
        let breakdown = breakdown_for(&[StructureGroup::new(3, 2)]);
        assert_eq!(breakdown.len(), 1);
        let b = &breakdown[0];
        assert_eq!(b.front_legs, 4);
        assert_eq!(b.rear_legs, 4);
        assert_eq!(b.hypo_rods, 4);
        assert_relative_eq!(b.front_inches, 96.0);
        assert_relative_eq!(b.hypo_inches, 600.0);
    }

    #[test]
    fn test_totals() {
        let breakdown = breakdown_for(&[StructureGroup::new(3, 2), StructureGroup::new(1, 1)]);
        let totals = aggregate(&breakdown, 164.0);

        assert_eq!(totals.total_front_legs, 6);
        assert_eq!(totals.total_rear_legs, 6);
        assert_eq!(totals.total_hypo_rods, 6);
        assert!(!totals.is_uniform);

        let expected: f64 = breakdown.iter().map(|b| b.total_inches()).sum();
        assert_relative_eq!(totals.total_inches_required, expected);
        assert_eq!(totals.total_rods_needed, (expected / 164.0).ceil() as usize);
    }

    #[test]
    fn test_uniform_flag() {
        let totals = aggregate(&breakdown_for(&[StructureGroup::new(3, 4)]), 164.0);
        assert!(totals.is_uniform);
    }

    #[test]
    fn test_empty_totals() {
        let totals = aggregate(&[], 164.0);
        assert_eq!(totals.total_inches_required, 0.0);
        assert_eq!(totals.total_rods_needed, 0);
        assert_eq!(totals.total_front_legs, 0);
    }

    #[test]
    fn test_rods_for_whole_multiple() {
        assert_eq!(rods_for_inches(328.0, 164.0), 2);
        assert_eq!(rods_for_inches(328.5, 164.0), 3);
        assert_eq!(rods_for_inches(1.0, 164.0), 1);
    }
}
