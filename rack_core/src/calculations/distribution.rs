//! # Structure Distribution
//!
//! Splits a panel count into structures, none holding more panels than a
//! rod can carry. Two strategies are available and the caller picks one:
//!
//! - [`DistributionStrategy::GreedyUniform`] fills rods to capacity and puts
//!   the remainder on one short structure.
//! - [`DistributionStrategy::Balanced`] runs a small dynamic program that
//!   trades structure aspect ratio against the number of structures.
//!
//! ## Example
//!
//! ```rust
//! use rack_core::calculations::distribution::{distribute_uniform, StructureGroup};
//!
//! let groups = distribute_uniform(5, 3).unwrap();
//! assert_eq!(groups, vec![StructureGroup::new(3, 1), StructureGroup::new(2, 1)]);
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::capacity::structure_footprint_len;
use crate::errors::{require_non_negative, CalcError, CalcResult};
use crate::panel::PanelDimensions;

/// How panels are partitioned into structures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DistributionStrategy {
    /// Full rods first, then one remainder structure
    #[default]
    GreedyUniform,
    /// Aspect-penalized dynamic program
    Balanced,
}

/// `count` identical structures of `panels_per_structure` panels each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureGroup {
    pub panels_per_structure: usize,
    pub count: usize,
}

impl StructureGroup {
    pub fn new(panels_per_structure: usize, count: usize) -> Self {
        StructureGroup {
            panels_per_structure,
            count,
        }
    }

    /// Panels carried by the whole group
    pub fn panels(&self) -> usize {
        self.panels_per_structure * self.count
    }
}

/// Total panels across a list of groups
pub fn total_panels(groups: &[StructureGroup]) -> usize {
    groups.iter().map(StructureGroup::panels).sum()
}

/// Total physical structures across a list of groups
pub fn total_structures(groups: &[StructureGroup]) -> usize {
    groups.iter().map(|g| g.count).sum()
}

/// Partition `total_panels` with the chosen strategy.
///
/// `dims`, `gap_in` and `structure_penalty` are only read by the balanced
/// strategy.
pub fn distribute(
    strategy: DistributionStrategy,
    total_panels: usize,
    max_per_rod: usize,
    dims: &PanelDimensions,
    gap_in: f64,
    structure_penalty: f64,
) -> CalcResult<Vec<StructureGroup>> {
    match strategy {
        DistributionStrategy::GreedyUniform => distribute_uniform(total_panels, max_per_rod),
        DistributionStrategy::Balanced => {
            distribute_balanced(total_panels, max_per_rod, dims, gap_in, structure_penalty)
        }
    }
}

/// Greedy-uniform partition: at most two distinct group sizes.
pub fn distribute_uniform(total_panels: usize, max_per_rod: usize) -> CalcResult<Vec<StructureGroup>> {
    if total_panels == 0 {
        return Ok(Vec::new());
    }
    check_capacity(max_per_rod)?;

    let full_groups = total_panels / max_per_rod;
    let remainder = total_panels % max_per_rod;

    let mut groups = Vec::with_capacity(2);
    if full_groups > 0 {
        groups.push(StructureGroup::new(max_per_rod, full_groups));
    }
    if remainder > 0 {
        groups.push(StructureGroup::new(remainder, 1));
    }
    Ok(groups)
}

/// Aspect penalty of a `k`-panel structure: `|ln(footprint / panel_wid)|`.
///
/// Zero for a square footprint, growing as the structure gets long and
/// thin or short and wide.
pub fn aspect_penalty(k: usize, dims: &PanelDimensions, gap_in: f64) -> f64 {
    let footprint = structure_footprint_len(k, dims.panel_len_in, gap_in);
    (footprint / dims.panel_wid_in).ln().abs()
}

/// Balanced partition minimizing `Σ (aspect_penalty(k) + structure_penalty)`.
///
/// Groups come back sorted by panel count, largest first.
pub fn distribute_balanced(
    total_panels: usize,
    max_per_rod: usize,
    dims: &PanelDimensions,
    gap_in: f64,
    structure_penalty: f64,
) -> CalcResult<Vec<StructureGroup>> {
    if total_panels == 0 {
        return Ok(Vec::new());
    }
    check_capacity(max_per_rod)?;
    dims.validate()?;
    require_non_negative("gap_in", gap_in)?;

    let max_k = max_per_rod.min(total_panels);
    let costs: Vec<f64> = (0..=max_k)
        .map(|k| if k == 0 { 0.0 } else { aspect_penalty(k, dims, gap_in) + structure_penalty })
        .collect();

    let mut dp = vec![f64::INFINITY; total_panels + 1];
    let mut choice = vec![0usize; total_panels + 1];
    dp[0] = 0.0;

    for n in 1..=total_panels {
        // Larger parts first so ties resolve toward fewer structures
        for k in (1..=max_k.min(n)).rev() {
            let candidate = dp[n - k] + costs[k];
            if candidate < dp[n] {
                dp[n] = candidate;
                choice[n] = k;
            }
        }
    }

    let mut counts = vec![0usize; max_k + 1];
    let mut n = total_panels;
    while n > 0 {
        let k = choice[n];
        counts[k] += 1;
        n -= k;
    }

    let groups = counts
        .iter()
        .enumerate()
        .rev()
        .filter(|(k, count)| *k > 0 && **count > 0)
        .map(|(k, count)| StructureGroup::new(k, *count))
        .collect();
    Ok(groups)
}

fn check_capacity(max_per_rod: usize) -> CalcResult<()> {
    if max_per_rod == 0 {
        return Err(CalcError::no_capacity("No panel fits on the rod; capacity must be at least one"));
    }
    Ok(())
}
