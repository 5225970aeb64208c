//! # Rod Capacity
//!
//! How many panels fit end to end on one rod, leaving `gap` between
//! neighbours. For `k` panels the occupied length is
//!
//! ```text
//! k * panel_len + (k - 1) * gap
//! ```
//!
//! and the capacity is the largest `k` for which that is `<= rod_length`.
//!
//! ## Example
//!
//! ```rust
//! use rack_core::calculations::capacity::max_panels_per_rod;
//!
//! // 45" panels with a 5" gap on a 164" rod: 3 * 45 + 2 * 5 = 145
//! assert_eq!(max_panels_per_rod(45.0, 164.0, 5.0).unwrap(), 3);
//! ```

use crate::errors::{require_non_negative, require_positive, CalcError, CalcResult};

/// Float slack for length comparisons (in)
pub const LENGTH_EPSILON: f64 = 1e-9;

/// Length a row of `panels` occupies on the rod.
///
/// Zero panels occupy nothing.
pub fn structure_footprint_len(panels: usize, panel_len_in: f64, gap_in: f64) -> f64 {
    if panels == 0 {
        return 0.0;
    }
    let k = panels as f64;
    k * panel_len_in + (k - 1.0) * gap_in
}

/// Maximum number of panels that fit on one rod.
///
/// Returns `Ok(0)` when the panel is longer than the rod; use
/// [`require_capacity`] to turn that into an error at a request boundary.
///
/// # Errors
///
/// * `InvalidDimension` - `panel_len_in` or `rod_length_in` is not positive,
///   or `gap_in` is negative
pub fn max_panels_per_rod(panel_len_in: f64, rod_length_in: f64, gap_in: f64) -> CalcResult<usize> {
    require_positive("panel_len_in", panel_len_in)?;
    require_positive("rod_length_in", rod_length_in)?;
    require_non_negative("gap_in", gap_in)?;

    let fits = |k: usize| structure_footprint_len(k, panel_len_in, gap_in) <= rod_length_in + LENGTH_EPSILON;

    // Closed form, then nudge by one either way to absorb division rounding.
    let estimate = ((rod_length_in + gap_in) / (panel_len_in + gap_in)).floor();
    let mut k = if estimate.is_finite() && estimate > 0.0 {
        estimate as usize
    } else {
        0
    };
    while k < usize::MAX && fits(k + 1) {
        k += 1;
    }
    while k > 0 && !fits(k) {
        k -= 1;
    }
    Ok(k)
}

/// Capacity that is guaranteed to be at least one panel.
///
/// # Errors
///
/// * `InvalidDimension` - as for [`max_panels_per_rod`]
/// * `Infeasible` - a single panel is longer than the rod
pub fn require_capacity(panel_len_in: f64, rod_length_in: f64, gap_in: f64) -> CalcResult<usize> {
    let capacity = max_panels_per_rod(panel_len_in, rod_length_in, gap_in)?;
    if capacity == 0 {
        return Err(CalcError::infeasible(
            panel_len_in,
            rod_length_in,
            "Panel is longer than the rod stock; use a longer rod or rotate the panel",
        ));
    }
    Ok(capacity)
}
