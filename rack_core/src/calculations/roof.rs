//! # Roof Fit Check
//!
//! Advisory check of whether the planned structures fit on a flat roof.
//!
//! Structures stand side by side along the roof length, each one panel
//! width wide, with `gap` between neighbours. Each structure's footprint
//! depth is the horizontal run of its sloped rod, `hypotenuse * cos(tilt)`.
//!
//! No azimuth projection or footprint shrink is applied; this is a plain
//! rectangle check.

use serde::{Deserialize, Serialize};

use crate::calculations::rod_totals::StructureBreakdown;
use crate::errors::{require_positive, CalcResult};
use crate::units::Degrees;

/// Usable roof rectangle (in).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoofDimensions {
    /// Run along which structures are lined up
    pub length_in: f64,
    /// Front-to-back depth
    pub depth_in: f64,
}

impl RoofDimensions {
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("roof.length_in", self.length_in)?;
        require_positive("roof.depth_in", self.depth_in)?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoofFit {
    pub required_length_in: f64,
    pub required_depth_in: f64,
    pub length_margin_in: f64,
    pub depth_margin_in: f64,
    pub fits: bool,
}

pub fn check_roof_fit(
    roof: &RoofDimensions,
    breakdown: &[StructureBreakdown],
    panel_wid_in: f64,
    gap_in: f64,
    tilt_angle_deg: f64,
) -> RoofFit {
    let structures: usize = breakdown.iter().map(|b| b.count).sum();
    let required_length_in = if structures == 0 {
        0.0
    } else {
        structures as f64 * panel_wid_in + (structures - 1) as f64 * gap_in
    };

    let cos_tilt = Degrees(tilt_angle_deg).cos();
    let required_depth_in = breakdown
        .iter()
        .map(|b| b.legs.hypotenuse_rod_length_in * cos_tilt)
        .fold(0.0, f64::max);

    let length_margin_in = roof.length_in - required_length_in;
    let depth_margin_in = roof.depth_in - required_depth_in;

    RoofFit {
        required_length_in,
        required_depth_in,
        length_margin_in,
        depth_margin_in,
        fits: length_margin_in >= 0.0 && depth_margin_in >= 0.0,
    }
}
