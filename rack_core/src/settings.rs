//! # Estimate Settings
//!
//! Shop constants (rod stock length, panel gap, blade kerf, tilt) and the
//! price sheet used for costing. Both deserialize with defaults for every
//! missing field, so a request only has to spell out what differs from the
//! shop standard.
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "rod_length_in": 164.0,
//!   "tilt_angle_deg": 19.0,
//!   "distribution": "Balanced"
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::distribution::DistributionStrategy;
use crate::calculations::legs::RiseVariant;
use crate::errors::{require_non_negative, require_positive, CalcError, CalcResult};

/// Standard rod stock length (in)
pub const ROD_LENGTH_IN: f64 = 164.0;

/// Gap left between neighbouring panels on a rod (in)
pub const PANEL_GAP_IN: f64 = 5.0;

/// Saw blade width lost per cut (in)
pub const KERF_IN: f64 = 0.125;

/// Default panel tilt from horizontal (degrees)
pub const TILT_ANGLE_DEG: f64 = 19.0;

/// Per-structure cost in the balanced distributor
pub const STRUCTURE_PENALTY: f64 = 0.35;

/// Length tolerance when matching inventory offcuts (in)
pub const INVENTORY_TOLERANCE_IN: f64 = 0.25;

/// Shortest rod leftover worth keeping as inventory (in)
pub const MIN_OFFCUT_IN: f64 = 12.0;

/// Shop settings for a single estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RackSettings {
    /// Raw rod stock length (in)
    pub rod_length_in: f64,

    /// Gap between panels along a rod (in)
    pub gap_in: f64,

    /// Blade kerf per cut (in)
    pub kerf_in: f64,

    /// Panel tilt from horizontal (degrees)
    pub tilt_angle_deg: f64,

    /// How panels are split into structures
    pub distribution: DistributionStrategy,

    /// Which triangle-height formula to use for rear legs
    pub rise: RiseVariant,

    /// Fragmentation penalty for the balanced distributor
    pub structure_penalty: f64,

    /// Inventory match tolerance (in)
    pub inventory_tolerance_in: f64,

    /// Minimum leftover length harvested as an offcut (in)
    pub min_offcut_in: f64,
}

impl Default for RackSettings {
    fn default() -> Self {
        RackSettings {
            rod_length_in: ROD_LENGTH_IN,
            gap_in: PANEL_GAP_IN,
            kerf_in: KERF_IN,
            tilt_angle_deg: TILT_ANGLE_DEG,
            distribution: DistributionStrategy::default(),
            rise: RiseVariant::default(),
            structure_penalty: STRUCTURE_PENALTY,
            inventory_tolerance_in: INVENTORY_TOLERANCE_IN,
            min_offcut_in: MIN_OFFCUT_IN,
        }
    }
}

impl RackSettings {
    /// Validate settings values.
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("rod_length_in", self.rod_length_in)?;
        require_non_negative("gap_in", self.gap_in)?;
        require_non_negative("kerf_in", self.kerf_in)?;
        require_non_negative("inventory_tolerance_in", self.inventory_tolerance_in)?;
        require_non_negative("min_offcut_in", self.min_offcut_in)?;

        if !self.tilt_angle_deg.is_finite() || self.tilt_angle_deg < 0.0 || self.tilt_angle_deg >= 90.0 {
            return Err(CalcError::invalid_input(
                "tilt_angle_deg",
                self.tilt_angle_deg.to_string(),
                "Tilt angle must be in [0, 90) degrees",
            ));
        }
        if !self.structure_penalty.is_finite() || self.structure_penalty < 0.0 {
            return Err(CalcError::invalid_input(
                "structure_penalty",
                self.structure_penalty.to_string(),
                "Structure penalty must be a non-negative number",
            ));
        }
        Ok(())
    }
}

/// Unit prices and fixed charges for costing.
///
/// Hardware quantities are not configurable here: base plates, anchor
/// bolts, angle fitters and normal bolts are fixed per structure. Only
/// U-clamps scale with panel count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriceConfig {
    /// Price of one full-length rod
    pub rod_price_per_rod: f64,
    pub base_plate_price: f64,
    pub anchor_bolt_price: f64,
    pub angle_fitter_price: f64,
    pub normal_bolt_price: f64,
    pub u_clamp_price: f64,

    /// U-clamps per panel (default 4)
    pub u_clamps_per_panel: u32,

    /// Set false when panels are fixed some other way
    pub include_u_clamps: bool,

    /// Flat fabrication charge
    pub fabrication_charge: f64,

    /// Flat installation charge
    pub installation_charge: f64,

    /// Wastage allowance as a percent of the subtotal
    pub wastage_percent: f64,
}

impl Default for PriceConfig {
    fn default() -> Self {
        PriceConfig {
            rod_price_per_rod: 0.0,
            base_plate_price: 0.0,
            anchor_bolt_price: 0.0,
            angle_fitter_price: 0.0,
            normal_bolt_price: 0.0,
            u_clamp_price: 0.0,
            u_clamps_per_panel: 4,
            include_u_clamps: true,
            fabrication_charge: 0.0,
            installation_charge: 0.0,
            wastage_percent: 0.0,
        }
    }
}

impl PriceConfig {
    /// Validate that no price or charge is negative or non-finite.
    pub fn validate(&self) -> CalcResult<()> {
        let fields = [
            ("rod_price_per_rod", self.rod_price_per_rod),
            ("base_plate_price", self.base_plate_price),
            ("anchor_bolt_price", self.anchor_bolt_price),
            ("angle_fitter_price", self.angle_fitter_price),
            ("normal_bolt_price", self.normal_bolt_price),
            ("u_clamp_price", self.u_clamp_price),
            ("fabrication_charge", self.fabrication_charge),
            ("installation_charge", self.installation_charge),
            ("wastage_percent", self.wastage_percent),
        ];
        for (field, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(CalcError::invalid_input(
                    field,
                    value.to_string(),
                    "Prices and charges must be non-negative numbers",
                ));
            }
        }
        Ok(())
    }
}
