//! # Leg Geometry
//!
//! Every structure stands on two front legs and two rear legs, with two
//! sloped rods running from front to rear under the panels. The sloped rod
//! is cut to the flat span of the panel row, and the rear legs are raised
//! by the rise of that span at the tilt angle:
//!
//! ```text
//! hypotenuse     = (panel_len + gap) * panels
//! triangle_h     = hypotenuse * sin(tilt) [* 2/3 for SupportFraction]
//! rear_leg       = front_leg + triangle_h
//! ```
//!
//! The sloped rod length is the un-tilted span, not the true hypotenuse of
//! the tilted surface.
//!
//! ## Example
//!
//! ```rust
//! use rack_core::calculations::legs::{legs_for_structure, RiseVariant};
//!
//! let legs = legs_for_structure(24.0, 3, 45.0, 19.0, 5.0, RiseVariant::FullSpan);
//! assert_eq!(legs.hypotenuse_rod_length_in, 150.0);
//! assert!((legs.rear_leg_height_in - 72.84).abs() < 0.01);
//! ```

use serde::{Deserialize, Serialize};

use crate::units::Degrees;

/// Fraction of the span the rear support sits at in the support-fraction variant
pub const SUPPORT_FRACTION: f64 = 2.0 / 3.0;

/// Legs and sloped rods per structure, for each kind
pub const LEGS_PER_STRUCTURE: usize = 2;

/// Triangle-height formula for the rear leg
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RiseVariant {
    /// Rise over the full span
    #[default]
    FullSpan,
    /// Rise over two thirds of the span
    SupportFraction,
}

impl RiseVariant {
    pub fn factor(self) -> f64 {
        match self {
            RiseVariant::FullSpan => 1.0,
            RiseVariant::SupportFraction => SUPPORT_FRACTION,
        }
    }
}

/// Cut lengths for one structure's legs and sloped rods (in).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LegSet {
    pub front_leg_height_in: f64,
    pub rear_leg_height_in: f64,
    pub hypotenuse_rod_length_in: f64,
    pub triangle_height_in: f64,
    pub panels_per_structure: usize,
}

/// Compute legs for one structure.
///
/// Inputs are assumed validated by the caller.
pub fn legs_for_structure(
    front_leg_height_in: f64,
    panels_per_structure: usize,
    panel_len_in: f64,
    tilt_angle_deg: f64,
    gap_in: f64,
    rise: RiseVariant,
) -> LegSet {
    let hypotenuse = (panel_len_in + gap_in) * panels_per_structure as f64;
    let triangle_height = hypotenuse * Degrees(tilt_angle_deg).sin() * rise.factor();

    LegSet {
        front_leg_height_in,
        rear_leg_height_in: front_leg_height_in + triangle_height,
        hypotenuse_rod_length_in: hypotenuse,
        triangle_height_in: triangle_height,
        panels_per_structure,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_reference_structure() {
        let legs = legs_for_structure(24.0, 3, 45.0, 19.0, 5.0, RiseVariant::FullSpan);
        assert_relative_eq!(legs.hypotenuse_rod_length_in, 150.0);
        // 150 * sin(19°) = 48.835...
        assert_relative_eq!(legs.triangle_height_in, 48.835, epsilon = 0.01);
        assert_relative_eq!(legs.rear_leg_height_in, 72.835, epsilon = 0.01);
        assert_eq!(legs.front_leg_height_in, 24.0);
        assert_eq!(legs.panels_per_structure, 3);
    }

    #[test]
    fn test_support_fraction() {
        let full = legs_for_structure(24.0, 3, 45.0, 19.0, 5.0, RiseVariant::FullSpan);
        let partial = legs_for_structure(24.0, 3, 45.0, 19.0, 5.0, RiseVariant::SupportFraction);
        assert_relative_eq!(partial.triangle_height_in, full.triangle_height_in * 2.0 / 3.0, epsilon = 1e-12);
        assert_eq!(partial.hypotenuse_rod_length_in, full.hypotenuse_rod_length_in);
    }

    #[test]
    fn test_flat_tilt() {
        let legs = legs_for_structure(30.0, 2, 80.0, 0.0, 5.0, RiseVariant::FullSpan);
        assert_relative_eq!(legs.rear_leg_height_in, 30.0);
        assert_relative_eq!(legs.hypotenuse_rod_length_in, 170.0);
    }

    #[test]
    fn test_rear_leg_grows_with_panels() {
        let one = legs_for_structure(24.0, 1, 45.0, 19.0, 5.0, RiseVariant::FullSpan);
        let three = legs_for_structure(24.0, 3, 45.0, 19.0, 5.0, RiseVariant::FullSpan);
        assert!(three.rear_leg_height_in > one.rear_leg_height_in);
    }
}
