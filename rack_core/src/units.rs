//! # Unit Types
//!
//! Lightweight newtype wrappers for the handful of units a rack estimate
//! deals in. They serialize as bare numbers.
//!
//! Rod stock is bought and cut in inches, so every length in the engine is
//! carried in inches. Feet only show up at the edges (roof dimensions typed
//! by a user, summary printouts).
//!
//! ## Example
//!
//! ```rust
//! use rack_core::units::{Degrees, Feet, Inches};
//!
//! let roof = Feet(30.0);
//! let roof_in: Inches = roof.into();
//! assert_eq!(roof_in.0, 360.0);
//!
//! let tilt = Degrees(30.0);
//! assert!((tilt.sin() - 0.5).abs() < 1e-12);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Length Units
// ============================================================================

/// Length in feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Feet(pub f64);

/// Length in inches
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inches(pub f64);

impl From<Feet> for Inches {
    fn from(ft: Feet) -> Self {
        Inches(ft.0 * 12.0)
    }
}

impl From<Inches> for Feet {
    fn from(inches: Inches) -> Self {
        Feet(inches.0 / 12.0)
    }
}

impl fmt::Display for Inches {
    /// Formats as feet and inches, e.g. `13' 8.00"`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0.0 { "-" } else { "" };
        let total = self.0.abs();
        let feet = (total / 12.0).floor();
        let inches = total - feet * 12.0;
        write!(f, "{}{}' {:.2}\"", sign, feet as i64, inches)
    }
}

// ============================================================================
// Angle Units
// ============================================================================

/// Angle in degrees
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Degrees(pub f64);

impl Degrees {
    /// Convert to radians
    pub fn to_radians(self) -> f64 {
        self.0 * std::f64::consts::PI / 180.0
    }

    pub fn sin(self) -> f64 {
        self.to_radians().sin()
    }

    pub fn cos(self) -> f64 {
        self.to_radians().cos()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feet_to_inches() {
        let ft = Feet(13.0);
        let inches: Inches = ft.into();
        assert_eq!(inches.0, 156.0);
    }

    #[test]
    fn test_degrees_trig() {
        assert!((Degrees(90.0).sin() - 1.0).abs() < 1e-12);
        assert!((Degrees(60.0).cos() - 0.5).abs() < 1e-12);
        assert!(Degrees(0.0).sin().abs() < 1e-12);
    }

    #[test]
    fn test_inches_to_feet() {
        let ft: Feet = Inches(164.0).into();
        assert!((ft.0 - 13.666_666).abs() < 1e-5);
    }

    #[test]
    fn test_feet_inches_display() {
        assert_eq!(Inches(164.0).to_string(), "13' 8.00\"");
        assert_eq!(Inches(6.5).to_string(), "0' 6.50\"");
    }

    #[test]
    fn test_serialization() {
        let len = Inches(72.84);
        let json = serde_json::to_string(&len).unwrap();
        assert_eq!(json, "72.84");

        let roundtrip: Inches = serde_json::from_str(&json).unwrap();
        assert_eq!(len, roundtrip);
    }
}
