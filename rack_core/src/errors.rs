//! # Error Types
//!
//! Structured error types for rack_core. Every failure a caller can act on
//! carries the offending field and value so a form layer can point at it.
//!
//! Two "soft" outcomes are deliberately not errors:
//!
//! - a stage whose upstream input is missing returns `None`
//!   (see [`crate::calculations::cost::calculate_cost`])
//! - an inventory reconciliation that cannot satisfy every requirement
//!   reports the shortfall as data (see [`crate::inventory::ReconcileOutcome`])
//!
//! ## Example
//!
//! ```rust
//! use rack_core::errors::{CalcError, CalcResult};
//!
//! fn validate_leg(front_leg_height_in: f64) -> CalcResult<()> {
//!     if front_leg_height_in <= 0.0 {
//!         return Err(CalcError::invalid_dimension(
//!             "front_leg_height_in",
//!             front_leg_height_in.to_string(),
//!             "Front leg height must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_leg(-1.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for rack_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for rack calculations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// A length or count is zero, negative, or not finite
    #[error("Invalid dimension for '{field}': {value} - {reason}")]
    InvalidDimension {
        field: String,
        value: String,
        reason: String,
    },

    /// A panel does not fit on a rod even once
    ///
    /// The lengths are filled in when the caller knows them. The
    /// distribution stage only sees a capacity of zero.
    #[error("Infeasible: {reason}")]
    Infeasible {
        #[serde(default)]
        panel_len_in: Option<f64>,
        #[serde(default)]
        rod_length_in: Option<f64>,
        reason: String,
    },

    /// A non-dimensional input is out of range
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl CalcError {
    /// Create an InvalidDimension error
    pub fn invalid_dimension(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidDimension {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an Infeasible error for a panel that is longer than the rod
    pub fn infeasible(panel_len_in: f64, rod_length_in: f64, reason: impl Into<String>) -> Self {
        CalcError::Infeasible {
            panel_len_in: Some(panel_len_in),
            rod_length_in: Some(rod_length_in),
            reason: format!(
                "panel length {} in does not fit on a {} in rod - {}",
                panel_len_in,
                rod_length_in,
                reason.into()
            ),
        }
    }

    /// Create an Infeasible error from a zero rod capacity alone
    pub fn no_capacity(reason: impl Into<String>) -> Self {
        CalcError::Infeasible {
            panel_len_in: None,
            rod_length_in: None,
            reason: reason.into(),
        }
    }

    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Whether the user can fix this by changing their request
    pub fn is_user_error(&self) -> bool {
        !matches!(self, CalcError::SerializationError { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidDimension { .. } => "INVALID_DIMENSION",
            CalcError::Infeasible { .. } => "INFEASIBLE",
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(e: serde_json::Error) -> Self {
        CalcError::SerializationError { reason: e.to_string() }
    }
}

/// Reject a length that is non-finite or not strictly positive.
pub(crate) fn require_positive(field: &str, value: f64) -> CalcResult<()> {
    if !value.is_finite() {
        return Err(CalcError::invalid_dimension(field, value.to_string(), "Value must be finite"));
    }
    if value <= 0.0 {
        return Err(CalcError::invalid_dimension(field, value.to_string(), "Value must be positive"));
    }
    Ok(())
}

/// Reject a length that is non-finite or negative. Zero is allowed.
pub(crate) fn require_non_negative(field: &str, value: f64) -> CalcResult<()> {
    if !value.is_finite() {
        return Err(CalcError::invalid_dimension(field, value.to_string(), "Value must be finite"));
    }
    if value < 0.0 {
        return Err(CalcError::invalid_dimension(field, value.to_string(), "Value cannot be negative"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_dimension("panel_len_in", "-5", "Value must be positive");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"InvalidDimension\""));
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::infeasible(200.0, 164.0, "too long").error_code(), "INFEASIBLE");
        assert_eq!(
            CalcError::invalid_input("tilt_angle_deg", "95", "out of range").error_code(),
            "INVALID_INPUT"
        );
    }

    #[test]
    fn test_infeasible_is_distinct_from_invalid_dimension() {
        let infeasible = CalcError::infeasible(200.0, 164.0, "too long");
        assert!(!matches!(infeasible, CalcError::InvalidDimension { .. }));
        assert!(infeasible.is_user_error());
        assert_eq!(
            infeasible.to_string(),
            "Infeasible: panel length 200 in does not fit on a 164 in rod - too long"
        );
    }

    #[test]
    fn test_no_capacity_shares_infeasible_code() {
        let error = CalcError::no_capacity("capacity is zero");
        assert_eq!(error.error_code(), "INFEASIBLE");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"panel_len_in\":null"));
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_require_positive() {
        assert!(require_positive("x", 1.0).is_ok());
        assert!(require_positive("x", 0.0).is_err());
        assert!(require_positive("x", f64::NAN).is_err());
        assert!(require_positive("x", f64::INFINITY).is_err());
        assert!(require_non_negative("x", 0.0).is_ok());
        assert!(require_non_negative("x", -0.1).is_err());
    }
}
