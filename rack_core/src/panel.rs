//! # Panel Models
//!
//! A panel model is a plain record supplied by the panel registry. The
//! engine only cares about its two sides and which of them runs along the
//! rod, which is decided by the row orientation.
//!
//! ## Example
//!
//! ```rust
//! use rack_core::panel::{Orientation, PanelModel};
//!
//! let panel = PanelModel::new("p-540", "Mono 540W", 44.6, 89.7);
//!
//! let portrait = panel.dimensions(Orientation::Vertical).unwrap();
//! assert_eq!(portrait.panel_len_in, 89.7);
//! assert_eq!(portrait.panel_wid_in, 44.6);
//!
//! let landscape = panel.dimensions(Orientation::Horizontal).unwrap();
//! assert_eq!(landscape.panel_len_in, 44.6);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{require_positive, CalcResult};

/// A panel model from the external registry.
///
/// ## JSON Example
///
/// ```json
/// {
///   "id": "p-540",
///   "name": "Mono 540W",
///   "width": 44.6,
///   "height": 89.7,
///   "description": "Half-cut mono PERC"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelModel {
    /// Registry identifier
    pub id: String,

    /// Display name
    pub name: String,

    /// Panel width in inches
    pub width: f64,

    /// Panel height in inches
    pub height: f64,

    #[serde(default)]
    pub description: String,
}

impl PanelModel {
    pub fn new(id: impl Into<String>, name: impl Into<String>, width: f64, height: f64) -> Self {
        PanelModel {
            id: id.into(),
            name: name.into(),
            width,
            height,
            description: String::new(),
        }
    }

    /// Resolve which side runs along the rod for the given orientation.
    ///
    /// `Vertical` (portrait) puts the long side along the rod,
    /// `Horizontal` (landscape) puts the short side along it.
    pub fn dimensions(&self, orientation: Orientation) -> CalcResult<PanelDimensions> {
        require_positive("width", self.width)?;
        require_positive("height", self.height)?;

        let long = self.width.max(self.height);
        let short = self.width.min(self.height);
        let dims = match orientation {
            Orientation::Vertical => PanelDimensions::new(long, short),
            Orientation::Horizontal => PanelDimensions::new(short, long),
        };
        Ok(dims)
    }
}

/// Row orientation of the panels on a structure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Orientation {
    /// Portrait: long side along the rod
    #[default]
    Vertical,
    /// Landscape: short side along the rod
    Horizontal,
}

/// Panel sides resolved against the rod axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanelDimensions {
    /// Panel side along the rod (in)
    pub panel_len_in: f64,

    /// Panel side across the structure (in)
    pub panel_wid_in: f64,
}

impl PanelDimensions {
    pub fn new(panel_len_in: f64, panel_wid_in: f64) -> Self {
        PanelDimensions {
            panel_len_in,
            panel_wid_in,
        }
    }

    /// Check both sides are positive and finite.
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("panel_len_in", self.panel_len_in)?;
        require_positive("panel_wid_in", self.panel_wid_in)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientation_picks_long_side_for_vertical() {
        // Registry records are not guaranteed to list width < height
        let panel = PanelModel::new("p1", "Sideways", 80.0, 40.0);
        let dims = panel.dimensions(Orientation::Vertical).unwrap();
        assert_eq!(dims.panel_len_in, 80.0);
        assert_eq!(dims.panel_wid_in, 40.0);

        let dims = panel.dimensions(Orientation::Horizontal).unwrap();
        assert_eq!(dims.panel_len_in, 40.0);
        assert_eq!(dims.panel_wid_in, 80.0);
    }

    #[test]
    fn test_invalid_panel_dimensions() {
        let panel = PanelModel::new("p1", "Broken", 0.0, 40.0);
        assert!(panel.dimensions(Orientation::Vertical).is_err());

        assert!(PanelDimensions::new(45.0, f64::NAN).validate().is_err());
    }

    #[test]
    fn test_serialization() {
        let json = r#"{"id":"p9","name":"Test","width":41.0,"height":81.0}"#;
        let panel: PanelModel = serde_json::from_str(json).unwrap();
        assert_eq!(panel.description, "");
        assert_eq!(serde_json::to_string(&Orientation::Horizontal).unwrap(), "\"Horizontal\"");
    }
}
