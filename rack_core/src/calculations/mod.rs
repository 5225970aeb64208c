//! # Rack Calculations
//!
//! Each stage is a pure function over plain values, and the stages chain in
//! this order:
//!
//! ```text
//! capacity -> distribution -> legs -> rod_totals -> cutting
//!                                          \-> cost
//!                                          \-> roof
//! ```
//!
//! [`rack::calculate`] runs the whole chain from a single [`RackInput`].
//!
//! ## Available Calculations
//!
//! - [`capacity`] - Panels per rod
//! - [`distribution`] - Panels into structures (uniform or balanced)
//! - [`legs`] - Front/rear leg and sloped rod lengths
//! - [`rod_totals`] - Piece counts and total inches
//! - [`cutting`] - First-Fit-Decreasing cutting plan
//! - [`cost`] - Material and hardware pricing
//! - [`roof`] - Advisory roof fit check
//! - [`rack`] - Full estimate pipeline

pub mod capacity;
pub mod cost;
pub mod cutting;
pub mod distribution;
pub mod legs;
pub mod rack;
pub mod rod_totals;
pub mod roof;

// Re-export commonly used types
pub use cost::CostBreakdown;
pub use cutting::{CutPiece, CuttingPlan, PieceType, RodPlan};
pub use distribution::{DistributionStrategy, StructureGroup};
pub use legs::{LegSet, RiseVariant};
pub use rack::{RackEstimate, RackInput};
pub use rod_totals::{RodSummary, RodTotals, StructureBreakdown};
pub use roof::{RoofDimensions, RoofFit};
