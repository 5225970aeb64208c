//! # rack_core - Solar Rack Fabrication Estimator
//!
//! `rack_core` works out what it takes to fabricate ground or roof mounting
//! racks for a row of solar panels from fixed-length rod stock: how many
//! panels each structure carries, how long the legs and sloped rods are, how
//! to cut them from rods with the least waste, and what the job costs.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Explicit Variants**: Where shops disagree on a formula, the caller picks
//!
//! ## Quick Start
//!
//! ```rust
//! use rack_core::calculations::rack::{calculate, PanelSource, RackInput};
//! use rack_core::panel::PanelDimensions;
//! use rack_core::settings::PriceConfig;
//!
//! let input = RackInput::new(
//!     "Array A",
//!     PanelSource::Dimensions(PanelDimensions::new(45.0, 90.0)),
//!     24.0,
//!     6,
//! )
//! .with_prices(PriceConfig { rod_price_per_rod: 820.0, ..Default::default() });
//!
//! let estimate = calculate(&input).unwrap();
//! let rods = estimate.rod_order.planned_rods.unwrap_or(estimate.rod_order.lower_bound_rods);
//! println!("{} rods, total {:.2}", rods, estimate.cost.unwrap().total);
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Capacity, distribution, legs, totals, cutting, cost, roof
//! - [`inventory`] - Offcut inventory reconciliation
//! - [`panel`] - Panel models and orientation
//! - [`settings`] - Shop settings and price sheet
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod errors;
pub mod inventory;
pub mod panel;
pub mod settings;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::rack::{calculate, PanelSource, RackEstimate, RackInput};
pub use errors::{CalcError, CalcResult};
pub use inventory::{consume, RequiredLength, UsablePiece};
pub use panel::{Orientation, PanelDimensions, PanelModel};
pub use settings::{PriceConfig, RackSettings};
