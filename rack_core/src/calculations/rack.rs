//! # Rack Estimate
//!
//! Runs the full chain for one request: validate, size structures, compute
//! legs, total the rod, plan the cuts, price the job and check the roof.
//!
//! ## Example
//!
//! ```rust
//! use rack_core::calculations::rack::{calculate, PanelSource, RackInput};
//! use rack_core::panel::{Orientation, PanelModel};
//!
//! let input = RackInput::new(
//!     "North roof",
//!     PanelSource::Model {
//!         model: PanelModel::new("p-540", "Mono 540W", 41.0, 82.0),
//!         orientation: Orientation::Horizontal,
//!     },
//!     24.0,
//!     10,
//! );
//!
//! let estimate = calculate(&input).unwrap();
//! assert_eq!(estimate.max_panels_per_rod, 3);
//! assert_eq!(estimate.rods.totals.total_front_legs, 8);
//! assert!(estimate.cost.is_none());
//! ```
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "label": "North roof",
//!   "panel": { "type": "Dimensions", "panel_len_in": 45.0, "panel_wid_in": 90.0 },
//!   "front_leg_height_in": 24.0,
//!   "total_panels": 6,
//!   "settings": { "distribution": "Balanced" },
//!   "prices": { "rod_price_per_rod": 820.0, "wastage_percent": 5.0 }
//! }
//! ```

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::calculations::capacity::{max_panels_per_rod, require_capacity};
use crate::calculations::cost::{calculate_cost, CostBreakdown};
use crate::calculations::cutting::{cut_pieces, plan_cuts, CuttingPlan};
use crate::calculations::distribution::{distribute, StructureGroup};
use crate::calculations::rod_totals::{aggregate, structure_breakdown, RodSummary};
use crate::calculations::roof::{check_roof_fit, RoofDimensions, RoofFit};
use crate::errors::{require_positive, CalcResult};
use crate::inventory::{
    consume, offcuts_from_plan, required_from_pieces, ReconcileOutcome, RequiredLength, UsablePiece,
};
use crate::panel::{Orientation, PanelDimensions, PanelModel};
use crate::settings::{PriceConfig, RackSettings};

/// Where the panel's rod-axis dimensions come from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PanelSource {
    /// A registry panel laid out in the given orientation
    Model { model: PanelModel, orientation: Orientation },
    /// Dimensions already resolved against the rod axis
    Dimensions(PanelDimensions),
}

impl PanelSource {
    pub fn resolve(&self) -> CalcResult<PanelDimensions> {
        let dims = match self {
            PanelSource::Model { model, orientation } => model.dimensions(*orientation)?,
            PanelSource::Dimensions(dims) => *dims,
        };
        dims.validate()?;
        Ok(dims)
    }
}

/// Input for a full rack estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RackInput {
    /// User label (e.g., "North roof", "Array B")
    #[serde(default)]
    pub label: String,

    pub panel: PanelSource,

    /// Front leg height (in)
    pub front_leg_height_in: f64,

    pub total_panels: usize,

    #[serde(default)]
    pub roof: Option<RoofDimensions>,

    /// Omit to skip costing
    #[serde(default)]
    pub prices: Option<PriceConfig>,

    #[serde(default)]
    pub settings: RackSettings,
}

impl RackInput {
    /// Input with default settings, no prices and no roof.
    pub fn new(label: impl Into<String>, panel: PanelSource, front_leg_height_in: f64, total_panels: usize) -> Self {
        RackInput {
            label: label.into(),
            panel,
            front_leg_height_in,
            total_panels,
            roof: None,
            prices: None,
            settings: RackSettings::default(),
        }
    }

    pub fn with_prices(mut self, prices: PriceConfig) -> Self {
        self.prices = Some(prices);
        self
    }

    pub fn with_roof(mut self, roof: RoofDimensions) -> Self {
        self.roof = Some(roof);
        self
    }

    pub fn with_settings(mut self, settings: RackSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Validate everything except capacity and return the resolved panel.
    pub fn validate(&self) -> CalcResult<PanelDimensions> {
        self.settings.validate()?;
        require_positive("front_leg_height_in", self.front_leg_height_in)?;
        if let Some(prices) = &self.prices {
            prices.validate()?;
        }
        if let Some(roof) = &self.roof {
            roof.validate()?;
        }
        self.panel.resolve()
    }
}

/// Rod counts for ordering vs. cutting, side by side.
///
/// When some pieces are longer than the rod stock the cutting plan only
/// covers part of the job. `planned_rods` and `rod_purchase_cost` are then
/// `None` rather than an undercount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RodOrder {
    /// `ceil(total inches / rod length)`
    pub lower_bound_rods: usize,
    /// Rods the cutting plan consumes, when every piece could be placed
    pub planned_rods: Option<usize>,
    /// Pieces left out of the cutting plan because they exceed the rod
    pub oversized_pieces: usize,
    /// `planned_rods * rod price`, when prices were given and the plan is complete
    pub rod_purchase_cost: Option<f64>,
}

impl RodOrder {
    fn new(lower_bound_rods: usize, plan: &CuttingPlan, prices: Option<&PriceConfig>) -> Self {
        let planned_rods = plan.is_complete().then_some(plan.rod_count());
        RodOrder {
            lower_bound_rods,
            planned_rods,
            oversized_pieces: plan.oversized.len(),
            rod_purchase_cost: planned_rods
                .zip(prices)
                .map(|(rods, prices)| rods as f64 * prices.rod_price_per_rod),
        }
    }

    /// Whether the cutting plan covers every piece
    pub fn is_complete(&self) -> bool {
        self.oversized_pieces == 0
    }
}

/// Full estimate result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RackEstimate {
    pub label: String,
    pub panel: PanelDimensions,
    pub max_panels_per_rod: usize,
    pub structures: Vec<StructureGroup>,
    pub rods: RodSummary,
    pub cutting_plan: CuttingPlan,
    pub rod_order: RodOrder,
    pub cost: Option<CostBreakdown>,
    pub roof_fit: Option<RoofFit>,
    /// Settings the estimate was computed with
    pub settings: RackSettings,
}

impl RackEstimate {
    /// Cut lengths the job needs, grouped for inventory matching.
    pub fn required_lengths(&self) -> Vec<RequiredLength> {
        required_from_pieces(&self.cutting_plan.pieces)
    }

    /// Match this job's pieces against stocked offcuts.
    pub fn reconcile(&self, inventory: &[UsablePiece], tolerance_in: f64) -> ReconcileOutcome {
        consume(&self.required_lengths(), inventory, tolerance_in)
    }

    /// [`reconcile`](Self::reconcile) with the shop's `inventory_tolerance_in`.
    pub fn reconcile_default(&self, inventory: &[UsablePiece]) -> ReconcileOutcome {
        self.reconcile(inventory, self.settings.inventory_tolerance_in)
    }

    /// Leftovers from this job's rods worth stocking, per the shop's kerf
    /// and `min_offcut_in`.
    pub fn offcuts(&self, note: &str) -> Vec<UsablePiece> {
        offcuts_from_plan(&self.cutting_plan, self.settings.kerf_in, self.settings.min_offcut_in, note)
    }
}

/// Run a full rack estimate.
///
/// # Errors
///
/// * `InvalidDimension` - a length is not positive/finite
/// * `InvalidInput` - tilt, penalty or a price is out of range
/// * `Infeasible` - panels were requested but one panel is longer than the rod
#[instrument(skip(input), fields(label = %input.label, panels = input.total_panels, strategy = ?input.settings.distribution))]
pub fn calculate(input: &RackInput) -> CalcResult<RackEstimate> {
    let dims = input.validate()?;
    let settings = &input.settings;

    let max_per_rod = if input.total_panels > 0 {
        require_capacity(dims.panel_len_in, settings.rod_length_in, settings.gap_in)?
    } else {
        max_panels_per_rod(dims.panel_len_in, settings.rod_length_in, settings.gap_in)?
    };
    tracing::debug!(max_per_rod, panel_len_in = dims.panel_len_in, "rod capacity");

    let structures = distribute(
        settings.distribution,
        input.total_panels,
        max_per_rod,
        &dims,
        settings.gap_in,
        settings.structure_penalty,
    )?;
    tracing::debug!(groups = structures.len(), "structures distributed");

    let breakdown = structure_breakdown(
        &structures,
        input.front_leg_height_in,
        dims.panel_len_in,
        settings.tilt_angle_deg,
        settings.gap_in,
        settings.rise,
    );
    let totals = aggregate(&breakdown, settings.rod_length_in);
    tracing::debug!(
        inches = totals.total_inches_required,
        rods = totals.total_rods_needed,
        "rod totals"
    );

    let cutting_plan = plan_cuts(&cut_pieces(&breakdown), settings.rod_length_in, settings.kerf_in);
    if !cutting_plan.is_complete() {
        tracing::warn!(
            oversized = cutting_plan.oversized.len(),
            rod_length_in = settings.rod_length_in,
            "pieces longer than rod stock left out of the cutting plan"
        );
    }
    tracing::debug!(
        rods = cutting_plan.rod_count(),
        waste_in = cutting_plan.total_waste_in,
        "cutting plan"
    );

    let cost = input
        .prices
        .as_ref()
        .and_then(|prices| calculate_cost(Some(&totals), Some(structures.as_slice()), prices, settings.rod_length_in));

    let rod_order = RodOrder::new(totals.total_rods_needed, &cutting_plan, input.prices.as_ref());

    let roof_fit = input.roof.as_ref().map(|roof| {
        let fit = check_roof_fit(roof, &breakdown, dims.panel_wid_in, settings.gap_in, settings.tilt_angle_deg);
        if !fit.fits {
            tracing::warn!(
                length_margin_in = fit.length_margin_in,
                depth_margin_in = fit.depth_margin_in,
                "structures do not fit the roof"
            );
        }
        fit
    });

    Ok(RackEstimate {
        label: input.label.clone(),
        panel: dims,
        max_panels_per_rod: max_per_rod,
        structures,
        rods: RodSummary { breakdown, totals },
        cutting_plan,
        rod_order,
        cost,
        roof_fit,
        settings: settings.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::distribution::DistributionStrategy;
    use crate::calculations::legs::RiseVariant;
    use approx::assert_relative_eq;

    fn test_input(total_panels: usize) -> RackInput {
        RackInput::new(
            "Test Array",
            PanelSource::Dimensions(PanelDimensions::new(45.0, 90.0)),
            24.0,
            total_panels,
        )
    }

    #[test]
    fn test_reference_estimate() {
        let estimate = calculate(&test_input(6)).unwrap();
        assert_eq!(estimate.max_panels_per_rod, 3);
        assert_eq!(estimate.structures, vec![StructureGroup::new(3, 2)]);

        let legs = &estimate.rods.breakdown[0].legs;
        assert_relative_eq!(legs.hypotenuse_rod_length_in, 150.0);
        assert_relative_eq!(legs.rear_leg_height_in, 72.835, epsilon = 0.01);

        assert!(estimate.rods.totals.is_uniform);
        assert_eq!(estimate.cutting_plan.pieces.len(), 12);
        let order = &estimate.rod_order;
        assert!(order.is_complete());
        assert!(order.planned_rods.unwrap() >= order.lower_bound_rods);
    }

    #[test]
    fn test_zero_panels() {
        let estimate = calculate(&test_input(0).with_prices(PriceConfig::default())).unwrap();
        assert!(estimate.structures.is_empty());
        assert_eq!(estimate.rods.totals.total_inches_required, 0.0);
        assert_eq!(estimate.rods.totals.total_rods_needed, 0);
        assert_eq!(estimate.cutting_plan.rod_count(), 0);
        assert_eq!(estimate.cost.unwrap().subtotal, 0.0);
    }

    #[test]
    fn test_zero_panels_with_oversize_panel_is_not_an_error() {
        let mut input = test_input(0);
        input.panel = PanelSource::Dimensions(PanelDimensions::new(200.0, 40.0));
        let estimate = calculate(&input).unwrap();
        assert_eq!(estimate.max_panels_per_rod, 0);
    }

    #[test]
    fn test_infeasible_panel() {
        let mut input = test_input(4);
        input.panel = PanelSource::Dimensions(PanelDimensions::new(200.0, 40.0));
        assert_eq!(calculate(&input).unwrap_err().error_code(), "INFEASIBLE");
    }

    #[test]
    fn test_invalid_front_leg() {
        let mut input = test_input(4);
        input.front_leg_height_in = 0.0;
        assert_eq!(calculate(&input).unwrap_err().error_code(), "INVALID_DIMENSION");
    }

    #[test]
    fn test_balanced_strategy_selected() {
        let settings = RackSettings {
            distribution: DistributionStrategy::Balanced,
            ..Default::default()
        };
        let estimate = calculate(&test_input(6).with_settings(settings)).unwrap();
        assert_eq!(estimate.structures, vec![StructureGroup::new(2, 3)]);
    }

    #[test]
    fn test_rise_variant_selected() {
        let settings = RackSettings {
            rise: RiseVariant::SupportFraction,
            ..Default::default()
        };
        let estimate = calculate(&test_input(3).with_settings(settings)).unwrap();
        let legs = &estimate.rods.breakdown[0].legs;
        assert_relative_eq!(legs.triangle_height_in, 48.835 * 2.0 / 3.0, epsilon = 0.01);
    }

    #[test]
    fn test_rod_purchase_cost() {
        let prices = PriceConfig {
            rod_price_per_rod: 100.0,
            ..Default::default()
        };
        let estimate = calculate(&test_input(6).with_prices(prices)).unwrap();
        let order = &estimate.rod_order;
        assert_eq!(order.rod_purchase_cost, Some(order.planned_rods.unwrap() as f64 * 100.0));
    }

    #[test]
    fn test_sloped_rod_longer_than_stock_leaves_order_unplanned() {
        // 78" panels: two per rod (161" footprint), but the sloped rod is
        // 2 * (78 + 5) = 166", longer than the 164" stock
        let mut input = test_input(10).with_prices(PriceConfig {
            rod_price_per_rod: 100.0,
            ..Default::default()
        });
        input.panel = PanelSource::Dimensions(PanelDimensions::new(78.0, 40.0));
        let estimate = calculate(&input).unwrap();

        assert_eq!(estimate.max_panels_per_rod, 2);
        assert_relative_eq!(estimate.rods.breakdown[0].legs.hypotenuse_rod_length_in, 166.0);

        let order = &estimate.rod_order;
        assert!(!order.is_complete());
        assert_eq!(order.oversized_pieces, 10);
        assert_eq!(order.planned_rods, None);
        assert_eq!(order.rod_purchase_cost, None);
        assert_eq!(order.lower_bound_rods, estimate.rods.totals.total_rods_needed);
        assert!(order.lower_bound_rods > estimate.cutting_plan.rod_count());
    }

    #[test]
    fn test_roof_fit_reported() {
        let roof = RoofDimensions {
            length_in: 500.0,
            depth_in: 200.0,
        };
        let estimate = calculate(&test_input(6).with_roof(roof)).unwrap();
        assert!(estimate.roof_fit.unwrap().fits);
    }

    #[test]
    fn test_reconcile_against_inventory() {
        let estimate = calculate(&test_input(6)).unwrap();
        let required = estimate.required_lengths();
        assert_eq!(required.iter().map(|r| r.qty).sum::<u32>(), 12);

        let stock = vec![UsablePiece::new(24.1, 10, "")];
        let outcome = estimate.reconcile(&stock, 0.25);
        assert_eq!(outcome.used.len(), 1);
        assert_eq!(outcome.used[0].quantity, 4);
        assert_eq!(outcome.shortfall_qty(), 8);
    }

    #[test]
    fn test_reconcile_default_uses_settings_tolerance() {
        let stock = vec![UsablePiece::new(24.4, 10, "")];

        // 24.4" is outside the default 0.25" tolerance for 24" fronts
        let estimate = calculate(&test_input(6)).unwrap();
        assert!(estimate.reconcile_default(&stock).used.is_empty());

        let settings = RackSettings {
            inventory_tolerance_in: 0.5,
            ..Default::default()
        };
        let estimate = calculate(&test_input(6).with_settings(settings)).unwrap();
        let outcome = estimate.reconcile_default(&stock);
        assert_eq!(outcome.used.len(), 1);
        assert_eq!(outcome.used[0].quantity, 4);
    }

    #[test]
    fn test_offcuts_use_settings_minimum() {
        // Reference job: four 150" hypo rods leave 14" each, the rear pair
        // about 18.2" and the front rod 67.625", less one kerf each
        let estimate = calculate(&test_input(6)).unwrap();
        let lengths: Vec<f64> = estimate.offcuts("job 1").iter().map(|p| p.length_in).collect();
        assert_eq!(lengths.len(), 3);

        let settings = RackSettings {
            min_offcut_in: 20.0,
            ..Default::default()
        };
        let estimate = calculate(&test_input(6).with_settings(settings)).unwrap();
        let offcuts = estimate.offcuts("job 1");
        assert_eq!(offcuts.len(), 1);
        assert!(offcuts[0].length_in >= 20.0);
        assert_eq!(offcuts[0].note, "job 1");
    }

    #[test]
    fn test_input_json() {
        let json = r#"{
            "panel": { "type": "Model", "model": { "id": "p1", "name": "P", "width": 41.0, "height": 82.0 }, "orientation": "Vertical" },
            "front_leg_height_in": 24.0,
            "total_panels": 4,
            "settings": { "distribution": "Balanced" }
        }"#;
        let input: RackInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.settings.rod_length_in, 164.0);
        let estimate = calculate(&input).unwrap();
        // Portrait 82" panels: one per rod
        assert_eq!(estimate.max_panels_per_rod, 1);
        assert_eq!(estimate.structures, vec![StructureGroup::new(1, 4)]);
    }
}
