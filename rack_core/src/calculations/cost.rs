//! # Cost Estimate
//!
//! Prices a job from its rod totals, structure groups and a price sheet.
//!
//! Hardware comes in two kinds that must not be mixed up:
//!
//! - **per structure**: 4 base plates, 16 anchor bolts, 4 angle fitters and
//!   24 normal bolts for every structure, whatever its panel count
//! - **per panel**: U-clamps, `u_clamps_per_panel` for every panel
//!
//! Rod material is priced by the inch (`rod_price / rod_length`), so the
//! material line tracks what the legs actually consume rather than whole
//! rods bought.
//!
//! ```text
//! subtotal = rod line + hardware lines
//! wastage  = subtotal * wastage_percent / 100
//! total    = subtotal + wastage + fabrication + installation
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::distribution::{total_panels, total_structures, StructureGroup};
use crate::calculations::rod_totals::RodTotals;
use crate::settings::PriceConfig;

pub const BASE_PLATES_PER_STRUCTURE: usize = 4;
pub const ANCHOR_BOLTS_PER_STRUCTURE: usize = 16;
pub const ANGLE_FITTERS_PER_STRUCTURE: usize = 4;
pub const NORMAL_BOLTS_PER_STRUCTURE: usize = 24;

/// One priced line of the estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub label: String,
    pub quantity: f64,
    pub unit_price: f64,
    pub cost: f64,
}

impl LineItem {
    fn new(label: &str, quantity: f64, unit_price: f64) -> Self {
        LineItem {
            label: label.to_string(),
            quantity,
            unit_price,
            cost: quantity * unit_price,
        }
    }
}

/// Hardware and material quantities behind the estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostQuantities {
    pub structures: usize,
    pub panels: usize,
    pub rod_inches: f64,
    pub base_plates: usize,
    pub anchor_bolts: usize,
    pub angle_fitters: usize,
    pub normal_bolts: usize,
    pub u_clamps: usize,
}

/// Priced estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub quantities: CostQuantities,
    pub rod_price_per_inch: f64,
    pub line_items: Vec<LineItem>,
    pub subtotal: f64,
    pub wastage: f64,
    pub fabrication_charge: f64,
    pub installation_charge: f64,
    pub total: f64,
}

impl CostBreakdown {
    pub fn line_item(&self, label: &str) -> Option<&LineItem> {
        self.line_items.iter().find(|item| item.label == label)
    }
}

/// Hardware and rod quantities for a set of structures.
pub fn cost_quantities(totals: &RodTotals, structures: &[StructureGroup], prices: &PriceConfig) -> CostQuantities {
    let structure_count = total_structures(structures);
    let panels = total_panels(structures);
    let u_clamps = if prices.include_u_clamps {
        panels * prices.u_clamps_per_panel as usize
    } else {
        0
    };

    CostQuantities {
        structures: structure_count,
        panels,
        rod_inches: totals.total_inches_required,
        base_plates: structure_count * BASE_PLATES_PER_STRUCTURE,
        anchor_bolts: structure_count * ANCHOR_BOLTS_PER_STRUCTURE,
        angle_fitters: structure_count * ANGLE_FITTERS_PER_STRUCTURE,
        normal_bolts: structure_count * NORMAL_BOLTS_PER_STRUCTURE,
        u_clamps,
    }
}

/// Price a job.
///
/// Returns `None` until both rod totals and structures have been computed.
///
/// ## Example
///
/// ```rust
/// use rack_core::calculations::cost::calculate_cost;
/// use rack_core::calculations::distribution::StructureGroup;
/// use rack_core::calculations::rod_totals::{aggregate, structure_breakdown};
/// use rack_core::calculations::legs::RiseVariant;
/// use rack_core::settings::PriceConfig;
///
/// assert!(calculate_cost(None, None, &PriceConfig::default(), 164.0).is_none());
///
/// let groups = vec![StructureGroup::new(3, 2)];
/// let breakdown = structure_breakdown(&groups, 24.0, 45.0, 19.0, 5.0, RiseVariant::FullSpan);
/// let totals = aggregate(&breakdown, 164.0);
/// let prices = PriceConfig { base_plate_price: 10.0, ..Default::default() };
///
/// let cost = calculate_cost(Some(&totals), Some(groups.as_slice()), &prices, 164.0).unwrap();
/// assert_eq!(cost.quantities.base_plates, 8);
/// assert_eq!(cost.subtotal, 80.0);
/// ```
pub fn calculate_cost(
    totals: Option<&RodTotals>,
    structures: Option<&[StructureGroup]>,
    prices: &PriceConfig,
    rod_length_in: f64,
) -> Option<CostBreakdown> {
    let (totals, structures) = (totals?, structures?);

    let quantities = cost_quantities(totals, structures, prices);
    let rod_price_per_inch = if rod_length_in > 0.0 {
        prices.rod_price_per_rod / rod_length_in
    } else {
        0.0
    };

    let mut line_items = vec![
        LineItem::new("Rod material (in)", quantities.rod_inches, rod_price_per_inch),
        LineItem::new("Base plates", quantities.base_plates as f64, prices.base_plate_price),
        LineItem::new("Anchor bolts", quantities.anchor_bolts as f64, prices.anchor_bolt_price),
        LineItem::new("Angle fitters", quantities.angle_fitters as f64, prices.angle_fitter_price),
        LineItem::new("Normal bolts", quantities.normal_bolts as f64, prices.normal_bolt_price),
    ];
    if prices.include_u_clamps {
        line_items.push(LineItem::new("U-clamps", quantities.u_clamps as f64, prices.u_clamp_price));
    }

    let subtotal: f64 = line_items.iter().map(|item| item.cost).sum();
    let wastage = subtotal * prices.wastage_percent / 100.0;
    let total = subtotal + wastage + prices.fabrication_charge + prices.installation_charge;

    Some(CostBreakdown {
        quantities,
        rod_price_per_inch,
        line_items,
        subtotal,
        wastage,
        fabrication_charge: prices.fabrication_charge,
        installation_charge: prices.installation_charge,
        total,
    })
}
