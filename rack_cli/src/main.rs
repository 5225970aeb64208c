//! # Rackwise CLI
//!
//! Demo harness for `rack_core`. Pass a JSON request file to run it as-is,
//! or run with no arguments to be prompted for a few values.
//!
//! ```text
//! rack_cli request.json
//! RUST_LOG=rack_core=debug rack_cli
//! ```

mod logging;

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use rack_core::calculations::rack::{calculate, PanelSource, RackEstimate, RackInput};
use rack_core::panel::{Orientation, PanelModel};
use rack_core::settings::PriceConfig;
use rack_core::units::Inches;
use rack_core::{CalcError, CalcResult};

fn prompt_f64(prompt: &str, default: f64) -> f64 {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return default;
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return default;
    }

    input.trim().parse().unwrap_or(default)
}

fn load_request(path: &str) -> CalcResult<RackInput> {
    let text = std::fs::read_to_string(path).map_err(|e| CalcError::SerializationError {
        reason: format!("cannot read '{}': {}", path, e),
    })?;
    Ok(serde_json::from_str(&text)?)
}

fn demo_request() -> RackInput {
    let total_panels = prompt_f64("Number of panels [12]: ", 12.0).max(0.0) as usize;
    let front_leg = prompt_f64("Front leg height (in) [24.0]: ", 24.0);

    let panel = PanelModel::new("demo", "Demo 400W", 41.0, 82.0);
    RackInput::new(
        "CLI-Demo",
        PanelSource::Model {
            model: panel,
            orientation: Orientation::Horizontal,
        },
        front_leg,
        total_panels,
    )
    .with_prices(PriceConfig {
        rod_price_per_rod: 820.0,
        base_plate_price: 45.0,
        anchor_bolt_price: 6.0,
        angle_fitter_price: 12.0,
        normal_bolt_price: 2.5,
        u_clamp_price: 8.0,
        wastage_percent: 5.0,
        ..Default::default()
    })
}

fn print_summary(estimate: &RackEstimate) {
    println!("═══════════════════════════════════════");
    println!("  RACK ESTIMATE: {}", estimate.label);
    println!("═══════════════════════════════════════");
    println!();
    println!("Panels per rod: {}", estimate.max_panels_per_rod);
    println!("Structures:");
    for b in &estimate.rods.breakdown {
        println!(
            "  {} x {} panels  front {}  rear {}  sloped {}",
            b.count,
            b.panels_per_structure,
            Inches(b.legs.front_leg_height_in),
            Inches(b.legs.rear_leg_height_in),
            Inches(b.legs.hypotenuse_rod_length_in),
        );
    }
    println!();

    let totals = &estimate.rods.totals;
    println!("Rod material: {:.2} in", totals.total_inches_required);
    let order = &estimate.rod_order;
    match order.planned_rods {
        Some(planned) => println!("Rods: {} minimum, {} per cutting plan", order.lower_bound_rods, planned),
        None => println!(
            "Rods: {} minimum, cutting plan incomplete ({} pieces longer than rod stock)",
            order.lower_bound_rods, order.oversized_pieces
        ),
    }
    println!("Cut waste: {:.2} in", estimate.cutting_plan.total_waste_in);
    for pattern in estimate.cutting_plan.top_patterns(5) {
        println!("  {} rods: {}", pattern.rod_count, pattern.signature);
    }

    if let Some(cost) = &estimate.cost {
        println!();
        println!("Cost:");
        for item in &cost.line_items {
            println!("  {:<20} {:>10.2} x {:>8.2} = {:>10.2}", item.label, item.quantity, item.unit_price, item.cost);
        }
        println!("  Subtotal {:.2}  Wastage {:.2}  Total {:.2}", cost.subtotal, cost.wastage, cost.total);
        if let Some(purchase) = order.rod_purchase_cost {
            println!("  Whole-rod purchase {:.2}", purchase);
        }
    }

    if let Some(fit) = &estimate.roof_fit {
        println!();
        println!("Roof fit: {}", if fit.fits { "[OK]" } else { "[FAIL]" });
    }
}

fn main() -> ExitCode {
    logging::init();

    println!("Rackwise CLI - Solar Rack Estimator");
    println!("===================================");
    println!();

    let request = match std::env::args().nth(1) {
        Some(path) => load_request(&path),
        None => Ok(demo_request()),
    };

    match request.and_then(|input| calculate(&input)) {
        Ok(estimate) => {
            print_summary(&estimate);

            println!();
            println!("JSON Output:");
            if let Ok(json) = serde_json::to_string_pretty(&estimate) {
                println!("{}", json);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(code = e.error_code(), "estimate failed");
            eprintln!("Error: {}", e);
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
            ExitCode::FAILURE
        }
    }
}
