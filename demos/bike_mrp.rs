//! # 腳踏車 MRP 計算範例
//!
//! 從 JSON 計劃文件載入多層 BOM，按拓撲順序計算並展開：
//! - 產品：腳踏車（需求按成長率推算）
//! - 零件：車架、輪子、鋼管

use mrp::{plan_from_config, LotSizingCalculator, PlanningConfig};

const PLAN: &str = r#"{
    "horizon": 8,
    "transport_time": 1,
    "items": [
        {
            "name": "BIKE",
            "lead_time": 1,
            "start_inventory": 10,
            "safety_stock": 5,
            "demand": { "kind": "growth", "start_value": 20, "growth_rate": 0.1, "periods": 8 }
        },
        { "name": "FRAME", "lead_time": 2, "start_inventory": 30, "lot_size": 25 },
        { "name": "WHEEL", "lead_time": 1, "start_inventory": 40, "safety_stock": 10, "lot_size": 50,
          "scheduled_receipts": [0, 100] },
        { "name": "TUBE", "lead_time": 3, "lot_size": 100 }
    ],
    "bom": [
        { "parent": "BIKE", "child": "FRAME", "quantity_per_parent": 1 },
        { "parent": "BIKE", "child": "WHEEL", "quantity_per_parent": 2 },
        { "parent": "FRAME", "child": "TUBE", "quantity_per_parent": 3 }
    ]
}"#;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    println!("===== Bike MRP Calculation Example =====\n");

    let config = PlanningConfig::from_json_str(PLAN)?;
    let (registry, report) = plan_from_config(&config)?;

    println!("Planning order: {}", report.order.join(" -> "));
    println!("Completed in {} ms\n", report.calculation_time_ms.unwrap_or(0));

    for plan in &report.plans {
        println!("Component: {}", plan.item);
        println!("  Gross Requirements:     {:?}", plan.gross_requirements);
        println!("  Net Requirements:       {:?}", plan.net_requirements);
        println!("  Planned Order Releases: {:?}", plan.planned_order_releases);
        println!("  Planned Order Receipts: {:?}", plan.planned_order_receipts);

        let lot_size = registry.get(&plan.item)?.lot_size();
        let total = plan.total_planned_receipts();
        println!("  Order Periods:          {:?}", plan.order_periods());
        println!(
            "  Total Receipts:         {} ({} lots of {})",
            total,
            LotSizingCalculator::lots_needed(total, lot_size),
            lot_size
        );
        println!();
    }

    for infeasible in &report.infeasible {
        println!("  ! {}", infeasible);
    }

    if !report.warnings.is_empty() {
        println!("Warnings:");
        for warning in &report.warnings {
            println!("  - [{}] {}", warning.item, warning.message);
        }
    }

    println!("\n===== MRP Calculation Complete =====");

    Ok(())
}
