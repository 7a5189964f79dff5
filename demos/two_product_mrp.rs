//! 兩產品 MRP 計算示例

use mrp::{ItemConfig, ItemRegistry, MrpCalculator};
use rust_decimal::Decimal;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("=== 兩產品 MRP 計算示例 ===\n");

    let periods = 10;
    let mut registry = ItemRegistry::new();

    registry
        .register(
            ItemConfig::new("A", 2)
                .with_start_inventory(Decimal::from(50))
                .with_safety_stock(Decimal::from(10))
                .with_lot_size(Decimal::from(20)),
        )?
        .extend_gross_requirements(
            [20, 0, 0, 40, 0, 20, 10, 0, 20, 30].map(Decimal::from),
        );

    registry
        .register(
            ItemConfig::new("B", 1)
                .with_start_inventory(Decimal::from(30))
                .with_safety_stock(Decimal::from(5))
                .with_lot_size(Decimal::from(15)),
        )?
        .extend_gross_requirements(
            [10, 0, 0, 20, 0, 10, 5, 0, 10, 15].map(Decimal::from),
        );

    let calculator = MrpCalculator::new(periods);
    calculator.plan(&mut registry, "A")?;
    calculator.plan(&mut registry, "B")?;

    for name in ["A", "B"] {
        let item = registry.get(name)?;
        println!("Product {}", name);
        println!("  Net Requirements:       {:?}", item.net_requirements());
        println!("  Planned Order Releases: {:?}", item.planned_order_releases());
        println!("  Planned Order Receipts: {:?}", item.planned_order_receipts());
    }

    Ok(())
}
