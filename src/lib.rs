//! # MRP
//!
//! 時間分段 MRP 計算：淨需求、批量取整、多層 BOM 展開
//!
//! ```
//! use mrp::{ItemConfig, ItemRegistry, MrpCalculator, PlanOutcome};
//! use rust_decimal::Decimal;
//!
//! let mut registry = ItemRegistry::new();
//! registry
//!     .register(ItemConfig::new("A", 1).with_lot_size(Decimal::from(10)))
//!     .unwrap()
//!     .extend_gross_requirements([Decimal::from(7), Decimal::ZERO, Decimal::ZERO]);
//!
//! let outcome = MrpCalculator::new(3).plan(&mut registry, "A").unwrap();
//! assert!(outcome.is_planned());
//! assert_eq!(registry.get("A").unwrap().planned_order_receipts()[0], Decimal::from(10));
//! ```

pub use mrp_calc::{
    Feasibility, LeadTimeCalculator, LotSizingCalculator, MrpCalculator, NetRequirement,
    NettingCalculator, PlanOutcome, PlanReport, PlanWarning, PlanningOrder, WarningSeverity,
};
pub use mrp_core::{
    BomLink, ComponentConfig, ComponentLink, DemandFeed, Infeasibility, Item, ItemConfig,
    ItemEntry, ItemPlan, ItemRegistry, MrpError, PlanningConfig, Result,
};

/// 依計劃文件執行完整 MRP 計算
pub fn plan_from_config(config: &PlanningConfig) -> Result<(ItemRegistry, PlanReport)> {
    let mut registry = ItemRegistry::from_config(config)?;
    tracing::debug!(
        "計劃文件載入完成：物料 {} 筆，BOM 關係 {} 筆",
        registry.len(),
        config.bom.len()
    );

    let report = MrpCalculator::new(config.horizon)
        .with_transport_time(config.transport_time)
        .calculate(&mut registry)?;

    Ok((registry, report))
}
