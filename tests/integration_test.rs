//! 集成測試

use mrp::*;
use rstest::rstest;
use rust_decimal::Decimal;

fn decimals(values: &[i64]) -> Vec<Decimal> {
    values.iter().map(|v| Decimal::from(*v)).collect()
}

#[test]
fn test_two_independent_products() {
    // 場景：兩個獨立產品，10 期
    let mut registry = ItemRegistry::new();
    registry
        .register(
            ItemConfig::new("A", 2)
                .with_start_inventory(Decimal::from(50))
                .with_safety_stock(Decimal::from(10))
                .with_lot_size(Decimal::from(20)),
        )
        .unwrap()
        .extend_gross_requirements(decimals(&[20, 0, 0, 40, 0, 20, 10, 0, 20, 30]));
    registry
        .register(
            ItemConfig::new("B", 1)
                .with_start_inventory(Decimal::from(30))
                .with_safety_stock(Decimal::from(5))
                .with_lot_size(Decimal::from(15)),
        )
        .unwrap()
        .extend_gross_requirements(decimals(&[10, 0, 0, 20, 0, 10, 5, 0, 10, 15]));

    let report = MrpCalculator::new(10).calculate(&mut registry).unwrap();

    assert!(report.is_fully_feasible());
    assert_eq!(report.plans.len(), 2);

    let a = report.plan_for("A").unwrap();
    assert_eq!(a.net_requirements, decimals(&[0, 0, 0, 20, 10, 30, 20, 10, 30, 40]));
    assert_eq!(a.planned_order_receipts, decimals(&[0, 0, 0, 20, 20, 40, 20, 20, 0, 0]));
    assert_eq!(a.planned_order_releases, a.planned_order_receipts);

    let b = report.plan_for("B").unwrap();
    assert_eq!(b.planned_order_receipts, decimals(&[0, 0, 0, 15, 15, 15, 15, 15, 15, 0]));
}

#[test]
fn test_multi_level_bom_mrp() {
    // 場景：
    //   BIKE
    //     ├── FRAME x1
    //     │   └── TUBE x3
    //     └── WHEEL x2
    let mut registry = ItemRegistry::new();
    registry
        .register(ItemConfig::new("BIKE", 1))
        .unwrap()
        .extend_gross_requirements(decimals(&[0, 10, 0, 10, 0, 0]));
    registry
        .add_component("BIKE", ComponentConfig::new(ItemConfig::new("FRAME", 1), Decimal::ONE))
        .unwrap();
    registry
        .add_component(
            "BIKE",
            ComponentConfig::new(
                ItemConfig::new("WHEEL", 1).with_start_inventory(Decimal::from(5)),
                Decimal::from(2),
            ),
        )
        .unwrap();
    registry
        .add_component(
            "FRAME",
            ComponentConfig::new(ItemConfig::new("TUBE", 1).with_lot_size(Decimal::from(50)), Decimal::from(3)),
        )
        .unwrap();

    let report = MrpCalculator::new(6).calculate(&mut registry).unwrap();

    assert_eq!(report.order, vec!["BIKE", "FRAME", "TUBE", "WHEEL"]);
    assert!(report.warnings.iter().all(|w| w.severity == WarningSeverity::Info));

    let bike = report.plan_for("BIKE").unwrap();
    assert_eq!(bike.planned_order_receipts, decimals(&[0, 10, 0, 10, 0, 0]));

    // FRAME 毛需求 = BIKE 計劃收貨 × 1
    let frame = report.plan_for("FRAME").unwrap();
    assert_eq!(frame.gross_requirements, decimals(&[0, 10, 0, 10, 0, 0]));
    assert_eq!(frame.planned_order_receipts, decimals(&[0, 10, 0, 10, 0, 0]));

    // TUBE 毛需求 = FRAME 計劃收貨 × 3，批量 50
    let tube = report.plan_for("TUBE").unwrap();
    assert_eq!(tube.gross_requirements, decimals(&[0, 30, 0, 30, 0, 0]));
    assert_eq!(tube.planned_order_receipts, decimals(&[0, 50, 0, 50, 0, 0]));

    // WHEEL 毛需求 = BIKE 計劃收貨 × 2，期初庫存 5
    let wheel = report.plan_for("WHEEL").unwrap();
    assert_eq!(wheel.gross_requirements, decimals(&[0, 20, 0, 20, 0, 0]));
    assert_eq!(wheel.net_requirements, decimals(&[0, 15, 0, 20, 0, 0]));
}

#[test]
fn test_shared_component_sums_all_parents() {
    // 兩個父件共用 SCREW：子件需求 = Σ 父件計劃收貨 × 用量
    let mut registry = ItemRegistry::new();
    registry
        .register(ItemConfig::new("CHAIR", 0))
        .unwrap()
        .extend_gross_requirements(decimals(&[4, 0, 2]));
    registry
        .register(ItemConfig::new("TABLE", 0))
        .unwrap()
        .extend_gross_requirements(decimals(&[0, 1, 1]));
    registry.register(ItemConfig::new("SCREW", 0)).unwrap();
    registry.link_component("CHAIR", "SCREW", Decimal::from(8)).unwrap();
    registry.link_component("TABLE", "SCREW", Decimal::from(12)).unwrap();

    let report = MrpCalculator::new(3).calculate(&mut registry).unwrap();

    let chair = report.plan_for("CHAIR").unwrap();
    let table = report.plan_for("TABLE").unwrap();
    let screw = report.plan_for("SCREW").unwrap();

    for period in 0..3 {
        let expected = chair.planned_order_receipts[period] * Decimal::from(8)
            + table.planned_order_receipts[period] * Decimal::from(12);
        assert_eq!(screw.gross_requirements[period], expected);
    }
    assert_eq!(screw.gross_requirements, decimals(&[32, 12, 28]));
    assert_eq!(report.order.last().map(String::as_str), Some("SCREW"));
}

#[test]
fn test_infeasible_item_skipped_others_continue() {
    let mut registry = ItemRegistry::new();
    registry
        .register(ItemConfig::new("SLOW", 4))
        .unwrap()
        .extend_gross_requirements(decimals(&[10; 5]));
    registry
        .register(ItemConfig::new("FAST", 1))
        .unwrap()
        .extend_gross_requirements(decimals(&[10; 5]));

    let report = MrpCalculator::new(5)
        .with_transport_time(2)
        .calculate(&mut registry)
        .unwrap();

    assert!(!report.is_fully_feasible());
    assert_eq!(report.infeasible.len(), 1);
    assert_eq!(report.infeasible[0].item, "SLOW");
    assert!(report.infeasible[0]
        .to_string()
        .contains("not feasible within horizon"));
    assert!(report.plan_for("SLOW").is_none());
    assert!(registry.get("SLOW").unwrap().net_requirements().is_empty());

    // FAST：1 + 2 = 3 ≤ 5，正常計劃
    assert_eq!(report.plan_for("FAST").unwrap().net_requirements.len(), 5);
}

#[test]
fn test_infeasible_parent_sends_no_demand_down() {
    let mut registry = ItemRegistry::new();
    registry
        .register(ItemConfig::new("P", 2))
        .unwrap()
        .extend_gross_requirements(decimals(&[5, 5, 5]));
    registry
        .add_component("P", ComponentConfig::new(ItemConfig::new("C", 2), Decimal::ONE))
        .unwrap();

    // P: max(2, 2 + 2) = 4 > 3
    let report = MrpCalculator::new(3).calculate(&mut registry).unwrap();

    assert_eq!(report.infeasible.len(), 1);
    let child = report.plan_for("C").unwrap();
    assert!(child.gross_requirements.is_empty());
    assert_eq!(child.net_requirements, decimals(&[0, 0, 0]));
}

#[test]
fn test_cycle_aborts_planning() {
    let mut registry = ItemRegistry::new();
    registry.register(ItemConfig::new("X", 1)).unwrap();
    registry.register(ItemConfig::new("Y", 1)).unwrap();
    registry.link_component("X", "Y", Decimal::ONE).unwrap();
    registry.link_component("Y", "X", Decimal::ONE).unwrap();

    let result = MrpCalculator::new(5).calculate(&mut registry);
    assert!(matches!(result, Err(MrpError::CycleDetected(_))));
    assert!(!registry.get("X").unwrap().is_planned());
}

#[test]
fn test_plan_from_json_document() {
    let json = r#"{
        "horizon": 4,
        "transport_time": 0,
        "items": [
            {
                "name": "LAMP",
                "lead_time": 1,
                "start_inventory": 3,
                "demand": { "kind": "growth", "start_value": 10, "growth_rate": 0.5, "periods": 4 }
            },
            { "name": "BULB", "lead_time": 1, "lot_size": 25 }
        ],
        "bom": [ { "parent": "LAMP", "child": "BULB", "quantity_per_parent": 2 } ]
    }"#;

    let config = PlanningConfig::from_json_str(json).unwrap();
    let (registry, report) = plan_from_config(&config).unwrap();

    // 10 × 1.5^i → 10, 15, 22, 33
    let lamp = report.plan_for("LAMP").unwrap();
    assert_eq!(lamp.gross_requirements, decimals(&[10, 15, 22, 33]));
    assert_eq!(lamp.net_requirements, decimals(&[7, 15, 22, 33]));
    assert_eq!(lamp.planned_order_receipts, decimals(&[7, 15, 22, 0]));

    let bulb = registry.get("BULB").unwrap();
    assert_eq!(bulb.gross_requirements(), decimals(&[14, 30, 44, 0]));
    assert_eq!(bulb.planned_order_receipts(), decimals(&[25, 50, 50, 0]).as_slice());

    let serialized = serde_json::to_string(&report).unwrap();
    assert!(serialized.contains("\"run_id\""));
}

#[test]
fn test_subtree_replan_keeps_other_parents() {
    let mut registry = ItemRegistry::new();
    registry
        .register(ItemConfig::new("CHAIR", 0))
        .unwrap()
        .extend_gross_requirements(decimals(&[4, 0, 2]));
    registry
        .register(ItemConfig::new("TABLE", 0))
        .unwrap()
        .extend_gross_requirements(decimals(&[0, 1, 1]));
    registry.register(ItemConfig::new("SCREW", 0)).unwrap();
    registry.link_component("CHAIR", "SCREW", Decimal::from(8)).unwrap();
    registry.link_component("TABLE", "SCREW", Decimal::from(12)).unwrap();

    let calculator = MrpCalculator::new(3);
    calculator.calculate(&mut registry).unwrap();

    for _ in 0..2 {
        let report = calculator.calculate_for(&mut registry, "CHAIR").unwrap();
        assert_eq!(report.order, vec!["CHAIR", "SCREW"]);
        assert!(report.warnings.is_empty());
        assert_eq!(
            report.plan_for("SCREW").unwrap().gross_requirements,
            decimals(&[32, 12, 28])
        );
    }

    // 範圍外的父件不受影響
    let table = registry.get("TABLE").unwrap();
    assert!(table.is_planned());
    assert_eq!(table.planned_order_receipts(), decimals(&[0, 1, 1]).as_slice());
    assert_eq!(
        registry.get("SCREW").unwrap().planned_order_receipts(),
        decimals(&[32, 12, 28]).as_slice()
    );
}

#[test]
fn test_plan_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plan.json");
    std::fs::write(
        &path,
        r#"{
            "horizon": 3,
            "items": [
                { "name": "P", "lead_time": 0, "demand": { "kind": "literal", "values": [0, 20, 0] } },
                { "name": "C", "lead_time": 0 }
            ],
            "bom": [ { "parent": "P", "child": "C", "quantity_per_parent": 3 } ]
        }"#,
    )
    .unwrap();

    let config = PlanningConfig::from_path(&path).unwrap();
    let (registry, report) = plan_from_config(&config).unwrap();

    assert!(report.is_fully_feasible());
    assert_eq!(registry.get("C").unwrap().gross_requirements(), decimals(&[0, 60, 0]));

    let missing = PlanningConfig::from_path(dir.path().join("absent.json"));
    assert!(matches!(missing, Err(MrpError::Io(_))));
}

#[rstest]
#[case(r#"{ "horizon": 3, "items": [ { "name": "A", "lead_time": 1, "lot_size": 0 } ] }"#)]
#[case(r#"{ "horizon": 3, "items": [ { "name": "A", "lead_time": 1, "safety_stock": -2 } ] }"#)]
#[case(r#"{ "horizon": 3, "items": [ { "name": "A", "lead_time": 1 } ], "bom": [ { "parent": "A", "child": "B", "quantity_per_parent": 1 } ] }"#)]
#[case(r#"{ "horizon": 3, "items": [ { "name": "A", "lead_time": 1 }, { "name": "A", "lead_time": 2 } ] }"#)]
fn test_bad_documents_rejected(#[case] json: &str) {
    let config = PlanningConfig::from_json_str(json).unwrap();
    assert!(plan_from_config(&config).is_err());
}
