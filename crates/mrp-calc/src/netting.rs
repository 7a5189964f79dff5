//! 淨需求計算

use mrp_core::Item;
use rust_decimal::Decimal;

use crate::lead_time::LeadTimeCalculator;
use crate::lot_sizing::LotSizingCalculator;

/// 單期淨需求計算記錄
#[derive(Debug, Clone, PartialEq)]
pub struct NetRequirement {
    /// 期別
    pub period: usize,
    /// 毛需求
    pub gross_requirement: Decimal,
    /// 預計收貨
    pub scheduled_receipt: Decimal,
    /// 期初庫存
    pub on_hand: Decimal,
    /// 淨需求
    pub net_requirement: Decimal,
    /// 計劃訂單收貨（已套用批量與提前期限制）
    pub planned_order_receipt: Decimal,
    /// 期末預計庫存（帶入下一期）
    pub projected_on_hand: Decimal,
}

/// 淨需求計算器
pub struct NettingCalculator;

impl NettingCalculator {
    /// 逐期計算淨需求與計劃訂單，不修改物料
    ///
    /// 每期：
    /// - 淨需求 = max(0, 毛需求 − 期初庫存 − 預計收貨 + 安全庫存)
    /// - 計劃收貨 = 淨需求按批量向上取整；期別 + 提前期 ≥ 計劃期數時為 0
    /// - 期末庫存 = max(0, 期初庫存 + 預計收貨 − 毛需求)，安全庫存與計劃訂單不計入
    ///
    /// 計劃下達與計劃收貨落在同一期，不按提前期前移。
    pub fn calculate(item: &Item, horizon: u32) -> Vec<NetRequirement> {
        let mut results = Vec::with_capacity(horizon as usize);
        let mut on_hand = item.start_inventory();

        for period in 0..horizon as usize {
            let gross_requirement = item.gross_requirement_at(period);
            let scheduled_receipt = item.scheduled_receipt_at(period);

            let net_requirement = (gross_requirement - on_hand - scheduled_receipt
                + item.safety_stock())
            .max(Decimal::ZERO);

            let lot_sized = LotSizingCalculator::planned_order_receipt(net_requirement, item.lot_size());
            let planned_order_receipt =
                if LeadTimeCalculator::completes_within(period, item.lead_time(), horizon) {
                    lot_sized
                } else {
                    Decimal::ZERO
                };

            let projected_on_hand =
                (on_hand + scheduled_receipt - gross_requirement).max(Decimal::ZERO);

            results.push(NetRequirement {
                period,
                gross_requirement,
                scheduled_receipt,
                on_hand,
                net_requirement,
                planned_order_receipt,
                projected_on_hand,
            });

            on_hand = projected_on_hand;
        }

        results
    }

    /// 計算並整批寫入物料的淨需求、計劃下達、計劃收貨序列
    pub fn net(item: &mut Item, horizon: u32) -> Vec<NetRequirement> {
        let results = Self::calculate(item, horizon);

        let net_requirements = results.iter().map(|r| r.net_requirement).collect();
        let receipts: Vec<Decimal> = results.iter().map(|r| r.planned_order_receipt).collect();
        item.record_plan(horizon, net_requirements, receipts.clone(), receipts);

        tracing::debug!(
            "物料 {} 淨需求計算完成：{} 期，計劃訂單 {} 筆",
            item.name(),
            horizon,
            results
                .iter()
                .filter(|r| r.planned_order_receipt > Decimal::ZERO)
                .count()
        );

        results
    }
}
