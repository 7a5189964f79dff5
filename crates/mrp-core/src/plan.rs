//! 計劃結果模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 單物料計劃結果（唯讀快照）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemPlan {
    /// 物料名稱
    pub item: String,

    /// 毛需求
    pub gross_requirements: Vec<Decimal>,

    /// 淨需求
    pub net_requirements: Vec<Decimal>,

    /// 計劃訂單下達
    pub planned_order_releases: Vec<Decimal>,

    /// 計劃訂單收貨
    pub planned_order_receipts: Vec<Decimal>,
}

impl ItemPlan {
    /// 計劃訂單總量
    pub fn total_planned_receipts(&self) -> Decimal {
        self.planned_order_receipts.iter().copied().sum()
    }

    /// 有計劃訂單的期別
    pub fn order_periods(&self) -> Vec<usize> {
        self.planned_order_receipts
            .iter()
            .enumerate()
            .filter(|(_, qty)| **qty > Decimal::ZERO)
            .map(|(period, _)| period)
            .collect()
    }
}

/// 不可行通知：總提前期超出計劃期數
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Infeasibility {
    pub item: String,
    pub total_time_needed: u32,
    pub horizon: u32,
}

impl std::fmt::Display for Infeasibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} not feasible within horizon (needs {} periods, horizon {})",
            self.item, self.total_time_needed, self.horizon
        )
    }
}
