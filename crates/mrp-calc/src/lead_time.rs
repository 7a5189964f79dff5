//! 交期可行性

use mrp_core::ItemRegistry;
use serde::{Deserialize, Serialize};

/// 可行性檢查結果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feasibility {
    pub total_time_needed: u32,
    pub horizon: u32,
}

impl Feasibility {
    pub fn is_feasible(&self) -> bool {
        self.total_time_needed <= self.horizon
    }
}

/// 交期計算器
pub struct LeadTimeCalculator;

impl LeadTimeCalculator {
    /// 單層總時間：max(自身提前期 + 運輸, 各直接子件提前期 + 自身提前期 + 運輸)
    ///
    /// 只看直接子件，不是多層關鍵路徑。
    pub fn total_time_needed(
        registry: &ItemRegistry,
        item_name: &str,
        transport_time: u32,
    ) -> mrp_core::Result<u32> {
        let item = registry.get(item_name)?;
        let own = item.lead_time().saturating_add(transport_time);

        let mut total = own;
        for link in item.components() {
            let child = registry.get(&link.child)?;
            total = total.max(child.lead_time().saturating_add(own));
        }
        Ok(total)
    }

    /// 檢查物料能否在計劃期數內完成
    pub fn check(
        registry: &ItemRegistry,
        item_name: &str,
        transport_time: u32,
        horizon: u32,
    ) -> mrp_core::Result<Feasibility> {
        Ok(Feasibility {
            total_time_needed: Self::total_time_needed(registry, item_name, transport_time)?,
            horizon,
        })
    }

    /// 第 period 期下達的訂單能否在計劃期數內到貨
    pub fn completes_within(period: usize, lead_time: u32, horizon: u32) -> bool {
        (period as u64) + u64::from(lead_time) < u64::from(horizon)
    }
}
