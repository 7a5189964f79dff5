//! # MRP Calculation Engine
//!
//! 核心 MRP 計算引擎：淨需求計算、批量取整、交期可行性、BOM 展開

pub mod calculator;
pub mod lead_time;
pub mod lot_sizing;
pub mod netting;
pub mod topology;

use chrono::{DateTime, Utc};
use mrp_core::{Infeasibility, ItemPlan};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Re-export 主要類型
pub use calculator::{MrpCalculator, PlanOutcome};
pub use lead_time::{Feasibility, LeadTimeCalculator};
pub use lot_sizing::LotSizingCalculator;
pub use netting::{NetRequirement, NettingCalculator};
pub use topology::PlanningOrder;

/// MRP 計算結果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanReport {
    /// 計算批次 ID
    pub run_id: Uuid,

    /// 計算時間
    pub planned_at: DateTime<Utc>,

    /// 計劃期數
    pub horizon: u32,

    /// 運輸時間
    pub transport_time: u32,

    /// 實際計劃順序
    pub order: Vec<String>,

    /// 各物料計劃結果（按計劃順序）
    pub plans: Vec<ItemPlan>,

    /// 不可行物料
    pub infeasible: Vec<Infeasibility>,

    /// 警告信息
    pub warnings: Vec<PlanWarning>,

    /// 計算耗時（毫秒）
    pub calculation_time_ms: Option<u64>,
}

impl PlanReport {
    /// 創建空的計算結果
    pub fn empty(horizon: u32, transport_time: u32) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            planned_at: Utc::now(),
            horizon,
            transport_time,
            order: Vec::new(),
            plans: Vec::new(),
            infeasible: Vec::new(),
            warnings: Vec::new(),
            calculation_time_ms: None,
        }
    }

    /// 添加警告
    pub fn add_warning(&mut self, warning: PlanWarning) {
        self.warnings.push(warning);
    }

    pub fn plan_for(&self, item: &str) -> Option<&ItemPlan> {
        self.plans.iter().find(|plan| plan.item == item)
    }

    pub fn is_fully_feasible(&self) -> bool {
        self.infeasible.is_empty()
    }
}

/// MRP 警告
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanWarning {
    pub item: String,
    pub message: String,
    pub severity: WarningSeverity,
}

impl PlanWarning {
    pub fn new(item: String, message: String, severity: WarningSeverity) -> Self {
        Self {
            item,
            message,
            severity,
        }
    }

    pub fn info(item: String, message: String) -> Self {
        Self::new(item, message, WarningSeverity::Info)
    }

    pub fn warning(item: String, message: String) -> Self {
        Self::new(item, message, WarningSeverity::Warning)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarningSeverity {
    Info,
    Warning,
}
