//! 物料配置與計劃文件

use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::demand::DemandFeed;
use crate::{MrpError, Result};

fn default_lot_size() -> Decimal {
    Decimal::ONE
}

/// 物料 MRP 參數配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemConfig {
    /// 物料名稱（唯一鍵）
    pub name: String,

    /// 提前期（期數）
    pub lead_time: u32,

    /// 期初庫存
    #[serde(default)]
    pub start_inventory: Decimal,

    /// 安全庫存
    #[serde(default)]
    pub safety_stock: Decimal,

    /// 批量（1 = 批對批）
    #[serde(default = "default_lot_size")]
    pub lot_size: Decimal,
}

impl ItemConfig {
    /// 創建新的物料配置
    pub fn new(name: impl Into<String>, lead_time: u32) -> Self {
        Self {
            name: name.into(),
            lead_time,
            start_inventory: Decimal::ZERO,
            safety_stock: Decimal::ZERO,
            lot_size: Decimal::ONE,
        }
    }

    /// 建構器模式：設置期初庫存
    pub fn with_start_inventory(mut self, qty: Decimal) -> Self {
        self.start_inventory = qty;
        self
    }

    /// 建構器模式：設置安全庫存
    pub fn with_safety_stock(mut self, stock: Decimal) -> Self {
        self.safety_stock = stock;
        self
    }

    /// 建構器模式：設置批量
    pub fn with_lot_size(mut self, lot_size: Decimal) -> Self {
        self.lot_size = lot_size;
        self
    }

    /// 驗證配置，拒絕會導致負數或除以零的參數
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(MrpError::invalid_config(&self.name, "物料名稱不可為空"));
        }
        if self.start_inventory < Decimal::ZERO {
            return Err(MrpError::invalid_config(
                &self.name,
                format!("期初庫存不可為負數: {}", self.start_inventory),
            ));
        }
        if self.safety_stock < Decimal::ZERO {
            return Err(MrpError::invalid_config(
                &self.name,
                format!("安全庫存不可為負數: {}", self.safety_stock),
            ));
        }
        if self.lot_size <= Decimal::ZERO {
            return Err(MrpError::invalid_config(
                &self.name,
                format!("批量必須大於零: {}", self.lot_size),
            ));
        }
        Ok(())
    }
}

/// BOM 子件配置（子件名稱、子件參數、單位用量）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentConfig {
    pub component_name: String,
    pub component_config: ItemConfig,
    pub quantity_per_parent: Decimal,
}

impl ComponentConfig {
    pub fn new(component_config: ItemConfig, quantity_per_parent: Decimal) -> Self {
        Self {
            component_name: component_config.name.clone(),
            component_config,
            quantity_per_parent,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.component_name != self.component_config.name {
            return Err(MrpError::invalid_config(
                &self.component_name,
                format!("子件名稱與配置不一致: {}", self.component_config.name),
            ));
        }
        if self.quantity_per_parent <= Decimal::ZERO {
            return Err(MrpError::invalid_config(
                &self.component_name,
                format!("單位用量必須大於零: {}", self.quantity_per_parent),
            ));
        }
        self.component_config.validate()
    }
}

/// 計劃文件中的物料項目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemEntry {
    #[serde(flatten)]
    pub config: ItemConfig,

    /// 獨立需求來源
    #[serde(default)]
    pub demand: Option<DemandFeed>,

    /// 預計收貨（按期）
    #[serde(default)]
    pub scheduled_receipts: Vec<Decimal>,
}

impl ItemEntry {
    pub fn new(config: ItemConfig) -> Self {
        Self {
            config,
            demand: None,
            scheduled_receipts: Vec::new(),
        }
    }

    pub fn with_demand(mut self, demand: DemandFeed) -> Self {
        self.demand = Some(demand);
        self
    }

    pub fn with_scheduled_receipts(mut self, receipts: Vec<Decimal>) -> Self {
        self.scheduled_receipts = receipts;
        self
    }
}

/// BOM 關係：父件 → 子件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BomLink {
    pub parent: String,
    pub child: String,
    pub quantity_per_parent: Decimal,
}

/// 計劃文件（JSON）
///
/// ```
/// # use mrp_core::PlanningConfig;
/// let config = PlanningConfig::from_json_str(r#"{
///     "horizon": 3,
///     "items": [
///         { "name": "A", "lead_time": 1, "demand": { "kind": "literal", "values": [5, 0, 5] } }
///     ]
/// }"#).unwrap();
/// assert_eq!(config.transport_time, 0);
/// assert_eq!(config.items.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanningConfig {
    /// 計劃期數
    pub horizon: u32,

    /// 運輸時間（期數）
    #[serde(default)]
    pub transport_time: u32,

    pub items: Vec<ItemEntry>,

    #[serde(default)]
    pub bom: Vec<BomLink>,
}

impl PlanningConfig {
    /// 從 JSON 字串解析
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// 從 JSON 檔案讀取
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }
}
