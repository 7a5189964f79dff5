//! # MRP Core
//!
//! 核心資料模型與類型定義

pub mod config;
pub mod demand;
pub mod item;
pub mod plan;
pub mod registry;

// Re-export 主要類型
pub use config::{BomLink, ComponentConfig, ItemConfig, ItemEntry, PlanningConfig};
pub use demand::DemandFeed;
pub use item::{ComponentLink, Item};
pub use plan::{Infeasibility, ItemPlan};
pub use registry::ItemRegistry;

/// MRP 錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum MrpError {
    #[error("找不到物料: {0}")]
    ItemNotFound(String),

    #[error("物料已存在: {0}")]
    DuplicateItem(String),

    #[error("物料 {item} 配置無效: {reason}")]
    InvalidConfig { item: String, reason: String },

    /// 排序後仍有未處理入度的物料（循環本身及其下層）
    #[error("BOM 存在循環，無法排序的物料: {}", .0.join(", "))]
    CycleDetected(Vec<String>),

    #[error("計劃文件解析失敗: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("讀取計劃文件失敗: {0}")]
    Io(#[from] std::io::Error),

    #[error("計算錯誤: {0}")]
    CalculationError(String),
}

impl MrpError {
    /// 建立配置錯誤
    pub fn invalid_config(item: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            item: item.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MrpError>;
