//! 物料帳（Item Ledger）
//!
//! 保存每個物料的靜態參數、BOM 子件關係，以及按期排列的需求與計劃序列。
//! 所有序列的索引即期別 0..N-1。

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::ItemConfig;
use crate::plan::ItemPlan;
use crate::{MrpError, Result};

/// BOM 子件關係（以名稱引用，不持有子件）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentLink {
    pub child: String,
    pub quantity_per_parent: Decimal,
}

/// 物料
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    config: ItemConfig,

    /// 子件（按登記順序，以子件名稱為鍵）
    components: Vec<ComponentLink>,

    /// 獨立需求（外部輸入）
    independent_requirements: Vec<Decimal>,

    /// 相依需求（BOM 展開寫入），以父件名稱為鍵，每個父件只保留最近一次展開
    dependent_requirements: BTreeMap<String, Vec<Decimal>>,

    /// 預計收貨
    scheduled_receipts: Vec<Decimal>,

    net_requirements: Vec<Decimal>,
    planned_order_releases: Vec<Decimal>,
    planned_order_receipts: Vec<Decimal>,

    /// 最近一次淨需求計算的期數
    planned_horizon: Option<u32>,
}

impl Item {
    /// 創建新的物料，參數不合法時拒絕
    pub fn new(config: ItemConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            components: Vec::new(),
            independent_requirements: Vec::new(),
            dependent_requirements: BTreeMap::new(),
            scheduled_receipts: Vec::new(),
            net_requirements: Vec::new(),
            planned_order_releases: Vec::new(),
            planned_order_receipts: Vec::new(),
            planned_horizon: None,
        })
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn config(&self) -> &ItemConfig {
        &self.config
    }

    pub fn lead_time(&self) -> u32 {
        self.config.lead_time
    }

    pub fn start_inventory(&self) -> Decimal {
        self.config.start_inventory
    }

    pub fn safety_stock(&self) -> Decimal {
        self.config.safety_stock
    }

    pub fn lot_size(&self) -> Decimal {
        self.config.lot_size
    }

    /// 追加下一期的毛需求
    pub fn add_gross_requirement(&mut self, requirement: Decimal) {
        self.independent_requirements.push(requirement);
    }

    /// 追加下一期的預計收貨
    pub fn add_scheduled_receipt(&mut self, receipt: Decimal) {
        self.scheduled_receipts.push(receipt);
    }

    pub fn extend_gross_requirements(&mut self, requirements: impl IntoIterator<Item = Decimal>) {
        self.independent_requirements.extend(requirements);
    }

    pub fn extend_scheduled_receipts(&mut self, receipts: impl IntoIterator<Item = Decimal>) {
        self.scheduled_receipts.extend(receipts);
    }

    /// 登記子件；同名子件再次登記時覆蓋用量。不影響任何序列。
    pub fn add_component(&mut self, child: impl Into<String>, quantity_per_parent: Decimal) -> Result<()> {
        let child = child.into();
        if quantity_per_parent <= Decimal::ZERO {
            return Err(MrpError::invalid_config(
                &child,
                format!("單位用量必須大於零: {}", quantity_per_parent),
            ));
        }

        match self.components.iter_mut().find(|c| c.child == child) {
            Some(link) => link.quantity_per_parent = quantity_per_parent,
            None => self.components.push(ComponentLink {
                child,
                quantity_per_parent,
            }),
        }
        Ok(())
    }

    pub fn components(&self) -> &[ComponentLink] {
        &self.components
    }

    /// 寫入某父件帶來的相依需求，取代該父件先前的展開結果
    pub fn set_dependent_requirements(&mut self, parent: impl Into<String>, requirements: Vec<Decimal>) {
        self.dependent_requirements.insert(parent.into(), requirements);
    }

    /// 移除符合條件的父件所帶來的相依需求
    pub fn retain_dependent_requirements(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.dependent_requirements.retain(|parent, _| keep(parent));
    }

    /// 某父件帶來的相依需求
    pub fn dependent_requirements_from(&self, parent: &str) -> Option<&[Decimal]> {
        self.dependent_requirements.get(parent).map(Vec::as_slice)
    }

    /// 已展開到本物料的父件（依名稱排序）
    pub fn demand_sources(&self) -> impl Iterator<Item = &str> {
        self.dependent_requirements.keys().map(String::as_str)
    }

    fn dependent_requirement_at(&self, period: usize) -> Decimal {
        self.dependent_requirements
            .values()
            .filter_map(|series| series.get(period))
            .copied()
            .sum()
    }

    fn dependent_len(&self) -> usize {
        self.dependent_requirements
            .values()
            .map(Vec::len)
            .max()
            .unwrap_or(0)
    }

    /// 指定期別的毛需求（獨立 + 相依），超出序列時為 0
    pub fn gross_requirement_at(&self, period: usize) -> Decimal {
        let independent = self
            .independent_requirements
            .get(period)
            .copied()
            .unwrap_or(Decimal::ZERO);
        independent + self.dependent_requirement_at(period)
    }

    /// 指定期別的預計收貨，超出序列時為 0
    pub fn scheduled_receipt_at(&self, period: usize) -> Decimal {
        self.scheduled_receipts
            .get(period)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// 毛需求序列（獨立需求與相依需求按期相加）
    pub fn gross_requirements(&self) -> Vec<Decimal> {
        let len = self.independent_requirements.len().max(self.dependent_len());
        (0..len).map(|p| self.gross_requirement_at(p)).collect()
    }

    pub fn independent_requirements(&self) -> &[Decimal] {
        &self.independent_requirements
    }

    /// 所有父件的相依需求按期相加
    pub fn dependent_requirements(&self) -> Vec<Decimal> {
        (0..self.dependent_len())
            .map(|p| self.dependent_requirement_at(p))
            .collect()
    }

    pub fn scheduled_receipts(&self) -> &[Decimal] {
        &self.scheduled_receipts
    }

    pub fn net_requirements(&self) -> &[Decimal] {
        &self.net_requirements
    }

    pub fn planned_order_releases(&self) -> &[Decimal] {
        &self.planned_order_releases
    }

    pub fn planned_order_receipts(&self) -> &[Decimal] {
        &self.planned_order_receipts
    }

    /// 寫入一次完整的淨需求計算結果（整批取代，不做局部修改）
    pub fn record_plan(
        &mut self,
        horizon: u32,
        net_requirements: Vec<Decimal>,
        planned_order_releases: Vec<Decimal>,
        planned_order_receipts: Vec<Decimal>,
    ) {
        self.net_requirements = net_requirements;
        self.planned_order_releases = planned_order_releases;
        self.planned_order_receipts = planned_order_receipts;
        self.planned_horizon = Some(horizon);
    }

    pub fn is_planned(&self) -> bool {
        self.planned_horizon.is_some()
    }

    pub fn planned_horizon(&self) -> Option<u32> {
        self.planned_horizon
    }

    /// 清除計算結果，保留參數、需求與預計收貨
    pub fn reset_plan(&mut self) {
        self.net_requirements.clear();
        self.planned_order_releases.clear();
        self.planned_order_receipts.clear();
        self.planned_horizon = None;
    }

    /// 唯讀結果快照
    pub fn snapshot(&self) -> ItemPlan {
        ItemPlan {
            item: self.name().to_string(),
            gross_requirements: self.gross_requirements(),
            net_requirements: self.net_requirements.clone(),
            planned_order_releases: self.planned_order_releases.clone(),
            planned_order_receipts: self.planned_order_receipts.clone(),
        }
    }
}
