//! 物料登錄表
//!
//! 登錄表擁有所有物料；BOM 關係只以名稱引用子件，不互相持有。

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::config::{ComponentConfig, ItemConfig, PlanningConfig};
use crate::item::{ComponentLink, Item};
use crate::{MrpError, Result};

/// 物料登錄表
#[derive(Debug, Clone, Default)]
pub struct ItemRegistry {
    items: BTreeMap<String, Item>,
}

impl ItemRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 依計劃文件建立登錄表：物料、需求、預計收貨、BOM
    pub fn from_config(config: &PlanningConfig) -> Result<Self> {
        let mut registry = Self::new();

        for entry in &config.items {
            let mut item = Item::new(entry.config.clone())?;
            if let Some(feed) = &entry.demand {
                let requirements = feed.generate(&entry.config.name)?;
                item.extend_gross_requirements(requirements);
            }
            item.extend_scheduled_receipts(entry.scheduled_receipts.iter().copied());
            registry.add_item(item)?;
        }

        for link in &config.bom {
            registry.link_component(&link.parent, &link.child, link.quantity_per_parent)?;
        }

        Ok(registry)
    }

    /// 登錄物料，名稱重複時拒絕
    pub fn add_item(&mut self, item: Item) -> Result<()> {
        if self.items.contains_key(item.name()) {
            return Err(MrpError::DuplicateItem(item.name().to_string()));
        }
        self.items.insert(item.name().to_string(), item);
        Ok(())
    }

    /// 由配置建立並登錄物料
    pub fn register(&mut self, config: ItemConfig) -> Result<&mut Item> {
        let name = config.name.clone();
        self.add_item(Item::new(config)?)?;
        self.get_mut(&name)
    }

    pub fn get(&self, name: &str) -> Result<&Item> {
        self.items
            .get(name)
            .ok_or_else(|| MrpError::ItemNotFound(name.to_string()))
    }

    pub fn get_mut(&mut self, name: &str) -> Result<&mut Item> {
        self.items
            .get_mut(name)
            .ok_or_else(|| MrpError::ItemNotFound(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.items.contains_key(name)
    }

    /// 所有物料名稱（依名稱排序）
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.items.keys().map(String::as_str)
    }

    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// 建立父件 → 子件關係，兩者都必須已登錄
    pub fn link_component(&mut self, parent: &str, child: &str, quantity_per_parent: Decimal) -> Result<()> {
        if !self.contains(child) {
            return Err(MrpError::ItemNotFound(child.to_string()));
        }
        self.get_mut(parent)?.add_component(child, quantity_per_parent)
    }

    /// 依子件配置登錄子件（尚未存在時）並建立關係
    pub fn add_component(&mut self, parent: &str, component: ComponentConfig) -> Result<()> {
        component.validate()?;
        if !self.contains(parent) {
            return Err(MrpError::ItemNotFound(parent.to_string()));
        }
        if !self.contains(&component.component_name) {
            self.add_item(Item::new(component.component_config)?)?;
        }
        self.link_component(parent, &component.component_name, component.quantity_per_parent)
    }

    pub fn components_of(&self, name: &str) -> Result<&[ComponentLink]> {
        Ok(self.get(name)?.components())
    }

    /// 直接使用該物料的父件（依名稱排序）
    pub fn parents_of(&self, name: &str) -> Vec<&str> {
        self.items
            .values()
            .filter(|item| item.components().iter().any(|c| c.child == name))
            .map(Item::name)
            .collect()
    }
}
