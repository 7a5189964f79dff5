//! 計劃順序（BOM 拓撲排序）

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use mrp_core::{ItemRegistry, MrpError};

/// 計劃順序計算器
pub struct PlanningOrder;

impl PlanningOrder {
    /// 全部物料的計劃順序：父件在子件之前，同層依名稱排序
    pub fn compute(registry: &ItemRegistry) -> mrp_core::Result<Vec<String>> {
        let nodes: BTreeSet<&str> = registry.names().collect();
        Self::sort(registry, &nodes)
    }

    /// 指定物料及其所有下層子件的計劃順序
    pub fn for_item(registry: &ItemRegistry, root: &str) -> mrp_core::Result<Vec<String>> {
        let nodes = Self::reachable_from(registry, root)?;
        Self::sort(registry, &nodes)
    }

    /// 從 root 出發可達的物料（含 root）
    pub fn reachable_from<'a>(
        registry: &'a ItemRegistry,
        root: &str,
    ) -> mrp_core::Result<BTreeSet<&'a str>> {
        let mut visited = BTreeSet::new();
        let mut queue = VecDeque::from([registry.get(root)?.name()]);

        while let Some(name) = queue.pop_front() {
            if visited.insert(name) {
                for link in registry.components_of(name)? {
                    queue.push_back(registry.get(&link.child)?.name());
                }
            }
        }
        Ok(visited)
    }

    /// 低階碼：物料在 BOM 中出現的最深層級（頂層為 0）
    pub fn low_level_codes(registry: &ItemRegistry) -> mrp_core::Result<BTreeMap<String, u32>> {
        let order = Self::compute(registry)?;
        let mut codes: BTreeMap<String, u32> = order.iter().map(|name| (name.clone(), 0)).collect();

        for name in &order {
            let level = codes.get(name).copied().unwrap_or(0);
            for link in registry.components_of(name)? {
                let child_level = codes.entry(link.child.clone()).or_insert(0);
                *child_level = (*child_level).max(level + 1);
            }
        }
        Ok(codes)
    }

    /// Kahn 演算法，只計算 nodes 之間的邊
    fn sort(registry: &ItemRegistry, nodes: &BTreeSet<&str>) -> mrp_core::Result<Vec<String>> {
        let mut in_degree: BTreeMap<&str, usize> = nodes.iter().map(|name| (*name, 0)).collect();

        for name in nodes {
            for link in registry.components_of(name)? {
                if !registry.contains(&link.child) {
                    return Err(MrpError::ItemNotFound(link.child.clone()));
                }
                if let Some(degree) = in_degree.get_mut(link.child.as_str()) {
                    *degree += 1;
                }
            }
        }

        let mut ready: BTreeSet<&str> = in_degree
            .iter()
            .filter(|(_, degree)| **degree == 0)
            .map(|(name, _)| *name)
            .collect();
        let mut order = Vec::with_capacity(nodes.len());

        while let Some(name) = ready.pop_first() {
            order.push(name.to_string());

            for link in registry.components_of(name)? {
                if let Some(degree) = in_degree.get_mut(link.child.as_str()) {
                    *degree -= 1;
                    if *degree == 0 {
                        ready.insert(registry.get(&link.child)?.name());
                    }
                }
            }
        }

        if order.len() != nodes.len() {
            let remaining: Vec<String> = in_degree
                .into_iter()
                .filter(|(_, degree)| *degree > 0)
                .map(|(name, _)| name.to_string())
                .collect();
            tracing::warn!("BOM 存在循環，無法排序的物料: {:?}", remaining);
            return Err(MrpError::CycleDetected(remaining));
        }

        Ok(order)
    }
}
