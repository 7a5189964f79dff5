//! MRP 主計算器（BOM 展開驅動）

use std::collections::BTreeSet;

use mrp_core::{ComponentLink, Infeasibility, ItemPlan, ItemRegistry, MrpError};
use rust_decimal::Decimal;

use crate::lead_time::{Feasibility, LeadTimeCalculator};
use crate::netting::NettingCalculator;
use crate::topology::PlanningOrder;
use crate::{PlanReport, PlanWarning};

/// 單物料計劃結果
#[derive(Debug, Clone, PartialEq)]
pub enum PlanOutcome {
    /// 已計算並展開到子件
    Planned(ItemPlan),
    /// 總提前期超出計劃期數，未寫入任何序列
    Infeasible(Infeasibility),
}

impl PlanOutcome {
    pub fn is_planned(&self) -> bool {
        matches!(self, Self::Planned(_))
    }
}

/// MRP 計算器
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MrpCalculator {
    /// 計劃期數
    horizon: u32,

    /// 運輸時間（期數）
    transport_time: u32,
}

impl MrpCalculator {
    /// 創建新的 MRP 計算器
    pub fn new(horizon: u32) -> Self {
        Self {
            horizon,
            transport_time: 0,
        }
    }

    /// 建構器模式：設置運輸時間
    pub fn with_transport_time(mut self, transport_time: u32) -> Self {
        self.transport_time = transport_time;
        self
    }

    pub fn horizon(&self) -> u32 {
        self.horizon
    }

    pub fn transport_time(&self) -> u32 {
        self.transport_time
    }

    /// 可行性檢查（自身與直接子件的提前期 + 運輸時間）
    pub fn check_feasibility(&self, registry: &ItemRegistry, item: &str) -> mrp_core::Result<Feasibility> {
        LeadTimeCalculator::check(registry, item, self.transport_time, self.horizon)
    }

    /// 計劃單一物料：可行性檢查 → 淨需求計算 → 展開到直接子件
    ///
    /// 不做拓撲排序；呼叫端必須先計劃完所有父件，子件的毛需求才完整。
    pub fn plan(&self, registry: &mut ItemRegistry, item: &str) -> mrp_core::Result<PlanOutcome> {
        let mut warnings = Vec::new();
        self.plan_item(registry, item, &mut warnings)
    }

    /// 主 MRP 計算入口：依拓撲順序計劃所有物料
    pub fn calculate(&self, registry: &mut ItemRegistry) -> mrp_core::Result<PlanReport> {
        let order = PlanningOrder::compute(registry)?;
        self.run(registry, order)
    }

    /// 計劃指定物料及其下層子件
    ///
    /// 子樹內父件帶來的相依需求會重算；子樹外父件的相依需求保留其最近一次展開，
    /// 尚未計劃的子樹外父件記錄警告。
    pub fn calculate_for(&self, registry: &mut ItemRegistry, root: &str) -> mrp_core::Result<PlanReport> {
        let order = PlanningOrder::for_item(registry, root)?;
        self.run(registry, order)
    }

    fn run(&self, registry: &mut ItemRegistry, order: Vec<String>) -> mrp_core::Result<PlanReport> {
        tracing::info!(
            "開始 MRP 計算：物料 {} 筆，計劃期數 {}，運輸時間 {}",
            order.len(),
            self.horizon,
            self.transport_time
        );

        let start_time = std::time::Instant::now();
        let mut report = PlanReport::empty(self.horizon, self.transport_time);

        {
            let scope: BTreeSet<&str> = order.iter().map(String::as_str).collect();
            for name in &order {
                let item = registry.get_mut(name)?;
                item.reset_plan();
                item.retain_dependent_requirements(|parent| !scope.contains(parent));
            }
            self.check_outside_parents(registry, &order, &scope, &mut report.warnings)?;
        }

        for name in &order {
            tracing::debug!("計算物料 MRP: {}", name);

            match self.plan_item(registry, name, &mut report.warnings)? {
                PlanOutcome::Planned(plan) => {
                    if plan.gross_requirements.iter().all(|q| *q == Decimal::ZERO) {
                        report.add_warning(PlanWarning::info(
                            name.clone(),
                            "計劃期內無毛需求".to_string(),
                        ));
                    }
                    report.plans.push(plan);
                }
                PlanOutcome::Infeasible(infeasibility) => report.infeasible.push(infeasibility),
            }
        }

        report.order = order;
        report.calculation_time_ms = Some(start_time.elapsed().as_millis() as u64);

        tracing::info!("MRP 計算完成，耗時 {:?}", start_time.elapsed());
        tracing::info!(
            "已計劃物料: {}，不可行物料: {}",
            report.plans.len(),
            report.infeasible.len()
        );

        Ok(report)
    }

    /// 計算範圍外的父件若尚未計劃，其需求不會出現在子件的毛需求中
    fn check_outside_parents(
        &self,
        registry: &ItemRegistry,
        order: &[String],
        scope: &BTreeSet<&str>,
        warnings: &mut Vec<PlanWarning>,
    ) -> mrp_core::Result<()> {
        for name in order {
            for parent in registry.parents_of(name) {
                if scope.contains(parent) || registry.get(parent)?.is_planned() {
                    continue;
                }
                let message = format!("範圍外父件 {} 尚未計劃，毛需求不含其展開", parent);
                tracing::warn!("物料 {}: {}", name, message);
                warnings.push(PlanWarning::warning(name.clone(), message));
            }
        }
        Ok(())
    }

    fn plan_item(
        &self,
        registry: &mut ItemRegistry,
        name: &str,
        warnings: &mut Vec<PlanWarning>,
    ) -> mrp_core::Result<PlanOutcome> {
        // 可行性檢查會查找所有直接子件，找不到時在寫入任何序列前就失敗
        let feasibility = self.check_feasibility(registry, name)?;
        if !feasibility.is_feasible() {
            let infeasibility = Infeasibility {
                item: name.to_string(),
                total_time_needed: feasibility.total_time_needed,
                horizon: self.horizon,
            };
            tracing::warn!("{}", infeasibility);
            return Ok(PlanOutcome::Infeasible(infeasibility));
        }

        let item = registry.get_mut(name)?;
        NettingCalculator::net(item, self.horizon);

        let snapshot = item.snapshot();
        let components = item.components().to_vec();
        self.explode(registry, name, &snapshot.planned_order_receipts, &components, warnings)?;

        Ok(PlanOutcome::Planned(snapshot))
    }

    /// BOM 展開：子件第 p 期相依需求 = 父件第 p 期計劃收貨 × 單位用量
    ///
    /// 同一父件再次展開時取代先前的結果。
    fn explode(
        &self,
        registry: &mut ItemRegistry,
        parent: &str,
        receipts: &[Decimal],
        components: &[ComponentLink],
        warnings: &mut Vec<PlanWarning>,
    ) -> mrp_core::Result<()> {
        // 先算出全部子件的需求，溢位時不寫入任何子件
        let mut contributions = Vec::with_capacity(components.len());
        for link in components {
            let requirements = receipts
                .iter()
                .enumerate()
                .map(|(period, receipt)| {
                    receipt.checked_mul(link.quantity_per_parent).ok_or_else(|| {
                        MrpError::CalculationError(format!(
                            "{} → {} 第 {} 期相依需求溢位",
                            parent, link.child, period
                        ))
                    })
                })
                .collect::<mrp_core::Result<Vec<_>>>()?;
            contributions.push((link, requirements));
        }

        for (link, requirements) in contributions {
            let child = registry.get_mut(&link.child)?;

            if child.is_planned() {
                let message = format!("父件 {} 在子件計算後才展開，子件結果已過期", parent);
                tracing::warn!("物料 {}: {}", link.child, message);
                warnings.push(PlanWarning::warning(link.child.clone(), message));
            }
            if child.dependent_requirements_from(parent).is_some() {
                tracing::debug!("取代 {} 先前展開到 {} 的相依需求", parent, link.child);
            }

            tracing::debug!(
                "BOM 展開: {} → {} (單位用量: {}, 需求: {:?})",
                parent,
                link.child,
                link.quantity_per_parent,
                requirements
            );
            child.set_dependent_requirements(parent, requirements);
        }

        Ok(())
    }
}
