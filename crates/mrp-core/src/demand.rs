//! 獨立需求來源

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{MrpError, Result};

/// 需求來源：直接輸入或按成長率推算
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DemandFeed {
    /// 按期直接輸入的毛需求
    Literal { values: Vec<Decimal> },

    /// 成長率推算：value(i) = floor(start_value × (1 + growth_rate)^i)
    Growth {
        start_value: Decimal,
        growth_rate: Decimal,
        periods: u32,
    },
}

impl DemandFeed {
    pub fn literal(values: Vec<Decimal>) -> Self {
        Self::Literal { values }
    }

    pub fn growth(start_value: Decimal, growth_rate: Decimal, periods: u32) -> Self {
        Self::Growth {
            start_value,
            growth_rate,
            periods,
        }
    }

    /// 產生按期排列的毛需求序列
    pub fn generate(&self, item: &str) -> Result<Vec<Decimal>> {
        match self {
            Self::Literal { values } => {
                if let Some(negative) = values.iter().find(|v| **v < Decimal::ZERO) {
                    return Err(MrpError::invalid_config(
                        item,
                        format!("需求數量不可為負數: {}", negative),
                    ));
                }
                Ok(values.clone())
            }
            Self::Growth {
                start_value,
                growth_rate,
                periods,
            } => Self::growth_series(item, *start_value, *growth_rate, *periods),
        }
    }

    fn growth_series(
        item: &str,
        start_value: Decimal,
        growth_rate: Decimal,
        periods: u32,
    ) -> Result<Vec<Decimal>> {
        if start_value < Decimal::ZERO {
            return Err(MrpError::invalid_config(
                item,
                format!("起始需求不可為負數: {}", start_value),
            ));
        }
        let factor = Decimal::ONE + growth_rate;
        if factor <= Decimal::ZERO {
            return Err(MrpError::invalid_config(
                item,
                format!("成長率必須大於 -1: {}", growth_rate),
            ));
        }

        // 逐期累乘，避免浮點冪運算的誤差
        let mut series = Vec::with_capacity(periods as usize);
        let mut current = start_value;
        for period in 0..periods {
            if period > 0 {
                current = current.checked_mul(factor).ok_or_else(|| {
                    MrpError::CalculationError(format!("物料 {} 第 {} 期需求溢位", item, period))
                })?;
            }
            series.push(current.floor());
        }
        Ok(series)
    }
}
