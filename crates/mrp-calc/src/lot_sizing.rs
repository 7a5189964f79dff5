//! 批量規則實現

use rust_decimal::Decimal;

/// 批量規則計算器
pub struct LotSizingCalculator;

impl LotSizingCalculator {
    /// 批對批取整：淨需求向上取整到批量的整數倍，淨需求為 0 時不下單
    pub fn planned_order_receipt(net_requirement: Decimal, lot_size: Decimal) -> Decimal {
        if net_requirement <= Decimal::ZERO || lot_size <= Decimal::ZERO {
            return Decimal::ZERO;
        }

        let remainder = net_requirement % lot_size;
        if remainder > Decimal::ZERO {
            net_requirement - remainder + lot_size
        } else {
            net_requirement
        }
    }

    /// 需要的批數
    pub fn lots_needed(net_requirement: Decimal, lot_size: Decimal) -> Decimal {
        if lot_size <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        Self::planned_order_receipt(net_requirement, lot_size) / lot_size
    }
}
