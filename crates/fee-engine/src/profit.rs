//! Gross profit and margin.

use serde::{Deserialize, Serialize};

use crate::error::FeeError;
use crate::money::Money;

/// Profit figures, available only when a unit cost was entered.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Profit {
    /// `unit_cost * quantity`.
    pub total_cost: Money,
    /// `net_proceeds - total_cost`.
    pub gross_profit: Money,
    /// Gross profit as a percentage of the order total; `None` for an empty order.
    pub margin_pct: Option<f64>,
}

impl Profit {
    /// Evaluate profit for a computed order.
    pub fn compute(
        net_proceeds: Money,
        order_total: Money,
        unit_cost: Money,
        quantity: i64,
    ) -> Result<Self, FeeError> {
        let total_cost = unit_cost.checked_mul(quantity).ok_or(FeeError::Overflow)?;
        let gross_profit = net_proceeds
            .checked_sub(total_cost)
            .ok_or(FeeError::Overflow)?;
        let margin_pct = if order_total.is_positive() {
            Some(gross_profit.to_f64() / order_total.to_f64() * 100.0)
        } else {
            None
        };

        Ok(Self {
            total_cost,
            gross_profit,
            margin_pct,
        })
    }

    /// Whether the order makes money. Break-even counts as no gain.
    pub fn is_gain(&self) -> bool {
        self.gross_profit.is_positive()
    }
}
