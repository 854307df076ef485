//! Commission on the buyer-paid shipping charge.

use serde::{Deserialize, Serialize};

use crate::error::FeeError;
use crate::money::Money;
use crate::rates::DeliveryMethod;

/// Which shipping rule produced the fee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShippingRule {
    /// In-person handover is always charged, regardless of the threshold.
    HandoverCharged,
    /// General shipping above the free threshold is charged in full.
    AboveThreshold,
    /// General shipping at or below the free threshold is exempt.
    WithinThreshold,
}

impl ShippingRule {
    /// Whether the rule charges a fee.
    pub fn is_charged(&self) -> bool {
        !matches!(self, ShippingRule::WithinThreshold)
    }
}

/// Shipping commission for one order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingFee {
    /// Fee amount.
    pub fee: Money,
    /// Rule that applied.
    pub rule: ShippingRule,
}

impl ShippingFee {
    /// General shipping is exempt when `shipping_charge <= free_threshold`;
    /// handover never is.
    pub fn compute(
        shipping_charge: Money,
        delivery_method: DeliveryMethod,
        rate: f64,
        free_threshold: Money,
    ) -> Result<Self, FeeError> {
        let rule = match delivery_method {
            DeliveryMethod::InPersonHandover => ShippingRule::HandoverCharged,
            DeliveryMethod::GeneralShipping if shipping_charge > free_threshold => {
                ShippingRule::AboveThreshold
            }
            DeliveryMethod::GeneralShipping => ShippingRule::WithinThreshold,
        };

        let fee = if rule.is_charged() {
            shipping_charge.apply_rate(rate)?
        } else {
            Money::zero()
        };

        tracing::trace!(
            shipping_charge = shipping_charge.amount(),
            ?rule,
            fee = fee.amount(),
            "shipping fee"
        );

        Ok(Self { fee, rule })
    }
}
