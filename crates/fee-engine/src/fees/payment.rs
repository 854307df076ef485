//! Payment-processing fee on the order total.

use serde::{Deserialize, Serialize};

use crate::error::FeeError;
use crate::money::Money;
use crate::rates::{PaymentTier, RateConfig};

/// Payment-processing fee for one order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaymentFee {
    /// Fee amount.
    pub fee: Money,
    /// Rate looked up for the tier.
    pub rate: f64,
    /// Whether the minimum fee replaced the computed one.
    pub floored: bool,
}

impl PaymentFee {
    /// Look up the tier rate, round `order_total * rate` half-to-even and
    /// floor it at `minimum_fee`. An empty order pays nothing.
    pub fn compute(
        order_total: Money,
        payment_tier: PaymentTier,
        config: &RateConfig,
    ) -> Result<Self, FeeError> {
        Self::compute_with_rate(
            order_total,
            config.payment_rate(payment_tier),
            config.payment_fee_minimum(),
        )
    }

    /// Same as [`PaymentFee::compute`] with the rate already resolved.
    pub fn compute_with_rate(
        order_total: Money,
        rate: f64,
        minimum_fee: Money,
    ) -> Result<Self, FeeError> {
        if !order_total.is_positive() {
            return Ok(Self {
                fee: Money::zero(),
                rate,
                floored: false,
            });
        }

        let raw = order_total.apply_rate(rate)?;
        let floored = raw < minimum_fee;
        let fee = if floored { minimum_fee } else { raw };

        tracing::trace!(
            order_total = order_total.amount(),
            rate,
            fee = fee.amount(),
            floored,
            "payment fee"
        );

        Ok(Self { fee, rate, floored })
    }
}
