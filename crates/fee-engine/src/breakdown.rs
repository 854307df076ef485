//! Order fee aggregation.

use serde::{Deserialize, Serialize};

use crate::error::FeeError;
use crate::fees::{ItemFee, PaymentFee, ShippingFee, ShippingRule};
use crate::money::Money;
use crate::order::OrderInput;
use crate::profit::Profit;
use crate::rates::{PaymentTier, RateConfig};

/// Complete fee and profit breakdown for one order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeBreakdown {
    /// `unit_price * quantity + shipping_charge`.
    pub order_total: Money,
    /// Item commission for all units.
    pub item_fee: Money,
    /// Whether the per-unit item commission hit the cap.
    pub item_fee_capped: bool,
    /// Shipping commission.
    pub shipping_fee: Money,
    /// Payment-processing fee.
    pub payment_fee: Money,
    /// Whether the payment fee was raised to the minimum.
    pub payment_fee_floored: bool,
    /// Sum of the three fee components.
    pub total_fees: Money,
    /// `order_total - total_fees`.
    pub net_proceeds: Money,
    /// Profit figures; absent when no unit cost was entered.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub profit: Option<Profit>,

    /// Item commission for one unit, after the cap.
    pub item_fee_per_unit: Money,
    /// Units sold.
    pub quantity: i64,
    /// Shipping rule that applied.
    pub shipping_rule: ShippingRule,
    /// Payment tier used.
    pub payment_tier: PaymentTier,
    /// Payment rate applied.
    pub payment_rate: f64,
}

impl FeeBreakdown {
    /// Compute the breakdown for `input` under `config` in a single pass.
    ///
    /// Returns [`FeeError::MissingPrice`] when no unit price was entered.
    pub fn compute(input: &OrderInput, config: &RateConfig) -> Result<Self, FeeError> {
        let unit_price = input.unit_price.ok_or(FeeError::MissingPrice)?;
        input.validate()?;

        let order_total = unit_price
            .checked_mul(input.quantity)
            .and_then(|subtotal| subtotal.checked_add(input.shipping_charge))
            .ok_or(FeeError::Overflow)?;

        let item = ItemFee::compute(
            unit_price,
            input.quantity,
            config.item_fee_rate(),
            config.item_fee_cap(),
        )?;
        let shipping = ShippingFee::compute(
            input.shipping_charge,
            input.delivery_method,
            config.shipping_fee_rate(),
            config.shipping_free_threshold(),
        )?;
        let payment = PaymentFee::compute(order_total, input.payment_tier, config)?;

        let total_fees = item
            .total
            .checked_add(shipping.fee)
            .and_then(|sum| sum.checked_add(payment.fee))
            .ok_or(FeeError::Overflow)?;
        let net_proceeds = order_total
            .checked_sub(total_fees)
            .ok_or(FeeError::Overflow)?;

        let profit = input
            .unit_cost
            .map(|cost| Profit::compute(net_proceeds, order_total, cost, input.quantity))
            .transpose()?;

        tracing::debug!(
            order_total = order_total.amount(),
            item_fee = item.total.amount(),
            shipping_fee = shipping.fee.amount(),
            payment_fee = payment.fee.amount(),
            net_proceeds = net_proceeds.amount(),
            gross_profit = profit.map(|p| p.gross_profit.amount()),
            "computed order fees"
        );

        Ok(Self {
            order_total,
            item_fee: item.total,
            item_fee_capped: item.capped,
            shipping_fee: shipping.fee,
            payment_fee: payment.fee,
            payment_fee_floored: payment.floored,
            total_fees,
            net_proceeds,
            profit,
            item_fee_per_unit: item.per_unit,
            quantity: input.quantity,
            shipping_rule: shipping.rule,
            payment_tier: input.payment_tier,
            payment_rate: payment.rate,
        })
    }

    /// Gross profit, if a unit cost was entered.
    pub fn gross_profit(&self) -> Option<Money> {
        self.profit.map(|p| p.gross_profit)
    }

    /// Profit margin in percent, if a unit cost was entered and the order is non-empty.
    pub fn profit_margin_pct(&self) -> Option<f64> {
        self.profit.and_then(|p| p.margin_pct)
    }

    /// Whether profit figures are available.
    pub fn has_profit(&self) -> bool {
        self.profit.is_some()
    }

    /// Serialize to a JSON string.
    pub fn to_json(&self) -> Result<String, FeeError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Compute the fee breakdown for one order.
pub fn calculate(input: &OrderInput, config: &RateConfig) -> Result<FeeBreakdown, FeeError> {
    FeeBreakdown::compute(input, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rates::DeliveryMethod;

    #[test]
    fn test_missing_price() {
        let err = calculate(&OrderInput::awaiting_price(), &RateConfig::default()).unwrap_err();
        assert_eq!(err, FeeError::MissingPrice);
    }

    #[test]
    fn test_invalid_input_rejected() {
        let order = OrderInput::new(Money::new(100)).with_quantity(0);
        let err = calculate(&order, &RateConfig::default()).unwrap_err();
        assert!(matches!(err, FeeError::InvalidInput(_)));
    }

    #[test]
    fn test_detail_fields() {
        let order = OrderInput::new(Money::new(30000))
            .with_quantity(2)
            .with_shipping(Money::new(120))
            .with_delivery(DeliveryMethod::InPersonHandover)
            .with_payment_tier(PaymentTier::Credit6);
        let breakdown = calculate(&order, &RateConfig::default()).unwrap();

        assert_eq!(breakdown.order_total, Money::new(60120));
        assert_eq!(breakdown.item_fee_per_unit, Money::new(498));
        assert_eq!(breakdown.item_fee, Money::new(996));
        assert!(breakdown.item_fee_capped);
        // 120 * 0.0249 = 2.988
        assert_eq!(breakdown.shipping_fee, Money::new(3));
        assert_eq!(breakdown.shipping_rule, ShippingRule::HandoverCharged);
        // 60120 * 0.035 = 2104.2
        assert_eq!(breakdown.payment_fee, Money::new(2104));
        assert_eq!(breakdown.payment_rate, 0.035);
        assert_eq!(breakdown.payment_tier, PaymentTier::Credit6);
        assert_eq!(breakdown.quantity, 2);
        assert_eq!(breakdown.total_fees, Money::new(3103));
        assert_eq!(breakdown.net_proceeds, Money::new(57017));
        assert!(!breakdown.has_profit());
    }

    #[test]
    fn test_profit_omitted_from_json_without_cost() {
        let order = OrderInput::new(Money::new(1000));
        let json = calculate(&order, &RateConfig::default())
            .unwrap()
            .to_json()
            .unwrap();
        assert!(!json.contains("profit"));

        let json = calculate(&order.with_unit_cost(Money::new(0)), &RateConfig::default())
            .unwrap()
            .to_json()
            .unwrap();
        assert!(json.contains("\"gross_profit\""));
    }

    #[test]
    fn test_json_round_trip() {
        let order = OrderInput::new(Money::new(1000)).with_shipping(Money::new(60));
        let breakdown = calculate(&order, &RateConfig::default()).unwrap();
        let back: FeeBreakdown = serde_json::from_str(&breakdown.to_json().unwrap()).unwrap();
        assert_eq!(back, breakdown);
    }
}
