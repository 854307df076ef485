//! Order input.

use serde::{Deserialize, Serialize};

use crate::error::FeeError;
use crate::money::Money;
use crate::rates::{DeliveryMethod, PaymentTier};

/// Everything the engine needs to know about one order.
///
/// `unit_price` is optional so a collector can represent "price not entered
/// yet"; the engine refuses to compute until it is present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderInput {
    /// Sale price of one unit.
    pub unit_price: Option<Money>,
    /// Number of units sold.
    #[serde(default = "default_quantity")]
    pub quantity: i64,
    /// Shipping charge paid by the buyer.
    #[serde(default)]
    pub shipping_charge: Money,
    /// How the order is delivered.
    #[serde(default)]
    pub delivery_method: DeliveryMethod,
    /// How the buyer pays.
    #[serde(default)]
    pub payment_tier: PaymentTier,
    /// Seller's cost of one unit.
    #[serde(default)]
    pub unit_cost: Option<Money>,
}

fn default_quantity() -> i64 {
    1
}

impl Default for OrderInput {
    fn default() -> Self {
        Self {
            unit_price: None,
            quantity: default_quantity(),
            shipping_charge: Money::zero(),
            delivery_method: DeliveryMethod::default(),
            payment_tier: PaymentTier::default(),
            unit_cost: None,
        }
    }
}

impl OrderInput {
    /// Create an order for one unit at `unit_price`.
    pub fn new(unit_price: Money) -> Self {
        Self {
            unit_price: Some(unit_price),
            ..Self::default()
        }
    }

    /// Create an order whose price has not been entered yet.
    pub fn awaiting_price() -> Self {
        Self::default()
    }

    /// Set the quantity.
    pub fn with_quantity(mut self, quantity: i64) -> Self {
        self.quantity = quantity;
        self
    }

    /// Set the buyer-paid shipping charge.
    pub fn with_shipping(mut self, shipping_charge: Money) -> Self {
        self.shipping_charge = shipping_charge;
        self
    }

    /// Set the delivery method.
    pub fn with_delivery(mut self, delivery_method: DeliveryMethod) -> Self {
        self.delivery_method = delivery_method;
        self
    }

    /// Set the payment tier.
    pub fn with_payment_tier(mut self, payment_tier: PaymentTier) -> Self {
        self.payment_tier = payment_tier;
        self
    }

    /// Set the unit cost.
    pub fn with_unit_cost(mut self, unit_cost: Money) -> Self {
        self.unit_cost = Some(unit_cost);
        self
    }

    /// Whether the price has been entered.
    pub fn has_price(&self) -> bool {
        self.unit_price.is_some()
    }

    /// Check the ranges a collector is expected to enforce.
    ///
    /// A missing price is not an error here; see [`FeeError::MissingPrice`].
    pub fn validate(&self) -> Result<(), FeeError> {
        if self.quantity < 1 {
            return Err(FeeError::InvalidInput(format!(
                "quantity must be at least 1, got {}",
                self.quantity
            )));
        }
        if let Some(price) = self.unit_price {
            non_negative("unit_price", price)?;
        }
        non_negative("shipping_charge", self.shipping_charge)?;
        if let Some(cost) = self.unit_cost {
            non_negative("unit_cost", cost)?;
        }
        Ok(())
    }
}

fn non_negative(name: &str, amount: Money) -> Result<(), FeeError> {
    if amount.is_negative() {
        return Err(FeeError::InvalidInput(format!(
            "{} must not be negative, got {}",
            name,
            amount.amount()
        )));
    }
    Ok(())
}
