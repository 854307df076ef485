//! Marketplace order fee and profit computation.
//!
//! Given an order's price, quantity, shipping charge, delivery method,
//! payment tier and optional unit cost, the engine computes:
//!
//! - **Item fee**: commission on the sale price, capped per unit
//! - **Shipping fee**: commission on the buyer-paid shipping charge, exempt at
//!   or under a threshold for general shipping
//! - **Payment fee**: processing fee on the order total, rated by payment tier
//!   and floored at a minimum
//! - **Net proceeds** and, when a unit cost is known, **gross profit**
//!
//! Every computation is a pure function of an [`OrderInput`] and an immutable
//! [`RateConfig`] snapshot.
//!
//! # Example
//!
//! ```
//! use fee_engine::prelude::*;
//!
//! let order = OrderInput::new(Money::new(1000))
//!     .with_shipping(Money::new(60))
//!     .with_unit_cost(Money::new(500));
//!
//! let breakdown = calculate(&order, &RateConfig::default()).unwrap();
//! assert_eq!(breakdown.total_fees, Money::new(36));
//! assert_eq!(breakdown.net_proceeds, Money::new(1024));
//! assert_eq!(breakdown.gross_profit(), Some(Money::new(524)));
//! ```

pub mod breakdown;
pub mod error;
pub mod fees;
pub mod money;
pub mod order;
pub mod profit;
pub mod rates;

pub use breakdown::{calculate, FeeBreakdown};
pub use error::FeeError;
pub use money::Money;
pub use order::OrderInput;
pub use rates::{DeliveryMethod, PaymentTier, RateConfig};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::breakdown::{calculate, FeeBreakdown};
    pub use crate::error::FeeError;
    pub use crate::fees::{ItemFee, PaymentFee, ShippingFee, ShippingRule};
    pub use crate::money::Money;
    pub use crate::order::OrderInput;
    pub use crate::profit::Profit;
    pub use crate::rates::{
        DeliveryMethod, PaymentTier, RateConfig, RateConfigBuilder, RateConfigParts,
    };
}
