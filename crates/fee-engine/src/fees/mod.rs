//! Fee components.
//!
//! Each component is computed independently from the order and the rate
//! snapshot; the aggregator in [`crate::breakdown`] only sums them.

mod item;
mod payment;
mod shipping;

pub use item::ItemFee;
pub use payment::PaymentFee;
pub use shipping::{ShippingFee, ShippingRule};
