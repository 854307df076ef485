//! Commission on the item price.

use serde::{Deserialize, Serialize};

use crate::error::FeeError;
use crate::money::Money;

/// Item commission for one order line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemFee {
    /// Fee charged per unit, after the cap.
    pub per_unit: Money,
    /// Whether the per-unit fee hit the cap.
    pub capped: bool,
    /// `per_unit * quantity`.
    pub total: Money,
}

impl ItemFee {
    /// Round `unit_price * rate` half-to-even, clamp to `cap`, then scale by
    /// `quantity`.
    pub fn compute(
        unit_price: Money,
        quantity: i64,
        rate: f64,
        cap: Money,
    ) -> Result<Self, FeeError> {
        let rounded = unit_price.apply_rate(rate)?;
        let capped = rounded > cap;
        let per_unit = if capped { cap } else { rounded };
        let total = per_unit.checked_mul(quantity).ok_or(FeeError::Overflow)?;

        tracing::trace!(
            unit_price = unit_price.amount(),
            per_unit = per_unit.amount(),
            capped,
            total = total.amount(),
            "item fee"
        );

        Ok(Self {
            per_unit,
            capped,
            total,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RATE: f64 = 0.0249;
    const CAP: Money = Money::new(498);

    #[test]
    fn test_uncapped() {
        let fee = ItemFee::compute(Money::new(1000), 1, RATE, CAP).unwrap();
        assert_eq!(fee.per_unit, Money::new(25));
        assert!(!fee.capped);
        assert_eq!(fee.total, Money::new(25));
    }

    #[test]
    fn test_capped() {
        // 30000 * 0.0249 = 747
        let fee = ItemFee::compute(Money::new(30000), 1, RATE, CAP).unwrap();
        assert_eq!(fee.per_unit, Money::new(498));
        assert!(fee.capped);
        assert_eq!(fee.total, Money::new(498));
    }

    #[test]
    fn test_cap_applies_per_unit() {
        let fee = ItemFee::compute(Money::new(30000), 3, RATE, CAP).unwrap();
        assert_eq!(fee.per_unit, Money::new(498));
        assert_eq!(fee.total, Money::new(1494));
    }

    #[test]
    fn test_exactly_at_cap_is_not_capped() {
        let fee = ItemFee::compute(Money::new(1000), 1, 0.498, CAP).unwrap();
        assert_eq!(fee.per_unit, Money::new(498));
        assert!(!fee.capped);
    }

    #[test]
    fn test_quantity_multiplies_rounded_fee() {
        // 130 * 0.0249 = 3.237 -> 3 per unit, not round(9.711) = 10
        let fee = ItemFee::compute(Money::new(130), 3, RATE, CAP).unwrap();
        assert_eq!(fee.per_unit, Money::new(3));
        assert_eq!(fee.total, Money::new(9));
    }

    #[test]
    fn test_half_even_tie() {
        // 100 * 0.025 = 2.5 -> 2, 300 * 0.025 = 7.5 -> 8
        let fee = ItemFee::compute(Money::new(100), 1, 0.025, CAP).unwrap();
        assert_eq!(fee.per_unit, Money::new(2));
        let fee = ItemFee::compute(Money::new(300), 1, 0.025, CAP).unwrap();
        assert_eq!(fee.per_unit, Money::new(8));
    }

    #[test]
    fn test_zero_price() {
        let fee = ItemFee::compute(Money::zero(), 5, RATE, CAP).unwrap();
        assert_eq!(fee.total, Money::zero());
        assert!(!fee.capped);
    }

    #[test]
    fn test_overflow() {
        let err = ItemFee::compute(Money::new(1000), i64::MAX, RATE, CAP).unwrap_err();
        assert_eq!(err, FeeError::Overflow);
    }
}
