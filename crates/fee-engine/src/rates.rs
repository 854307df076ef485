//! Rate configuration.
//!
//! A [`RateConfig`] is a validated, immutable snapshot of every tunable
//! percentage, cap and threshold. Callers that let users edit rates keep
//! their own mutable state and build a fresh snapshot for each computation.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FeeError;
use crate::money::Money;

/// Default commission rate on the item price.
pub const DEFAULT_ITEM_FEE_RATE: f64 = 0.0249;
/// Default per-unit cap on the item commission.
pub const DEFAULT_ITEM_FEE_CAP: Money = Money::new(498);
/// Default commission rate on the buyer-paid shipping charge.
pub const DEFAULT_SHIPPING_FEE_RATE: f64 = 0.0249;
/// Default shipping charge at or below which general shipping is exempt.
pub const DEFAULT_SHIPPING_FREE_THRESHOLD: Money = Money::new(300);
/// Default minimum payment-processing fee.
pub const DEFAULT_PAYMENT_FEE_MINIMUM: Money = Money::new(1);

/// Payment method category, each with its own processing rate.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum PaymentTier {
    /// ATM transfer, store balance and other non-card methods.
    #[default]
    NonCredit,
    /// Credit card, paid in one charge.
    CreditLumpSum,
    /// Credit card, 3 installments.
    #[serde(rename = "credit_3")]
    Credit3,
    /// Credit card, 6 installments.
    #[serde(rename = "credit_6")]
    Credit6,
    /// Credit card, 12 installments.
    #[serde(rename = "credit_12")]
    Credit12,
    /// Credit card, 24 installments.
    #[serde(rename = "credit_24")]
    Credit24,
}

impl PaymentTier {
    /// Every tier, in rate-table order.
    pub const ALL: [PaymentTier; 6] = [
        PaymentTier::NonCredit,
        PaymentTier::CreditLumpSum,
        PaymentTier::Credit3,
        PaymentTier::Credit6,
        PaymentTier::Credit12,
        PaymentTier::Credit24,
    ];

    /// Stable key used in config files and on the command line.
    pub fn key(&self) -> &'static str {
        match self {
            PaymentTier::NonCredit => "non_credit",
            PaymentTier::CreditLumpSum => "credit_lump_sum",
            PaymentTier::Credit3 => "credit_3",
            PaymentTier::Credit6 => "credit_6",
            PaymentTier::Credit12 => "credit_12",
            PaymentTier::Credit24 => "credit_24",
        }
    }

    /// Whether the buyer pays by credit card.
    pub fn is_credit(&self) -> bool {
        !matches!(self, PaymentTier::NonCredit)
    }

    /// Number of installments, for installment plans.
    pub fn installments(&self) -> Option<u32> {
        match self {
            PaymentTier::Credit3 => Some(3),
            PaymentTier::Credit6 => Some(6),
            PaymentTier::Credit12 => Some(12),
            PaymentTier::Credit24 => Some(24),
            PaymentTier::NonCredit | PaymentTier::CreditLumpSum => None,
        }
    }

    fn default_rate(&self) -> f64 {
        match self {
            PaymentTier::NonCredit => 0.01,
            PaymentTier::CreditLumpSum => 0.02,
            PaymentTier::Credit3 => 0.03,
            PaymentTier::Credit6 => 0.035,
            PaymentTier::Credit12 => 0.06,
            PaymentTier::Credit24 => 0.06,
        }
    }
}

impl fmt::Display for PaymentTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for PaymentTier {
    type Err = FeeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        PaymentTier::ALL
            .into_iter()
            .find(|tier| tier.key() == normalized)
            .ok_or_else(|| FeeError::InvalidInput(format!("unknown payment tier: {}", s)))
    }
}

/// How the item reaches the buyer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryMethod {
    /// Convenience store, home delivery or post.
    #[default]
    GeneralShipping,
    /// Meet-up or self pick-up.
    InPersonHandover,
}

impl DeliveryMethod {
    /// Stable key used in config files and on the command line.
    pub fn key(&self) -> &'static str {
        match self {
            DeliveryMethod::GeneralShipping => "general_shipping",
            DeliveryMethod::InPersonHandover => "in_person_handover",
        }
    }
}

impl fmt::Display for DeliveryMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for DeliveryMethod {
    type Err = FeeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "general_shipping" | "general" | "shipping" => Ok(DeliveryMethod::GeneralShipping),
            "in_person_handover" | "handover" | "pickup" => Ok(DeliveryMethod::InPersonHandover),
            _ => Err(FeeError::InvalidInput(format!(
                "unknown delivery method: {}",
                s
            ))),
        }
    }
}

/// Validated, immutable rate snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RateConfigParts", into = "RateConfigParts")]
pub struct RateConfig {
    item_fee_rate: f64,
    item_fee_cap: Money,
    shipping_fee_rate: f64,
    shipping_free_threshold: Money,
    payment_tier_rates: BTreeMap<PaymentTier, f64>,
    payment_fee_minimum: Money,
}

impl RateConfig {
    /// Start a builder seeded with the default schedule.
    pub fn builder() -> RateConfigBuilder {
        RateConfigBuilder::default()
    }

    /// Build and validate a snapshot from raw parts.
    pub fn from_parts(parts: RateConfigParts) -> Result<Self, FeeError> {
        validate_rate("item_fee_rate", parts.item_fee_rate)?;
        validate_amount("item_fee_cap", parts.item_fee_cap)?;
        validate_rate("shipping_fee_rate", parts.shipping_fee_rate)?;
        validate_amount("shipping_free_threshold", parts.shipping_free_threshold)?;
        validate_amount("payment_fee_minimum", parts.payment_fee_minimum)?;

        for tier in PaymentTier::ALL {
            let rate = parts.payment_tier_rates.get(&tier).ok_or_else(|| {
                FeeError::InvalidConfig(format!("missing rate for payment tier {}", tier))
            })?;
            validate_rate(&format!("payment_tier_rates.{}", tier), *rate)?;
        }

        Ok(Self {
            item_fee_rate: parts.item_fee_rate,
            item_fee_cap: parts.item_fee_cap,
            shipping_fee_rate: parts.shipping_fee_rate,
            shipping_free_threshold: parts.shipping_free_threshold,
            payment_tier_rates: parts.payment_tier_rates,
            payment_fee_minimum: parts.payment_fee_minimum,
        })
    }

    /// The older two-rate schedule: 2% for any card payment, 1% otherwise.
    pub fn legacy() -> Self {
        let payment_tier_rates = PaymentTier::ALL
            .into_iter()
            .map(|tier| (tier, if tier.is_credit() { 0.02 } else { 0.01 }))
            .collect();
        Self {
            payment_tier_rates,
            ..Self::default()
        }
    }

    /// Commission rate on the item price.
    pub fn item_fee_rate(&self) -> f64 {
        self.item_fee_rate
    }

    /// Per-unit cap on the item commission.
    pub fn item_fee_cap(&self) -> Money {
        self.item_fee_cap
    }

    /// Commission rate on the shipping charge.
    pub fn shipping_fee_rate(&self) -> f64 {
        self.shipping_fee_rate
    }

    /// General-shipping charges at or below this amount carry no fee.
    pub fn shipping_free_threshold(&self) -> Money {
        self.shipping_free_threshold
    }

    /// Minimum payment-processing fee for a non-empty order.
    pub fn payment_fee_minimum(&self) -> Money {
        self.payment_fee_minimum
    }

    /// Full tier table, in tier order.
    pub fn payment_tier_rates(&self) -> &BTreeMap<PaymentTier, f64> {
        &self.payment_tier_rates
    }

    /// Processing rate for one tier.
    pub fn payment_rate(&self, tier: PaymentTier) -> f64 {
        // Every tier is present once validated.
        self.payment_tier_rates
            .get(&tier)
            .copied()
            .unwrap_or_else(|| tier.default_rate())
    }

    /// Copy out the raw parts, e.g. to edit and rebuild.
    pub fn to_parts(&self) -> RateConfigParts {
        RateConfigParts::from(self.clone())
    }
}

impl Default for RateConfig {
    fn default() -> Self {
        Self {
            item_fee_rate: DEFAULT_ITEM_FEE_RATE,
            item_fee_cap: DEFAULT_ITEM_FEE_CAP,
            shipping_fee_rate: DEFAULT_SHIPPING_FEE_RATE,
            shipping_free_threshold: DEFAULT_SHIPPING_FREE_THRESHOLD,
            payment_tier_rates: default_tier_rates(),
            payment_fee_minimum: DEFAULT_PAYMENT_FEE_MINIMUM,
        }
    }
}

impl TryFrom<RateConfigParts> for RateConfig {
    type Error = FeeError;

    fn try_from(parts: RateConfigParts) -> Result<Self, Self::Error> {
        RateConfig::from_parts(parts)
    }
}

/// Unvalidated rate fields, the wire shape of [`RateConfig`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateConfigParts {
    pub item_fee_rate: f64,
    pub item_fee_cap: Money,
    pub shipping_fee_rate: f64,
    pub shipping_free_threshold: Money,
    pub payment_tier_rates: BTreeMap<PaymentTier, f64>,
    pub payment_fee_minimum: Money,
}

impl Default for RateConfigParts {
    fn default() -> Self {
        RateConfig::default().into()
    }
}

impl From<RateConfig> for RateConfigParts {
    fn from(config: RateConfig) -> Self {
        Self {
            item_fee_rate: config.item_fee_rate,
            item_fee_cap: config.item_fee_cap,
            shipping_fee_rate: config.shipping_fee_rate,
            shipping_free_threshold: config.shipping_free_threshold,
            payment_tier_rates: config.payment_tier_rates,
            payment_fee_minimum: config.payment_fee_minimum,
        }
    }
}

/// Fluent builder for [`RateConfig`].
#[derive(Debug, Clone, Default)]
pub struct RateConfigBuilder {
    parts: RateConfigParts,
}

impl RateConfigBuilder {
    /// Set the item commission rate.
    pub fn item_fee_rate(mut self, rate: f64) -> Self {
        self.parts.item_fee_rate = rate;
        self
    }

    /// Set the per-unit item commission cap.
    pub fn item_fee_cap(mut self, cap: Money) -> Self {
        self.parts.item_fee_cap = cap;
        self
    }

    /// Set the shipping commission rate.
    pub fn shipping_fee_rate(mut self, rate: f64) -> Self {
        self.parts.shipping_fee_rate = rate;
        self
    }

    /// Set the general-shipping free threshold.
    pub fn shipping_free_threshold(mut self, threshold: Money) -> Self {
        self.parts.shipping_free_threshold = threshold;
        self
    }

    /// Set the rate for one payment tier.
    pub fn payment_rate(mut self, tier: PaymentTier, rate: f64) -> Self {
        self.parts.payment_tier_rates.insert(tier, rate);
        self
    }

    /// Replace the whole tier table. Tiers missing from `rates` fail `build`.
    pub fn payment_tier_rates(mut self, rates: BTreeMap<PaymentTier, f64>) -> Self {
        self.parts.payment_tier_rates = rates;
        self
    }

    /// Set the minimum payment-processing fee.
    pub fn payment_fee_minimum(mut self, minimum: Money) -> Self {
        self.parts.payment_fee_minimum = minimum;
        self
    }

    /// Validate and freeze.
    pub fn build(self) -> Result<RateConfig, FeeError> {
        RateConfig::from_parts(self.parts)
    }
}

fn default_tier_rates() -> BTreeMap<PaymentTier, f64> {
    PaymentTier::ALL
        .into_iter()
        .map(|tier| (tier, tier.default_rate()))
        .collect()
}

fn validate_rate(name: &str, rate: f64) -> Result<(), FeeError> {
    if !rate.is_finite() || rate < 0.0 {
        return Err(FeeError::InvalidConfig(format!(
            "{} must be a non-negative fraction, got {}",
            name, rate
        )));
    }
    Ok(())
}

fn validate_amount(name: &str, amount: Money) -> Result<(), FeeError> {
    if amount.is_negative() {
        return Err(FeeError::InvalidConfig(format!(
            "{} must not be negative, got {}",
            name,
            amount.amount()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_schedule() {
        let config = RateConfig::default();
        assert_eq!(config.item_fee_rate(), 0.0249);
        assert_eq!(config.item_fee_cap(), Money::new(498));
        assert_eq!(config.shipping_fee_rate(), 0.0249);
        assert_eq!(config.shipping_free_threshold(), Money::new(300));
        assert_eq!(config.payment_fee_minimum(), Money::new(1));
        assert_eq!(config.payment_rate(PaymentTier::NonCredit), 0.01);
        assert_eq!(config.payment_rate(PaymentTier::CreditLumpSum), 0.02);
        assert_eq!(config.payment_rate(PaymentTier::Credit3), 0.03);
        assert_eq!(config.payment_rate(PaymentTier::Credit6), 0.035);
        assert_eq!(config.payment_rate(PaymentTier::Credit12), 0.06);
        assert_eq!(config.payment_rate(PaymentTier::Credit24), 0.06);
    }

    #[test]
    fn test_tier_table_is_ordered() {
        let config = RateConfig::default();
        let tiers: Vec<_> = config.payment_tier_rates().keys().copied().collect();
        assert_eq!(tiers, PaymentTier::ALL.to_vec());
    }

    #[test]
    fn test_legacy_schedule() {
        let config = RateConfig::legacy();
        assert_eq!(config.payment_rate(PaymentTier::NonCredit), 0.01);
        for tier in PaymentTier::ALL.into_iter().filter(|t| t.is_credit()) {
            assert_eq!(config.payment_rate(tier), 0.02);
        }
    }

    #[test]
    fn test_builder_overrides() {
        let config = RateConfig::builder()
            .item_fee_rate(0.03)
            .item_fee_cap(Money::new(600))
            .payment_rate(PaymentTier::Credit24, 0.08)
            .build()
            .unwrap();
        assert_eq!(config.item_fee_rate(), 0.03);
        assert_eq!(config.item_fee_cap(), Money::new(600));
        assert_eq!(config.payment_rate(PaymentTier::Credit24), 0.08);
        assert_eq!(config.payment_rate(PaymentTier::Credit12), 0.06);
    }

    #[test]
    fn test_negative_rate_rejected() {
        let err = RateConfig::builder().item_fee_rate(-0.01).build().unwrap_err();
        assert!(matches!(err, FeeError::InvalidConfig(_)));

        let err = RateConfig::builder()
            .payment_rate(PaymentTier::Credit3, -1.0)
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("payment_tier_rates.credit_3"));
    }

    #[test]
    fn test_non_finite_rate_rejected() {
        let err = RateConfig::builder()
            .shipping_fee_rate(f64::NAN)
            .build()
            .unwrap_err();
        assert!(matches!(err, FeeError::InvalidConfig(_)));
    }

    #[test]
    fn test_negative_amounts_rejected() {
        assert!(RateConfig::builder().item_fee_cap(Money::new(-1)).build().is_err());
        assert!(RateConfig::builder()
            .shipping_free_threshold(Money::new(-300))
            .build()
            .is_err());
        assert!(RateConfig::builder()
            .payment_fee_minimum(Money::new(-1))
            .build()
            .is_err());
    }

    #[test]
    fn test_missing_tier_rejected() {
        let mut rates = RateConfig::default().payment_tier_rates().clone();
        rates.remove(&PaymentTier::Credit12);
        let err = RateConfig::builder()
            .payment_tier_rates(rates)
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            FeeError::InvalidConfig("missing rate for payment tier credit_12".into())
        );
    }

    #[test]
    fn test_deserialize_validates() {
        let mut parts = RateConfigParts::default();
        parts.payment_tier_rates.remove(&PaymentTier::NonCredit);
        let json = serde_json::to_string(&parts).unwrap();
        assert!(serde_json::from_str::<RateConfig>(&json).is_err());

        let json = serde_json::to_string(&RateConfig::default()).unwrap();
        let config: RateConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, RateConfig::default());
    }

    #[test]
    fn test_payment_tier_keys() {
        for tier in PaymentTier::ALL {
            assert_eq!(tier.key().parse::<PaymentTier>().unwrap(), tier);
            let json = serde_json::to_string(&tier).unwrap();
            assert_eq!(json, format!("\"{}\"", tier.key()));
        }
        assert_eq!("Credit-6".parse::<PaymentTier>().unwrap(), PaymentTier::Credit6);
        assert!("credit_5".parse::<PaymentTier>().is_err());
    }

    #[test]
    fn test_payment_tier_installments() {
        assert_eq!(PaymentTier::NonCredit.installments(), None);
        assert_eq!(PaymentTier::CreditLumpSum.installments(), None);
        assert_eq!(PaymentTier::Credit12.installments(), Some(12));
        assert!(!PaymentTier::NonCredit.is_credit());
        assert!(PaymentTier::CreditLumpSum.is_credit());
    }

    #[test]
    fn test_delivery_method_parse() {
        assert_eq!(
            "handover".parse::<DeliveryMethod>().unwrap(),
            DeliveryMethod::InPersonHandover
        );
        assert_eq!(
            "general_shipping".parse::<DeliveryMethod>().unwrap(),
            DeliveryMethod::GeneralShipping
        );
        assert!("drone".parse::<DeliveryMethod>().is_err());
    }
}
