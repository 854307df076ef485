//! CLI configuration.
//!
//! The config file holds the user's rate overrides and order defaults. It is
//! mutable state owned by the CLI; the engine only ever sees the validated
//! [`RateConfig`] snapshot built from it.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use fee_engine::{DeliveryMethod, FeeError, Money, PaymentTier, RateConfig};
use serde::{Deserialize, Serialize};

/// Config file names searched from the working directory upwards.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["feecalc.toml", ".feecalc.toml", "feecalc.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Rate overrides.
    #[serde(default)]
    pub rates: RatesConfig,

    /// Defaults for order fields not given on the command line.
    #[serde(default)]
    pub order: OrderDefaults,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if is_json(path) {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// Build the validated rate snapshot.
    pub fn rate_config(&self) -> Result<RateConfig, FeeError> {
        self.rates.to_rate_config()
    }
}

/// `[rates]` section. Omitted fields keep the default schedule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RatesConfig {
    /// Commission rate on the item price, as a fraction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_fee_rate: Option<f64>,

    /// Per-unit cap on the item commission.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_fee_cap: Option<i64>,

    /// Commission rate on the shipping charge, as a fraction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_fee_rate: Option<f64>,

    /// General-shipping charges at or below this are exempt.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_free_threshold: Option<i64>,

    /// Minimum payment-processing fee.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_fee_minimum: Option<i64>,

    /// Payment rate per tier key. When present it must list every tier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_tiers: Option<BTreeMap<String, f64>>,
}

impl RatesConfig {
    /// Merge overrides onto the default schedule and validate.
    pub fn to_rate_config(&self) -> Result<RateConfig, FeeError> {
        let mut builder = RateConfig::builder();

        if let Some(rate) = self.item_fee_rate {
            builder = builder.item_fee_rate(rate);
        }
        if let Some(cap) = self.item_fee_cap {
            builder = builder.item_fee_cap(Money::new(cap));
        }
        if let Some(rate) = self.shipping_fee_rate {
            builder = builder.shipping_fee_rate(rate);
        }
        if let Some(threshold) = self.shipping_free_threshold {
            builder = builder.shipping_free_threshold(Money::new(threshold));
        }
        if let Some(minimum) = self.payment_fee_minimum {
            builder = builder.payment_fee_minimum(Money::new(minimum));
        }
        if let Some(ref tiers) = self.payment_tiers {
            let mut rates = BTreeMap::new();
            for (key, rate) in tiers {
                let tier: PaymentTier = key.parse().map_err(|_| {
                    FeeError::InvalidConfig(format!("unknown payment tier: {}", key))
                })?;
                rates.insert(tier, *rate);
            }
            builder = builder.payment_tier_rates(rates);
        }

        builder.build()
    }

    /// Write every field of `config` back as an explicit override.
    pub fn from_rate_config(config: &RateConfig) -> Self {
        Self {
            item_fee_rate: Some(config.item_fee_rate()),
            item_fee_cap: Some(config.item_fee_cap().amount()),
            shipping_fee_rate: Some(config.shipping_fee_rate()),
            shipping_free_threshold: Some(config.shipping_free_threshold().amount()),
            payment_fee_minimum: Some(config.payment_fee_minimum().amount()),
            payment_tiers: Some(
                config
                    .payment_tier_rates()
                    .iter()
                    .map(|(tier, rate)| (tier.key().to_string(), *rate))
                    .collect(),
            ),
        }
    }
}

/// `[order]` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderDefaults {
    /// Default quantity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,

    /// Default buyer-paid shipping charge.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_charge: Option<i64>,

    /// Default delivery method.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_method: Option<DeliveryMethod>,

    /// Default payment tier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_tier: Option<PaymentTier>,
}

fn is_json(path: &Path) -> bool {
    path.extension().and_then(|ext| ext.to_str()) == Some("json")
}

/// Generate a default feecalc.toml config file.
pub fn generate_default_config() -> String {
    r#"# Marketplace fee calculator configuration

[rates]
# Commission on the item price, capped per unit.
item_fee_rate = 0.0249
item_fee_cap = 498

# Commission on the buyer-paid shipping charge. General shipping at or
# below the threshold is exempt; in-person handover is always charged.
shipping_fee_rate = 0.0249
shipping_free_threshold = 300

# Payment-processing fee floor for a non-empty order.
payment_fee_minimum = 1

# Every tier must be listed once this table is present.
[rates.payment_tiers]
non_credit = 0.01
credit_lump_sum = 0.02
credit_3 = 0.03
credit_6 = 0.035
credit_12 = 0.06
credit_24 = 0.06

[order]
quantity = 1
shipping_charge = 60
delivery_method = "general_shipping"
payment_tier = "non_credit"
"#
    .to_string()
}
