//! Configuration management commands.

use anyhow::{bail, Context as _, Result};
use fee_engine::{DeliveryMethod, PaymentTier};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CliConfig, RatesConfig};
use crate::context::Context;
use crate::output::format_rate;

/// Run the config command.
pub fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Get { key } => get_config(&key, ctx),
        ConfigCommand::Set { key, value } => set_config(&key, &value, ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
        ConfigCommand::Validate => validate_config(ctx),
        ConfigCommand::Path => show_path(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Current Configuration");

    if ctx.output.is_json() {
        ctx.output.json(&effective_config(ctx));
        return Ok(());
    }

    let rates = &ctx.rates;

    ctx.output.info("");
    ctx.output.info("[rates]");
    ctx.output.kv("item_fee_rate", &rates.item_fee_rate().to_string());
    ctx.output.kv("item_fee_cap", &rates.item_fee_cap().amount().to_string());
    ctx.output.kv("shipping_fee_rate", &rates.shipping_fee_rate().to_string());
    ctx.output.kv(
        "shipping_free_threshold",
        &rates.shipping_free_threshold().amount().to_string(),
    );
    ctx.output.kv(
        "payment_fee_minimum",
        &rates.payment_fee_minimum().amount().to_string(),
    );

    ctx.output.info("");
    ctx.output.info("[rates.payment_tiers]");
    for (tier, rate) in rates.payment_tier_rates() {
        ctx.output
            .kv(tier.key(), &format!("{} ({})", rate, format_rate(*rate)));
    }

    let order = &ctx.config.order;
    ctx.output.info("");
    ctx.output.info("[order]");
    ctx.output.kv("quantity", &order.quantity.unwrap_or(1).to_string());
    ctx.output.kv(
        "shipping_charge",
        &order.shipping_charge.unwrap_or(0).to_string(),
    );
    ctx.output.kv(
        "delivery_method",
        order.delivery_method.unwrap_or_default().key(),
    );
    ctx.output
        .kv("payment_tier", order.payment_tier.unwrap_or_default().key());

    Ok(())
}

/// The loaded config with every rate spelled out, defaults included.
fn effective_config(ctx: &Context) -> CliConfig {
    CliConfig {
        rates: RatesConfig::from_rate_config(&ctx.rates),
        order: ctx.config.order.clone(),
    }
}

fn get_config(key: &str, ctx: &Context) -> Result<()> {
    let value = get_config_value(&ctx.config, key)?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "key": key, "value": value }));
    } else {
        println!("{}", value);
    }

    Ok(())
}

fn set_config(key: &str, value: &str, ctx: &Context) -> Result<()> {
    let path = ctx.writable_config_path();

    let mut config = if path.exists() {
        CliConfig::load(&path)?
    } else {
        CliConfig::default()
    };

    set_config_value(&mut config, key, value)?;

    // Never write a file that would fail to load.
    config.rate_config()?;
    config.save(&path)?;

    ctx.output.success(&format!("Set {} = {}", key, value));
    ctx.output.debug(&format!("wrote {}", path.display()));

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let path = ctx.writable_config_path();

    if path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            path.display()
        );
    }

    std::fs::write(&path, generate_default_config())
        .with_context(|| format!("Failed to write config file: {}", path.display()))?;

    ctx.output.success(&format!("Created: {}", path.display()));

    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    // Rates were already validated when the context loaded.
    let mut warnings: Vec<String> = Vec::new();
    let rates = &ctx.rates;

    if rates.item_fee_rate() >= 1.0 {
        warnings.push(format!(
            "rates.item_fee_rate is {}; rates are fractions (0.0249 = 2.49%)",
            rates.item_fee_rate()
        ));
    }
    if rates.shipping_fee_rate() >= 1.0 {
        warnings.push(format!(
            "rates.shipping_fee_rate is {}; rates are fractions",
            rates.shipping_fee_rate()
        ));
    }
    for (tier, rate) in rates.payment_tier_rates() {
        if *rate >= 1.0 {
            warnings.push(format!(
                "rates.payment_tiers.{} is {}; rates are fractions",
                tier, rate
            ));
        }
    }
    if let Some(quantity) = ctx.config.order.quantity {
        if quantity < 1 {
            bail!("order.quantity must be at least 1, got {}", quantity);
        }
    }
    if let Some(shipping) = ctx.config.order.shipping_charge {
        if shipping < 0 {
            bail!("order.shipping_charge must not be negative, got {}", shipping);
        }
    }

    for warning in &warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }

    match ctx.config_path {
        Some(ref path) if warnings.is_empty() => ctx
            .output
            .success(&format!("Configuration is valid: {}", path.display())),
        Some(ref path) => ctx.output.success(&format!(
            "Configuration is valid (with warnings): {}",
            path.display()
        )),
        None => ctx
            .output
            .success("No config file found; using the default fee schedule"),
    }

    Ok(())
}

fn show_path(ctx: &Context) -> Result<()> {
    match ctx.config_path {
        Some(ref path) => println!("{}", path.display()),
        None => ctx
            .output
            .info("No config file found. Run `feecalc config init` to create one."),
    }
    Ok(())
}

fn get_config_value(config: &CliConfig, key: &str) -> Result<String> {
    let rates = config.rate_config()?;
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["rates", "item_fee_rate"] => Ok(rates.item_fee_rate().to_string()),
        ["rates", "item_fee_cap"] => Ok(rates.item_fee_cap().amount().to_string()),
        ["rates", "shipping_fee_rate"] => Ok(rates.shipping_fee_rate().to_string()),
        ["rates", "shipping_free_threshold"] => {
            Ok(rates.shipping_free_threshold().amount().to_string())
        }
        ["rates", "payment_fee_minimum"] => Ok(rates.payment_fee_minimum().amount().to_string()),
        ["rates", "payment_tiers", tier] => {
            let tier: PaymentTier = tier.parse()?;
            Ok(rates.payment_rate(tier).to_string())
        }
        ["order", "quantity"] => Ok(config.order.quantity.unwrap_or(1).to_string()),
        ["order", "shipping_charge"] => Ok(config.order.shipping_charge.unwrap_or(0).to_string()),
        ["order", "delivery_method"] => Ok(config
            .order
            .delivery_method
            .unwrap_or_default()
            .key()
            .to_string()),
        ["order", "payment_tier"] => Ok(config
            .order
            .payment_tier
            .unwrap_or_default()
            .key()
            .to_string()),
        _ => bail!("Unknown config key: {}", key),
    }
}

fn set_config_value(config: &mut CliConfig, key: &str, value: &str) -> Result<()> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["rates", "item_fee_rate"] => config.rates.item_fee_rate = Some(value.parse()?),
        ["rates", "item_fee_cap"] => config.rates.item_fee_cap = Some(value.parse()?),
        ["rates", "shipping_fee_rate"] => config.rates.shipping_fee_rate = Some(value.parse()?),
        ["rates", "shipping_free_threshold"] => {
            config.rates.shipping_free_threshold = Some(value.parse()?)
        }
        ["rates", "payment_fee_minimum"] => {
            config.rates.payment_fee_minimum = Some(value.parse()?)
        }
        ["rates", "payment_tiers", tier] => {
            let tier: PaymentTier = tier.parse()?;
            let rate: f64 = value.parse()?;
            // Editing one tier materializes the full table so no tier goes missing.
            // A file being repaired may not validate yet; seed from defaults then.
            let current = config.rate_config().unwrap_or_default();
            let tiers = config.rates.payment_tiers.get_or_insert_with(|| {
                current
                    .payment_tier_rates()
                    .iter()
                    .map(|(t, r)| (t.key().to_string(), *r))
                    .collect()
            });
            tiers.insert(tier.key().to_string(), rate);
        }
        ["order", "quantity"] => config.order.quantity = Some(value.parse()?),
        ["order", "shipping_charge"] => config.order.shipping_charge = Some(value.parse()?),
        ["order", "delivery_method"] => {
            config.order.delivery_method = Some(value.parse::<DeliveryMethod>()?)
        }
        ["order", "payment_tier"] => {
            config.order.payment_tier = Some(value.parse::<PaymentTier>()?)
        }
        _ => bail!("Unknown or read-only config key: {}", key),
    }

    Ok(())
}
