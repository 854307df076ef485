//! Show the effective rate table.

use anyhow::Result;
use fee_engine::{PaymentTier, RateConfig};

use super::RatesArgs;
use crate::context::Context;
use crate::output::format_rate;
use crate::render::tier_label;

/// Run the rates command.
pub fn run(args: RatesArgs, ctx: &Context) -> Result<()> {
    let legacy;
    let rates = if args.legacy {
        legacy = RateConfig::legacy();
        &legacy
    } else {
        &ctx.rates
    };

    if ctx.output.is_json() {
        ctx.output.json(rates);
        return Ok(());
    }

    ctx.output.header(if args.legacy {
        "Fee Schedule (legacy)"
    } else {
        "Fee Schedule"
    });

    ctx.output.info("");
    ctx.output.info("Item fee");
    ctx.output.kv("rate", &format_rate(rates.item_fee_rate()));
    ctx.output.kv("cap per unit", &rates.item_fee_cap().display());

    ctx.output.info("");
    ctx.output.info("Shipping fee");
    ctx.output.kv("rate", &format_rate(rates.shipping_fee_rate()));
    ctx.output.kv(
        "general shipping exempt at or below",
        &rates.shipping_free_threshold().display(),
    );
    ctx.output.kv("in-person handover", "always charged");

    ctx.output.info("");
    ctx.output.info("Payment fee");
    ctx.output.kv("minimum", &rates.payment_fee_minimum().display());
    ctx.output.table_row(&["TIER", "KEY", "RATE"], &[32, 16, 6]);
    for tier in PaymentTier::ALL {
        ctx.output.table_row(
            &[
                &tier_label(tier),
                tier.key(),
                &format_rate(rates.payment_rate(tier)),
            ],
            &[32, 16, 6],
        );
    }

    if let Some(ref path) = ctx.config_path {
        ctx.output.debug(&format!("rates loaded from {}", path.display()));
    }

    Ok(())
}
