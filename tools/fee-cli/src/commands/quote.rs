//! Quote a single order.

use anyhow::Result;
use fee_engine::{calculate, FeeError, Money, OrderInput};

use super::QuoteArgs;
use crate::config::OrderDefaults;
use crate::context::Context;
use crate::render;

/// Run the quote command.
pub fn run(args: QuoteArgs, ctx: &Context) -> Result<()> {
    let input = build_order(&args, &ctx.config.order);
    ctx.output.debug(&format!("order input: {:?}", input));

    if !input.has_price() {
        render::print_awaiting_input(&ctx.output);
        return Ok(());
    }

    match calculate(&input, &ctx.rates) {
        Ok(breakdown) => {
            render::print_breakdown(&ctx.output, &input, &breakdown, &ctx.rates, args.detail);
            Ok(())
        }
        Err(FeeError::MissingPrice) => {
            render::print_awaiting_input(&ctx.output);
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

/// Merge command-line values over the config's order defaults.
pub fn build_order(args: &QuoteArgs, defaults: &OrderDefaults) -> OrderInput {
    let mut input = OrderInput::awaiting_price()
        .with_quantity(args.qty.or(defaults.quantity).unwrap_or(1))
        .with_shipping(Money::new(
            args.shipping.or(defaults.shipping_charge).unwrap_or(0),
        ))
        .with_delivery(args.delivery.or(defaults.delivery_method).unwrap_or_default())
        .with_payment_tier(args.payment.or(defaults.payment_tier).unwrap_or_default());

    input.unit_price = args.price.map(Money::new);
    input.unit_cost = args.cost.map(Money::new);
    input
}
