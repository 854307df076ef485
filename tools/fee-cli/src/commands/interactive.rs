//! Interactive order editor.
//!
//! Every edit re-runs the whole calculation from the current field values,
//! so the screen always reflects one consistent breakdown.

use anyhow::{bail, Result};
use dialoguer::{Input, Select};
use fee_engine::{calculate, DeliveryMethod, FeeError, Money, OrderInput, PaymentTier};

use super::{InteractiveArgs, QuoteArgs};
use crate::context::Context;
use crate::render::{self, delivery_label, tier_label_with_rate};

const MENU: [&str; 7] = [
    "Unit price",
    "Unit cost",
    "Quantity",
    "Shipping charge",
    "Delivery method",
    "Payment method",
    "Quit",
];

/// Run the interactive command.
pub fn run(args: InteractiveArgs, ctx: &Context) -> Result<()> {
    let mut input = super::quote::build_order(&QuoteArgs::default(), &ctx.config.order);

    ctx.output.header("Marketplace fee calculator");
    refresh(&input, args.detail, ctx)?;

    loop {
        let choice = Select::new()
            .with_prompt("Edit")
            .items(&MENU[..])
            .default(0)
            .interact()?;

        match choice {
            0 => input.unit_price = prompt_amount("Unit price", input.unit_price)?,
            1 => input.unit_cost = prompt_amount("Unit cost", input.unit_cost)?,
            2 => input.quantity = prompt_quantity(input.quantity)?,
            3 => {
                input.shipping_charge =
                    prompt_amount("Shipping charge", Some(input.shipping_charge))?
                        .unwrap_or_default()
            }
            4 => input.delivery_method = prompt_delivery(input.delivery_method)?,
            5 => input.payment_tier = prompt_payment(input.payment_tier, ctx)?,
            _ => return Ok(()),
        }

        ctx.output.divider();
        refresh(&input, args.detail, ctx)?;
    }
}

/// Recompute and print the breakdown for the current inputs.
fn refresh(input: &OrderInput, detail: bool, ctx: &Context) -> Result<()> {
    match calculate(input, &ctx.rates) {
        Ok(breakdown) => {
            render::print_breakdown(&ctx.output, input, &breakdown, &ctx.rates, detail);
        }
        Err(e) if e.is_awaiting_input() => render::print_awaiting_input(&ctx.output),
        Err(FeeError::InvalidInput(msg)) => ctx.output.warn(&msg),
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

fn prompt_amount(prompt: &str, current: Option<Money>) -> Result<Option<Money>> {
    let raw: String = Input::new()
        .with_prompt(format!("{} (blank to clear)", prompt))
        .with_initial_text(current.map(|m| m.amount().to_string()).unwrap_or_default())
        .allow_empty(true)
        .validate_with(|text: &String| parse_amount(text).map(|_| ()).map_err(|e| e.to_string()))
        .interact_text()?;

    parse_amount(&raw)
}

fn prompt_quantity(current: i64) -> Result<i64> {
    let quantity: i64 = Input::new()
        .with_prompt("Quantity")
        .default(current)
        .validate_with(|q: &i64| {
            if *q >= 1 {
                Ok(())
            } else {
                Err("quantity must be at least 1")
            }
        })
        .interact_text()?;
    Ok(quantity)
}

fn prompt_delivery(current: DeliveryMethod) -> Result<DeliveryMethod> {
    let methods = [DeliveryMethod::GeneralShipping, DeliveryMethod::InPersonHandover];
    let items: Vec<&str> = methods.iter().map(|m| delivery_label(*m)).collect();
    let default = methods.iter().position(|m| *m == current).unwrap_or(0);

    let selection = Select::new()
        .with_prompt("Delivery method")
        .items(&items)
        .default(default)
        .interact()?;

    Ok(methods[selection])
}

fn prompt_payment(current: PaymentTier, ctx: &Context) -> Result<PaymentTier> {
    let items: Vec<String> = PaymentTier::ALL
        .iter()
        .map(|tier| tier_label_with_rate(*tier, &ctx.rates))
        .collect();
    let default = PaymentTier::ALL
        .iter()
        .position(|tier| *tier == current)
        .unwrap_or(0);

    let selection = Select::new()
        .with_prompt("Payment method")
        .items(&items)
        .default(default)
        .interact()?;

    Ok(PaymentTier::ALL[selection])
}

/// Parse a whole-unit amount; blank means "not entered".
///
/// Thousands separators and a leading currency symbol are accepted.
pub fn parse_amount(text: &str) -> Result<Option<Money>> {
    let cleaned: String = text
        .trim()
        .trim_start_matches(fee_engine::money::CURRENCY_SYMBOL)
        .chars()
        .filter(|c| *c != ',')
        .collect();

    if cleaned.is_empty() {
        return Ok(None);
    }

    let amount: i64 = match cleaned.parse() {
        Ok(amount) => amount,
        Err(_) => bail!("not a whole amount: {}", text.trim()),
    };
    if amount < 0 {
        bail!("amount must not be negative");
    }
    Ok(Some(Money::new(amount)))
}
