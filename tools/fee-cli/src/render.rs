//! Rendering of fee breakdowns.
//!
//! Display labels for tiers and delivery methods live here; the engine only
//! knows the enum tags.

use console::style;
use fee_engine::fees::ShippingRule;
use fee_engine::{DeliveryMethod, FeeBreakdown, Money, OrderInput, PaymentTier, RateConfig};

use crate::output::{format_pct, format_rate, Output};

/// Human-readable payment tier name.
pub fn tier_label(tier: PaymentTier) -> String {
    match tier {
        PaymentTier::NonCredit => "Non-credit / ATM / balance".to_string(),
        PaymentTier::CreditLumpSum => "Credit card (lump sum)".to_string(),
        other => match other.installments() {
            Some(n) => format!("Credit card ({} installments)", n),
            None => other.key().to_string(),
        },
    }
}

/// Payment tier name with its configured rate, e.g. "Credit card (lump sum) 2%".
pub fn tier_label_with_rate(tier: PaymentTier, rates: &RateConfig) -> String {
    format!("{} {}", tier_label(tier), format_rate(rates.payment_rate(tier)))
}

/// Human-readable delivery method name.
pub fn delivery_label(method: DeliveryMethod) -> &'static str {
    match method {
        DeliveryMethod::GeneralShipping => "General shipping (store / home / post)",
        DeliveryMethod::InPersonHandover => "In-person handover / pickup",
    }
}

/// `(price × qty) + shipping = $total`
pub fn order_total_formula(price: Money, quantity: i64, shipping: Money) -> String {
    format!(
        "({} × {}) + {} =",
        price.amount(),
        quantity,
        shipping.amount()
    )
}

/// `item (item) + shipping (shipping) + payment (payment) =`
pub fn fees_formula(b: &FeeBreakdown) -> String {
    format!(
        "{} (item) + {} (shipping) + {} (payment) =",
        b.item_fee.amount(),
        b.shipping_fee.amount(),
        b.payment_fee.amount()
    )
}

/// `total - fees =`
pub fn net_formula(b: &FeeBreakdown) -> String {
    format!("{} - {} =", b.order_total.amount(), b.total_fees.amount())
}

/// `net - (cost × qty) =`
pub fn profit_formula(b: &FeeBreakdown, unit_cost: Money) -> String {
    format!(
        "{} - ({} × {}) =",
        b.net_proceeds.amount(),
        unit_cost.amount(),
        b.quantity
    )
}

/// Per-unit item fee line, annotated when the cap applied.
pub fn item_fee_detail(b: &FeeBreakdown, rates: &RateConfig) -> String {
    let mut line = format!("per unit {}", b.item_fee_per_unit);
    if b.item_fee_capped {
        line.push_str(&format!(" (capped at {})", rates.item_fee_cap()));
    }
    line.push_str(&format!(" × {}", b.quantity));
    line
}

/// Why the shipping fee is what it is.
pub fn shipping_rule_text(rule: ShippingRule, rates: &RateConfig) -> String {
    let threshold = rates.shipping_free_threshold();
    match rule {
        ShippingRule::HandoverCharged => "handover: charged in full".to_string(),
        ShippingRule::AboveThreshold => format!("shipping > {}: charged in full", threshold),
        ShippingRule::WithinThreshold => format!("shipping ≤ {}: exempt", threshold),
    }
}

/// Payment rate line, annotated when the minimum applied.
pub fn payment_detail(b: &FeeBreakdown, rates: &RateConfig) -> String {
    let mut line = format!(
        "{} rate {} (minimum {})",
        tier_label(b.payment_tier),
        format_rate(b.payment_rate),
        rates.payment_fee_minimum()
    );
    if b.payment_fee_floored {
        line.push_str(", minimum applied");
    }
    line
}

/// How the profit step of a breakdown is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfitOutcome {
    /// No unit cost was entered.
    Unavailable,
    Gain,
    BreakEven,
    Loss,
}

impl ProfitOutcome {
    /// Caption shown next to the profit figure.
    pub fn caption(&self) -> &'static str {
        match self {
            ProfitOutcome::Unavailable => "Profit unavailable",
            ProfitOutcome::Gain => "Gross profit",
            ProfitOutcome::BreakEven => "Gross profit (break-even)",
            ProfitOutcome::Loss => "Gross loss",
        }
    }
}

/// Classify the profit of a breakdown. A zero profit is a result, not a
/// missing one.
pub fn profit_outcome(b: &FeeBreakdown) -> ProfitOutcome {
    match b.profit {
        None => ProfitOutcome::Unavailable,
        Some(profit) if profit.is_gain() => ProfitOutcome::Gain,
        Some(profit) if profit.gross_profit.is_zero() => ProfitOutcome::BreakEven,
        Some(_) => ProfitOutcome::Loss,
    }
}

/// Render the "waiting for a price" state.
pub fn print_awaiting_input(output: &Output) {
    if output.is_json() {
        output.json(&serde_json::json!({ "status": "awaiting_input" }));
        return;
    }
    output.info("Enter a unit price (and a unit cost for profit) to start the calculation");
}

/// Render a computed breakdown.
pub fn print_breakdown(
    output: &Output,
    input: &OrderInput,
    b: &FeeBreakdown,
    rates: &RateConfig,
    detail: bool,
) {
    if output.is_json() {
        output.json(b);
        return;
    }

    let price = input.unit_price.unwrap_or_default();

    output.label("1. Order total");
    output.formula(
        &order_total_formula(price, b.quantity, input.shipping_charge),
        &b.order_total.display(),
    );

    output.label("2. Platform fees (marketplace + payment)");
    output.formula(&fees_formula(b), &b.total_fees.display());
    if b.item_fee_capped {
        output.list_item(&format!("item fee capped at {} per unit", rates.item_fee_cap()));
    }
    if b.payment_fee_floored {
        output.list_item(&format!(
            "payment fee raised to the {} minimum",
            rates.payment_fee_minimum()
        ));
    }

    output.divider();

    output.label("3. Net proceeds (total - fees)");
    output.formula(&net_formula(b), &b.net_proceeds.display());
    output.figure("Net proceeds", style(b.net_proceeds.display()).cyan());

    output.label("4. Gross profit (net - cost)");
    match (profit_outcome(b), input.unit_cost) {
        (ProfitOutcome::Unavailable, _) | (_, None) => {
            output.warn("Profit unavailable: enter a unit cost to calculate gross profit")
        }
        (outcome, Some(cost)) => {
            let profit = b.gross_profit().unwrap_or_default();
            output.formula(&profit_formula(b, cost), &profit.display());
            let figure = match outcome {
                ProfitOutcome::Gain => style(profit.display()).green(),
                _ => style(profit.display()).red(),
            };
            output.figure(outcome.caption(), figure);
            let margin = b
                .profit_margin_pct()
                .map(format_pct)
                .unwrap_or_else(|| "n/a".to_string());
            output.kv("margin", &margin);
        }
    }

    if detail {
        output.divider();
        output.label("Fee details");
        output.kv("item fee", &b.item_fee.display());
        output.list_item(&item_fee_detail(b, rates));
        output.kv("shipping fee", &b.shipping_fee.display());
        output.list_item(&shipping_rule_text(b.shipping_rule, rates));
        output.kv("payment fee", &b.payment_fee.display());
        output.list_item(&payment_detail(b, rates));
    }
}
