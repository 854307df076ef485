//! End-to-end fee scenarios and invariants for the fee engine.

use fee_engine::prelude::*;
use proptest::prelude::*;

fn defaults() -> RateConfig {
    RateConfig::default()
}

#[test]
fn scenario_typical_order_with_cost() {
    let order = OrderInput::new(Money::new(1000))
        .with_quantity(1)
        .with_shipping(Money::new(60))
        .with_delivery(DeliveryMethod::GeneralShipping)
        .with_payment_tier(PaymentTier::NonCredit)
        .with_unit_cost(Money::new(500));

    let b = calculate(&order, &defaults()).unwrap();

    assert_eq!(b.item_fee, Money::new(25));
    assert!(!b.item_fee_capped);
    assert_eq!(b.shipping_fee, Money::zero());
    assert_eq!(b.shipping_rule, ShippingRule::WithinThreshold);
    assert_eq!(b.order_total, Money::new(1060));
    assert_eq!(b.payment_fee, Money::new(11));
    assert!(!b.payment_fee_floored);
    assert_eq!(b.total_fees, Money::new(36));
    assert_eq!(b.net_proceeds, Money::new(1024));
    assert_eq!(b.gross_profit(), Some(Money::new(524)));
}

#[test]
fn scenario_expensive_item_hits_cap() {
    let order = OrderInput::new(Money::new(30000)).with_payment_tier(PaymentTier::CreditLumpSum);

    let b = calculate(&order, &defaults()).unwrap();

    assert_eq!(b.item_fee, Money::new(498));
    assert!(b.item_fee_capped);
    assert_eq!(b.order_total, Money::new(30000));
    assert_eq!(b.payment_fee, Money::new(600));
    assert_eq!(b.total_fees, Money::new(1098));
    assert_eq!(b.net_proceeds, Money::new(28902));
    assert!(!b.has_profit());
}

#[test]
fn scenario_small_order_floors_payment_fee() {
    let order = OrderInput::new(Money::new(10));

    let b = calculate(&order, &defaults()).unwrap();

    assert_eq!(b.order_total, Money::new(10));
    assert_eq!(b.payment_fee, Money::new(1));
    assert!(b.payment_fee_floored);
    // 10 * 0.0249 = 0.249
    assert_eq!(b.item_fee, Money::zero());
    assert_eq!(b.net_proceeds, Money::new(9));
}

#[test]
fn shipping_threshold_boundary() {
    let at = OrderInput::new(Money::new(1000)).with_shipping(Money::new(300));
    let above = OrderInput::new(Money::new(1000)).with_shipping(Money::new(301));

    assert_eq!(calculate(&at, &defaults()).unwrap().shipping_fee, Money::zero());
    assert_eq!(
        calculate(&above, &defaults()).unwrap().shipping_fee,
        Money::new(301).apply_rate(0.0249).unwrap()
    );
}

#[test]
fn handover_charged_below_threshold() {
    let order = OrderInput::new(Money::new(1000))
        .with_shipping(Money::new(200))
        .with_delivery(DeliveryMethod::InPersonHandover);

    let b = calculate(&order, &defaults()).unwrap();

    // 200 * 0.0249 = 4.98
    assert_eq!(b.shipping_fee, Money::new(5));
    assert_eq!(b.shipping_rule, ShippingRule::HandoverCharged);
}

#[test]
fn zero_priced_order_pays_nothing() {
    let order = OrderInput::new(Money::zero()).with_unit_cost(Money::new(100));

    let b = calculate(&order, &defaults()).unwrap();

    assert_eq!(b.order_total, Money::zero());
    assert_eq!(b.total_fees, Money::zero());
    assert!(!b.payment_fee_floored);
    assert_eq!(b.gross_profit(), Some(Money::new(-100)));
    assert_eq!(b.profit_margin_pct(), None);
}

#[test]
fn zero_cost_is_distinct_from_no_cost() {
    let without = calculate(&OrderInput::new(Money::new(1000)), &defaults()).unwrap();
    let with_zero = calculate(
        &OrderInput::new(Money::new(1000)).with_unit_cost(Money::zero()),
        &defaults(),
    )
    .unwrap();

    assert_eq!(without.gross_profit(), None);
    assert_eq!(with_zero.gross_profit(), Some(with_zero.net_proceeds));
}

#[test]
fn custom_rates_flow_through() {
    let config = RateConfig::builder()
        .item_fee_rate(0.05)
        .item_fee_cap(Money::new(100))
        .shipping_free_threshold(Money::zero())
        .payment_rate(PaymentTier::Credit12, 0.1)
        .payment_fee_minimum(Money::new(5))
        .build()
        .unwrap();
    let order = OrderInput::new(Money::new(1000))
        .with_quantity(2)
        .with_shipping(Money::new(100))
        .with_payment_tier(PaymentTier::Credit12);

    let b = calculate(&order, &config).unwrap();

    assert_eq!(b.item_fee_per_unit, Money::new(50));
    assert_eq!(b.item_fee, Money::new(100));
    // 100 * 0.0249 = 2.49, threshold 0 so charged
    assert_eq!(b.shipping_fee, Money::new(2));
    assert_eq!(b.order_total, Money::new(2100));
    assert_eq!(b.payment_fee, Money::new(210));
    assert_eq!(b.net_proceeds, Money::new(1788));
}

#[test]
fn legacy_schedule_prices_installments_as_card() {
    let order = OrderInput::new(Money::new(5000)).with_payment_tier(PaymentTier::Credit24);

    let b = calculate(&order, &RateConfig::legacy()).unwrap();

    assert_eq!(b.payment_rate, 0.02);
    assert_eq!(b.payment_fee, Money::new(100));
}

fn any_tier() -> impl Strategy<Value = PaymentTier> {
    prop::sample::select(PaymentTier::ALL.to_vec())
}

fn any_delivery() -> impl Strategy<Value = DeliveryMethod> {
    prop_oneof![
        Just(DeliveryMethod::GeneralShipping),
        Just(DeliveryMethod::InPersonHandover),
    ]
}

fn any_order() -> impl Strategy<Value = OrderInput> {
    (
        0i64..1_000_000,
        1i64..100,
        0i64..5_000,
        any_delivery(),
        any_tier(),
        prop::option::of(0i64..1_000_000),
    )
        .prop_map(|(price, qty, shipping, delivery, tier, cost)| {
            let order = OrderInput::new(Money::new(price))
                .with_quantity(qty)
                .with_shipping(Money::new(shipping))
                .with_delivery(delivery)
                .with_payment_tier(tier);
            match cost {
                Some(cost) => order.with_unit_cost(Money::new(cost)),
                None => order,
            }
        })
}

proptest! {
    #[test]
    fn item_fee_is_capped_rounded_rate_times_quantity(order in any_order()) {
        let config = defaults();
        let b = calculate(&order, &config).unwrap();
        let price = order.unit_price.unwrap().amount();
        let raw = (price as f64 * config.item_fee_rate()).round_ties_even() as i64;
        let cap = config.item_fee_cap().amount();

        prop_assert_eq!(b.item_fee.amount(), raw.min(cap) * order.quantity);
        prop_assert_eq!(b.item_fee_capped, raw > cap);
    }

    #[test]
    fn net_proceeds_is_exact_difference(order in any_order()) {
        let b = calculate(&order, &defaults()).unwrap();
        prop_assert_eq!(b.total_fees, b.item_fee + b.shipping_fee + b.payment_fee);
        prop_assert_eq!(b.net_proceeds, b.order_total - b.total_fees);
    }

    #[test]
    fn payment_fee_respects_minimum(order in any_order()) {
        let config = defaults();
        let b = calculate(&order, &config).unwrap();
        if b.order_total.is_positive() {
            prop_assert!(b.payment_fee >= config.payment_fee_minimum());
        } else {
            prop_assert_eq!(b.payment_fee, Money::zero());
        }
    }

    #[test]
    fn general_shipping_within_threshold_is_free(
        charge in 0i64..=300,
        price in 0i64..100_000,
    ) {
        let order = OrderInput::new(Money::new(price)).with_shipping(Money::new(charge));
        let b = calculate(&order, &defaults()).unwrap();
        prop_assert_eq!(b.shipping_fee, Money::zero());
    }

    #[test]
    fn handover_always_charges_rate(charge in 0i64..5_000) {
        let order = OrderInput::new(Money::new(100))
            .with_shipping(Money::new(charge))
            .with_delivery(DeliveryMethod::InPersonHandover);
        let b = calculate(&order, &defaults()).unwrap();
        prop_assert_eq!(b.shipping_fee, Money::new(charge).apply_rate(0.0249).unwrap());
    }

    #[test]
    fn computation_is_idempotent(order in any_order()) {
        let config = defaults();
        let first = calculate(&order, &config).unwrap();
        let second = calculate(&order, &config).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn profit_present_iff_cost_supplied(order in any_order()) {
        let b = calculate(&order, &defaults()).unwrap();
        prop_assert_eq!(b.has_profit(), order.unit_cost.is_some());
        if let (Some(cost), Some(profit)) = (order.unit_cost, b.gross_profit()) {
            prop_assert_eq!(profit.amount(), b.net_proceeds.amount() - cost.amount() * order.quantity);
        }
    }
}
