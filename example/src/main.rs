mod logging;

use std::cell::RefCell;

use serde_json::json;
use silent::*;

#[derive(Debug)]
struct Order {
    id: u32,
    amount_cents: i64,
    items: u32,
}

fn charge(order: &Order) -> Result<String, Fault> {
    if order.amount_cents <= 0 {
        bail!("amount must be positive, got {}", order.amount_cents);
    }
    Ok(format!("ch_{}", order.id))
}

#[silent(fallback = 0, message = "unit price", level = "warning")]
fn unit_price(order: &Order) -> Result<i64, Fault> {
    let items = i64::from(order.items);
    order
        .amount_cents
        .checked_div(items)
        .ok_or_else(|| fault!("order {} has no items", order.id))
}

fn main() {
    logging::init_logging();

    let defaults: SilentConfig = serde_json::from_value(json!({
        "log_level": "error",
        "message": "checkout",
        "context": { "service": "example" }
    }))
    .unwrap_or_default();

    let refunds = RefCell::new(Vec::new());
    let orders = [
        Order { id: 1, amount_cents: 1299, items: 3 },
        Order { id: 2, amount_cents: -5, items: 1 },
        Order { id: 3, amount_cents: 400, items: 0 },
    ];

    for order in &orders {
        println!("order {}:", order.id);

        let receipt = attempt()
            .with_config(&defaults)
            .with_data_entry("orderId", order.id)
            .on_exception(|executor, fault| {
                if let Some(step) = executor.get("step").and_then(|v| v.as_str()) {
                    refunds
                        .borrow_mut()
                        .push(format!("order {} failed at {step}: {fault}", order.id));
                }
                Ok::<_, Fault>(())
            })
            .on_finally(|| {
                println!("  released lock for order {}", order.id);
                Ok::<_, Fault>(())
            })
            .exec(
                |executor| {
                    executor.insert("step", "charge");
                    charge(order)
                },
                String::from("declined"),
            );

        println!("  receipt: {receipt}");
        println!("  unit price: {}", unit_price(order));
    }

    println!("\nfollow-ups:");
    for refund in refunds.borrow().iter() {
        println!("  {refund}");
    }

    let quiet = attempt().simple_exec(|_| -> Result<u8, Fault> { Ok("256".parse()?) }, u8::MAX);
    println!("\nquiet parse: {quiet}");
}
