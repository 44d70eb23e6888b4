//! Order Totals
//!
//! This example demonstrates folding a sequence of order lines through a
//! machine whose states carry actions.
//!
//! Key concepts:
//! - Rules written as expressions over object fields
//! - Actions registered with the `actions!` macro
//! - Seeded folds and per-item mapping
//! - Validation that rejects bad input loudly
//!
//! Run with: cargo run --example order_totals

use serde_json::{json, Value};
use statewright::{actions, Machine, Schema};

const ORDER: &str = r#"
machine:
  initial_state: open
states:
  open:
    transitions:
      line:
        destination: line
        rule: 'kind == "item"'
        validation:
          rule: "qty > 0"
          message: Quantity must be positive
      discount:
        destination: discount
        rule: 'kind == "discount"'
  line:
    name: Line item
    action: add_line
    transitions:
      line:
        destination: line
        rule: 'kind == "item"'
        validation:
          rule: "qty > 0"
          message: Quantity must be positive
      discount:
        destination: discount
        rule: 'kind == "discount"'
  discount:
    name: Discount
    action: apply_discount
    transitions:
      line:
        destination: line
        rule: 'kind == "item"'
        validation:
          rule: "qty > 0"
          message: Quantity must be positive
      discount:
        destination: discount
        rule: 'kind == "discount"'
"#;

fn number(value: &Value, field: &str) -> f64 {
    value.get(field).and_then(Value::as_f64).unwrap_or(0.0)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "statewright=info".to_string()))
        .init();

    println!("=== Order Totals ===\n");

    let schema = Schema::from_yaml_str(ORDER)?;
    let registry = actions! {
        "add_line" => |args| {
            let total = args[0].as_f64().unwrap_or(0.0);
            Ok(json!(total + number(&args[1], "price") * number(&args[1], "qty")))
        },
        "apply_discount" => |args| {
            let total = args[0].as_f64().unwrap_or(0.0);
            Ok(json!(total * (100.0 - number(&args[1], "percent")) / 100.0))
        },
    };
    let machine = Machine::new(&schema, &registry)?;

    let order = vec![
        json!({"kind": "item", "price": 12.5, "qty": 2}),
        json!({"kind": "item", "price": 4.0, "qty": 5}),
        json!({"kind": "discount", "percent": 10}),
    ];

    let kinds: Vec<String> = order
        .iter()
        .map(|line| machine.progress(machine.initial(), line).map(|s| s.name().to_string()))
        .collect::<Result<_, _>>()?;
    println!("Line kinds: {}", kinds.join(", "));

    let total = machine.fold_action(machine.initial(), order, json!(0.0))?;
    println!("Total: {total}");

    let bad = vec![json!({"kind": "item", "price": 3.0, "qty": 0})];
    match machine.fold_action(machine.initial(), bad, json!(0.0)) {
        Ok(total) => println!("Unexpected total: {total}"),
        Err(err) => println!("Rejected: {err}"),
    }

    println!("\n=== Example Complete ===");
    Ok(())
}
