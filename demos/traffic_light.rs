//! Traffic Light
//!
//! This example demonstrates a cyclic machine driven by a walker.
//!
//! Key concepts:
//! - States and transitions declared in YAML
//! - Transitions without a rule always match
//! - Walking a machine and reading back the trail
//! - Graphviz export
//!
//! Run with: cargo run --example traffic_light

use serde_json::json;
use statewright::{ActionRegistry, Machine, Schema};

const TRAFFIC_LIGHT: &str = r#"
machine:
  initial_state: red
states:
  red:
    name: Stop
    transitions:
      go: { destination: green }
  green:
    name: Go
    transitions:
      slow: { destination: yellow }
  yellow:
    name: Caution
    transitions:
      stop: { destination: red }
"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "statewright=debug".to_string()))
        .init();

    println!("=== Traffic Light State Machine ===\n");

    let schema = Schema::from_yaml_str(TRAFFIC_LIGHT)?;
    let machine = Machine::new(&schema, &ActionRegistry::new())?;

    println!("Initial state: {}", machine.initial().name());

    let mut walker = machine.walker();
    for _ in 0..6 {
        let next = walker.step(&json!({}))?;
        println!("  -> {} ({})", next.key(), next.name());
    }

    println!("\nPath: {}", walker.trail().path().join(" -> "));
    println!("No terminal state: {}", !walker.is_terminal());

    println!("\nGraphviz:\n{}", machine.graph());

    println!("\n=== Example Complete ===");
    Ok(())
}
