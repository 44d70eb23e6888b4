//! Statewright CLI
//!
//! # Commands
//! - `statewright graph <schema>` - Print the machine as a Graphviz DOT digraph
//! - `statewright check <schema>` - Report every problem found in a schema
//!
//! Schemas ending in `.json` are read as JSON, anything else as YAML.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;
use statewright::builder::ActionRegistry;
use statewright::diagnostics::diagnose;
use statewright::expr::ExprCompiler;
use statewright::{Machine, Schema};
use std::path::{Path, PathBuf};
use stillwater::validation::Validation;
use tracing_subscriber::EnvFilter;

/// Statewright schema tools
#[derive(Parser)]
#[command(name = "statewright")]
#[command(author, version, about = "Inspect state machine schemas")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the machine as a Graphviz DOT digraph
    Graph {
        /// Schema file (YAML or JSON)
        schema: PathBuf,
    },

    /// Report every problem found in a schema
    Check {
        /// Schema file (YAML or JSON)
        schema: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Graph { schema } => {
            println!("{}", render_graph(&schema)?);
        }
        Commands::Check { schema } => {
            let problems = check(&schema)?;
            if problems.is_empty() {
                println!("{}: ok", schema.display());
            } else {
                for problem in &problems {
                    println!("  {problem}");
                }
                anyhow::bail!("{} problem(s) found in {}", problems.len(), schema.display());
            }
        }
    }

    Ok(())
}

fn load(path: &Path) -> Result<Schema> {
    Schema::from_path(path).with_context(|| format!("Failed to load schema {}", path.display()))
}

/// Actions cannot be loaded from the command line, so every action a schema
/// names is bound to a stand-in that refuses to run.
fn stand_in_actions(schema: &Schema) -> ActionRegistry {
    schema
        .states
        .values()
        .filter_map(|state| state.action.clone())
        .fold(ActionRegistry::new(), |registry, name| {
            let message = format!("action '{name}' is not available from the command line");
            registry.register(name, move |_: &[Value]| Err(message.clone().into()))
        })
}

fn render_graph(path: &Path) -> Result<String> {
    let schema = load(path)?;
    let machine = Machine::new(&schema, &stand_in_actions(&schema))
        .with_context(|| format!("Failed to build machine from {}", path.display()))?;
    Ok(machine.graph())
}

fn check(path: &Path) -> Result<Vec<String>> {
    let schema = load(path)?;
    let problems = match diagnose(&schema, &stand_in_actions(&schema), &ExprCompiler::default()) {
        Validation::Success(_) => Vec::new(),
        Validation::Failure(errors) => errors.iter().map(ToString::to_string).collect(),
    };
    Ok(problems)
}
