//! Debug Trace - step scripted input through the debug action manager
//!
//! # Commands
//!
//! - `debug-trace run <script>` - Run a trace script and check its expectations
//! - `debug-trace validate <script>` - Parse and validate a script without running it
//! - `debug-trace table` - Print (or write) the default action table as TOML
//!
//! # Usage
//!
//! ```bash
//! # Run a script against the built-in table
//! debug-trace run menu_navigation.toml
//!
//! # Run against a custom table, stopping at the first failed expectation
//! debug-trace run menu_navigation.toml --actions debug_actions.toml --fail-fast
//!
//! # Start a custom table from the defaults
//! debug-trace table --output debug_actions.toml
//! ```

mod run;
mod script;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use nethercore_debug_actions::{ActionTable, config};
use std::path::PathBuf;

use script::TraceScript;

/// Debug Trace - step scripted input through the debug action manager
#[derive(Parser)]
#[command(name = "debug-trace")]
#[command(about = "Step scripted input through the debug action manager")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a trace script and check its expectations
    Run {
        /// Script file (.toml)
        script: PathBuf,

        /// Action table file (defaults to the built-in table)
        #[arg(short, long)]
        actions: Option<PathBuf>,

        /// Stop on the first failed expectation
        #[arg(long)]
        fail_fast: bool,
    },

    /// Validate a script without running it
    Validate {
        /// Script file (.toml)
        script: PathBuf,
    },

    /// Print the default action table
    Table {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            script,
            actions,
            fail_fast,
        } => run::execute(&script, actions.as_deref(), fail_fast),
        Commands::Validate { script } => {
            let parsed = TraceScript::from_file(&script)
                .with_context(|| format!("Failed to parse script: {}", script.display()))?;
            parsed
                .validate()
                .with_context(|| format!("Invalid script: {}", script.display()))?;
            println!(
                "{}: {} entries, {} frames",
                script.display(),
                parsed.frames.len(),
                parsed.last_frame() + 1
            );
            Ok(())
        }
        Commands::Table { output } => {
            let table = ActionTable::default();
            match output {
                Some(path) => {
                    config::save_to(&table, &path)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    println!("Wrote {}", path.display());
                }
                None => print!("{}", table.to_toml()?),
            }
            Ok(())
        }
    }
}
