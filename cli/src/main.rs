//! Recyclafy - school recycling tracker.
//!
//! Command-line front end over `recyclafy_core`: submit deliveries, list
//! them, print the summary, and seed or clear the data directory.

use clap::{Parser, Subcommand};
use recyclafy_core::types::Material;
use std::path::PathBuf;

mod commands;

/// Recyclafy - school recycling tracker.
#[derive(Parser, Debug)]
#[command(name = "recyclafy", version, about, long_about = None)]
pub(crate) struct Cli {
    /// Directory holding the database and config.toml.
    #[arg(
        long,
        global = true,
        env = "RECYCLAFY_DATA_DIR",
        default_value = ".recyclafy"
    )]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Record a delivery and print the stored record.
    Submit(SubmitArgs),
    /// Print every delivery in submission order.
    List,
    /// Print totals, material breakdown, top classes and weekly progress.
    Summary,
    /// Replace all deliveries with generated demo data.
    Demo {
        /// Number of deliveries to generate (defaults to demo.batch_size).
        #[arg(long)]
        count: Option<usize>,
    },
    /// Remove every delivery.
    Clear,
    /// Print the effective configuration.
    Config,
}

#[derive(clap::Args, Debug)]
pub(crate) struct SubmitArgs {
    /// Delivery date as YYYY-MM-DD (defaults to today).
    #[arg(long)]
    date: Option<String>,
    #[arg(long)]
    class_id: String,
    #[arg(long)]
    class_name: String,
    /// Facility the materials were handed in at.
    #[arg(long)]
    unit: String,
    /// Material as TYPE:QUANTITY:UNIT, e.g. PAPER:500:GRAM. Repeatable.
    #[arg(long = "material")]
    materials: Vec<Material>,
    #[arg(long)]
    notes: Option<String>,
}

/// Initializes the tracing subscriber; `RUST_LOG` overrides the default.
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    let mut stdout = std::io::stdout().lock();
    if let Err(e) = commands::run(cli, &mut stdout) {
        eprintln!("recyclafy: {e}");
        std::process::exit(1);
    }
}
