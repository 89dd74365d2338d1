//! Trolley CLI
//!
//! Fills a cart from a fixture set, then checks it out and prints the receipt.

use std::{io, path::PathBuf};

use anyhow::Result;
use clap::Parser;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use trolley::fixtures::Fixture;

#[derive(Debug, Parser)]
#[command(name = "trolley", about = "Fill a shopping cart and check it out", long_about = None)]
struct Cli {
    /// Fixture set to load groceries and cart settings from
    #[arg(short, long, default_value = "default")]
    fixture: String,

    /// Directory holding the fixture sets
    #[arg(long, default_value = "./fixtures")]
    fixtures_dir: PathBuf,

    /// Grocery to add, by fixture key (repeatable)
    #[arg(short, long)]
    add: Vec<String>,

    /// Grocery to remove after every add, by fixture key (repeatable)
    #[arg(short, long)]
    remove: Vec<String>,
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();

    let fixture = Fixture::from_set_in(&cli.fixtures_dir, &cli.fixture)?;
    let mut cart = fixture.cart()?;

    for key in &cli.add {
        if let Err(error) = cart.add(fixture.grocery(key)?) {
            warn!(grocery = %key, %error, "could not add grocery");
        }
    }

    for key in &cli.remove {
        if let Err(error) = cart.remove(&fixture.grocery(key)?) {
            warn!(grocery = %key, %error, "could not remove grocery");
        }
    }

    let receipt = cart.checkout()?;

    receipt.write_to(io::stdout().lock())?;

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .compact()
        .with_target(true)
        .with_writer(io::stderr)
        .with_env_filter(build_env_filter())
        .init();
}

fn build_env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
}
