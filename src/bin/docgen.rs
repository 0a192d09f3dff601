//! docgen: build the documentation pages under `docs/`.
//!
//! Run from the project root: `docgen`

use anyhow::{Context, Result};
use clap::Parser;

/// Render README.md and notebooks/*.ipynb into docs/
#[derive(Parser, Debug)]
#[command(name = "docgen")]
#[command(author = "PAIML Team")]
#[command(version)]
#[command(about = "Generate the HTML documentation pages", long_about = None)]
struct Cli {}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let _cli = Cli::parse();

    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let root = std::env::current_dir().context("cannot determine the working directory")?;
    let written = trueno_vega::docgen::generate(&root)
        .with_context(|| format!("failed to generate docs under {}", root.display()))?;
    for page in written {
        println!("{}", page.display());
    }
    Ok(())
}
