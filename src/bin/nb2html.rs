//! nb2html: convert a Jupyter notebook to a standalone HTML page.
//!
//! Run: `nb2html notebooks/demo.ipynb [docs/demo.html]`

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

/// Convert a Jupyter notebook with Vega-Lite outputs to HTML
#[derive(Parser, Debug)]
#[command(name = "nb2html")]
#[command(author = "PAIML Team")]
#[command(version)]
#[command(about = "Convert a Jupyter notebook to standalone HTML", long_about = None)]
struct Cli {
    /// Notebook to convert
    input: PathBuf,

    /// Output file (defaults to the input with an .html extension)
    output: Option<PathBuf>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let written = trueno_vega::notebook::convert(&cli.input, cli.output.as_deref())
        .with_context(|| format!("failed to convert {}", cli.input.display()))?;
    println!("{}", written.display());
    Ok(())
}
