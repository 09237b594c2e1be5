//! postfixcsv-generate - write a random sheet of postfix expressions

use anyhow::{Context, Result};
use clap::Parser;
use postfix_engine::engine::{GenerateOptions, generate_sheet};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "postfixcsv-generate")]
#[command(author, version, about = "Generate a random postfix sheet for benchmarking postfixcsv")]
struct Cli {
    /// Number of rows
    #[arg(default_value_t = 100)]
    rows: usize,

    /// Number of columns
    #[arg(default_value_t = 100)]
    cols: usize,

    /// File to write
    #[arg(short, long, default_value = "postfix.csv")]
    output: PathBuf,

    /// Field separator
    #[arg(short, long, default_value = ",")]
    separator: String,

    /// Nesting depth of each generated expression
    #[arg(long, default_value_t = 3)]
    depth: usize,

    /// Turn one literal in N into a cell reference (0 for none)
    #[arg(long, default_value_t = 39)]
    reference_one_in: u32,

    /// Seed for a reproducible sheet
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    if cli.separator.is_empty() {
        anyhow::bail!("separator must not be empty");
    }

    let started = Instant::now();
    let options = GenerateOptions {
        rows: cli.rows,
        cols: cli.cols,
        expression_depth: cli.depth,
        reference_one_in: cli.reference_one_in,
        separator: cli.separator,
    };
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let sheet = generate_sheet(&options, &mut rng);
    std::fs::write(&cli.output, sheet)
        .with_context(|| format!("Failed to write '{}'", cli.output.display()))?;

    println!(
        "Wrote {}x{} sheet to '{}' in {:?}",
        options.rows,
        options.cols,
        cli.output.display(),
        started.elapsed()
    );
    Ok(())
}
