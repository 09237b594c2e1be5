//! postfixcsv - evaluate a sheet of postfix expressions from the command line

use anyhow::{Context, Result};
use clap::Parser;
use postfix_core::{Document, load_config};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "postfixcsv")]
#[command(author, version, about = "Evaluate a CSV file whose cells hold postfix expressions")]
struct Cli {
    /// Sheet to evaluate
    file: PathBuf,

    /// Field separator (default: comma, or the configured separator)
    #[arg(short, long)]
    separator: Option<String>,

    /// Maximum depth of a reference chain
    #[arg(long)]
    max_depth: Option<usize>,

    /// Config file to use instead of the default location
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let (mut config, warnings) = load_config(cli.config.as_deref());
    for warning in warnings {
        eprintln!("Warning: {}", warning);
    }
    if let Some(separator) = cli.separator {
        config.separator = separator;
    }
    if let Some(max_depth) = cli.max_depth {
        config.eval.max_depth = max_depth;
    }
    config.validate()?;

    let document = Document::open(&cli.file, &config.separator)
        .with_context(|| format!("Failed to read '{}'", cli.file.display()))?;
    tracing::info!(
        separator = %config.separator,
        max_depth = config.eval.max_depth,
        "evaluating sheet"
    );
    let result = document.evaluate(&config.eval);

    for message in result.messages() {
        eprintln!("{}", message);
    }
    println!("{}", result.output);

    Ok(())
}
