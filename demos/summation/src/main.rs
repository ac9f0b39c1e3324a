use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Parser;
use scankit::ScanConfig;
use scankit_summation::{Mode, Options, run};
use tracing_subscriber::EnvFilter;

/// Sum whitespace separated values from stdin.
#[derive(Parser, Debug)]
#[command(name = "summation", version, about)]
struct Cli {
    /// Which driver to run.
    #[arg(long, value_enum, default_value_t = Mode::Pipeline)]
    mode: Mode,

    /// Number of integers summed in `count` mode.
    #[arg(long, default_value_t = 3)]
    count: usize,

    /// Stopping value in `sentinel` mode.
    #[arg(long, default_value_t = -1, allow_hyphen_values = true)]
    sentinel: i64,

    /// Reject tokens longer than this many bytes.
    #[arg(long, default_value_t = ScanConfig::DEFAULT.max_token_len)]
    max_token_len: usize,

    /// Stop after reading this many tokens.
    #[arg(long)]
    max_tokens: Option<usize>,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let mut config = ScanConfig::new().with_max_token_len(cli.max_token_len);
    if let Some(limit) = cli.max_tokens {
        config = config.with_max_tokens(limit);
    }
    let options = Options {
        mode: cli.mode,
        count: cli.count,
        sentinel: cli.sentinel,
        config,
    };

    let stdin = io::stdin().lock();
    let mut stdout = io::stdout().lock();
    run(stdin, &mut stdout, &options).with_context(|| format!("{:?} driver failed", cli.mode))?;
    stdout.flush().context("failed to flush stdout")?;
    Ok(())
}
