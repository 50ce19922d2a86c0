mod app;
mod domain;
mod error;
mod repo;
mod usecase;

use anyhow::Result;
use clap::Parser;
use time::OffsetDateTime;
use tracing_subscriber::EnvFilter;

use app::{GithubConfig, OutputFormat};

#[derive(Parser, Debug)]
#[command(author, version, about = "Your GitHub commits grouped by repository", long_about = None)]
struct Args {
    /// First day of the range (YYYY-MM-DD, UTC)
    #[arg(short = 's', long, value_name = "YYYY-MM-DD")]
    start: Option<String>,

    /// Last day of the range (YYYY-MM-DD, UTC)
    #[arg(short = 'e', long, value_name = "YYYY-MM-DD")]
    end: Option<String>,

    /// Trailing window in days when no range is given
    #[arg(
        long,
        default_value_t = 30,
        value_parser = clap::value_parser!(u32).range(1..),
        conflicts_with_all = ["start", "end"]
    )]
    days: u32,

    /// Output shape
    #[arg(long, value_enum, default_value_t = OutputFormat::Grouped)]
    format: OutputFormat,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let range = app::resolve_range(
        args.start.as_deref(),
        args.end.as_deref(),
        args.days,
        OffsetDateTime::now_utc(),
    )?;
    let config = GithubConfig::from_lookup(|name| std::env::var(name).ok())?;

    let json = app::run(&config, range, args.format)?;
    println!("{json}");
    Ok(())
}
