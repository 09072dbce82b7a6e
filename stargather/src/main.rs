//! Command-line interface for the stargather binary.
//!
//! `collect` scrapes the trending page and writes today's digest, `index`
//! rebuilds the month and all-time rollups from the digests on disk.

use std::{
    io,
    path::{Path, PathBuf},
    process,
    time::Duration,
};

use chrono::{Local, NaiveDate};
use clap::{ArgAction, Args, Parser, Subcommand};
use stargather::{
    CuratedCatalog, DEFAULT_TIMEOUT_SECS, DEFAULT_TRENDING_URL, Error, HttpPageSource, Quota,
    Record, RetryConfig, default_catalog, load_catalog, run_collection, update_indexes,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Command line interface for the daily repository digest.
#[derive(Debug, Parser,)]
#[command(name = "stargather", version, about = "Collect trending GitHub repositories into Markdown digests")]
struct Cli
{
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand,)]
/// Supported commands exposed by the CLI.
enum Command
{
    /// Scrape the trending page and write the daily digest.
    Collect(CollectArgs,),
    /// Rebuild month and all-time rollups from existing digests.
    Index(IndexArgs,),
}

#[derive(Debug, Args,)]
/// Arguments accepted by the `collect` subcommand.
struct CollectArgs
{
    /// Root directory of the digest tree.
    #[arg(long = "root", value_name = "DIR", env = "STARGATHER_ROOT", default_value = ".")]
    root: PathBuf,

    /// Collection date (YYYY-MM-DD); defaults to today in local time.
    #[arg(long = "date", value_name = "DATE")]
    date: Option<NaiveDate,>,

    /// Trending page to scrape.
    #[arg(long = "url", value_name = "URL", default_value = DEFAULT_TRENDING_URL)]
    url: String,

    /// YAML catalog replacing the embedded curated list.
    #[arg(long = "curated", value_name = "PATH", env = "STARGATHER_CURATED")]
    curated: Option<PathBuf,>,

    /// HTTP timeout in seconds.
    #[arg(long = "timeout-secs", value_name = "SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,

    /// Maximum fetch attempts.
    #[arg(long = "attempts", value_name = "N", default_value_t = RetryConfig::default().max_attempts)]
    attempts: u32,

    /// Pause between fetch attempts in milliseconds.
    #[arg(long = "retry-delay-ms", value_name = "MS", default_value_t = RetryConfig::default().delay_ms)]
    retry_delay_ms: u64,

    /// Print the assembled records as JSON instead of writing the digest.
    #[arg(long = "dry-run", action = ArgAction::SetTrue)]
    dry_run: bool,

    /// Pretty-print JSON output of `--dry-run`.
    #[arg(long = "pretty", action = ArgAction::SetTrue)]
    pretty: bool,
}

#[derive(Debug, Args,)]
/// Arguments accepted by the `index` subcommand.
struct IndexArgs
{
    /// Root directory of the digest tree.
    #[arg(long = "root", value_name = "DIR", env = "STARGATHER_ROOT", default_value = ".")]
    root: PathBuf,

    /// Date selecting the month to rebuild; defaults to today in local time.
    #[arg(long = "date", value_name = "DATE")]
    date: Option<NaiveDate,>,

    /// Rebuild every month rollup, not only the selected one.
    #[arg(long = "all-months", action = ArgAction::SetTrue)]
    all_months: bool,
}

/// Entry point that reports errors and sets the appropriate exit status.
fn main()
{
    init_tracing();

    if let Err(error,) = run() {
        error!("run failed: {}", error.to_display_string());
        error!("{error:?}");
        process::exit(1,);
    }
}

fn init_tracing()
{
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info",),),)
        .with_writer(io::stdout,)
        .with_target(false,)
        .init();
}

/// Executes the CLI using parsed arguments.
///
/// # Errors
///
/// Propagates errors from catalog loading, file output and index generation.
fn run() -> Result<(), Error,>
{
    let cli = Cli::parse();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|source| stargather::io_error(Path::new("<runtime>",), source,),)?;

    match cli.command {
        Command::Collect(args,) => runtime.block_on(run_collect(args,),),
        Command::Index(args,) => run_index(args,),
    }
}

async fn run_collect(args: CollectArgs,) -> Result<(), Error,>
{
    let date = args.date.unwrap_or_else(today,);
    info!("collecting repositories for {date} into {}", args.root.display());

    let catalog = resolve_catalog(args.curated.as_deref(),)?;
    let source = HttpPageSource::new(args.url.as_str(), Duration::from_secs(args.timeout_secs,),)?;
    info!("trending source: {} (timeout {}s)", source.url(), args.timeout_secs);
    let retry = RetryConfig {
        max_attempts: args.attempts,
        delay_ms:     args.retry_delay_ms,
    };
    let mut rng = rand::thread_rng();

    let report = run_collection(
        &source,
        &catalog,
        &Quota::default(),
        &retry,
        &mut rng,
        &args.root,
        date,
        args.dry_run,
    )
    .await?;

    if args.dry_run {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        write_records(&mut handle, &report.records, args.pretty,)?;
    }

    info!("collection finished");
    Ok((),)
}

fn run_index(args: IndexArgs,) -> Result<(), Error,>
{
    let date = args.date.unwrap_or_else(today,);
    let report = update_indexes(&args.root, date, args.all_months,)?;
    info!(
        "rebuilt {} month index(es) and {}",
        report.month_readmes.len(),
        report.root_readme.display()
    );
    Ok((),)
}

fn resolve_catalog(path: Option<&Path,>,) -> Result<CuratedCatalog, Error,>
{
    match path {
        Some(path,) => {
            info!("loading curated catalog from {}", path.display());
            load_catalog(path,)
        }
        None => default_catalog(),
    }
}

fn write_records<W: io::Write,>(writer: &mut W, records: &[Record], pretty: bool,) -> Result<(), Error,>
{
    if pretty {
        serde_json::to_writer_pretty(writer, records,)?;
    } else {
        serde_json::to_writer(writer, records,)?;
    }

    Ok((),)
}

fn today() -> NaiveDate
{
    Local::now().date_naive()
}
