//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `netlens` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - Wiring stdin/stdout/stderr and the database into the library calls
//!
//! All core functionality is implemented in the library crate.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use tokio_util::sync::CancellationToken;

use netlens::config::{Command, HistoryArgs};
use netlens::initialization::{init_crypto_provider, init_logger_with};
use netlens::{run_batch, serve_api, ApiState, BatchOptions, Cli, Config, Prober, Store};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file (if it exists)
    // Try loading from current directory first, then from the executable's directory
    if dotenvy::dotenv().is_err() {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }

    let cli = Cli::parse();

    let log_level = cli.log_level.clone();
    let log_format = cli.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    // Initialize crypto provider for TLS operations
    init_crypto_provider();

    let config = cli.config();
    let outcome = match &cli.command {
        Command::Resolve(args) => resolve(&config, args.file.as_deref(), args.enrich).await,
        Command::Serve(args) => serve(&config, &args.listen).await,
        Command::History(args) => history(args).await,
    };

    if let Err(e) = outcome {
        eprintln!("netlens error: {:#}", e);
        process::exit(1);
    }
    Ok(())
}

async fn open_store(config: &Config) -> Result<Option<Store>> {
    match &config.db_path {
        Some(path) => {
            let store = Store::open(path)
                .await
                .with_context(|| format!("Failed to open database {}", path.display()))?;
            Ok(Some(store))
        }
        None => Ok(None),
    }
}

fn prober(config: &Config, store: Option<Store>) -> Prober {
    let prober = Prober::from_config(config);
    match store {
        Some(store) => prober.with_store(store),
        None => prober,
    }
}

async fn resolve(config: &Config, file: Option<&Path>, enrich: bool) -> Result<()> {
    let store = open_store(config).await?;
    let prober = prober(config, store);

    let input: Box<dyn Read> = match file {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("Failed to open {}", path.display()))?,
        )),
        None => Box::new(io::stdin().lock()),
    };

    let options = BatchOptions {
        enrich,
        concurrency: config.batch_concurrency,
    };
    let summary = run_batch(&prober, input, io::stdout().lock(), io::stderr(), options).await?;

    if summary.failed > 0 {
        log::warn!("{} row(s) could not be resolved", summary.failed);
    }
    Ok(())
}

async fn serve(config: &Config, listen: &str) -> Result<()> {
    let store = open_store(config).await?;
    if store.is_none() {
        log::info!("No database configured; probes are not recorded");
    }
    let state = ApiState::new(prober(config, store));

    let shutdown = CancellationToken::new();
    let signal = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::info!("Received Ctrl-C, shutting down");
        }
        signal.cancel();
    });

    serve_api(listen, state, shutdown).await
}

async fn history(args: &HistoryArgs) -> Result<()> {
    let store = Store::open(&args.db_path)
        .await
        .with_context(|| format!("Failed to open database {}", args.db_path.display()))?;
    let mut out = csv::Writer::from_writer(io::stdout().lock());

    if args.summary {
        let summary = store.summary().await?;
        out.write_record(["targets", "results", "last_probe"])?;
        out.write_record([
            summary.targets.to_string(),
            summary.results.to_string(),
            summary.last_probe.unwrap_or_default(),
        ])?;
    } else if args.daily {
        out.write_record(["day", "probes"])?;
        for count in store.daily_counts(netlens::config::DEFAULT_HISTORY_DAYS).await? {
            out.write_record([count.day, count.probes.to_string()])?;
        }
    } else {
        out.write_record(["name", "url", "ip", "port", "timestamp"])?;
        for row in store.recent_probes(args.limit).await? {
            out.write_record([row.name, row.url, row.ip, row.port.to_string(), row.timestamp])?;
        }
    }

    out.flush()?;
    Ok(())
}
