//! Command-line options.
//!
//! Every option can also be supplied through a `NETLENS_*` environment
//! variable (or a `.env` file, loaded by the binary before parsing).

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::constants::{
    DB_PATH, DEFAULT_BATCH_CONCURRENCY, DEFAULT_DNS_BUDGET_MS, DEFAULT_GEOIP_BUDGET_MS,
    DEFAULT_HISTORY_LIMIT, DEFAULT_LISTEN_ADDR, DEFAULT_RDAP_IP_URL, DEFAULT_TLS_BUDGET_MS,
    DEFAULT_WHOIS_BUDGET_MS, DEFAULT_WHOIS_CACHE_DIR,
};
use crate::config::types::{Budgets, Config, LogFormat, LogLevel, TimeoutPolicy};

/// Command-line interface.
///
/// # Examples
///
/// ```bash
/// # Resolve a CSV of name,url rows
/// netlens resolve targets.csv
///
/// # Same, from stdin, with enrichment written to stderr
/// echo "Example,example.com" | netlens resolve --enrich
///
/// # Serve the HTTP API and persist every probe
/// netlens serve --listen 0.0.0.0:8000 --db-path ./netlens.db
///
/// # Show recent probes
/// netlens history --limit 20
///
/// # Show totals
/// netlens history --summary
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "netlens",
    version,
    about = "Resolves URLs to host, port and IP, and enriches them with WHOIS, RDAP, TLS and DNS data."
)]
pub struct Cli {
    /// Log level: error|warn|info|debug|trace
    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Info, env = "NETLENS_LOG_LEVEL")]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Plain, env = "NETLENS_LOG_FORMAT")]
    pub log_format: LogFormat,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Resolve name,url rows from a CSV file or stdin
    Resolve(ResolveArgs),
    /// Serve the HTTP API
    Serve(ServeArgs),
    /// Print recent probes from the database
    History(HistoryArgs),
}

/// Options shared by every command that runs enrichment.
#[derive(Debug, Clone, Args)]
pub struct EnrichmentArgs {
    /// WHOIS budget in milliseconds
    #[arg(long, default_value_t = DEFAULT_WHOIS_BUDGET_MS, env = "NETLENS_WHOIS_TIMEOUT_MS")]
    pub whois_timeout_ms: u64,

    /// GeoIP/RDAP budget in milliseconds
    #[arg(long, default_value_t = DEFAULT_GEOIP_BUDGET_MS, env = "NETLENS_GEOIP_TIMEOUT_MS")]
    pub geoip_timeout_ms: u64,

    /// TLS budget in milliseconds
    #[arg(long, default_value_t = DEFAULT_TLS_BUDGET_MS, env = "NETLENS_TLS_TIMEOUT_MS")]
    pub tls_timeout_ms: u64,

    /// DNS records budget in milliseconds
    #[arg(long, default_value_t = DEFAULT_DNS_BUDGET_MS, env = "NETLENS_DNS_TIMEOUT_MS")]
    pub dns_timeout_ms: u64,

    /// Abort lookups that exceed their budget instead of letting them finish in the background
    #[arg(long, env = "NETLENS_ABORT_ON_TIMEOUT")]
    pub abort_on_timeout: bool,

    /// RDAP endpoint for IP lookups (the IP is appended)
    #[arg(long, default_value = DEFAULT_RDAP_IP_URL, env = "NETLENS_RDAP_URL")]
    pub rdap_url: String,

    /// WHOIS cache directory
    #[arg(long, value_parser, default_value = DEFAULT_WHOIS_CACHE_DIR, env = "NETLENS_WHOIS_CACHE_DIR")]
    pub whois_cache_dir: PathBuf,
}

impl EnrichmentArgs {
    /// Per-source budgets from the millisecond options.
    pub fn budgets(&self) -> Budgets {
        Budgets::from_millis(
            self.whois_timeout_ms,
            self.geoip_timeout_ms,
            self.tls_timeout_ms,
            self.dns_timeout_ms,
        )
    }

    fn timeout_policy(&self) -> TimeoutPolicy {
        if self.abort_on_timeout {
            TimeoutPolicy::Abort
        } else {
            TimeoutPolicy::Detach
        }
    }
}

/// `resolve` options.
#[derive(Debug, Args)]
pub struct ResolveArgs {
    /// CSV file with name,url rows (reads stdin when omitted)
    #[arg(value_parser)]
    pub file: Option<PathBuf>,

    /// Run enrichment and write one JSON line per resolved row to stderr
    #[arg(long)]
    pub enrich: bool,

    /// Record every resolved row in this SQLite database
    #[arg(long, value_parser, env = "NETLENS_DB_PATH")]
    pub db_path: Option<PathBuf>,

    /// Rows processed concurrently (output order is preserved)
    #[arg(long, default_value_t = DEFAULT_BATCH_CONCURRENCY)]
    pub concurrency: usize,

    #[command(flatten)]
    pub enrichment: EnrichmentArgs,
}

/// `serve` options.
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Address to listen on
    #[arg(long, default_value = DEFAULT_LISTEN_ADDR, env = "NETLENS_LISTEN")]
    pub listen: String,

    /// Record every probe in this SQLite database
    #[arg(long, value_parser, env = "NETLENS_DB_PATH")]
    pub db_path: Option<PathBuf>,

    #[command(flatten)]
    pub enrichment: EnrichmentArgs,
}

/// `history` options.
#[derive(Debug, Args)]
pub struct HistoryArgs {
    /// SQLite database to read
    #[arg(long, value_parser, default_value = DB_PATH, env = "NETLENS_DB_PATH")]
    pub db_path: PathBuf,

    /// Maximum number of probes to print
    #[arg(long, default_value_t = DEFAULT_HISTORY_LIMIT)]
    pub limit: i64,

    /// Print probe counts per day instead of individual probes
    #[arg(long, conflicts_with = "summary")]
    pub daily: bool,

    /// Print store-wide totals instead of individual probes
    #[arg(long)]
    pub summary: bool,
}

impl Cli {
    /// Builds the library configuration for the selected command.
    pub fn config(&self) -> Config {
        let mut config = Config {
            log_level: self.log_level.clone(),
            log_format: self.log_format.clone(),
            ..Default::default()
        };

        let enrichment = match &self.command {
            Command::Resolve(args) => {
                config.db_path = args.db_path.clone();
                config.batch_concurrency = args.concurrency.max(1);
                Some(&args.enrichment)
            }
            Command::Serve(args) => {
                config.db_path = args.db_path.clone();
                Some(&args.enrichment)
            }
            Command::History(args) => {
                config.db_path = Some(args.db_path.clone());
                None
            }
        };

        if let Some(enrichment) = enrichment {
            config.budgets = enrichment.budgets();
            config.timeout_policy = enrichment.timeout_policy();
            config.rdap_url = enrichment.rdap_url.clone();
            config.whois_cache_dir = enrichment.whois_cache_dir.clone();
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_resolve_defaults() {
        let cli = Cli::try_parse_from(["netlens", "resolve"]).expect("should parse");
        match &cli.command {
            Command::Resolve(args) => {
                assert!(args.file.is_none());
                assert!(!args.enrich);
                assert_eq!(args.concurrency, 8);
            }
            other => panic!("unexpected command: {other:?}"),
        }
        let config = cli.config();
        assert_eq!(config.budgets, Budgets::default());
        assert_eq!(config.timeout_policy, TimeoutPolicy::Detach);
    }

    #[test]
    fn test_resolve_budget_overrides() {
        let cli = Cli::try_parse_from([
            "netlens",
            "resolve",
            "targets.csv",
            "--tls-timeout-ms",
            "500",
            "--abort-on-timeout",
        ])
        .expect("should parse");
        let config = cli.config();
        assert_eq!(config.budgets.tls, Duration::from_millis(500));
        assert_eq!(config.budgets.whois, Duration::from_millis(1000));
        assert_eq!(config.timeout_policy, TimeoutPolicy::Abort);
    }

    #[test]
    fn test_history_sets_db_path() {
        let cli = Cli::try_parse_from(["netlens", "history", "--db-path", "x.db", "--daily"])
            .expect("should parse");
        let config = cli.config();
        assert_eq!(config.db_path, Some(PathBuf::from("x.db")));
    }

    #[test]
    fn test_history_daily_conflicts_with_summary() {
        assert!(Cli::try_parse_from(["netlens", "history", "--daily", "--summary"]).is_err());
    }

    #[test]
    fn test_global_log_level_after_subcommand() {
        let cli = Cli::try_parse_from(["netlens", "serve", "--log-level", "debug"])
            .expect("should parse");
        assert_eq!(
            log::LevelFilter::from(cli.log_level),
            log::LevelFilter::Debug
        );
    }

    #[test]
    fn test_missing_subcommand_is_rejected() {
        assert!(Cli::try_parse_from(["netlens"]).is_err());
    }
}
