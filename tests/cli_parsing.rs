//! Tests for CLI subcommand parsing.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use netlens::config::Command;
use netlens::{Cli, TimeoutPolicy};

#[test]
fn test_resolve_with_file_and_enrich() {
    let cli = Cli::try_parse_from([
        "netlens",
        "resolve",
        "targets.csv",
        "--enrich",
        "--db-path",
        "probes.db",
        "--concurrency",
        "2",
    ])
    .expect("should parse");

    match &cli.command {
        Command::Resolve(args) => {
            assert_eq!(args.file, Some(PathBuf::from("targets.csv")));
            assert!(args.enrich);
        }
        other => panic!("unexpected command: {other:?}"),
    }

    let config = cli.config();
    assert_eq!(config.db_path, Some(PathBuf::from("probes.db")));
    assert_eq!(config.batch_concurrency, 2);
}

#[test]
fn test_serve_options() {
    let cli = Cli::try_parse_from([
        "netlens",
        "serve",
        "--listen",
        "0.0.0.0:9000",
        "--whois-timeout-ms",
        "250",
        "--rdap-url",
        "http://127.0.0.1:8080/ip/",
    ])
    .expect("should parse");

    match &cli.command {
        Command::Serve(args) => assert_eq!(args.listen, "0.0.0.0:9000"),
        other => panic!("unexpected command: {other:?}"),
    }

    let config = cli.config();
    assert_eq!(config.budgets.whois, Duration::from_millis(250));
    assert_eq!(config.budgets.tls, Duration::from_millis(2000));
    assert_eq!(config.rdap_url, "http://127.0.0.1:8080/ip/");
    assert_eq!(config.timeout_policy, TimeoutPolicy::Detach);
    assert!(config.db_path.is_none());
}

#[test]
fn test_history_defaults() {
    let cli = Cli::try_parse_from(["netlens", "history"]).expect("should parse");
    match &cli.command {
        Command::History(args) => {
            assert_eq!(args.limit, 50);
            assert!(!args.daily);
            assert!(!args.summary);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_invalid_budget_is_rejected() {
    assert!(Cli::try_parse_from(["netlens", "serve", "--dns-timeout-ms", "soon"]).is_err());
}

#[test]
fn test_unknown_subcommand_is_rejected() {
    assert!(Cli::try_parse_from(["netlens", "scan", "urls.txt"]).is_err());
}
