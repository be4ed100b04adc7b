//! Bounded-time behavior of the enrichment coordinator.

mod helpers;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::future::BoxFuture;
use netlens::{enrich, Budgets, EnrichmentResult, EnrichmentSources, Payload, TimeoutPolicy};
use serde_json::json;

use helpers::{Behavior, FakeSources};

fn budgets() -> Budgets {
    Budgets::from_millis(1000, 1000, 2000, 1000)
}

#[tokio::test]
async fn test_slow_whois_times_out_others_succeed() {
    let sources = FakeSources {
        whois: Behavior::slow(1500),
        ..Default::default()
    };

    let started = Instant::now();
    let result = enrich(
        &sources,
        "example.com",
        "192.0.2.1",
        443,
        &budgets(),
        TimeoutPolicy::Detach,
    )
    .await;
    let elapsed = started.elapsed();

    assert!(result.whois.is_timeout());
    assert!(result.geoip.is_success());
    assert!(result.tls.is_success());
    assert!(result.dns.is_success());
    assert!(elapsed >= Duration::from_millis(950), "elapsed {elapsed:?}");
    assert!(elapsed < Duration::from_millis(1400), "elapsed {elapsed:?}");

    let value = serde_json::to_value(&result).unwrap();
    assert_eq!(value["whois"], json!({"error": "timeout"}));
}

#[tokio::test]
async fn test_returns_within_longest_budget() {
    let sources = FakeSources {
        whois: Behavior::slow(5000),
        geoip: Behavior::slow(5000),
        tls: Behavior::slow(5000),
        dns: Behavior::slow(5000),
    };
    let budgets = Budgets::from_millis(100, 200, 300, 150);

    let started = Instant::now();
    let result = enrich(&sources, "a.test", "192.0.2.1", 80, &budgets, TimeoutPolicy::Detach).await;

    assert!(started.elapsed() < Duration::from_millis(800));
    for slot in [&result.whois, &result.geoip, &result.tls, &result.dns] {
        assert_eq!(slot, &EnrichmentResult::Timeout);
    }
}

#[tokio::test]
async fn test_failure_is_isolated() {
    let sources = FakeSources {
        geoip: Behavior::Fail("GeoIP failed: HTTP client unavailable"),
        ..Default::default()
    };

    let result = enrich(
        &sources,
        "example.com",
        "192.0.2.1",
        443,
        &budgets(),
        TimeoutPolicy::Detach,
    )
    .await;

    assert_eq!(
        result.geoip,
        EnrichmentResult::Failure("GeoIP failed: HTTP client unavailable".to_string())
    );
    assert!(result.whois.is_success());
    assert!(result.tls.is_success());
    assert!(result.dns.is_success());
}

#[tokio::test]
async fn test_panicking_source_becomes_failure() {
    let sources = FakeSources {
        tls: Behavior::Panic,
        ..Default::default()
    };

    let result = enrich(
        &sources,
        "example.com",
        "192.0.2.1",
        443,
        &budgets(),
        TimeoutPolicy::Detach,
    )
    .await;

    assert_eq!(
        result.tls,
        EnrichmentResult::Failure("tls lookup panicked".to_string())
    );
    assert!(result.dns.is_success());
}

/// WHOIS source that flags completion, to observe what happens after a timeout.
struct FlaggingSources {
    finished: Arc<AtomicBool>,
}

impl EnrichmentSources for FlaggingSources {
    fn whois(&self, _host: String) -> BoxFuture<'static, anyhow::Result<Payload>> {
        let finished = Arc::clone(&self.finished);
        Box::pin(async move {
            tokio::time::sleep(Duration::from_millis(300)).await;
            finished.store(true, Ordering::SeqCst);
            Ok(Payload::new())
        })
    }

    fn geoip(&self, _ip: String) -> BoxFuture<'static, anyhow::Result<Payload>> {
        Box::pin(async { Ok(Payload::new()) })
    }

    fn tls(&self, _host: String, _port: u16) -> BoxFuture<'static, anyhow::Result<Payload>> {
        Box::pin(async { Ok(Payload::new()) })
    }

    fn dns(&self, _host: String) -> BoxFuture<'static, anyhow::Result<Payload>> {
        Box::pin(async { Ok(Payload::new()) })
    }
}

async fn run_flagging(policy: TimeoutPolicy) -> bool {
    let finished = Arc::new(AtomicBool::new(false));
    let sources = FlaggingSources {
        finished: Arc::clone(&finished),
    };
    let budgets = Budgets::from_millis(50, 1000, 1000, 1000);

    let result = enrich(&sources, "a.test", "192.0.2.1", 443, &budgets, policy).await;
    assert!(result.whois.is_timeout());

    tokio::time::sleep(Duration::from_millis(600)).await;
    finished.load(Ordering::SeqCst)
}

#[tokio::test]
async fn test_detach_lets_task_finish() {
    assert!(run_flagging(TimeoutPolicy::Detach).await);
}

#[tokio::test]
async fn test_abort_cancels_task() {
    assert!(!run_flagging(TimeoutPolicy::Abort).await);
}
