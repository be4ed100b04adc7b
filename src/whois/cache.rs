//! WHOIS cache management.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, SystemTime};

use super::types::{WhoisCacheEntry, WhoisRecord};

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

fn cache_file(cache_path: &Path, domain: &str) -> PathBuf {
    cache_path.join(format!("{}.json", domain.replace('.', "_")))
}

/// Loads a cached WHOIS record from disk, if present and younger than `ttl`.
///
/// Expired entries are deleted.
pub(crate) fn load_from_cache(
    cache_path: &Path,
    domain: &str,
    ttl: Duration,
) -> Result<Option<WhoisRecord>> {
    let cache_file = cache_file(cache_path, domain);

    if !cache_file.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(&cache_file).context("Failed to read cache file")?;
    let entry: WhoisCacheEntry =
        serde_json::from_str(&content).context("Failed to parse cache file")?;

    let age = entry.cached_at.elapsed().unwrap_or_default();
    if age > ttl || entry.domain != domain {
        let _ = std::fs::remove_file(&cache_file);
        return Ok(None);
    }

    Ok(Some(entry.record))
}

/// Saves a WHOIS record to the disk cache.
///
/// The entry is written to a temporary file in the cache directory and then
/// renamed over the target, so readers never see a partial entry.
pub(crate) fn save_to_cache(cache_path: &Path, domain: &str, record: &WhoisRecord) -> Result<()> {
    std::fs::create_dir_all(cache_path).context("Failed to create cache directory")?;

    let entry = WhoisCacheEntry {
        record: record.clone(),
        cached_at: SystemTime::now(),
        domain: domain.to_string(),
    };

    let content =
        serde_json::to_string_pretty(&entry).context("Failed to serialize cache entry")?;
    let target = cache_file(cache_path, domain);
    let temp = cache_path.join(format!(
        ".{}.{}.{}.tmp",
        domain.replace('.', "_"),
        std::process::id(),
        TEMP_COUNTER.fetch_add(1, Ordering::Relaxed)
    ));
    std::fs::write(&temp, content).context("Failed to write cache file")?;
    if let Err(e) = std::fs::rename(&temp, &target) {
        let _ = std::fs::remove_file(&temp);
        return Err(e).context("Failed to move cache file into place");
    }

    Ok(())
}
