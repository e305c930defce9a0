use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

const CACHE_VERSION: u32 = 1;
const CACHE_DIR: &str = "fpl_dashboard";
const CACHE_FILE: &str = "http_cache.json";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct HttpCacheFile {
    version: u32,
    entries: HashMap<String, CacheEntry>,
}

#[derive(Serialize)]
struct HttpCacheFileRef<'a> {
    version: u32,
    entries: &'a HashMap<String, CacheEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CacheEntry {
    body: String,
    etag: Option<String>,
    last_modified: Option<String>,
    fetched_at: u64,
    /// Set by [`ResponseCache::expire`]; the next read revalidates regardless of age.
    #[serde(default)]
    stale: bool,
}

/// Conditional request headers taken from a stale entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Validators {
    pub etag: Option<String>,
    pub last_modified: Option<String>,
}

/// What a fetch closure hands back to the cache.
#[derive(Debug, Clone)]
pub enum Fetched {
    Body {
        body: String,
        etag: Option<String>,
        last_modified: Option<String>,
    },
    NotModified,
}

/// Response bodies keyed by URL, each valid for a fixed time-to-live.
///
/// Reads and writes take the lock briefly; the fetch itself runs unlocked, so two
/// concurrent misses on one URL both fetch and the later write wins.
///
/// A persistent cache only touches disk in [`ResponseCache::flush`] (and on drop),
/// so a load that stores many responses writes the file once.
pub struct ResponseCache {
    ttl_secs: u64,
    entries: Mutex<HashMap<String, CacheEntry>>,
    path: Option<PathBuf>,
    dirty: AtomicBool,
    writes: AtomicUsize,
}

impl ResponseCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl_secs: ttl.as_secs().max(1),
            entries: Mutex::new(HashMap::new()),
            path: None,
            dirty: AtomicBool::new(false),
            writes: AtomicUsize::new(0),
        }
    }

    /// Cache mirrored to `path`; a missing, unreadable or outdated file starts empty.
    pub fn persistent(ttl: Duration, path: PathBuf) -> Self {
        let file = load_cache_file(&path);
        Self {
            ttl_secs: ttl.as_secs().max(1),
            entries: Mutex::new(file.entries),
            path: Some(path),
            dirty: AtomicBool::new(false),
            writes: AtomicUsize::new(0),
        }
    }

    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn get_or_fetch<F>(&self, url: &str, fetch: F) -> Result<String>
    where
        F: FnOnce(&Validators) -> Result<Fetched>,
    {
        self.get_or_fetch_at(url, now_secs(), fetch)
    }

    /// Returns the cached body when younger than the TTL at `now` (unix seconds)
    /// and not expired, otherwise calls `fetch` with the validators of the stale entry, if any.
    pub fn get_or_fetch_at<F>(&self, url: &str, now: u64, fetch: F) -> Result<String>
    where
        F: FnOnce(&Validators) -> Result<Fetched>,
    {
        let cached = self.lock().get(url).cloned();
        if let Some(entry) = cached.as_ref().filter(|entry| self.is_fresh(entry, now)) {
            return Ok(entry.body.clone());
        }

        let validators = cached
            .as_ref()
            .map(|entry| Validators {
                etag: entry.etag.clone(),
                last_modified: entry.last_modified.clone(),
            })
            .unwrap_or_default();

        match fetch(&validators)? {
            Fetched::NotModified => {
                let Some(mut entry) = cached else {
                    return Err(anyhow!("received 304 without cache body for {url}"));
                };
                entry.fetched_at = now;
                entry.stale = false;
                let body = entry.body.clone();
                self.store(url, entry);
                Ok(body)
            }
            Fetched::Body {
                body,
                etag,
                last_modified,
            } => {
                self.store(
                    url,
                    CacheEntry {
                        body: body.clone(),
                        etag,
                        last_modified,
                        fetched_at: now,
                        stale: false,
                    },
                );
                Ok(body)
            }
        }
    }

    /// Marks every entry stale, keeping bodies and validators, so the next read of
    /// each URL goes to the network (cheap when the server answers 304).
    /// Returns how many entries were not already marked.
    pub fn expire(&self) -> usize {
        let mut entries = self.lock();
        let mut expired = 0;
        for entry in entries.values_mut().filter(|entry| !entry.stale) {
            entry.stale = true;
            expired += 1;
        }
        if !entries.is_empty() {
            self.dirty.store(true, Ordering::Release);
        }
        expired
    }

    pub fn clear(&self) {
        self.lock().clear();
        self.dirty.store(true, Ordering::Release);
    }

    /// Writes the entries to disk if anything changed since the last write.
    /// Returns whether a write happened; in-memory caches never write.
    pub fn flush(&self) -> Result<bool> {
        let Some(path) = self.path.as_ref() else {
            return Ok(false);
        };
        if !self.dirty.swap(false, Ordering::AcqRel) {
            return Ok(false);
        }
        let json = {
            let entries = self.lock();
            serde_json::to_string(&HttpCacheFileRef {
                version: CACHE_VERSION,
                entries: &*entries,
            })
            .context("serialize http cache")?
        };
        if let Err(err) = save_cache_file(path, &json) {
            self.dirty.store(true, Ordering::Release);
            return Err(err);
        }
        self.writes.fetch_add(1, Ordering::Relaxed);
        Ok(true)
    }

    /// Number of times the cache file has been written.
    pub fn disk_writes(&self) -> usize {
        self.writes.load(Ordering::Relaxed)
    }

    fn is_fresh(&self, entry: &CacheEntry, now: u64) -> bool {
        !entry.stale && now.saturating_sub(entry.fetched_at) < self.ttl_secs
    }

    fn store(&self, url: &str, entry: CacheEntry) {
        self.lock().insert(url.to_string(), entry);
        self.dirty.store(true, Ordering::Release);
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, CacheEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for ResponseCache {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

pub fn default_cache_path() -> Option<PathBuf> {
    app_cache_dir().map(|dir| dir.join(CACHE_FILE))
}

pub fn app_cache_dir() -> Option<PathBuf> {
    if let Some(base) = std::env::var("XDG_CACHE_HOME")
        .ok()
        .filter(|base| !base.trim().is_empty())
    {
        return Some(PathBuf::from(base).join(CACHE_DIR));
    }
    let home = std::env::var("HOME").ok()?;
    if home.trim().is_empty() {
        return None;
    }
    Some(PathBuf::from(home).join(".cache").join(CACHE_DIR))
}

pub fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

fn load_cache_file(path: &PathBuf) -> HttpCacheFile {
    let Ok(raw) = fs::read_to_string(path) else {
        return HttpCacheFile::default();
    };
    let cache = serde_json::from_str::<HttpCacheFile>(&raw).unwrap_or_default();
    if cache.version != CACHE_VERSION {
        return HttpCacheFile::default();
    }
    cache
}

fn save_cache_file(path: &PathBuf, json: &str) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).ok();
    }
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json).context("write http cache")?;
    fs::rename(&tmp, path).context("swap http cache")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(text: &str) -> Fetched {
        Fetched::Body {
            body: text.to_string(),
            etag: Some("\"v1\"".to_string()),
            last_modified: None,
        }
    }

    #[test]
    fn expire_marks_entries_without_dropping_them() {
        let cache = ResponseCache::new(Duration::from_secs(60));
        cache.get_or_fetch_at("a", 0, |_| Ok(body("a"))).unwrap();
        cache.get_or_fetch_at("b", 50, |_| Ok(body("b"))).unwrap();

        assert_eq!(cache.expire(), 2);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.expire(), 0);
        assert!(cache.lock().values().all(|entry| entry.stale));
    }

    #[test]
    fn not_modified_without_entry_is_an_error() {
        let cache = ResponseCache::new(Duration::from_secs(60));
        let err = cache
            .get_or_fetch_at("a", 0, |_| Ok(Fetched::NotModified))
            .unwrap_err();
        assert!(err.to_string().contains("304"));
    }

    #[test]
    fn persistent_cache_round_trips_through_disk() {
        let dir = std::env::temp_dir().join(format!("fpl_dashboard_cache_{}", std::process::id()));
        let path = dir.join(CACHE_FILE);
        let _ = fs::remove_file(&path);

        let cache = ResponseCache::persistent(Duration::from_secs(60), path.clone());
        cache.get_or_fetch_at("u", 10, |_| Ok(body("stored"))).unwrap();
        assert!(cache.flush().unwrap());

        let reopened = ResponseCache::persistent(Duration::from_secs(60), path.clone());
        let out = reopened
            .get_or_fetch_at("u", 20, |_| panic!("fresh entry must not refetch"))
            .unwrap();
        assert_eq!(out, "stored");

        let _ = fs::remove_dir_all(&dir);
    }
}
