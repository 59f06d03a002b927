use crate::error::ClientError;
use md5::{Digest, Md5};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::PathBuf;
use std::process;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// How old a cached entry may be before it is fetched anew.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaxAge {
    /// Any cached entry wins, regardless of age.
    Forever,
    /// Serve the cached entry while it is younger than this many seconds.
    Seconds(u64),
    /// Always refetch, then overwrite the cached entry.
    Zero,
    /// Always refetch and leave the cache untouched.
    Uncached,
}

impl MaxAge {
    fn reads(self) -> bool {
        !matches!(self, MaxAge::Zero | MaxAge::Uncached)
    }

    fn writes(self) -> bool {
        !matches!(self, MaxAge::Uncached)
    }

    fn admits(self, age_seconds: u64) -> bool {
        match self {
            MaxAge::Forever => true,
            MaxAge::Seconds(limit) => age_seconds < limit,
            MaxAge::Zero | MaxAge::Uncached => false,
        }
    }
}

impl FromStr for MaxAge {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "forever" => Ok(MaxAge::Forever),
            "uncached" => Ok(MaxAge::Uncached),
            _ => match value.parse::<u64>() {
                Ok(0) => Ok(MaxAge::Zero),
                Ok(seconds) => Ok(MaxAge::Seconds(seconds)),
                Err(_) => Err(format!(
                    "invalid max age '{value}', expected 'forever', 'uncached' or a number of seconds"
                )),
            },
        }
    }
}

/// One cached response: the body plus the metadata needed for freshness
/// checks and content-type dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Unix epoch second at which the entry was stored.
    pub stored_at: u64,
    pub content_type: Option<String>,
    pub body: String,
}

impl CacheEntry {
    pub fn new(body: String, content_type: Option<String>) -> Self {
        Self {
            stored_at: now_epoch(),
            content_type,
            body,
        }
    }
}

/// Content-addressed response cache rooted at a configurable directory.
///
/// Entries are JSON files named by the MD5 digest of their logical key,
/// grouped into namespace subdirectories: `graphite` for dereferenced
/// documents and `sparql/<digest(endpoint)>` for query results.
#[derive(Debug, Clone)]
pub struct DiskCache {
    root: PathBuf,
}

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

impl DiskCache {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Hex MD5 digest used as the on-disk file name for a logical key.
    pub fn digest(key: &str) -> String {
        format!("{:x}", Md5::digest(key.as_bytes()))
    }

    pub fn entry_path(&self, namespace: &str, key: &str) -> PathBuf {
        self.root.join(namespace).join(Self::digest(key))
    }

    /// Returns the cached entry for `key` if one exists and `max_age` admits
    /// its age.
    pub fn lookup(
        &self,
        namespace: &str,
        key: &str,
        max_age: MaxAge,
    ) -> Result<Option<CacheEntry>, ClientError> {
        if !max_age.reads() {
            return Ok(None);
        }
        let path = self.entry_path(namespace, key);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(ClientError::Cache(e)),
        };
        let entry: CacheEntry = serde_json::from_str(&raw)?;
        let age = now_epoch().saturating_sub(entry.stored_at);
        if max_age.admits(age) {
            Ok(Some(entry))
        } else {
            Ok(None)
        }
    }

    /// Stores `entry` under `key` unless `max_age` forbids writing.
    ///
    /// The entry is written to a unique sibling file and renamed into place,
    /// so concurrent readers never observe a torn entry. Writers racing on
    /// the same key are last-write-wins.
    pub fn store(
        &self,
        namespace: &str,
        key: &str,
        entry: &CacheEntry,
        max_age: MaxAge,
    ) -> Result<(), ClientError> {
        if !max_age.writes() {
            return Ok(());
        }
        let path = self.entry_path(namespace, key);
        let dir = path.parent().unwrap_or(&self.root);
        fs::create_dir_all(dir)?;
        let serial = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
        let temp = dir.join(format!(
            ".{}.{}.{serial}.tmp",
            Self::digest(key),
            process::id()
        ));
        fs::write(&temp, serde_json::to_string(entry)?)?;
        fs::rename(&temp, &path)?;
        Ok(())
    }
}

fn now_epoch() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or(0)
}
