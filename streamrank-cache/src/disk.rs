use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::fs;
use tokio::time::Duration;

use crate::error::CacheError;
use crate::store::CacheStore;

/// Distinguishes temp files of concurrent writers within one process.
static TMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// File-backed cache, one file per key.
///
/// Each file holds the expiry as a unix timestamp on the first line,
/// followed by the raw payload:
/// ```text
/// 1736942400
/// [{"rank":1,"title":"Jawan",...}]
/// ```
/// Expired files are deleted lazily on read. Distinct keys always map to
/// distinct files.
#[derive(Debug, Clone)]
pub struct DiskCache {
    root: PathBuf,
}

/// Get the default cache directory for streamrank results.
pub fn cache_dir() -> Result<PathBuf, CacheError> {
    let base = dirs::cache_dir()
        .ok_or_else(|| CacheError::Unreachable("Could not determine cache directory".into()))?;
    Ok(base.join("streamrank"))
}

impl DiskCache {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Open the cache under the user cache directory.
    pub fn open_default() -> Result<Self, CacheError> {
        Ok(Self::new(cache_dir()?))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file backing `key`.
    pub fn entry_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.cache", file_stem(key)))
    }

    /// Delete every cached entry. Returns the number of bytes freed.
    pub async fn clear(&self) -> Result<u64, CacheError> {
        let mut total_size = 0u64;

        let mut dir = match fs::read_dir(&self.root).await {
            Ok(dir) => dir,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e.into()),
        };

        while let Some(entry) = dir.next_entry().await? {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "cache") {
                if let Ok(meta) = entry.metadata().await {
                    total_size += meta.len();
                }
                fs::remove_file(&path).await?;
            }
        }

        Ok(total_size)
    }
}

#[async_trait]
impl CacheStore for DiskCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        let path = self.entry_path(key);
        let contents = match fs::read(&path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let (expires_at, payload) = split_entry(key, &contents)?;
        if chrono::Utc::now().timestamp() >= expires_at {
            log::debug!("Cache entry '{}' expired", key);
            if let Err(e) = fs::remove_file(&path).await {
                log::debug!("Failed to remove expired cache file {}: {}", path.display(), e);
            }
            return Ok(None);
        }

        Ok(Some(payload.to_vec()))
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Duration) -> Result<(), CacheError> {
        fs::create_dir_all(&self.root).await?;

        let ttl_secs = i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX);
        let expires_at = chrono::Utc::now().timestamp().saturating_add(ttl_secs);

        let mut contents = format!("{}\n", expires_at).into_bytes();
        contents.extend_from_slice(value);

        // Write then rename so readers never see a half-written entry.
        let path = self.entry_path(key);
        let tmp = self.root.join(format!(
            "{}.{}.{}.tmp",
            file_stem(key),
            std::process::id(),
            TMP_COUNTER.fetch_add(1, Ordering::Relaxed),
        ));
        fs::write(&tmp, &contents).await?;
        if let Err(e) = fs::rename(&tmp, &path).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(e.into());
        }
        Ok(())
    }
}

fn split_entry<'a>(key: &str, contents: &'a [u8]) -> Result<(i64, &'a [u8]), CacheError> {
    let newline = contents
        .iter()
        .position(|&b| b == b'\n')
        .ok_or_else(|| CacheError::corrupt(key, "missing expiry header"))?;
    let header = std::str::from_utf8(&contents[..newline])
        .map_err(|_| CacheError::corrupt(key, "expiry header is not UTF-8"))?;
    let expires_at = header
        .trim()
        .parse::<i64>()
        .map_err(|_| CacheError::corrupt(key, format!("invalid expiry '{}'", header)))?;
    Ok((expires_at, &contents[newline + 1..]))
}

/// Map a cache key to a safe file name (`india:netflix:movies` ->
/// `india.netflix.movies`).
///
/// Alphanumerics and `-` pass through and `:` becomes `.`. Every other
/// byte, `.` and `_` included, is written as `_` plus two hex digits, so
/// the mapping is reversible.
fn file_stem(key: &str) -> String {
    let mut stem = String::with_capacity(key.len());
    for b in key.bytes() {
        match b {
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'-' => stem.push(char::from(b)),
            b':' => stem.push('.'),
            _ => {
                let _ = write!(stem, "_{:02x}", b);
            }
        }
    }
    stem
}
