/// Errors from a cache backend.
///
/// Callers treat every variant as recoverable: a failed read is a miss and
/// a failed write only loses the cached copy.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("cache unreachable: {0}")]
    Unreachable(String),

    #[error("cache I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("corrupt cache entry '{key}': {reason}")]
    Corrupt { key: String, reason: String },

    #[error("cache operation timed out after {secs}s")]
    Timeout { secs: u64 },
}

impl CacheError {
    pub fn corrupt(key: &str, reason: impl Into<String>) -> Self {
        Self::Corrupt {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}
