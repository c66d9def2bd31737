use std::collections::HashMap;
use std::future::Future;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::player::FetchError;

/// Makes a cover image ready for display.
pub trait ThumbnailCache: Send + Sync + 'static {
    /// Resolves once `url` is cached. Carries no payload on success.
    fn ensure_cached(&self, url: &str) -> impl Future<Output = Result<(), FetchError>> + Send;
}

/// In-memory cache of cover files read from the local filesystem.
#[derive(Debug, Default)]
pub struct FileThumbnailCache {
    entries: Mutex<HashMap<String, Arc<[u8]>>>,
}

impl FileThumbnailCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, url: &str) -> bool {
        self.entries
            .lock()
            .map(|entries| entries.contains_key(url))
            .unwrap_or(false)
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.lock().map(|entries| entries.len()).unwrap_or(0)
    }

    fn insert(&self, url: String, bytes: Vec<u8>) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(url, Arc::from(bytes));
        }
    }
}

fn cover_path(url: &str) -> PathBuf {
    PathBuf::from(url.strip_prefix("file://").unwrap_or(url))
}

impl ThumbnailCache for FileThumbnailCache {
    fn ensure_cached(&self, url: &str) -> impl Future<Output = Result<(), FetchError>> + Send {
        let url = url.to_string();
        async move {
            if self.contains(&url) {
                return Ok(());
            }

            let bytes = match std::fs::read(cover_path(&url)) {
                Ok(bytes) => bytes,
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    return Err(FetchError::NotFound(url));
                }
                Err(source) => return Err(FetchError::Io { url, source }),
            };
            if bytes.is_empty() {
                return Err(FetchError::Empty(url));
            }

            tracing::trace!(url = %url, bytes = bytes.len(), "cover cached");
            self.insert(url, bytes);
            Ok(())
        }
    }
}
