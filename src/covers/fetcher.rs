use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::thread;

use async_io::block_on;

use crate::player::{FetchError, FetchRequest, FetchTicket, ThumbnailFetcher};

use super::cache::ThumbnailCache;

/// Outcome of one fetch, delivered to the event loop.
#[derive(Debug)]
pub struct FetchCompletion {
    pub ticket: FetchTicket,
    pub result: Result<(), FetchError>,
}

/// Runs every fetch on a short-lived worker thread.
pub struct WorkerFetcher<C: ThumbnailCache> {
    cache: Arc<C>,
    tx: Sender<FetchCompletion>,
}

impl<C: ThumbnailCache> WorkerFetcher<C> {
    pub fn new(cache: Arc<C>, tx: Sender<FetchCompletion>) -> Self {
        Self { cache, tx }
    }
}

impl<C: ThumbnailCache> ThumbnailFetcher for WorkerFetcher<C> {
    fn fetch(&mut self, request: FetchRequest) {
        let ticket = request.ticket;
        let url = request.url.clone();
        let cache = Arc::clone(&self.cache);
        let tx = self.tx.clone();

        let spawned = thread::Builder::new()
            .name("cover-fetch".to_string())
            .spawn(move || {
                let result = block_on(cache.ensure_cached(&request.url));
                // The event loop may already be gone during shutdown.
                let _ = tx.send(FetchCompletion {
                    ticket: request.ticket,
                    result,
                });
            });

        if let Err(source) = spawned {
            tracing::warn!("failed to start cover fetch: {source}");
            let _ = self.tx.send(FetchCompletion {
                ticket,
                result: Err(FetchError::Io { url, source }),
            });
        }
    }
}
