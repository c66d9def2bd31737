//! Cover-image transition queue.
//!
//! Covers pushed on each `play()` go through distinct-until-changed and
//! switch-latest filtering before they reach the trail. The trail itself is a
//! short FIFO: every append schedules exactly one removal of the oldest entry
//! `residency` later, so a single cover change shows two entries for a moment
//! and settles back to one.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// How long an appended cover keeps the trail one entry longer.
pub const DEFAULT_RESIDENCY: Duration = Duration::from_millis(1000);

/// Identifies one fetch request. Only the newest ticket is honored.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct FetchTicket(u64);

/// A request for the thumbnail cache to make `url` ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub ticket: FetchTicket,
    pub url: String,
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("thumbnail not found: {0}")]
    NotFound(String),
    #[error("thumbnail is empty: {0}")]
    Empty(String),
    #[error("failed to read thumbnail {url}: {source}")]
    Io {
        url: String,
        source: std::io::Error,
    },
}

/// Starts fetches on behalf of the controller.
///
/// Implementations must not block; the outcome is reported back later through
/// `PlaybackController::on_thumbnail_fetched` with the request's ticket.
pub trait ThumbnailFetcher {
    fn fetch(&mut self, request: FetchRequest);
}

#[derive(Debug)]
pub struct ThumbnailQueue {
    fallback: String,
    residency: Duration,
    last_pushed: Option<String>,
    in_flight: Option<FetchRequest>,
    next_ticket: u64,
    trail: VecDeque<String>,
    evictions: VecDeque<Instant>,
}

impl ThumbnailQueue {
    /// Create a queue whose trail initially shows `fallback`.
    pub fn new(fallback: impl Into<String>, residency: Duration) -> Self {
        let fallback = fallback.into();
        let mut trail = VecDeque::new();
        trail.push_back(fallback.clone());
        Self {
            fallback,
            residency,
            last_pushed: None,
            in_flight: None,
            next_ticket: 0,
            trail,
            evictions: VecDeque::new(),
        }
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    /// Offer a new cover URL.
    ///
    /// Returns the fetch to start, or `None` when `url` repeats the previous
    /// push. A returned request supersedes whatever fetch was in flight.
    pub fn push(&mut self, url: &str) -> Option<FetchRequest> {
        if self.last_pushed.as_deref() == Some(url) {
            tracing::trace!(url, "thumbnail unchanged, skipping fetch");
            return None;
        }
        self.last_pushed = Some(url.to_string());

        if let Some(stale) = self.in_flight.take() {
            tracing::debug!(url = %stale.url, "superseding in-flight thumbnail fetch");
        }

        self.next_ticket += 1;
        let request = FetchRequest {
            ticket: FetchTicket(self.next_ticket),
            url: url.to_string(),
        };
        self.in_flight = Some(request.clone());
        Some(request)
    }

    /// Apply the outcome of the fetch identified by `ticket`.
    ///
    /// Returns `false` when the ticket is no longer current and the outcome
    /// was discarded. A failed fetch shows the fallback thumbnail in place of
    /// the requested one.
    pub fn complete(
        &mut self,
        ticket: FetchTicket,
        result: Result<(), FetchError>,
        now: Instant,
    ) -> bool {
        let Some(request) = self.in_flight.take_if(|r| r.ticket == ticket) else {
            tracing::trace!(?ticket, "discarding stale thumbnail fetch");
            return false;
        };

        let url = match result {
            Ok(()) => request.url,
            Err(e) => {
                tracing::warn!("thumbnail fetch failed, using fallback: {e}");
                self.fallback.clone()
            }
        };

        self.trail.push_back(url);
        self.evictions.push_back(now + self.residency);
        true
    }

    /// Run every eviction due at `now`. Returns how many entries were removed.
    pub fn tick(&mut self, now: Instant) -> usize {
        let mut removed = 0;
        while self.evictions.front().is_some_and(|due| *due <= now) {
            self.evictions.pop_front();
            if self.trail.pop_front().is_some() {
                removed += 1;
            }
        }
        removed
    }

    /// Trail entries, oldest first.
    pub fn snapshot(&self) -> Vec<String> {
        self.trail.iter().cloned().collect()
    }

    /// When the next eviction is due, if any is pending.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.evictions.front().copied()
    }

    #[cfg(test)]
    pub(crate) fn in_flight(&self) -> Option<&FetchRequest> {
        self.in_flight.as_ref()
    }
}
