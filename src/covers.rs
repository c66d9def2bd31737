//! Thumbnail cache service and the worker that runs its fetches.
//!
//! The player only knows `ThumbnailFetcher`; this module provides the
//! production pair: `FileThumbnailCache` keeps cover bytes in memory and
//! `WorkerFetcher` runs each `ensure_cached` on its own thread, reporting back
//! over a channel so the event loop applies the result.

mod cache;
mod fetcher;

pub use cache::*;
pub use fetcher::*;

#[cfg(test)]
mod tests;
