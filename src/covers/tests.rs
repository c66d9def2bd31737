use super::*;
use crate::player::{DEFAULT_RESIDENCY, FetchError, ThumbnailFetcher, ThumbnailQueue};
use async_io::block_on;
use std::fs;
use std::sync::{Arc, mpsc};
use std::time::Duration;
use tempfile::tempdir;

#[test]
fn ensure_cached_reads_existing_cover_once() {
    let dir = tempdir().unwrap();
    let cover = dir.path().join("cover.jpg");
    fs::write(&cover, b"\xff\xd8\xff not really a jpeg").unwrap();
    let url = cover.to_str().unwrap().to_string();

    let cache = FileThumbnailCache::new();
    assert!(block_on(cache.ensure_cached(&url)).is_ok());
    assert!(cache.contains(&url));

    // Served from memory even after the file disappears.
    fs::remove_file(&cover).unwrap();
    assert!(block_on(cache.ensure_cached(&url)).is_ok());
    assert_eq!(cache.len(), 1);
}

#[test]
fn ensure_cached_accepts_file_urls() {
    let dir = tempdir().unwrap();
    let cover = dir.path().join("folder.png");
    fs::write(&cover, b"png").unwrap();
    let url = format!("file://{}", cover.display());

    let cache = FileThumbnailCache::new();
    assert!(block_on(cache.ensure_cached(&url)).is_ok());
    assert!(cache.contains(&url));
}

#[test]
fn ensure_cached_reports_missing_and_empty_covers() {
    let dir = tempdir().unwrap();
    let empty = dir.path().join("empty.png");
    fs::write(&empty, b"").unwrap();
    let missing = dir.path().join("missing.png");

    let cache = FileThumbnailCache::new();
    assert!(matches!(
        block_on(cache.ensure_cached(missing.to_str().unwrap())),
        Err(FetchError::NotFound(_))
    ));
    assert!(matches!(
        block_on(cache.ensure_cached(empty.to_str().unwrap())),
        Err(FetchError::Empty(_))
    ));
    assert_eq!(cache.len(), 0);
}

#[test]
fn worker_fetcher_reports_completion_with_ticket() {
    let dir = tempdir().unwrap();
    let cover = dir.path().join("cover.png");
    fs::write(&cover, b"png").unwrap();

    let mut queue = ThumbnailQueue::new("default.png", DEFAULT_RESIDENCY);
    let request = queue.push(cover.to_str().unwrap()).unwrap();

    let (tx, rx) = mpsc::channel();
    let mut fetcher = WorkerFetcher::new(Arc::new(FileThumbnailCache::new()), tx);
    fetcher.fetch(request.clone());

    let done = rx.recv_timeout(Duration::from_secs(5)).unwrap();
    assert_eq!(done.ticket, request.ticket);
    assert!(done.result.is_ok());
}
