use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::time::Duration;

use crate::audio::{OutputError, RodioOutput};
use crate::config;
use crate::covers::{FetchCompletion, FileThumbnailCache, WorkerFetcher};
use crate::player::{ControllerOptions, NextTrackSignal, PlaybackController};

pub type Controller = PlaybackController<RodioOutput, WorkerFetcher<FileThumbnailCache>>;

/// Open the audio device and wire the controller to its collaborators.
pub fn build_controller(
    settings: &config::Settings,
    next_tx: Sender<NextTrackSignal>,
    fetch_tx: Sender<FetchCompletion>,
) -> Result<Controller, OutputError> {
    let output = RodioOutput::open()?;
    let fetcher = WorkerFetcher::new(Arc::new(FileThumbnailCache::new()), fetch_tx);

    let options = ControllerOptions {
        fallback_thumbnail: settings.site.default_thumbnail.clone(),
        looping: settings.playback.looping,
        volume: settings.playback.initial_volume,
        thumbnail_residency: Duration::from_millis(settings.thumbnails.residency_ms),
    };

    Ok(PlaybackController::new(output, fetcher, next_tx, options))
}
