//! Playback state machine for the now-playing widget.
//!
//! `PlaybackController` owns the audio output and the displayed state. All of
//! its commands are safe to call at any time: a command whose precondition is
//! not met (no output, metadata not loaded yet, wrong pointer button, same
//! song again) is dropped without error.

use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::time::{Duration, Instant};

use super::output::{AudioOutput, MediaEvent};
use super::song::Song;
use super::thumbnails::{
    DEFAULT_RESIDENCY, FetchError, FetchTicket, ThumbnailFetcher, ThumbnailQueue,
};
use super::time::{Progress, compute_progress};
use super::volume::{self, SliderConfig};

/// Coarse playback state derived from the controller and its output.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Status {
    NoTrack,
    Playing,
    Paused,
}

/// Button code of the primary (left) pointer button.
pub const PRIMARY_BUTTON: i16 = 0;

/// A pointer press on the progress bar.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerEvent {
    /// 0 = primary, 1 = auxiliary (middle), 2 = secondary (right).
    pub button: i16,
    /// Horizontal offset of the pointer inside the bar.
    pub offset_x: f64,
    /// Width of the bar, in the same unit as `offset_x`.
    pub element_width: f64,
}

/// Asks the playlist owner to move on.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct NextTrackSignal {
    /// `0` when the track ended by itself, `1`/`-1` for a manual skip.
    pub direction: i32,
}

impl NextTrackSignal {
    pub const AUTO: i32 = 0;

    pub fn is_auto(&self) -> bool {
        self.direction == Self::AUTO
    }
}

#[derive(Debug, Clone)]
pub struct ControllerOptions {
    /// Shown when a song has no cover or its cover cannot be fetched.
    pub fallback_thumbnail: String,
    /// Initial hardware-level repeat flag.
    pub looping: bool,
    /// Initial output volume (`0.0..=1.0`).
    pub volume: f32,
    /// How long a new cover keeps the previous one on screen.
    pub thumbnail_residency: Duration,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            fallback_thumbnail: String::new(),
            looping: true,
            volume: 1.0,
            thumbnail_residency: DEFAULT_RESIDENCY,
        }
    }
}

/// Read-only snapshot of everything the widget displays.
#[derive(Debug, Clone, PartialEq)]
pub struct NowPlaying {
    pub name: String,
    pub artist: String,
    pub elapsed_label: String,
    pub remaining_label: String,
    pub progress_ratio: f64,
    pub status: Status,
    pub looping: bool,
    pub volume: f32,
    /// Thumbnail trail, oldest first.
    pub trail: Vec<String>,
}

pub struct PlaybackController<O: AudioOutput, F: ThumbnailFetcher> {
    audio: Option<O>,
    fetcher: F,
    next_tx: Sender<NextTrackSignal>,
    current: Option<Arc<Song>>,
    progress: Progress,
    thumbnails: ThumbnailQueue,
}

/// The output's duration, if it is usable for arithmetic.
fn known_duration<O: AudioOutput>(audio: &O) -> Option<f64> {
    audio.duration().filter(|d| d.is_finite() && *d > 0.0)
}

impl<O: AudioOutput, F: ThumbnailFetcher> PlaybackController<O, F> {
    /// Take ownership of `audio` and apply the initial loop flag and volume.
    pub fn new(
        mut audio: O,
        fetcher: F,
        next_tx: Sender<NextTrackSignal>,
        options: ControllerOptions,
    ) -> Self {
        audio.set_looping(options.looping);
        audio.set_volume(options.volume.clamp(0.0, 1.0));

        Self {
            audio: Some(audio),
            fetcher,
            next_tx,
            current: None,
            progress: Progress::default(),
            thumbnails: ThumbnailQueue::new(
                options.fallback_thumbnail,
                options.thumbnail_residency,
            ),
        }
    }

    /// Start `song` from the beginning unless it is already the current one.
    pub fn play(&mut self, song: Arc<Song>) {
        if self
            .current
            .as_ref()
            .is_some_and(|current| Arc::ptr_eq(current, &song))
        {
            tracing::trace!(name = %song.name, "already playing, ignoring play");
            return;
        }
        let Some(audio) = self.audio.as_mut() else {
            tracing::debug!("play after dispose ignored");
            return;
        };

        audio.set_source(&song.source);
        audio.play();
        self.progress = Progress::default();

        let cover = song
            .cover
            .clone()
            .unwrap_or_else(|| self.thumbnails.fallback().to_string());
        tracing::info!(name = %song.name, artist = %song.artist, "now playing");
        self.current = Some(song);

        if let Some(request) = self.thumbnails.push(&cover) {
            self.fetcher.fetch(request);
        }
    }

    /// Pause when playing, resume when paused.
    pub fn toggle_play_state(&mut self) {
        let Some(audio) = self.audio.as_mut() else {
            return;
        };
        if known_duration(audio).is_none() {
            tracing::debug!("media not ready, ignoring play/pause");
            return;
        }

        if audio.is_paused() {
            audio.play();
        } else {
            audio.pause();
        }
    }

    /// Jump to the position under the pointer. Only the primary button seeks.
    pub fn seek(&mut self, event: PointerEvent) {
        if event.button != PRIMARY_BUTTON {
            return;
        }
        let Some(audio) = self.audio.as_mut() else {
            return;
        };
        let Some(duration) = known_duration(audio) else {
            return;
        };
        if event.element_width <= 0.0 {
            return;
        }

        let target = event.offset_x / event.element_width * duration;
        tracing::debug!(position = target, "seek");
        audio.set_current_time(target);
    }

    /// Without an output there is nothing to loop, so this reads `true`.
    pub fn looping(&self) -> bool {
        self.audio.as_ref().is_none_or(|audio| audio.looping())
    }

    pub fn set_looping(&mut self, looping: bool) {
        if let Some(audio) = self.audio.as_mut() {
            audio.set_looping(looping);
        }
    }

    /// Ask the playlist owner for another track. Local state is untouched.
    pub fn request_next(&self, direction: i32) {
        if self.next_tx.send(NextTrackSignal { direction }).is_err() {
            tracing::debug!(direction, "no playlist owner listening for next-track");
        }
    }

    pub fn request_next_default(&self) {
        self.request_next(1);
    }

    pub fn on_time_update(&mut self) {
        if let Some(audio) = self.audio.as_ref() {
            self.progress = compute_progress(audio.current_time(), audio.duration());
        }
    }

    /// Natural end of the track. The loop flag is the output's business; if
    /// the output reports an end, the playlist owner hears about it.
    pub fn on_ended(&mut self) {
        self.request_next(NextTrackSignal::AUTO);
    }

    pub fn handle_media_event(&mut self, event: MediaEvent) {
        match event {
            MediaEvent::TimeUpdate => self.on_time_update(),
            MediaEvent::Ended => self.on_ended(),
        }
    }

    /// Drain and handle pending media-clock events from the output.
    pub fn poll_media(&mut self) {
        let events = match self.audio.as_mut() {
            Some(audio) => audio.poll_events(),
            None => return,
        };
        for event in events {
            self.handle_media_event(event);
        }
    }

    /// Completion callback for a fetch started through the `ThumbnailFetcher`.
    pub fn on_thumbnail_fetched(
        &mut self,
        ticket: FetchTicket,
        result: Result<(), FetchError>,
        now: Instant,
    ) -> bool {
        self.thumbnails.complete(ticket, result, now)
    }

    /// Run due thumbnail evictions.
    pub fn tick(&mut self, now: Instant) -> usize {
        self.thumbnails.tick(now)
    }

    /// Initial configuration for the volume slider, if there is an output.
    pub fn slider_config(&self) -> Option<SliderConfig> {
        self.audio
            .as_ref()
            .map(|audio| volume::slider_config(audio.volume()))
    }

    /// Drag callback of the volume slider.
    pub fn on_volume_drag(&mut self, value: f64) {
        if let Some(audio) = self.audio.as_mut() {
            volume::on_drag(audio, value);
        }
    }

    pub fn status(&self) -> Status {
        match (&self.current, &self.audio) {
            (Some(_), Some(audio)) if audio.is_paused() => Status::Paused,
            (Some(_), Some(_)) => Status::Playing,
            _ => Status::NoTrack,
        }
    }

    pub fn current_song(&self) -> Option<&Arc<Song>> {
        self.current.as_ref()
    }

    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    pub fn thumbnails(&self) -> &ThumbnailQueue {
        &self.thumbnails
    }

    pub fn now_playing(&self) -> NowPlaying {
        let (name, artist) = match self.current_song() {
            Some(song) => (song.name.clone(), song.artist.clone()),
            None => (String::new(), String::new()),
        };

        NowPlaying {
            name,
            artist,
            elapsed_label: self.progress.elapsed_label.clone(),
            remaining_label: self.progress.remaining_label.clone(),
            progress_ratio: self.progress.ratio,
            status: self.status(),
            looping: self.looping(),
            volume: self.audio.as_ref().map_or(0.0, |audio| {
                if audio.muted() { 0.0 } else { audio.volume() }
            }),
            trail: self.thumbnails.snapshot(),
        }
    }

    /// Release the output. Every later command is a no-op.
    pub fn dispose(&mut self) {
        if let Some(mut audio) = self.audio.take() {
            audio.pause();
            tracing::debug!("audio output released");
        }
        self.current = None;
        self.progress = Progress::default();
    }
}
