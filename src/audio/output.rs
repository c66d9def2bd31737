use std::path::PathBuf;
use std::time::Duration;

use rodio::{OutputStream, OutputStreamBuilder, Sink};

use crate::player::{AudioOutput, MediaEvent};

use super::error::OutputError;
use super::sink::{create_sink_at, probe_duration, source_path};

/// What a clock poll does with the current sink.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(super) enum DrainAction {
    /// Looping source ran out: start it over, no `Ended`.
    Restart,
    /// Non-looping source ran out.
    End,
    /// Still playing: report the new position.
    Tick,
}

/// `sink_empty` is `None` without a sink. A paused or already ended source
/// produces nothing, so `Ended` is raised once per run.
pub(super) fn drain_action(
    sink_empty: Option<bool>,
    paused: bool,
    looping: bool,
    ended: bool,
) -> Option<DrainAction> {
    let empty = sink_empty?;
    if paused {
        return None;
    }
    match (empty, looping, ended) {
        (false, _, _) => Some(DrainAction::Tick),
        (true, true, _) => Some(DrainAction::Restart),
        (true, false, false) => Some(DrainAction::End),
        (true, false, true) => None,
    }
}

pub struct RodioOutput {
    stream: OutputStream,
    sink: Option<Sink>,
    path: Option<PathBuf>,
    duration: Option<Duration>,
    // Where the current sink started inside the file; `Sink::get_pos` counts
    // from the sink's own start.
    offset: Duration,
    looping: bool,
    volume: f32,
    muted: bool,
    paused: bool,
    ended: bool,
    events: Vec<MediaEvent>,
}

impl RodioOutput {
    /// Open the default output device.
    pub fn open() -> Result<Self, OutputError> {
        let mut stream = OutputStreamBuilder::open_default_stream()?;
        // rodio logs to stderr when OutputStream is dropped, which would
        // scribble over the terminal UI.
        stream.log_on_drop(false);

        Ok(Self {
            stream,
            sink: None,
            path: None,
            duration: None,
            offset: Duration::ZERO,
            looping: true,
            volume: 1.0,
            muted: false,
            paused: true,
            ended: false,
            events: Vec::new(),
        })
    }

    fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.volume }
    }

    /// Replace the sink with a fresh one starting at `start_at`, keeping the
    /// paused/playing state.
    fn restart(&mut self, start_at: Duration) -> bool {
        let Some(path) = self.path.clone() else {
            return false;
        };
        if let Some(old) = self.sink.take() {
            old.stop();
        }

        match create_sink_at(&self.stream, &path, start_at) {
            Ok(sink) => {
                sink.set_volume(self.effective_volume());
                if !self.paused {
                    sink.play();
                }
                self.sink = Some(sink);
                self.offset = start_at;
                true
            }
            Err(e) => {
                tracing::warn!("{e}");
                self.duration = None;
                false
            }
        }
    }
}

impl AudioOutput for RodioOutput {
    fn set_source(&mut self, source: &str) {
        let path = source_path(source);
        tracing::debug!(path = %path.display(), "loading source");

        self.path = Some(path.clone());
        self.duration = None;
        self.paused = true;
        self.ended = false;

        if self.restart(Duration::ZERO) {
            self.duration = probe_duration(&path);
            if self.duration.is_none() {
                tracing::debug!(path = %path.display(), "source length unknown");
            }
        }
    }

    fn play(&mut self) {
        self.paused = false;
        if self.ended {
            // Playing an ended source starts it over.
            self.ended = false;
            self.restart(Duration::ZERO);
        }
        match &self.sink {
            Some(sink) => sink.play(),
            None => self.paused = true,
        }
    }

    fn pause(&mut self) {
        if let Some(sink) = &self.sink {
            sink.pause();
        }
        self.paused = true;
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn current_time(&self) -> f64 {
        self.sink
            .as_ref()
            .map_or(Duration::ZERO, |sink| self.offset + sink.get_pos())
            .as_secs_f64()
    }

    fn set_current_time(&mut self, secs: f64) {
        if self.sink.is_none() {
            return;
        }
        let target = Duration::from_secs_f64(secs.max(0.0));
        self.ended = false;
        if self.restart(target) {
            self.events.push(MediaEvent::TimeUpdate);
        }
    }

    fn duration(&self) -> Option<f64> {
        self.duration.map(|d| d.as_secs_f64())
    }

    fn looping(&self) -> bool {
        self.looping
    }

    fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }

    fn volume(&self) -> f32 {
        self.volume
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        if let Some(sink) = &self.sink {
            sink.set_volume(self.effective_volume());
        }
    }

    fn muted(&self) -> bool {
        self.muted
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        if let Some(sink) = &self.sink {
            sink.set_volume(self.effective_volume());
        }
    }

    fn poll_events(&mut self) -> Vec<MediaEvent> {
        let sink_empty = self.sink.as_ref().map(Sink::empty);
        match drain_action(sink_empty, self.paused, self.looping, self.ended) {
            Some(DrainAction::Restart) => {
                self.restart(Duration::ZERO);
                self.events.push(MediaEvent::TimeUpdate);
            }
            Some(DrainAction::End) => {
                self.ended = true;
                self.paused = true;
                self.events.push(MediaEvent::Ended);
            }
            Some(DrainAction::Tick) => self.events.push(MediaEvent::TimeUpdate),
            None => {}
        }

        std::mem::take(&mut self.events)
    }
}
