//! The audio output seam.
//!
//! `PlaybackController` owns exactly one `AudioOutput` for its lifetime. The
//! production implementation lives in `crate::audio`; tests use a fake.

/// Notifications raised by the media clock of an `AudioOutput`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MediaEvent {
    /// The playback position moved.
    TimeUpdate,
    /// The source played to its end and is not looping.
    Ended,
}

/// A single-source audio output modelled after a media element.
///
/// Times are in seconds. `duration()` is `None` until the source's metadata is
/// known (or when the source failed to load).
pub trait AudioOutput {
    /// Replace the current source. Playback does not start until `play`.
    fn set_source(&mut self, source: &str);
    fn play(&mut self);
    fn pause(&mut self);
    fn is_paused(&self) -> bool;

    fn current_time(&self) -> f64;
    fn set_current_time(&mut self, secs: f64);
    fn duration(&self) -> Option<f64>;

    /// Whether the source restarts on its own when it reaches the end.
    fn looping(&self) -> bool;
    fn set_looping(&mut self, looping: bool);

    /// Volume in `0.0..=1.0`.
    fn volume(&self) -> f32;
    fn set_volume(&mut self, volume: f32);
    fn muted(&self) -> bool;
    fn set_muted(&mut self, muted: bool);

    /// Drain the media-clock events raised since the previous call.
    fn poll_events(&mut self) -> Vec<MediaEvent>;
}
