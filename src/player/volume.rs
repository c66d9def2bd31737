//! Adapter between a vertical volume slider and the audio output.
//!
//! The slider runs `0..=100` top to bottom with the top meaning full volume,
//! so slider values are the inverse of the output volume.

use super::output::AudioOutput;

/// Initial configuration handed to the (vertical) slider widget.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SliderConfig {
    pub min: f64,
    pub max: f64,
    pub value: f64,
}

pub const SLIDER_MAX: f64 = 100.0;

/// Slider configuration matching `volume` (`0.0..=1.0`).
pub fn slider_config(volume: f32) -> SliderConfig {
    SliderConfig {
        min: 0.0,
        max: SLIDER_MAX,
        value: (1.0 - f64::from(volume)) * SLIDER_MAX,
    }
}

/// Output volume for a slider `value`.
pub fn volume_for(value: f64) -> f32 {
    (1.0 - value.clamp(0.0, SLIDER_MAX) / SLIDER_MAX) as f32
}

/// Drag callback: apply the slider `value` and unmute.
pub fn on_drag<O: AudioOutput + ?Sized>(audio: &mut O, value: f64) {
    audio.set_volume(volume_for(value));
    audio.set_muted(false);
}
