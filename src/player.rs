//! Now-playing core: playback state machine, time labels, thumbnail
//! transitions and the volume slider adapter.
//!
//! Nothing in here renders or touches a device directly. The audio output and
//! the thumbnail fetch are reached through the `AudioOutput` and
//! `ThumbnailFetcher` seams.

mod controller;
mod output;
mod song;
mod thumbnails;
mod time;
mod volume;

pub use controller::*;
pub use output::*;
pub use song::*;
pub use thumbnails::*;
pub use time::*;
pub use volume::*;
