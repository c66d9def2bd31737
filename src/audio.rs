//! `rodio`-backed implementation of the player's `AudioOutput`.
//!
//! One `RodioOutput` wraps the default output stream and at most one `Sink`
//! for the current source. Seeking and hardware-level looping both rebuild
//! the sink and skip into the file.

mod error;
mod output;
mod sink;

pub use error::OutputError;
pub use output::RodioOutput;

#[cfg(test)]
mod tests;
