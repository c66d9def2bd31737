//! Music folder scanning: turns audio files into `Song`s for the playlist.

mod scan;

pub use scan::*;

#[cfg(test)]
mod tests;
