//! Application model: `App`, the playlist owner.

use std::sync::Arc;

use crate::player::{NextTrackSignal, Song};

/// The songs of the scanned folder plus cursor and now-playing positions.
pub struct App {
    pub songs: Vec<Arc<Song>>,
    /// Cursor in the track list.
    pub selected: usize,
    /// Index of the song handed to the player last.
    pub current: Option<usize>,
    pub current_dir: Option<String>,
}

impl App {
    /// Create a new `App` with the provided `songs`.
    pub fn new(songs: Vec<Arc<Song>>) -> Self {
        Self {
            songs,
            selected: 0,
            current: None,
            current_dir: None,
        }
    }

    /// Record the current directory in the app state.
    pub fn set_current_dir(&mut self, dir: String) {
        self.current_dir = Some(dir);
    }

    /// Return true if the library contains any songs.
    pub fn has_songs(&self) -> bool {
        !self.songs.is_empty()
    }

    /// Move selection to the next song, wrapping around.
    pub fn next(&mut self) {
        if self.has_songs() {
            self.selected = (self.selected + 1) % self.songs.len();
        }
    }

    /// Move selection to the previous song, wrapping around.
    pub fn prev(&mut self) {
        if self.has_songs() {
            self.selected = (self.selected + self.songs.len() - 1) % self.songs.len();
        }
    }

    /// Make the selected song current and return it.
    pub fn play_selected(&mut self) -> Option<Arc<Song>> {
        let song = self.songs.get(self.selected)?.clone();
        self.current = Some(self.selected);
        Some(song)
    }

    /// Answer a next-track request.
    ///
    /// Auto-advance (`0`) moves forward like `+1`. Steps wrap around the list;
    /// with nothing playing yet they count from the cursor. The cursor follows.
    pub fn advance(&mut self, signal: NextTrackSignal) -> Option<Arc<Song>> {
        if !self.has_songs() {
            return None;
        }
        let step = if signal.is_auto() {
            1
        } else {
            i64::from(signal.direction)
        };
        let len = self.songs.len() as i64;
        let base = self.current.unwrap_or(self.selected) as i64;
        let idx = (base + step).rem_euclid(len) as usize;

        self.current = Some(idx);
        self.selected = idx;
        Some(self.songs[idx].clone())
    }
}
