use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/cadenza/config.toml` or `~/.config/cadenza/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `CADENZA__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub site: SiteSettings,
    pub playback: PlaybackSettings,
    pub thumbnails: ThumbnailSettings,
    pub library: LibrarySettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteSettings {
    /// Cover shown before anything plays, for songs without a cover and
    /// when a cover cannot be loaded.
    pub default_thumbnail: String,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            default_thumbnail: "assets/default-cover.png".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Whether the current track repeats on its own when it ends.
    pub looping: bool,
    /// Output volume at start-up, `0.0..=1.0`.
    pub initial_volume: f32,
    /// How often the media clock is polled (milliseconds).
    pub tick_ms: u64,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            looping: true,
            initial_volume: 1.0,
            tick_ms: 250,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ThumbnailSettings {
    /// How long a replaced cover stays on screen (milliseconds).
    pub residency_ms: u64,
    /// File names looked up next to a track, in order, to find its cover.
    pub cover_names: Vec<String>,
}

impl Default for ThumbnailSettings {
    fn default() -> Self {
        Self {
            residency_ms: 1000,
            cover_names: vec![
                "cover.jpg".into(),
                "cover.png".into(),
                "folder.jpg".into(),
                "folder.png".into(),
            ],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// File extensions to treat as audio (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether to follow symlinks during scanning.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
    /// Whether to recurse into subdirectories.
    pub recursive: bool,
    /// Optional cap on directory recursion depth.
    pub max_depth: Option<usize>,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            extensions: vec!["mp3".into(), "flac".into(), "wav".into(), "ogg".into()],
            follow_links: true,
            include_hidden: true,
            recursive: true,
            max_depth: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// `tracing` filter directive; `CADENZA_LOG` overrides it.
    pub filter: String,
    /// Log file. Defaults to `$XDG_STATE_HOME/cadenza/cadenza.log`.
    pub file: Option<PathBuf>,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            file: None,
        }
    }
}
