use std::borrow::Cow;
use std::path::Path;
use std::sync::Arc;

use lofty::prelude::{Accessor, TaggedFileExt};
use walkdir::WalkDir;

use crate::config::LibrarySettings;
use crate::player::Song;

pub(crate) fn is_audio_file(path: &Path, settings: &LibrarySettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// First of `cover_names` present next to `track`, as a path string.
pub(crate) fn find_cover(track: &Path, cover_names: &[String]) -> Option<String> {
    let dir = track.parent()?;
    cover_names
        .iter()
        .map(|name| dir.join(name))
        .find(|candidate| candidate.is_file())
        .map(|p| p.display().to_string())
}

fn read_tags(path: &Path) -> (Option<String>, Option<String>) {
    let Ok(tagged) = lofty::read_from_path(path) else {
        return (None, None);
    };
    let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) else {
        return (None, None);
    };

    (non_empty(tag.title()), non_empty(tag.artist()))
}

fn non_empty(value: Option<Cow<'_, str>>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Scan `dir` for audio files and build songs sorted by artist, then name.
pub fn scan(dir: &Path, settings: &LibrarySettings, cover_names: &[String]) -> Vec<Arc<Song>> {
    let mut songs: Vec<Song> = Vec::new();

    let mut walker = WalkDir::new(dir).follow_links(settings.follow_links);

    // Non-recursive = only the root directory.
    let depth_cap = if settings.recursive {
        settings.max_depth
    } else {
        Some(1)
    };
    if let Some(d) = depth_cap {
        walker = walker.max_depth(d);
    }

    for entry in walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(Result::ok)
    {
        let path = entry.path();
        if !path.is_file() || !is_audio_file(path, settings) {
            continue;
        }

        let (title, artist) = read_tags(path);
        let name = title.unwrap_or_else(|| {
            path.file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("UNKNOWN")
                .to_string()
        });

        songs.push(Song {
            name,
            artist: artist.unwrap_or_default(),
            source: path.display().to_string(),
            cover: find_cover(path, cover_names),
        });
    }

    songs.sort_by_cached_key(|s| (s.artist.to_lowercase(), s.name.to_lowercase()));
    tracing::info!(dir = %dir.display(), count = songs.len(), "library scanned");
    songs.into_iter().map(Arc::new).collect()
}
