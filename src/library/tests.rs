use super::scan::{find_cover, is_audio_file};
use super::*;
use crate::config::LibrarySettings;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn cover_names() -> Vec<String> {
    vec!["cover.jpg".to_string(), "folder.png".to_string()]
}

#[test]
fn is_audio_file_matches_configured_extensions_case_insensitive() {
    let settings = LibrarySettings::default();
    assert!(is_audio_file(Path::new("/tmp/a.mp3"), &settings));
    assert!(is_audio_file(Path::new("/tmp/a.MP3"), &settings));
    assert!(is_audio_file(Path::new("/tmp/a.flac"), &settings));
    assert!(!is_audio_file(Path::new("/tmp/a.txt"), &settings));
    assert!(!is_audio_file(Path::new("/tmp/a"), &settings));
}

#[test]
fn scan_filters_non_audio_and_sorts_by_name() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("b.MP3"), b"not a real mp3").unwrap();
    fs::write(dir.path().join("A.ogg"), b"not a real ogg").unwrap();
    fs::write(dir.path().join("c.txt"), b"ignore me").unwrap();

    let songs = scan(dir.path(), &LibrarySettings::default(), &cover_names());
    assert_eq!(songs.len(), 2);
    assert_eq!(songs[0].name, "A");
    assert_eq!(songs[1].name, "b");
    assert_eq!(songs[0].artist, "");
    assert!(songs[0].source.ends_with("A.ogg"));
}

#[test]
fn scan_attaches_cover_from_track_folder() {
    let dir = tempdir().unwrap();
    let album = dir.path().join("album");
    fs::create_dir_all(&album).unwrap();
    fs::write(album.join("track.mp3"), b"not real").unwrap();
    fs::write(album.join("folder.png"), b"png").unwrap();
    fs::write(dir.path().join("loose.mp3"), b"not real").unwrap();

    let songs = scan(dir.path(), &LibrarySettings::default(), &cover_names());
    let track = songs.iter().find(|s| s.name == "track").unwrap();
    let loose = songs.iter().find(|s| s.name == "loose").unwrap();
    assert!(track.cover.as_deref().unwrap().ends_with("folder.png"));
    assert_eq!(loose.cover, None);
}

#[test]
fn find_cover_respects_name_priority() {
    let dir = tempdir().unwrap();
    let track = dir.path().join("t.mp3");
    fs::write(dir.path().join("cover.jpg"), b"jpg").unwrap();
    fs::write(dir.path().join("folder.png"), b"png").unwrap();

    let cover = find_cover(&track, &cover_names()).unwrap();
    assert!(cover.ends_with("cover.jpg"));
    assert_eq!(find_cover(&track, &[]), None);
}

#[test]
fn scan_respects_include_hidden_false() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join(".hidden.mp3"), b"not real").unwrap();
    fs::write(dir.path().join("visible.mp3"), b"not real").unwrap();

    let settings = LibrarySettings {
        include_hidden: false,
        ..LibrarySettings::default()
    };
    let songs = scan(dir.path(), &settings, &cover_names());
    assert_eq!(songs.len(), 1);
    assert_eq!(songs[0].name, "visible");
}

#[test]
fn scan_respects_recursive_false() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("root.mp3"), b"not real").unwrap();
    let sub = dir.path().join("sub");
    fs::create_dir_all(&sub).unwrap();
    fs::write(sub.join("child.mp3"), b"not real").unwrap();

    let settings = LibrarySettings {
        recursive: false,
        ..LibrarySettings::default()
    };
    let songs = scan(dir.path(), &settings, &cover_names());
    assert_eq!(songs.len(), 1);
    assert_eq!(songs[0].name, "root");
}
