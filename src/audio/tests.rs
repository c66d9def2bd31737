use std::path::PathBuf;

use super::output::{DrainAction, drain_action};
use super::sink::{probe_duration, source_path};

#[test]
fn source_path_accepts_file_urls_and_plain_paths() {
    assert_eq!(
        source_path("file:///music/a.mp3"),
        PathBuf::from("/music/a.mp3")
    );
    assert_eq!(source_path("/music/b.ogg"), PathBuf::from("/music/b.ogg"));
    assert_eq!(source_path("relative.flac"), PathBuf::from("relative.flac"));
}

#[test]
fn probe_duration_is_unknown_for_missing_or_garbage_files() {
    let dir = tempfile::tempdir().unwrap();
    let garbage = dir.path().join("noise.mp3");
    std::fs::write(&garbage, b"definitely not audio").unwrap();

    assert_eq!(probe_duration(&garbage), None);
    assert_eq!(probe_duration(&dir.path().join("missing.mp3")), None);
}

#[test]
fn drained_looping_source_restarts_without_ending() {
    assert_eq!(
        drain_action(Some(true), false, true, false),
        Some(DrainAction::Restart)
    );
}

#[test]
fn drained_source_ends_exactly_once() {
    assert_eq!(
        drain_action(Some(true), false, false, false),
        Some(DrainAction::End)
    );
    // After `End` the output is marked ended and paused.
    assert_eq!(drain_action(Some(true), true, false, true), None);
    assert_eq!(drain_action(Some(true), false, false, true), None);
}

#[test]
fn playing_source_reports_position() {
    assert_eq!(
        drain_action(Some(false), false, false, false),
        Some(DrainAction::Tick)
    );
    assert_eq!(
        drain_action(Some(false), false, true, false),
        Some(DrainAction::Tick)
    );
}

#[test]
fn paused_or_missing_sink_is_silent() {
    assert_eq!(drain_action(Some(false), true, true, false), None);
    assert_eq!(drain_action(Some(true), true, true, false), None);
    assert_eq!(drain_action(Some(true), true, false, false), None);
    assert_eq!(drain_action(None, false, false, false), None);
}
