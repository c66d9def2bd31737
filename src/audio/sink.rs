//! Helpers for turning a source location into a ready `rodio::Sink`.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;

use lofty::prelude::AudioFile;
use rodio::{Decoder, OutputStream, Sink, Source};

use super::error::OutputError;

/// Map a song source (`file://` URL or plain path) to a filesystem path.
pub(super) fn source_path(source: &str) -> PathBuf {
    PathBuf::from(source.strip_prefix("file://").unwrap_or(source))
}

fn open_decoder(path: &Path) -> Result<Decoder<BufReader<File>>, OutputError> {
    let file = File::open(path).map_err(|source| OutputError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    Decoder::new(BufReader::new(file)).map_err(|source| OutputError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

/// Create a paused `Sink` for `path` that starts playback at `start_at`.
pub(super) fn create_sink_at(
    stream: &OutputStream,
    path: &Path,
    start_at: Duration,
) -> Result<Sink, OutputError> {
    // `skip_duration` is our seeking primitive; even Duration::ZERO is fine.
    let source = open_decoder(path)?.skip_duration(start_at);

    let sink = Sink::connect_new(stream.mixer());
    sink.append(source);
    sink.pause();
    Ok(sink)
}

/// Total length of the file at `path`, if the decoder or the tags know it.
pub(super) fn probe_duration(path: &Path) -> Option<Duration> {
    let from_decoder = open_decoder(path)
        .ok()
        .and_then(|decoder| decoder.total_duration());

    // Many mp3 streams have no length in the decoder; tags usually do.
    from_decoder
        .or_else(|| {
            lofty::read_from_path(path)
                .ok()
                .map(|tagged| tagged.properties().duration())
        })
        .filter(|d| !d.is_zero())
}
