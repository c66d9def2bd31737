use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("no audio output device: {0}")]
    Device(#[from] rodio::StreamError),
    #[error("failed to open {path:?}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to decode {path:?}: {source}")]
    Decode {
        path: PathBuf,
        source: rodio::decoder::DecoderError,
    },
}
