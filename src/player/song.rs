/// A playable track as supplied by the playlist owner.
///
/// Songs are shared as `Arc<Song>`; the controller compares them by pointer,
/// so two separately built but equal songs still count as a track change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Song {
    pub name: String,
    pub artist: String,
    /// Audio location handed to `AudioOutput::set_source`.
    pub source: String,
    /// Cover image location, if the track has one.
    pub cover: Option<String>,
}
