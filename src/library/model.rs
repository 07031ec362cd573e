use std::path::PathBuf;
use std::time::Duration;

/// One playable file from the music directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Track {
    /// Identifier shown as the now-playing label: the path relative to the
    /// music directory.
    pub id: String,
    pub path: PathBuf,
    /// Title tag, or the id until [`load_tags`](super::load_tags) finds one.
    pub title: String,
    /// Length from the file's tags. `None` until tags are loaded.
    pub duration: Option<Duration>,
}
