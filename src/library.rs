//! Track catalog: the list of playable files under the music directory.
//!
//! The catalog never caches. Every call to [`Catalog::tracks`] walks the
//! directory again, so files added while the player runs are picked up on
//! the next `play`.

use std::path::{Path, PathBuf};

use crate::config::LibrarySettings;

mod model;
mod scan;

pub use model::Track;
pub use scan::{load_tags, scan};

/// Read-only view over a music directory filtered by the configured extensions.
#[derive(Clone, Debug)]
pub struct Catalog {
    dir: PathBuf,
    settings: LibrarySettings,
}

impl Catalog {
    pub fn new(dir: impl Into<PathBuf>, settings: LibrarySettings) -> Self {
        Self {
            dir: dir.into(),
            settings,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Scan the directory and return the tracks, ordered by id.
    pub fn tracks(&self) -> Vec<Track> {
        scan(&self.dir, &self.settings)
    }
}

#[cfg(test)]
pub(crate) mod fixtures;
