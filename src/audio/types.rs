//! Audio-related small types.
//!
//! This module defines the playback handle states and the error type shared
//! by the audio subsystem.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Lifecycle of the single playback handle.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum HandleState {
    /// Nothing loaded.
    #[default]
    Idle,
    /// A track is decoded and ready to start.
    Prepared,
    /// Output is running.
    Playing,
}

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("could not open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not decode {}: {reason}", path.display())]
    Decode { path: PathBuf, reason: String },

    #[error("audio output device error: {0}")]
    Device(String),

    #[error("playback handle already released")]
    Released,
}

impl AudioError {
    /// True for the failures that make the selected track unusable.
    pub fn is_track_unusable(&self) -> bool {
        matches!(self, Self::Open { .. } | Self::Decode { .. })
    }
}
