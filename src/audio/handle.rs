use std::path::Path;
use std::time::Duration;

use tracing::{debug, warn};

use super::output::AudioOutput;
use super::types::{AudioError, HandleState};

/// The one audio resource owned by the playback controller.
///
/// Mirrors a media-player object: `prepare` loads a file, `start` plays it,
/// `stop` and `reset` return to `Idle`, and `release` frees the device for good.
pub struct PlaybackHandle {
    output: Box<dyn AudioOutput>,
    state: HandleState,
    looping: bool,
    released: bool,
}

impl PlaybackHandle {
    pub fn new(output: Box<dyn AudioOutput>) -> Self {
        Self {
            output,
            state: HandleState::Idle,
            looping: false,
            released: false,
        }
    }

    pub fn state(&self) -> HandleState {
        self.state
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    /// True while started and still producing audio. A non-looping track
    /// that ran out is no longer playing even though `state` is `Playing`.
    pub fn is_playing(&self) -> bool {
        self.state == HandleState::Playing && self.output.is_active()
    }

    /// Load `path`. On failure the handle is reset and stays `Idle`.
    pub fn prepare(&mut self, path: &Path) -> Result<(), AudioError> {
        if self.released {
            return Err(AudioError::Released);
        }
        if self.state != HandleState::Idle {
            self.reset();
        }

        match self.output.load(path) {
            Ok(()) => {
                self.state = HandleState::Prepared;
                Ok(())
            }
            Err(e) => {
                self.output.reset();
                Err(e)
            }
        }
    }

    pub fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }

    pub fn start(&mut self) {
        if self.state != HandleState::Prepared {
            warn!(state = ?self.state, "start ignored: nothing prepared");
            return;
        }
        self.output.start(self.looping);
        self.state = HandleState::Playing;
    }

    /// Halt playback. A stopped handle has to be prepared again.
    pub fn stop(&mut self) {
        if self.state == HandleState::Playing {
            self.output.stop();
            self.state = HandleState::Idle;
        }
    }

    pub fn reset(&mut self) {
        if self.released {
            return;
        }
        self.output.reset();
        self.state = HandleState::Idle;
    }

    /// Elapsed time in the current track, zero unless playing.
    pub fn position(&self) -> Duration {
        if self.state == HandleState::Playing {
            self.output.position()
        } else {
            Duration::ZERO
        }
    }

    /// Free the output. Returns false when it was already released.
    pub fn release(&mut self) -> bool {
        if self.released {
            return false;
        }
        self.output.release();
        self.released = true;
        self.state = HandleState::Idle;
        debug!("playback handle released");
        true
    }
}
