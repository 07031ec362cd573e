//! The audio device seam.
//!
//! `AudioOutput` is what the playback handle drives. `RodioOutput` is the
//! real implementation; tests swap in a fake.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, Source};

use super::types::AudioError;

pub trait AudioOutput {
    /// Open and decode `path` so that `start` can begin immediately.
    fn load(&mut self, path: &Path) -> Result<(), AudioError>;
    /// Begin playing whatever `load` prepared.
    fn start(&mut self, looping: bool);
    /// Halt output. The loaded track is discarded.
    fn stop(&mut self);
    /// Drop any loaded or playing track.
    fn reset(&mut self);
    /// True while samples are being produced.
    fn is_active(&self) -> bool;
    /// Position within the current track.
    fn position(&self) -> Duration;
    /// Free the device. Called at most once.
    fn release(&mut self);
}

/// Opens a fresh output each time the playback service starts.
pub type OutputFactory = Box<dyn Fn() -> Result<Box<dyn AudioOutput>, AudioError>>;

/// `rodio`-backed output on the default device.
pub struct RodioOutput {
    stream: Option<OutputStream>,
    pending: Option<Decoder<BufReader<File>>>,
    sink: Option<Sink>,
}

impl RodioOutput {
    pub fn open_default() -> Result<Self, AudioError> {
        let mut stream = OutputStreamBuilder::open_default_stream()
            .map_err(|e| AudioError::Device(e.to_string()))?;
        // rodio logs to stderr when OutputStream is dropped, which would
        // scribble over the TUI.
        stream.log_on_drop(false);

        Ok(Self {
            stream: Some(stream),
            pending: None,
            sink: None,
        })
    }

    /// Factory used by the service host in production.
    pub fn factory() -> OutputFactory {
        Box::new(|| Ok(Box::new(RodioOutput::open_default()?) as Box<dyn AudioOutput>))
    }
}

impl AudioOutput for RodioOutput {
    fn load(&mut self, path: &Path) -> Result<(), AudioError> {
        if self.stream.is_none() {
            return Err(AudioError::Released);
        }

        let file = File::open(path).map_err(|source| AudioError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let decoder = Decoder::new(BufReader::new(file)).map_err(|e| AudioError::Decode {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        self.sink = None;
        self.pending = Some(decoder);
        Ok(())
    }

    fn start(&mut self, looping: bool) {
        let (Some(stream), Some(decoder)) = (self.stream.as_ref(), self.pending.take()) else {
            return;
        };

        let sink = Sink::connect_new(stream.mixer());
        if looping {
            sink.append(decoder.repeat_infinite());
        } else {
            sink.append(decoder);
        }
        sink.play();
        self.sink = Some(sink);
    }

    fn stop(&mut self) {
        if let Some(s) = self.sink.as_ref() {
            s.stop();
        }
        self.pending = None;
    }

    fn reset(&mut self) {
        self.sink = None;
        self.pending = None;
    }

    fn is_active(&self) -> bool {
        self.sink
            .as_ref()
            .is_some_and(|s| !s.is_paused() && !s.empty())
    }

    fn position(&self) -> Duration {
        self.sink
            .as_ref()
            .map(|s| s.get_pos())
            .unwrap_or(Duration::ZERO)
    }

    fn release(&mut self) {
        self.reset();
        self.stream = None;
    }
}
