//! Audio subsystem: the playback handle and the device it drives.

mod handle;
mod output;
mod types;

pub use handle::PlaybackHandle;
pub use output::{AudioOutput, OutputFactory, RodioOutput};
pub use types::{AudioError, HandleState};

#[cfg(test)]
pub(crate) mod fake;
