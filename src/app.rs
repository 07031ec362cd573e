//! Application module: the foreground view model driven by the runtime.
//!
//! The `App` model lives in `app::model`. It holds the connection to the
//! playback service, the now-playing label and the elapsed-time text.

mod model;
mod poll;

pub use model::*;
pub use poll::PollTimer;
