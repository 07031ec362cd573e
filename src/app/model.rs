//! Application model types: `App` and the label view it subscribes.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::audio::AudioError;
use crate::controller::{ListenerId, NowPlayingListener};
use crate::service::{Binder, ServiceHost};

use super::poll::PollTimer;

pub const ZERO_PROGRESS: &str = "00:00";

/// Format a `Duration` as `MM:SS`.
pub fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// The label as last announced by the controller.
#[derive(Debug, Default)]
pub struct LabelView {
    text: RefCell<String>,
}

impl LabelView {
    pub fn text(&self) -> String {
        self.text.borrow().clone()
    }

    fn set(&self, label: &str) {
        let mut text = self.text.borrow_mut();
        text.clear();
        text.push_str(label);
    }
}

impl NowPlayingListener for LabelView {
    fn now_playing_changed(&self, label: &str) {
        self.set(label);
    }
}

/// The foreground view model.
pub struct App {
    pub header_text: String,
    pub music_dir: String,
    label: Rc<LabelView>,
    progress: String,
    total: Option<Duration>,
    binder: Option<Binder>,
    subscription: Option<ListenerId>,
    poll: PollTimer,
}

impl App {
    pub fn new(header_text: String, music_dir: String, poll_interval: Duration) -> Self {
        Self {
            header_text,
            music_dir,
            label: Rc::new(LabelView::default()),
            progress: ZERO_PROGRESS.to_string(),
            total: None,
            binder: None,
            subscription: None,
            poll: PollTimer::new(poll_interval),
        }
    }

    pub fn label(&self) -> String {
        self.label.text()
    }

    pub fn progress(&self) -> &str {
        &self.progress
    }

    /// Total length of the current track, when known.
    pub fn total(&self) -> Option<Duration> {
        self.total
    }

    pub fn is_attached(&self) -> bool {
        self.binder.is_some()
    }

    pub fn is_polling(&self) -> bool {
        self.poll.is_armed()
    }

    /// Connect to the service if it runs. Returns whether the view is attached.
    pub fn attach(&mut self, host: &ServiceHost, now: Instant) -> bool {
        if self.binder.is_some() {
            return true;
        }
        let Some(binder) = host.bind() else {
            debug!("attach skipped: service not running");
            return false;
        };

        self.subscription = binder.subscribe(self.label.clone());
        // The label may have changed while detached.
        self.label.set(&binder.label());
        self.poll.start(now);
        self.binder = Some(binder);
        debug!("view attached");
        true
    }

    /// Disconnect from the service. Playback is not affected.
    pub fn detach(&mut self) {
        if let Some(binder) = self.binder.take() {
            if let Some(id) = self.subscription.take() {
                binder.unsubscribe(id);
            }
            debug!("view detached");
        }
        self.subscription = None;
        self.poll.cancel();
    }

    pub fn play(&self) {
        if let Some(binder) = &self.binder {
            let outcome = binder.play();
            debug!(?outcome, "play");
        }
    }

    pub fn stop(&self) {
        if let Some(binder) = &self.binder {
            binder.stop();
        }
    }

    /// Start the service if needed, then attach to it.
    pub fn start_service(&mut self, host: &mut ServiceHost, now: Instant) -> Result<(), AudioError> {
        host.start()?;
        self.attach(host, now);
        Ok(())
    }

    /// Detach, stop the service and reset the view.
    pub fn stop_service(&mut self, host: &mut ServiceHost) {
        self.detach();
        host.stop();
        self.label.set("");
        self.progress = ZERO_PROGRESS.to_string();
        self.total = None;
        info!("service stopped from the view");
    }

    /// Refresh elapsed time when the poll timer is due. Returns true when it fired.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(binder) = &self.binder else {
            return false;
        };
        if !self.poll.fire_if_due(now) {
            return false;
        }

        if let Some(pos) = binder.position() {
            self.progress = format_mmss(pos);
            self.total = binder.track_duration();
        }
        true
    }

    /// How long the event loop may wait before the next `tick` is due.
    pub fn next_tick_in(&self, now: Instant) -> Option<Duration> {
        self.poll.time_until_due(now)
    }
}
