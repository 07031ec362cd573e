//! Playback service: keeps the controller alive independently of any view.
//!
//! The host owns the only strong reference to the controller. Views connect
//! through a [`Binder`], which holds a weak reference, so stopping the service
//! tears the controller down even while a view is still bound.

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;

use tracing::{debug, info};

use crate::audio::{AudioError, OutputFactory, PlaybackHandle};
use crate::config::PlaybackSettings;
use crate::controller::{ListenerId, NowPlayingListener, PlayOutcome, PlaybackController};
use crate::library::Catalog;

pub struct ServiceHost {
    catalog: Catalog,
    playback: PlaybackSettings,
    output_factory: OutputFactory,
    notifiers: Vec<Rc<dyn NowPlayingListener>>,
    controller: Option<Rc<RefCell<PlaybackController>>>,
}

impl ServiceHost {
    pub fn new(catalog: Catalog, playback: PlaybackSettings, output_factory: OutputFactory) -> Self {
        Self {
            catalog,
            playback,
            output_factory,
            notifiers: Vec::new(),
            controller: None,
        }
    }

    /// Register a listener that is subscribed for the whole lifetime of
    /// every controller this host starts.
    pub fn add_notifier(&mut self, notifier: Rc<dyn NowPlayingListener>) {
        self.notifiers.push(notifier);
    }

    pub fn is_running(&self) -> bool {
        self.controller.is_some()
    }

    /// Start the service. Does nothing when it is already running.
    pub fn start(&mut self) -> Result<(), AudioError> {
        if self.controller.is_some() {
            debug!("service already running");
            return Ok(());
        }

        let output = (self.output_factory)()?;
        let mut controller = PlaybackController::new(
            PlaybackHandle::new(output),
            self.catalog.clone(),
            self.playback.looping,
        );
        for notifier in &self.notifiers {
            controller.subscribe(notifier.clone());
        }

        self.controller = Some(Rc::new(RefCell::new(controller)));
        info!(dir = %self.catalog.dir().display(), "playback service started");
        Ok(())
    }

    /// Stop the service, releasing the playback handle.
    pub fn stop(&mut self) {
        if self.controller.take().is_some() {
            info!("playback service stopped");
        }
    }

    /// Connect to the running service, if any.
    pub fn bind(&self) -> Option<Binder> {
        self.controller.as_ref().map(|c| Binder {
            controller: Rc::downgrade(c),
        })
    }

    #[cfg(test)]
    pub(crate) fn with_controller<R>(&self, f: impl FnOnce(&PlaybackController) -> R) -> Option<R> {
        self.controller.as_ref().map(|c| f(&c.borrow()))
    }
}

/// A view's connection to the playback service.
///
/// Every call is a no-op once the service has stopped.
#[derive(Clone)]
pub struct Binder {
    controller: Weak<RefCell<PlaybackController>>,
}

impl Binder {
    pub fn is_alive(&self) -> bool {
        self.controller.strong_count() > 0
    }

    pub fn play(&self) -> Option<PlayOutcome> {
        self.controller.upgrade().map(|c| c.borrow_mut().play())
    }

    pub fn stop(&self) -> bool {
        self.controller
            .upgrade()
            .map(|c| c.borrow_mut().stop())
            .unwrap_or(false)
    }

    /// Clear the label of a track that ran out. False when disconnected.
    pub fn refresh(&self) -> bool {
        self.controller
            .upgrade()
            .map(|c| c.borrow_mut().refresh())
            .unwrap_or(false)
    }

    /// Current now-playing label, empty when stopped or disconnected.
    pub fn label(&self) -> String {
        self.controller
            .upgrade()
            .map(|c| c.borrow().label().to_string())
            .unwrap_or_default()
    }

    pub fn position(&self) -> Option<Duration> {
        self.controller.upgrade().and_then(|c| c.borrow().position())
    }

    /// Duration of the current track when its tags provided one.
    pub fn track_duration(&self) -> Option<Duration> {
        self.controller
            .upgrade()
            .and_then(|c| c.borrow().current_track().and_then(|t| t.duration))
    }

    pub fn subscribe(&self, listener: Rc<dyn NowPlayingListener>) -> Option<ListenerId> {
        self.controller
            .upgrade()
            .map(|c| c.borrow_mut().subscribe(listener))
    }

    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        self.controller
            .upgrade()
            .map(|c| c.borrow_mut().unsubscribe(id))
            .unwrap_or(false)
    }
}

#[cfg(test)]
pub(crate) mod testing;

#[cfg(test)]
mod tests;
