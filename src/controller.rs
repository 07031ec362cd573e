//! Playback controller: owns the playback handle and the now-playing label.
//!
//! The controller is the only thing that mutates playback state. Views learn
//! about changes through [`NowPlayingListener`] announcements, which carry the
//! latest label only (an empty label means stopped).

use std::rc::Rc;
use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use tracing::{debug, info, warn};

use crate::audio::{HandleState, PlaybackHandle};
use crate::library::{self, Catalog, Track};

/// Receives the now-playing label whenever it changes.
pub trait NowPlayingListener {
    fn now_playing_changed(&self, label: &str);
}

/// Token returned by [`PlaybackController::subscribe`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// What a call to [`PlaybackController::play`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayOutcome {
    /// Playback started with this track id.
    Started(String),
    /// Something was already playing; nothing changed.
    AlreadyPlaying,
    /// The catalog is empty.
    NoTracks,
    /// The chosen track could not be opened or decoded.
    Unusable(String),
    /// The controller was torn down.
    Released,
}

pub struct PlaybackController {
    handle: PlaybackHandle,
    catalog: Catalog,
    looping: bool,
    rng: StdRng,
    label: String,
    current: Option<Track>,
    listeners: Vec<(ListenerId, Rc<dyn NowPlayingListener>)>,
    next_listener: u64,
    released: bool,
}

impl PlaybackController {
    pub fn new(handle: PlaybackHandle, catalog: Catalog, looping: bool) -> Self {
        Self::with_rng(handle, catalog, looping, StdRng::from_os_rng())
    }

    pub fn with_rng(handle: PlaybackHandle, catalog: Catalog, looping: bool, rng: StdRng) -> Self {
        Self {
            handle,
            catalog,
            looping,
            rng,
            label: String::new(),
            current: None,
            listeners: Vec::new(),
            next_listener: 0,
            released: false,
        }
    }

    /// Start a random track unless one is already playing.
    pub fn play(&mut self) -> PlayOutcome {
        if self.released {
            warn!("play called after the controller was released");
            return PlayOutcome::Released;
        }
        if self.handle.is_playing() {
            debug!(track = %self.label, "play ignored: already playing");
            return PlayOutcome::AlreadyPlaying;
        }

        let tracks = self.catalog.tracks();
        let Some(mut track) = tracks.choose(&mut self.rng).cloned() else {
            warn!(dir = %self.catalog.dir().display(), "no playable tracks found");
            return PlayOutcome::NoTracks;
        };

        if let Err(e) = self.handle.prepare(&track.path) {
            if e.is_track_unusable() {
                warn!(track = %track.id, error = %e, "could not open track");
            } else {
                warn!(track = %track.id, error = %e, "playback handle refused track");
            }
            return PlayOutcome::Unusable(track.id);
        }

        library::load_tags(&mut track);
        self.handle.set_looping(self.looping);
        self.handle.start();
        self.label = track.id.clone();
        info!(track = %self.label, title = %track.title, "playing");
        self.current = Some(track);

        self.announce();
        PlayOutcome::Started(self.label.clone())
    }

    /// Halt playback. Returns false when nothing was started.
    pub fn stop(&mut self) -> bool {
        if self.released {
            warn!("stop called after the controller was released");
            return false;
        }
        // A finished non-looping track still counts as started here so its
        // label gets cleared.
        if self.handle.state() != HandleState::Playing {
            return false;
        }

        self.halt();
        info!("stopped");
        true
    }

    /// Notice a non-looping track that ran out and clear its label.
    /// Returns true when that happened on this call.
    pub fn refresh(&mut self) -> bool {
        if self.released
            || self.handle.state() != HandleState::Playing
            || self.handle.is_playing()
        {
            return false;
        }

        info!(track = %self.label, "track finished");
        self.halt();
        true
    }

    fn halt(&mut self) {
        self.handle.stop();
        self.handle.reset();
        self.label.clear();
        self.current = None;
        self.announce();
    }

    pub fn is_playing(&self) -> bool {
        self.handle.is_playing()
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.current.as_ref()
    }

    /// Elapsed time while playing.
    pub fn position(&self) -> Option<Duration> {
        self.handle.is_playing().then(|| self.handle.position())
    }

    pub fn subscribe(&mut self, listener: Rc<dyn NowPlayingListener>) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, listener));
        id
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Stop playback and free the handle. Safe to call more than once.
    pub fn release(&mut self) {
        if self.released {
            return;
        }
        self.handle.stop();
        self.handle.release();
        self.released = true;
        self.current = None;

        if !self.label.is_empty() {
            self.label.clear();
            self.announce();
        }
    }

    fn announce(&self) {
        for (_, listener) in &self.listeners {
            listener.now_playing_changed(&self.label);
        }
    }
}

impl Drop for PlaybackController {
    fn drop(&mut self) {
        self.release();
    }
}
