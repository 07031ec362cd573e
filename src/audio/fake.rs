//! In-memory `AudioOutput` used by unit tests across the crate.

use std::cell::RefCell;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Duration;

use super::output::AudioOutput;
use super::types::AudioError;

/// Everything the fake saw, shared with the test that built it.
#[derive(Debug, Default)]
pub(crate) struct FakeLog {
    pub loads: Vec<PathBuf>,
    pub starts: usize,
    pub last_looping: Option<bool>,
    pub stops: usize,
    pub resets: usize,
    pub releases: usize,
    pub position: Duration,
    /// Simulates a non-looping track that ran out.
    pub finished: bool,
}

pub(crate) struct FakeOutput {
    log: Rc<RefCell<FakeLog>>,
    failing: HashSet<String>,
    loaded: bool,
    running: bool,
}

impl FakeOutput {
    pub fn new() -> (Self, Rc<RefCell<FakeLog>>) {
        let log = Rc::new(RefCell::new(FakeLog::default()));
        (
            Self {
                log: log.clone(),
                failing: HashSet::new(),
                loaded: false,
                running: false,
            },
            log,
        )
    }

    /// Make `load` fail for files with this name.
    pub fn failing_on(mut self, file_name: &str) -> Self {
        self.failing.insert(file_name.to_string());
        self
    }
}

impl AudioOutput for FakeOutput {
    fn load(&mut self, path: &Path) -> Result<(), AudioError> {
        self.log.borrow_mut().loads.push(path.to_path_buf());
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        if self.failing.contains(&name) {
            return Err(AudioError::Decode {
                path: path.to_path_buf(),
                reason: "unsupported format".to_string(),
            });
        }
        self.loaded = true;
        Ok(())
    }

    fn start(&mut self, looping: bool) {
        let mut log = self.log.borrow_mut();
        log.starts += 1;
        log.last_looping = Some(looping);
        log.finished = false;
        self.running = self.loaded;
    }

    fn stop(&mut self) {
        self.log.borrow_mut().stops += 1;
        self.running = false;
        self.loaded = false;
    }

    fn reset(&mut self) {
        self.log.borrow_mut().resets += 1;
        self.running = false;
        self.loaded = false;
    }

    fn is_active(&self) -> bool {
        self.running && !self.log.borrow().finished
    }

    fn position(&self) -> Duration {
        self.log.borrow().position
    }

    fn release(&mut self) {
        self.log.borrow_mut().releases += 1;
        self.running = false;
        self.loaded = false;
    }
}
