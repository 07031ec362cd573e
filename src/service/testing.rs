//! Test fixture: a service host backed by fake outputs over a temp music dir.

use std::cell::RefCell;
use std::fs;
use std::rc::Rc;

use tempfile::TempDir;

use super::ServiceHost;
use crate::audio::fake::{FakeLog, FakeOutput};
use crate::audio::{AudioOutput, OutputFactory};
use crate::config::{LibrarySettings, PlaybackSettings};
use crate::library::Catalog;

/// Logs of every output the host opened, oldest first.
pub(crate) type OutputLogs = Rc<RefCell<Vec<Rc<RefCell<FakeLog>>>>>;

pub(crate) fn fake_host(files: &[&str]) -> (TempDir, ServiceHost, OutputLogs) {
    let dir = tempfile::tempdir().unwrap();
    for f in files {
        fs::write(dir.path().join(f), b"not real audio").unwrap();
    }

    let logs: OutputLogs = Rc::new(RefCell::new(Vec::new()));
    let logs_for_factory = logs.clone();
    let factory: OutputFactory = Box::new(move || {
        let (out, log) = FakeOutput::new();
        logs_for_factory.borrow_mut().push(log);
        Ok(Box::new(out) as Box<dyn AudioOutput>)
    });

    let host = ServiceHost::new(
        Catalog::new(dir.path(), LibrarySettings::default()),
        PlaybackSettings::default(),
        factory,
    );
    (dir, host, logs)
}
