use std::cell::RefCell;
use std::rc::Rc;

use super::testing::fake_host as host;
use super::*;
use crate::config::LibrarySettings;

#[derive(Default)]
struct Recorder {
    labels: RefCell<Vec<String>>,
}

impl NowPlayingListener for Recorder {
    fn now_playing_changed(&self, label: &str) {
        self.labels.borrow_mut().push(label.to_string());
    }
}

#[test]
fn bind_requires_a_running_service() {
    let (_dir, mut host, logs) = host(&["a.mp3"]);
    assert!(!host.is_running());
    assert!(host.bind().is_none());

    host.start().unwrap();
    host.start().unwrap();
    assert!(host.is_running());
    assert!(host.bind().is_some());
    assert_eq!(logs.borrow().len(), 1, "start is idempotent");
}

#[test]
fn binder_drives_the_controller() {
    let (_dir, mut host, _logs) = host(&["a.mp3"]);
    host.start().unwrap();
    let binder = host.bind().unwrap();

    assert_eq!(binder.play(), Some(PlayOutcome::Started("a.mp3".to_string())));
    assert_eq!(binder.label(), "a.mp3");
    assert!(binder.position().is_some());
    assert!(binder.stop());
    assert_eq!(binder.label(), "");
    assert_eq!(host.with_controller(|c| c.label().to_string()), Some(String::new()));
}

#[test]
fn binder_refresh_clears_a_finished_track() {
    let (_dir, mut host, logs) = host(&["a.mp3"]);
    host.start().unwrap();
    let binder = host.bind().unwrap();
    let rec = Rc::new(Recorder::default());
    binder.subscribe(rec.clone());

    binder.play();
    assert!(!binder.refresh());
    logs.borrow()[0].borrow_mut().finished = true;
    assert!(binder.refresh());
    assert_eq!(binder.label(), "");
    assert_eq!(*rec.labels.borrow(), vec!["a.mp3".to_string(), String::new()]);

    host.stop();
    assert!(!binder.refresh());
}

#[test]
fn playback_survives_dropping_every_binder() {
    let (_dir, mut host, _logs) = host(&["a.mp3"]);
    host.start().unwrap();
    host.bind().unwrap().play();

    assert_eq!(host.with_controller(|c| c.is_playing()), Some(true));
    let again = host.bind().unwrap();
    assert_eq!(again.label(), "a.mp3");
}

#[test]
fn stopping_the_service_releases_once_and_orphans_binders() {
    let (_dir, mut host, logs) = host(&["a.mp3"]);
    let notifier = Rc::new(Recorder::default());
    host.add_notifier(notifier.clone());
    host.start().unwrap();

    let binder = host.bind().unwrap();
    binder.play();
    host.stop();

    assert!(!binder.is_alive());
    assert_eq!(binder.play(), None);
    assert!(!binder.stop());
    assert_eq!(binder.label(), "");
    assert_eq!(logs.borrow()[0].borrow().releases, 1);
    assert_eq!(
        *notifier.labels.borrow(),
        vec!["a.mp3".to_string(), String::new()]
    );
}

#[test]
fn restart_builds_a_fresh_controller_with_notifiers() {
    let (_dir, mut host, logs) = host(&["a.mp3"]);
    let notifier = Rc::new(Recorder::default());
    host.add_notifier(notifier.clone());

    host.start().unwrap();
    host.stop();
    host.start().unwrap();
    host.bind().unwrap().play();

    assert_eq!(logs.borrow().len(), 2);
    assert_eq!(*notifier.labels.borrow(), vec!["a.mp3".to_string()]);
}

#[test]
fn device_failure_keeps_the_service_stopped() {
    let dir = tempfile::tempdir().unwrap();
    let factory: OutputFactory = Box::new(|| Err(AudioError::Device("no device".into())));
    let mut host = ServiceHost::new(
        Catalog::new(dir.path(), LibrarySettings::default()),
        PlaybackSettings::default(),
        factory,
    );

    assert!(matches!(host.start(), Err(AudioError::Device(_))));
    assert!(!host.is_running());
}
