use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{debug, warn};

use crate::app::App;
use crate::mpris::ControlCmd;
use crate::service::ServiceHost;
use crate::ui;

/// Upper bound on how long one iteration waits for input, so D-Bus commands
/// and label changes show up promptly.
const MAX_WAIT: Duration = Duration::from_millis(50);

/// Main terminal event loop: handles input, UI drawing, the elapsed-time poll
/// and MPRIS commands. Returns `Ok(())` when shutdown is requested.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut App,
    host: &mut ServiceHost,
    control_rx: &mpsc::Receiver<ControlCmd>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        refresh_playback(host);
        app.tick(Instant::now());

        let running = host.is_running();
        terminal.draw(|f| ui::draw(f, app, running))?;

        while let Ok(cmd) = control_rx.try_recv() {
            if handle_control_cmd(cmd, host) {
                return Ok(());
            }
        }

        let wait = app
            .next_tick_in(Instant::now())
            .map_or(MAX_WAIT, |d| d.min(MAX_WAIT));
        if event::poll(wait)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, app, host) {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Clear a finished track's label. Runs attached or not, so every listener
/// hears about it.
pub(super) fn refresh_playback(host: &ServiceHost) -> bool {
    host.bind().is_some_and(|binder| binder.refresh())
}

/// Commands from the session bus act on the service directly, attached view or not.
pub(super) fn handle_control_cmd(cmd: ControlCmd, host: &ServiceHost) -> bool {
    debug!(?cmd, "control command");
    match cmd {
        ControlCmd::Quit => return true,
        ControlCmd::Play => {
            if let Some(binder) = host.bind() {
                let outcome = binder.play();
                debug!(?outcome, "play from control command");
            }
        }
        ControlCmd::Stop => {
            if let Some(binder) = host.bind() {
                binder.stop();
            }
        }
    }
    false
}

/// Returns true when the user asked to quit.
pub(super) fn handle_key_event(key: KeyEvent, app: &mut App, host: &mut ServiceHost) -> bool {
    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('p') => app.play(),
        KeyCode::Char('s') => app.stop(),
        KeyCode::Char('S') => {
            if let Err(e) = app.start_service(host, Instant::now()) {
                warn!(error = %e, "could not start playback service");
            }
        }
        KeyCode::Char('X') => app.stop_service(host),
        KeyCode::Char('d') => {
            if app.is_attached() {
                app.detach();
            } else {
                app.attach(host, Instant::now());
            }
        }
        _ => {}
    }
    false
}
