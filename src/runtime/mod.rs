use std::env;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::mpsc;
use std::time::Duration;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{info, warn};

use crate::app::App;
use crate::audio::RodioOutput;
use crate::library::Catalog;
use crate::mpris::ControlCmd;
use crate::service::ServiceHost;

mod event_loop;
mod logging;
mod settings;
mod startup;


pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (settings, config_warning) = settings::load_settings();
    let log_file = logging::init_logging(&settings.log);
    if let Some(msg) = config_warning {
        warn!("{msg}");
    }
    if let Some(path) = &log_file {
        info!(file = %path.display(), "logging initialised");
    }

    let dir: PathBuf = env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| settings.library.dir.clone())
        .or_else(|| env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("Music"));

    let catalog = Catalog::new(dir.clone(), settings.library.clone());
    let mut host = ServiceHost::new(catalog, settings.playback.clone(), RodioOutput::factory());

    let (control_tx, control_rx) = mpsc::channel::<ControlCmd>();
    if settings.notifications.mpris {
        host.add_notifier(Rc::new(crate::mpris::spawn_mpris(control_tx)));
    }

    let mut app = App::new(
        settings.ui.header_text.clone(),
        dir.display().to_string(),
        Duration::from_millis(settings.ui.poll_interval_ms),
    );
    startup::apply_startup(&mut app, &mut host, &settings);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(&mut terminal, &mut app, &mut host, &control_rx);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    app.detach();
    host.stop();
    info!("bye");

    run_result
}
