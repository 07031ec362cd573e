use std::time::Instant;

use tracing::warn;

use crate::app::App;
use crate::config;
use crate::service::ServiceHost;

/// Apply launch-time settings: optionally start the service and attach the view.
pub fn apply_startup(app: &mut App, host: &mut ServiceHost, settings: &config::Settings) {
    if !settings.service.autostart {
        return;
    }
    if let Err(e) = app.start_service(host, Instant::now()) {
        warn!(error = %e, "autostart failed");
    }
}
