use tracing::{error, info};

use crate::position::Position;

pub fn log_app_startup() {
    info!(
        event = "core.app.startup_completed",
        version = env!("CARGO_PKG_VERSION")
    );
}

pub fn log_app_shutdown() {
    info!(event = "core.app.shutdown_started");
}

pub fn log_app_error(error: &dyn std::error::Error) {
    error!(
        event = "core.app.error_occurred",
        error = %error,
        error_type = std::any::type_name_of_val(error)
    );
}

/// Events emitted by the widget core for external collaborators.
///
/// The core never persists anything itself. Collaborators such as the
/// [`PositionStore`](crate::position::PositionStore) subscribe and react.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetEvent {
    /// The user released a drag; the widget now sits at this screen position.
    Moved(Position),
    /// Progress was recomputed (timer tick or tray "Refresh").
    Refreshed { days_done: u32, days_total: u32 },
    /// The widget is shutting down.
    Quitting,
}

/// Receiver of [`WidgetEvent`]s.
pub trait EventSubscriber {
    fn on_event(&mut self, event: &WidgetEvent);
}
