//! Discovery of the desktop's background container window.
//!
//! The shell paints the wallpaper into a hidden `WorkerW` that sits behind
//! the `WorkerW` hosting the icon view (`SHELLDLL_DefView`). It is only
//! created after `Progman` receives an undocumented message, so discovery
//! always sends that message first.

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::shell::{HostContainerHandle, ShellBridge, TopLevelVisitor, Visit, WindowHandle};

pub const PROGMAN_CLASS: &str = "Progman";
pub const DEFVIEW_CLASS: &str = "SHELLDLL_DefView";
pub const HOST_CONTAINER_CLASS: &str = "WorkerW";

/// Makes `Progman` spawn the `WorkerW` behind the desktop icons.
pub const SPAWN_WORKERW_MESSAGE: u32 = 0x052C;

pub const DEFAULT_BROADCAST_TIMEOUT: Duration = Duration::from_millis(1000);

/// Accumulator for the top-level walk.
struct HostSearch<'a, B: ?Sized> {
    bridge: &'a B,
    found: Option<HostContainerHandle>,
    inspected: usize,
}

impl<B: ShellBridge + ?Sized> TopLevelVisitor for HostSearch<'_, B> {
    fn visit(&mut self, window: WindowHandle) -> Visit {
        self.inspected += 1;

        if self
            .bridge
            .find_child(window, WindowHandle::NULL, DEFVIEW_CLASS)
            .is_none()
        {
            return Visit::Continue;
        }

        // The container is the next top-level WorkerW after the icon host.
        match self
            .bridge
            .find_child(WindowHandle::NULL, window, HOST_CONTAINER_CLASS)
        {
            Some(container) => {
                self.found = Some(HostContainerHandle::new(container));
                Visit::Stop
            }
            None => Visit::Continue,
        }
    }
}

/// Finds the host container through a [`ShellBridge`].
pub struct WindowEnumerator<'a, B: ?Sized> {
    bridge: &'a B,
    broadcast_timeout: Duration,
}

impl<'a, B: ShellBridge + ?Sized> WindowEnumerator<'a, B> {
    pub fn new(bridge: &'a B, broadcast_timeout: Duration) -> Self {
        Self {
            bridge,
            broadcast_timeout,
        }
    }

    /// Locate the background container behind the desktop icons.
    ///
    /// Returns `None` when the shell has not built it (yet); that is an
    /// expected outcome during login, not an error.
    pub fn find_host_container(&self) -> Option<HostContainerHandle> {
        debug!(event = "core.desktop.host_search_started");

        let Some(progman) = self.bridge.find_top_level(PROGMAN_CLASS) else {
            warn!(
                event = "core.desktop.progman_not_found",
                message = "Desktop shell is not running"
            );
            return None;
        };

        // Only the side effect matters; the reply is meaningless.
        if let Err(e) =
            self.bridge
                .send_with_timeout(progman, SPAWN_WORKERW_MESSAGE, self.broadcast_timeout)
        {
            warn!(
                event = "core.desktop.spawn_message_failed",
                progman = %progman,
                error = %e
            );
        }

        let mut search = HostSearch {
            bridge: self.bridge,
            found: None,
            inspected: 0,
        };
        if let Err(e) = self.bridge.for_each_top_level(&mut search) {
            warn!(
                event = "core.desktop.enumeration_failed",
                error = %e,
                inspected = search.inspected
            );
        }

        if let Some(host) = search.found {
            info!(
                event = "core.desktop.host_found",
                host = %host,
                layout = "sibling",
                inspected = search.inspected
            );
            return Some(host);
        }

        // Newer shells keep the container as a child of Progman.
        if self
            .bridge
            .find_child(progman, WindowHandle::NULL, DEFVIEW_CLASS)
            .is_some()
            && let Some(container) =
                self.bridge
                    .find_child(progman, WindowHandle::NULL, HOST_CONTAINER_CLASS)
        {
            let host = HostContainerHandle::new(container);
            info!(
                event = "core.desktop.host_found",
                host = %host,
                layout = "progman_child",
                inspected = search.inspected
            );
            return Some(host);
        }

        debug!(
            event = "core.desktop.host_not_found",
            inspected = search.inspected
        );
        None
    }
}
