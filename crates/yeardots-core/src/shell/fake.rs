//! In-memory window tree implementing [`ShellBridge`] for tests.

use std::cell::RefCell;
use std::collections::HashMap;
use std::time::Duration;

use super::errors::ShellError;
use super::traits::{ShellBridge, TopLevelVisitor};
use super::types::{Visit, WindowHandle};
use crate::desktop::{ClipRegion, CompositionRequest};
use crate::desktop::enumerator::{
    DEFVIEW_CLASS, HOST_CONTAINER_CLASS, PROGMAN_CLASS, SPAWN_WORKERW_MESSAGE,
};

#[derive(Debug, Clone)]
struct FakeWindow {
    class: String,
    parent: WindowHandle,
    visible: bool,
}

#[derive(Debug, Default)]
struct FakeState {
    next_id: isize,
    windows: HashMap<WindowHandle, FakeWindow>,
    /// Creation order doubles as Z order (first = topmost).
    order: Vec<WindowHandle>,
    accent_supported: bool,
    reparent_fails: bool,
    broadcast_times_out: bool,
    spawn_on_broadcast: bool,
    broadcasts: u32,
    enumerations: u32,
    accent_requests: Vec<(WindowHandle, CompositionRequest)>,
    regions: Vec<(WindowHandle, ClipRegion)>,
    /// Mutating and shell-walking calls, in the order they were made.
    calls: Vec<&'static str>,
}

/// Handles of the desktop windows created by [`FakeShell::classic_desktop`].
#[derive(Debug, Clone, Copy)]
pub struct FakeDesktop {
    pub progman: WindowHandle,
    /// `WorkerW` that owns `SHELLDLL_DefView` (the icons).
    pub icons_host: WindowHandle,
    /// The empty `WorkerW` behind the icons: the embedding target.
    pub container: WindowHandle,
}

pub struct FakeShell {
    state: RefCell<FakeState>,
}

impl FakeShell {
    pub fn new() -> Self {
        Self {
            state: RefCell::new(FakeState {
                next_id: 0x100,
                accent_supported: true,
                ..Default::default()
            }),
        }
    }

    /// Desktop as it looks after the shell has spawned its `WorkerW` pair.
    pub fn classic_desktop() -> (Self, FakeDesktop) {
        let shell = Self::new();
        let icons_host = shell.add_window(HOST_CONTAINER_CLASS, WindowHandle::NULL);
        shell.add_window(DEFVIEW_CLASS, icons_host);
        let container = shell.add_window(HOST_CONTAINER_CLASS, WindowHandle::NULL);
        let progman = shell.add_window(PROGMAN_CLASS, WindowHandle::NULL);
        (
            shell,
            FakeDesktop {
                progman,
                icons_host,
                container,
            },
        )
    }

    /// Desktop where the background `WorkerW` is a child of `Progman`.
    pub fn nested_desktop() -> (Self, FakeDesktop) {
        let shell = Self::new();
        let progman = shell.add_window(PROGMAN_CLASS, WindowHandle::NULL);
        shell.add_window(DEFVIEW_CLASS, progman);
        let container = shell.add_window(HOST_CONTAINER_CLASS, progman);
        (
            shell,
            FakeDesktop {
                progman,
                icons_host: progman,
                container,
            },
        )
    }

    pub fn add_window(&self, class: &str, parent: WindowHandle) -> WindowHandle {
        let mut state = self.state.borrow_mut();
        state.next_id += 0x10;
        let handle = WindowHandle::from_raw(state.next_id);
        state.windows.insert(
            handle,
            FakeWindow {
                class: class.to_string(),
                parent,
                visible: true,
            },
        );
        state.order.push(handle);
        handle
    }

    /// Top-level widget window, shown.
    pub fn add_widget(&self) -> WindowHandle {
        self.add_window("YeardotsWidget", WindowHandle::NULL)
    }

    pub fn destroy(&self, window: WindowHandle) {
        let mut state = self.state.borrow_mut();
        state.windows.remove(&window);
        state.order.retain(|w| *w != window);
        let orphans: Vec<WindowHandle> = state
            .windows
            .iter()
            .filter(|(_, w)| w.parent == window)
            .map(|(h, _)| *h)
            .collect();
        drop(state);
        for orphan in orphans {
            self.destroy(orphan);
        }
    }

    pub fn hide(&self, window: WindowHandle) {
        if let Some(w) = self.state.borrow_mut().windows.get_mut(&window) {
            w.visible = false;
        }
    }

    pub fn set_accent_supported(&self, supported: bool) {
        self.state.borrow_mut().accent_supported = supported;
    }

    pub fn set_reparent_fails(&self, fails: bool) {
        self.state.borrow_mut().reparent_fails = fails;
    }

    pub fn set_broadcast_times_out(&self, times_out: bool) {
        self.state.borrow_mut().broadcast_times_out = times_out;
    }

    /// Make the spawn message create the `WorkerW` pair, like a shell that
    /// has not yet built its background container.
    pub fn set_spawn_on_broadcast(&self, spawn: bool) {
        self.state.borrow_mut().spawn_on_broadcast = spawn;
    }

    pub fn broadcasts(&self) -> u32 {
        self.state.borrow().broadcasts
    }

    pub fn enumerations(&self) -> u32 {
        self.state.borrow().enumerations
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.state.borrow().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.borrow_mut().calls.clear();
    }

    pub fn accent_requests(&self) -> Vec<(WindowHandle, CompositionRequest)> {
        self.state.borrow().accent_requests.clone()
    }

    pub fn regions(&self) -> Vec<(WindowHandle, ClipRegion)> {
        self.state.borrow().regions.clone()
    }

    pub fn last_region(&self, window: WindowHandle) -> Option<ClipRegion> {
        self.state
            .borrow()
            .regions
            .iter()
            .rev()
            .find(|(w, _)| *w == window)
            .map(|(_, r)| *r)
    }

    fn spawn_worker_pair(&self) {
        let progman = self.find_top_level(PROGMAN_CLASS);
        let defview = progman.and_then(|p| self.find_child(p, WindowHandle::NULL, DEFVIEW_CLASS));
        let Some(defview) = defview else {
            return;
        };

        let icons_host = self.add_window(HOST_CONTAINER_CLASS, WindowHandle::NULL);
        let container = self.add_window(HOST_CONTAINER_CLASS, WindowHandle::NULL);

        let mut state = self.state.borrow_mut();
        if let Some(view) = state.windows.get_mut(&defview) {
            view.parent = icons_host;
        }
        // New WorkerW pair sits above Progman in Z order.
        state.order.retain(|w| *w != icons_host && *w != container);
        state.order.insert(0, container);
        state.order.insert(0, icons_host);
    }
}

impl Default for FakeShell {
    fn default() -> Self {
        Self::new()
    }
}

impl ShellBridge for FakeShell {
    fn is_window(&self, window: WindowHandle) -> bool {
        self.state.borrow().windows.contains_key(&window)
    }

    fn is_visible(&self, window: WindowHandle) -> bool {
        let state = self.state.borrow();
        let mut current = window;
        while let Some(w) = state.windows.get(&current) {
            if !w.visible {
                return false;
            }
            if w.parent.is_null() {
                return true;
            }
            current = w.parent;
        }
        false
    }

    fn find_top_level(&self, class_name: &str) -> Option<WindowHandle> {
        self.find_child(WindowHandle::NULL, WindowHandle::NULL, class_name)
    }

    fn find_child(
        &self,
        parent: WindowHandle,
        after: WindowHandle,
        class_name: &str,
    ) -> Option<WindowHandle> {
        let state = self.state.borrow();
        let siblings = state
            .order
            .iter()
            .filter(|h| state.windows.get(h).is_some_and(|w| w.parent == parent));

        let mut started = after.is_null();
        for handle in siblings {
            if !started {
                started = *handle == after;
                continue;
            }
            if state.windows.get(handle).is_some_and(|w| w.class == class_name) {
                return Some(*handle);
            }
        }
        None
    }

    fn send_with_timeout(
        &self,
        target: WindowHandle,
        message: u32,
        timeout: Duration,
    ) -> Result<(), ShellError> {
        let (times_out, spawn) = {
            let mut state = self.state.borrow_mut();
            state.broadcasts += 1;
            state.calls.push("broadcast");
            (state.broadcast_times_out, state.spawn_on_broadcast)
        };

        if times_out || !self.is_window(target) {
            return Err(ShellError::MessageTimedOut {
                target,
                message,
                timeout_ms: u32::try_from(timeout.as_millis()).unwrap_or(u32::MAX),
            });
        }

        if spawn && message == SPAWN_WORKERW_MESSAGE {
            self.state.borrow_mut().spawn_on_broadcast = false;
            self.spawn_worker_pair();
        }
        Ok(())
    }

    fn for_each_top_level(&self, visitor: &mut dyn TopLevelVisitor) -> Result<(), ShellError> {
        let snapshot: Vec<WindowHandle> = {
            let mut state = self.state.borrow_mut();
            state.enumerations += 1;
            state.calls.push("enumerate");
            state
                .order
                .iter()
                .filter(|h| state.windows.get(h).is_some_and(|w| w.parent.is_null()))
                .copied()
                .collect()
        };

        for window in snapshot {
            if visitor.visit(window) == Visit::Stop {
                break;
            }
        }
        Ok(())
    }

    fn parent_of(&self, window: WindowHandle) -> Option<WindowHandle> {
        self.state
            .borrow()
            .windows
            .get(&window)
            .map(|w| w.parent)
            .filter(|p| !p.is_null())
    }

    fn set_parent(&self, child: WindowHandle, parent: WindowHandle) -> Result<(), ShellError> {
        let mut state = self.state.borrow_mut();
        state.calls.push("set_parent");
        if state.reparent_fails || !state.windows.contains_key(&parent) {
            return Err(ShellError::ReparentFailed {
                child,
                parent,
                message: "access denied".to_string(),
            });
        }
        match state.windows.get_mut(&child) {
            Some(w) => {
                w.parent = parent;
                Ok(())
            }
            None => Err(ShellError::InvalidHandle { handle: child }),
        }
    }

    fn show_no_activate(&self, window: WindowHandle) -> Result<(), ShellError> {
        let mut state = self.state.borrow_mut();
        state.calls.push("show");
        match state.windows.get_mut(&window) {
            Some(w) => {
                w.visible = true;
                Ok(())
            }
            None => Err(ShellError::InvalidHandle { handle: window }),
        }
    }

    fn set_accent_policy(
        &self,
        window: WindowHandle,
        request: &CompositionRequest,
    ) -> Result<(), ShellError> {
        let mut state = self.state.borrow_mut();
        state.accent_requests.push((window, *request));
        state.calls.push("accent");
        if !state.accent_supported {
            return Err(ShellError::CompositionUnavailable {
                message: "SetWindowCompositionAttribute not exported".to_string(),
            });
        }
        Ok(())
    }

    fn set_window_region(
        &self,
        window: WindowHandle,
        region: &ClipRegion,
    ) -> Result<(), ShellError> {
        let mut state = self.state.borrow_mut();
        if !state.windows.contains_key(&window) {
            return Err(ShellError::InvalidHandle { handle: window });
        }
        state.regions.push((window, *region));
        state.calls.push("region");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_child_respects_after() {
        let (shell, desktop) = FakeShell::classic_desktop();
        let first = shell.find_top_level(HOST_CONTAINER_CLASS);
        assert_eq!(first, Some(desktop.icons_host));

        let next = shell.find_child(WindowHandle::NULL, desktop.icons_host, HOST_CONTAINER_CLASS);
        assert_eq!(next, Some(desktop.container));
    }

    #[test]
    fn test_spawn_on_broadcast_moves_defview() {
        let shell = FakeShell::new();
        let progman = shell.add_window(PROGMAN_CLASS, WindowHandle::NULL);
        shell.add_window(DEFVIEW_CLASS, progman);
        shell.set_spawn_on_broadcast(true);

        assert!(shell.find_top_level(HOST_CONTAINER_CLASS).is_none());
        shell
            .send_with_timeout(progman, SPAWN_WORKERW_MESSAGE, Duration::from_millis(10))
            .unwrap();

        let icons_host = shell.find_top_level(HOST_CONTAINER_CLASS).unwrap();
        assert!(shell.find_child(icons_host, WindowHandle::NULL, DEFVIEW_CLASS).is_some());
        assert!(shell.find_child(progman, WindowHandle::NULL, DEFVIEW_CLASS).is_none());
    }

    #[test]
    fn test_destroy_removes_children() {
        let (shell, desktop) = FakeShell::classic_desktop();
        let widget = shell.add_widget();
        shell.set_parent(widget, desktop.container).unwrap();

        shell.destroy(desktop.container);
        assert!(!shell.is_window(widget));
    }

    #[test]
    fn test_visibility_follows_ancestors() {
        let (shell, desktop) = FakeShell::classic_desktop();
        let widget = shell.add_widget();
        shell.set_parent(widget, desktop.container).unwrap();
        assert!(shell.is_visible(widget));

        shell.hide(desktop.container);
        assert!(!shell.is_visible(widget));
    }
}
