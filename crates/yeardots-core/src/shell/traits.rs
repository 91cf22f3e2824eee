//! Platform capability trait for desktop shell integration.

use std::time::Duration;

use super::errors::ShellError;
use super::types::{Visit, WindowHandle};
use crate::desktop::{ClipRegion, CompositionRequest};

/// Receives each top-level window during [`ShellBridge::for_each_top_level`].
///
/// Implementors carry their own accumulator; enumeration stops at the first
/// [`Visit::Stop`].
pub trait TopLevelVisitor {
    fn visit(&mut self, window: WindowHandle) -> Visit;
}

/// Every undocumented or version-fragile windowing call the widget makes.
///
/// The desktop components only sequence calls on this trait, so an OS change
/// means reimplementing the bridge and nothing else. Implementations are used
/// from the UI thread only.
///
/// Lookups return `Option` and never fail on stale or malformed handles.
pub trait ShellBridge {
    /// Whether `window` refers to a live, realized window.
    fn is_window(&self, window: WindowHandle) -> bool;

    /// Whether `window` and its ancestors are visible.
    fn is_visible(&self, window: WindowHandle) -> bool;

    /// Find a top-level window by registered class name.
    fn find_top_level(&self, class_name: &str) -> Option<WindowHandle>;

    /// Find the first child of `parent` after `after` with the given class.
    ///
    /// A null `parent` searches top-level windows; a null `after` starts at
    /// the first child.
    fn find_child(
        &self,
        parent: WindowHandle,
        after: WindowHandle,
        class_name: &str,
    ) -> Option<WindowHandle>;

    /// Send `message` (no parameters) and wait at most `timeout` for it to be
    /// processed. The reply value is discarded.
    fn send_with_timeout(
        &self,
        target: WindowHandle,
        message: u32,
        timeout: Duration,
    ) -> Result<(), ShellError>;

    /// Visit top-level windows in Z order.
    fn for_each_top_level(&self, visitor: &mut dyn TopLevelVisitor) -> Result<(), ShellError>;

    /// Parent of `window`, or `None` for a top-level window.
    fn parent_of(&self, window: WindowHandle) -> Option<WindowHandle>;

    fn set_parent(&self, child: WindowHandle, parent: WindowHandle) -> Result<(), ShellError>;

    /// Show without activating: no focus steal, no taskbar flash.
    fn show_no_activate(&self, window: WindowHandle) -> Result<(), ShellError>;

    /// Apply an accent policy through the window composition attribute call.
    fn set_accent_policy(
        &self,
        window: WindowHandle,
        request: &CompositionRequest,
    ) -> Result<(), ShellError>;

    /// Replace the window's hit-test and paint region.
    fn set_window_region(&self, window: WindowHandle, region: &ClipRegion)
    -> Result<(), ShellError>;
}
