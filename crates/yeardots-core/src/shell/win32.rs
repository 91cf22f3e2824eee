use std::ffi::c_void;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::OnceLock;
use std::time::Duration;

use tracing::{debug, warn};
use windows::Win32::Foundation::{BOOL, FALSE, HWND, LPARAM, TRUE, WPARAM};
use windows::Win32::Graphics::Gdi::{CreateRoundRectRgn, DeleteObject, HRGN, SetWindowRgn};
use windows::Win32::System::LibraryLoader::{GetModuleHandleW, GetProcAddress};
use windows::Win32::UI::WindowsAndMessaging::{
    EnumWindows, FindWindowExW, FindWindowW, GetParent, IsWindow, IsWindowVisible, SMTO_NORMAL,
    SW_SHOWNA, SendMessageTimeoutW, SetParent, ShowWindow,
};
use windows::core::{HSTRING, PCWSTR, s, w};

use super::errors::ShellError;
use super::traits::{ShellBridge, TopLevelVisitor};
use super::types::{Visit, WindowHandle};
use crate::desktop::composition::WCA_ACCENT_POLICY;
use crate::desktop::{ClipRegion, CompositionRequest};

#[repr(C)]
struct AccentPolicy {
    accent_state: u32,
    accent_flags: u32,
    gradient_color: u32,
    animation_id: u32,
}

#[repr(C)]
struct WindowCompositionAttribData {
    attribute: u32,
    data: *mut c_void,
    size_of_data: usize,
}

type SetWindowCompositionAttributeFn =
    unsafe extern "system" fn(HWND, *mut WindowCompositionAttribData) -> BOOL;

/// [`ShellBridge`] backed by user32/gdi32.
#[derive(Debug, Default)]
pub struct Win32Shell;

impl Win32Shell {
    pub fn new() -> Self {
        Self
    }
}

pub fn to_hwnd(window: WindowHandle) -> HWND {
    HWND(window.raw() as *mut c_void)
}

pub fn from_hwnd(hwnd: HWND) -> WindowHandle {
    WindowHandle::from_raw(hwnd.0 as isize)
}

fn non_null(hwnd: HWND) -> Option<WindowHandle> {
    let handle = from_hwnd(hwnd);
    (!handle.is_null()).then_some(handle)
}

/// `SetWindowCompositionAttribute` is exported by user32 but not declared in
/// any SDK header, so it is resolved at runtime once per process.
fn composition_entry_point() -> Option<SetWindowCompositionAttributeFn> {
    static ENTRY: OnceLock<Option<SetWindowCompositionAttributeFn>> = OnceLock::new();

    *ENTRY.get_or_init(|| unsafe {
        let module = match GetModuleHandleW(w!("user32.dll")) {
            Ok(m) => m,
            Err(err) => {
                debug!(
                    event = "core.shell.user32_unavailable",
                    error = %err
                );
                return None;
            }
        };
        GetProcAddress(module, s!("SetWindowCompositionAttribute")).map(|entry| {
            std::mem::transmute::<unsafe extern "system" fn() -> isize, SetWindowCompositionAttributeFn>(
                entry,
            )
        })
    })
}

struct EnumState<'a> {
    visitor: &'a mut dyn TopLevelVisitor,
    stopped: bool,
    panicked: bool,
}

unsafe extern "system" fn enum_top_level(hwnd: HWND, lparam: LPARAM) -> BOOL {
    // SAFETY: lparam is the EnumState pointer handed to EnumWindows below and
    // outlives the enumeration.
    let state = unsafe { &mut *(lparam.0 as *mut EnumState<'_>) };

    // A panic must not unwind into user32.
    match catch_unwind(AssertUnwindSafe(|| state.visitor.visit(from_hwnd(hwnd)))) {
        Ok(Visit::Continue) => TRUE,
        Ok(Visit::Stop) => {
            state.stopped = true;
            FALSE
        }
        Err(_) => {
            state.panicked = true;
            FALSE
        }
    }
}

impl ShellBridge for Win32Shell {
    fn is_window(&self, window: WindowHandle) -> bool {
        !window.is_null() && unsafe { IsWindow(to_hwnd(window)) }.as_bool()
    }

    fn is_visible(&self, window: WindowHandle) -> bool {
        unsafe { IsWindowVisible(to_hwnd(window)) }.as_bool()
    }

    fn find_top_level(&self, class_name: &str) -> Option<WindowHandle> {
        let class = HSTRING::from(class_name);
        unsafe { FindWindowW(&class, PCWSTR::null()) }
            .ok()
            .and_then(non_null)
    }

    fn find_child(
        &self,
        parent: WindowHandle,
        after: WindowHandle,
        class_name: &str,
    ) -> Option<WindowHandle> {
        let class = HSTRING::from(class_name);
        unsafe { FindWindowExW(to_hwnd(parent), to_hwnd(after), &class, PCWSTR::null()) }
            .ok()
            .and_then(non_null)
    }

    fn send_with_timeout(
        &self,
        target: WindowHandle,
        message: u32,
        timeout: Duration,
    ) -> Result<(), ShellError> {
        let timeout_ms = u32::try_from(timeout.as_millis()).unwrap_or(u32::MAX);
        let mut reply: usize = 0;

        let result = unsafe {
            SendMessageTimeoutW(
                to_hwnd(target),
                message,
                WPARAM(0),
                LPARAM(0),
                SMTO_NORMAL,
                timeout_ms,
                Some(&mut reply as *mut usize),
            )
        };

        if result.0 == 0 {
            return Err(ShellError::MessageTimedOut {
                target,
                message,
                timeout_ms,
            });
        }
        Ok(())
    }

    fn for_each_top_level(&self, visitor: &mut dyn TopLevelVisitor) -> Result<(), ShellError> {
        let mut state = EnumState {
            visitor,
            stopped: false,
            panicked: false,
        };

        let result = unsafe {
            EnumWindows(
                Some(enum_top_level),
                LPARAM(&mut state as *mut EnumState<'_> as isize),
            )
        };

        if state.panicked {
            return Err(ShellError::EnumerationFailed {
                message: "window visitor panicked".to_string(),
            });
        }
        match result {
            // EnumWindows reports an early stop as a failure.
            Err(_) if state.stopped => Ok(()),
            Err(e) => Err(ShellError::EnumerationFailed {
                message: e.to_string(),
            }),
            Ok(()) => Ok(()),
        }
    }

    fn parent_of(&self, window: WindowHandle) -> Option<WindowHandle> {
        unsafe { GetParent(to_hwnd(window)) }.ok().and_then(non_null)
    }

    fn set_parent(&self, child: WindowHandle, parent: WindowHandle) -> Result<(), ShellError> {
        match unsafe { SetParent(to_hwnd(child), to_hwnd(parent)) } {
            Ok(_) => Ok(()),
            // A null previous parent is also reported as an error; trust the tree.
            Err(_) if self.parent_of(child) == Some(parent) => Ok(()),
            Err(e) => Err(ShellError::ReparentFailed {
                child,
                parent,
                message: e.to_string(),
            }),
        }
    }

    fn show_no_activate(&self, window: WindowHandle) -> Result<(), ShellError> {
        if !self.is_window(window) {
            return Err(ShellError::InvalidHandle { handle: window });
        }
        // Return value is the previous visibility, not a status.
        let _ = unsafe { ShowWindow(to_hwnd(window), SW_SHOWNA) };
        Ok(())
    }

    fn set_accent_policy(
        &self,
        window: WindowHandle,
        request: &CompositionRequest,
    ) -> Result<(), ShellError> {
        let Some(set_attribute) = composition_entry_point() else {
            return Err(ShellError::CompositionUnavailable {
                message: "user32 does not export SetWindowCompositionAttribute".to_string(),
            });
        };

        let mut policy = AccentPolicy {
            accent_state: request.effect as u32,
            accent_flags: request.flags,
            gradient_color: request.tint.to_abgr(),
            animation_id: request.animation_id,
        };
        let mut data = WindowCompositionAttribData {
            attribute: WCA_ACCENT_POLICY,
            data: &mut policy as *mut AccentPolicy as *mut c_void,
            size_of_data: std::mem::size_of::<AccentPolicy>(),
        };

        let applied = unsafe { set_attribute(to_hwnd(window), &mut data) };
        if !applied.as_bool() {
            warn!(
                event = "core.shell.accent_policy_rejected",
                window = %window,
                effect = ?request.effect
            );
            return Err(ShellError::CompositionRejected { handle: window });
        }
        Ok(())
    }

    fn set_window_region(
        &self,
        window: WindowHandle,
        region: &ClipRegion,
    ) -> Result<(), ShellError> {
        let rgn = round_rect_region(region).ok_or_else(|| ShellError::RegionRejected {
            handle: window,
            message: "CreateRoundRectRgn returned null".to_string(),
        })?;

        // On success the system owns the region.
        if unsafe { SetWindowRgn(to_hwnd(window), rgn, TRUE) } == 0 {
            let _ = unsafe { DeleteObject(rgn) };
            return Err(ShellError::RegionRejected {
                handle: window,
                message: "SetWindowRgn failed".to_string(),
            });
        }
        Ok(())
    }
}

/// GDI region for `region`. The caller owns the returned handle.
fn round_rect_region(region: &ClipRegion) -> Option<HRGN> {
    let to_i32 = |v: u32| i32::try_from(v).unwrap_or(i32::MAX);
    let diameter = to_i32(region.radius().saturating_mul(2));

    // GDI leaves out the right and bottom edge of round-rect regions.
    let rgn = unsafe {
        CreateRoundRectRgn(
            0,
            0,
            to_i32(region.width()).saturating_add(1),
            to_i32(region.height()).saturating_add(1),
            diameter,
            diameter,
        )
    };
    (!rgn.is_invalid()).then_some(rgn)
}
