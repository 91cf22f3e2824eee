//! Window procedure and per-thread host state.
//!
//! The state lives in a thread-local so the window procedure can reach it.
//! Several OS calls made while it is borrowed (reparenting, resizing) send
//! messages back into the window procedure synchronously; those nested
//! messages find the state busy and fall through to `DefWindowProcW`.

use std::cell::RefCell;
use std::time::Duration;

use chrono::Local;
use tracing::{debug, info, warn};
use windows::Win32::Foundation::{BOOL, HWND, LPARAM, LRESULT, POINT, RECT, WPARAM};
use windows::Win32::Graphics::Gdi::{InvalidateRect, ScreenToClient};
use windows::Win32::UI::HiDpi::GetDpiForWindow;
use windows::Win32::UI::Input::KeyboardAndMouse::{ReleaseCapture, SetCapture};
use windows::Win32::UI::WindowsAndMessaging::{
    DefWindowProcW, DestroyWindow, GetCursorPos, GetWindowRect, KillTimer, PostQuitMessage,
    SWP_NOACTIVATE, SWP_NOMOVE, SWP_NOSIZE, SWP_NOZORDER, SetTimer, SetWindowPos,
    SET_WINDOW_POS_FLAGS, WM_CAPTURECHANGED, WM_COMMAND, WM_CONTEXTMENU, WM_DESTROY,
    WM_DPICHANGED, WM_ERASEBKGND, WM_LBUTTONDOWN, WM_LBUTTONUP, WM_MOUSEMOVE, WM_PAINT,
    WM_RBUTTONUP, WM_SHOWWINDOW, WM_SIZE, WM_TIMER,
};

use yeardots_core::shell::to_hwnd;
use yeardots_core::{EmbedStep, Position, ShellBridge, Win32Shell, WidgetContext};

use super::paint::{self, Palette};
use super::tray::{self, IDM_QUIT, IDM_REFRESH, WM_TRAYICON};

pub const EMBED_TIMER: usize = 1;
pub const REFRESH_TIMER: usize = 2;

/// Sent to child windows after the parent's DPI changed.
const WM_DPICHANGED_AFTERPARENT: u32 = 0x02E3;
const BASE_DPI: f64 = 96.0;

struct Drag {
    cursor_start: POINT,
    window_start: POINT,
}

pub struct HostState {
    pub ctx: WidgetContext<Win32Shell>,
    /// Last known top-left in screen coordinates.
    placement: Position,
    drag: Option<Drag>,
}

impl HostState {
    pub fn new(ctx: WidgetContext<Win32Shell>, placement: Position) -> Self {
        Self {
            ctx,
            placement,
            drag: None,
        }
    }
}

thread_local! {
    static HOST: RefCell<Option<HostState>> = const { RefCell::new(None) };
}

pub fn install(state: HostState) {
    HOST.with(|host| *host.borrow_mut() = Some(state));
}

pub fn uninstall() -> Option<HostState> {
    HOST.with(|host| host.try_borrow_mut().ok().and_then(|mut h| h.take()))
}

/// Run `f` against the host state, or return `None` if it is absent or
/// already borrowed further up the stack.
pub fn with_state<R>(f: impl FnOnce(&mut HostState) -> R) -> Option<R> {
    HOST.with(|host| {
        let mut guard = host.try_borrow_mut().ok()?;
        guard.as_mut().map(f)
    })
}

fn loword(value: usize) -> u32 {
    (value & 0xFFFF) as u32
}

fn hiword(value: usize) -> u32 {
    ((value >> 16) & 0xFFFF) as u32
}

pub fn dpi_scale(hwnd: HWND) -> f64 {
    match unsafe { GetDpiForWindow(hwnd) } {
        0 => 1.0,
        dpi => f64::from(dpi) / BASE_DPI,
    }
}

fn move_window(hwnd: HWND, x: i32, y: i32) {
    if let Err(e) = unsafe {
        SetWindowPos(
            hwnd,
            HWND::default(),
            x,
            y,
            0,
            0,
            SWP_NOSIZE | SWP_NOZORDER | SWP_NOACTIVATE,
        )
    } {
        debug!(event = "cli.window.move_failed", error = %e);
    }
}

pub fn resize_window(hwnd: HWND, side: u32, origin: Option<(i32, i32)>) {
    let side = i32::try_from(side).unwrap_or(i32::MAX);
    let (x, y, extra): (i32, i32, SET_WINDOW_POS_FLAGS) = match origin {
        Some((x, y)) => (x, y, SET_WINDOW_POS_FLAGS(0)),
        None => (0, 0, SWP_NOMOVE),
    };
    if let Err(e) = unsafe {
        SetWindowPos(
            hwnd,
            HWND::default(),
            x,
            y,
            side,
            side,
            SWP_NOZORDER | SWP_NOACTIVATE | extra,
        )
    } {
        warn!(event = "cli.window.resize_failed", error = %e);
    }
}

fn window_origin(hwnd: HWND) -> Option<POINT> {
    let mut rect = RECT::default();
    unsafe { GetWindowRect(hwnd, &mut rect) }.ok()?;
    Some(POINT {
        x: rect.left,
        y: rect.top,
    })
}

/// Screen point to the coordinate space `hwnd` is positioned in.
fn to_parent_space(parent: Option<HWND>, mut point: POINT) -> POINT {
    if let Some(parent) = parent {
        let _ = unsafe { ScreenToClient(parent, &mut point) };
    }
    point
}

fn repaint(hwnd: HWND) {
    let _ = unsafe { InvalidateRect(hwnd, None, BOOL::from(false)) };
}

fn arm_timer(hwnd: HWND, id: usize, delay: Duration) {
    let ms = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX).max(1);
    if unsafe { SetTimer(hwnd, id, ms, None) } == 0 {
        warn!(event = "cli.window.timer_failed", timer = id);
    }
}

fn on_embed_timer(hwnd: HWND) {
    let _ = unsafe { KillTimer(hwnd, EMBED_TIMER) };

    let Some((step, placement)) = with_state(|s| (s.ctx.on_embed_timer(), s.placement)) else {
        return;
    };
    match step {
        EmbedStep::Embedded(host) => {
            // Child coordinates are relative to the container, not the screen.
            let point = to_parent_space(
                Some(to_hwnd(host.window())),
                POINT {
                    x: placement.x,
                    y: placement.y,
                },
            );
            move_window(hwnd, point.x, point.y);
            repaint(hwnd);
        }
        EmbedStep::RetryAfter(delay) => arm_timer(hwnd, EMBED_TIMER, delay),
        EmbedStep::Degraded => {}
    }
}

fn on_refresh(hwnd: HWND) {
    let today = Local::now().date_naive();
    if let Some((resized, side)) = with_state(|s| (s.ctx.refresh(today), s.ctx.side())) {
        if resized {
            resize_window(hwnd, side, None);
        }
        repaint(hwnd);
    }
}

fn on_scale_changed(hwnd: HWND, scale: f64, suggested: Option<RECT>) {
    let result = with_state(|s| s.ctx.on_scale_changed(scale));
    match result {
        Some(Ok(side)) => resize_window(hwnd, side, suggested.map(|r| (r.left, r.top))),
        Some(Err(e)) => warn!(event = "cli.window.scale_region_failed", error = %e),
        None => {}
    }
}

fn parent_window(hwnd: HWND) -> Option<HWND> {
    with_state(|s| {
        s.ctx
            .bridge()
            .parent_of(yeardots_core::shell::from_hwnd(hwnd))
            .map(to_hwnd)
    })
    .flatten()
}

fn begin_drag(hwnd: HWND) {
    let mut cursor = POINT::default();
    if unsafe { GetCursorPos(&mut cursor) }.is_err() {
        return;
    }
    let Some(origin) = window_origin(hwnd) else {
        return;
    };
    unsafe { SetCapture(hwnd) };
    with_state(|s| {
        s.drag = Some(Drag {
            cursor_start: cursor,
            window_start: origin,
        })
    });
}

fn continue_drag(hwnd: HWND) {
    let Some(target) = with_state(|s| {
        s.drag.as_ref().map(|drag| {
            let mut cursor = POINT::default();
            let _ = unsafe { GetCursorPos(&mut cursor) };
            POINT {
                x: drag.window_start.x + cursor.x - drag.cursor_start.x,
                y: drag.window_start.y + cursor.y - drag.cursor_start.y,
            }
        })
    })
    .flatten() else {
        return;
    };
    let point = to_parent_space(parent_window(hwnd), target);
    move_window(hwnd, point.x, point.y);
}

fn end_drag(hwnd: HWND) {
    let was_dragging = with_state(|s| s.drag.take().is_some()).unwrap_or(false);
    if !was_dragging {
        return;
    }
    let _ = unsafe { ReleaseCapture() };

    if let Some(origin) = window_origin(hwnd) {
        let position = Position {
            x: origin.x,
            y: origin.y,
        };
        with_state(|s| {
            s.placement = position;
            s.ctx.on_drag_released(position);
        });
    }
}

pub unsafe extern "system" fn wndproc(hwnd: HWND, msg: u32, wp: WPARAM, lp: LPARAM) -> LRESULT {
    match msg {
        WM_ERASEBKGND => LRESULT(1),

        WM_PAINT => {
            match with_state(|s| (s.ctx.scene(), Palette::from(&s.ctx.config().appearance))) {
                Some((scene, palette)) => {
                    paint::paint(hwnd, &scene, &palette);
                    LRESULT(0)
                }
                None => unsafe { DefWindowProcW(hwnd, msg, wp, lp) },
            }
        }

        WM_SHOWWINDOW if wp.0 != 0 => {
            if let Some(Some(delay)) = with_state(|s| s.ctx.on_shown()) {
                debug!(
                    event = "cli.window.embed_scheduled",
                    delay_ms = delay.as_millis() as u64
                );
                arm_timer(hwnd, EMBED_TIMER, delay);
            }
            unsafe { DefWindowProcW(hwnd, msg, wp, lp) }
        }

        WM_SIZE => {
            let (width, height) = (loword(lp.0 as usize), hiword(lp.0 as usize));
            if let Some(Err(e)) = with_state(|s| s.ctx.on_resize(width, height)) {
                warn!(event = "cli.window.region_failed", error = %e);
            }
            LRESULT(0)
        }

        WM_DPICHANGED => {
            let scale = f64::from(hiword(wp.0)) / BASE_DPI;
            // SAFETY: lParam of WM_DPICHANGED points to the suggested window rect.
            let suggested = unsafe { (lp.0 as *const RECT).as_ref() }.copied();
            on_scale_changed(hwnd, scale, suggested);
            LRESULT(0)
        }

        WM_DPICHANGED_AFTERPARENT => {
            on_scale_changed(hwnd, dpi_scale(hwnd), None);
            LRESULT(0)
        }

        WM_TIMER => {
            match wp.0 {
                EMBED_TIMER => on_embed_timer(hwnd),
                REFRESH_TIMER => on_refresh(hwnd),
                _ => {}
            }
            LRESULT(0)
        }

        WM_LBUTTONDOWN => {
            begin_drag(hwnd);
            LRESULT(0)
        }

        WM_MOUSEMOVE => {
            continue_drag(hwnd);
            LRESULT(0)
        }

        WM_LBUTTONUP => {
            end_drag(hwnd);
            LRESULT(0)
        }

        WM_CAPTURECHANGED => {
            with_state(|s| s.drag = None);
            LRESULT(0)
        }

        WM_TRAYICON => {
            let event = loword(lp.0 as usize);
            if event == WM_RBUTTONUP || event == WM_CONTEXTMENU {
                tray::show_menu(hwnd);
            }
            LRESULT(0)
        }

        WM_COMMAND => {
            match loword(wp.0) as usize {
                IDM_REFRESH => {
                    info!(event = "cli.tray.refresh_requested");
                    on_refresh(hwnd);
                }
                IDM_QUIT => {
                    info!(event = "cli.tray.quit_requested");
                    if let Err(e) = unsafe { DestroyWindow(hwnd) } {
                        warn!(event = "cli.window.destroy_failed", error = %e);
                    }
                }
                _ => {}
            }
            LRESULT(0)
        }

        WM_DESTROY => {
            tray::remove(hwnd);
            unsafe {
                let _ = KillTimer(hwnd, EMBED_TIMER);
                let _ = KillTimer(hwnd, REFRESH_TIMER);
            }
            with_state(|s| s.ctx.shutdown());
            unsafe { PostQuitMessage(0) };
            LRESULT(0)
        }

        _ => unsafe { DefWindowProcW(hwnd, msg, wp, lp) },
    }
}
