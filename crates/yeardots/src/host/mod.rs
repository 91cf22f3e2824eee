//! Native host window.
//!
//! Creates the hidden popup window, hands it to the [`WidgetContext`], then
//! shows it and runs the message loop until the tray menu's Quit.

mod paint;
mod tray;
mod window;

use tracing::{info, warn};
use windows::Win32::Foundation::{HINSTANCE, HWND};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::HiDpi::{
    DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2, SetProcessDpiAwarenessContext,
};
use windows::Win32::UI::WindowsAndMessaging::{
    CreateWindowExW, DispatchMessageW, GetMessageW, HMENU, IDC_ARROW, LoadCursorW, MSG,
    RegisterClassW, SW_SHOWNOACTIVATE, SetTimer, ShowWindow, TranslateMessage, WNDCLASSW,
    WS_EX_TOOLWINDOW, WS_POPUP,
};
use windows::core::{PCWSTR, w};

use yeardots_core::shell::from_hwnd;
use yeardots_core::{PositionStore, WidgetConfig, WidgetContext, Win32Shell, YearProgress};

use window::{HostState, REFRESH_TIMER};

pub fn run(config: WidgetConfig, store: PositionStore) -> Result<(), Box<dyn std::error::Error>> {
    // Fails if a manifest already set the awareness; either way is fine.
    if let Err(e) =
        unsafe { SetProcessDpiAwarenessContext(DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2) }
    {
        warn!(event = "cli.window.dpi_awareness_failed", error = %e);
    }

    let placement = store.load();
    let refresh_interval = config.refresh_interval();
    let mut ctx = WidgetContext::new(config, Win32Shell::new(), YearProgress::today());
    ctx.subscribe(Box::new(store));

    let module = unsafe { GetModuleHandleW(PCWSTR::null()) }?;
    let instance: HINSTANCE = module.into();
    let class_name = w!("YeardotsWidget");

    let class = WNDCLASSW {
        lpfnWndProc: Some(window::wndproc),
        hInstance: instance,
        hCursor: unsafe { LoadCursorW(HINSTANCE::default(), IDC_ARROW) }.unwrap_or_default(),
        lpszClassName: class_name,
        ..Default::default()
    };
    if unsafe { RegisterClassW(&class) } == 0 {
        return Err("Failed to register the widget window class".into());
    }

    let side = i32::try_from(ctx.side()).unwrap_or(i32::MAX);
    // Created hidden: nothing may be shown before the region exists.
    let hwnd = unsafe {
        CreateWindowExW(
            WS_EX_TOOLWINDOW,
            class_name,
            w!("Year progress"),
            WS_POPUP,
            placement.x,
            placement.y,
            side,
            side,
            HWND::default(),
            HMENU::default(),
            instance,
            None,
        )
    }?;

    ctx.attach(from_hwnd(hwnd));
    window::install(HostState::new(ctx, placement));
    info!(
        event = "cli.window.created",
        window = %from_hwnd(hwnd),
        x = placement.x,
        y = placement.y
    );

    apply_initial_scale(hwnd);
    tray::add(hwnd);

    let _ = unsafe { ShowWindow(hwnd, SW_SHOWNOACTIVATE) };
    let interval_ms = u32::try_from(refresh_interval.as_millis()).unwrap_or(u32::MAX);
    if unsafe { SetTimer(hwnd, REFRESH_TIMER, interval_ms, None) } == 0 {
        warn!(event = "cli.window.refresh_timer_failed");
    }

    let mut msg = MSG::default();
    // GetMessageW returns -1 on error and 0 on WM_QUIT.
    while unsafe { GetMessageW(&mut msg, HWND::default(), 0, 0) }.0 > 0 {
        unsafe {
            let _ = TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }
    }

    window::uninstall();
    Ok(())
}

/// Match the layout and region to the monitor the window was created on.
fn apply_initial_scale(hwnd: HWND) {
    let scale = window::dpi_scale(hwnd);
    let Some(result) = window::with_state(|s| {
        let side = s.ctx.on_scale_changed(scale)?;
        s.ctx.on_resize(side, side).map(|_| side)
    }) else {
        return;
    };
    match result {
        Ok(side) => window::resize_window(hwnd, side, None),
        Err(e) => warn!(event = "cli.window.region_failed", error = %e),
    }
}
