//! Notification-area icon with a Refresh / Quit menu.

use tracing::warn;
use windows::Win32::Foundation::{HINSTANCE, HWND, POINT};
use windows::Win32::UI::Shell::{
    NIF_ICON, NIF_MESSAGE, NIF_TIP, NIM_ADD, NIM_DELETE, NOTIFYICONDATAW, Shell_NotifyIconW,
};
use windows::Win32::UI::WindowsAndMessaging::{
    AppendMenuW, CreatePopupMenu, DestroyMenu, GetCursorPos, IDI_APPLICATION, LoadIconW,
    MF_SEPARATOR, MF_STRING, SetForegroundWindow, TPM_BOTTOMALIGN, TPM_RIGHTBUTTON,
    TrackPopupMenu, WM_APP,
};
use windows::core::{PCWSTR, w};

/// Callback message the shell sends for tray icon mouse events.
pub const WM_TRAYICON: u32 = WM_APP + 1;

pub const IDM_REFRESH: usize = 1001;
pub const IDM_QUIT: usize = 1002;

const TRAY_ID: u32 = 1;
const TOOLTIP: &str = "Year progress";

fn icon_data(hwnd: HWND) -> NOTIFYICONDATAW {
    NOTIFYICONDATAW {
        cbSize: std::mem::size_of::<NOTIFYICONDATAW>() as u32,
        hWnd: hwnd,
        uID: TRAY_ID,
        ..Default::default()
    }
}

pub fn add(hwnd: HWND) {
    let mut nid = icon_data(hwnd);
    nid.uFlags = NIF_MESSAGE | NIF_ICON | NIF_TIP;
    nid.uCallbackMessage = WM_TRAYICON;
    nid.hIcon = unsafe { LoadIconW(HINSTANCE::default(), IDI_APPLICATION) }.unwrap_or_default();

    let tip: Vec<u16> = TOOLTIP.encode_utf16().collect();
    let len = tip.len().min(nid.szTip.len() - 1);
    nid.szTip[..len].copy_from_slice(&tip[..len]);

    if !unsafe { Shell_NotifyIconW(NIM_ADD, &nid) }.as_bool() {
        warn!(event = "cli.tray.add_failed");
    }
}

pub fn remove(hwnd: HWND) {
    let nid = icon_data(hwnd);
    let _ = unsafe { Shell_NotifyIconW(NIM_DELETE, &nid) };
}

/// Show the context menu at the cursor. The chosen item arrives as a
/// `WM_COMMAND` carrying [`IDM_REFRESH`] or [`IDM_QUIT`].
pub fn show_menu(hwnd: HWND) {
    let menu = match unsafe { CreatePopupMenu() } {
        Ok(menu) => menu,
        Err(e) => {
            warn!(event = "cli.tray.menu_failed", error = %e);
            return;
        }
    };

    unsafe {
        let _ = AppendMenuW(menu, MF_STRING, IDM_REFRESH, w!("Refresh"));
        let _ = AppendMenuW(menu, MF_SEPARATOR, 0, PCWSTR::null());
        let _ = AppendMenuW(menu, MF_STRING, IDM_QUIT, w!("Quit"));

        // Without this the menu does not close when clicking elsewhere.
        let _ = SetForegroundWindow(hwnd);
        let mut pt = POINT::default();
        let _ = GetCursorPos(&mut pt);
        let _ = TrackPopupMenu(
            menu,
            TPM_BOTTOMALIGN | TPM_RIGHTBUTTON,
            pt.x,
            pt.y,
            0,
            hwnd,
            None,
        );
        let _ = DestroyMenu(menu);
    }
}
