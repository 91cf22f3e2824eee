//! GDI rendering of a [`Scene`].
//!
//! The window region already clips the corners, so the background is a
//! plain fill of the client area.

use windows::Win32::Foundation::{COLORREF, HWND, RECT};
use windows::Win32::Graphics::Gdi::{
    BeginPaint, CreateFontIndirectW, CreateSolidBrush, DT_CENTER, DT_SINGLELINE, DT_VCENTER,
    DeleteObject, DrawTextW, Ellipse, EndPaint, FillRect, GetStockObject, HDC, LOGFONTW,
    NULL_PEN, PAINTSTRUCT, SelectObject, SetBkMode, SetTextColor, TRANSPARENT,
};

use yeardots_core::config::{AppearanceConfig, Rgb};
use yeardots_core::layout::{Label, Rect};
use yeardots_core::Scene;

const FONT_FACE: &str = "Segoe UI";

/// Colours resolved from the appearance config.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    background: COLORREF,
    text: COLORREF,
    label: COLORREF,
    done: COLORREF,
    future: COLORREF,
}

fn colorref(color: Rgb) -> COLORREF {
    COLORREF(u32::from(color.b) << 16 | u32::from(color.g) << 8 | u32::from(color.r))
}

impl From<&AppearanceConfig> for Palette {
    fn from(appearance: &AppearanceConfig) -> Self {
        Self {
            background: colorref(appearance.background),
            text: colorref(appearance.text),
            label: colorref(appearance.label),
            done: colorref(appearance.done),
            future: colorref(appearance.future),
        }
    }
}

fn to_rect(rect: &Rect) -> RECT {
    RECT {
        left: rect.x,
        top: rect.y,
        right: rect.right(),
        bottom: rect.bottom(),
    }
}

pub fn paint(hwnd: HWND, scene: &Scene, palette: &Palette) {
    let mut ps = PAINTSTRUCT::default();
    let hdc = unsafe { BeginPaint(hwnd, &mut ps) };
    if hdc.is_invalid() {
        return;
    }

    unsafe {
        let side = i32::try_from(scene.side).unwrap_or(i32::MAX);
        let background = CreateSolidBrush(palette.background);
        FillRect(
            hdc,
            &RECT {
                left: 0,
                top: 0,
                right: side,
                bottom: side,
            },
            background,
        );
        let _ = DeleteObject(background);

        let old_pen = SelectObject(hdc, GetStockObject(NULL_PEN));
        let done = CreateSolidBrush(palette.done);
        let future = CreateSolidBrush(palette.future);
        let old_brush = SelectObject(hdc, done);
        let mut current_done = true;
        for dot in &scene.dots {
            if dot.done != current_done {
                SelectObject(hdc, if dot.done { done } else { future });
                current_done = dot.done;
            }
            let r = to_rect(&dot.bounds);
            let _ = Ellipse(hdc, r.left, r.top, r.right, r.bottom);
        }
        SelectObject(hdc, old_brush);
        SelectObject(hdc, old_pen);
        let _ = DeleteObject(done);
        let _ = DeleteObject(future);

        SetBkMode(hdc, TRANSPARENT);
        draw_label(hdc, &scene.caption, palette.label);
        draw_label(hdc, &scene.value, palette.text);

        let _ = EndPaint(hwnd, &ps);
    }
}

unsafe fn draw_label(hdc: HDC, label: &Label, color: COLORREF) {
    let mut font = LOGFONTW {
        // Negative height selects by character height.
        lfHeight: -i32::try_from(label.font_px).unwrap_or(12),
        lfWeight: if label.bold { 600 } else { 400 },
        ..Default::default()
    };
    for (dst, src) in font.lfFaceName.iter_mut().zip(FONT_FACE.encode_utf16()) {
        *dst = src;
    }

    unsafe {
        let hfont = CreateFontIndirectW(&font);
        let old_font = SelectObject(hdc, hfont);
        SetTextColor(hdc, color);

        let mut text: Vec<u16> = label.text.encode_utf16().collect();
        let mut rect = to_rect(&label.bounds);
        DrawTextW(
            hdc,
            &mut text,
            &mut rect,
            DT_CENTER | DT_VCENTER | DT_SINGLELINE,
        );

        SelectObject(hdc, old_font);
        let _ = DeleteObject(hfont);
    }
}
