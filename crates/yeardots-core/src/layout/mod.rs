//! Dot-grid geometry.
//!
//! One dot per day, `dots_per_row` per row, centred in a square widget with
//! two labels underneath. All output is in physical pixels.

use serde::Serialize;

use crate::config::AppearanceConfig;
use crate::progress::YearProgress;

/// Gap the grid is lifted by above its centred position.
const GRID_LIFT: u32 = 12;
/// Caption box starts this far above the bottom edge.
const CAPTION_OFFSET: u32 = 55;
/// Value box starts this far above the bottom edge.
const VALUE_OFFSET: u32 = 30;
const LABEL_HEIGHT: u32 = 30;
/// 9pt and 20pt at 96 DPI.
const CAPTION_FONT_PX: u32 = 12;
const VALUE_FONT_PX: u32 = 27;

pub const CAPTION_TEXT: &str = "YEAR PROGRESS";

/// Largest side a window can be given.
const MAX_SIDE: u32 = i32::MAX as u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn right(&self) -> i32 {
        self.x + self.width as i32
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height as i32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Dot {
    pub bounds: Rect,
    pub done: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Label {
    pub text: String,
    pub bounds: Rect,
    pub font_px: u32,
    pub bold: bool,
}

/// Everything the host needs to paint one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub side: u32,
    pub corner_radius: u32,
    pub progress: YearProgress,
    pub dots: Vec<Dot>,
    pub caption: Label,
    pub value: Label,
}

/// Grid metrics for one year length at one scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    pub scale: f64,
    pub dot_size: u32,
    pub pitch: u32,
    pub dots_per_row: u32,
    pub rows: u32,
    pub grid_width: u32,
    pub grid_height: u32,
    pub text_height: u32,
    /// Widget is square: `side × side`.
    pub side: u32,
    corner_radius: u32,
}

impl GridLayout {
    pub fn compute(appearance: &AppearanceConfig, days_total: u32, scale: f64) -> Self {
        let scale = if scale.is_finite() && scale > 0.0 {
            scale
        } else {
            1.0
        };
        // Float to int casts saturate; the rest must too so the side fits an i32.
        let px = |v: u32| (f64::from(v) * scale).round() as u32;

        let dots_per_row = appearance.dots_per_row.max(1);
        let dot_size = px(appearance.dot_size).max(1);
        let pitch = dot_size.saturating_add(px(appearance.dot_gap));
        let padding = px(appearance.padding);
        let text_height = px(appearance.text_height).min(MAX_SIDE);

        let rows = days_total.div_ceil(dots_per_row);
        let grid_width = dots_per_row.saturating_mul(pitch).min(MAX_SIDE);
        let grid_height = rows.saturating_mul(pitch).min(MAX_SIDE);
        let frame = padding.saturating_mul(2);
        let side = grid_width
            .saturating_add(frame)
            .max(grid_height.saturating_add(frame).saturating_add(text_height))
            .min(MAX_SIDE);

        Self {
            scale,
            dot_size,
            pitch,
            dots_per_row,
            rows,
            grid_width,
            grid_height,
            text_height,
            side,
            corner_radius: px(appearance.corner_radius),
        }
    }

    fn px(&self, v: u32) -> u32 {
        (f64::from(v) * self.scale).round() as u32
    }

    /// Top-left of the first dot.
    pub fn origin(&self) -> (i32, i32) {
        let side = self.side as i32;
        let x = (side - self.grid_width as i32) / 2;
        let y = (side - self.grid_height as i32)
            .saturating_sub(self.text_height as i32)
            / 2;
        let y = y.saturating_sub_unsigned(self.px(GRID_LIFT));
        (x, y)
    }

    pub fn scene(&self, progress: &YearProgress) -> Scene {
        let (origin_x, origin_y) = self.origin();
        let dots = (0..progress.days_total)
            .map(|i| {
                let col = i % self.dots_per_row;
                let row = i / self.dots_per_row;
                Dot {
                    bounds: Rect {
                        x: origin_x.saturating_add_unsigned(col.saturating_mul(self.pitch)),
                        y: origin_y.saturating_add_unsigned(row.saturating_mul(self.pitch)),
                        width: self.dot_size,
                        height: self.dot_size,
                    },
                    done: i < progress.days_done,
                }
            })
            .collect();

        let label_rect = |offset: u32| Rect {
            x: 0,
            y: (self.side as i32).saturating_sub_unsigned(self.px(offset)),
            width: self.side,
            height: self.px(LABEL_HEIGHT),
        };

        Scene {
            side: self.side,
            corner_radius: self.corner_radius,
            progress: *progress,
            dots,
            caption: Label {
                text: CAPTION_TEXT.to_string(),
                bounds: label_rect(CAPTION_OFFSET),
                font_px: self.px(CAPTION_FONT_PX),
                bold: false,
            },
            value: Label {
                text: progress.remaining_label(),
                bounds: label_rect(VALUE_OFFSET),
                font_px: self.px(VALUE_FONT_PX),
                bold: true,
            },
        }
    }
}
