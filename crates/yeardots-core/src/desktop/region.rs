//! Rounded-rectangle window region.
//!
//! The region must follow the window bounds exactly. A mask left over from
//! before a DPI change shows up as square corners, so every resize and every
//! scale change recomputes and reapplies it before the next paint.

use tracing::{debug, warn};

use crate::shell::{ShellBridge, ShellError, WindowHandle};

/// Rounded rectangle anchored at the window origin, in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipRegion {
    width: u32,
    height: u32,
    radius: u32,
}

impl ClipRegion {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Effective corner radius after clamping to the bounds.
    pub fn radius(&self) -> u32 {
        self.radius
    }

    pub fn bounding_box(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Whether pixel `(x, y)` belongs to the region.
    ///
    /// A corner pixel counts only when its centre lies at least half a pixel
    /// inside the corner arc.
    pub fn contains(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let r = self.radius;
        if r == 0 {
            return true;
        }

        let in_left = x < r;
        let in_right = x >= self.width - r;
        let in_top = y < r;
        let in_bottom = y >= self.height - r;
        if !(in_left || in_right) || !(in_top || in_bottom) {
            return true;
        }

        let r = f64::from(r);
        let cx = if in_left {
            r
        } else {
            f64::from(self.width) - r
        };
        let cy = if in_top {
            r
        } else {
            f64::from(self.height) - r
        };
        let dx = f64::from(x) + 0.5 - cx;
        let dy = f64::from(y) + 0.5 - cy;
        let limit = r - 0.5;
        dx * dx + dy * dy < limit * limit
    }
}

/// Compute the clip region for the given bounds and corner radius.
///
/// The radius is clamped to half the shorter side, rounded up so a positive
/// radius never vanishes on a one-pixel side.
pub fn compute_mask(width: u32, height: u32, corner_radius: u32) -> ClipRegion {
    ClipRegion {
        width,
        height,
        radius: corner_radius.min(width.min(height).div_ceil(2)),
    }
}

/// Keeps the widget's region in step with its bounds and DPI scale.
#[derive(Debug, Clone)]
pub struct RegionMasker {
    corner_radius: u32,
    scale: f64,
    current: Option<ClipRegion>,
}

impl RegionMasker {
    /// `corner_radius` is in logical (96 DPI) pixels.
    pub fn new(corner_radius: u32) -> Self {
        Self {
            corner_radius,
            scale: 1.0,
            current: None,
        }
    }

    pub fn scale_factor(&self) -> f64 {
        self.scale
    }

    /// Region last computed, if any.
    pub fn current(&self) -> Option<ClipRegion> {
        self.current
    }

    /// Corner radius in physical pixels at the current scale.
    pub fn physical_radius(&self) -> u32 {
        (f64::from(self.corner_radius) * self.scale).round() as u32
    }

    /// Recompute and apply the region for new physical bounds.
    ///
    /// The stored region is updated even if the OS rejects it, so the next
    /// successful apply is never based on stale bounds.
    pub fn on_resize<B: ShellBridge + ?Sized>(
        &mut self,
        bridge: &B,
        window: WindowHandle,
        width: u32,
        height: u32,
    ) -> Result<ClipRegion, ShellError> {
        let region = compute_mask(width, height, self.physical_radius());
        self.current = Some(region);

        debug!(
            event = "core.desktop.region_computed",
            window = %window,
            width = width,
            height = height,
            radius = region.radius(),
            scale = self.scale
        );

        bridge.set_window_region(window, &region).inspect_err(|e| {
            warn!(
                event = "core.desktop.region_apply_failed",
                window = %window,
                error = %e
            );
        })?;
        Ok(region)
    }

    /// Adopt a new DPI scale and reapply the region for the new bounds.
    ///
    /// Non-finite or non-positive scales are ignored.
    pub fn on_scale_changed<B: ShellBridge + ?Sized>(
        &mut self,
        bridge: &B,
        window: WindowHandle,
        scale: f64,
        width: u32,
        height: u32,
    ) -> Result<ClipRegion, ShellError> {
        if scale.is_finite() && scale > 0.0 {
            self.scale = scale;
        } else {
            warn!(
                event = "core.desktop.scale_ignored",
                window = %window,
                scale = scale
            );
        }
        self.on_resize(bridge, window, width, height)
    }
}
