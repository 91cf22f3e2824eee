//! The widget context.
//!
//! One `WidgetContext` exists per process. The host window owns it and
//! forwards its OS events here; the context answers with what to do next
//! (schedule a timer, resize, repaint) and never touches the message loop.

use std::time::Duration;

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::config::WidgetConfig;
use crate::desktop::{ClipRegion, EmbedError, EmbeddingCoordinator, RegionMasker};
use crate::events::{EventSubscriber, WidgetEvent};
use crate::layout::{GridLayout, Scene};
use crate::position::Position;
use crate::progress::YearProgress;
use crate::shell::{HostContainerHandle, ShellBridge, ShellError, WindowHandle};

/// What the host should do after an embed timer fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbedStep {
    Embedded(HostContainerHandle),
    /// Arm the embed timer again.
    RetryAfter(Duration),
    /// Give up; the widget stays a normal top-level window.
    Degraded,
}

pub struct WidgetContext<B: ShellBridge> {
    config: WidgetConfig,
    bridge: B,
    coordinator: EmbeddingCoordinator,
    masker: RegionMasker,
    progress: YearProgress,
    layout: GridLayout,
    scale: f64,
    window: Option<WindowHandle>,
    embed_scheduled: bool,
    subscribers: Vec<Box<dyn EventSubscriber>>,
    shut_down: bool,
}

impl<B: ShellBridge> WidgetContext<B> {
    pub fn new(config: WidgetConfig, bridge: B, progress: YearProgress) -> Self {
        let layout = GridLayout::compute(&config.appearance, progress.days_total, 1.0);
        Self {
            coordinator: EmbeddingCoordinator::from_config(&config),
            masker: RegionMasker::new(config.appearance.corner_radius),
            config,
            bridge,
            progress,
            layout,
            scale: 1.0,
            window: None,
            embed_scheduled: false,
            subscribers: Vec::new(),
            shut_down: false,
        }
    }

    pub fn subscribe(&mut self, subscriber: Box<dyn EventSubscriber>) {
        self.subscribers.push(subscriber);
    }

    /// Record the native window once the host created it.
    pub fn attach(&mut self, window: WindowHandle) {
        debug!(event = "core.context.window_attached", window = %window);
        self.window = Some(window);
    }

    pub fn window(&self) -> Option<WindowHandle> {
        self.window
    }

    pub fn bridge(&self) -> &B {
        &self.bridge
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    pub fn coordinator(&self) -> &EmbeddingCoordinator {
        &self.coordinator
    }

    pub fn progress(&self) -> YearProgress {
        self.progress
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Window edge length in physical pixels; the widget is square.
    pub fn side(&self) -> u32 {
        self.layout.side
    }

    pub fn scene(&self) -> Scene {
        self.layout.scene(&self.progress)
    }

    /// First show of the window. Returns the delay for the one-shot embed
    /// timer, or `None` if embedding is off or already scheduled.
    pub fn on_shown(&mut self) -> Option<Duration> {
        if !self.config.embedding.enabled {
            info!(
                event = "core.context.embedding_disabled",
                message = "Widget runs as a normal top-level window"
            );
            return None;
        }
        if self.embed_scheduled {
            return None;
        }
        self.embed_scheduled = true;
        Some(self.config.initial_embed_delay())
    }

    pub fn on_embed_timer(&mut self) -> EmbedStep {
        let Some(window) = self.window else {
            warn!(event = "core.context.embed_without_window");
            return EmbedStep::Degraded;
        };

        match self.coordinator.embed(&self.bridge, window) {
            Ok(host) => EmbedStep::Embedded(host),
            Err(EmbedError::HandleNotRealized { .. }) => EmbedStep::Degraded,
            Err(e) => match self.coordinator.retry_delay() {
                Some(delay) if e.is_recoverable() => {
                    debug!(
                        event = "core.context.embed_retry_scheduled",
                        delay_ms = delay.as_millis() as u64
                    );
                    EmbedStep::RetryAfter(delay)
                }
                _ => {
                    warn!(
                        event = "core.context.embed_gave_up",
                        attempts = self.coordinator.failed_attempts()
                    );
                    EmbedStep::Degraded
                }
            },
        }
    }

    /// The window's client area changed size.
    pub fn on_resize(&mut self, width: u32, height: u32) -> Result<ClipRegion, ShellError> {
        let window = self.window.unwrap_or(WindowHandle::NULL);
        self.masker.on_resize(&self.bridge, window, width, height)
    }

    /// DPI scale changed. Recomputes the layout and the region for the new
    /// side length, which is returned so the host can resize the window.
    pub fn on_scale_changed(&mut self, scale: f64) -> Result<u32, ShellError> {
        if scale.is_finite() && scale > 0.0 {
            self.scale = scale;
        }
        self.layout = GridLayout::compute(
            &self.config.appearance,
            self.progress.days_total,
            self.scale,
        );
        let side = self.layout.side;
        let window = self.window.unwrap_or(WindowHandle::NULL);
        self.masker
            .on_scale_changed(&self.bridge, window, scale, side, side)?;
        info!(
            event = "core.context.scale_changed",
            scale = self.scale,
            side = side
        );
        Ok(side)
    }

    /// Drag finished with the window at `position` (screen coordinates).
    pub fn on_drag_released(&mut self, position: Position) {
        self.emit(WidgetEvent::Moved(position));
    }

    /// Recompute progress for `date`. Returns `true` if the window must be
    /// resized because the year length changed.
    pub fn refresh(&mut self, date: NaiveDate) -> bool {
        let progress = YearProgress::for_date(date);
        let resized = progress.days_total != self.progress.days_total;
        self.progress = progress;
        if resized {
            self.layout = GridLayout::compute(
                &self.config.appearance,
                progress.days_total,
                self.scale,
            );
        }
        self.emit(WidgetEvent::Refreshed {
            days_done: progress.days_done,
            days_total: progress.days_total,
        });
        resized
    }

    /// Tear down once; later calls do nothing.
    pub fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        self.shut_down = true;
        self.emit(WidgetEvent::Quitting);
        info!(event = "core.context.shutdown_completed");
    }

    fn emit(&mut self, event: WidgetEvent) {
        for subscriber in &mut self.subscribers {
            subscriber.on_event(&event);
        }
    }
}
