//! Embedding sequence: blur, find the host container, reparent, show.

use std::time::Duration;

use tracing::{debug, error, info, warn};

use super::composition::{BlurOutcome, CompositionRequest, apply_blur};
use super::enumerator::{DEFAULT_BROADCAST_TIMEOUT, WindowEnumerator};
use super::errors::EmbedError;
use crate::config::WidgetConfig;
use crate::shell::{HostContainerHandle, ShellBridge, WindowHandle};

/// Where the widget window is in the embedding lifecycle.
///
/// `NotRealized → Realized → Embedded`, or `→ EmbedFailed`. A retryable
/// failure may move on to `Embedded` through another attempt; nothing moves
/// back to `NotRealized`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbedState {
    NotRealized,
    Realized,
    Embedded { host: HostContainerHandle },
    EmbedFailed { retryable: bool },
}

/// Bounded exponential backoff between embedding attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay: Duration,
}

impl RetryPolicy {
    pub const MAX_DELAY: Duration = Duration::from_secs(5);

    /// At least one attempt is always made.
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    /// A single attempt, no retries.
    pub fn none() -> Self {
        Self::new(1, Duration::ZERO)
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Delay before the next attempt after `failed_attempts` failures, or
    /// `None` once the budget is spent.
    pub fn delay_after(&self, failed_attempts: u32) -> Option<Duration> {
        if failed_attempts == 0 || failed_attempts >= self.max_attempts {
            return None;
        }
        let factor = 1u32.checked_shl(failed_attempts - 1).unwrap_or(u32::MAX);
        let delay = self
            .base_delay
            .checked_mul(factor)
            .unwrap_or(Self::MAX_DELAY);
        Some(delay.min(Self::MAX_DELAY))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(5, Duration::from_millis(200))
    }
}

/// Runs the embedding sequence for the widget window.
///
/// Never blocks beyond the bounded spawn message: retries are scheduled by
/// the caller's event loop using [`retry_delay`](Self::retry_delay).
#[derive(Debug)]
pub struct EmbeddingCoordinator {
    request: CompositionRequest,
    policy: RetryPolicy,
    broadcast_timeout: Duration,
    state: EmbedState,
    failed_attempts: u32,
    blurred: Option<WindowHandle>,
    blur: Option<BlurOutcome>,
}

impl EmbeddingCoordinator {
    pub fn new(request: CompositionRequest, policy: RetryPolicy, broadcast_timeout: Duration) -> Self {
        Self {
            request,
            policy,
            broadcast_timeout,
            state: EmbedState::NotRealized,
            failed_attempts: 0,
            blurred: None,
            blur: None,
        }
    }

    pub fn from_config(config: &WidgetConfig) -> Self {
        Self::new(
            config.composition_request(),
            config.retry_policy(),
            config.broadcast_timeout(),
        )
    }

    pub fn state(&self) -> EmbedState {
        self.state
    }

    /// Failed attempts since the last successful embed.
    pub fn failed_attempts(&self) -> u32 {
        self.failed_attempts
    }

    /// Result of the blur attempt for the current window, if one was made.
    pub fn blur_outcome(&self) -> Option<&BlurOutcome> {
        self.blur.as_ref()
    }

    /// Delay before the caller should invoke [`embed`](Self::embed) again.
    pub fn retry_delay(&self) -> Option<Duration> {
        match self.state {
            EmbedState::EmbedFailed { retryable: true } => {
                self.policy.delay_after(self.failed_attempts)
            }
            _ => None,
        }
    }

    /// Embed `window` behind the desktop icons.
    ///
    /// Must only be called once `window` is realized by the OS; the host
    /// schedules it after the first show event. Calling it again on an
    /// embedded window is a no-op while the recorded host is still its
    /// parent, and re-embeds otherwise.
    ///
    /// # Errors
    ///
    /// - `HandleNotRealized` if `window` is not a live window (state unchanged)
    /// - `HostContainerNotFound` if the shell has no container yet
    /// - `ReparentFailed` if the OS refused the new parent
    ///
    /// On the last two the window is left untouched as a top-level window.
    pub fn embed<B: ShellBridge + ?Sized>(
        &mut self,
        bridge: &B,
        window: WindowHandle,
    ) -> Result<HostContainerHandle, EmbedError> {
        if !bridge.is_window(window) {
            error!(
                event = "core.desktop.embed_before_realized",
                window = %window,
                state = ?self.state
            );
            return Err(EmbedError::HandleNotRealized { handle: window });
        }

        if let EmbedState::Embedded { host } = self.state {
            if bridge.is_window(host.window()) && bridge.parent_of(window) == Some(host.window()) {
                debug!(
                    event = "core.desktop.embed_already_done",
                    window = %window,
                    host = %host
                );
                return Ok(host);
            }
            warn!(
                event = "core.desktop.host_lost",
                window = %window,
                host = %host,
                message = "Recorded host container is gone, embedding again"
            );
        }

        if self.state == EmbedState::NotRealized {
            self.state = EmbedState::Realized;
        }

        info!(
            event = "core.desktop.embed_started",
            window = %window,
            attempt = self.failed_attempts + 1,
            max_attempts = self.policy.max_attempts()
        );

        // Blur first so it shows even if reparenting fails.
        self.blur_once(bridge, window);

        let enumerator = WindowEnumerator::new(bridge, self.broadcast_timeout);
        let Some(host) = enumerator.find_host_container() else {
            self.failed_attempts += 1;
            return Err(self.fail(EmbedError::HostContainerNotFound {
                attempts: self.failed_attempts,
            }));
        };

        if let Err(e) = bridge.set_parent(window, host.window()) {
            self.failed_attempts += 1;
            return Err(self.fail(EmbedError::ReparentFailed {
                message: e.to_string(),
            }));
        }

        if let Err(e) = bridge.show_no_activate(window) {
            warn!(
                event = "core.desktop.show_failed",
                window = %window,
                error = %e
            );
        }

        self.state = EmbedState::Embedded { host };
        self.failed_attempts = 0;
        info!(
            event = "core.desktop.embed_completed",
            window = %window,
            host = %host
        );
        Ok(host)
    }

    fn blur_once<B: ShellBridge + ?Sized>(&mut self, bridge: &B, window: WindowHandle) {
        if self.blurred == Some(window) {
            return;
        }
        self.blurred = Some(window);

        if self.request.is_disabled() {
            debug!(event = "core.desktop.blur_disabled", window = %window);
            self.blur = Some(BlurOutcome::Disabled);
            return;
        }

        self.blur = Some(match apply_blur(bridge, window, &self.request) {
            Ok(()) => BlurOutcome::Applied,
            Err(e) => BlurOutcome::Unsupported {
                message: e.to_string(),
            },
        });
    }

    fn fail(&mut self, error: EmbedError) -> EmbedError {
        let retryable = self.failed_attempts < self.policy.max_attempts();
        self.state = EmbedState::EmbedFailed { retryable };
        warn!(
            event = "core.desktop.embed_failed",
            error = %error,
            attempts = self.failed_attempts,
            retryable = retryable,
            message = "Widget stays a normal top-level window"
        );
        error
    }
}

impl Default for EmbeddingCoordinator {
    fn default() -> Self {
        Self::new(
            CompositionRequest::default(),
            RetryPolicy::default(),
            DEFAULT_BROADCAST_TIMEOUT,
        )
    }
}
