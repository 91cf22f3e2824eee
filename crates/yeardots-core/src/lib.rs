//! yeardots-core: Core library for the yeardots desktop widget
//!
//! This library holds everything the widget needs apart from the native host
//! window itself: the desktop embedding core, the rounded region masker,
//! configuration, the calendar model and dot-grid layout, and the position store.
//!
//! # Main Entry Points
//!
//! - [`desktop`] - Find the desktop host container, blur, reparent, clip regions
//! - [`shell`] - Platform capability trait wrapping the undocumented OS calls
//! - [`context`] - The single widget context the host window drives
//! - [`config`] - Configuration management
//! - [`layout`] - Dot-grid scene computation

pub mod config;
pub mod context;
pub mod desktop;
pub mod errors;
pub mod events;
pub mod layout;
pub mod logging;
pub mod position;
pub mod progress;
pub mod shell;

// Re-export commonly used types at crate root for convenience
pub use config::WidgetConfig;
pub use context::{EmbedStep, WidgetContext};
pub use desktop::{
    BlurOutcome, ClipRegion, CompositionRequest, EmbedError, EmbedState, EmbeddingCoordinator,
    RegionMasker, RetryPolicy,
};
pub use events::{EventSubscriber, WidgetEvent};
pub use layout::{GridLayout, Scene};
pub use position::{Position, PositionError, PositionStore};
pub use progress::YearProgress;
pub use shell::{HostContainerHandle, ShellBridge, ShellError, WindowHandle};

#[cfg(windows)]
pub use shell::Win32Shell;

// Re-export logging initialization
pub use logging::init_logging;
