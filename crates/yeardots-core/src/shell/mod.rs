//! Platform bridge to the desktop shell.
//!
//! [`ShellBridge`] covers every OS call the embedding core needs. The real
//! implementation is [`Win32Shell`] (Windows only); tests drive the core
//! through an in-memory fake.

pub mod errors;
pub mod traits;
pub mod types;

#[cfg(windows)]
mod win32;

#[cfg(test)]
pub mod fake;

pub use errors::ShellError;
pub use traits::{ShellBridge, TopLevelVisitor};
pub use types::{HostContainerHandle, Visit, WindowHandle};

#[cfg(windows)]
pub use win32::{Win32Shell, from_hwnd, to_hwnd};
