use std::fmt;

/// Opaque identifier of an OS window.
///
/// Never owned: the OS window behind it may disappear at any time, so every
/// bridge call treats a stale handle as "not found" rather than as a fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct WindowHandle(isize);

impl WindowHandle {
    pub const NULL: WindowHandle = WindowHandle(0);

    pub const fn from_raw(raw: isize) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> isize {
        self.0
    }

    pub const fn is_null(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for WindowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:X}", self.0)
    }
}

/// The desktop's background container window (`WorkerW`).
///
/// Discovered, never created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HostContainerHandle(WindowHandle);

impl HostContainerHandle {
    pub const fn new(window: WindowHandle) -> Self {
        Self(window)
    }

    pub const fn window(self) -> WindowHandle {
        self.0
    }
}

impl fmt::Display for HostContainerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Result of visiting one window during enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    Continue,
    Stop,
}
