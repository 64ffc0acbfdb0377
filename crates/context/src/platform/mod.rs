//! Platform-specific implementations.

mod inspect;

#[cfg(target_os = "macos")]
mod macos;

pub use inspect::SysinfoInspector;

#[cfg(target_os = "macos")]
pub use macos::MacOSProvider;

/// Source of foreground-application changes for the current platform.
#[cfg(target_os = "macos")]
pub type PlatformFocusProvider = MacOSProvider;

#[cfg(not(target_os = "macos"))]
pub type PlatformFocusProvider = crate::provider::NullProvider;

/// Process inspector for the current platform.
#[cfg(target_os = "macos")]
pub type PlatformInspector = MacOSProvider;

#[cfg(not(target_os = "macos"))]
pub type PlatformInspector = SysinfoInspector;
