//! Provider traits for system state inspection.
//!
//! These traits abstract platform-specific implementations,
//! allowing the extraction logic to remain pure and testable.

use crate::target::ActiveTarget;

/// Provider for detecting the currently focused application.
pub trait ActiveTargetProvider: Send + Sync {
    /// Get the currently focused application, if any.
    fn get_active_target(&self) -> Option<ActiveTarget>;
}

/// Raw metadata queries against a running process.
///
/// Every method is best-effort: `None` means "not available", never an error.
pub trait ProcessInspector: Send + Sync {
    /// Executable stem, e.g. `notepad` for `C:\Windows\notepad.exe`.
    fn executable_name(&self, target: &ActiveTarget) -> Option<String>;

    /// Product name from version metadata, e.g. `Microsoft Windows Operating System`.
    fn product_name(&self, target: &ActiveTarget) -> Option<String>;

    /// Product version string from version metadata.
    fn version_info(&self, target: &ActiveTarget) -> Option<String>;

    /// Whether the process runs as 64 bit.
    fn is_64bit(&self, target: &ActiveTarget) -> Option<bool>;
}

/// Null implementation for testing or unsupported platforms.
pub struct NullProvider;

impl NullProvider {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NullProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl ActiveTargetProvider for NullProvider {
    fn get_active_target(&self) -> Option<ActiveTarget> {
        None
    }
}

impl ProcessInspector for NullProvider {
    fn executable_name(&self, _target: &ActiveTarget) -> Option<String> {
        None
    }

    fn product_name(&self, _target: &ActiveTarget) -> Option<String> {
        None
    }

    fn version_info(&self, _target: &ActiveTarget) -> Option<String> {
        None
    }

    fn is_64bit(&self, _target: &ActiveTarget) -> Option<bool> {
        None
    }
}
