//! Opaque handle to the software the user is currently working in.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Handle to the active software context, as supplied by the host.
///
/// Only the inspection layer looks inside; everything else compares and
/// forwards it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActiveTarget {
    /// Owning process id (0 means the host could not resolve a process)
    pub pid: u32,

    /// Platform window id, when the host has one
    #[serde(default)]
    pub window_id: Option<u64>,
}

impl ActiveTarget {
    pub fn from_pid(pid: u32) -> Self {
        Self {
            pid,
            window_id: None,
        }
    }

    pub fn with_window(mut self, window_id: u64) -> Self {
        self.window_id = Some(window_id);
        self
    }

    /// A zero pid shows up transiently while windows are being torn down.
    pub fn is_valid(&self) -> bool {
        self.pid != 0
    }
}

impl fmt::Display for ActiveTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.window_id {
            Some(window) => write!(f, "pid {} (window {:#x})", self.pid, window),
            None => write!(f, "pid {}", self.pid),
        }
    }
}
