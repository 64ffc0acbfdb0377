//! Cross-platform process inspection backed by `sysinfo`.

use crate::normalize::executable_stem;
use crate::provider::ProcessInspector;
use crate::target::ActiveTarget;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use sysinfo::{Pid, Process, ProcessesToUpdate, System};

/// Reads executable names from the OS process table.
///
/// The process table carries no product metadata, so product name, version
/// and bitness are left to platform-specific inspectors.
#[derive(Default)]
pub struct SysinfoInspector {
    system: Mutex<System>,
}

impl SysinfoInspector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Full path of the process executable, when the OS exposes it.
    pub fn exe_path(&self, pid: u32) -> Option<PathBuf> {
        self.with_process(pid, |process| process.exe().map(Path::to_path_buf))?
    }

    /// Refresh one process entry and read from it under a single lock.
    fn with_process<T>(&self, pid: u32, read: impl FnOnce(&Process) -> T) -> Option<T> {
        let pid = Pid::from_u32(pid);
        let mut system = self.system.lock().ok()?;
        system.refresh_processes(ProcessesToUpdate::Some(&[pid]), true);
        system.process(pid).map(read)
    }
}

fn stem_of(name: &OsStr) -> Option<String> {
    name.to_str()
        .map(|name| executable_stem(name).to_string())
        .filter(|stem| !stem.is_empty())
}

impl ProcessInspector for SysinfoInspector {
    fn executable_name(&self, target: &ActiveTarget) -> Option<String> {
        self.with_process(target.pid, |process| {
            process
                .exe()
                .and_then(Path::file_name)
                .and_then(stem_of)
                .or_else(|| stem_of(process.name()))
        })?
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_own_process_has_a_name() {
        let inspector = SysinfoInspector::new();
        let target = ActiveTarget::from_pid(std::process::id());
        let name = inspector.executable_name(&target);
        assert!(name.is_some_and(|n| !n.is_empty()));
    }

    #[test]
    fn test_name_matches_executable_path() {
        let inspector = SysinfoInspector::new();
        let pid = std::process::id();
        let from_path = inspector
            .exe_path(pid)
            .and_then(|path| path.file_name().and_then(stem_of));

        if let Some(expected) = from_path {
            let name = inspector.executable_name(&ActiveTarget::from_pid(pid));
            assert_eq!(name, Some(expected));
        }
    }

    #[test]
    fn test_missing_process_has_no_name() {
        let inspector = SysinfoInspector::new();
        // Pids near u32::MAX are not handed out in practice.
        let target = ActiveTarget::from_pid(u32::MAX - 1);
        assert_eq!(inspector.executable_name(&target), None);
    }
}
