//! macOS-specific implementation of the providers.

use super::inspect::SysinfoInspector;
use crate::provider::{ActiveTargetProvider, ProcessInspector};
use crate::target::ActiveTarget;
use std::path::Path;

// Native Cocoa imports for efficient frontmost app detection
use objc::runtime::{Class, Object};
use objc::{msg_send, sel, sel_impl};

/// macOS implementation using NSWorkspace for the foreground application
/// and the app bundle's `Info.plist` for product metadata.
#[derive(Default)]
pub struct MacOSProvider {
    processes: SysinfoInspector,
}

impl MacOSProvider {
    pub fn new() -> Self {
        Self::default()
    }

    fn bundle_info(&self, target: &ActiveTarget) -> Option<BundleInfo> {
        let exe = self.processes.exe_path(target.pid)?;
        let app = find_outermost_app(&exe)?;
        read_bundle_info(app)
    }
}

impl ActiveTargetProvider for MacOSProvider {
    fn get_active_target(&self) -> Option<ActiveTarget> {
        get_frontmost_pid().map(ActiveTarget::from_pid)
    }
}

impl ProcessInspector for MacOSProvider {
    fn executable_name(&self, target: &ActiveTarget) -> Option<String> {
        self.processes.executable_name(target)
    }

    fn product_name(&self, target: &ActiveTarget) -> Option<String> {
        self.bundle_info(target).and_then(|info| info.name)
    }

    fn version_info(&self, target: &ActiveTarget) -> Option<String> {
        self.bundle_info(target).and_then(|info| info.version)
    }

    fn is_64bit(&self, _target: &ActiveTarget) -> Option<bool> {
        // 32 bit processes no longer run on supported macOS releases.
        Some(true)
    }
}

/// Get the pid of the frontmost application using native Cocoa APIs.
///
/// Uses NSWorkspace.sharedWorkspace.frontmostApplication.processIdentifier.
fn get_frontmost_pid() -> Option<u32> {
    unsafe {
        let workspace_class = Class::get("NSWorkspace")?;

        // [NSWorkspace sharedWorkspace]
        let shared_workspace: *mut Object = msg_send![workspace_class, sharedWorkspace];
        if shared_workspace.is_null() {
            return None;
        }

        // [workspace frontmostApplication]
        let frontmost_app: *mut Object = msg_send![shared_workspace, frontmostApplication];
        if frontmost_app.is_null() {
            return None;
        }

        // [app processIdentifier]
        let pid: i32 = msg_send![frontmost_app, processIdentifier];
        u32::try_from(pid).ok().filter(|&pid| pid != 0)
    }
}

struct BundleInfo {
    name: Option<String>,
    version: Option<String>,
}

fn is_app_bundle(path: &Path) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some("app")
}

/// Helpers and plug-ins live in nested bundles; the outermost one names the product.
fn find_outermost_app(path: &Path) -> Option<&Path> {
    path.ancestors().filter(|p| is_app_bundle(p)).last()
}

fn read_bundle_info(app_path: &Path) -> Option<BundleInfo> {
    let plist_path = app_path.join("Contents/Info.plist");
    let plist_data = std::fs::read(&plist_path).ok()?;
    let plist: plist::Dictionary = plist::from_bytes(&plist_data).ok()?;

    let string = |key: &str| {
        plist
            .get(key)
            .and_then(|v| v.as_string())
            .map(str::to_string)
    };

    Some(BundleInfo {
        name: string("CFBundleDisplayName").or_else(|| string("CFBundleName")),
        version: string("CFBundleShortVersionString").or_else(|| string("CFBundleVersion")),
    })
}
