//! Focus poller - background thread that watches the foreground application.
//!
//! Hosts that deliver their own focus notifications do not need this; it
//! exists for the standalone collector, which has to discover focus changes
//! itself.

use crate::provider::ActiveTargetProvider;
use crate::target::ActiveTarget;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Default polling interval for focus changes.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Callback type for focus change notifications.
pub type FocusCallback = Arc<dyn Fn(ActiveTarget) + Send + Sync + 'static>;

/// Background poller for foreground application changes.
pub struct FocusPoller {
    running: Arc<AtomicBool>,
    handle: Option<std::thread::JoinHandle<()>>,
}

impl Default for FocusPoller {
    fn default() -> Self {
        Self {
            running: Arc::new(AtomicBool::new(false)),
            handle: None,
        }
    }
}

impl FocusPoller {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start polling with the given provider and callback.
    pub fn start<P>(&mut self, provider: Arc<P>, callback: FocusCallback)
    where
        P: ActiveTargetProvider + ?Sized + 'static,
    {
        self.start_with_interval(provider, callback, DEFAULT_POLL_INTERVAL);
    }

    /// Start polling with a custom interval.
    ///
    /// The callback fires for the first target seen and afterwards only when
    /// the foreground target differs from the previous one.
    pub fn start_with_interval<P>(
        &mut self,
        provider: Arc<P>,
        callback: FocusCallback,
        interval: Duration,
    ) where
        P: ActiveTargetProvider + ?Sized + 'static,
    {
        if self.running.load(Ordering::SeqCst) {
            tracing::warn!("FocusPoller already running");
            return;
        }

        self.running.store(true, Ordering::SeqCst);
        let running = Arc::clone(&self.running);

        let handle = std::thread::spawn(move || {
            tracing::info!("FocusPoller started with interval {:?}", interval);

            let mut last_target: Option<ActiveTarget> = None;

            while running.load(Ordering::SeqCst) {
                if let Some(target) = provider.get_active_target() {
                    if last_target != Some(target) {
                        tracing::debug!(active = %target, "focus changed");
                        callback(target);
                        last_target = Some(target);
                    }
                }

                std::thread::sleep(interval);
            }

            tracing::info!("FocusPoller stopped");
        });

        self.handle = Some(handle);
    }

    /// Stop the poller.
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);

        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    /// Check if the poller is running.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

impl Drop for FocusPoller {
    fn drop(&mut self) {
        self.stop();
    }
}
