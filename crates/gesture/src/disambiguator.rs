//! Timer-driven wrapper around [`GestureMachine`].

use crate::machine::{GestureMachine, PressOutcome};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// The action a press sequence resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GestureAction {
    /// Single press: open the interactive report.
    OpenReport,
    /// Double press: copy the text report to the clipboard.
    CopyToClipboard,
}

/// Callback type for resolved gestures.
pub type GestureCallback = Arc<dyn Fn(GestureAction) + Send + Sync + 'static>;

struct Inner {
    machine: GestureMachine,
    pending: Option<CancellationToken>,
}

/// Resolves presses of one gesture into [`GestureAction`]s.
///
/// The deferred "open report" runs as a tokio task. Presses and timer expiry
/// both go through the same mutex and the machine's generation check, so for
/// any press sequence exactly one action fires. Callbacks run outside the lock.
pub struct GestureDisambiguator {
    inner: Arc<Mutex<Inner>>,
    callback: GestureCallback,
    runtime: Handle,
}

impl GestureDisambiguator {
    /// Create a disambiguator on the current tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    pub fn new(window: Duration, callback: GestureCallback) -> Self {
        Self::with_handle(Handle::current(), window, callback)
    }

    /// Create a disambiguator that schedules its timer on `runtime`.
    ///
    /// Use this when presses arrive on a thread that is not a runtime worker.
    pub fn with_handle(runtime: Handle, window: Duration, callback: GestureCallback) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                machine: GestureMachine::new(window),
                pending: None,
            })),
            callback,
            runtime,
        }
    }

    pub fn window(&self) -> Duration {
        self.lock().machine.window()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a press now.
    pub fn press(&self) {
        // Read the clock inside the runtime so paused test time applies.
        let now = {
            let _enter = self.runtime.enter();
            Instant::now()
        };
        self.press_at(now);
    }

    fn press_at(&self, now: Instant) {
        let mut fire = Vec::with_capacity(2);
        {
            let mut inner = self.lock();
            match inner.machine.press(now) {
                PressOutcome::Armed {
                    generation,
                    deadline,
                } => {
                    tracing::trace!(generation, "gesture armed");
                    self.schedule(&mut inner, generation, deadline);
                }
                PressOutcome::DoublePress { cancelled } => {
                    tracing::debug!(cancelled, "double press");
                    if let Some(token) = inner.pending.take() {
                        token.cancel();
                    }
                    fire.push(GestureAction::CopyToClipboard);
                }
                PressOutcome::ExpiredThenArmed {
                    expired,
                    generation,
                    deadline,
                } => {
                    tracing::debug!(expired, generation, "late press closed previous window");
                    if let Some(token) = inner.pending.take() {
                        token.cancel();
                    }
                    fire.push(GestureAction::OpenReport);
                    self.schedule(&mut inner, generation, deadline);
                }
                PressOutcome::Ignored => {
                    tracing::trace!("extra press ignored");
                }
            }
        }

        for action in fire {
            (self.callback)(action);
        }
    }

    fn schedule(&self, inner: &mut Inner, generation: u64, deadline: Instant) {
        let token = CancellationToken::new();
        inner.pending = Some(token.clone());

        let shared = Arc::clone(&self.inner);
        let callback = Arc::clone(&self.callback);

        self.runtime.spawn(async move {
            tokio::select! {
                biased;
                _ = token.cancelled() => {}
                _ = tokio::time::sleep_until(deadline) => {
                    let open = {
                        let mut inner = shared.lock().unwrap_or_else(PoisonError::into_inner);
                        let open = inner.machine.expire(generation);
                        if open {
                            inner.pending = None;
                        }
                        open
                    };
                    if open {
                        callback(GestureAction::OpenReport);
                    }
                }
            }
        });
    }

    /// Cancel any pending "open report" without firing it.
    pub fn cancel_pending(&self) {
        let mut inner = self.lock();
        inner.machine.reset();
        if let Some(token) = inner.pending.take() {
            token.cancel();
        }
    }
}

impl Drop for GestureDisambiguator {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const W: Duration = Duration::from_millis(500);

    fn recording() -> (GestureCallback, Arc<Mutex<Vec<GestureAction>>>) {
        let actions = Arc::new(Mutex::new(Vec::new()));
        let actions_clone = Arc::clone(&actions);
        let callback: GestureCallback = Arc::new(move |action| {
            actions_clone.lock().unwrap().push(action);
        });
        (callback, actions)
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_press_opens_report_once() {
        let (callback, actions) = recording();
        let gestures = GestureDisambiguator::new(W, callback);

        gestures.press();
        tokio::time::sleep(W - Duration::from_millis(1)).await;
        assert!(actions.lock().unwrap().is_empty());

        tokio::time::sleep(W * 4).await;
        assert_eq!(*actions.lock().unwrap(), vec![GestureAction::OpenReport]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_double_press_copies_and_never_opens() {
        let (callback, actions) = recording();
        let gestures = GestureDisambiguator::new(W, callback);

        gestures.press();
        tokio::time::sleep(W / 5).await;
        gestures.press();
        assert_eq!(*actions.lock().unwrap(), vec![GestureAction::CopyToClipboard]);

        tokio::time::sleep(W * 4).await;
        assert_eq!(*actions.lock().unwrap(), vec![GestureAction::CopyToClipboard]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_press_after_window_is_a_new_single() {
        let (callback, actions) = recording();
        let gestures = GestureDisambiguator::new(W, callback);

        gestures.press();
        tokio::time::sleep(W * 2).await;
        gestures.press();
        tokio::time::sleep(W * 2).await;

        assert_eq!(
            *actions.lock().unwrap(),
            vec![GestureAction::OpenReport, GestureAction::OpenReport]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_late_press_before_timer_runs_fires_open_once() {
        let (callback, actions) = recording();
        let gestures = GestureDisambiguator::new(W, callback);

        let t0 = Instant::now();
        gestures.press_at(t0);
        // Deliver the second press at exactly the boundary, before the runtime
        // has had a chance to run the timer task.
        gestures.press_at(t0 + W);
        assert_eq!(*actions.lock().unwrap(), vec![GestureAction::OpenReport]);

        tokio::time::sleep(W * 4).await;
        assert_eq!(
            *actions.lock().unwrap(),
            vec![GestureAction::OpenReport, GestureAction::OpenReport]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_pending_suppresses_open() {
        let (callback, actions) = recording();
        let gestures = GestureDisambiguator::new(W, callback);

        gestures.press();
        gestures.cancel_pending();
        tokio::time::sleep(W * 4).await;

        assert!(actions.lock().unwrap().is_empty());
    }

    #[test]
    fn test_presses_from_foreign_thread() {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_time()
            .build()
            .unwrap();
        let (callback, actions) = recording();
        let gestures = GestureDisambiguator::with_handle(
            runtime.handle().clone(),
            Duration::from_millis(30),
            callback,
        );

        gestures.press();
        std::thread::sleep(Duration::from_millis(300));

        assert_eq!(*actions.lock().unwrap(), vec![GestureAction::OpenReport]);
    }
}
