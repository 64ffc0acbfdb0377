//! Delivery of host events.
//!
//! Focus changes go through a queue: producers (the focus poller, a host
//! binding) submit without blocking, and a single worker thread hands them to
//! the handler one at a time, in submission order.
//!
//! Gesture presses skip the queue and are handled on the submitting thread.
//! Their timing decides single versus double press, so they must not wait
//! behind focus events whose inspection can take up to the extraction
//! timeout each.

use crate::error::{CollectorError, Result};
use crossbeam_channel::{Receiver, Sender};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use vercol_events::HostEvent;

/// Consumer of dispatched host events.
///
/// Called from the dispatcher worker for focus changes and from producer
/// threads for gesture presses, possibly at the same time.
pub trait HostEventHandler: Send + Sync {
    fn handle(&self, event: &HostEvent);
}

enum DispatchRequest {
    Event(HostEvent),
    /// Acknowledged once everything queued before it has been handled.
    Flush(Sender<()>),
    Shutdown,
}

/// Focus queue plus inline gesture path in front of a [`HostEventHandler`].
pub struct HostDispatcher {
    submitter: HostEventSubmitter,
    worker_handle: Option<JoinHandle<()>>,
}

impl HostDispatcher {
    /// Spawn the worker thread.
    pub fn start(handler: Arc<dyn HostEventHandler>) -> Result<Self> {
        let (request_tx, request_rx) = crossbeam_channel::unbounded();

        let worker_handler = Arc::clone(&handler);
        let worker_handle = std::thread::Builder::new()
            .name("vercol-dispatch".into())
            .spawn(move || dispatch_loop(worker_handler, request_rx))
            .map_err(|e| CollectorError::Spawn(e.to_string()))?;

        Ok(Self {
            submitter: HostEventSubmitter {
                request_tx,
                handler,
                running: Arc::new(AtomicBool::new(true)),
            },
            worker_handle: Some(worker_handle),
        })
    }

    /// Deliver an event. Returns `false` once the dispatcher has stopped.
    pub fn submit(&self, event: HostEvent) -> bool {
        self.submitter.submit(event)
    }

    /// A cheap handle producers on other threads can submit through.
    pub fn submitter(&self) -> HostEventSubmitter {
        self.submitter.clone()
    }

    /// Block until every focus event submitted so far has been handled.
    pub fn flush(&self) {
        let (ack_tx, ack_rx) = crossbeam_channel::bounded(1);
        if self
            .submitter
            .request_tx
            .send(DispatchRequest::Flush(ack_tx))
            .is_ok()
        {
            let _ = ack_rx.recv();
        }
    }

    /// Handle what is already queued, then stop the worker.
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        self.submitter.running.store(false, Ordering::SeqCst);
        let _ = self.submitter.request_tx.send(DispatchRequest::Shutdown);
        if let Some(handle) = self.worker_handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for HostDispatcher {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Cloneable producer side of a [`HostDispatcher`].
#[derive(Clone)]
pub struct HostEventSubmitter {
    request_tx: Sender<DispatchRequest>,
    handler: Arc<dyn HostEventHandler>,
    running: Arc<AtomicBool>,
}

impl HostEventSubmitter {
    /// Deliver an event. Returns `false` once the dispatcher has stopped.
    ///
    /// Focus changes are queued. Gesture presses are handled before this
    /// returns.
    pub fn submit(&self, event: HostEvent) -> bool {
        if !self.running.load(Ordering::SeqCst) {
            return false;
        }
        match event {
            HostEvent::GesturePressed(_) => {
                handle_guarded(self.handler.as_ref(), &event);
                true
            }
            HostEvent::FocusChanged(_) => {
                self.request_tx.send(DispatchRequest::Event(event)).is_ok()
            }
        }
    }
}

/// A panicking handler costs one event, not the dispatcher.
fn handle_guarded(handler: &dyn HostEventHandler, event: &HostEvent) {
    if catch_unwind(AssertUnwindSafe(|| handler.handle(event))).is_err() {
        tracing::error!(?event, "host event handler panicked");
    }
}

fn dispatch_loop(handler: Arc<dyn HostEventHandler>, request_rx: Receiver<DispatchRequest>) {
    tracing::debug!("dispatcher started");

    while let Ok(request) = request_rx.recv() {
        match request {
            DispatchRequest::Event(event) => handle_guarded(handler.as_ref(), &event),
            DispatchRequest::Flush(ack) => {
                let _ = ack.send(());
            }
            DispatchRequest::Shutdown => break,
        }
    }

    tracing::debug!("dispatcher stopped");
}
