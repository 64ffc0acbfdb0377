//! Identity extraction: active target → version record.

use crate::error::ExtractionError;
use crate::normalize::normalize_name;
use crate::provider::ProcessInspector;
use crate::target::ActiveTarget;
use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, TrySendError};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use vercol_ledger::{Bitness, Version, VersionRecord};

/// Default upper bound on one inspection round.
pub const DEFAULT_EXTRACTION_TIMEOUT: Duration = Duration::from_millis(250);

/// Everything the inspection layer reported for one target.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawIdentity {
    pub executable_name: Option<String>,
    pub product_name: Option<String>,
    pub version: Option<String>,
    pub is_64bit: Option<bool>,
}

impl RawIdentity {
    /// Query every field from `inspector`.
    pub fn gather(inspector: &dyn ProcessInspector, target: &ActiveTarget) -> Self {
        Self {
            executable_name: inspector.executable_name(target),
            product_name: inspector.product_name(target),
            version: inspector.version_info(target),
            is_64bit: inspector.is_64bit(target),
        }
    }

    /// Build the canonical record. Fails only when no name is usable;
    /// a missing version becomes the sentinel.
    pub fn into_record(self, pid: u32) -> Result<VersionRecord, ExtractionError> {
        let name = normalize_name(self.executable_name.as_deref(), self.product_name.as_deref())
            .ok_or(ExtractionError::NameUnavailable { pid })?;

        Ok(VersionRecord {
            name,
            version: Version::from_raw(self.version.as_deref()),
            bitness: self.is_64bit.map(Bitness::from_is_64bit),
        })
    }
}

/// One inspection handed to the worker.
struct InspectRequest {
    target: ActiveTarget,
    reply: Sender<std::thread::Result<RawIdentity>>,
}

/// Turns active targets into version records with a bounded wait.
///
/// Inspection runs on one long-lived worker thread, one request at a time.
/// If the worker has not answered within the timeout the observation is
/// abandoned. While that stalled request is still running, further requests
/// fail fast with [`ExtractionError::Busy`] instead of piling up behind it.
/// Clones share the worker.
#[derive(Clone)]
pub struct IdentityExtractor {
    request_tx: Sender<InspectRequest>,
    in_flight: Arc<AtomicBool>,
    timeout: Duration,
}

impl IdentityExtractor {
    pub fn new(inspector: Arc<dyn ProcessInspector>) -> Self {
        Self::with_timeout(inspector, DEFAULT_EXTRACTION_TIMEOUT)
    }

    pub fn with_timeout(inspector: Arc<dyn ProcessInspector>, timeout: Duration) -> Self {
        let (request_tx, request_rx) = crossbeam_channel::bounded(1);
        let in_flight = Arc::new(AtomicBool::new(false));
        let worker_in_flight = Arc::clone(&in_flight);

        // On failure the receiver is dropped with the closure and every
        // extraction reports the worker as unavailable.
        if let Err(e) = std::thread::Builder::new()
            .name("vercol-inspect".into())
            .spawn(move || inspect_loop(inspector, request_rx, worker_in_flight))
        {
            tracing::error!(error = %e, "failed to start inspection worker");
        }

        Self {
            request_tx,
            in_flight,
            timeout,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Extract the identity of `target`.
    pub fn extract(&self, target: &ActiveTarget) -> Result<VersionRecord, ExtractionError> {
        if !target.is_valid() {
            return Err(ExtractionError::InvalidHandle);
        }

        let raw = self.inspect_timeboxed(*target)?;
        raw.into_record(target.pid)
    }

    fn inspect_timeboxed(&self, target: ActiveTarget) -> Result<RawIdentity, ExtractionError> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            tracing::debug!(active = %target, "inspection skipped, worker busy");
            return Err(ExtractionError::Busy);
        }

        let (reply_tx, reply_rx) = crossbeam_channel::bounded(1);
        let request = InspectRequest {
            target,
            reply: reply_tx,
        };
        if let Err(e) = self.request_tx.try_send(request) {
            self.in_flight.store(false, Ordering::SeqCst);
            return Err(match e {
                TrySendError::Full(_) => ExtractionError::Busy,
                TrySendError::Disconnected(_) => {
                    ExtractionError::WorkerUnavailable("worker has stopped".into())
                }
            });
        }

        match reply_rx.recv_timeout(self.timeout) {
            Ok(Ok(raw)) => Ok(raw),
            Ok(Err(_)) => Err(ExtractionError::InspectorPanicked),
            Err(RecvTimeoutError::Timeout) => {
                tracing::warn!(active = %target, timeout = ?self.timeout, "inspection timed out");
                Err(ExtractionError::TimedOut(self.timeout))
            }
            Err(RecvTimeoutError::Disconnected) => Err(ExtractionError::WorkerUnavailable(
                "worker exited without answering".into(),
            )),
        }
    }
}

impl std::fmt::Debug for IdentityExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityExtractor")
            .field("timeout", &self.timeout)
            .field("in_flight", &self.in_flight.load(Ordering::SeqCst))
            .finish()
    }
}

/// Worker loop. Exits once every extractor clone is gone.
fn inspect_loop(
    inspector: Arc<dyn ProcessInspector>,
    request_rx: Receiver<InspectRequest>,
    in_flight: Arc<AtomicBool>,
) {
    while let Ok(request) = request_rx.recv() {
        let result = catch_unwind(AssertUnwindSafe(|| {
            RawIdentity::gather(inspector.as_ref(), &request.target)
        }));
        in_flight.store(false, Ordering::SeqCst);
        // Receiver is gone if the caller already timed out.
        let _ = request.reply.send(result);
    }
    tracing::debug!("inspection worker stopped");
}
