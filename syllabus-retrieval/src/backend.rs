//! Bounded calls into external capabilities.
//!
//! The call runs on a detached worker thread and the caller waits at most
//! `timeout`. A late worker is abandoned; its result is dropped when it
//! finishes.

use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use syllabus_core::errors::BackendError;
use syllabus_core::Course;
use tracing::warn;

/// Run `call` with a deadline. Timeouts, worker panics and backend errors
/// all come back as [`BackendError`].
///
/// Each call gets its own worker thread. On timeout the caller returns at once
/// and the worker is left to run to completion; a thread cannot be cancelled,
/// so a backend that never returns keeps one thread alive per timed-out call.
/// Backends must enforce their own upper bound on blocking work.
pub fn call_bounded<F>(backend: &str, timeout: Duration, call: F) -> Result<Vec<Course>, BackendError>
where
    F: FnOnce() -> Result<Vec<Course>, BackendError> + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    let spawned = thread::Builder::new()
        .name(format!("backend-{backend}"))
        .spawn(move || {
            // The receiver is gone if the caller already timed out.
            let _ = tx.send(call());
        });
    if let Err(e) = spawned {
        return Err(BackendError::Failed {
            backend: backend.to_string(),
            reason: format!("could not start worker: {e}"),
        });
    }

    match rx.recv_timeout(timeout) {
        Ok(result) => result,
        Err(RecvTimeoutError::Timeout) => Err(BackendError::TimedOut {
            backend: backend.to_string(),
            timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
        }),
        Err(RecvTimeoutError::Disconnected) => Err(BackendError::Failed {
            backend: backend.to_string(),
            reason: "worker exited without a result".to_string(),
        }),
    }
}

/// Collapse a backend result to "courses or nothing", logging the failure.
pub fn or_empty(result: Result<Vec<Course>, BackendError>) -> (Vec<Course>, Option<BackendError>) {
    match result {
        Ok(courses) => (courses, None),
        Err(e) => {
            warn!(backend = e.backend(), error = %e, "backend call failed, treated as no results");
            (Vec::new(), Some(e))
        }
    }
}
