//! Process readiness and lifecycle transitions.
//!
//! The readiness flag is written at exactly two points: once when startup
//! completes and once when shutdown begins. Readers (the `/ready` probe, tests)
//! only ever load it, so an atomic with acquire/release ordering is all the
//! synchronization required.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum_server::Handle;

use crate::config::LIFECYCLE_LOG_TARGET;

/// Shared readiness flag, cloneable across handlers and tasks.
///
/// Starts out not ready.
#[derive(Clone, Debug, Default)]
pub struct Readiness {
    ready: Arc<AtomicBool>,
}

impl Readiness {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    pub fn mark_not_ready(&self) {
        self.ready.store(false, Ordering::Release);
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }
}

/// Owns the startup and shutdown transitions of a running server.
///
/// Clones share the same readiness flag and server handle, so the signal
/// handler and the server runner observe each other's transitions. Both
/// transitions run under one lock so a signal racing startup always wins.
#[derive(Clone)]
pub struct Lifecycle {
    readiness: Readiness,
    shutting_down: Arc<Mutex<bool>>,
    handle: Handle,
    grace: Duration,
}

impl Lifecycle {
    pub fn new(readiness: Readiness, handle: Handle, grace: Duration) -> Self {
        Self {
            readiness,
            shutting_down: Arc::new(Mutex::new(false)),
            handle,
            grace,
        }
    }

    pub fn readiness(&self) -> &Readiness {
        &self.readiness
    }

    pub fn handle(&self) -> &Handle {
        &self.handle
    }

    /// Startup finished: the listener is bound and traffic may be accepted.
    ///
    /// No-op once shutdown has begun, so an early signal is never undone.
    pub fn startup_complete(&self) {
        let shutting_down = self.lock_shutting_down();
        if *shutting_down {
            tracing::info!(
                target: LIFECYCLE_LOG_TARGET,
                "Shutdown already initiated, not marking ready"
            );
            return;
        }
        self.readiness.mark_ready();
        tracing::info!(
            target: LIFECYCLE_LOG_TARGET,
            ready = true,
            "Application startup complete"
        );
    }

    pub fn is_shutting_down(&self) -> bool {
        *self.lock_shutting_down()
    }

    /// Stop advertising readiness and drain in-flight connections.
    ///
    /// Safe to call more than once; later calls only repeat the drain request.
    pub fn begin_shutdown(&self) {
        let mut shutting_down = self.lock_shutting_down();
        *shutting_down = true;
        let was_ready = self.readiness.is_ready();
        self.readiness.mark_not_ready();
        self.handle.graceful_shutdown(Some(self.grace));

        if was_ready {
            tracing::info!(
                target: LIFECYCLE_LOG_TARGET,
                ready = false,
                grace_secs = self.grace.as_secs(),
                "Graceful shutdown initiated"
            );
        }
    }

    fn lock_shutting_down(&self) -> std::sync::MutexGuard<'_, bool> {
        self.shutting_down
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
