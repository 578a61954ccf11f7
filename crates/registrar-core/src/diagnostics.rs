//! Registration diagnostics
//!
//! The pipeline reports what happened to each request through a
//! [`DiagnosticsSink`] it is handed at construction. [`TracingDiagnostics`]
//! is the production sink; [`MemoryDiagnostics`] keeps events for tests.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{error, info, warn};

/// Something worth reporting about one REGISTER
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationEvent {
    Received {
        call_id: Option<String>,
    },
    Rejected {
        reason: String,
    },
    Accepted {
        user: String,
        host: String,
        port: u16,
        expires: u32,
    },
    /// The binding was not stored; the client was still answered 200 OK
    PersistenceFailed {
        user: String,
        error: String,
    },
    GenerationFailed {
        error: String,
    },
    ResponseFailed {
        error: String,
    },
}

/// Receives registration events. Must not block.
pub trait DiagnosticsSink: Send + Sync {
    fn record(&self, event: RegistrationEvent);
}

/// Forwards events to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl DiagnosticsSink for TracingDiagnostics {
    fn record(&self, event: RegistrationEvent) {
        match event {
            RegistrationEvent::Received { call_id } => {
                info!(call_id = call_id.as_deref().unwrap_or("-"), "REGISTER received");
            }
            RegistrationEvent::Rejected { reason } => {
                warn!(%reason, "REGISTER rejected");
            }
            RegistrationEvent::Accepted {
                user,
                host,
                port,
                expires,
            } => {
                info!(%user, %host, port, expires, "REGISTER accepted");
            }
            RegistrationEvent::PersistenceFailed { user, error } => {
                error!(%user, %error, "Failed to persist binding, answering 200 OK anyway");
            }
            RegistrationEvent::GenerationFailed { error } => {
                error!(%error, "Failed to generate To-tag");
            }
            RegistrationEvent::ResponseFailed { error } => {
                error!(%error, "Failed to send REGISTER response");
            }
        }
    }
}

/// Collects events in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryDiagnostics {
    events: Arc<Mutex<Vec<RegistrationEvent>>>,
}

impl MemoryDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far
    pub fn events(&self) -> Vec<RegistrationEvent> {
        self.events.lock().clone()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl DiagnosticsSink for MemoryDiagnostics {
    fn record(&self, event: RegistrationEvent) {
        self.events.lock().push(event);
    }
}
