//! Per-request execution context

use std::time::Duration;

use tokio_util::sync::CancellationToken;

/// Deadline and cancellation for one REGISTER.
///
/// Both only bound the binding store call. Cancelling after validation
/// still yields a 200 OK, the binding is simply not stored.
#[derive(Debug, Clone)]
pub struct RegisterContext {
    cancellation: CancellationToken,
    timeout: Duration,
}

impl RegisterContext {
    pub fn new(timeout: Duration) -> Self {
        Self {
            cancellation: CancellationToken::new(),
            timeout,
        }
    }

    /// Context cancelled together with `parent`
    pub fn child_of(parent: &CancellationToken, timeout: Duration) -> Self {
        Self {
            cancellation: parent.child_token(),
            timeout,
        }
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancellation
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn cancel(&self) {
        self.cancellation.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }
}
