//! Transaction-layer seam
//!
//! A [`ServerTransaction`] is handed to the registrar with each REGISTER.
//! `respond` takes the handle by value, so a handle can answer once.

use async_trait::async_trait;
use sipserve_sip_core::Response;
use tokio::sync::oneshot;

use crate::error::TransactionError;

/// Server transaction able to carry exactly one final response
#[async_trait]
pub trait ServerTransaction: Send + Sized {
    async fn respond(self, response: Response) -> Result<(), TransactionError>;
}

/// Transaction backed by a oneshot channel.
///
/// Useful for wiring the registrar to a transport task, and in tests.
#[derive(Debug)]
pub struct ChannelTransaction {
    tx: oneshot::Sender<Response>,
}

impl ChannelTransaction {
    /// Handle plus the receiver its response arrives on
    pub fn new() -> (Self, oneshot::Receiver<Response>) {
        let (tx, rx) = oneshot::channel();
        (Self { tx }, rx)
    }
}

#[async_trait]
impl ServerTransaction for ChannelTransaction {
    async fn respond(self, response: Response) -> Result<(), TransactionError> {
        self.tx
            .send(response)
            .map_err(|_| TransactionError::Terminated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sipserve_sip_core::StatusCode;

    #[tokio::test]
    async fn test_response_reaches_receiver() {
        let (tx, rx) = ChannelTransaction::new();
        tx.respond(Response::new(StatusCode::Ok)).await.unwrap();
        assert_eq!(rx.await.unwrap().status, StatusCode::Ok);
    }

    #[tokio::test]
    async fn test_dropped_receiver_means_terminated() {
        let (tx, rx) = ChannelTransaction::new();
        drop(rx);
        assert_eq!(
            tx.respond(Response::new(StatusCode::Ok)).await,
            Err(TransactionError::Terminated)
        );
    }
}
