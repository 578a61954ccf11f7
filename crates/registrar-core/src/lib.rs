//! # Registrar Core
//!
//! The REGISTER half of the sipserve registrar: takes a parsed REGISTER,
//! checks it, records the user's contact address in a binding store and
//! produces the single response for the transaction.
//!
//! This crate provides:
//! - Header extraction and identity validation
//! - Response construction (400 with `Reason`, 200 with a fresh To-tag)
//! - A Redis-shaped binding store abstraction with an in-memory backend
//! - The [`RegistrationPipeline`] tying them together
//!
//! ```rust
//! use std::sync::Arc;
//! use sipserve_registrar_core::{
//!     ChannelTransaction, MemoryBindingStore, RegistrationPipeline, TracingDiagnostics,
//! };
//! use sipserve_sip_core::{Method, Request, Uri};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let pipeline = RegistrationPipeline::new(
//!     Arc::new(MemoryBindingStore::new()),
//!     Arc::new(TracingDiagnostics),
//! );
//!
//! // No Via header: rejected without touching the store
//! let request = Request::new(Method::Register, Uri::sip("example.com"));
//! let (transaction, response) = ChannelTransaction::new();
//! let outcome = pipeline
//!     .handle_register(&request, transaction, &pipeline.context())
//!     .await
//!     .unwrap();
//!
//! assert!(!outcome.is_accepted());
//! assert_eq!(response.await.unwrap().status_code(), 400);
//! # }
//! ```

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod extract;
pub mod logging;
pub mod registrar;
pub mod response;
pub mod storage;
pub mod tag;
pub mod transaction;
pub mod types;
pub mod validate;

pub use storage::{BindingStore, BindingStoreAdapter, MemoryBindingStore};

// Re-exports for convenience
pub use config::RegistrarConfig;
pub use diagnostics::{DiagnosticsSink, MemoryDiagnostics, RegistrationEvent, TracingDiagnostics};
pub use error::{RegistrarError, Result, StoreError, TransactionError, ValidationError};
pub use logging::setup_logging;
pub use registrar::{PipelineState, ProcessedRegistration, RegisterContext, RegistrationPipeline};
pub use response::ResponseBuilder;
pub use tag::{TagGenerator, UuidTagGenerator};
pub use transaction::{ChannelTransaction, ServerTransaction};
pub use types::{Binding, DEFAULT_EXPIRES, RegistrationOutcome, RegistrationRequest, ToTag};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
