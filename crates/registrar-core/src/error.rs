//! Error types for registrar-core
//!
//! Three families matter to the pipeline:
//!
//! - [`ValidationError`]: the request is malformed or inconsistent. Always
//!   answered with a 400 carrying a `Reason` header, never retried.
//! - [`StoreError`]: the binding could not be persisted. Logged and
//!   swallowed; the client still gets 200 OK.
//! - [`RegistrarError::TagGeneration`]: the response could not be built.
//!   Answered with a 500 for that single request.

use std::time::Duration;

use sipserve_sip_core::{HeaderName, StatusCode};
use thiserror::Error;

/// Result type alias for registrar operations
pub type Result<T> = std::result::Result<T, RegistrarError>;

/// A REGISTER request that cannot be accepted as sent
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required header is absent (or lacks the part the registrar needs)
    #[error("Missing {0} header in request")]
    MissingHeader(HeaderName),

    /// A required header parameter is absent
    #[error("Missing {param} parameter in {header} header")]
    MissingParameter {
        header: HeaderName,
        param: &'static str,
    },

    /// The Contact header does not carry a usable SIP address
    #[error("Cannot extract a reachable address from the Contact header")]
    InvalidContact,

    /// From, To and Contact name different users
    #[error("Usernames do not match in headers To, From, Contact")]
    IdentityMismatch {
        /// Every header pair whose user parts differ
        disagreeing: Vec<(HeaderName, HeaderName)>,
    },
}

impl ValidationError {
    /// Validation failures are always client errors
    pub fn status_code(&self) -> StatusCode {
        StatusCode::BadRequest
    }

    /// Text of the `Reason` header sent back to the registrant
    pub fn reason_text(&self) -> &'static str {
        match self {
            ValidationError::MissingHeader(HeaderName::Via) => "Missing Via header",
            ValidationError::MissingParameter {
                header: HeaderName::Via,
                ..
            } => "Missing branch in Via",
            ValidationError::MissingHeader(HeaderName::From) => {
                "No username specified in From header"
            }
            ValidationError::MissingHeader(HeaderName::To) => "No username specified in To header",
            ValidationError::MissingHeader(HeaderName::Contact) => {
                "No username specified in Contact header"
            }
            ValidationError::IdentityMismatch { .. } => {
                "Usernames do not match in headers To, From, Contact"
            }
            ValidationError::InvalidContact => "Cannot extract the contact header",
            ValidationError::MissingHeader(HeaderName::CSeq) => "Cannot extract the cseq number",
            ValidationError::MissingHeader(HeaderName::CallId) => "Cannot extract the callid",
            ValidationError::MissingParameter {
                header: HeaderName::From,
                ..
            } => "Cannot extract the tag from From header",
            ValidationError::MissingHeader(_) | ValidationError::MissingParameter { .. } => {
                "Malformed request"
            }
        }
    }
}

/// Failure of the binding store or of the call made to it
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Store backend error: {0}")]
    Backend(String),

    #[error("Store operation timed out after {0:?}")]
    Timeout(Duration),

    #[error("Store operation cancelled")]
    Cancelled,

    /// A stored record does not have the expected layout
    #[error("Corrupt binding record at {key}: {detail}")]
    Corrupt { key: String, detail: String },
}

/// Failure to hand a response to the transaction layer
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransactionError {
    #[error("Failed to send response: {0}")]
    SendFailed(String),

    #[error("Transaction already terminated")]
    Terminated,
}

/// Main error type for registrar operations
#[derive(Error, Debug)]
pub enum RegistrarError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Transaction(#[from] TransactionError),

    /// The To-tag identifier could not be generated
    #[error("To-tag generation failed: {0}")]
    TagGeneration(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<std::io::Error> for RegistrarError {
    fn from(err: std::io::Error) -> Self {
        RegistrarError::Config(err.to_string())
    }
}

impl From<toml::de::Error> for RegistrarError {
    fn from(err: toml::de::Error) -> Self {
        RegistrarError::Config(format!("TOML error: {}", err))
    }
}
