//! Error types for sip-core

use thiserror::Error;

/// Result type alias for message model operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building or parsing message components
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// URI text could not be parsed
    #[error("Invalid URI: {0}")]
    InvalidUri(String),

    /// name-addr / addr-spec text could not be parsed
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// Header or URI parameter could not be parsed
    #[error("Invalid parameter: {0}")]
    InvalidParam(String),

    /// Via hop could not be parsed
    #[error("Invalid Via header: {0}")]
    InvalidVia(String),

    /// Status code outside the known set
    #[error("Invalid status code: {0}")]
    InvalidStatusCode(u16),

    /// Empty or malformed method token
    #[error("Invalid method: {0}")]
    InvalidMethod(String),
}
