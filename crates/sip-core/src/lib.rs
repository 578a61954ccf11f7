//! # sipserve-sip-core
//!
//! Typed SIP message model used by the sipserve registrar.
//!
//! Requests and responses carry their headers as [`TypedHeader`] values, one
//! strongly typed struct per header kind (Via, From, To, Contact, Call-ID,
//! CSeq, Expires, Reason), so callers use typed accessors instead of looking
//! headers up by name. Component values (URIs, addresses, Via hops,
//! parameters) implement `FromStr`, backed by nom parsers, and `Display`; parsing and serializing
//! whole messages belongs to the transport layer.

pub mod error;
mod parser;
pub mod types;

pub use error::{Error, Result};
pub use types::*;

/// Common imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::types::{
        Address, CSeq, CallId, Contact, Expires, From, HeaderName, Method, Param, Reason,
        Request, Response, Scheme, StatusCode, To, TypedHeader, Uri, Version, Via, ViaHeader,
    };
}
