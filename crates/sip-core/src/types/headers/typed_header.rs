//! Strongly typed headers

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::call_id::CallId;
use crate::types::contact::Contact;
use crate::types::cseq::CSeq;
use crate::types::expires::Expires;
use crate::types::from::From as FromHeaderValue;
use crate::types::headers::header_name::HeaderName;
use crate::types::reason::Reason;
use crate::types::to::To as ToHeaderValue;
use crate::types::via::Via;

/// A SIP header with a typed value.
///
/// Headers the registrar does not interpret are kept as [`TypedHeader::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypedHeader {
    Via(Via),
    From(FromHeaderValue),
    To(ToHeaderValue),
    Contact(Contact),
    CallId(CallId),
    CSeq(CSeq),
    Expires(Expires),
    Reason(Reason),
    ContentLength(u32),
    Server(String),
    Other { name: String, value: String },
}

impl TypedHeader {
    /// Untyped header with the given name and raw value
    pub fn other(name: impl Into<String>, value: impl Into<String>) -> Self {
        TypedHeader::Other {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn name(&self) -> HeaderName {
        match self {
            TypedHeader::Via(_) => HeaderName::Via,
            TypedHeader::From(_) => HeaderName::From,
            TypedHeader::To(_) => HeaderName::To,
            TypedHeader::Contact(_) => HeaderName::Contact,
            TypedHeader::CallId(_) => HeaderName::CallId,
            TypedHeader::CSeq(_) => HeaderName::CSeq,
            TypedHeader::Expires(_) => HeaderName::Expires,
            TypedHeader::Reason(_) => HeaderName::Reason,
            TypedHeader::ContentLength(_) => HeaderName::ContentLength,
            TypedHeader::Server(_) => HeaderName::Server,
            TypedHeader::Other { name, .. } => HeaderName::from_name(name),
        }
    }

    /// Value as it would appear after the colon
    pub fn value_string(&self) -> String {
        match self {
            TypedHeader::Via(v) => v.to_string(),
            TypedHeader::From(v) => v.to_string(),
            TypedHeader::To(v) => v.to_string(),
            TypedHeader::Contact(v) => v.to_string(),
            TypedHeader::CallId(v) => v.to_string(),
            TypedHeader::CSeq(v) => v.to_string(),
            TypedHeader::Expires(v) => v.to_string(),
            TypedHeader::Reason(v) => v.to_string(),
            TypedHeader::ContentLength(v) => v.to_string(),
            TypedHeader::Server(v) => v.clone(),
            TypedHeader::Other { value, .. } => value.clone(),
        }
    }
}

impl fmt::Display for TypedHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name(), self.value_string())
    }
}
