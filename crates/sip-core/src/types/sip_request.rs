//! # SIP Request Message
//!
//! A request as handed over by the transaction layer: method, request URI,
//! version, typed headers in wire order and the raw body.
//!
//! ```rust
//! use sipserve_sip_core::prelude::*;
//!
//! let request = Request::new(Method::Register, "sip:registrar.example.com".parse().unwrap())
//!     .with_header(TypedHeader::CallId(CallId::new("843817637684230@998sdasdh09")))
//!     .with_header(TypedHeader::CSeq(CSeq::new(1826, Method::Register)));
//!
//! assert_eq!(request.call_id().map(CallId::value), Some("843817637684230@998sdasdh09"));
//! assert_eq!(request.cseq().map(|c| c.seq), Some(1826));
//! ```

use std::fmt;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::types::call_id::CallId;
use crate::types::contact::Contact;
use crate::types::cseq::CSeq;
use crate::types::expires::Expires;
use crate::types::from::From;
use crate::types::headers::{HeaderName, TypedHeader};
use crate::types::method::Method;
use crate::types::to::To;
use crate::types::uri::Uri;
use crate::types::version::Version;
use crate::types::via::Via;

/// A SIP request message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    pub method: Method,
    pub uri: Uri,
    pub version: Version,
    pub headers: Vec<TypedHeader>,
    pub body: Bytes,
}

impl Request {
    /// SIP/2.0 request with no headers and an empty body
    pub fn new(method: Method, uri: Uri) -> Self {
        Request {
            method,
            uri,
            version: Version::sip_2_0(),
            headers: Vec::new(),
            body: Bytes::new(),
        }
    }

    pub fn with_header(mut self, header: TypedHeader) -> Self {
        self.headers.push(header);
        self
    }

    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// First header with the given name
    pub fn header(&self, name: &HeaderName) -> Option<&TypedHeader> {
        self.headers.iter().find(|h| h.name().matches(name))
    }

    /// First Via header
    pub fn via(&self) -> Option<&Via> {
        self.headers.iter().find_map(|h| match h {
            TypedHeader::Via(v) => Some(v),
            _ => None,
        })
    }

    pub fn from(&self) -> Option<&From> {
        self.headers.iter().find_map(|h| match h {
            TypedHeader::From(v) => Some(v),
            _ => None,
        })
    }

    pub fn to(&self) -> Option<&To> {
        self.headers.iter().find_map(|h| match h {
            TypedHeader::To(v) => Some(v),
            _ => None,
        })
    }

    /// First Contact header
    pub fn contact(&self) -> Option<&Contact> {
        self.headers.iter().find_map(|h| match h {
            TypedHeader::Contact(v) => Some(v),
            _ => None,
        })
    }

    pub fn call_id(&self) -> Option<&CallId> {
        self.headers.iter().find_map(|h| match h {
            TypedHeader::CallId(v) => Some(v),
            _ => None,
        })
    }

    pub fn cseq(&self) -> Option<&CSeq> {
        self.headers.iter().find_map(|h| match h {
            TypedHeader::CSeq(v) => Some(v),
            _ => None,
        })
    }

    pub fn expires(&self) -> Option<&Expires> {
        self.headers.iter().find_map(|h| match h {
            TypedHeader::Expires(v) => Some(v),
            _ => None,
        })
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}\r\n", self.method, self.uri, self.version)?;
        for header in &self.headers {
            write!(f, "{}\r\n", header)?;
        }
        f.write_str("\r\n")?;
        f.write_str(&String::from_utf8_lossy(&self.body))
    }
}
