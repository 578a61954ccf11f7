//! # SIP Response Message
//!
//! [`Response::from_request`] creates the response skeleton RFC 3261
//! section 8.2.6.2 requires: Via, From, To, Call-ID and CSeq are copied
//! from the request. Further headers are appended or replaced by name.
//!
//! ```rust
//! use sipserve_sip_core::prelude::*;
//!
//! let request = Request::new(Method::Register, "sip:registrar.example.com".parse().unwrap())
//!     .with_header(TypedHeader::CallId(CallId::new("abc123")));
//!
//! let mut response = Response::from_request(&request, StatusCode::BadRequest, "Bad Request", "");
//! response.replace_header(TypedHeader::Reason(Reason::new("Missing Via header")));
//! response.replace_header(TypedHeader::Reason(Reason::new("Missing branch in Via")));
//!
//! assert_eq!(response.headers_named(&HeaderName::Reason).len(), 1);
//! assert_eq!(response.call_id().map(CallId::value), Some("abc123"));
//! ```

use std::fmt;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::types::call_id::CallId;
use crate::types::contact::Contact;
use crate::types::cseq::CSeq;
use crate::types::headers::{HeaderName, TypedHeader};
use crate::types::reason::Reason;
use crate::types::sip_request::Request;
use crate::types::status::StatusCode;
use crate::types::to::To;
use crate::types::version::Version;

/// A SIP response message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub status: StatusCode,
    pub reason: String,
    pub version: Version,
    pub headers: Vec<TypedHeader>,
    pub body: Bytes,
}

impl Response {
    /// Response with the status code's default reason phrase and no headers
    pub fn new(status: StatusCode) -> Self {
        Response {
            status,
            reason: status.reason_phrase().to_string(),
            version: Version::sip_2_0(),
            headers: Vec::new(),
            body: Bytes::new(),
        }
    }

    /// Builds a response to `request`, copying the transaction-identifying
    /// headers and setting Content-Length for `body`.
    pub fn from_request(
        request: &Request,
        status: StatusCode,
        reason: impl Into<String>,
        body: impl Into<Bytes>,
    ) -> Self {
        let body = body.into();
        let mut headers: Vec<TypedHeader> = request
            .headers
            .iter()
            .filter(|h| {
                matches!(
                    h,
                    TypedHeader::Via(_)
                        | TypedHeader::From(_)
                        | TypedHeader::To(_)
                        | TypedHeader::CallId(_)
                        | TypedHeader::CSeq(_)
                )
            })
            .cloned()
            .collect();
        headers.push(TypedHeader::ContentLength(content_length(body.len())));

        let reason = reason.into();
        Response {
            reason: if reason.is_empty() {
                status.reason_phrase().to_string()
            } else {
                reason
            },
            status,
            version: request.version,
            headers,
            body,
        }
    }

    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    /// First header with the given name
    pub fn header(&self, name: &HeaderName) -> Option<&TypedHeader> {
        self.headers.iter().find(|h| h.name().matches(name))
    }

    pub fn headers_named(&self, name: &HeaderName) -> Vec<&TypedHeader> {
        self.headers.iter().filter(|h| h.name().matches(name)).collect()
    }

    pub fn has_header(&self, name: &HeaderName) -> bool {
        self.header(name).is_some()
    }

    /// Removes every header with the given name, returning how many were removed
    pub fn remove_header(&mut self, name: &HeaderName) -> usize {
        let before = self.headers.len();
        self.headers.retain(|h| !h.name().matches(name));
        before - self.headers.len()
    }

    pub fn append_header(&mut self, header: TypedHeader) {
        self.headers.push(header);
    }

    /// Removes any header of the same name, then appends `header`
    pub fn replace_header(&mut self, header: TypedHeader) {
        self.remove_header(&header.name());
        self.headers.push(header);
    }

    pub fn to(&self) -> Option<&To> {
        self.headers.iter().find_map(|h| match h {
            TypedHeader::To(v) => Some(v),
            _ => None,
        })
    }

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

    /// Text of the Reason header, typed or untyped
    pub fn reason_text(&self) -> Option<String> {
        self.header(&HeaderName::Reason).map(|h| match h {
            TypedHeader::Reason(Reason(text)) => text.clone(),
            other => other.value_string(),
        })
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}\r\n", self.version, self.status.as_u16(), self.reason)?;
        for header in &self.headers {
            write!(f, "{}\r\n", header)?;
        }
        f.write_str("\r\n")?;
        f.write_str(&String::from_utf8_lossy(&self.body))
    }
}

// Content-Length is 1*DIGIT on the wire; the typed header holds a u32
fn content_length(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}
