//! Header names

use std::fmt;

use serde::{Deserialize, Serialize};

/// Name of a SIP header.
///
/// Known names are matched case-insensitively, including the compact forms
/// of RFC 3261 section 7.3.3 (`v`, `f`, `t`, `m`, `i`, `l`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeaderName {
    Via,
    From,
    To,
    Contact,
    CallId,
    CSeq,
    Expires,
    Reason,
    ContentLength,
    Server,
    Other(String),
}

impl HeaderName {
    /// Canonical spelling
    pub fn as_str(&self) -> &str {
        match self {
            HeaderName::Via => "Via",
            HeaderName::From => "From",
            HeaderName::To => "To",
            HeaderName::Contact => "Contact",
            HeaderName::CallId => "Call-ID",
            HeaderName::CSeq => "CSeq",
            HeaderName::Expires => "Expires",
            HeaderName::Reason => "Reason",
            HeaderName::ContentLength => "Content-Length",
            HeaderName::Server => "Server",
            HeaderName::Other(name) => name,
        }
    }

    /// Maps a header name as written on the wire to its variant
    pub fn from_name(name: &str) -> Self {
        let name = name.trim();
        match name.to_ascii_lowercase().as_str() {
            "via" | "v" => HeaderName::Via,
            "from" | "f" => HeaderName::From,
            "to" | "t" => HeaderName::To,
            "contact" | "m" => HeaderName::Contact,
            "call-id" | "i" => HeaderName::CallId,
            "cseq" => HeaderName::CSeq,
            "expires" => HeaderName::Expires,
            "reason" => HeaderName::Reason,
            "content-length" | "l" => HeaderName::ContentLength,
            "server" => HeaderName::Server,
            _ => HeaderName::Other(name.to_string()),
        }
    }

    /// Compares names, ignoring case for unknown headers
    pub fn matches(&self, other: &HeaderName) -> bool {
        match (self, other) {
            (HeaderName::Other(a), HeaderName::Other(b)) => a.eq_ignore_ascii_case(b),
            _ => self == other,
        }
    }
}

impl fmt::Display for HeaderName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
