//! # SIP URIs
//!
//! A reduced model of RFC 3261 section 19.1 URIs: scheme, optional user part,
//! host, optional port and URI parameters. Headers (`?...`) and passwords are
//! not retained.
//!
//! ```rust
//! use sipserve_sip_core::prelude::*;
//!
//! let uri: Uri = "sip:alice@10.0.0.5:5061;transport=tcp".parse().unwrap();
//! assert_eq!(uri.username(), Some("alice"));
//! assert_eq!(uri.host, "10.0.0.5");
//! assert_eq!(uri.port, Some(5061));
//! assert_eq!(uri.to_string(), "sip:alice@10.0.0.5:5061;transport=tcp");
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::parser::{parse_complete, parse_uri};
use crate::types::param::{find_param, write_params, Param};

/// URI scheme
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scheme {
    Sip,
    Sips,
    Tel,
    Other(String),
}

impl Scheme {
    pub fn as_str(&self) -> &str {
        match self {
            Scheme::Sip => "sip",
            Scheme::Sips => "sips",
            Scheme::Tel => "tel",
            Scheme::Other(s) => s,
        }
    }

    /// True for `sip` and `sips`
    pub fn is_sip(&self) -> bool {
        matches!(self, Scheme::Sip | Scheme::Sips)
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scheme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() || !s.chars().all(|c| c.is_ascii_alphanumeric() || "+-.".contains(c)) {
            return Err(Error::InvalidUri(format!("invalid scheme '{}'", s)));
        }
        Ok(match s.to_ascii_lowercase().as_str() {
            "sip" => Scheme::Sip,
            "sips" => Scheme::Sips,
            "tel" => Scheme::Tel,
            other => Scheme::Other(other.to_string()),
        })
    }
}

/// A SIP (or other scheme) URI
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Uri {
    pub scheme: Scheme,
    pub user: Option<String>,
    pub host: String,
    pub port: Option<u16>,
    pub params: Vec<Param>,
}

impl Uri {
    pub fn new(scheme: Scheme, host: impl Into<String>) -> Self {
        Uri {
            scheme,
            user: None,
            host: host.into(),
            port: None,
            params: Vec::new(),
        }
    }

    /// `sip:` URI for the given host
    pub fn sip(host: impl Into<String>) -> Self {
        Uri::new(Scheme::Sip, host)
    }

    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn with_param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    /// User part, if present and non-empty
    pub fn username(&self) -> Option<&str> {
        self.user.as_deref().filter(|u| !u.is_empty())
    }

    pub fn param(&self, name: &str) -> Option<&Param> {
        find_param(&self.params, name)
    }

    /// Port implied by the scheme when none is given (RFC 3263 defaults)
    pub fn default_port(&self) -> Option<u16> {
        match self.scheme {
            Scheme::Sip => Some(5060),
            Scheme::Sips => Some(5061),
            _ => None,
        }
    }

    /// Explicit port, falling back to the scheme default
    pub fn effective_port(&self) -> Option<u16> {
        self.port.or_else(|| self.default_port())
    }

    /// `host[:port]`
    pub fn host_port(&self) -> String {
        match self.port {
            Some(port) => format!("{}:{}", self.host, port),
            None => self.host.clone(),
        }
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.scheme)?;
        if let Some(user) = &self.user {
            write!(f, "{}@", user)?;
        }
        f.write_str(&self.host_port())?;
        write_params(f, &self.params)
    }
}

impl FromStr for Uri {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_complete(s, parse_uri).ok_or_else(|| Error::InvalidUri(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_sip_uri() {
        let uri: Uri = "sip:alice:secret@example.com:5070;transport=udp;lr"
            .parse()
            .unwrap();
        assert_eq!(uri.scheme, Scheme::Sip);
        assert_eq!(uri.username(), Some("alice"));
        assert_eq!(uri.host, "example.com");
        assert_eq!(uri.port, Some(5070));
        assert_eq!(uri.param("transport").and_then(Param::value), Some("udp"));
        assert!(uri.param("lr").unwrap().is_flag());
    }

    #[test]
    fn test_parse_ipv6_host() {
        let uri: Uri = "sips:bob@[2001:db8::1]:5061".parse().unwrap();
        assert_eq!(uri.scheme, Scheme::Sips);
        assert_eq!(uri.host, "[2001:db8::1]");
        assert_eq!(uri.port, Some(5061));
    }

    #[test]
    fn test_effective_port_uses_scheme_default() {
        let sip: Uri = "sip:alice@10.0.0.5".parse().unwrap();
        let sips: Uri = "sips:alice@10.0.0.5".parse().unwrap();
        let tel: Uri = "tel:+15551234".parse().unwrap();
        assert_eq!(sip.effective_port(), Some(5060));
        assert_eq!(sips.effective_port(), Some(5061));
        assert_eq!(tel.effective_port(), None);
    }

    #[test]
    fn test_rejects_malformed_uris() {
        assert!("alice@example.com".parse::<Uri>().is_err());
        assert!("sip:alice@".parse::<Uri>().is_err());
        assert!("sip:alice@host:99999".parse::<Uri>().is_err());
        assert!("sip:alice@[::1".parse::<Uri>().is_err());
    }

    #[test]
    fn test_rejects_unbracketed_ipv6_host() {
        assert!("sip:alice@2001:db8::1".parse::<Uri>().is_err());
        assert!("sip:alice@[2001:db8::1]".parse::<Uri>().is_ok());
    }

    #[test]
    fn test_uri_headers_are_dropped() {
        let uri: Uri = "sip:alice@example.com?subject=project".parse().unwrap();
        assert_eq!(uri.to_string(), "sip:alice@example.com");
    }

    #[test]
    fn test_empty_user_is_treated_as_absent() {
        let uri: Uri = "sip:@example.com".parse().unwrap();
        assert_eq!(uri.username(), None);
    }
}
