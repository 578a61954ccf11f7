//! # Addresses
//!
//! The `name-addr` / `addr-spec` value shared by From, To and Contact:
//! an optional display name, a URI and header parameters.
//!
//! ```rust
//! use sipserve_sip_core::prelude::*;
//!
//! let addr: Address = "\"Alice\" <sip:alice@atlanta.com>;tag=1928301774".parse().unwrap();
//! assert_eq!(addr.display_name.as_deref(), Some("Alice"));
//! assert_eq!(addr.username(), Some("alice"));
//! assert_eq!(addr.tag(), Some("1928301774"));
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::parser::{name_addr_or_addr_spec, parse_complete};
use crate::types::param::{find_param, set_param, write_params, Param};
use crate::types::uri::Uri;

/// A display name, URI and header parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub display_name: Option<String>,
    pub uri: Uri,
    /// Header parameters (after the closing `>`), not URI parameters
    pub params: Vec<Param>,
}

impl Address {
    pub fn new(uri: Uri) -> Self {
        Address {
            display_name: None,
            uri,
            params: Vec::new(),
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    pub fn with_param(mut self, param: Param) -> Self {
        set_param(&mut self.params, param);
        self
    }

    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    /// User part of the URI
    pub fn username(&self) -> Option<&str> {
        self.uri.username()
    }

    pub fn param(&self, name: &str) -> Option<&Param> {
        find_param(&self.params, name)
    }

    /// Value of the `tag` header parameter
    pub fn tag(&self) -> Option<&str> {
        self.param("tag").and_then(Param::value)
    }

    /// Sets or replaces the `tag` header parameter
    pub fn set_tag(&mut self, tag: impl Into<String>) {
        set_param(&mut self.params, Param::tag(tag));
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.display_name {
            let escaped = name.replace('\\', "\\\\").replace('"', "\\\"");
            write!(f, "\"{}\" ", escaped)?;
        }
        write!(f, "<{}>", self.uri)?;
        write_params(f, &self.params)
    }
}

impl FromStr for Address {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_complete(s, name_addr_or_addr_spec)
            .ok_or_else(|| Error::InvalidAddress(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_name_addr_without_display_name() {
        let addr: Address = "<sip:alice@10.0.0.5:5061>".parse().unwrap();
        assert_eq!(addr.display_name, None);
        assert_eq!(addr.uri.port, Some(5061));
        assert_eq!(addr.to_string(), "<sip:alice@10.0.0.5:5061>");
    }

    #[test]
    fn test_addr_spec_params_are_header_params() {
        let addr: Address = "sip:bob@biloxi.com;tag=a6c85cf".parse().unwrap();
        assert_eq!(addr.tag(), Some("a6c85cf"));
        assert!(addr.uri.params.is_empty());
    }

    #[test]
    fn test_uri_params_stay_inside_brackets() {
        let addr: Address = "<sip:bob@biloxi.com;transport=tcp>;expires=60".parse().unwrap();
        assert_eq!(addr.uri.param("transport").and_then(Param::value), Some("tcp"));
        assert_eq!(addr.param("expires").and_then(Param::value), Some("60"));
    }

    #[test]
    fn test_set_tag_replaces_existing_tag() {
        let mut addr: Address = "<sip:bob@biloxi.com>;tag=old".parse().unwrap();
        addr.set_tag("new");
        assert_eq!(addr.tag(), Some("new"));
        assert_eq!(addr.params.len(), 1);
    }

    #[test]
    fn test_quoted_display_name_roundtrips() {
        let addr: Address = r#""A<b \"c\"" <sip:alice@example.com>"#.parse().unwrap();
        assert_eq!(addr.display_name.as_deref(), Some(r#"A<b "c""#));
        assert_eq!(addr.to_string(), r#""A<b \"c\"" <sip:alice@example.com>"#);
    }

    #[test]
    fn test_rejects_multiple_addresses() {
        let listed = "<sip:alice@example.com;transport=tcp>;q=0.7, <sip:alice@10.0.0.6>";
        assert!(listed.parse::<Address>().is_err());
    }

    #[test]
    fn test_rejects_unterminated_bracket() {
        assert!("<sip:bob@biloxi.com".parse::<Address>().is_err());
        assert!("<sip:bob@biloxi.com> junk".parse::<Address>().is_err());
    }
}
