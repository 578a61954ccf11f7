//! # SIP Contact Header
//!
//! A REGISTER carries the address at which the registrant can be reached.
//! Only the single-contact form and the `*` wildcard are modelled.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::parser::{contact_value, parse_complete};
use crate::types::address::Address;
use crate::types::param::Param;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Contact {
    Address(Address),
    /// `Contact: *`
    Wildcard,
}

impl Contact {
    pub fn new(address: Address) -> Self {
        Contact::Address(address)
    }

    pub fn address(&self) -> Option<&Address> {
        match self {
            Contact::Address(address) => Some(address),
            Contact::Wildcard => None,
        }
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, Contact::Wildcard)
    }

    /// User part of the contact URI
    pub fn username(&self) -> Option<&str> {
        self.address().and_then(Address::username)
    }

    /// `expires` parameter, looked up on the header first and then on the URI
    pub fn expires(&self) -> Option<u32> {
        let address = self.address()?;
        address
            .param("expires")
            .or_else(|| address.uri.param("expires"))
            .and_then(Param::value)
            .and_then(|v| v.trim().parse().ok())
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Contact::Address(address) => fmt::Display::fmt(address, f),
            Contact::Wildcard => f.write_str("*"),
        }
    }
}

impl FromStr for Contact {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_complete(s, contact_value).ok_or_else(|| Error::InvalidAddress(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expires_prefers_header_param() {
        let contact: Contact = "<sip:alice@10.0.0.5;expires=30>;expires=120".parse().unwrap();
        assert_eq!(contact.expires(), Some(120));

        let contact: Contact = "<sip:alice@10.0.0.5;expires=30>".parse().unwrap();
        assert_eq!(contact.expires(), Some(30));
    }

    #[test]
    fn test_unparseable_expires_is_ignored() {
        let contact: Contact = "<sip:alice@10.0.0.5>;expires=soon".parse().unwrap();
        assert_eq!(contact.expires(), None);
    }

    #[test]
    fn test_wildcard() {
        let contact: Contact = " * ".parse().unwrap();
        assert!(contact.is_wildcard());
        assert_eq!(contact.username(), None);
        assert_eq!(contact.to_string(), "*");
    }
}
