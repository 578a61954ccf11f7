//! SIP From header

use std::fmt;
use std::ops::Deref;

use serde::{Deserialize, Serialize};

use crate::types::address::Address;

/// The From header: the registrant's address-of-record and its tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct From(pub Address);

impl From {
    pub fn new(address: Address) -> Self {
        From(address)
    }

    pub fn address(&self) -> &Address {
        &self.0
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.0.set_tag(tag);
        self
    }
}

impl Deref for From {
    type Target = Address;

    fn deref(&self) -> &Address {
        &self.0
    }
}

impl fmt::Display for From {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
