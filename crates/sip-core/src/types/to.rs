//! # SIP To Header
//!
//! For REGISTER the To header carries the address-of-record being
//! registered. The UAS adds a `tag` to it on responses.

use std::fmt;
use std::ops::Deref;

use serde::{Deserialize, Serialize};

use crate::types::address::Address;

/// The To header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct To(pub Address);

impl To {
    pub fn new(address: Address) -> Self {
        To(address)
    }

    pub fn address(&self) -> &Address {
        &self.0
    }

    /// Sets or replaces the tag
    pub fn set_tag(&mut self, tag: impl Into<String>) {
        self.0.set_tag(tag);
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.set_tag(tag);
        self
    }
}

// Gives access to the Address accessors (`tag()`, `username()`, ...)
impl Deref for To {
    type Target = Address;

    fn deref(&self) -> &Address {
        &self.0
    }
}

impl fmt::Display for To {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
